/// Linear interpolation from `a` toward `b` by fraction `n`.
///
/// Double precision: scroll offsets are unbounded and a per-frame step of a
/// few percent must still register far from the origin.
#[inline]
pub fn lerp(a: f64, b: f64, n: f64) -> f64 {
    (1.0 - n) * a + n * b
}

/// Wrap `value` into the half-open range `[min, max)`.
///
/// Values past either edge re-enter from the opposite edge, so the result is
/// periodic with period `max - min`. An empty or inverted range yields `min`.
#[inline]
pub fn wrap(min: f64, max: f64, value: f64) -> f64 {
    let range = max - min;
    if range.is_nan() || range <= 0.0 || !value.is_finite() {
        return min;
    }
    let wrapped = min + (value - min).rem_euclid(range);
    // rem_euclid can round up to exactly `range` for tiny negative inputs.
    if wrapped >= max { min } else { wrapped }
}

/// Map `value` linearly from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The mapping is not clamped. A degenerate input range yields `out_min`.
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let in_range = in_max - in_min;
    if in_range == 0.0 {
        return out_min;
    }
    out_min + (value - in_min) * (out_max - out_min) / in_range
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(0.0, -300.0, 0.05), -15.0);
    }

    #[test]
    fn wrap_keeps_values_in_range() {
        assert_eq!(wrap(-100.0, 300.0, 0.0), 0.0);
        assert_eq!(wrap(-100.0, 300.0, 300.0), -100.0);
        assert_eq!(wrap(-100.0, 300.0, -101.0), 299.0);
        assert_eq!(wrap(-100.0, 300.0, 1250.0), 50.0);
    }

    #[test]
    fn lerp_still_moves_far_from_origin() {
        let a = 999_995.5;
        let b = 999_996.875;
        let next = lerp(a, b, 0.05);
        assert!(next > a && next < b);
    }

    #[test]
    fn wrap_with_empty_range_returns_min() {
        assert_eq!(wrap(5.0, 5.0, 42.0), 5.0);
        assert_eq!(wrap(5.0, 1.0, 42.0), 5.0);
        assert_eq!(wrap(0.0, 10.0, f64::NAN), 0.0);
    }

    #[test]
    fn map_range_asymmetric_parallax() {
        let mid = map_range(0.0, -1.15, 1.15, -0.005, 0.01);
        assert!((mid - 0.0025).abs() < 1e-7);
        assert!((map_range(-1.15, -1.15, 1.15, -0.005, 0.01) + 0.005).abs() < 1e-7);
        assert!((map_range(1.15, -1.15, 1.15, -0.005, 0.01) - 0.01).abs() < 1e-7);
    }

    #[test]
    fn map_range_is_unclamped() {
        assert!(map_range(2.0, 0.0, 1.0, 0.0, 10.0) > 10.0);
        assert_eq!(map_range(3.0, 1.0, 1.0, 7.0, 9.0), 7.0);
    }
}
