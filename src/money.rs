//! Whole-unit money and the rounding policy applied at output boundaries
//!
//! All intermediate arithmetic runs in `f64`. Only published figures are
//! rounded, and only once.

/// Amount in whole units of the dealership's local currency
pub type Money = i64;

/// Round half away from zero to the nearest whole unit
pub fn round_money(value: f64) -> Money {
    value.round() as Money
}

/// Float noise below this is discarded before directed rounding
const SNAP_SCALE: f64 = 1e6;

fn snap(value: f64) -> f64 {
    (value * SNAP_SCALE).round() / SNAP_SCALE
}

/// Round toward negative infinity
pub fn floor_money(value: f64) -> Money {
    snap(value).floor() as Money
}

/// Round toward positive infinity
pub fn ceil_money(value: f64) -> Money {
    snap(value).ceil() as Money
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_policy() {
        assert_eq!(round_money(474.73), 475);
        assert_eq!(round_money(474.5), 475);
        assert_eq!(round_money(-12.5), -13);
        assert_eq!(floor_money(899.99), 899);
        assert_eq!(ceil_money(1100.01), 1101);
        assert_eq!(ceil_money(1100.0), 1100);
        // 1.1 is not exact in binary; 1000 * 1.1 must not ceil to 1101
        assert_eq!(ceil_money(1000.0 * 1.1), 1100);
    }
}
