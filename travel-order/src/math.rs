//! Small integer arithmetic helpers shared by the optimizers.

use std::ops::Mul;

/// Square a value.
#[inline]
pub fn square<T: Mul<Output = T> + Copy>(a: T) -> T {
    a * a
}

/// Divide, rounding to the nearest integer (halves round up).
///
/// Panics if `divisor` is zero, like plain integer division.
#[inline]
pub fn round_divide(dividend: u64, divisor: u64) -> u64 {
    (dividend + divisor / 2) / divisor
}

/// Divide, rounding up.
#[inline]
pub fn round_up_divide(dividend: u64, divisor: u64) -> u64 {
    (dividend + divisor - 1) / divisor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_works_for_ints_and_floats() {
        assert_eq!(square(7i64), 49);
        assert_eq!(square(-3i128), 9);
        assert!((square(1.5f64) - 2.25).abs() < 1e-12);
    }

    #[test]
    fn round_divide_rounds_to_nearest() {
        assert_eq!(round_divide(10, 4), 3); // 2.5 rounds up
        assert_eq!(round_divide(9, 4), 2); // 2.25
        assert_eq!(round_divide(11, 4), 3); // 2.75
        assert_eq!(round_divide(0, 7), 0);
    }

    #[test]
    fn round_up_divide_is_ceiling() {
        assert_eq!(round_up_divide(8, 4), 2);
        assert_eq!(round_up_divide(9, 4), 3);
        assert_eq!(round_up_divide(1, 1000), 1);
        assert_eq!(round_up_divide(0, 3), 0);
    }
}
