//! Arithmetic/logic unit and condition-code generation for `OPq`.

use crate::bits::{add_overflow, sign, sub_overflow};
use crate::encoding::AluFunction;
use crate::state::ConditionCodes;

/// Result word and the flags it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    /// Computed `valE`.
    pub value: u64,
    /// Flags derived from `value` and the operands.
    pub flags: ConditionCodes,
}

/// Applies the function selected by `ifun` to `alu_a` and `alu_b`.
///
/// Subtraction computes `alu_b - alu_a`. An undefined `ifun` yields `0` with
/// overflow clear.
#[must_use]
pub fn evaluate(ifun: u8, alu_a: u64, alu_b: u64) -> AluResult {
    let (value, overflow) = match AluFunction::from_u4(ifun) {
        Some(AluFunction::Add) => (alu_b.wrapping_add(alu_a), add_overflow(alu_a, alu_b)),
        Some(AluFunction::Sub) => (alu_b.wrapping_sub(alu_a), sub_overflow(alu_a, alu_b)),
        Some(AluFunction::And) => (alu_b & alu_a, false),
        Some(AluFunction::Xor) => (alu_b ^ alu_a, false),
        None => (0, false),
    };

    AluResult {
        value,
        flags: ConditionCodes {
            zero: value == 0,
            sign: sign(value) == 1,
            overflow,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::evaluate;
    use rstest::rstest;

    #[rstest]
    #[case::add(0x0, 5, 5, 10)]
    #[case::sub_is_b_minus_a(0x1, 3, 10, 7)]
    #[case::and(0x2, 0b1100, 0b1010, 0b1000)]
    #[case::xor(0x3, 0b1100, 0b1010, 0b0110)]
    #[case::undefined(0x7, 3, 4, 0)]
    fn functions_compute_expected_value(
        #[case] ifun: u8,
        #[case] alu_a: u64,
        #[case] alu_b: u64,
        #[case] expected: u64,
    ) {
        assert_eq!(evaluate(ifun, alu_a, alu_b).value, expected);
    }

    #[test]
    fn zero_result_sets_zero_flag() {
        let result = evaluate(0x3, 0x55, 0x55);

        assert!(result.flags.zero);
        assert!(!result.flags.sign);
        assert!(!result.flags.overflow);
    }

    #[test]
    fn negative_difference_sets_sign() {
        let result = evaluate(0x1, 10, 3);

        assert_eq!(result.value as i64, -7);
        assert!(result.flags.sign);
        assert!(!result.flags.overflow);
    }

    #[test]
    fn signed_add_wraparound_sets_overflow() {
        let result = evaluate(0x0, 1, 0x7FFF_FFFF_FFFF_FFFF);

        assert!(result.flags.overflow);
        assert!(result.flags.sign);
    }

    #[test]
    fn signed_sub_wraparound_sets_overflow() {
        // i64::MIN - 1
        let result = evaluate(0x1, 1, 1 << 63);

        assert!(result.flags.overflow);
        assert!(!result.flags.sign);
    }

    #[test]
    fn undefined_function_still_produces_flags() {
        let result = evaluate(0xF, 1, 2);

        assert!(result.flags.zero);
        assert!(!result.flags.overflow);
    }
}
