/// Names one of the three condition-code flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ConditionFlag {
    /// Last ALU result was zero.
    Zero,
    /// Last ALU result was negative.
    Sign,
    /// Last ALU operation overflowed as signed arithmetic.
    Overflow,
}

/// The zero, sign, and overflow flags.
///
/// `Default` clears all three; [`ConditionCodes::power_on`] is the state the
/// engine starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ConditionCodes {
    /// ZF: last result was zero.
    pub zero: bool,
    /// SF: last result had its top bit set.
    pub sign: bool,
    /// OF: last operation overflowed as signed arithmetic.
    pub overflow: bool,
}

impl ConditionCodes {
    /// Reset state: zero flag set, sign and overflow clear.
    #[must_use]
    pub const fn power_on() -> Self {
        Self {
            zero: true,
            sign: false,
            overflow: false,
        }
    }

    /// Reads one flag.
    #[must_use]
    pub const fn get(self, flag: ConditionFlag) -> bool {
        match flag {
            ConditionFlag::Zero => self.zero,
            ConditionFlag::Sign => self.sign,
            ConditionFlag::Overflow => self.overflow,
        }
    }

    /// Writes one flag.
    pub const fn set(&mut self, flag: ConditionFlag, value: bool) {
        match flag {
            ConditionFlag::Zero => self.zero = value,
            ConditionFlag::Sign => self.sign = value,
            ConditionFlag::Overflow => self.overflow = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConditionCodes, ConditionFlag};

    #[test]
    fn flags_are_independent() {
        let mut cc = ConditionCodes::default();

        for flag in [ConditionFlag::Zero, ConditionFlag::Sign, ConditionFlag::Overflow] {
            cc.set(flag, true);
            assert!(cc.get(flag));
        }

        cc.set(ConditionFlag::Sign, false);
        assert!(cc.get(ConditionFlag::Zero));
        assert!(!cc.get(ConditionFlag::Sign));
        assert!(cc.get(ConditionFlag::Overflow));
    }

    #[test]
    fn power_on_sets_only_zero() {
        let cc = ConditionCodes::power_on();
        assert!(cc.get(ConditionFlag::Zero));
        assert!(!cc.get(ConditionFlag::Sign));
        assert!(!cc.get(ConditionFlag::Overflow));
        assert_ne!(cc, ConditionCodes::default());
    }
}
