//! Property coverage for the bit toolkit, memory store, and register file.

#![allow(clippy::pedantic, clippy::nursery, clippy::cast_possible_truncation)]

use log as _;
use proptest::prelude::*;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use y86_core::{
    add_overflow, build_word, clear_bits, get_bits, get_byte, set_bits, sub_overflow, Memory,
    Register, RegisterFile,
};

fn valid_range() -> impl Strategy<Value = (i32, i32)> {
    (0_i32..=63).prop_flat_map(|low| (Just(low), low..=63))
}

proptest! {
    #[test]
    fn set_then_get_is_all_ones(source in any::<u64>(), (low, high) in valid_range()) {
        let width = high - low + 1;
        let ones = if width == 64 { u64::MAX } else { (1_u64 << width) - 1 };
        prop_assert_eq!(get_bits(set_bits(source, low, high), low, high), ones);
    }

    #[test]
    fn clear_then_get_is_zero(source in any::<u64>(), (low, high) in valid_range()) {
        prop_assert_eq!(get_bits(clear_bits(source, low, high), low, high), 0);
    }

    #[test]
    fn set_bits_leaves_outside_bits_alone(source in any::<u64>(), (low, high) in valid_range()) {
        let changed = set_bits(source, low, high) ^ source;
        prop_assert_eq!(clear_bits(changed, low, high), 0);
    }

    #[test]
    fn build_word_decomposes_back_to_bytes(bytes in any::<[u8; 8]>()) {
        let word = build_word(bytes);
        let mut decomposed = [0_u8; 8];
        for (index, byte) in decomposed.iter_mut().enumerate() {
            *byte = get_byte(word, index as i32) as u8;
        }
        prop_assert_eq!(decomposed, bytes);
    }

    #[test]
    fn overflow_helpers_agree_with_checked_arithmetic(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(add_overflow(a as u64, b as u64), a.checked_add(b).is_none());
        prop_assert_eq!(sub_overflow(a as u64, b as u64), b.checked_sub(a).is_none());
    }

    #[test]
    fn out_of_bounds_write_changes_nothing(
        capacity in 8_usize..256,
        overshoot in 1_u64..16,
        value in any::<u64>(),
    ) {
        let mut memory = Memory::new(capacity);
        let address = capacity as u64 - 8 + overshoot;

        prop_assert!(memory.put_long(address, value).is_err());
        prop_assert!(memory.as_bytes().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn sentinel_writes_never_land(values in any::<[u64; 15]>(), junk in any::<u64>()) {
        let mut registers = RegisterFile::default();
        for (register, value) in Register::ALL.into_iter().zip(values) {
            registers.write(Some(register), value);
        }

        registers.write(None, junk);

        prop_assert_eq!(registers.values(), &values);
        prop_assert_eq!(registers.read(None), 0);
    }
}
