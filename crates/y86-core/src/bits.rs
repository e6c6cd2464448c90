//! Pure bit-field helpers shared by fetch, decode, and execute.
//!
//! Bit positions are numbered from 0 (least significant) to 63 and ranges are
//! inclusive. Every helper is total: an invalid range never panics and instead
//! degrades to `0` (extraction) or to the unchanged input (mutation).

/// Number of bytes in an architectural word.
pub const LONG_BYTES: usize = 8;

/// Highest valid bit position in a 64-bit word.
pub const MAX_BIT: i32 = 63;

const fn range_is_valid(low: i32, high: i32) -> bool {
    low >= 0 && high <= MAX_BIT && low <= high
}

/// Right-aligned all-ones mask covering the inclusive range `[low, high]`.
///
/// Callers must have checked the range.
#[allow(clippy::cast_sign_loss)]
const fn range_mask(low: i32, high: i32) -> u64 {
    let width = (high - low + 1) as u32;
    let ones = if width >= 64 {
        u64::MAX
    } else {
        (1_u64 << width) - 1
    };
    ones << (low as u32)
}

/// Assembles a word from eight bytes, `bytes[0]` being the least significant.
#[must_use]
pub const fn build_word(bytes: [u8; LONG_BYTES]) -> u64 {
    let mut result = 0_u64;
    let mut i = 0;
    while i < LONG_BYTES {
        result |= (bytes[i] as u64) << (8 * i);
        i += 1;
    }
    result
}

/// Returns byte `byte_num` (0..=7) of `source`, or `0` for any other index.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn get_byte(source: u64, byte_num: i32) -> u64 {
    if byte_num < 0 || byte_num > 7 {
        return 0;
    }
    (source >> (byte_num as u32 * 8)) & 0xFF
}

/// Forces byte `byte_num` (0..=7) of `source` to `0xFF`.
#[must_use]
pub const fn set_byte(source: u64, byte_num: i32) -> u64 {
    if byte_num < 0 || byte_num > 7 {
        return source;
    }
    set_bits(source, byte_num * 8, byte_num * 8 + 7)
}

/// Extracts bits `[low, high]` of `source`, right-aligned to bit 0.
///
/// Returns `0` when `low < 0`, `high > 63`, or `low > high`.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn get_bits(source: u64, low: i32, high: i32) -> u64 {
    if !range_is_valid(low, high) {
        return 0;
    }
    (source & range_mask(low, high)) >> (low as u32)
}

/// Returns `source` with bits `[low, high]` forced to 1.
#[must_use]
pub const fn set_bits(source: u64, low: i32, high: i32) -> u64 {
    if !range_is_valid(low, high) {
        return source;
    }
    source | range_mask(low, high)
}

/// Returns `source` with bits `[low, high]` forced to 0.
#[must_use]
pub const fn clear_bits(source: u64, low: i32, high: i32) -> u64 {
    if !range_is_valid(low, high) {
        return source;
    }
    source & !range_mask(low, high)
}

/// Copies `length` bits of `source` starting at `src_low` into `dest` starting
/// at `dst_low`.
///
/// Returns `dest` unchanged when `length < 1` or either range leaves the word.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn copy_bits(source: u64, dest: u64, src_low: i32, dst_low: i32, length: i32) -> u64 {
    if length < 1 || src_low < 0 || dst_low < 0 {
        return dest;
    }
    let src_high = src_low as i64 + length as i64 - 1;
    let dst_high = dst_low as i64 + length as i64 - 1;
    if src_high > MAX_BIT as i64 || dst_high > MAX_BIT as i64 {
        return dest;
    }

    let field = get_bits(source, src_low, src_low + length - 1);
    clear_bits(dest, dst_low, dst_low + length - 1) | (field << (dst_low as u32))
}

/// Returns bit 63 of `word` (1 when negative in two's complement).
#[must_use]
pub const fn sign(word: u64) -> u8 {
    (word >> 63) as u8
}

/// Returns `true` when `a + b` overflows as a signed 64-bit addition.
#[must_use]
pub const fn add_overflow(a: u64, b: u64) -> bool {
    let sum = a.wrapping_add(b);
    sign(a) == sign(b) && sign(sum) != sign(a)
}

/// Returns `true` when `b - a` overflows as a signed 64-bit subtraction.
///
/// Overflow happens when a non-negative minus a negative yields a negative
/// result, or a negative minus a non-negative yields a non-negative one.
#[must_use]
pub const fn sub_overflow(a: u64, b: u64) -> bool {
    let difference = b.wrapping_sub(a);
    (sign(b) == 0 && sign(a) == 1 && sign(difference) == 1)
        || (sign(b) == 1 && sign(a) == 0 && sign(difference) == 0)
}
