//! Fixed-capacity byte-addressable memory store.

/// Bounds-checking policy for store accesses.
pub mod access;

pub use access::{validate_access, AccessError};

use crate::bits::{build_word, LONG_BYTES};

/// Default store capacity in bytes (32 KiB).
pub const DEFAULT_MEMORY_BYTES: usize = 0x8000;

/// Flat byte array addressed `0..capacity`.
///
/// Every accessor is bounds-checked. A rejected write leaves every byte
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_BYTES)
    }
}

impl Memory {
    /// Allocates a zeroed store of `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity].into_boxed_slice(),
        }
    }

    /// Number of addressable bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Raw view of the whole store.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reads the byte at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when `address` is outside the store.
    pub fn get_byte(&self, address: u64) -> Result<u8, AccessError> {
        let range = validate_access(address, 1, self.capacity())?;
        Ok(self.bytes[range.start])
    }

    /// Reads the eight bytes starting at `address` as a little-endian word.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when any of the eight bytes is outside the store.
    pub fn get_long(&self, address: u64) -> Result<u64, AccessError> {
        let range = validate_access(address, LONG_BYTES, self.capacity())?;
        let mut bytes = [0_u8; LONG_BYTES];
        bytes.copy_from_slice(&self.bytes[range]);
        Ok(build_word(bytes))
    }

    /// Writes one byte at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when `address` is outside the store.
    pub fn put_byte(&mut self, address: u64, value: u8) -> Result<(), AccessError> {
        let range = validate_access(address, 1, self.capacity())?;
        self.bytes[range.start] = value;
        Ok(())
    }

    /// Writes `value` as eight little-endian bytes starting at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when any of the eight bytes is outside the
    /// store; nothing is written in that case.
    pub fn put_long(&mut self, address: u64, value: u64) -> Result<(), AccessError> {
        let range = validate_access(address, LONG_BYTES, self.capacity())?;
        self.bytes[range].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Copies `data` into the store starting at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when the block does not fit; nothing is written
    /// in that case.
    pub fn put_block(&mut self, address: u64, data: &[u8]) -> Result<(), AccessError> {
        let range = validate_access(address, data.len(), self.capacity())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Non-zero words at 8-byte stride, in ascending address order.
    ///
    /// A trailing partial word (capacity not a multiple of 8) is skipped.
    pub fn nonzero_words(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.bytes
            .chunks_exact(LONG_BYTES)
            .zip((0_u64..).step_by(LONG_BYTES))
            .filter_map(|(chunk, address)| {
                let mut bytes = [0_u8; LONG_BYTES];
                bytes.copy_from_slice(chunk);
                let word = build_word(bytes);
                (word != 0).then_some((address, word))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessError, Memory, DEFAULT_MEMORY_BYTES};

    #[test]
    fn default_store_is_zeroed_32kib() {
        let memory = Memory::default();
        assert_eq!(memory.capacity(), DEFAULT_MEMORY_BYTES);
        assert!(memory.as_bytes().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn long_accesses_are_little_endian() {
        let mut memory = Memory::new(32);
        memory
            .put_long(4, 0x0102_0304_0506_0708)
            .expect("in-bounds write");

        assert_eq!(memory.get_byte(4), Ok(0x08));
        assert_eq!(memory.get_byte(11), Ok(0x01));
        assert_eq!(memory.get_long(4), Ok(0x0102_0304_0506_0708));
    }

    #[test]
    fn byte_access_at_capacity_is_rejected() {
        let mut memory = Memory::new(16);
        assert_eq!(
            memory.get_byte(16),
            Err(AccessError {
                address: 16,
                width: 1,
                capacity: 16
            })
        );
        assert!(memory.put_byte(16, 0xAA).is_err());
    }

    #[test]
    fn straddling_write_leaves_memory_unchanged() {
        let mut memory = Memory::new(16);
        memory.put_byte(15, 0x5A).expect("in-bounds write");

        assert!(memory.put_long(12, u64::MAX).is_err());
        assert!(memory.get_long(12).is_err());

        let mut expected = [0_u8; 16];
        expected[15] = 0x5A;
        assert_eq!(memory.as_bytes(), &expected);
    }

    #[test]
    fn block_write_is_all_or_nothing() {
        let mut memory = Memory::new(8);
        assert!(memory.put_block(6, &[1, 2, 3]).is_err());
        assert!(memory.as_bytes().iter().all(|byte| *byte == 0));

        memory.put_block(5, &[1, 2, 3]).expect("fits exactly");
        assert_eq!(memory.as_bytes(), &[0, 0, 0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn nonzero_words_reports_word_granularity() {
        let mut memory = Memory::new(36);
        memory.put_long(8, 42).expect("in-bounds write");
        memory.put_byte(23, 0x80).expect("in-bounds write");
        memory.put_byte(33, 0xFF).expect("in-bounds write");

        let words: Vec<_> = memory.nonzero_words().collect();
        assert_eq!(words, vec![(8, 42), (16, 0x8000_0000_0000_0000)]);
    }
}
