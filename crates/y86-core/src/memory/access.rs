//! Bounds policy for byte and word accesses against a fixed-capacity store.

use std::ops::Range;

use thiserror::Error;

/// Rejected access: at least one touched byte lies outside `[0, capacity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{width}-byte access at {address:#x} exceeds memory capacity {capacity:#x}")]
pub struct AccessError {
    /// First address of the rejected access.
    pub address: u64,
    /// Number of bytes the access would touch.
    pub width: usize,
    /// Capacity of the store that rejected it.
    pub capacity: usize,
}

/// Validates an access of `width` bytes starting at `address`.
///
/// Addresses carry no alignment requirement; only the capacity bound is
/// enforced, and an address whose end would wrap the 64-bit space is rejected.
///
/// # Errors
///
/// Returns [`AccessError`] when `address + width > capacity`.
pub fn validate_access(address: u64, width: usize, capacity: usize) -> Result<Range<usize>, AccessError> {
    let error = AccessError {
        address,
        width,
        capacity,
    };
    let start = usize::try_from(address).map_err(|_| error)?;
    let end = start.checked_add(width).ok_or(error)?;
    if end > capacity {
        return Err(error);
    }
    Ok(start..end)
}

#[cfg(test)]
mod tests {
    use super::{validate_access, AccessError};

    #[test]
    fn in_bounds_access_yields_byte_range() {
        assert_eq!(validate_access(0, 8, 16), Ok(0..8));
        assert_eq!(validate_access(8, 8, 16), Ok(8..16));
        assert_eq!(validate_access(15, 1, 16), Ok(15..16));
    }

    #[test]
    fn unaligned_addresses_are_accepted() {
        assert_eq!(validate_access(3, 8, 16), Ok(3..11));
    }

    #[test]
    fn partially_outside_access_is_rejected() {
        assert_eq!(
            validate_access(9, 8, 16),
            Err(AccessError {
                address: 9,
                width: 8,
                capacity: 16
            })
        );
        assert!(validate_access(16, 1, 16).is_err());
    }

    #[test]
    fn wrapping_end_address_is_rejected() {
        assert!(validate_access(u64::MAX, 8, 16).is_err());
        assert!(validate_access(u64::MAX - 3, 8, usize::MAX).is_err());
    }
}
