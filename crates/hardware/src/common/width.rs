//! Bit-width helpers.
//!
//! Every signal value is held in a `u128`, so widths are limited to
//! [`MAX_WIDTH`] bits. The helpers here are the only place masks are built;
//! the rest of the crate checks widths through [`check_width`] and
//! [`check_value`] before creating nodes.

use super::error::{CircuitError, Result};

/// Smallest legal signal width.
pub const MIN_WIDTH: u32 = 1;

/// Largest legal signal width (the bit size of the value container).
pub const MAX_WIDTH: u32 = u128::BITS;

/// Returns a mask with the low `width` bits set.
///
/// `width` must already be validated; a width of [`MAX_WIDTH`] yields an
/// all-ones mask.
#[inline]
pub const fn mask(width: u32) -> u128 {
    if width >= MAX_WIDTH {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}

/// Number of bits needed to represent `value`, never less than one.
///
/// This is the width given to bare integer operands.
#[inline]
pub const fn min_width(value: u128) -> u32 {
    if value == 0 {
        MIN_WIDTH
    } else {
        MAX_WIDTH - value.leading_zeros()
    }
}

/// Rejects widths outside `MIN_WIDTH..=MAX_WIDTH`.
pub const fn check_width(width: u32) -> Result<u32> {
    if width < MIN_WIDTH || width > MAX_WIDTH {
        Err(CircuitError::InvalidWidth { width })
    } else {
        Ok(width)
    }
}

/// Rejects values that do not fit in `width` bits.
pub const fn check_value(value: u128, width: u32) -> Result<u128> {
    if value & !mask(width) != 0 {
        Err(CircuitError::ValueOutOfRange { value, width })
    } else {
        Ok(value)
    }
}
