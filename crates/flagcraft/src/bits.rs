//! Bit arithmetic on status codes.
//!
//! Codes are [Code] (`u64`). Bit 0 is the least significant bit. Positions at or
//! beyond [CODE_BITS] are outside the code and never set.

use crate::{CODE_BITS, Code};

/// Returns `1 << bit`, or `None` when `bit` is outside the code width.
pub fn bit_value(bit: u32) -> Option<Code> {
    (1 as Code).checked_shl(bit)
}

/// True when bit `bit` of `code` is 1.
pub fn is_set(code: Code, bit: u32) -> bool {
    match bit_value(bit) {
        Some(value) => code & value == value,
        None => false,
    }
}

/// Extracts a bit group: `(code >> shift) & mask`. Shifting by the full width or
/// more yields 0.
pub fn extract(code: Code, shift: u32, mask: Code) -> Code {
    code.checked_shr(shift).unwrap_or(0) & mask
}

/// True when `position` addresses a bit inside the code.
pub fn in_range(position: u64) -> bool {
    position < CODE_BITS as u64
}
