//! Parsing the status code typed by the user.

use std::num::IntErrorKind;

use flagcraft::{CODE_BITS, Code};
use thiserror::Error;

/// The supplied text is not a status code. Decoding is not attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("enter a code to decode")]
    Empty,
    #[error("'{input}' is negative; status codes are unsigned")]
    Negative { input: String },
    #[error("'{input}' is not a valid integer")]
    Invalid { input: String },
    #[error("'{input}' does not fit in {bits} bits", bits = CODE_BITS)]
    Overflow { input: String },
}

/// Parses a status code.
///
/// Accepts decimal by default and `0x`, `0o` or `0b` prefixed input. Surrounding
/// whitespace, a leading `+` and `_` separators between digits are allowed.
pub fn parse_code(input: &str) -> Result<Code, CodeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CodeError::Empty);
    }

    let invalid = || CodeError::Invalid {
        input: trimmed.to_string(),
    };

    if trimmed.starts_with('-') {
        return Err(CodeError::Negative {
            input: trimmed.to_string(),
        });
    }

    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let (digits, radix) = split_radix(unsigned);

    if digits.is_empty()
        || digits.starts_with(['+', '-', '_'])
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return Err(invalid());
    }

    let digits: String = digits.chars().filter(|c| *c != '_').collect();

    Code::from_str_radix(&digits, radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => CodeError::Overflow {
            input: trimmed.to_string(),
        },
        _ => invalid(),
    })
}

fn split_radix(text: &str) -> (&str, u32) {
    let prefixes = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];

    for (prefix, radix) in prefixes {
        if let Some(rest) = text.strip_prefix(prefix) {
            return (rest, radix);
        }
    }

    (text, 10)
}
