//! # flagcraft
//!
//! Decodes integer status codes into human-readable lists of active conditions.
//!
//! A [Schema] maps status-type names to [StatusDefinition]s. Each definition is
//! an ordered list of fields: mask fields name a single bit, enum fields extract
//! a bit group with shift-then-mask and look it up in a table of labels. The
//! schema is parsed once from a deserialized config document and then only read.
//!
//! Codes are unsigned 64-bit integers ([Code]). Bit 0 is the least significant
//! bit; bit positions and shifts must be below [CODE_BITS].
//!
//! ## Example
//!
//! ```
//! use flagcraft::{Schema, decode};
//!
//! let raw: serde_yaml::Value = serde_yaml::from_str(
//!     r#"
//! GENERAL_STATUS:
//!   description: Power and sensor health
//!   fields:
//!     - type: mask
//!       bit: 0
//!       name: Main power OK
//!     - type: enum
//!       shift: 4
//!       mask: 3
//!       name: Mode
//!       values:
//!         0: Idle
//!         1: Active
//! "#,
//! )
//! .unwrap();
//!
//! let schema = Schema::parse(&raw).unwrap();
//! let general = schema.get("GENERAL_STATUS").unwrap();
//! assert_eq!(decode(17, general), vec!["Main power OK", "Mode: Active"]);
//! assert_eq!(decode(48, general), vec!["Mode: Unknown Value (3)"]);
//! ```

pub mod bits;
pub mod decode;
pub mod errors;
pub mod field;
pub mod schema;

pub use decode::{Decoded, Diagnostic, decode, decode_report};
pub use errors::{ConfigError, FieldError};
pub use field::{EnumField, FieldEntry, FieldSpec, MaskField};
pub use schema::{Schema, StatusDefinition};

/// A status code.
pub type Code = u64;

/// Width of [Code] in bits.
pub const CODE_BITS: u32 = Code::BITS;
