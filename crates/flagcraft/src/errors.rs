//! Error types for schema parsing and field classification.

use thiserror::Error;

/// Fatal errors produced by [crate::schema::Schema::parse].
///
/// Any of these means there is no usable schema and decoding must not be offered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The document is empty (`null`).
    #[error("no status definitions found")]
    Missing,
    /// The top level is not a mapping of status-type names.
    #[error("expected a mapping of status types at the top level, found {found}")]
    NotAMapping { found: &'static str },
    /// The top-level mapping has no entries.
    #[error("the status definition mapping is empty")]
    Empty,
    /// A status-type key is not a scalar.
    #[error("status type keys must be scalars, found {found}")]
    InvalidKey { found: &'static str },
    /// Two keys render to the same status-type name (e.g. `1` and `"1"`).
    #[error("status type `{name}` is defined more than once")]
    DuplicateStatusType { name: String },
    /// A status definition has the wrong shape.
    #[error("status type `{name}`: {reason}")]
    InvalidDefinition { name: String, reason: String },
}

/// Why a single field entry could not be classified as a [crate::field::FieldSpec].
///
/// Never fatal: the entry is kept in place and skipped by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum FieldError {
    /// Field entry is not a mapping.
    #[error("field entry is not a mapping")]
    NotAMapping,
    /// A key required by the field's declared type is absent.
    #[error("missing key '{key}'")]
    MissingKey { key: &'static str },
    /// The `type` discriminant is neither `mask` nor `enum`.
    #[error("unrecognized field type '{kind}'")]
    UnknownType { kind: String },
    /// A key is present but holds a value of the wrong shape.
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
    /// A bit index or shift does not fit the 64-bit code width.
    #[error("'{key}' is {value}, must be below {max}", max = crate::CODE_BITS)]
    OutOfRange { key: &'static str, value: u64 },
}
