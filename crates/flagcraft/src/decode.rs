//! Decoder: renders a status code against one [StatusDefinition].
//!
//! Every field entry is visited in order. Classified fields may append one line
//! to the output; malformed entries append nothing and produce a [Diagnostic]
//! instead. A malformed entry never stops the remaining fields from rendering.

use std::fmt;

use crate::{Code, errors::FieldError, schema::StatusDefinition};

/// A malformed field entry that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// Position of the entry in the definition's field list.
    pub index: usize,
    pub error: FieldError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field #{}: skipping malformed field: {}",
            self.index, self.error
        )
    }
}

/// Result of a decode pass: the active flags plus any skipped entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decoded {
    /// Rendered lines in field order. Empty means no active flags.
    pub flags: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Decodes `code` into the list of active flag descriptions.
pub fn decode(code: Code, definition: &StatusDefinition) -> Vec<String> {
    decode_report(code, definition).flags
}

/// Decodes `code` and also returns a diagnostic for every malformed entry.
pub fn decode_report(code: Code, definition: &StatusDefinition) -> Decoded {
    let mut decoded = Decoded::default();

    for (index, entry) in definition.fields().iter().enumerate() {
        match entry {
            Ok(field) => {
                if let Some(line) = field.render(code) {
                    decoded.flags.push(line);
                }
            }
            Err(error) => {
                tracing::warn!(index, %error, "skipping malformed field");
                decoded.diagnostics.push(Diagnostic {
                    index,
                    error: error.clone(),
                });
            }
        }
    }

    decoded
}

#[cfg(test)]
mod tests {
    use crate::field::{EnumField, FieldSpec, MaskField};

    use super::*;

    fn mode_field() -> FieldSpec {
        EnumField::new(
            4,
            3,
            "Mode",
            [(0, "Idle".to_string()), (1, "Active".to_string())],
        )
        .into()
    }

    #[test]
    fn test_decode_masks() {
        let definition = StatusDefinition::from_specs(
            "",
            [
                FieldSpec::from(MaskField::new(0, "A")),
                FieldSpec::from(MaskField::new(4, "B")),
            ],
        );
        assert_eq!(decode(17, &definition), vec!["A", "B"]);
        assert_eq!(decode(16, &definition), vec!["B"]);
        assert!(decode(0, &definition).is_empty());
    }

    #[test]
    fn test_decode_enum() {
        let definition = StatusDefinition::from_specs("", [mode_field()]);
        assert_eq!(decode(16, &definition), vec!["Mode: Active"]);
    }

    #[test]
    fn test_decode_enum_unknown_value() {
        let definition = StatusDefinition::from_specs("", [mode_field()]);
        assert_eq!(decode(48, &definition), vec!["Mode: Unknown Value (3)"]);
    }

    #[test]
    fn test_decode_empty_definition() {
        let definition = StatusDefinition::default();
        assert!(decode(273, &definition).is_empty());
    }

    #[test]
    fn test_decode_skips_malformed_field() {
        let definition =
            StatusDefinition::new("", vec![Err(FieldError::MissingKey { key: "bit" })]);

        let decoded = decode_report(1, &definition);
        assert!(decoded.flags.is_empty());
        assert_eq!(
            decoded.diagnostics,
            vec![Diagnostic {
                index: 0,
                error: FieldError::MissingKey { key: "bit" },
            }]
        );
        assert_eq!(
            decoded.diagnostics[0].to_string(),
            "field #0: skipping malformed field: missing key 'bit'"
        );
    }

    #[test]
    fn test_decode_continues_after_malformed_field() {
        let definition = StatusDefinition::new(
            "",
            vec![
                Ok(MaskField::new(0, "A").into()),
                Err(FieldError::MissingKey { key: "bit" }),
                Ok(mode_field()),
                Err(FieldError::UnknownType {
                    kind: "range".to_string(),
                }),
                Ok(MaskField::new(8, "C").into()),
            ],
        );

        let decoded = decode_report(0b1_0001_0001, &definition);
        assert_eq!(decoded.flags, vec!["A", "Mode: Active", "C"]);
        assert_eq!(
            decoded
                .diagnostics
                .iter()
                .map(|d| d.index)
                .collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(decode(0b1_0001_0001, &definition), decoded.flags);
    }

    #[test]
    fn test_decode_is_repeatable() {
        let definition = StatusDefinition::from_specs(
            "",
            [FieldSpec::from(MaskField::new(2, "X")), mode_field()],
        );
        assert_eq!(decode(0x34, &definition), decode(0x34, &definition));
    }
}
