//! Text and JSON rendering of command results.

use flagcraft::{Code, Decoded, FieldError, FieldSpec, Schema, StatusDefinition};
use serde::Serialize;

/// Shown when a code has no active flags.
pub const NO_ACTIVE_FLAGS: &str = "No active flags found for this code.";

#[derive(Serialize)]
struct StatusSummary<'a> {
    name: &'a str,
    description: &'a str,
    fields: usize,
    malformed_fields: usize,
}

#[derive(Serialize)]
#[serde(untagged)]
enum FieldOut<'a> {
    Spec(&'a FieldSpec),
    Malformed { malformed: &'a FieldError },
}

#[derive(Serialize)]
struct StatusDetail<'a> {
    name: &'a str,
    description: &'a str,
    fields: Vec<FieldOut<'a>>,
}

#[derive(Serialize)]
struct DecodeOut<'a> {
    status_type: &'a str,
    code: Code,
    #[serde(flatten)]
    decoded: &'a Decoded,
}

pub fn list_text(schema: &Schema) -> String {
    let width = schema.names().map(str::len).max().unwrap_or(0);

    let lines = schema.iter().map(|(name, definition)| {
        if definition.description().is_empty() {
            name.to_string()
        } else {
            format!("{:<width$}  {}", name, definition.description())
        }
    });

    join_lines(lines)
}

pub fn list_json(schema: &Schema) -> serde_json::Result<String> {
    let summaries: Vec<StatusSummary<'_>> = schema
        .iter()
        .map(|(name, definition)| StatusSummary {
            name,
            description: definition.description(),
            fields: definition.fields().len(),
            malformed_fields: definition.malformed_count(),
        })
        .collect();

    serde_json::to_string_pretty(&summaries)
}

pub fn show_text(name: &str, definition: &StatusDefinition) -> String {
    let mut lines = vec![name.to_string()];
    if !definition.description().is_empty() {
        lines.push(definition.description().to_string());
    }

    for (index, entry) in definition.fields().iter().enumerate() {
        let line = match entry {
            Ok(spec) => match spec {
                FieldSpec::Mask(mask) => format!("mask  bit {:<2}  {}", mask.bit, spec.name()),
                FieldSpec::Enum(field) => format!(
                    "enum  shift {} mask {:#x}  {} ({} known values)",
                    field.shift,
                    field.mask,
                    spec.name(),
                    field.values.len()
                ),
            },
            Err(error) => format!("malformed: {}", error),
        };
        lines.push(format!("  #{:<3} {}", index, line));
    }

    join_lines(lines)
}

pub fn show_json(name: &str, definition: &StatusDefinition) -> serde_json::Result<String> {
    let detail = StatusDetail {
        name,
        description: definition.description(),
        fields: definition
            .fields()
            .iter()
            .map(|entry| match entry {
                Ok(spec) => FieldOut::Spec(spec),
                Err(error) => FieldOut::Malformed { malformed: error },
            })
            .collect(),
    };

    serde_json::to_string_pretty(&detail)
}

/// Bulleted list of active flags, or [NO_ACTIVE_FLAGS].
pub fn decode_text(definition: &StatusDefinition, decoded: &Decoded) -> String {
    let mut lines = Vec::new();
    if !definition.description().is_empty() {
        lines.push(definition.description().to_string());
    }

    if decoded.flags.is_empty() {
        lines.push(NO_ACTIVE_FLAGS.to_string());
    } else {
        lines.extend(decoded.flags.iter().map(|flag| format!("- {}", flag)));
    }

    join_lines(lines)
}

pub fn decode_json(status_type: &str, code: Code, decoded: &Decoded) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DecodeOut {
        status_type,
        code,
        decoded,
    })
}

fn join_lines(lines: impl IntoIterator<Item = String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}
