//! Field specifications: how one bit or bit group of a status code is rendered.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use crate::{Code, bits, errors::FieldError};

/// A field entry as stored in a [crate::schema::StatusDefinition]: either a
/// classified field or the reason it could not be classified.
pub type FieldEntry = Result<FieldSpec, FieldError>;

/// One rule of a status definition. Either a single-bit flag or a multi-bit enum.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename_all = "lowercase")
)]
pub enum FieldSpec {
    Mask(MaskField),
    Enum(EnumField),
}

/// A boolean flag at bit position `bit`. Rendered as `name` when set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MaskField {
    pub bit: u32,
    pub name: String,
}

/// A bit group extracted with `(code >> shift) & mask` and looked up in `values`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumField {
    pub shift: u32,
    pub mask: Code,
    pub name: String,
    /// Known codes; need not be exhaustive.
    pub values: BTreeMap<Code, String>,
}

impl FieldSpec {
    /// The field's label.
    pub fn name(&self) -> &str {
        match self {
            FieldSpec::Mask(mask) => &mask.name,
            FieldSpec::Enum(field) => &field.name,
        }
    }

    /// Renders this field against `code`. `None` means the field contributes
    /// nothing (an unset mask bit); enum fields always render.
    pub fn render(&self, code: Code) -> Option<String> {
        match self {
            FieldSpec::Mask(mask) => mask.render(code),
            FieldSpec::Enum(field) => Some(field.render(code)),
        }
    }
}

impl MaskField {
    pub fn new(bit: u32, name: impl Into<String>) -> Self {
        MaskField {
            bit,
            name: name.into(),
        }
    }

    pub fn render(&self, code: Code) -> Option<String> {
        bits::is_set(code, self.bit).then(|| self.name.clone())
    }
}

impl EnumField {
    pub fn new(
        shift: u32,
        mask: Code,
        name: impl Into<String>,
        values: impl IntoIterator<Item = (Code, String)>,
    ) -> Self {
        EnumField {
            shift,
            mask,
            name: name.into(),
            values: values.into_iter().collect(),
        }
    }

    /// The raw value of this field within `code`.
    pub fn extract(&self, code: Code) -> Code {
        bits::extract(code, self.shift, self.mask)
    }

    pub fn render(&self, code: Code) -> String {
        let value = self.extract(code);
        match self.values.get(&value) {
            Some(label) => format!("{}: {}", self.name, label),
            None => format!("{}: Unknown Value ({})", self.name, value),
        }
    }
}

impl From<MaskField> for FieldSpec {
    fn from(value: MaskField) -> Self {
        FieldSpec::Mask(value)
    }
}

impl From<EnumField> for FieldSpec {
    fn from(value: EnumField) -> Self {
        FieldSpec::Enum(value)
    }
}

/// Classifies a raw config entry by its `type` discriminant.
impl TryFrom<&Value> for FieldSpec {
    type Error = FieldError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let map = value.as_mapping().ok_or(FieldError::NotAMapping)?;

        let kind = match map.get("type") {
            None => return Err(FieldError::MissingKey { key: "type" }),
            Some(kind) => scalar_text(kind).ok_or_else(|| FieldError::InvalidValue {
                key: "type",
                reason: format!("expected a string, found {}", value_kind(kind)),
            })?,
        };

        match kind.as_str() {
            "mask" => Ok(FieldSpec::Mask(MaskField {
                bit: position(map, "bit")?,
                name: label(map, "name")?,
            })),
            "enum" => Ok(FieldSpec::Enum(EnumField {
                shift: position(map, "shift")?,
                mask: integer(map, "mask")?,
                name: label(map, "name")?,
                values: value_labels(map, "values")?,
            })),
            _ => Err(FieldError::UnknownType { kind }),
        }
    }
}

/// Short description of a YAML node's shape for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Text of a scalar node. Numbers and booleans render as written.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required<'a>(map: &'a Mapping, key: &'static str) -> Result<&'a Value, FieldError> {
    map.get(key).ok_or(FieldError::MissingKey { key })
}

fn integer(map: &Mapping, key: &'static str) -> Result<Code, FieldError> {
    let value = required(map, key)?;
    value.as_u64().ok_or_else(|| FieldError::InvalidValue {
        key,
        reason: match value {
            Value::Number(n) => format!("expected a non-negative integer, found {}", n),
            other => format!("expected a non-negative integer, found {}", value_kind(other)),
        },
    })
}

fn position(map: &Mapping, key: &'static str) -> Result<u32, FieldError> {
    let value = integer(map, key)?;
    if !bits::in_range(value) {
        return Err(FieldError::OutOfRange { key, value });
    }

    // in_range bounds the value to the code width
    Ok(value as u32)
}

fn label(map: &Mapping, key: &'static str) -> Result<String, FieldError> {
    let value = required(map, key)?;
    scalar_text(value).ok_or_else(|| FieldError::InvalidValue {
        key,
        reason: format!("expected a string, found {}", value_kind(value)),
    })
}

fn value_labels(map: &Mapping, key: &'static str) -> Result<BTreeMap<Code, String>, FieldError> {
    let value = required(map, key)?;
    let entries = value.as_mapping().ok_or_else(|| FieldError::InvalidValue {
        key,
        reason: format!("expected a mapping, found {}", value_kind(value)),
    })?;

    let mut labels = BTreeMap::new();
    for (code, text) in entries {
        let code = match code {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<Code>().ok(),
            _ => None,
        }
        .ok_or_else(|| FieldError::InvalidValue {
            key,
            reason: format!(
                "keys must be non-negative integers, found {}",
                scalar_text(code).unwrap_or_else(|| value_kind(code).to_string())
            ),
        })?;

        let text = scalar_text(text).ok_or_else(|| FieldError::InvalidValue {
            key,
            reason: format!("label for {} must be a string, found {}", code, value_kind(text)),
        })?;

        if labels.insert(code, text).is_some() {
            return Err(FieldError::InvalidValue {
                key,
                reason: format!("value code {} is defined more than once", code),
            });
        }
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_classify_mask() {
        let field = FieldSpec::try_from(&yaml("{type: mask, bit: 4, name: GPS}")).unwrap();
        assert_eq!(field, FieldSpec::Mask(MaskField::new(4, "GPS")));
    }

    #[test]
    fn test_classify_enum() {
        let field = FieldSpec::try_from(&yaml(
            "{type: enum, shift: 4, mask: 3, name: Mode, values: {0: Idle, 1: Active}}",
        ))
        .unwrap();

        assert_eq!(
            field,
            FieldSpec::Enum(EnumField::new(
                4,
                3,
                "Mode",
                [(0, "Idle".to_string()), (1, "Active".to_string())]
            ))
        );
    }

    #[test]
    fn test_classify_missing_type() {
        let err = FieldSpec::try_from(&yaml("{bit: 1, name: A}")).unwrap_err();
        assert_eq!(err, FieldError::MissingKey { key: "type" });
    }

    #[test]
    fn test_classify_unknown_type() {
        let err = FieldSpec::try_from(&yaml("{type: range, bit: 1, name: A}")).unwrap_err();
        assert_eq!(
            err,
            FieldError::UnknownType {
                kind: "range".to_string()
            }
        );
    }

    #[test]
    fn test_classify_mask_missing_bit() {
        let err = FieldSpec::try_from(&yaml("{type: mask, name: A}")).unwrap_err();
        assert_eq!(err, FieldError::MissingKey { key: "bit" });
        assert_eq!(err.to_string(), "missing key 'bit'");
    }

    #[test]
    fn test_classify_enum_reports_first_missing_key() {
        let err = FieldSpec::try_from(&yaml("{type: enum, shift: 0, name: Mode}")).unwrap_err();
        assert_eq!(err, FieldError::MissingKey { key: "mask" });

        let err = FieldSpec::try_from(&yaml("{type: enum, shift: 0, mask: 1, name: Mode}"))
            .unwrap_err();
        assert_eq!(err, FieldError::MissingKey { key: "values" });
    }

    #[test]
    fn test_classify_not_a_mapping() {
        let err = FieldSpec::try_from(&yaml("[mask, 1]")).unwrap_err();
        assert_eq!(err, FieldError::NotAMapping);
    }

    #[test]
    fn test_classify_negative_bit() {
        let err = FieldSpec::try_from(&yaml("{type: mask, bit: -1, name: A}")).unwrap_err();
        assert!(matches!(err, FieldError::InvalidValue { key: "bit", .. }));
    }

    #[test]
    fn test_classify_bit_out_of_range() {
        let err = FieldSpec::try_from(&yaml("{type: mask, bit: 64, name: A}")).unwrap_err();
        assert_eq!(err, FieldError::OutOfRange { key: "bit", value: 64 });
    }

    #[test]
    fn test_classify_shift_out_of_range() {
        let err = FieldSpec::try_from(&yaml(
            "{type: enum, shift: 70, mask: 1, name: Mode, values: {}}",
        ))
        .unwrap_err();
        assert_eq!(err, FieldError::OutOfRange { key: "shift", value: 70 });
    }

    #[test]
    fn test_classify_values_not_a_mapping() {
        let err = FieldSpec::try_from(&yaml(
            "{type: enum, shift: 0, mask: 1, name: Mode, values: [Idle, Active]}",
        ))
        .unwrap_err();
        assert!(matches!(err, FieldError::InvalidValue { key: "values", .. }));
    }

    #[test]
    fn test_classify_values_bad_key() {
        let err = FieldSpec::try_from(&yaml(
            "{type: enum, shift: 0, mask: 1, name: Mode, values: {idle: Idle}}",
        ))
        .unwrap_err();
        assert!(matches!(err, FieldError::InvalidValue { key: "values", .. }));
    }

    #[test]
    fn test_classify_values_duplicate_key() {
        let err = FieldSpec::try_from(&yaml(
            "{type: enum, shift: 0, mask: 1, name: Mode, values: {1: Idle, '1': Active}}",
        ))
        .unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidValue {
                key: "values",
                reason: "value code 1 is defined more than once".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_scalar_labels() {
        let field = FieldSpec::try_from(&yaml(
            "{type: enum, shift: 0, mask: 3, name: 42, values: {'1': 10, 2: true}}",
        ))
        .unwrap();

        let FieldSpec::Enum(field) = field else {
            panic!("expected enum field");
        };
        assert_eq!(field.name, "42");
        assert_eq!(field.values.get(&1).map(String::as_str), Some("10"));
        assert_eq!(field.values.get(&2).map(String::as_str), Some("true"));
    }

    #[test]
    fn test_render_mask() {
        let field = MaskField::new(0, "A");
        assert_eq!(field.render(1), Some("A".to_string()));
        assert_eq!(field.render(2), None);
    }

    #[test]
    fn test_render_enum() {
        let field = EnumField::new(
            4,
            3,
            "Mode",
            [(0, "Idle".to_string()), (1, "Active".to_string())],
        );
        assert_eq!(field.render(16), "Mode: Active");
        assert_eq!(field.render(0), "Mode: Idle");
        assert_eq!(field.render(48), "Mode: Unknown Value (3)");
    }
}
