//! Schema: every status definition, keyed by status-type name.

use std::collections::{BTreeMap, btree_map};

use serde_yaml::Value;

use crate::{
    errors::ConfigError,
    field::{FieldEntry, FieldSpec, scalar_text, value_kind},
};

/// The decoding rules for one status type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusDefinition {
    description: String,
    fields: Vec<FieldEntry>,
}

impl StatusDefinition {
    pub fn new(description: impl Into<String>, fields: Vec<FieldEntry>) -> Self {
        Self {
            description: description.into(),
            fields,
        }
    }

    /// Builds a definition from already classified fields.
    pub fn from_specs(
        description: impl Into<String>,
        fields: impl IntoIterator<Item = FieldSpec>,
    ) -> Self {
        Self::new(description, fields.into_iter().map(Ok).collect())
    }

    /// Free-text description; empty when the config has none.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Field entries in declaration order, malformed ones included.
    pub fn fields(&self) -> &[FieldEntry] {
        &self.fields
    }

    /// Number of entries that failed classification.
    pub fn malformed_count(&self) -> usize {
        self.fields.iter().filter(|entry| entry.is_err()).count()
    }

    fn parse(name: &str, raw: &Value) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidDefinition {
            name: name.to_string(),
            reason,
        };

        let map = match raw {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(map) => map,
            other => {
                return Err(invalid(format!(
                    "expected a mapping, found {}",
                    value_kind(other)
                )));
            }
        };

        let description = match map.get("description") {
            None | Some(Value::Null) => String::new(),
            Some(value) => scalar_text(value).ok_or_else(|| {
                invalid(format!(
                    "description must be a string, found {}",
                    value_kind(value)
                ))
            })?,
        };

        let fields = match map.get("fields") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(entries)) => entries.iter().map(FieldSpec::try_from).collect(),
            Some(other) => {
                return Err(invalid(format!(
                    "fields must be a sequence, found {}",
                    value_kind(other)
                )));
            }
        };

        Ok(Self {
            description,
            fields,
        })
    }
}

/// All status definitions. Built once with [Schema::parse] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    definitions: BTreeMap<String, StatusDefinition>,
}

impl Schema {
    /// Builds a schema from a deserialized config document.
    ///
    /// Fails only when the document as a whole is unusable. Malformed field
    /// entries are kept in their definitions and reported when decoding.
    pub fn parse(raw: &Value) -> Result<Self, ConfigError> {
        let map = match raw {
            Value::Null => return Err(ConfigError::Missing),
            Value::Mapping(map) => map,
            other => {
                return Err(ConfigError::NotAMapping {
                    found: value_kind(other),
                });
            }
        };

        if map.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut definitions = BTreeMap::new();

        for (key, value) in map {
            let name = scalar_text(key).ok_or(ConfigError::InvalidKey {
                found: value_kind(key),
            })?;

            let definition = StatusDefinition::parse(&name, value)?;

            for (index, entry) in definition.fields.iter().enumerate() {
                if let Err(error) = entry {
                    tracing::warn!(
                        status_type = %name,
                        index,
                        %error,
                        "malformed field in status definition"
                    );
                }
            }

            match definitions.entry(name) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(definition);
                }
                btree_map::Entry::Occupied(slot) => {
                    return Err(ConfigError::DuplicateStatusType {
                        name: slot.key().clone(),
                    });
                }
            }
        }

        tracing::debug!(count = definitions.len(), "parsed status definitions");

        Ok(Self { definitions })
    }

    /// Builds a schema from definitions assembled in code.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = (String, StatusDefinition)>,
    ) -> Self {
        Self {
            definitions: definitions.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StatusDefinition> {
        self.definitions.get(name)
    }

    /// Status-type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatusDefinition)> {
        self.definitions
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
