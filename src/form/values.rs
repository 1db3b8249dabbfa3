//! Field values and validation results

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::schema::FormSchema;

/// Current text of every field in the active schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues(HashMap<&'static str, String>);

impl FormValues {
    /// One empty entry per schema field
    pub fn for_schema(schema: &FormSchema) -> Self {
        Self(schema.names().map(|name| (name, String::new())).collect())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value of `name`, empty when the field is absent
    pub fn text(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Overwrite an existing entry; returns `false` for unknown names
    pub(crate) fn set(&mut self, name: &str, value: String) -> bool {
        match self.0.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-field error messages from one validation pass; absent means valid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult(BTreeMap<&'static str, &'static str>);

impl ValidationResult {
    /// Run every field's validators against `values`
    pub fn of(schema: &FormSchema, values: &FormValues) -> Self {
        schema
            .fields()
            .iter()
            .filter_map(|field| {
                field
                    .validate(values.text(field.name))
                    .map(|message| (field.name, message))
            })
            .collect()
    }

    /// `true` when no field carries an error
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn error(&self, name: &str) -> Option<&'static str> {
        self.0.get(name).copied()
    }

    pub fn errors(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(name, message)| (*name, *message))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of this result with `name` set to `message` (or cleared)
    pub(crate) fn with_field(&self, name: &'static str, message: Option<&'static str>) -> Self {
        let mut errors = self.0.clone();
        match message {
            Some(message) => errors.insert(name, message),
            None => errors.remove(name),
        };
        Self(errors)
    }
}

impl FromIterator<(&'static str, &'static str)> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = (&'static str, &'static str)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
