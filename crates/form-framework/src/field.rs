//! # Fields & Drafts
//!
//! A form is a fixed set of named [`FormField`]s. The values of all fields taken
//! together form a [`Draft`], the immutable snapshot that validation and submission
//! work on.

use std::collections::BTreeMap;
use std::fmt;

/// The current value of an input.
///
/// Text inputs and selects produce [`FieldValue::Text`]; number inputs may produce
/// either a [`FieldValue::Number`] or the raw text the user typed.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// `true` for an empty (or whitespace-only) text value. Numbers are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    /// Reads the value as a number, parsing text if needed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Number(_) => None,
            FieldValue::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Reads the value as text. Numbers are formatted without a trailing `.0`.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

/// One named input of a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormField {
    pub value: FieldValue,
    /// Set once the user has left the field (or tried to submit).
    pub touched: bool,
}

/// Immutable snapshot of every field value of a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    values: BTreeMap<&'static str, FieldValue>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy for tests and fixtures.
    pub fn with(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<FieldValue>) {
        self.values.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// The field as trimmed text; missing fields read as empty.
    pub fn text(&self, name: &str) -> String {
        self.get(name)
            .map(|v| v.as_text().trim().to_string())
            .unwrap_or_default()
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}

impl FromIterator<(&'static str, FieldValue)> for Draft {
    fn from_iter<I: IntoIterator<Item = (&'static str, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
