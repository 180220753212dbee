//! # Validation Engine
//!
//! Validation is declarative: a [`Schema`] maps each field name to an ordered list of
//! [`Rule`]s, and [`Schema::validate`] evaluates them against an immutable [`Draft`].
//! It is a pure function, independent of any UI state, so forms can call it on every
//! keystroke and tests can call it directly.
//!
//! ## Evaluation
//!
//! - Fields are independent; there is no cross-field validation.
//! - Within a field, the **first failing rule wins**.
//! - Every rule except [`Check::Required`] passes on an empty value, so a missing value
//!   is always reported as [`ValidationErrorKind::MissingField`] regardless of where the
//!   `required` rule sits in the list.
//!
//! ```rust,ignore
//! let schema = Schema::new()
//!     .field("email", [Rule::required("Email is required"), Rule::email("Email is not valid")])
//!     .field("password", [Rule::required("Password is required"), Rule::min_length(6, "Too short")]);
//!
//! let errors = schema.validate(&Draft::new().with("email", "not-an-email"));
//! assert_eq!(errors.get("email").unwrap().kind, ValidationErrorKind::InvalidFormat);
//! ```

use crate::field::{Draft, FieldValue};
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::fmt;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    MissingField,
    InvalidFormat,
    TooShort,
    MustBePositive,
    MustBeInteger,
    InvalidChoice,
}

/// The first failing rule of a field: its kind and the message to display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

/// The predicate half of a [`Rule`].
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Value must be present.
    Required,
    /// Value must be a syntactically valid email address.
    Email,
    /// Text must have at least this many characters.
    MinLength(usize),
    /// Value must parse as a finite number.
    Number,
    /// Numeric value must be strictly greater than zero.
    Positive,
    /// Numeric value must have no fractional part.
    Integer,
    /// Numeric value must not exceed this bound. Reported as an invalid format,
    /// since the value cannot be represented by the field's input type.
    Max(f64),
    /// Value must be one of a closed set of options (a select input).
    OneOf(&'static [&'static str]),
}

impl Check {
    fn kind(&self) -> ValidationErrorKind {
        match self {
            Check::Required => ValidationErrorKind::MissingField,
            Check::Email | Check::Number | Check::Max(_) => ValidationErrorKind::InvalidFormat,
            Check::MinLength(_) => ValidationErrorKind::TooShort,
            Check::Positive => ValidationErrorKind::MustBePositive,
            Check::Integer => ValidationErrorKind::MustBeInteger,
            Check::OneOf(_) => ValidationErrorKind::InvalidChoice,
        }
    }

    fn passes(&self, value: &FieldValue) -> bool {
        if value.is_empty() {
            return !matches!(self, Check::Required);
        }
        match self {
            Check::Required => true,
            Check::Email => EMAIL.is_match(value.as_text().trim()),
            Check::MinLength(min) => value.as_text().chars().count() >= *min,
            Check::Number => value.as_number().is_some(),
            // Unparseable values are left to `Check::Number`.
            Check::Positive => value.as_number().map_or(true, |n| n > 0.0),
            Check::Integer => value.as_number().map_or(true, |n| n.fract() == 0.0),
            Check::Max(max) => value.as_number().map_or(true, |n| n <= *max),
            Check::OneOf(options) => options.contains(&value.as_text().trim()),
        }
    }
}

/// A predicate plus the message shown when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub check: Check,
    pub message: Cow<'static, str>,
}

impl Rule {
    pub fn new(check: Check, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }

    pub fn required(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Check::Required, message)
    }

    pub fn email(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Check::Email, message)
    }

    pub fn min_length(min: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Check::MinLength(min), message)
    }

    pub fn number(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Check::Number, message)
    }

    pub fn positive(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Check::Positive, message)
    }

    pub fn integer(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Check::Integer, message)
    }

    pub fn max(max: f64, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Check::Max(max), message)
    }

    pub fn one_of(
        options: &'static [&'static str],
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(Check::OneOf(options), message)
    }

    fn evaluate(&self, value: &FieldValue) -> Option<FieldError> {
        if self.check.passes(value) {
            None
        } else {
            Some(FieldError {
                kind: self.check.kind(),
                message: self.message.to_string(),
            })
        }
    }
}

/// Ordered, named field declarations with their rules.
///
/// The schema also defines which fields a form has: a field declared with no rules is
/// optional but still part of the draft.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field and its rules, evaluated in the given order.
    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push((name, rules.into_iter().collect()));
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| *field == name)
    }

    /// Validates the whole draft. Fields absent from the draft are treated as empty.
    pub fn validate(&self, draft: &Draft) -> ValidationErrors {
        let empty = FieldValue::default();
        let errors = self
            .fields
            .iter()
            .filter_map(|(name, rules)| {
                let value = draft.get(name).unwrap_or(&empty);
                rules
                    .iter()
                    .find_map(|rule| rule.evaluate(value))
                    .map(|error| (*name, error))
            })
            .collect();
        ValidationErrors(errors)
    }
}

/// Field name to first-failing-rule mapping. Valid fields have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn kind(&self, field: &str) -> Option<ValidationErrorKind> {
        self.get(field).map(|e| e.kind)
    }

    pub fn insert(&mut self, field: &'static str, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.0.iter().map(|(name, error)| (*name, error))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_schema() -> Schema {
        Schema::new().field(
            "stock",
            [
                Rule::required("required"),
                Rule::number("number"),
                Rule::positive("positive"),
                Rule::integer("integer"),
            ],
        )
    }

    fn kind_for(schema: &Schema, name: &'static str, value: impl Into<FieldValue>) -> Option<ValidationErrorKind> {
        schema.validate(&Draft::new().with(name, value)).kind(name)
    }

    #[test]
    fn stock_accepts_positive_integers() {
        let schema = stock_schema();
        assert_eq!(kind_for(&schema, "stock", 5), None);
        assert_eq!(kind_for(&schema, "stock", "5"), None);
    }

    #[test]
    fn stock_rejects_zero_negative_and_fractions() {
        let schema = stock_schema();
        assert_eq!(kind_for(&schema, "stock", 0), Some(ValidationErrorKind::MustBePositive));
        assert_eq!(kind_for(&schema, "stock", -1), Some(ValidationErrorKind::MustBePositive));
        assert_eq!(kind_for(&schema, "stock", 2.5), Some(ValidationErrorKind::MustBeInteger));
        assert_eq!(kind_for(&schema, "stock", "abc"), Some(ValidationErrorKind::InvalidFormat));
    }

    #[test]
    fn first_failing_rule_wins() {
        // -1.5 is both negative and fractional; positivity is declared first.
        let schema = stock_schema();
        let errors = schema.validate(&Draft::new().with("stock", -1.5));
        assert_eq!(errors.get("stock").unwrap().message, "positive");
    }

    #[test]
    fn empty_values_report_missing_even_when_required_is_last() {
        let schema = Schema::new().field("email", [Rule::email("bad"), Rule::required("missing")]);
        let errors = schema.validate(&Draft::new());
        assert_eq!(errors.kind("email"), Some(ValidationErrorKind::MissingField));
        assert_eq!(errors.get("email").unwrap().message, "missing");
    }

    #[test]
    fn email_format() {
        let schema = Schema::new().field("email", [Rule::required("missing"), Rule::email("bad")]);
        assert_eq!(kind_for(&schema, "email", "a@b.com"), None);
        assert_eq!(kind_for(&schema, "email", "not-an-email"), Some(ValidationErrorKind::InvalidFormat));
        assert_eq!(kind_for(&schema, "email", "a@b"), Some(ValidationErrorKind::InvalidFormat));
    }

    #[test]
    fn password_length_boundary() {
        let schema = Schema::new().field("password", [Rule::required("missing"), Rule::min_length(6, "short")]);
        assert_eq!(kind_for(&schema, "password", "12345"), Some(ValidationErrorKind::TooShort));
        assert_eq!(kind_for(&schema, "password", "123456"), None);
    }

    #[test]
    fn closed_choices() {
        const OPTIONS: &[&str] = &["Farmacia", "Abarrote"];
        let schema = Schema::new().field("category", [Rule::required("missing"), Rule::one_of(OPTIONS, "pick one")]);
        assert_eq!(kind_for(&schema, "category", "Farmacia"), None);
        assert_eq!(kind_for(&schema, "category", "Ferreteria"), Some(ValidationErrorKind::InvalidChoice));
        assert_eq!(kind_for(&schema, "category", ""), Some(ValidationErrorKind::MissingField));
    }

    #[test]
    fn upper_bound_is_inclusive() {
        let schema = Schema::new().field("stock", [Rule::number("number"), Rule::max(10.0, "too large")]);
        assert_eq!(kind_for(&schema, "stock", 10), None);
        assert_eq!(kind_for(&schema, "stock", "10.5"), Some(ValidationErrorKind::InvalidFormat));
        assert_eq!(
            schema.validate(&Draft::new().with("stock", 11)).get("stock").unwrap().message,
            "too large"
        );
    }

    #[test]
    fn optional_fields_never_fail() {
        let schema = Schema::new().field("presentation", []);
        assert!(schema.validate(&Draft::new()).is_empty());
        assert!(schema.contains("presentation"));
    }

    #[test]
    fn fields_are_independent() {
        let schema = Schema::new()
            .field("name", [Rule::required("name")])
            .field("surname", [Rule::required("surname")]);
        let errors = schema.validate(&Draft::new().with("name", "Ana"));
        assert_eq!(errors.len(), 1);
        assert!(errors.get("name").is_none());
        assert!(errors.get("surname").is_some());
    }
}
