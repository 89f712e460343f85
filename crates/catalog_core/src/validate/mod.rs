//! Data-driven field validation.
//!
//! # Responsibility
//! - Evaluate an entity against its ordered `(field, rule)` list.
//! - Report failure as one opaque sentence, never per-field diagnostics.
//!
//! # Invariants
//! - Validation is pure and deterministic.
//! - Only `Required` rejects absent values; other rules skip them.
//! - A rule applied to a value kind it does not understand fails, so a
//!   misconfigured rule can never silently pass.

use crate::model::entity::{Entity, FieldValue};
use regex::Regex;

/// One constraint on a single field value.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be present; text must contain a non-whitespace char.
    Required,
    /// Minimum character count.
    MinLength(usize),
    /// Maximum character count.
    MaxLength(usize),
    /// Inclusive character-count bounds.
    Length { min: usize, max: usize },
    /// Inclusive numeric bounds for integer and decimal fields.
    Range { min: f64, max: f64 },
    /// Text must match the expression.
    Pattern(Regex),
}

impl Rule {
    /// Returns whether `value` satisfies this rule.
    pub fn holds(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Rule::Required, FieldValue::Text(text)) => {
                text.is_some_and(|text| !text.trim().is_empty())
            }
            (Rule::Required, FieldValue::Integer(number)) => number.is_some(),
            (Rule::Required, FieldValue::Decimal(number)) => {
                number.is_some_and(|number| number.is_finite())
            }
            (Rule::Required, FieldValue::Flag(_)) => true,
            (
                _,
                FieldValue::Text(None) | FieldValue::Integer(None) | FieldValue::Decimal(None),
            ) => true,
            (Rule::MinLength(min), FieldValue::Text(Some(text))) => char_count(text) >= *min,
            (Rule::MaxLength(max), FieldValue::Text(Some(text))) => char_count(text) <= *max,
            (Rule::Length { min, max }, FieldValue::Text(Some(text))) => {
                let count = char_count(text);
                count >= *min && count <= *max
            }
            (Rule::Range { min, max }, FieldValue::Integer(Some(number))) => {
                let number = number as f64;
                number >= *min && number <= *max
            }
            (Rule::Range { min, max }, FieldValue::Decimal(Some(number))) => {
                number.is_finite() && number >= *min && number <= *max
            }
            (Rule::Pattern(pattern), FieldValue::Text(Some(text))) => pattern.is_match(text),
            _ => false,
        }
    }
}

/// A rule bound to a field name, with an optional message override.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
    /// Replaces the entity-level sentence when this rule fails.
    pub message: Option<&'static str>,
}

impl FieldRule {
    pub fn new(field: &'static str, rule: Rule) -> Self {
        Self {
            field,
            rule,
            message: None,
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, Rule::Required)
    }

    pub fn max_length(field: &'static str, max: usize) -> Self {
        Self::new(field, Rule::MaxLength(max))
    }

    pub fn min_length(field: &'static str, min: usize) -> Self {
        Self::new(field, Rule::MinLength(min))
    }

    pub fn length(field: &'static str, min: usize, max: usize) -> Self {
        Self::new(field, Rule::Length { min, max })
    }

    pub fn range(field: &'static str, min: f64, max: f64) -> Self {
        Self::new(field, Rule::Range { min, max })
    }

    /// Builds a pattern rule.
    ///
    /// Patterns are compile-time constants in model code, so an invalid
    /// expression is a programming error.
    pub fn pattern(field: &'static str, expression: &str) -> Self {
        let regex = Regex::new(expression).expect("valid field pattern");
        Self::new(field, Rule::Pattern(regex))
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Validates with the entity's add-path sentence.
pub fn check<E: Entity>(entity: &E) -> Result<(), &'static str> {
    check_with(entity, E::INVALID_MESSAGE)
}

/// Validates and reports `fallback` unless the failing rule overrides it.
///
/// A rule naming a field the entity does not expose counts as a failure.
pub fn check_with<E: Entity>(entity: &E, fallback: &'static str) -> Result<(), &'static str> {
    for field_rule in E::rules() {
        let holds = entity
            .field(field_rule.field)
            .is_some_and(|value| field_rule.rule.holds(value));
        if !holds {
            return Err(field_rule.message.unwrap_or(fallback));
        }
    }
    Ok(())
}

/// Pass/fail form of [`check`].
pub fn is_valid<E: Entity>(entity: &E) -> bool {
    check(entity).is_ok()
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}
