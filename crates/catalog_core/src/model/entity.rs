//! Entity contract shared by every managed record type.
//!
//! # Responsibility
//! - Describe how a record exposes its business key and named fields.
//! - Carry the fixed message texts callers and tests match on verbatim.
//!
//! # Invariants
//! - `key()` returns the same text as `field(KEY_FIELD)`.
//! - `FIELDS[0] == KEY_FIELD`.
//! - Field names are snake_case and stable; SQL columns reuse them.

use crate::policy::ManagerPolicy;
use crate::validate::FieldRule;

/// Borrowed view of one entity field, typed by storage kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Free text. `None` means the caller left the field unset.
    Text(Option<&'a str>),
    Integer(Option<i64>),
    Decimal(Option<f64>),
    Flag(bool),
}

impl<'a> FieldValue<'a> {
    /// Returns the text payload for text fields, `None` otherwise.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(value) => *value,
            _ => None,
        }
    }
}

/// Text field a manager may search by substring, with its miss message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchField {
    pub field: &'static str,
    /// Rendered verbatim when a search on this field matches nothing.
    pub miss_message: &'static str,
}

/// A record with a unique string business key and validated fields.
///
/// Implementors are plain data; all orchestration lives in
/// [`crate::service::EntityManager`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Singular noun used in not-found messages, e.g. `product`.
    const NOUN: &'static str;
    /// Field name of the business key.
    const KEY_FIELD: &'static str;
    /// Human label of the business key, e.g. `product code` or `ISBN`.
    const KEY_LABEL: &'static str;
    /// All field names, business key first.
    const FIELDS: &'static [&'static str];
    /// Sentence reported when validation fails on add.
    const INVALID_MESSAGE: &'static str;
    /// Sentence reported when validation fails on update.
    const INVALID_UPDATE_MESSAGE: &'static str = Self::INVALID_MESSAGE;
    /// Searchable text fields; the first one is the default.
    const SEARCH_FIELDS: &'static [SearchField];

    fn key(&self) -> &str;

    /// Looks up one field by name. Returns `None` for unknown names.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Validation rules evaluated in order; the first failure wins.
    fn rules() -> &'static [FieldRule];

    /// Policy a manager uses when the caller does not supply one.
    fn default_policy() -> ManagerPolicy {
        ManagerPolicy::default()
    }
}

pub(crate) fn text(value: &str) -> FieldValue<'_> {
    FieldValue::Text(Some(value))
}

pub(crate) fn optional_text(value: Option<&str>) -> FieldValue<'_> {
    FieldValue::Text(value)
}

pub(crate) fn integer(value: impl Into<i64>) -> FieldValue<'static> {
    FieldValue::Integer(Some(value.into()))
}

#[cfg(test)]
mod tests {
    use super::FieldValue;

    #[test]
    fn as_text_only_yields_text_payloads() {
        assert_eq!(FieldValue::Text(Some("abc")).as_text(), Some("abc"));
        assert_eq!(FieldValue::Text(None).as_text(), None);
        assert_eq!(FieldValue::Integer(Some(3)).as_text(), None);
        assert_eq!(FieldValue::Flag(true).as_text(), None);
    }
}
