//! Town record keyed by name.
//!
//! Unlike the other records, town rules carry their own sentences, so a
//! failed check names the offending field.

use crate::model::entity::{text, Entity, FieldValue, SearchField};
use crate::policy::{DuplicateKeyPolicy, ManagerPolicy, MissingDeletePolicy};
use crate::validate::FieldRule;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const INVALID_NAME: &str = "Invalid town name.";
const INVALID_POPULATION: &str = "Population must be a positive number.";

static TOWN_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::required("name").with_message(INVALID_NAME),
        FieldRule::min_length("name", 3).with_message(INVALID_NAME),
        FieldRule::max_length("name", 30).with_message(INVALID_NAME),
        FieldRule::required("population").with_message(INVALID_POPULATION),
        FieldRule::range("population", 1.0, i64::MAX as f64).with_message(INVALID_POPULATION),
    ]
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Town {
    pub name: String,
    pub population: i64,
}

impl Town {
    pub fn new(name: impl Into<String>, population: i64) -> Self {
        Self {
            name: name.into(),
            population,
        }
    }
}

impl Entity for Town {
    const NOUN: &'static str = "town";
    const KEY_FIELD: &'static str = "name";
    const KEY_LABEL: &'static str = "name";
    const FIELDS: &'static [&'static str] = &["name", "population"];
    const INVALID_MESSAGE: &'static str = "Invalid town!";
    const SEARCH_FIELDS: &'static [SearchField] = &[SearchField {
        field: "name",
        miss_message: "No town found with the given name.",
    }];

    fn key(&self) -> &str {
        &self.name
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "name" => text(&self.name),
            "population" => FieldValue::Integer(Some(self.population)),
            _ => return None,
        };
        Some(value)
    }

    fn rules() -> &'static [FieldRule] {
        &TOWN_RULES
    }

    /// Re-adding a known town keeps the first record; deleting an unknown
    /// town is a no-op.
    fn default_policy() -> ManagerPolicy {
        ManagerPolicy {
            on_duplicate: DuplicateKeyPolicy::KeepExisting,
            on_missing_delete: MissingDeletePolicy::Ignore,
            ..ManagerPolicy::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Town;
    use crate::validate::{check, is_valid};

    #[test]
    fn decoded_json_is_validated_like_any_other_town() {
        let town: Town = serde_json::from_str(r#"{"name":"Ruse","population":0}"#).unwrap();
        assert_eq!(town, Town::new("Ruse", 0));
        assert_eq!(check(&town), Err("Population must be a positive number."));
    }

    #[test]
    fn name_longer_than_thirty_chars_reports_name_sentence() {
        assert_eq!(check(&Town::new("S".repeat(31), 10)), Err("Invalid town name."));
        assert!(is_valid(&Town::new("S".repeat(30), 10)));
    }

    #[test]
    fn sofia_is_valid() {
        assert!(is_valid(&Town::new("Sofia", 100_000)));
    }

    #[test]
    fn short_or_blank_name_reports_name_sentence() {
        for name in ["", "AB", "   "] {
            assert_eq!(
                check(&Town::new(name, 10_000)),
                Err("Invalid town name."),
                "name `{name}`"
            );
        }
    }

    #[test]
    fn non_positive_population_reports_population_sentence() {
        for population in [0, -1] {
            assert_eq!(
                check(&Town::new("Plovdiv", population)),
                Err("Population must be a positive number.")
            );
        }
    }
}
