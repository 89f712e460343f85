//! Plant record keyed by catalog number.

use crate::model::entity::{integer, text, Entity, FieldValue, SearchField};
use crate::validate::FieldRule;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static PLANT_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::required("catalog_number"),
        FieldRule::pattern("catalog_number", r"^[A-Z0-9]{12}$"),
        FieldRule::required("name"),
        FieldRule::length("name", 2, 50),
        FieldRule::required("plant_type"),
        FieldRule::max_length("plant_type", 50),
        FieldRule::required("food_type"),
        FieldRule::max_length("food_type", 50),
        FieldRule::required("quantity"),
        FieldRule::range("quantity", 0.0, 100_000.0),
    ]
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    /// Twelve uppercase letters or digits, e.g. `123IOP789UYT`.
    pub catalog_number: String,
    pub name: String,
    pub plant_type: String,
    pub food_type: String,
    pub quantity: i32,
    pub is_edible: bool,
}

impl Entity for Plant {
    const NOUN: &'static str = "plant";
    const KEY_FIELD: &'static str = "catalog_number";
    const KEY_LABEL: &'static str = "catalog number";
    const FIELDS: &'static [&'static str] = &[
        "catalog_number",
        "name",
        "plant_type",
        "food_type",
        "quantity",
        "is_edible",
    ];
    const INVALID_MESSAGE: &'static str = "Invalid plant!";
    const SEARCH_FIELDS: &'static [SearchField] = &[SearchField {
        field: "food_type",
        miss_message: "No plant found with the given food type.",
    }];

    fn key(&self) -> &str {
        &self.catalog_number
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "catalog_number" => text(&self.catalog_number),
            "name" => text(&self.name),
            "plant_type" => text(&self.plant_type),
            "food_type" => text(&self.food_type),
            "quantity" => integer(self.quantity),
            "is_edible" => FieldValue::Flag(self.is_edible),
            _ => return None,
        };
        Some(value)
    }

    fn rules() -> &'static [FieldRule] {
        &PLANT_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::Plant;
    use crate::validate::{check, is_valid};

    fn rose() -> Plant {
        Plant {
            catalog_number: "123IOP789UYT".to_string(),
            name: "Rose".to_string(),
            plant_type: "Flower".to_string(),
            food_type: "Water".to_string(),
            quantity: 20,
            is_edible: false,
        }
    }

    #[test]
    fn rose_is_valid() {
        assert!(is_valid(&rose()));
    }

    #[test]
    fn missing_catalog_number_is_rejected() {
        let plant = Plant {
            catalog_number: String::new(),
            ..rose()
        };
        assert_eq!(check(&plant), Err("Invalid plant!"));
    }

    #[test]
    fn missing_name_is_rejected() {
        let plant = Plant {
            name: String::new(),
            ..rose()
        };
        assert!(!is_valid(&plant));
    }
}
