//! Product record keyed by product code.

use crate::model::entity::{integer, optional_text, text, Entity, FieldValue, SearchField};
use crate::validate::FieldRule;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static PRODUCT_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::required("product_code"),
        FieldRule::length("product_code", 5, 20),
        FieldRule::pattern("product_code", r"^[A-Z0-9]+$"),
        FieldRule::required("product_name"),
        FieldRule::length("product_name", 2, 100),
        FieldRule::required("origin_country"),
        FieldRule::length("origin_country", 2, 50),
        FieldRule::max_length("description", 250),
        FieldRule::required("price"),
        FieldRule::range("price", 0.01, 10_000.0),
        FieldRule::required("quantity"),
        FieldRule::range("quantity", 0.0, 100_000.0),
    ]
});

/// Stock item sold by code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Uppercase alphanumeric business key, e.g. `AB12C`.
    pub product_code: String,
    pub product_name: String,
    pub origin_country: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
}

impl Entity for Product {
    const NOUN: &'static str = "product";
    const KEY_FIELD: &'static str = "product_code";
    const KEY_LABEL: &'static str = "product code";
    const FIELDS: &'static [&'static str] = &[
        "product_code",
        "product_name",
        "origin_country",
        "description",
        "price",
        "quantity",
    ];
    const INVALID_MESSAGE: &'static str = "Invalid product!";
    // Misspelling is asserted verbatim by existing consumers.
    const INVALID_UPDATE_MESSAGE: &'static str = "Invalid prduct!";
    const SEARCH_FIELDS: &'static [SearchField] = &[SearchField {
        field: "origin_country",
        miss_message: "No product found with the given first name.",
    }];

    fn key(&self) -> &str {
        &self.product_code
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "product_code" => text(&self.product_code),
            "product_name" => text(&self.product_name),
            "origin_country" => text(&self.origin_country),
            "description" => optional_text(self.description.as_deref()),
            "price" => FieldValue::Decimal(Some(self.price)),
            "quantity" => integer(self.quantity),
            _ => return None,
        };
        Some(value)
    }

    fn rules() -> &'static [FieldRule] {
        &PRODUCT_RULES
    }
}
