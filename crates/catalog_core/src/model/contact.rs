//! Contact record keyed by ULID.

use crate::model::entity::{text, Entity, FieldValue, SearchField};
use crate::validate::FieldRule;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static CONTACT_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::required("contact_ulid"),
        FieldRule::pattern("contact_ulid", r"^[A-Z0-9]{10,}$"),
        FieldRule::required("first_name"),
        FieldRule::length("first_name", 2, 50),
        FieldRule::required("last_name"),
        FieldRule::length("last_name", 2, 50),
        FieldRule::required("address"),
        FieldRule::length("address", 5, 100),
        FieldRule::required("email"),
        FieldRule::pattern("email", r"^[^@\s]+@[^@\s]+\.[^@\s]+$"),
        FieldRule::required("gender"),
        FieldRule::max_length("gender", 20),
        FieldRule::required("phone"),
        FieldRule::pattern("phone", r"^\+?[0-9]{10,13}$"),
    ]
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// At least ten uppercase letters or digits.
    pub contact_ulid: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub gender: String,
    pub phone: String,
}

impl Contact {
    /// Generates a fresh key that satisfies the ULID rule.
    ///
    /// Uses the uppercase simple form of a v4 UUID (32 hex chars).
    pub fn generate_ulid() -> String {
        Uuid::new_v4().simple().to_string().to_ascii_uppercase()
    }
}

impl Entity for Contact {
    const NOUN: &'static str = "contact";
    const KEY_FIELD: &'static str = "contact_ulid";
    const KEY_LABEL: &'static str = "ULID";
    const FIELDS: &'static [&'static str] = &[
        "contact_ulid",
        "first_name",
        "last_name",
        "address",
        "email",
        "gender",
        "phone",
    ];
    const INVALID_MESSAGE: &'static str = "Invalid contact!";
    const SEARCH_FIELDS: &'static [SearchField] = &[
        SearchField {
            field: "first_name",
            miss_message: "No contact found with the given first name.",
        },
        SearchField {
            field: "last_name",
            miss_message: "No contact found with the given last name.",
        },
    ];

    fn key(&self) -> &str {
        &self.contact_ulid
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "contact_ulid" => text(&self.contact_ulid),
            "first_name" => text(&self.first_name),
            "last_name" => text(&self.last_name),
            "address" => text(&self.address),
            "email" => text(&self.email),
            "gender" => text(&self.gender),
            "phone" => text(&self.phone),
            _ => return None,
        };
        Some(value)
    }

    fn rules() -> &'static [FieldRule] {
        &CONTACT_RULES
    }
}
