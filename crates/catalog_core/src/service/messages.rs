//! Literal failure sentences returned to callers.
//!
//! Callers assert these texts verbatim, so wording changes are breaking.

use crate::model::entity::Entity;

/// `No <noun> found with <key label>: <key>`
pub fn not_found_by_key<E: Entity>(key: &str) -> String {
    format!("No {} found with {}: {key}", E::NOUN, E::KEY_LABEL)
}

/// `No <noun> found.`
pub fn empty_store<E: Entity>() -> String {
    format!("No {} found.", E::NOUN)
}

/// `<Key label> cannot be empty.`
pub fn blank_key<E: Entity>() -> String {
    format!("{} cannot be empty.", capitalize(E::KEY_LABEL))
}

/// `<Noun> with <key label> <key> already exists.`
pub fn duplicate_key<E: Entity>(key: &str) -> String {
    format!(
        "{} with {} {key} already exists.",
        capitalize(E::NOUN),
        E::KEY_LABEL
    )
}

pub fn unknown_search_field<E: Entity>(field: &str) -> String {
    format!("Cannot search {} by {field}.", E::NOUN)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{blank_key, capitalize, duplicate_key, empty_store, not_found_by_key};
    use crate::model::book::Book;
    use crate::model::contact::Contact;
    use crate::model::plant::Plant;
    use crate::model::product::Product;

    #[test]
    fn capitalize_touches_only_first_char() {
        assert_eq!(capitalize("catalog number"), "Catalog number");
        assert_eq!(capitalize("ISBN"), "ISBN");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn key_messages_follow_entity_labels() {
        assert_eq!(
            not_found_by_key::<Product>("AB12C"),
            "No product found with product code: AB12C"
        );
        assert_eq!(
            not_found_by_key::<Contact>("123"),
            "No contact found with ULID: 123"
        );
        assert_eq!(blank_key::<Plant>(), "Catalog number cannot be empty.");
        assert_eq!(blank_key::<Book>(), "ISBN cannot be empty.");
        assert_eq!(empty_store::<Plant>(), "No plant found.");
        assert_eq!(
            duplicate_key::<Book>("1234567890123"),
            "Book with ISBN 1234567890123 already exists."
        );
    }
}
