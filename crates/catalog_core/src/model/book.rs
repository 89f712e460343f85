//! Book record keyed by ISBN.

use crate::model::entity::{integer, text, Entity, FieldValue, SearchField};
use crate::validate::FieldRule;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static BOOK_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::required("isbn"),
        FieldRule::pattern("isbn", r"^\d{13}$"),
        FieldRule::required("title"),
        FieldRule::max_length("title", 255),
        FieldRule::required("author"),
        FieldRule::max_length("author", 100),
        FieldRule::required("year_published"),
        FieldRule::range("year_published", 1000.0, 2100.0),
        FieldRule::required("genre"),
        FieldRule::max_length("genre", 50),
        FieldRule::required("pages"),
        FieldRule::range("pages", 1.0, 5000.0),
        FieldRule::required("price"),
        FieldRule::range("price", 0.01, 1000.0),
    ]
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Thirteen digits, no separators.
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year_published: i32,
    pub genre: String,
    pub pages: i32,
    /// Unset prices are rejected by validation.
    pub price: Option<f64>,
}

impl Entity for Book {
    const NOUN: &'static str = "book";
    const KEY_FIELD: &'static str = "isbn";
    const KEY_LABEL: &'static str = "ISBN";
    const FIELDS: &'static [&'static str] = &[
        "isbn",
        "title",
        "author",
        "year_published",
        "genre",
        "pages",
        "price",
    ];
    const INVALID_MESSAGE: &'static str = "Book is invalid.";
    const SEARCH_FIELDS: &'static [SearchField] = &[SearchField {
        field: "title",
        miss_message: "No books found with the given title fragment.",
    }];

    fn key(&self) -> &str {
        &self.isbn
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "isbn" => text(&self.isbn),
            "title" => text(&self.title),
            "author" => text(&self.author),
            "year_published" => integer(self.year_published),
            "genre" => text(&self.genre),
            "pages" => integer(self.pages),
            "price" => FieldValue::Decimal(self.price),
            _ => return None,
        };
        Some(value)
    }

    fn rules() -> &'static [FieldRule] {
        &BOOK_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::Book;
    use crate::validate::{check, is_valid};

    fn sample() -> Book {
        Book {
            isbn: "1234567890123".to_string(),
            title: "Test Book".to_string(),
            author: "John Doe".to_string(),
            year_published: 2021,
            genre: "Fiction".to_string(),
            pages: 100,
            price: Some(19.99),
        }
    }

    #[test]
    fn sample_book_is_valid() {
        assert!(is_valid(&sample()));
    }

    #[test]
    fn oversized_title_is_rejected() {
        let book = Book {
            title: "B".repeat(500),
            ..sample()
        };
        assert_eq!(check(&book), Err("Book is invalid."));
    }

    #[test]
    fn missing_price_is_rejected() {
        let book = Book {
            price: None,
            ..sample()
        };
        assert!(!is_valid(&book));
    }

    #[test]
    fn empty_book_is_rejected() {
        assert!(!is_valid(&Book::default()));
    }
}
