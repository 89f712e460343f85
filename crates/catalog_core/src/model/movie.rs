//! Movie record keyed by title.

use crate::model::entity::{integer, text, Entity, FieldValue, SearchField};
use crate::validate::FieldRule;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static MOVIE_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::required("title"),
        FieldRule::max_length("title", 255),
        FieldRule::required("director"),
        FieldRule::max_length("director", 100),
        FieldRule::required("year_released"),
        FieldRule::range("year_released", 1900.0, 2100.0),
        FieldRule::required("genre"),
        FieldRule::max_length("genre", 50),
        FieldRule::required("duration"),
        FieldRule::range("duration", 1.0, 500.0),
        FieldRule::required("rating"),
        FieldRule::range("rating", 0.0, 10.0),
    ]
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub director: String,
    pub year_released: i32,
    pub genre: String,
    /// Minutes.
    pub duration: i32,
    pub rating: f64,
}

impl Entity for Movie {
    const NOUN: &'static str = "movie";
    const KEY_FIELD: &'static str = "title";
    const KEY_LABEL: &'static str = "title";
    const FIELDS: &'static [&'static str] = &[
        "title",
        "director",
        "year_released",
        "genre",
        "duration",
        "rating",
    ];
    const INVALID_MESSAGE: &'static str = "Movie is not valid.";
    const SEARCH_FIELDS: &'static [SearchField] = &[SearchField {
        field: "title",
        miss_message: "No movies found.",
    }];

    fn key(&self) -> &str {
        &self.title
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name {
            "title" => text(&self.title),
            "director" => text(&self.director),
            "year_released" => integer(self.year_released),
            "genre" => text(&self.genre),
            "duration" => integer(self.duration),
            "rating" => FieldValue::Decimal(Some(self.rating)),
            _ => return None,
        };
        Some(value)
    }

    fn rules() -> &'static [FieldRule] {
        &MOVIE_RULES
    }
}
