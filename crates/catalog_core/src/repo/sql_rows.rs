//! Row decoders binding each record type to its catalog table.

use crate::model::book::Book;
use crate::model::contact::Contact;
use crate::model::movie::Movie;
use crate::model::plant::Plant;
use crate::model::product::Product;
use crate::model::town::Town;
use crate::repo::entity_repo::{RepoError, RepoResult};
use crate::repo::sqlite_repo::SqlEntity;
use rusqlite::Row;

impl SqlEntity for Product {
    const TABLE: &'static str = "products";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            product_code: row.get("product_code")?,
            product_name: row.get("product_name")?,
            origin_country: row.get("origin_country")?,
            description: row.get("description")?,
            price: row.get("price")?,
            quantity: row.get("quantity")?,
        })
    }
}

impl SqlEntity for Book {
    const TABLE: &'static str = "books";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            isbn: row.get("isbn")?,
            title: row.get("title")?,
            author: row.get("author")?,
            year_published: row.get("year_published")?,
            genre: row.get("genre")?,
            pages: row.get("pages")?,
            price: row.get("price")?,
        })
    }
}

impl SqlEntity for Movie {
    const TABLE: &'static str = "movies";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            title: row.get("title")?,
            director: row.get("director")?,
            year_released: row.get("year_released")?,
            genre: row.get("genre")?,
            duration: row.get("duration")?,
            rating: row.get("rating")?,
        })
    }
}

impl SqlEntity for Plant {
    const TABLE: &'static str = "plants";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let is_edible = match row.get::<_, i64>("is_edible")? {
            0 => false,
            1 => true,
            other => {
                return Err(RepoError::InvalidData(format!(
                    "invalid is_edible value `{other}` in plants.is_edible"
                )));
            }
        };

        Ok(Self {
            catalog_number: row.get("catalog_number")?,
            name: row.get("name")?,
            plant_type: row.get("plant_type")?,
            food_type: row.get("food_type")?,
            quantity: row.get("quantity")?,
            is_edible,
        })
    }
}

impl SqlEntity for Contact {
    const TABLE: &'static str = "contacts";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            contact_ulid: row.get("contact_ulid")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            address: row.get("address")?,
            email: row.get("email")?,
            gender: row.get("gender")?,
            phone: row.get("phone")?,
        })
    }
}

impl SqlEntity for Town {
    const TABLE: &'static str = "towns";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            name: row.get("name")?,
            population: row.get("population")?,
        })
    }
}
