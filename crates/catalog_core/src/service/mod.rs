//! Entity managers.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls into the public
//!   CRUD and search contract.
//! - Own the error taxonomy and its literal sentences.

pub mod entity_manager;
pub mod messages;

use crate::model::book::Book;
use crate::model::contact::Contact;
use crate::model::movie::Movie;
use crate::model::plant::Plant;
use crate::model::product::Product;
use crate::model::town::Town;

pub use entity_manager::{EntityManager, ErrorKind, ManagerError, ManagerResult};

pub type BookManager<R> = EntityManager<Book, R>;
pub type ContactManager<R> = EntityManager<Contact, R>;
pub type MovieManager<R> = EntityManager<Movie, R>;
pub type PlantManager<R> = EntityManager<Plant, R>;
pub type ProductManager<R> = EntityManager<Product, R>;
pub type TownManager<R> = EntityManager<Town, R>;
