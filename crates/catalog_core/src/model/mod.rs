//! Domain records managed by the catalog.
//!
//! # Responsibility
//! - Define the six concrete record shapes and their validation rules.
//! - Expose every record through the common [`entity::Entity`] contract.
//!
//! # Invariants
//! - Every record is identified by a string business key, never by a
//!   surrogate position or numeric id.

pub mod book;
pub mod contact;
pub mod entity;
pub mod movie;
pub mod plant;
pub mod product;
pub mod town;
