//! Repository contract and storage backends.
//!
//! # Responsibility
//! - Define the keyed storage contract the manager depends on.
//! - Provide in-memory and SQLite implementations of it.
//!
//! # Invariants
//! - Repositories never validate on write; the manager gates mutations.
//! - Every backend re-validates on read and reports failures as
//!   `InvalidData`.
//! - Repository errors describe persistence failures only. A missing key
//!   is a normal return value.

pub mod entity_repo;
pub mod memory_repo;
mod sql_rows;
pub mod sqlite_repo;
