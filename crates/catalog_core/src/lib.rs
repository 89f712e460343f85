//! Validated entity managers over pluggable keyed stores.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod policy;
pub mod repo;
pub mod service;
pub mod validate;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::Book;
pub use model::contact::Contact;
pub use model::entity::{Entity, FieldValue, SearchField};
pub use model::movie::Movie;
pub use model::plant::Plant;
pub use model::product::Product;
pub use model::town::Town;
pub use policy::{
    DuplicateKeyPolicy, EmptyListPolicy, ManagerPolicy, MissingDeletePolicy,
    MissingUpdatePolicy, PolicyError,
};
pub use repo::entity_repo::{EntityRepository, InsertOutcome, RepoError, RepoResult};
pub use repo::memory_repo::InMemoryRepository;
pub use repo::sqlite_repo::{SqlEntity, SqliteRepository};
pub use service::{
    BookManager, ContactManager, EntityManager, ErrorKind, ManagerError, ManagerResult,
    MovieManager, PlantManager, ProductManager, TownManager,
};
pub use validate::{FieldRule, Rule};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
