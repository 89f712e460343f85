//! Repository contract the entity manager depends on.
//!
//! # Responsibility
//! - Define keyed storage operations independent of the backend.
//! - Report persistence failures as `RepoError`, distinct from absence.
//!
//! # Invariants
//! - `insert` is an atomic insert-if-absent on the business key.
//! - `delete` is an atomic remove-if-present on the business key.
//! - Absence is reported through return values (`Option`, `bool`,
//!   `InsertOutcome`), never through `RepoError`.

use crate::db::DbError;
use crate::model::entity::Entity;
use crate::validate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer error. Never used to signal a missing key.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Stored data cannot be decoded into a valid entity.
    InvalidData(String),
    /// A thread panicked while holding the named lock.
    Poisoned(&'static str),
    /// A field-based query named a field the entity does not declare.
    UnknownField { entity: &'static str, field: String },
    /// Connection has not been migrated to the schema this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Stable code for log lines. Never carries stored values.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "db_error",
            Self::InvalidData(_) => "invalid_data",
            Self::Poisoned(_) => "lock_poisoned",
            Self::UnknownField { .. } => "unknown_field",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_required_table",
            Self::MissingRequiredColumn { .. } => "missing_required_column",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Poisoned(what) => write!(f, "{what} lock poisoned"),
            Self::UnknownField { entity, field } => {
                write!(f, "unknown {entity} field `{field}`")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of an insert-if-absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The key was already stored; nothing was written.
    KeyExists,
}

/// Keyed storage for one entity type.
///
/// Each call must be atomic on its own. Callers make no assumption about
/// atomicity across calls. Read paths pass every stored entity through
/// [`ensure_stored_valid`], so an invalid record surfaces as `InvalidData`
/// on every backend.
pub trait EntityRepository<E: Entity> {
    fn find_by_key(&self, key: &str) -> RepoResult<Option<E>>;

    /// Stores `entity` only if its key is absent.
    fn insert(&self, entity: &E) -> RepoResult<InsertOutcome>;

    /// Overwrites the stored entity with the same key. Returns `false` when
    /// the key is absent, in which case nothing is written.
    fn replace(&self, entity: &E) -> RepoResult<bool>;

    /// Inserts or overwrites in one step.
    fn upsert(&self, entity: &E) -> RepoResult<()>;

    /// Removes the entity with `key`. Returns whether a record was removed.
    fn delete(&self, key: &str) -> RepoResult<bool>;

    fn find_all(&self) -> RepoResult<Vec<E>>;

    fn find_where(&self, predicate: &dyn Fn(&E) -> bool) -> RepoResult<Vec<E>>;

    /// Entities whose text `field` contains `fragment` (case-sensitive).
    fn find_containing(&self, field: &str, fragment: &str) -> RepoResult<Vec<E>> {
        ensure_known_field::<E>(field)?;
        self.find_where(&|entity: &E| {
            entity
                .field(field)
                .and_then(|value| value.as_text())
                .is_some_and(|text| text.contains(fragment))
        })
    }
}

impl<E: Entity, R: EntityRepository<E> + ?Sized> EntityRepository<E> for &R {
    fn find_by_key(&self, key: &str) -> RepoResult<Option<E>> {
        (**self).find_by_key(key)
    }

    fn insert(&self, entity: &E) -> RepoResult<InsertOutcome> {
        (**self).insert(entity)
    }

    fn replace(&self, entity: &E) -> RepoResult<bool> {
        (**self).replace(entity)
    }

    fn upsert(&self, entity: &E) -> RepoResult<()> {
        (**self).upsert(entity)
    }

    fn delete(&self, key: &str) -> RepoResult<bool> {
        (**self).delete(key)
    }

    fn find_all(&self) -> RepoResult<Vec<E>> {
        (**self).find_all()
    }

    fn find_where(&self, predicate: &dyn Fn(&E) -> bool) -> RepoResult<Vec<E>> {
        (**self).find_where(predicate)
    }

    fn find_containing(&self, field: &str, fragment: &str) -> RepoResult<Vec<E>> {
        (**self).find_containing(field, fragment)
    }
}

/// Returns `entity` if it still satisfies its rules, `InvalidData` if not.
///
/// The message names the entity type and backend only, never the key.
pub fn ensure_stored_valid<E: Entity>(entity: E, backend: &str) -> RepoResult<E> {
    if validate::check(&entity).is_err() {
        return Err(RepoError::InvalidData(format!(
            "stored {} in {backend} fails validation",
            E::NOUN
        )));
    }
    Ok(entity)
}

/// Fails with `UnknownField` unless `field` is declared by `E`.
pub fn ensure_known_field<E: Entity>(field: &str) -> RepoResult<()> {
    if E::FIELDS.contains(&field) {
        Ok(())
    } else {
        Err(RepoError::UnknownField {
            entity: E::NOUN,
            field: field.to_string(),
        })
    }
}
