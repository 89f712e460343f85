//! Validated entity manager.
//!
//! # Responsibility
//! - Gate every mutation behind full validation.
//! - Translate repository outcomes into the manager error taxonomy with
//!   the exact sentences callers match on.
//!
//! # Invariants
//! - Blank keys fail before any repository access.
//! - Invalid entities fail before any repository access.
//! - Each operation is all-or-nothing; the store is untouched on failure.
//! - The manager holds no state besides its repository and policy.

use crate::model::entity::{Entity, SearchField};
use crate::policy::{
    DuplicateKeyPolicy, EmptyListPolicy, ManagerPolicy, MissingDeletePolicy, MissingUpdatePolicy,
};
use crate::repo::entity_repo::{EntityRepository, InsertOutcome, RepoError};
use crate::service::messages;
use crate::validate;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Coarse classification of a [`ManagerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Argument,
    Validation,
    NotFound,
    Duplicate,
    Persistence,
}

/// Failure of one manager operation.
///
/// `Display` renders the literal message, so `err.to_string()` is the
/// contract text.
#[derive(Debug)]
pub enum ManagerError {
    /// Structurally invalid input, e.g. a blank key.
    Argument(String),
    /// Entity failed its rule set.
    Validation(String),
    /// Lookup, listing or search matched nothing.
    NotFound(String),
    /// Add hit a stored key under `DuplicateKeyPolicy::Reject`.
    Duplicate(String),
    /// Backend failure, propagated unchanged.
    Repo(RepoError),
}

impl ManagerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Argument(_) => ErrorKind::Argument,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Duplicate(_) => ErrorKind::Duplicate,
            Self::Repo(_) => ErrorKind::Persistence,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Display for ManagerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Argument(message)
            | Self::Validation(message)
            | Self::NotFound(message)
            | Self::Duplicate(message) => f.write_str(message),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ManagerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ManagerError {
    fn from(value: RepoError) -> Self {
        error!(
            "event=repo_failure module=manager status=error error_code={}",
            value.code()
        );
        Self::Repo(value)
    }
}

/// CRUD and search facade over one entity type.
pub struct EntityManager<E: Entity, R: EntityRepository<E>> {
    repo: R,
    policy: ManagerPolicy,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, R: EntityRepository<E>> EntityManager<E, R> {
    /// Creates a manager with the entity's default policy.
    pub fn new(repo: R) -> Self {
        Self::with_policy(repo, E::default_policy())
    }

    pub fn with_policy(repo: R, policy: ManagerPolicy) -> Self {
        Self {
            repo,
            policy,
            _entity: PhantomData,
        }
    }

    pub fn policy(&self) -> ManagerPolicy {
        self.policy
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn into_repo(self) -> R {
        self.repo
    }

    /// Validates and stores a new entity.
    ///
    /// # Errors
    /// - `Validation` with the entity's add sentence.
    /// - `Duplicate` when the key exists and the policy rejects duplicates.
    pub fn add(&self, entity: &E) -> ManagerResult<()> {
        if let Err(message) = validate::check(entity) {
            return Err(self.validation_failed("entity_add", message));
        }

        match self.policy.on_duplicate {
            DuplicateKeyPolicy::Reject => {
                if self.repo.insert(entity)? == InsertOutcome::KeyExists {
                    warn!(
                        "event=entity_add module=manager status=error entity={} error_code=duplicate_key",
                        E::NOUN
                    );
                    return Err(ManagerError::Duplicate(messages::duplicate_key::<E>(
                        entity.key(),
                    )));
                }
            }
            DuplicateKeyPolicy::Overwrite => self.repo.upsert(entity)?,
            DuplicateKeyPolicy::KeepExisting => {
                if self.repo.insert(entity)? == InsertOutcome::KeyExists {
                    debug!(
                        "event=entity_add module=manager status=ok entity={} outcome=kept_existing",
                        E::NOUN
                    );
                    return Ok(());
                }
            }
        }

        info!("event=entity_add module=manager status=ok entity={}", E::NOUN);
        Ok(())
    }

    /// Removes the entity stored under `key`.
    ///
    /// # Errors
    /// - `Argument` for a blank key.
    /// - `NotFound` for an absent key under `MissingDeletePolicy::Reject`.
    pub fn delete(&self, key: &str) -> ManagerResult<()> {
        ensure_key::<E>(key)?;

        if self.repo.delete(key)? {
            info!("event=entity_delete module=manager status=ok entity={}", E::NOUN);
            return Ok(());
        }

        match self.policy.on_missing_delete {
            MissingDeletePolicy::Reject => {
                Err(ManagerError::NotFound(messages::not_found_by_key::<E>(key)))
            }
            MissingDeletePolicy::Ignore => {
                debug!(
                    "event=entity_delete module=manager status=ok entity={} outcome=absent",
                    E::NOUN
                );
                Ok(())
            }
        }
    }

    /// Re-validates and overwrites the entity stored under the same key.
    ///
    /// # Errors
    /// - `Validation` with the entity's update sentence.
    /// - `NotFound` for an absent key under `MissingUpdatePolicy::Reject`.
    pub fn update(&self, entity: &E) -> ManagerResult<()> {
        if let Err(message) = validate::check_with(entity, E::INVALID_UPDATE_MESSAGE) {
            return Err(self.validation_failed("entity_update", message));
        }

        match self.policy.on_missing_update {
            MissingUpdatePolicy::Reject => {
                if !self.repo.replace(entity)? {
                    return Err(ManagerError::NotFound(messages::not_found_by_key::<E>(
                        entity.key(),
                    )));
                }
            }
            MissingUpdatePolicy::Ignore => {
                self.repo.replace(entity)?;
            }
            MissingUpdatePolicy::Upsert => self.repo.upsert(entity)?,
        }

        info!("event=entity_update module=manager status=ok entity={}", E::NOUN);
        Ok(())
    }

    /// Returns the entity stored under `key`.
    pub fn get_specific(&self, key: &str) -> ManagerResult<E> {
        ensure_key::<E>(key)?;
        self.repo
            .find_by_key(key)?
            .ok_or_else(|| ManagerError::NotFound(messages::not_found_by_key::<E>(key)))
    }

    /// Returns every stored entity, ordered by the backend.
    pub fn get_all(&self) -> ManagerResult<Vec<E>> {
        let entities = self.repo.find_all()?;
        if entities.is_empty() && self.policy.on_empty_list == EmptyListPolicy::Strict {
            return Err(ManagerError::NotFound(messages::empty_store::<E>()));
        }

        debug!(
            "event=entity_list module=manager status=ok entity={} count={}",
            E::NOUN,
            entities.len()
        );
        Ok(entities)
    }

    /// Substring search on the entity's default search field.
    pub fn search(&self, fragment: &str) -> ManagerResult<Vec<E>> {
        match E::SEARCH_FIELDS.first() {
            Some(search_field) => self.search_in(search_field, fragment),
            None => Err(ManagerError::Argument(messages::unknown_search_field::<E>(
                E::KEY_FIELD,
            ))),
        }
    }

    /// Substring search on a declared search field.
    ///
    /// # Errors
    /// - `Argument` when `field` is not a declared search field of `E`.
    /// - `NotFound` with the field's miss sentence when nothing matches.
    pub fn search_by_field(&self, field: &str, fragment: &str) -> ManagerResult<Vec<E>> {
        let search_field = E::SEARCH_FIELDS
            .iter()
            .find(|candidate| candidate.field == field)
            .ok_or_else(|| ManagerError::Argument(messages::unknown_search_field::<E>(field)))?;
        self.search_in(search_field, fragment)
    }

    /// Entities matching `predicate`. An empty result is not an error.
    pub fn find_where(&self, predicate: impl Fn(&E) -> bool) -> ManagerResult<Vec<E>> {
        Ok(self.repo.find_where(&predicate)?)
    }

    fn search_in(&self, search_field: &SearchField, fragment: &str) -> ManagerResult<Vec<E>> {
        let matches = self.repo.find_containing(search_field.field, fragment)?;
        if matches.is_empty() {
            return Err(ManagerError::NotFound(search_field.miss_message.to_string()));
        }

        debug!(
            "event=entity_search module=manager status=ok entity={} field={} count={}",
            E::NOUN,
            search_field.field,
            matches.len()
        );
        Ok(matches)
    }

    fn validation_failed(&self, event: &str, message: &str) -> ManagerError {
        warn!(
            "event={event} module=manager status=error entity={} error_code=validation_failed",
            E::NOUN
        );
        ManagerError::Validation(message.to_string())
    }
}

fn ensure_key<E: Entity>(key: &str) -> ManagerResult<()> {
    if key.trim().is_empty() {
        return Err(ManagerError::Argument(messages::blank_key::<E>()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{EntityManager, ErrorKind, ManagerError};
    use crate::model::town::Town;
    use crate::policy::{ManagerPolicy, MissingUpdatePolicy};
    use crate::repo::entity_repo::{EntityRepository, InsertOutcome, RepoError, RepoResult};
    use crate::repo::memory_repo::InMemoryRepository;
    use std::cell::Cell;

    /// Counts calls and fails every one of them.
    #[derive(Default)]
    struct BrokenRepository {
        calls: Cell<usize>,
    }

    impl BrokenRepository {
        fn fail<T>(&self) -> RepoResult<T> {
            self.calls.set(self.calls.get() + 1);
            Err(RepoError::InvalidData("disk on fire".to_string()))
        }
    }

    impl EntityRepository<Town> for BrokenRepository {
        fn find_by_key(&self, _key: &str) -> RepoResult<Option<Town>> {
            self.fail()
        }
        fn insert(&self, _entity: &Town) -> RepoResult<InsertOutcome> {
            self.fail()
        }
        fn replace(&self, _entity: &Town) -> RepoResult<bool> {
            self.fail()
        }
        fn upsert(&self, _entity: &Town) -> RepoResult<()> {
            self.fail()
        }
        fn delete(&self, _key: &str) -> RepoResult<bool> {
            self.fail()
        }
        fn find_all(&self) -> RepoResult<Vec<Town>> {
            self.fail()
        }
        fn find_where(&self, _predicate: &dyn Fn(&Town) -> bool) -> RepoResult<Vec<Town>> {
            self.fail()
        }
    }

    #[test]
    fn persistence_failure_is_not_reported_as_not_found() {
        let manager = EntityManager::<Town, _>::new(BrokenRepository::default());
        let err = manager.get_specific("Sofia").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert!(matches!(err, ManagerError::Repo(RepoError::InvalidData(_))));
    }

    #[test]
    fn argument_and_validation_failures_skip_the_repository() {
        let manager = EntityManager::<Town, _>::new(BrokenRepository::default());

        assert_eq!(manager.delete("  ").unwrap_err().kind(), ErrorKind::Argument);
        assert_eq!(
            manager.get_specific("").unwrap_err().kind(),
            ErrorKind::Argument
        );
        assert_eq!(
            manager.add(&Town::new("AB", 10)).unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            manager.update(&Town::new("Sofia", 0)).unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(manager.repo().calls.get(), 0);
    }

    #[test]
    fn upsert_policy_inserts_on_missing_update() {
        let policy = ManagerPolicy {
            on_missing_update: MissingUpdatePolicy::Upsert,
            ..ManagerPolicy::default()
        };
        let manager = EntityManager::with_policy(InMemoryRepository::<Town>::new(), policy);
        manager.update(&Town::new("Varna", 330_000)).unwrap();
        assert_eq!(manager.get_specific("Varna").unwrap().population, 330_000);
    }

    #[test]
    fn ignore_policy_leaves_store_empty_on_missing_update() {
        let policy = ManagerPolicy {
            on_missing_update: MissingUpdatePolicy::Ignore,
            ..ManagerPolicy::default()
        };
        let manager = EntityManager::with_policy(InMemoryRepository::<Town>::new(), policy);
        manager.update(&Town::new("Varna", 330_000)).unwrap();
        assert!(manager.repo().is_empty().unwrap());
    }

    #[test]
    fn error_display_is_the_literal_message() {
        let err = ManagerError::NotFound("No town found.".to_string());
        assert_eq!(err.to_string(), "No town found.");
        assert_eq!(err.message(), "No town found.");
    }
}
