//! SQLite-backed entity repository.
//!
//! # Responsibility
//! - Map any `SqlEntity` onto its table using the entity's field names as
//!   column names.
//! - Keep SQL text inside the persistence boundary.
//!
//! # Invariants
//! - Only connections migrated to `latest_version()` are accepted.
//! - Insert-if-absent and remove-if-present are single statements.
//! - Read paths reject rows that fail validation instead of masking them.
//! - Column and table names come from compile-time constants; caller text
//!   is always bound as a parameter.

use crate::db::migrations::{current_user_version, latest_version};
use crate::model::entity::{Entity, FieldValue};
use crate::repo::entity_repo::{
    ensure_known_field, ensure_stored_valid, EntityRepository, InsertOutcome, RepoError,
    RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Params, Row};
use std::collections::HashSet;
use std::marker::PhantomData;

/// Entity with a table in the catalog schema.
pub trait SqlEntity: Entity {
    const TABLE: &'static str;

    /// Decodes one row selected with `Entity::FIELDS` as column list.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// Repository over one catalog table.
pub struct SqliteRepository<'conn, E: SqlEntity> {
    conn: &'conn Connection,
    _entity: PhantomData<fn() -> E>,
}

impl<'conn, E: SqlEntity> SqliteRepository<'conn, E> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not current.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not carry every field of `E`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready::<E>(conn)?;
        Ok(Self {
            conn,
            _entity: PhantomData,
        })
    }

    fn select_sql(&self) -> String {
        format!("SELECT {} FROM {}", E::FIELDS.join(", "), E::TABLE)
    }

    fn query_entities(&self, sql: &str, bind: impl Params) -> RepoResult<Vec<E>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut entities = Vec::new();

        while let Some(row) = rows.next()? {
            entities.push(decode_row::<E>(row)?);
        }

        Ok(entities)
    }
}

impl<E: SqlEntity> EntityRepository<E> for SqliteRepository<'_, E> {
    fn find_by_key(&self, key: &str) -> RepoResult<Option<E>> {
        let sql = format!("{} WHERE {} = ?1;", self.select_sql(), E::KEY_FIELD);
        Ok(self.query_entities(&sql, params![key])?.into_iter().next())
    }

    fn insert(&self, entity: &E) -> RepoResult<InsertOutcome> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({}) DO NOTHING;",
            E::TABLE,
            E::FIELDS.join(", "),
            placeholders(E::FIELDS.len()),
            E::KEY_FIELD
        );
        let changed = self
            .conn
            .execute(&sql, params_from_iter(field_values(entity)?))?;

        if changed == 0 {
            return Ok(InsertOutcome::KeyExists);
        }
        Ok(InsertOutcome::Inserted)
    }

    fn replace(&self, entity: &E) -> RepoResult<bool> {
        let assignments = non_key_columns::<E>()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>();
        if assignments.is_empty() {
            return Ok(self.find_by_key(entity.key())?.is_some());
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?1;",
            E::TABLE,
            assignments.join(", "),
            E::KEY_FIELD
        );
        let changed = self
            .conn
            .execute(&sql, params_from_iter(field_values(entity)?))?;
        Ok(changed > 0)
    }

    fn upsert(&self, entity: &E) -> RepoResult<()> {
        let assignments = non_key_columns::<E>()
            .map(|(_, column)| format!("{column} = excluded.{column}"))
            .collect::<Vec<_>>();
        let conflict_action = if assignments.is_empty() {
            "DO NOTHING".to_string()
        } else {
            format!("DO UPDATE SET {}", assignments.join(", "))
        };

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({}) {};",
            E::TABLE,
            E::FIELDS.join(", "),
            placeholders(E::FIELDS.len()),
            E::KEY_FIELD,
            conflict_action
        );
        self.conn
            .execute(&sql, params_from_iter(field_values(entity)?))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> RepoResult<bool> {
        let sql = format!("DELETE FROM {} WHERE {} = ?1;", E::TABLE, E::KEY_FIELD);
        let changed = self.conn.execute(&sql, params![key])?;
        Ok(changed > 0)
    }

    fn find_all(&self) -> RepoResult<Vec<E>> {
        let sql = format!("{} ORDER BY {} ASC;", self.select_sql(), E::KEY_FIELD);
        self.query_entities(&sql, [])
    }

    fn find_where(&self, predicate: &dyn Fn(&E) -> bool) -> RepoResult<Vec<E>> {
        let mut entities = self.find_all()?;
        entities.retain(|entity| predicate(entity));
        Ok(entities)
    }

    fn find_containing(&self, field: &str, fragment: &str) -> RepoResult<Vec<E>> {
        ensure_known_field::<E>(field)?;

        // instr() is case-sensitive, unlike LIKE.
        let sql = format!(
            "{} WHERE typeof({field}) = 'text' AND instr({field}, ?1) > 0 ORDER BY {} ASC;",
            self.select_sql(),
            E::KEY_FIELD
        );
        self.query_entities(&sql, params![fragment])
    }
}

/// Checks schema version, table and columns required by `E`.
pub fn ensure_connection_ready<E: SqlEntity>(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [E::TABLE],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(E::TABLE));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", E::TABLE))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<HashSet<_>, _>>()?;

    for &column in E::FIELDS {
        if !columns.contains(column) {
            return Err(RepoError::MissingRequiredColumn {
                table: E::TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn decode_row<E: SqlEntity>(row: &Row<'_>) -> RepoResult<E> {
    ensure_stored_valid(E::from_row(row)?, E::TABLE)
}

fn field_values<E: Entity>(entity: &E) -> RepoResult<Vec<Value>> {
    E::FIELDS
        .iter()
        .map(|name| {
            let value = entity.field(name).ok_or_else(|| RepoError::UnknownField {
                entity: E::NOUN,
                field: (*name).to_string(),
            })?;
            Ok(match value {
                FieldValue::Text(text) => {
                    text.map_or(Value::Null, |text| Value::Text(text.to_string()))
                }
                FieldValue::Integer(number) => number.map_or(Value::Null, Value::Integer),
                FieldValue::Decimal(number) => number.map_or(Value::Null, Value::Real),
                FieldValue::Flag(flag) => Value::Integer(i64::from(flag)),
            })
        })
        .collect()
}

/// `(position, column)` pairs for every field except the key at position 0.
fn non_key_columns<E: Entity>() -> impl Iterator<Item = (usize, &'static str)> {
    E::FIELDS
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, column)| *column != E::KEY_FIELD)
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ")
}
