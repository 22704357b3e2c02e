//! Generic Resource Definition
//!
//! A resource is a table exposed through the five CRUD operations. Everything
//! the CRUD component needs to know about it is captured by [`Resource`]:
//! table, key column, ordered writable fields and the required-field rule.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::gateway::SqlValue;
use crate::error::{CrudError, CrudResult};

/// A table exposed as an HTTP resource
pub trait Resource: Send + Sync + 'static {
    /// Row as returned to clients
    type Record: Serialize + DeserializeOwned + Send;
    /// Request body for create and update. The default payload binds a
    /// typed null for every field.
    type Payload: DeserializeOwned + Default + Send;

    /// URL segment, `/{PATH}` and `/{PATH}/{id}`
    const PATH: &'static str;
    const TABLE: &'static str;
    /// Store-generated integer primary key
    const KEY: &'static str;
    /// Writable columns, in bind order
    const FIELDS: &'static [&'static str];
    /// Field that must be present and non-empty on every write
    const REQUIRED: &'static str;
    /// Message for a missing row
    const NOT_FOUND: &'static str;

    /// Value of the required field, if present
    fn required_value(payload: &Self::Payload) -> Option<&str>;

    /// Bind values for [`Self::FIELDS`], same order and length.
    /// Absent optional fields become typed nulls.
    fn into_values(payload: Self::Payload) -> Vec<SqlValue>;

    /// Required-field rule: absent, null and `""` are rejected
    fn validate(payload: &Self::Payload) -> CrudResult<()> {
        match Self::required_value(payload) {
            Some(value) if !value.is_empty() => Ok(()),
            _ => Err(CrudError::MissingField(Self::REQUIRED)),
        }
    }
}

/// Statement identity, used to pick the SQL for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    List,
    Get,
    Insert,
    Update,
    Delete,
}

/// The five statements of a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    pub list: String,
    pub get: String,
    pub insert: String,
    pub update: String,
    pub delete: String,
}

impl Statements {
    pub fn new(table: &str, key: &str, fields: &[&str]) -> Self {
        let columns = fields.join(", ");
        let placeholders = (1..=fields.len())
            .map(|n| format!("${n}"))
            .collect::<Vec<_>>()
            .join(", ");
        let assignments = fields
            .iter()
            .enumerate()
            .map(|(i, field)| format!("{field} = ${}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let key_position = fields.len() + 1;

        Self {
            list: format!("SELECT * FROM {table} ORDER BY {key} ASC"),
            get: format!("SELECT * FROM {table} WHERE {key} = $1"),
            insert: format!(
                "INSERT INTO {table} ({columns}) VALUES ({placeholders}) RETURNING *"
            ),
            update: format!(
                "UPDATE {table} SET {assignments} WHERE {key} = ${key_position} RETURNING *"
            ),
            delete: format!("DELETE FROM {table} WHERE {key} = $1"),
        }
    }

    pub fn for_resource<R: Resource>() -> Self {
        Self::new(R::TABLE, R::KEY, R::FIELDS)
    }

    pub fn sql(&self, kind: StatementKind) -> &str {
        match kind {
            StatementKind::List => &self.list,
            StatementKind::Get => &self.get,
            StatementKind::Insert => &self.insert,
            StatementKind::Update => &self.update,
            StatementKind::Delete => &self.delete,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatementKind, &str)> {
        [
            StatementKind::List,
            StatementKind::Get,
            StatementKind::Insert,
            StatementKind::Update,
            StatementKind::Delete,
        ]
        .into_iter()
        .map(move |kind| (kind, self.sql(kind)))
    }
}

/// Path id as the integer key. `None` means no row can match.
pub fn parse_key(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}
