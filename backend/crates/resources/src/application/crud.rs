//! CRUD Use Case
//!
//! Request → validate → query → decode. One statement per operation, no
//! state kept between calls.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::gateway::{Gateway, QueryOutcome, Row, SqlValue};
use crate::domain::resource::{Resource, Statements, parse_key};
use crate::error::{CrudError, CrudResult};

/// Operation name, carried into logs for store failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// CRUD Use Case
pub struct CrudUseCase<R, G>
where
    R: Resource,
    G: Gateway,
{
    gateway: Arc<G>,
    statements: Arc<Statements>,
    _resource: PhantomData<fn() -> R>,
}

impl<R, G> CrudUseCase<R, G>
where
    R: Resource,
    G: Gateway,
{
    pub fn new(gateway: Arc<G>, statements: Arc<Statements>) -> Self {
        Self {
            gateway,
            statements,
            _resource: PhantomData,
        }
    }

    /// All rows, ascending by key
    pub async fn list(&self) -> CrudResult<Vec<R::Record>> {
        let outcome = self
            .run(Operation::List, &self.statements.list, &[])
            .await?;

        outcome
            .rows
            .into_iter()
            .map(|row| decode::<R>(Operation::List, row))
            .collect()
    }

    pub async fn get(&self, raw_id: &str) -> CrudResult<R::Record> {
        let id = parse_key(raw_id).ok_or(CrudError::NotFound(R::NOT_FOUND))?;

        let row = self
            .run(Operation::Get, &self.statements.get, &[SqlValue::Integer(Some(id))])
            .await?
            .first_row()
            .ok_or(CrudError::NotFound(R::NOT_FOUND))?;

        decode::<R>(Operation::Get, row)
    }

    pub async fn create(&self, payload: R::Payload) -> CrudResult<R::Record> {
        R::validate(&payload)?;

        let values = R::into_values(payload);
        let row = self
            .run(Operation::Create, &self.statements.insert, &values)
            .await?
            .first_row()
            .ok_or(CrudError::MissingRow {
                operation: Operation::Create,
                resource: R::TABLE,
            })?;

        let key = row.get(R::KEY).cloned().unwrap_or_default();
        tracing::info!(resource = R::TABLE, key = %key, "Record created");

        decode::<R>(Operation::Create, row)
    }

    /// Full replace: absent optional fields are written as null
    pub async fn update(&self, raw_id: &str, payload: R::Payload) -> CrudResult<R::Record> {
        R::validate(&payload)?;
        let id = parse_key(raw_id).ok_or(CrudError::NotFound(R::NOT_FOUND))?;

        let mut values = R::into_values(payload);
        values.push(SqlValue::Integer(Some(id)));

        let outcome = self
            .run(Operation::Update, &self.statements.update, &values)
            .await?;

        if outcome.row_count == 0 {
            return Err(CrudError::NotFound(R::NOT_FOUND));
        }

        let row = outcome.first_row().ok_or(CrudError::MissingRow {
            operation: Operation::Update,
            resource: R::TABLE,
        })?;

        tracing::info!(resource = R::TABLE, key = id, "Record updated");

        decode::<R>(Operation::Update, row)
    }

    pub async fn delete(&self, raw_id: &str) -> CrudResult<()> {
        let id = parse_key(raw_id).ok_or(CrudError::NotFound(R::NOT_FOUND))?;

        let outcome = self
            .run(Operation::Delete, &self.statements.delete, &[SqlValue::Integer(Some(id))])
            .await?;

        if outcome.row_count == 0 {
            return Err(CrudError::NotFound(R::NOT_FOUND));
        }

        tracing::info!(resource = R::TABLE, key = id, "Record deleted");

        Ok(())
    }

    async fn run(
        &self,
        operation: Operation,
        sql: &str,
        params: &[SqlValue],
    ) -> CrudResult<QueryOutcome> {
        self.gateway
            .query(sql, params)
            .await
            .map_err(|source| CrudError::Gateway {
                operation,
                resource: R::TABLE,
                source,
            })
    }
}

fn decode<R: Resource>(operation: Operation, row: Row) -> CrudResult<R::Record> {
    serde_json::from_value(serde_json::Value::Object(row)).map_err(|source| CrudError::Decode {
        operation,
        resource: R::TABLE,
        source,
    })
}
