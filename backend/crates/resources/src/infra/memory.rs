//! In-Memory Gateway
//!
//! Stand-in for the relational store. Understands exactly the statements
//! produced by [`Statements`] for the tables it was built with, assigns keys
//! the way a serial column does (never reused), and can be taken offline to
//! simulate connection loss.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::entities::{CustomerResource, ItemResource};
use crate::domain::gateway::{Gateway, GatewayError, GatewayResult, QueryOutcome, Row, SqlValue};
use crate::domain::resource::{Resource, StatementKind, Statements};

/// One table held in memory
#[derive(Debug, Clone)]
pub struct MemoryTable {
    name: &'static str,
    key: &'static str,
    fields: &'static [&'static str],
    /// Typed nulls, one per field, giving each column its type
    columns: Vec<SqlValue>,
    statements: Statements,
    rows: BTreeMap<i32, Row>,
    next_key: i32,
}

impl MemoryTable {
    pub fn of<R: Resource>() -> Self {
        Self {
            name: R::TABLE,
            key: R::KEY,
            fields: R::FIELDS,
            columns: R::into_values(R::Payload::default()),
            statements: Statements::for_resource::<R>(),
            rows: BTreeMap::new(),
            next_key: 1,
        }
    }

    fn execute(&mut self, kind: StatementKind, params: &[SqlValue]) -> GatewayResult<QueryOutcome> {
        match kind {
            StatementKind::List => {
                let rows: Vec<Row> = self.rows.values().cloned().collect();
                Ok(QueryOutcome {
                    row_count: rows.len() as u64,
                    rows,
                })
            }
            StatementKind::Get => {
                self.expect_params(params, 1)?;
                let key = key_param(params, 0)?;
                Ok(self.rows.get(&key).cloned().map(single).unwrap_or_default())
            }
            StatementKind::Insert => {
                self.expect_params(params, self.fields.len())?;
                self.expect_column_types(params)?;
                let key = self.next_key;
                self.next_key += 1;

                let mut row = Row::new();
                row.insert(self.key.to_owned(), Value::from(key));
                for (field, value) in self.fields.iter().zip(params) {
                    row.insert((*field).to_owned(), value.to_json());
                }
                self.rows.insert(key, row.clone());

                Ok(single(row))
            }
            StatementKind::Update => {
                self.expect_params(params, self.fields.len() + 1)?;
                self.expect_column_types(params)?;
                let key = key_param(params, self.fields.len())?;

                match self.rows.get_mut(&key) {
                    Some(row) => {
                        for (field, value) in self.fields.iter().zip(params) {
                            row.insert((*field).to_owned(), value.to_json());
                        }
                        Ok(single(row.clone()))
                    }
                    None => Ok(QueryOutcome::default()),
                }
            }
            StatementKind::Delete => {
                self.expect_params(params, 1)?;
                let key = key_param(params, 0)?;
                let removed = self.rows.remove(&key).is_some();
                Ok(QueryOutcome {
                    rows: Vec::new(),
                    row_count: u64::from(removed),
                })
            }
        }
    }

    fn expect_params(&self, params: &[SqlValue], expected: usize) -> GatewayResult<()> {
        if params.len() == expected {
            Ok(())
        } else {
            Err(GatewayError::InvalidParameters(format!(
                "{} expects {} parameters, got {}",
                self.name,
                expected,
                params.len()
            )))
        }
    }

    fn expect_column_types(&self, params: &[SqlValue]) -> GatewayResult<()> {
        let mismatch = self
            .fields
            .iter()
            .zip(&self.columns)
            .zip(params)
            .find(|((_, column), value)| column.type_name() != value.type_name());

        match mismatch {
            Some(((field, column), value)) => Err(GatewayError::InvalidParameters(format!(
                "column {field} of {} is of type {} but expression is of type {}",
                self.name,
                column.type_name(),
                value.type_name()
            ))),
            None => Ok(()),
        }
    }
}

fn single(row: Row) -> QueryOutcome {
    QueryOutcome {
        rows: vec![row],
        row_count: 1,
    }
}

fn key_param(params: &[SqlValue], index: usize) -> GatewayResult<i32> {
    params
        .get(index)
        .and_then(SqlValue::as_integer)
        .ok_or_else(|| GatewayError::InvalidParameters(format!("${} must be an integer key", index + 1)))
}

/// In-memory gateway, cheap to clone; clones share the same tables
#[derive(Clone)]
pub struct MemoryGateway {
    statements: Arc<HashMap<String, (usize, StatementKind)>>,
    tables: Arc<Mutex<Vec<MemoryTable>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryGateway {
    pub fn new(tables: impl IntoIterator<Item = MemoryTable>) -> Self {
        let tables: Vec<MemoryTable> = tables.into_iter().collect();

        let mut statements = HashMap::new();
        for (index, table) in tables.iter().enumerate() {
            for (kind, sql) in table.statements.iter() {
                statements.insert(sql.to_owned(), (index, kind));
            }
        }

        Self {
            statements: Arc::new(statements),
            tables: Arc::new(Mutex::new(tables)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Simulate losing (or regaining) the store
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of rows currently held for `table`
    pub async fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .await
            .iter()
            .find(|t| t.name == table)
            .map_or(0, |t| t.rows.len())
    }
}

impl Default for MemoryGateway {
    /// Tables for every resource the API serves
    fn default() -> Self {
        Self::new([
            MemoryTable::of::<ItemResource>(),
            MemoryTable::of::<CustomerResource>(),
        ])
    }
}

impl Gateway for MemoryGateway {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> GatewayResult<QueryOutcome> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable);
        }

        let (index, kind) = *self
            .statements
            .get(sql)
            .ok_or_else(|| GatewayError::UnknownStatement(sql.to_owned()))?;

        let mut tables = self.tables.lock().await;
        let table = tables
            .get_mut(index)
            .ok_or_else(|| GatewayError::UnknownStatement(sql.to_owned()))?;

        table.execute(kind, params)
    }
}
