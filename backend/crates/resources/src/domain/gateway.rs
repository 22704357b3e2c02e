//! Data Access Gateway
//!
//! The single capability the CRUD component needs from the relational store:
//! run one parameterized statement and get back its rows and affected-row count.
//! Implementations live in the infrastructure layer.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;

/// A result row, column name to JSON value
pub type Row = Map<String, Value>;

/// Gateway result type alias
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A bind parameter.
///
/// Nulls carry their column type so the store can place them without casts.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(Option<i32>),
    Text(Option<String>),
    Date(Option<NaiveDate>),
}

impl SqlValue {
    /// JSON rendering of the value, as the store would return it in a row
    pub fn to_json(&self) -> Value {
        match self {
            SqlValue::Integer(Some(v)) => Value::from(*v),
            SqlValue::Text(Some(v)) => Value::String(v.clone()),
            SqlValue::Date(Some(v)) => Value::String(v.format("%Y-%m-%d").to_string()),
            SqlValue::Integer(None) | SqlValue::Text(None) | SqlValue::Date(None) => Value::Null,
        }
    }

    /// Column type name, as the store spells it
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Integer(_) => "integer",
            SqlValue::Text(_) => "text",
            SqlValue::Date(_) => "date",
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            SqlValue::Integer(v) => *v,
            _ => None,
        }
    }
}

/// Rows produced by a statement plus the number of rows it touched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutcome {
    pub rows: Vec<Row>,
    pub row_count: u64,
}

impl QueryOutcome {
    pub fn first_row(self) -> Option<Row> {
        self.rows.into_iter().next()
    }
}

/// Gateway failures. All of them are infrastructure errors to the caller.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection loss, constraint violation, malformed value
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A returned column has a type the gateway cannot render as JSON
    #[error("Unsupported type {type_name} for column {column}")]
    UnsupportedColumn { column: String, type_name: String },

    /// Statement not understood by the gateway
    #[error("Unknown statement: {0}")]
    UnknownStatement(String),

    /// Parameter list does not fit the statement
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Store is not reachable
    #[error("Store unavailable")]
    Unavailable,
}

/// Gateway trait
#[trait_variant::make(Gateway: Send)]
pub trait LocalGateway {
    /// Run one statement with positional parameters (`$1`, `$2`, ...)
    async fn query(&self, sql: &str, params: &[SqlValue]) -> GatewayResult<QueryOutcome>;
}
