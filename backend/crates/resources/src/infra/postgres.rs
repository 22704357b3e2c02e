//! PostgreSQL Gateway Implementation

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row as _, TypeInfo, ValueRef};

use crate::domain::gateway::{Gateway, GatewayError, GatewayResult, QueryOutcome, Row, SqlValue};

/// PostgreSQL-backed gateway
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Gateway for PgGateway {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> GatewayResult<QueryOutcome> {
        let query = params
            .iter()
            .fold(sqlx::query::<Postgres>(sql), |query, value| {
                bind_value(query, value)
            });

        if returns_rows(sql) {
            let rows = query.fetch_all(&self.pool).await?;
            let rows = rows.iter().map(row_to_json).collect::<GatewayResult<Vec<_>>>()?;

            tracing::debug!(rows = rows.len(), "Statement returned rows");

            Ok(QueryOutcome {
                row_count: rows.len() as u64,
                rows,
            })
        } else {
            let result = query.execute(&self.pool).await?;

            tracing::debug!(rows_affected = result.rows_affected(), "Statement executed");

            Ok(QueryOutcome {
                rows: Vec::new(),
                row_count: result.rows_affected(),
            })
        }
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Integer(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.clone()),
        SqlValue::Date(v) => query.bind(*v),
    }
}

/// SELECT and `... RETURNING` yield rows; for those rowCount is the number of
/// rows returned. Everything else only reports rows affected.
fn returns_rows(sql: &str) -> bool {
    let mut words = sql.split_whitespace().map(str::to_ascii_uppercase);
    match words.next() {
        Some(first) if first == "SELECT" => true,
        Some(_) => words.any(|word| word == "RETURNING"),
        None => false,
    }
}

/// Column types the gateway renders as JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    SmallInt,
    Int,
    BigInt,
    Bool,
    Real,
    Double,
    Text,
    Date,
    Timestamp,
    TimestampTz,
}

impl ColumnType {
    fn from_name(type_name: &str) -> Option<Self> {
        match type_name {
            "INT2" => Some(Self::SmallInt),
            "INT4" => Some(Self::Int),
            "INT8" => Some(Self::BigInt),
            "BOOL" => Some(Self::Bool),
            "FLOAT4" => Some(Self::Real),
            "FLOAT8" => Some(Self::Double),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Some(Self::Text),
            "DATE" => Some(Self::Date),
            "TIMESTAMP" => Some(Self::Timestamp),
            "TIMESTAMPTZ" => Some(Self::TimestampTz),
            _ => None,
        }
    }

    fn resolve(column: &str, type_name: &str) -> GatewayResult<Self> {
        Self::from_name(type_name).ok_or_else(|| GatewayError::UnsupportedColumn {
            column: column.to_owned(),
            type_name: type_name.to_owned(),
        })
    }

    fn decode(self, row: &PgRow, index: usize) -> Result<Value, sqlx::Error> {
        Ok(match self {
            Self::SmallInt => Value::from(row.try_get::<i16, _>(index)?),
            Self::Int => Value::from(row.try_get::<i32, _>(index)?),
            Self::BigInt => Value::from(row.try_get::<i64, _>(index)?),
            Self::Bool => Value::from(row.try_get::<bool, _>(index)?),
            Self::Real => Value::from(row.try_get::<f32, _>(index)?),
            Self::Double => Value::from(row.try_get::<f64, _>(index)?),
            Self::Text => Value::from(row.try_get::<String, _>(index)?),
            Self::Date => date_json(row.try_get(index)?),
            Self::Timestamp => timestamp_json(row.try_get(index)?),
            Self::TimestampTz => timestamptz_json(row.try_get(index)?),
        })
    }
}

fn date_json(date: NaiveDate) -> Value {
    Value::from(date.format("%Y-%m-%d").to_string())
}

fn timestamp_json(timestamp: NaiveDateTime) -> Value {
    Value::from(timestamp.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}

fn timestamptz_json(timestamp: DateTime<Utc>) -> Value {
    Value::from(timestamp.to_rfc3339())
}

fn row_to_json(row: &PgRow) -> GatewayResult<Row> {
    let mut object = Row::new();

    for column in row.columns() {
        let index = column.ordinal();
        let name = column.name();

        if row.try_get_raw(index)?.is_null() {
            object.insert(name.to_owned(), Value::Null);
            continue;
        }

        let value = ColumnType::resolve(name, column.type_info().name())?.decode(row, index)?;
        object.insert(name.to_owned(), value);
    }

    Ok(object)
}
