//! Domain Entities
//!
//! The two independent resources of the API and their request bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::field::{self, FieldValue};
use crate::domain::gateway::SqlValue;
use crate::domain::resource::Resource;

// ============================================================================
// Item
// ============================================================================

/// Maintenance shopping list item (`itens`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    pub nome_produto: String,
    pub quantidade: Option<i32>,
    pub descricao: Option<String>,
}

/// Body of POST /itens and PUT /itens/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPayload {
    #[serde(default, deserialize_with = "field::text")]
    pub nome_produto: Option<String>,
    #[serde(default, deserialize_with = "field::integer")]
    pub quantidade: Option<FieldValue<i32>>,
    #[serde(default, deserialize_with = "field::text")]
    pub descricao: Option<String>,
}

pub struct ItemResource;

impl Resource for ItemResource {
    type Record = Item;
    type Payload = ItemPayload;

    const PATH: &'static str = "itens";
    const TABLE: &'static str = "itens";
    const KEY: &'static str = "id";
    const FIELDS: &'static [&'static str] = &["nome_produto", "quantidade", "descricao"];
    const REQUIRED: &'static str = "nome_produto";
    const NOT_FOUND: &'static str = "Item não encontrado";

    fn required_value(payload: &ItemPayload) -> Option<&str> {
        payload.nome_produto.as_deref()
    }

    fn into_values(payload: ItemPayload) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(payload.nome_produto),
            payload.quantidade.into(),
            SqlValue::Text(payload.descricao),
        ]
    }
}

// ============================================================================
// Customer
// ============================================================================

/// Customer (`cliente`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id_cliente: i32,
    pub nome_cliente: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
    /// `YYYY-MM-DD`
    pub data_nascimento: Option<NaiveDate>,
}

/// Body of POST /cliente and PUT /cliente/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPayload {
    #[serde(default, deserialize_with = "field::text")]
    pub nome_cliente: Option<String>,
    #[serde(default, deserialize_with = "field::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "field::text")]
    pub telefone: Option<String>,
    #[serde(default, deserialize_with = "field::date")]
    pub data_nascimento: Option<FieldValue<NaiveDate>>,
}

pub struct CustomerResource;

impl Resource for CustomerResource {
    type Record = Customer;
    type Payload = CustomerPayload;

    const PATH: &'static str = "cliente";
    const TABLE: &'static str = "cliente";
    const KEY: &'static str = "id_cliente";
    const FIELDS: &'static [&'static str] =
        &["nome_cliente", "email", "telefone", "data_nascimento"];
    const REQUIRED: &'static str = "nome_cliente";
    const NOT_FOUND: &'static str = "Cliente não encontrado";

    fn required_value(payload: &CustomerPayload) -> Option<&str> {
        payload.nome_cliente.as_deref()
    }

    fn into_values(payload: CustomerPayload) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(payload.nome_cliente),
            SqlValue::Text(payload.email),
            SqlValue::Text(payload.telefone),
            payload.data_nascimento.into(),
        ]
    }
}
