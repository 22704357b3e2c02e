//! Resources Backend Module
//!
//! CRUD over HTTP for the maintenance shopping list (`/itens`) and the
//! customer register (`/cliente`).
//!
//! Clean Architecture structure:
//! - `domain/` - Gateway trait, generic resource definition, entities
//! - `application/` - The CRUD use case
//! - `infra/` - PostgreSQL and in-memory gateways
//! - `presentation/` - HTTP handlers and router
//!
//! ## Error Model
//! - Missing required field or malformed body: 400, nothing sent to the store
//! - Unknown id: 404, a normal outcome
//! - Any store failure: logged with operation and resource, answered with a
//!   generic 500; store error text never reaches the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entities::{Customer, CustomerResource, Item, ItemResource};
pub use domain::gateway::{Gateway, GatewayError, QueryOutcome, SqlValue};
pub use error::{CrudError, CrudResult};
pub use infra::memory::MemoryGateway;
pub use infra::postgres::PgGateway;
pub use presentation::router::{resources_router, resources_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
