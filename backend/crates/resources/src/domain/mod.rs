//! Domain Layer - Resource definitions and persistence seam
//!
//! This layer contains:
//! - The data access gateway trait and its value types
//! - The generic resource definition and the SQL it produces
//! - The concrete resources (Item, Customer)
//! - Conversion of body values to column types

pub mod entities;
pub mod field;
pub mod gateway;
pub mod resource;
