//! Application Layer - Use Cases
//!
//! One generic use case, instantiated per resource.

pub mod crud;
