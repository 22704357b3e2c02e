//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the API vocabulary:
//! - Common error types and result aliases
//! - The error body every failed request answers with
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all resources.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
