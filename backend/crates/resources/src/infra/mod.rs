//! Infrastructure Layer
//!
//! Gateway implementations.

pub mod memory;
pub mod postgres;
