//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod edge_seed;
pub mod ports;
pub mod sqlite;
