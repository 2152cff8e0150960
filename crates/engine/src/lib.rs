//! SheetKeeper Engine library.
//!
//! Server-side code for storing and patching character sheets.
//!
//! ## Structure
//!
//! - `use_cases/` - Character and edge operations, including the patch mutator
//! - `infrastructure/` - Ports, SQLite adapters, configuration
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end HTTP tests over in-memory SQLite.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
