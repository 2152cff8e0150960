//! Backend E2E tests.
//!
//! Each test drives the complete router (`api::router`) with
//! `tower::ServiceExt::oneshot` against its own in-memory SQLite database.
//!
//! ```bash
//! cargo test -p sheetkeeper-engine --lib e2e_tests
//! ```

mod e2e_helpers;

pub use e2e_helpers::*;
