//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    ports::{CharacterRepo, ClockPort, EdgeRepo},
    sqlite::SqliteRepositories,
};
use crate::use_cases::{CharacterUseCases, EdgeUseCases};

/// Main application state.
///
/// Holds the use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub characters: CharacterUseCases,
    pub edges: EdgeUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        edge_repo: Arc<dyn EdgeRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            use_cases: UseCases {
                characters: CharacterUseCases::new(character_repo, edge_repo.clone(), clock),
                edges: EdgeUseCases::new(edge_repo),
            },
        }
    }

    pub fn from_sqlite(repos: SqliteRepositories, clock: Arc<dyn ClockPort>) -> Self {
        Self::new(repos.character, repos.edge, clock)
    }
}
