//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod characters;
pub mod edges;

pub use characters::{CharacterError, CharacterMutator, CharacterUseCases};
pub use edges::{EdgeError, EdgeUseCases};
