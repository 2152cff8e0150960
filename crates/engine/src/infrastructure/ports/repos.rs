//! Repository port traits for database access.
//!
//! Every `CharacterRepo` method takes the requesting owner. A character that
//! exists under another owner is indistinguishable from one that does not
//! exist at all.

use async_trait::async_trait;
use sheetkeeper_domain::{Character, CharacterId, Edge, EdgeId, Mutation, OwnerId};

use super::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn list(&self, owner: &OwnerId) -> Result<Vec<Character>, RepoError>;
    async fn get(&self, owner: &OwnerId, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn create(&self, character: &Character) -> Result<(), RepoError>;

    /// Apply `mutations` to the owner's character as one atomic update and
    /// return the stored result. `None` when no character matches
    /// `(owner, id)`. A mutation whose value cannot be cast fails with
    /// `RepoError::ConstraintViolation` and nothing is written.
    async fn apply_mutations(
        &self,
        owner: &OwnerId,
        id: CharacterId,
        mutations: &[Mutation],
    ) -> Result<Option<Character>, RepoError>;

    /// Hard delete. Returns false when no character matches `(owner, id)`.
    async fn delete(&self, owner: &OwnerId, id: CharacterId) -> Result<bool, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EdgeRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<Edge>, RepoError>;
    async fn get(&self, id: EdgeId) -> Result<Option<Edge>, RepoError>;
    /// Edges that exist among `ids`; unknown ids are skipped.
    async fn get_many(&self, ids: &[EdgeId]) -> Result<Vec<Edge>, RepoError>;
    /// Insert or replace.
    async fn save(&self, edge: &Edge) -> Result<(), RepoError>;
}
