//! Character use cases.
//!
//! Create, read, patch and delete an owner's character sheets. Every
//! operation is scoped to the requesting owner.

mod error;
mod mutator;

pub use error::CharacterError;
pub use mutator::CharacterMutator;

use std::sync::Arc;

use serde_json::Value;
use sheetkeeper_domain::{build_patch, Character, CharacterId, CharacterSheet, OwnerId};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, EdgeRepo};

use mutator::resolve_sheets;

/// Container for character use cases.
pub struct CharacterUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    edge_repo: Arc<dyn EdgeRepo>,
    clock: Arc<dyn ClockPort>,
    mutator: CharacterMutator,
}

impl CharacterUseCases {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        edge_repo: Arc<dyn EdgeRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let mutator = CharacterMutator::new(character_repo.clone(), edge_repo.clone());
        Self {
            character_repo,
            edge_repo,
            clock,
            mutator,
        }
    }

    pub async fn list(&self, owner: &OwnerId) -> Result<Vec<CharacterSheet>, CharacterError> {
        let characters = self.character_repo.list(owner).await?;
        Ok(resolve_sheets(self.edge_repo.as_ref(), characters).await?)
    }

    pub async fn get(
        &self,
        owner: &OwnerId,
        id: CharacterId,
    ) -> Result<Option<CharacterSheet>, CharacterError> {
        let Some(character) = self.character_repo.get(owner, id).await? else {
            return Ok(None);
        };
        let mut sheets = resolve_sheets(self.edge_repo.as_ref(), vec![character]).await?;
        Ok(sheets.pop())
    }

    /// Create a character with the default baseline and an empty ledger.
    pub async fn create(&self, owner: &OwnerId) -> Result<CharacterSheet, CharacterError> {
        let character = Character::new(owner.clone(), self.clock.now());
        self.character_repo.create(&character).await?;

        tracing::info!(
            character_id = %character.id,
            owner_id = %owner,
            "Created character"
        );

        Ok(CharacterSheet::resolve(character, &Default::default()))
    }

    /// Apply a sparse patch document.
    ///
    /// The patch is validated as a whole before anything is written.
    /// `Ok(None)` when the owner has no character with `id`.
    pub async fn update(
        &self,
        owner: &OwnerId,
        id: CharacterId,
        patch: &Value,
    ) -> Result<Option<CharacterSheet>, CharacterError> {
        let mutations = build_patch(patch).inspect_err(|e| {
            tracing::debug!(character_id = %id, error = %e, "Rejected character patch");
        })?;

        let sheet = self.mutator.apply(owner, id, &mutations).await?;
        if sheet.is_some() {
            tracing::info!(
                character_id = %id,
                owner_id = %owner,
                fields = mutations.len(),
                "Updated character"
            );
        }
        Ok(sheet)
    }

    /// Returns false when the owner has no character with `id`.
    pub async fn delete(&self, owner: &OwnerId, id: CharacterId) -> Result<bool, CharacterError> {
        let deleted = self.character_repo.delete(owner, id).await?;
        if deleted {
            tracing::info!(character_id = %id, owner_id = %owner, "Deleted character");
        }
        Ok(deleted)
    }
}
