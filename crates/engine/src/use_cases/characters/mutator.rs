//! Applies validated mutation lists and resolves ledger edges.

use std::collections::HashMap;
use std::sync::Arc;

use sheetkeeper_domain::{Character, CharacterId, CharacterSheet, Mutation, OwnerId};

use crate::infrastructure::ports::{CharacterRepo, EdgeRepo, RepoError};

use super::CharacterError;

/// Writes a mutation list as one owner-scoped update and returns the
/// resulting sheet.
pub struct CharacterMutator {
    character_repo: Arc<dyn CharacterRepo>,
    edge_repo: Arc<dyn EdgeRepo>,
}

impl CharacterMutator {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, edge_repo: Arc<dyn EdgeRepo>) -> Self {
        Self {
            character_repo,
            edge_repo,
        }
    }

    /// `Ok(None)` when the owner has no character with `id`.
    pub async fn apply(
        &self,
        owner: &OwnerId,
        id: CharacterId,
        mutations: &[Mutation],
    ) -> Result<Option<CharacterSheet>, CharacterError> {
        let updated = match self
            .character_repo
            .apply_mutations(owner, id, mutations)
            .await
        {
            Ok(updated) => updated,
            Err(RepoError::ConstraintViolation(message)) => {
                return Err(CharacterError::InvalidFieldValue(message));
            }
            Err(e) => return Err(e.into()),
        };

        let Some(character) = updated else {
            return Ok(None);
        };

        let mut sheets = resolve_sheets(self.edge_repo.as_ref(), vec![character]).await?;
        Ok(sheets.pop())
    }
}

/// Embed each advance's edge. Edges that no longer exist resolve to null.
pub(crate) async fn resolve_sheets(
    edge_repo: &dyn EdgeRepo,
    characters: Vec<Character>,
) -> Result<Vec<CharacterSheet>, RepoError> {
    let mut edge_ids: Vec<_> = characters
        .iter()
        .flat_map(|character| character.edge_ids())
        .collect();
    edge_ids.sort();
    edge_ids.dedup();

    let edges: HashMap<_, _> = edge_repo
        .get_many(&edge_ids)
        .await?
        .into_iter()
        .map(|edge| (edge.id, edge))
        .collect();

    Ok(characters
        .into_iter()
        .map(|character| CharacterSheet::resolve(character, &edges))
        .collect())
}
