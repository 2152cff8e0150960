//! SQLite character repository implementation.
//!
//! The full character is stored as one JSON document. Owner and id live in
//! their own columns and every statement filters on both.

use std::sync::Arc;

use async_trait::async_trait;
use sheetkeeper_domain::{Character, CharacterId, Mutation, OwnerId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, RepoError};

/// Repository for Character operations.
pub struct SqliteCharacterRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCharacterRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }

    /// Convert a row to a Character entity.
    fn row_to_character(row: &SqliteRow) -> Result<Character, RepoError> {
        let document: String = row
            .try_get("document")
            .map_err(|e| RepoError::database("characters.decode", e))?;
        serde_json::from_str(&document).map_err(RepoError::serialization)
    }
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn list(&self, owner: &OwnerId) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query(
            "SELECT document FROM characters WHERE owner_id = ? ORDER BY created_at, id",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("characters.list", e))?;

        rows.iter().map(Self::row_to_character).collect()
    }

    async fn get(&self, owner: &OwnerId, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query("SELECT document FROM characters WHERE id = ? AND owner_id = ?")
            .bind(id.to_string())
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.get", e))?;

        row.as_ref().map(Self::row_to_character).transpose()
    }

    async fn create(&self, character: &Character) -> Result<(), RepoError> {
        let document = serde_json::to_string(character).map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO characters (id, owner_id, document, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(character.id.to_string())
        .bind(character.owner_id.as_str())
        .bind(document)
        .bind(character.created_at.to_rfc3339())
        .bind(character.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("characters.create", e))?;

        Ok(())
    }

    async fn apply_mutations(
        &self,
        owner: &OwnerId,
        id: CharacterId,
        mutations: &[Mutation],
    ) -> Result<Option<Character>, RepoError> {
        let now = self.clock.now();
        let id_text = id.to_string();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("characters.apply_mutations", e))?;

        // Writing first takes the database write lock before the document is
        // read, so two patches to the same character cannot interleave.
        let claimed = sqlx::query("UPDATE characters SET updated_at = ? WHERE id = ? AND owner_id = ?")
            .bind(now.to_rfc3339())
            .bind(&id_text)
            .bind(owner.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("characters.apply_mutations", e))?;

        if claimed.rows_affected() == 0 {
            return Ok(None);
        }

        let row = sqlx::query("SELECT document FROM characters WHERE id = ? AND owner_id = ?")
            .bind(&id_text)
            .bind(owner.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepoError::database("characters.apply_mutations", e))?;

        let mut character = Self::row_to_character(&row)?;
        character
            .apply_all(mutations, now)
            .map_err(RepoError::constraint)?;

        let document = serde_json::to_string(&character).map_err(RepoError::serialization)?;
        sqlx::query("UPDATE characters SET document = ? WHERE id = ? AND owner_id = ?")
            .bind(document)
            .bind(&id_text)
            .bind(owner.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("characters.apply_mutations", e))?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("characters.apply_mutations", e))?;

        Ok(Some(character))
    }

    async fn delete(&self, owner: &OwnerId, id: CharacterId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ? AND owner_id = ?")
            .bind(id.to_string())
            .bind(owner.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.delete", e))?;

        Ok(result.rows_affected() > 0)
    }
}
