//! SQLite edge repository implementation.

use async_trait::async_trait;
use sheetkeeper_domain::{Edge, EdgeId};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::infrastructure::ports::{EdgeRepo, RepoError};

/// Repository for Edge lookups.
pub struct SqliteEdgeRepo {
    pool: SqlitePool,
}

impl SqliteEdgeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_edge(row: &SqliteRow) -> Result<Edge, RepoError> {
        let document: String = row
            .try_get("document")
            .map_err(|e| RepoError::database("edges.decode", e))?;
        serde_json::from_str(&document).map_err(RepoError::serialization)
    }
}

#[async_trait]
impl EdgeRepo for SqliteEdgeRepo {
    async fn list(&self) -> Result<Vec<Edge>, RepoError> {
        let rows = sqlx::query("SELECT document FROM edges ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("edges.list", e))?;

        rows.iter().map(Self::row_to_edge).collect()
    }

    async fn get(&self, id: EdgeId) -> Result<Option<Edge>, RepoError> {
        let row = sqlx::query("SELECT document FROM edges WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("edges.get", e))?;

        row.as_ref().map(Self::row_to_edge).transpose()
    }

    async fn get_many(&self, ids: &[EdgeId]) -> Result<Vec<Edge>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT document FROM edges WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("edges.get_many", e))?;

        rows.iter().map(Self::row_to_edge).collect()
    }

    async fn save(&self, edge: &Edge) -> Result<(), RepoError> {
        let document = serde_json::to_string(edge).map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO edges (id, name, document)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                document = excluded.document
            "#,
        )
        .bind(edge.id.to_string())
        .bind(&edge.name)
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("edges.save", e))?;

        Ok(())
    }
}
