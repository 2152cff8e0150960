//! Edge catalogue use cases.

use std::sync::Arc;

use sheetkeeper_domain::{Edge, EdgeId};

use crate::infrastructure::ports::{EdgeRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct EdgeUseCases {
    edge_repo: Arc<dyn EdgeRepo>,
}

impl EdgeUseCases {
    pub fn new(edge_repo: Arc<dyn EdgeRepo>) -> Self {
        Self { edge_repo }
    }

    pub async fn list(&self) -> Result<Vec<Edge>, EdgeError> {
        Ok(self.edge_repo.list().await?)
    }

    pub async fn get(&self, id: EdgeId) -> Result<Option<Edge>, EdgeError> {
        Ok(self.edge_repo.get(id).await?)
    }

    /// Upsert every edge in `edges`, returning how many were written.
    pub async fn seed(&self, edges: &[Edge]) -> Result<usize, EdgeError> {
        for edge in edges {
            self.edge_repo.save(edge).await?;
        }
        tracing::info!(count = edges.len(), "Seeded edges");
        Ok(edges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockEdgeRepo;

    fn edge(name: &str) -> Edge {
        Edge {
            id: EdgeId::new(),
            name: name.to_string(),
            requirements: String::new(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn seed_saves_every_edge() {
        let mut edge_repo = MockEdgeRepo::new();
        edge_repo.expect_save().times(2).returning(|_| Ok(()));

        let written = EdgeUseCases::new(Arc::new(edge_repo))
            .seed(&[edge("Brawny"), edge("Luck")])
            .await
            .unwrap();
        assert_eq!(written, 2);
    }

    #[tokio::test]
    async fn seed_stops_at_first_failure() {
        let mut edge_repo = MockEdgeRepo::new();
        edge_repo
            .expect_save()
            .times(1)
            .returning(|_| Err(RepoError::database("edges.save", "readonly database")));

        let err = EdgeUseCases::new(Arc::new(edge_repo))
            .seed(&[edge("Brawny"), edge("Luck")])
            .await
            .unwrap_err();
        assert!(matches!(err, EdgeError::Repo(RepoError::Database { .. })));
    }
}
