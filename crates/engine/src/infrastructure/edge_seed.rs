//! Edge seed file loading.

use std::path::Path;

use sheetkeeper_domain::Edge;

#[derive(Debug, thiserror::Error)]
pub enum EdgeSeedError {
    #[error("Failed to read edge seed {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse edge seed {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Read a JSON array of edges.
pub async fn read_edge_seed(path: &Path) -> Result<Vec<Edge>, EdgeSeedError> {
    let display = path.display().to_string();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| EdgeSeedError::Io {
            path: display.clone(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| EdgeSeedError::Parse {
        path: display,
        source,
    })
}
