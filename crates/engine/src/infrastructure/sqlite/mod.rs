//! SQLite storage for characters and edges.
//!
//! Entities are stored as serde_json documents next to the columns every
//! query filters on (`id`, `owner_id`).

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::ports::{ClockPort, RepoError};

mod character_repo;
mod edge_repo;
mod schema;

pub use character_repo::SqliteCharacterRepo;
pub use edge_repo::SqliteEdgeRepo;
pub use schema::ensure_schema;

/// How long a writer waits for another transaction's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool for `database_url`, creating the database file if needed.
///
/// An in-memory database only lives as long as its connection, so those
/// pools are pinned to a single connection that is never recycled.
pub async fn connect(database_url: &str) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| RepoError::database("connect", e))?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    pool_options
        .connect_with(options)
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// All SQLite repositories over one pool.
pub struct SqliteRepositories {
    pub character: Arc<SqliteCharacterRepo>,
    pub edge: Arc<SqliteEdgeRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            character: Arc::new(SqliteCharacterRepo::new(pool.clone(), clock)),
            edge: Arc::new(SqliteEdgeRepo::new(pool)),
        }
    }

    /// Connect, ensure the schema, and build the repositories.
    pub async fn open(database_url: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = connect(database_url).await?;
        ensure_schema(&pool).await?;
        Ok(Self::new(pool, clock))
    }
}
