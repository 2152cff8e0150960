//! Engine configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    /// Comma-separated origins, or `*`. `None` disables the CORS layer.
    pub cors_allowed_origins: Option<String>,
    /// JSON array of edges to upsert at startup.
    pub edge_seed_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".into(),
            server_port: 3000,
            database_url: "sqlite:sheetkeeper.db".into(),
            cors_allowed_origins: None,
            edge_seed_path: None,
        }
    }
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let server_port = non_empty("SERVER_PORT")
            .or_else(|| non_empty("PORT"))
            .and_then(|port| match port.parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    tracing::warn!(port = %port, "Ignoring unparseable server port");
                    None
                }
            })
            .unwrap_or(defaults.server_port);

        Self {
            server_host: non_empty("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            database_url: non_empty("DATABASE_URL").unwrap_or(defaults.database_url),
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS")
                .or_else(|| non_empty("CLIENT_ORIGIN")),
            edge_seed_path: non_empty("EDGE_SEED_PATH").map(PathBuf::from),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server_host, self.server_port).parse()
    }
}

/// Load `.env.local` then `.env` from the repo root, if present.
///
/// Variables already set in the environment win.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
