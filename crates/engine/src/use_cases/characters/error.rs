//! Character operation errors.

use crate::infrastructure::ports::RepoError;
use sheetkeeper_domain::PatchError;

/// Errors that can occur during character operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    /// The patch document was refused before reaching storage.
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// A selected value could not be stored in its field.
    #[error("Invalid field value: {0}")]
    InvalidFieldValue(String),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
