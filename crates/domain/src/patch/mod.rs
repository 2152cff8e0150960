//! Partial-update merge engine.
//!
//! Turns a sparse, untrusted patch document into an ordered list of
//! field-level [`Mutation`]s, or rejects it as a whole:
//!
//! - `region` - one validator per patch region (name, baseline, advance)
//! - `advance` - shape check and ledger-slot derivation for `advance`
//! - `mutation` - the `(field-path, value)` pairs handed to storage
//!
//! Nothing here touches storage. A rejected patch never produces a partial
//! mutation list.

mod advance;
mod mutation;
mod region;

use serde_json::Value;

pub use advance::{has_advance_shape, index_advance, ledger_slot, slot_for_xp};
pub(crate) use advance::integral_xp;
pub use mutation::{FieldPath, Mutation};
pub use region::{advance_region, baseline_region, name_region, RegionOutcome};

/// Reasons a patch is refused before anything reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// `advance` is present but its key set is not exactly `ADVANCE_KEYS`.
    #[error("Missing or unknown key in `advance`")]
    InvalidAdvanceShape,

    /// `advance.xp` cannot be mapped to a ledger slot.
    #[error("Invalid `advance.xp`: {0}")]
    InvalidAdvanceXp(String),

    /// The patch selects no field at all.
    #[error("No valid update fields in request body")]
    NoValidFields,
}

/// Build the mutation list for a patch document.
///
/// Regions are combined in a fixed order: name, baseline, advance. A rejected
/// region fails the whole patch and discards what the other regions selected.
/// A patch that is not a JSON object selects nothing.
pub fn build_patch(patch: &Value) -> Result<Vec<Mutation>, PatchError> {
    let Some(document) = patch.as_object() else {
        return Err(PatchError::NoValidFields);
    };

    let regions = [
        name_region(document),
        baseline_region(document),
        advance_region(document),
    ];

    let mut mutations = Vec::new();
    for outcome in regions {
        match outcome {
            RegionOutcome::Mutations(selected) => mutations.extend(selected),
            RegionOutcome::NoOp => {}
            RegionOutcome::Rejected(err) => return Err(err),
        }
    }

    if mutations.is_empty() {
        return Err(PatchError::NoValidFields);
    }

    Ok(mutations)
}
