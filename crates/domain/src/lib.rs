//! SheetKeeper domain.
//!
//! - `schema` - fixed attribute, skill and advance key tables
//! - `patch` - the partial-update merge engine
//! - `character` - character, edge and resolved-sheet entities
//! - `ids` - typed identifiers

pub mod character;
pub mod error;
pub mod ids;
pub mod patch;
pub mod schema;

pub use character::{
    AdvanceRecord, Baseline, Character, CharacterSheet, Edge, ResolvedAdvance, SkillRating,
    DEFAULT_ATTRIBUTE_DIE,
};
pub use error::DomainError;
pub use ids::{CharacterId, EdgeId, OwnerId};
pub use patch::{build_patch, FieldPath, Mutation, PatchError, RegionOutcome};
pub use schema::{AttributeKey, SkillKey, ADVANCE_KEYS, ADVANCE_SLOT_LIMIT, XP_PER_ADVANCE};
