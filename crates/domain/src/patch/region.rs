//! Region validators.
//!
//! A patch document has three disjoint regions: `name`, `initial` (the
//! baseline) and `advance`. Each validator here looks at one region and
//! decides what, if anything, it contributes.

use serde_json::{Map, Value};

use super::advance::index_advance;
use super::mutation::{FieldPath, Mutation};
use super::PatchError;
use crate::schema::{AttributeKey, SkillKey};

/// What one region contributes to a patch.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionOutcome {
    /// The region is present and selects these fields.
    Mutations(Vec<Mutation>),
    /// The region is absent or selects nothing. Not an error on its own.
    NoOp,
    /// The region is present but malformed; the whole patch must be rejected.
    Rejected(PatchError),
}

impl From<Vec<Mutation>> for RegionOutcome {
    fn from(mutations: Vec<Mutation>) -> Self {
        if mutations.is_empty() {
            RegionOutcome::NoOp
        } else {
            RegionOutcome::Mutations(mutations)
        }
    }
}

/// `name`: any value is accepted here; casting happens when it is applied.
pub fn name_region(patch: &Map<String, Value>) -> RegionOutcome {
    match patch.get("name") {
        Some(name) => RegionOutcome::Mutations(vec![Mutation::new(FieldPath::Name, name.clone())]),
        None => RegionOutcome::NoOp,
    }
}

/// `initial.attributes` and `initial.skills`.
///
/// Keys outside the schema are skipped, not rejected. For skills only the
/// `val` sub-field is taken.
pub fn baseline_region(patch: &Map<String, Value>) -> RegionOutcome {
    let Some(initial) = patch.get("initial").and_then(Value::as_object) else {
        return RegionOutcome::NoOp;
    };

    let mut mutations = Vec::new();

    if let Some(attributes) = non_empty_object(initial.get("attributes")) {
        for key in AttributeKey::all() {
            if let Some(value) = attributes.get(key.as_str()) {
                mutations.push(Mutation::new(FieldPath::Attribute(*key), value.clone()));
            }
        }
    }

    if let Some(skills) = non_empty_object(initial.get("skills")) {
        for key in SkillKey::all() {
            // A skill entry with no `val` is skipped rather than cleared to null.
            if let Some(val) = skills.get(key.as_str()).and_then(|skill| skill.get("val")) {
                mutations.push(Mutation::new(FieldPath::SkillValue(*key), val.clone()));
            }
        }
    }

    mutations.into()
}

/// `advance`: unlike the baseline, a malformed record rejects the patch.
pub fn advance_region(patch: &Map<String, Value>) -> RegionOutcome {
    match patch.get("advance") {
        Some(advance) => match index_advance(advance) {
            Ok(mutation) => RegionOutcome::Mutations(vec![mutation]),
            Err(err) => RegionOutcome::Rejected(err),
        },
        None => RegionOutcome::NoOp,
    }
}

fn non_empty_object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value
        .and_then(Value::as_object)
        .filter(|object| !object.is_empty())
}
