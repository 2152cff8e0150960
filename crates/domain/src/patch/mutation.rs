//! Field-level mutations produced by the patch builder.

use std::fmt;

use serde_json::Value;

use crate::schema::{AttributeKey, SkillKey};

/// A settable location inside a character document.
///
/// Every variant addresses a disjoint field, so the order in which a list of
/// mutations is applied never changes the resulting document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// `name`
    Name,
    /// `initial.attributes.<key>`
    Attribute(AttributeKey),
    /// `initial.skills.<key>.val`
    SkillValue(SkillKey),
    /// `advances.<slot>`, always derived from the record's `xp`
    AdvanceSlot(usize),
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Name => f.write_str("name"),
            FieldPath::Attribute(key) => write!(f, "initial.attributes.{}", key),
            FieldPath::SkillValue(key) => write!(f, "initial.skills.{}.val", key),
            FieldPath::AdvanceSlot(slot) => write!(f, "advances.{}", slot),
        }
    }
}

/// One `(field-path, value)` pair to set on a stored character.
///
/// The value is kept exactly as the caller sent it. Casting to the field's
/// type happens when the mutation is applied to a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    path: FieldPath,
    value: Value,
}

impl Mutation {
    pub fn new(path: FieldPath, value: Value) -> Self {
        Self { path, value }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.path, self.value)
    }
}
