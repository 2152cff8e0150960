//! Character sheet entities
//!
//! A character has a baseline (`initial`) of attributes and skills and a
//! sparse advancement ledger. Slot `i` of the ledger unlocks at
//! `(i + 1) * XP_PER_ADVANCE` experience points.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::DomainError;
use crate::ids::{CharacterId, EdgeId, OwnerId};
use crate::patch::{integral_xp, FieldPath, Mutation};
use crate::schema::{AttributeKey, SkillKey, ADVANCE_SLOT_LIMIT};

/// Die size every attribute starts at (a d4).
pub const DEFAULT_ATTRIBUTE_DIE: u64 = 4;

/// A player's character sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    /// Never changed after creation; every lookup is filtered by it.
    pub owner_id: OwnerId,
    pub name: String,
    pub initial: Baseline,
    /// Sparse ledger; `None` marks a slot that has not been bought yet.
    pub advances: Vec<Option<AdvanceRecord>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// A fresh sheet with the default baseline and an empty ledger.
    pub fn new(owner_id: OwnerId, now: DateTime<Utc>) -> Self {
        Self {
            id: CharacterId::new(),
            owner_id,
            name: String::new(),
            initial: Baseline::default(),
            advances: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply one mutation, casting its value to the addressed field's type.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<(), DomainError> {
        let path = mutation.path();
        let value = mutation.value();

        match *path {
            FieldPath::Name => self.name = cast_text(path, value)?,
            FieldPath::Attribute(key) => {
                let die = cast_number(path, value)?;
                self.initial.attributes.insert(key, die);
            }
            FieldPath::SkillValue(key) => {
                let val = cast_number(path, value)?;
                self.initial.skills.entry(key).or_default().val = val;
            }
            FieldPath::AdvanceSlot(slot) => {
                if slot >= ADVANCE_SLOT_LIMIT {
                    return Err(DomainError::validation(format!(
                        "`{}` is past the last ledger slot",
                        path
                    )));
                }
                let record = AdvanceRecord::cast(path, value)?;
                if self.advances.len() <= slot {
                    self.advances.resize(slot + 1, None);
                }
                self.advances[slot] = Some(record);
            }
        }

        Ok(())
    }

    /// Apply every mutation or none of them.
    pub fn apply_all(
        &mut self,
        mutations: &[Mutation],
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut staged = self.clone();
        for mutation in mutations {
            staged.apply(mutation)?;
        }
        staged.updated_at = now;
        *self = staged;
        Ok(())
    }

    pub fn advance(&self, slot: usize) -> Option<&AdvanceRecord> {
        self.advances.get(slot).and_then(Option::as_ref)
    }

    /// Distinct edges referenced from the ledger.
    pub fn edge_ids(&self) -> BTreeSet<EdgeId> {
        self.advances
            .iter()
            .flatten()
            .filter_map(|record| record.edge_id)
            .collect()
    }
}

/// Starting attribute and skill values, before any advances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub attributes: BTreeMap<AttributeKey, Number>,
    pub skills: BTreeMap<SkillKey, SkillRating>,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            attributes: AttributeKey::all()
                .iter()
                .map(|key| (*key, Number::from(DEFAULT_ATTRIBUTE_DIE)))
                .collect(),
            skills: SkillKey::all()
                .iter()
                .map(|key| (*key, SkillRating::default()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRating {
    pub val: Number,
}

impl Default for SkillRating {
    /// Untrained.
    fn default() -> Self {
        Self {
            val: Number::from(0),
        }
    }
}

/// One bought advance. `val` and `val2` are interpreted according to
/// `adv_type` by whoever computes derived statistics; here they are opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceRecord {
    pub xp: i64,
    pub adv_type: String,
    pub val: Value,
    pub val2: Value,
    pub edge_id: Option<EdgeId>,
}

impl AdvanceRecord {
    /// Cast an already shape-checked advance fragment into a record.
    pub fn cast(path: &FieldPath, value: &Value) -> Result<Self, DomainError> {
        let record = value
            .as_object()
            .ok_or_else(|| DomainError::validation(format!("`{}` must be an object", path)))?;
        let field = |key: &str| record.get(key).unwrap_or(&Value::Null);

        let xp = integral_xp(field("xp")).ok_or_else(|| {
            DomainError::validation(format!("`{}.xp` must be a whole number", path))
        })?;

        let adv_type = match field("advType") {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => {
                return Err(DomainError::validation(format!(
                    "`{}.advType` must be a string",
                    path
                )))
            }
        };

        let edge_id = match field("edgeId") {
            Value::Null => None,
            Value::String(s) => Some(s.parse::<EdgeId>().map_err(|_| {
                DomainError::validation(format!("`{}.edgeId` is not a valid edge id", path))
            })?),
            _ => {
                return Err(DomainError::validation(format!(
                    "`{}.edgeId` must be an edge id or null",
                    path
                )))
            }
        };

        Ok(Self {
            xp,
            adv_type,
            val: field("val").clone(),
            val2: field("val2").clone(),
            edge_id,
        })
    }
}

/// A purchasable edge, referenced weakly from advance records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub name: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub description: String,
}

/// Read projection of a character with ledger edges resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    pub id: CharacterId,
    pub owner_id: OwnerId,
    pub name: String,
    pub initial: Baseline,
    pub advances: Vec<Option<ResolvedAdvance>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An advance record whose `edgeId` carries the referenced edge, or null
/// when the record has no edge or the edge no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAdvance {
    pub xp: i64,
    pub adv_type: String,
    pub val: Value,
    pub val2: Value,
    pub edge_id: Option<Edge>,
}

impl CharacterSheet {
    pub fn resolve(character: Character, edges: &HashMap<EdgeId, Edge>) -> Self {
        let advances = character
            .advances
            .into_iter()
            .map(|slot| {
                slot.map(|record| ResolvedAdvance {
                    xp: record.xp,
                    adv_type: record.adv_type,
                    val: record.val,
                    val2: record.val2,
                    edge_id: record.edge_id.and_then(|id| edges.get(&id).cloned()),
                })
            })
            .collect();

        Self {
            id: character.id,
            owner_id: character.owner_id,
            name: character.name,
            initial: character.initial,
            advances,
            created_at: character.created_at,
            updated_at: character.updated_at,
        }
    }
}

fn cast_text(path: &FieldPath, value: &Value) -> Result<String, DomainError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(DomainError::validation(format!(
            "`{}` must be a string",
            path
        ))),
    }
}

fn cast_number(path: &FieldPath, value: &Value) -> Result<Number, DomainError> {
    let cast = match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => s.trim().parse::<Number>().ok(),
        _ => None,
    };
    cast.ok_or_else(|| DomainError::validation(format!("`{}` must be a number", path)))
}
