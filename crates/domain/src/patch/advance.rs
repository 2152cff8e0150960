//! Advancement indexer.
//!
//! Checks the shape of an `advance` patch fragment and derives the ledger
//! slot it targets from its `xp`. Callers never name the slot themselves.

use serde_json::{Map, Value};

use super::mutation::{FieldPath, Mutation};
use super::PatchError;
use crate::schema::{ADVANCE_KEYS, ADVANCE_SLOT_LIMIT, XP_PER_ADVANCE};

/// Ledger slot unlocked at `xp`: `xp / 5 - 1`, truncating toward zero.
///
/// Defined for every `i64`. Values below `XP_PER_ADVANCE` give a negative
/// slot and values that are not a multiple of it truncate, so callers must
/// validate `xp` before using the result as an index.
pub fn slot_for_xp(xp: i64) -> i64 {
    xp / XP_PER_ADVANCE - 1
}

/// True when the fragment's key set is exactly `ADVANCE_KEYS`.
pub fn has_advance_shape(advance: &Map<String, Value>) -> bool {
    advance.len() == ADVANCE_KEYS.len() && ADVANCE_KEYS.iter().all(|key| advance.contains_key(*key))
}

/// Reads `xp` as a whole number. Integral floats such as `10.0` are accepted.
pub(crate) fn integral_xp(value: &Value) -> Option<i64> {
    // Largest magnitude an f64 holds without losing integer precision.
    const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

    let Value::Number(number) = value else {
        return None;
    };
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_F64)
            .map(|f| f as i64)
    })
}

/// Ledger slot for a submitted `xp` value.
///
/// Rejects anything that is not a positive whole multiple of `XP_PER_ADVANCE`
/// or that would land past `ADVANCE_SLOT_LIMIT`.
pub fn ledger_slot(xp: &Value) -> Result<usize, PatchError> {
    let whole = integral_xp(xp).ok_or_else(|| {
        // Whole numbers that still fail to read are too large for an i64.
        let reason = match xp.as_f64() {
            Some(f) if f.fract() == 0.0 => "out of range",
            _ => "expected a whole number",
        };
        PatchError::InvalidAdvanceXp(format!("{}, got {}", reason, xp))
    })?;

    if whole < XP_PER_ADVANCE || whole % XP_PER_ADVANCE != 0 {
        return Err(PatchError::InvalidAdvanceXp(format!(
            "must be a positive multiple of {}, got {}",
            XP_PER_ADVANCE, whole
        )));
    }

    usize::try_from(slot_for_xp(whole))
        .ok()
        .filter(|slot| *slot < ADVANCE_SLOT_LIMIT)
        .ok_or_else(|| {
            PatchError::InvalidAdvanceXp(format!(
                "{} is past the last ledger slot ({} advances)",
                whole, ADVANCE_SLOT_LIMIT
            ))
        })
}

/// Validate one `advance` fragment and turn it into a ledger-slot mutation.
///
/// The record is stored as submitted; only the slot is derived.
pub fn index_advance(advance: &Value) -> Result<Mutation, PatchError> {
    let record = advance
        .as_object()
        .filter(|record| has_advance_shape(record))
        .ok_or(PatchError::InvalidAdvanceShape)?;

    let slot = ledger_slot(record.get("xp").unwrap_or(&Value::Null))?;

    Ok(Mutation::new(FieldPath::AdvanceSlot(slot), advance.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn advance(xp: Value) -> Value {
        json!({ "xp": xp, "advType": "attr", "val": 1, "val2": 0, "edgeId": null })
    }

    #[test]
    fn slot_derivation_truncates() {
        assert_eq!(slot_for_xp(5), 0);
        assert_eq!(slot_for_xp(10), 1);
        assert_eq!(slot_for_xp(14), 1);
        assert_eq!(slot_for_xp(0), -1);
        assert_eq!(slot_for_xp(-10), -3);
    }

    #[test]
    fn xp_five_targets_first_slot() {
        let mutation = index_advance(&advance(json!(5))).unwrap();
        assert_eq!(*mutation.path(), FieldPath::AdvanceSlot(0));
        assert_eq!(*mutation.value(), advance(json!(5)));
    }

    #[test]
    fn xp_ten_targets_second_slot() {
        let mutation = index_advance(&advance(json!(10))).unwrap();
        assert_eq!(*mutation.path(), FieldPath::AdvanceSlot(1));
    }

    #[test]
    fn integral_float_xp_is_accepted() {
        let mutation = index_advance(&advance(json!(15.0))).unwrap();
        assert_eq!(*mutation.path(), FieldPath::AdvanceSlot(2));
    }

    #[test]
    fn key_order_does_not_matter() {
        let reordered = json!({ "edgeId": null, "val2": 0, "val": 1, "advType": "skill", "xp": 20 });
        let mutation = index_advance(&reordered).unwrap();
        assert_eq!(*mutation.path(), FieldPath::AdvanceSlot(3));
    }

    #[test]
    fn missing_key_is_a_shape_error() {
        let missing = json!({ "xp": 5, "advType": "attr", "val": 1, "val2": 0 });
        assert_eq!(index_advance(&missing), Err(PatchError::InvalidAdvanceShape));
    }

    #[test]
    fn extra_key_is_a_shape_error() {
        let mut extra = advance(json!(5));
        extra["slot"] = json!(0);
        assert_eq!(index_advance(&extra), Err(PatchError::InvalidAdvanceShape));
    }

    #[test]
    fn misspelled_key_is_a_shape_error() {
        let typo = json!({ "xp": 5, "advtype": "attr", "val": 1, "val2": 0, "edgeId": null });
        assert_eq!(index_advance(&typo), Err(PatchError::InvalidAdvanceShape));
    }

    #[test]
    fn non_object_is_a_shape_error() {
        assert_eq!(index_advance(&json!(null)), Err(PatchError::InvalidAdvanceShape));
        assert_eq!(index_advance(&json!([5])), Err(PatchError::InvalidAdvanceShape));
    }

    #[test]
    fn out_of_domain_xp_is_rejected() {
        for xp in [json!(0), json!(-5), json!(7), json!(7.5), json!("10"), json!(null)] {
            let err = index_advance(&advance(xp.clone())).unwrap_err();
            assert!(
                matches!(err, PatchError::InvalidAdvanceXp(_)),
                "xp {} should be rejected",
                xp
            );
        }
    }

    #[test]
    fn xp_beyond_i64_is_out_of_range() {
        for xp in [json!(18446744073709551615u64), json!(1e300)] {
            let err = ledger_slot(&xp).unwrap_err();
            assert!(
                matches!(err, PatchError::InvalidAdvanceXp(ref m) if m.starts_with("out of range")),
                "xp {} gave {:?}",
                xp,
                err
            );
        }
    }

    #[test]
    fn fractional_xp_is_not_a_whole_number() {
        let err = ledger_slot(&json!(7.5)).unwrap_err();
        assert!(matches!(
            err,
            PatchError::InvalidAdvanceXp(ref m) if m.starts_with("expected a whole number")
        ));
    }

    #[test]
    fn xp_past_the_ledger_is_rejected() {
        let last = (ADVANCE_SLOT_LIMIT as i64) * XP_PER_ADVANCE;
        assert!(index_advance(&advance(json!(last))).is_ok());
        assert!(matches!(
            index_advance(&advance(json!(last + XP_PER_ADVANCE))),
            Err(PatchError::InvalidAdvanceXp(_))
        ));
    }
}
