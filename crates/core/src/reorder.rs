//! Reorder permutation validation.
//!
//! A reorder request must list exactly the product's current photo ids --
//! no missing id, no duplicate, no id from another product. Partial
//! reorders are rejected outright: applying half a ranking would leave
//! some photos ranked and others untouched with no deterministic recovery.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Validate that `requested` is a permutation of `current`.
///
/// On failure the returned [`CoreError::Validation`] names the offending
/// ids so the caller can see exactly what was missing, duplicated, or
/// unknown.
pub fn validate_reorder(current: &[DbId], requested: &[DbId]) -> Result<(), CoreError> {
    let current_set: HashSet<DbId> = current.iter().copied().collect();

    let mut seen = HashSet::with_capacity(requested.len());
    let mut duplicates = Vec::new();
    let mut unknown = Vec::new();

    for &id in requested {
        if !seen.insert(id) {
            duplicates.push(id);
        } else if !current_set.contains(&id) {
            unknown.push(id);
        }
    }

    let missing: Vec<DbId> = current
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();

    if duplicates.is_empty() && unknown.is_empty() && missing.is_empty() {
        return Ok(());
    }

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing photo ids {missing:?}"));
    }
    if !duplicates.is_empty() {
        parts.push(format!("duplicate photo ids {duplicates:?}"));
    }
    if !unknown.is_empty() {
        parts.push(format!("unknown photo ids {unknown:?}"));
    }

    Err(CoreError::Validation(format!(
        "Reorder list must contain each current photo id exactly once: {}",
        parts.join("; ")
    )))
}
