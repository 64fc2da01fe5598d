//! The profile diffing engine: parse, diff, render.
//!
//! All three operations are pure functions. Malformed input never
//! raises; it degrades to "no information".

use super::{Profile, ProfileField, UpdateSet};

/// Trim a value; an empty result means "no information".
fn normalize(value: &str) -> Option<String> {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Parse the model's extraction response into cleaned candidate fields.
///
/// Only known field names with string values survive; unknown keys,
/// non-string values, nulls, and values that trim to empty are all
/// dropped. Any parse failure yields an empty map.
pub fn parse_candidate(raw_text: &str) -> UpdateSet {
    let Ok(payload) = serde_json::from_str::<serde_json::Value>(raw_text) else {
        return UpdateSet::new();
    };

    let mut candidate = UpdateSet::new();
    for field in ProfileField::ALL {
        if let Some(value) = payload[field.key()].as_str() {
            if let Some(cleaned) = normalize(value) {
                candidate.insert(field, cleaned);
            }
        }
    }
    candidate
}

/// Keep only the candidate fields whose value genuinely differs from
/// the stored one. An absent or empty stored value equals "no value".
/// Fields missing from the candidate are never included: absence means
/// "no opinion", not "clear this field".
pub fn diff(current: &Profile, candidate: &UpdateSet) -> UpdateSet {
    let mut changed = UpdateSet::new();
    for (field, value) in candidate {
        let Some(new_value) = normalize(value) else {
            continue;
        };
        let existing = current.get(*field).and_then(normalize);
        if existing.as_deref() != Some(new_value.as_str()) {
            changed.insert(*field, new_value);
        }
    }
    changed
}

/// Fixed-order, human-readable rendering of the profile, used to prime
/// the generation request.
pub fn render_context(profile: &Profile) -> String {
    let mut lines = vec!["User Profile Context".to_string()];
    for field in ProfileField::ALL {
        let value = profile
            .get(field)
            .and_then(normalize)
            .unwrap_or_else(|| "Not provided".to_string());
        lines.push(format!("- {}: {}", field.label(), value));
    }
    lines.join("\n")
}
