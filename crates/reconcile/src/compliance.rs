//! The state comparator: is the current document a superset of the
//! desired one?
//!
//! Comparison is typed: a number never equals its string spelling, a bool
//! never equals `"true"`. See DESIGN.md for the rationale.

use serde_json::Value;

/// Check whether `current` satisfies `desired` at every depth.
///
/// Every key in `desired` must exist in `current`; nested mappings recurse,
/// everything else requires exact value equality. Extra keys in `current`
/// never affect the result. The first mismatch returns false — no further
/// siblings are examined.
#[must_use]
pub fn is_compliant(current: &Value, desired: &Value) -> bool {
    let Some(desired) = desired.as_object() else {
        return current == desired;
    };
    let Some(current) = current.as_object() else {
        return false;
    };

    for (key, want) in desired {
        let Some(have) = current.get(key) else {
            return false;
        };
        if want.is_object() {
            if !is_compliant(have, want) {
                return false;
            }
        } else if have != want {
            return false;
        }
    }
    true
}
