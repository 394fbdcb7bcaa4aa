//! Type-aware deep merge of configuration fragments
//!
//! [`merge`] combines a base fragment with an overlay and returns a fresh
//! fragment. Neither input is touched, so sibling branches of the combination
//! tree can keep merging onto the same parent without observing each other.
//!
//! ## Rules
//!
//! For every field of the overlay:
//!
//! - Field absent from the base: copied as-is (appended after the base fields)
//! - Both sequences: base items followed by overlay items, duplicates kept
//! - Both nested fragments: merged recursively, with no depth limit
//! - Both scalars: the overlay wins
//!
//! Fields only present in the base are carried through unchanged. Any other
//! pairing (a scalar over a sequence, a mapping over a scalar, ...) is rejected
//! with [`Error::KindMismatch`] rather than silently letting one side win.
//!
//! Merging is associative in application order but not commutative: later
//! scalars win and later sequence items come last, so callers must apply
//! fragments in a fixed order.

use log::trace;

use crate::error::{Error, Result};
use crate::fragment::{Fragment, Value};

/// Merge `overlay` onto `base`, producing a new fragment.
///
/// # Errors
///
/// Returns `Error::KindMismatch` when a field present in both inputs has a
/// different kind on each side. The error names the dotted path of the field.
///
/// # Examples
///
/// ```
/// use config_matrix::fragment::{Fragment, Value};
/// use config_matrix::merge::merge;
///
/// let base = Fragment::new().with("versions", Value::sequence(["BindImGui_Static"]));
/// let overlay = Fragment::new().with("versions", Value::sequence(["ImGui_Impl_GLFW"]));
///
/// let merged = merge(&base, &overlay).unwrap();
/// assert_eq!(
///     merged.get("versions").and_then(Value::as_sequence).unwrap(),
///     ["BindImGui_Static", "ImGui_Impl_GLFW"]
/// );
/// ```
pub fn merge(base: &Fragment, overlay: &Fragment) -> Result<Fragment> {
    merge_at(base, overlay, None)
}

fn merge_at(base: &Fragment, overlay: &Fragment, prefix: Option<&str>) -> Result<Fragment> {
    let mut merged = base.clone();

    for (field, incoming) in overlay.iter() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };

        let combined = match (base.get(field), incoming) {
            (None, value) => value.clone(),
            (Some(Value::Sequence(existing)), Value::Sequence(extra)) => {
                Value::Sequence(existing.iter().chain(extra).cloned().collect())
            }
            (Some(Value::Nested(existing)), Value::Nested(extra)) => {
                Value::Nested(merge_at(existing, extra, Some(&path))?)
            }
            (Some(Value::Scalar(existing)), Value::Scalar(replacement)) => {
                if existing != replacement {
                    trace!("Overriding '{}': '{}' -> '{}'", path, existing, replacement);
                }
                Value::Scalar(replacement.clone())
            }
            (Some(existing), value) => {
                return Err(Error::KindMismatch {
                    field: path,
                    base: existing.kind(),
                    overlay: value.kind(),
                })
            }
        };

        merged.insert(field, combined);
    }

    Ok(merged)
}
