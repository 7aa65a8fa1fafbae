//! # Field Emptiness
//!
//! The predicate shared by the classifier and the exporter.
//!
//! A field is empty when it is absent, the empty string, or the literal
//! `n/a` in any letter case. No trimming is applied: `" "` is a value.

use crate::primitives::NOT_AVAILABLE;

/// Returns `true` if the field carries no usable value.
#[must_use]
pub fn is_empty_field(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => v.is_empty() || v.eq_ignore_ascii_case(NOT_AVAILABLE),
    }
}

/// Returns `true` if any of the fields is empty.
#[must_use]
pub fn any_empty(values: &[Option<&str>]) -> bool {
    values.iter().any(|v| is_empty_field(*v))
}

/// Returns `true` if every one of the fields is empty.
#[must_use]
pub fn all_empty(values: &[Option<&str>]) -> bool {
    values.iter().all(|v| is_empty_field(*v))
}
