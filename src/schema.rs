//! Column schema for the practitioner dataset.
//!
//! The categorical column set is literal configuration, not logic: it
//! mirrors the upstream dataset layout and is the single place to change
//! when the schema evolves.

/// The label column being predicted.
pub const LABEL_COLUMN: &str = "Risk Level";

/// Columns always treated as categorical (label included), regardless of
/// whether their values happen to look numeric.
pub const CATEGORICAL_COLUMNS: &[&str] = &[
    "Flexibility Level",
    "Injury",
    "Medical Condition",
    "Pose",
    "Risk Level",
];

/// Returns true if `column` belongs to the known categorical set.
#[must_use]
pub fn is_categorical(column: &str) -> bool {
    CATEGORICAL_COLUMNS.contains(&column)
}
