//! Text helpers shared by the term index and the engine.

/// Case-folds text for substring comparison.
///
/// Search terms and field values go through the same folding, so a term
/// matches regardless of the casing used by the billing export.
pub fn fold_text(raw: &str) -> String {
    raw.to_lowercase()
}

/// Uppercases a replacement label for output.
pub fn output_label(raw: &str) -> String {
    raw.to_uppercase()
}
