//! # Canonical Number Text
//!
//! The only path by which numbers become text in generated files.
//!
//! ## Determinism Invariant
//!
//! Rust's formatting machinery never consults the host locale, so the
//! functions here produce the same bytes on every machine. Negative zero is
//! folded into zero, so `-0.0` and `0.0` in a snippet cannot produce
//! different outputs. The idempotent writer compares bytes; a formatting
//! difference would show up as a spurious rebuild.
//!
//! Two renderings exist:
//!
//! 1. **Native**: fixed four decimals plus an `f` suffix (`1.0000f`), the
//!    literal form the engine's headers use.
//! 2. **Schema**: the shortest decimal that round-trips to the same `f32`
//!    (`1`, `0.5`, `-2.25`), the lexical form `xs:float` accepts.

/// Render a float as a native literal: four decimals and an `f` suffix.
pub fn native_float(value: f32) -> String {
    let text = format!("{value:.4}");
    format!("{}f", fold_negative_zero(text))
}

/// Render a float in shortest round-trip decimal form.
pub fn schema_float(value: f32) -> String {
    fold_negative_zero(format!("{value}"))
}

/// Render float components as space-separated schema text.
pub fn schema_components(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| schema_float(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render float components as comma-separated native literals.
pub fn native_components(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| native_float(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn fold_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}
