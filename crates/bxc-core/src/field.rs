//! # Field Declarations
//!
//! The immutable record describing one typed attribute on a node type:
//! its declared initial value, per-field metadata, numeric bounds, and the
//! source position it was declared at. Records are produced by the schema
//! loader and cloned, never mutated, by the model builder.

use serde::Serialize;

use crate::location::SourceLocation;
use crate::value::{FieldValue, ValueKind};

/// Default `@step` for float-based kinds.
pub const DEFAULT_STEP_SIZE: f32 = 0.01;

/// One typed field declared on a node type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDeclaration {
    /// Field name. Unique within the declaring type's flattened set.
    pub name: String,
    /// Declared initial value; its tag is the field's value kind.
    pub value: FieldValue,
    /// Editor-facing metadata.
    pub metadata: FieldMetadata,
    /// Numeric constraints, when the kind has any.
    pub bounds: Bounds,
    /// Where the field was declared.
    pub location: SourceLocation,
}

impl FieldDeclaration {
    /// The field's value kind.
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }
}

/// Per-field metadata attached with declaration-site markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMetadata {
    pub display_name: String,
    pub help_text: String,
    pub group: String,
    pub use_as_shader_constant: bool,
}

impl FieldMetadata {
    /// Documented defaults for a field named `field_name` declared on
    /// `type_name`.
    pub fn defaults_for(field_name: &str, type_name: &str) -> Self {
        Self {
            display_name: natural_display_name(field_name),
            help_text: String::new(),
            group: type_name.to_string(),
            use_as_shader_constant: true,
        }
    }
}

/// Inclusive float range with an editor step size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for FloatRange {
    fn default() -> Self {
        Self {
            min: f32::MIN,
            max: f32::MAX,
            step: DEFAULT_STEP_SIZE,
        }
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl Default for IntRange {
    fn default() -> Self {
        Self {
            min: i32::MIN,
            max: i32::MAX,
        }
    }
}

/// Numeric constraints of a field, shaped by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bounds {
    /// bool, enum and string fields carry no bounds.
    None,
    /// float, float3, float4 and color fields.
    Float(FloatRange),
    /// int fields.
    Int(IntRange),
}

impl Bounds {
    /// The natural-extreme bounds for `kind`.
    pub fn default_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Float | ValueKind::Float3 | ValueKind::Float4 | ValueKind::Color => {
                Self::Float(FloatRange::default())
            }
            ValueKind::Int => Self::Int(IntRange::default()),
            ValueKind::Bool | ValueKind::Enum | ValueKind::String => Self::None,
        }
    }
}

/// Natural-language form of an identifier.
///
/// Splits on underscores and camel-case boundaries and capitalizes each
/// word: `cast_shadows` and `castShadows` both become `Cast Shadows`,
/// `HDRColor` becomes `HDR Color`.
pub fn natural_display_name(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut cs = w.chars();
            match cs.next() {
                Some(first) => first.to_uppercase().chain(cs).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_from_snake_case() {
        assert_eq!(natural_display_name("cast_shadows"), "Cast Shadows");
        assert_eq!(natural_display_name("_leading__and_trailing_"), "Leading And Trailing");
    }

    #[test]
    fn display_name_from_camel_case() {
        assert_eq!(natural_display_name("castShadows"), "Cast Shadows");
        assert_eq!(natural_display_name("HDRColor"), "HDR Color");
        assert_eq!(natural_display_name("lod2Distance"), "Lod2 Distance");
    }

    #[test]
    fn display_name_single_word() {
        assert_eq!(natural_display_name("pos"), "Pos");
        assert_eq!(natural_display_name(""), "");
    }

    #[test]
    fn metadata_defaults() {
        let meta = FieldMetadata::defaults_for("castShadows", "LightNode");
        assert_eq!(meta.display_name, "Cast Shadows");
        assert_eq!(meta.help_text, "");
        assert_eq!(meta.group, "LightNode");
        assert!(meta.use_as_shader_constant);
    }

    #[test]
    fn default_bounds_are_natural_extremes() {
        match Bounds::default_for(ValueKind::Float) {
            Bounds::Float(r) => {
                assert_eq!(r.min, f32::MIN);
                assert_eq!(r.max, f32::MAX);
                assert_eq!(r.step, DEFAULT_STEP_SIZE);
            }
            other => panic!("expected float bounds, got {other:?}"),
        }
        assert_eq!(
            Bounds::default_for(ValueKind::Int),
            Bounds::Int(IntRange {
                min: i32::MIN,
                max: i32::MAX
            })
        );
        assert_eq!(Bounds::default_for(ValueKind::String), Bounds::None);
        assert_eq!(Bounds::default_for(ValueKind::Enum), Bounds::None);
    }
}
