//! # Value Kinds — The Closed Set of Attribute Types
//!
//! Defines `ValueKind`, the eight kinds of value a node attribute may hold,
//! and `FieldValue`, the tagged initial value of a declared field. Every
//! `match` on either is exhaustive: a new kind cannot be added without
//! teaching both the native and the schema backend about it.

use serde::Serialize;

/// The eight supported attribute value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// 32-bit float.
    Float,
    /// 32-bit signed integer.
    Int,
    /// Boolean, stored by the engine as an int.
    Bool,
    /// Enumeration, stored by the engine as an int.
    Enum,
    /// Three-component float vector.
    Float3,
    /// Four-component float vector.
    Float4,
    /// RGB color, stored by the engine as a three-component vector.
    Color,
    /// UTF-8 string.
    String,
}

impl ValueKind {
    /// Returns all kinds in canonical order.
    pub fn all() -> &'static [ValueKind] {
        &[
            Self::Float,
            Self::Int,
            Self::Bool,
            Self::Enum,
            Self::Float3,
            Self::Float4,
            Self::Color,
            Self::String,
        ]
    }

    /// Lowercase name used in diagnostics and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Enum => "enum",
            Self::Float3 => "float3",
            Self::Float4 => "float4",
            Self::Color => "color",
            Self::String => "string",
        }
    }

    /// Whether `@min`/`@max` bounds apply to this kind.
    pub fn is_bounded(&self) -> bool {
        matches!(
            self,
            Self::Float | Self::Int | Self::Float3 | Self::Float4 | Self::Color
        )
    }

    /// Whether `@step` applies to this kind.
    pub fn has_step(&self) -> bool {
        matches!(self, Self::Float | Self::Float3 | Self::Float4 | Self::Color)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named enumeration and its ordered value domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnumType {
    /// Enum type name.
    pub name: String,
    /// Variant names in declaration order. Distinct.
    pub variants: Vec<String>,
}

impl EnumType {
    /// Position of `variant` in the declared order.
    pub fn ordinal(&self, variant: &str) -> Option<usize> {
        self.variants.iter().position(|v| v == variant)
    }
}

/// The declared initial value of a field, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    /// A selected variant together with the full value domain.
    Enum {
        #[serde(rename = "enum")]
        ty: EnumType,
        variant: usize,
    },
    Float3([f32; 3]),
    Float4([f32; 4]),
    /// Red, green, blue.
    Color([f32; 3]),
    String(String),
}

impl FieldValue {
    /// The kind this value belongs to.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Int(_) => ValueKind::Int,
            Self::Bool(_) => ValueKind::Bool,
            Self::Enum { .. } => ValueKind::Enum,
            Self::Float3(_) => ValueKind::Float3,
            Self::Float4(_) => ValueKind::Float4,
            Self::Color(_) => ValueKind::Color,
            Self::String(_) => ValueKind::String,
        }
    }
}
