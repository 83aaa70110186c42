//! Syntax tree of an authoring snippet, before any typing.
//!
//! The parser only checks structure. Literal shapes are classified into
//! value kinds by the loader, which is where `UnsupportedFieldType` arises.

use bxc_core::SourceLocation;

/// A whole snippet: top-level group blocks and file-level enums.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub groups: Vec<GroupBlock>,
    pub enums: Vec<EnumDecl>,
}

/// `Name { ... }` at the top level, e.g. `Attributes { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBlock {
    pub name: String,
    pub location: SourceLocation,
    pub enums: Vec<EnumDecl>,
    pub nodes: Vec<NodeBlock>,
}

/// `enum Name { A, B, C }`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub location: SourceLocation,
    pub variants: Vec<(String, SourceLocation)>,
}

/// A node type body. Nested blocks are derived types.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBlock {
    pub name: String,
    pub location: SourceLocation,
    pub fields: Vec<FieldItem>,
    pub children: Vec<NodeBlock>,
}

/// `@marker(...)* name = literal;`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldItem {
    pub name: String,
    pub location: SourceLocation,
    pub markers: Vec<Marker>,
    pub value: Literal,
    pub value_location: SourceLocation,
}

/// `@name(args)` attached to the following field.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub location: SourceLocation,
    pub args: Vec<Literal>,
}

/// A literal expression, untyped.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// `(a, b, ...)`
    Tuple(Vec<Literal>),
    /// `[a, b, ...]`
    List(Vec<Literal>),
    /// `name(a, b, ...)`
    Call { name: String, args: Vec<Literal> },
    /// `Type::Variant`
    Path { ty: String, variant: String },
    /// A bare identifier such as `null`.
    Ident(String),
}

impl Literal {
    /// Numeric value of int and float literals.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Short description of the literal's shape for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Int(_) => "integer".to_string(),
            Self::Float(_) => "float".to_string(),
            Self::Bool(_) => "bool".to_string(),
            Self::Str(_) => "string".to_string(),
            Self::Tuple(items) if items.iter().all(|i| i.as_number().is_some()) => {
                format!("tuple of {} numbers", items.len())
            }
            Self::Tuple(items) => format!("tuple of {} mixed components", items.len()),
            Self::List(_) => "list".to_string(),
            Self::Call { name, args } => format!("`{name}(...)` with {} arguments", args.len()),
            Self::Path { ty, variant } => format!("`{ty}::{variant}`"),
            Self::Ident(name) => format!("identifier `{name}`"),
        }
    }
}
