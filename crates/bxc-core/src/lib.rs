//! # bxc-core — Foundational Types for the Attribute Schema Compiler
//!
//! This crate is the leaf of the `bxc` crate DAG. It defines the vocabulary
//! every other stage speaks: the closed set of value kinds a node attribute
//! may have, the immutable field declaration record, source locations for
//! diagnostics, and the single error hierarchy.
//!
//! ## Key Design Principles
//!
//! 1. **One closed `ValueKind` enum.** Eight variants, exhaustive `match`
//!    everywhere. Adding a kind forces both code generator backends to
//!    handle it at compile time.
//!
//! 2. **Values carry their kind.** `FieldValue` is a tagged variant; the
//!    kind of a field is derived from its declared initial value and can
//!    never disagree with it.
//!
//! 3. **Locale-free number text.** All numbers that reach generated files
//!    flow through [`canonical`], so output bytes are identical on every
//!    machine. The idempotent writer's diff check depends on it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bxc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod field;
pub mod location;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::SchemaError;
pub use field::{Bounds, FieldDeclaration, FieldMetadata, FloatRange, IntRange};
pub use location::SourceLocation;
pub use value::{EnumType, FieldValue, ValueKind};

/// Name of the sentinel root type every top-level node type extends.
pub const ROOT_TYPE_NAME: &str = "nodeType";
