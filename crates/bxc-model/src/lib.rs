//! # bxc-model — Attribute Model Builder
//!
//! Walks a loaded declaration group and produces one [`SettingsContainer`]
//! per node type, carrying both the fields declared on that type and the
//! fields it inherits.
//!
//! ## Invariants
//!
//! - `flattened_fields(T) == flattened_fields(parent(T)) ++ direct_fields(T)`,
//!   order preserved; the root sentinel contributes nothing.
//! - Names in every `flattened_fields` are pairwise distinct. A collision is
//!   a hard `DuplicateFieldName` error, never a warning.
//! - Containers own clones of their fields. Nothing points back into the
//!   declaration tree, so backends never touch loader data.
//!
//! Sibling types are independent: two unrelated types may each declare a
//! field of the same name with different kinds.

pub mod builder;
pub mod container;

pub use builder::{build, build_schema};
pub use container::{AttributeModel, ModelGroup, SettingsContainer};
