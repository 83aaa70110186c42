//! # bxc-schema — Schema Loader
//!
//! Reads the declarative authoring snippet in which engine developers
//! describe node types and their typed attributes, and produces the typed
//! declaration tree consumed by the model builder.
//!
//! ## Pipeline
//!
//! 1. [`lexer`]: characters to positioned tokens; comments dropped.
//! 2. [`parser`]: recursive descent to an untyped [`ast::Document`].
//! 3. [`loader`]: literal shapes to value kinds, markers to metadata,
//!    nesting to base types.
//!
//! The grammar replaces "compile a snippet in a host language, then
//! reflect on it": no compiler is embedded and no type metadata is looked
//! up at run time.
//!
//! ```text
//! enum Quality { Low, Medium, High }
//!
//! Attributes {
//!     LocatorNode {
//!         pos = (0.0, 0.0, 0.0);
//!         MeshNode {
//!             @display("Mesh Path") mesh = ":box";
//!             quality = Quality::High;
//!         }
//!     }
//! }
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `bxc-core` internally.
//! - Every error carries the line and column it was detected at.

pub mod ast;
pub mod declaration;
pub mod lexer;
pub mod loader;
pub mod parser;

pub use declaration::{
    DeclarationGroup, NodeTypeDeclaration, Schema, ATTRIBUTES_GROUP, DEFAULT_GROUPS,
    SETTINGS_GROUP,
};
pub use loader::{load, load_document};
pub use parser::parse_document;
