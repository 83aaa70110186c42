//! # bxc-codegen — Backends and Output Writer
//!
//! Turns [`SettingsContainer`](bxc_model::SettingsContainer)s into text and
//! gets that text onto disk without disturbing an incremental build.
//!
//! ## Backends
//!
//! - [`native`]: three linked macro blocks per node type (attribute-index
//!   declarations, definitions, creation calls), over the flattened field
//!   set.
//! - [`xsd`]: one XML Schema complex type per node type, extending its
//!   base type, over the direct field set only.
//!
//! Both backends `match` exhaustively on the field's value, one arm per
//! kind. Numbers are rendered through `bxc_core::canonical`.
//!
//! ## Writer
//!
//! [`writer`] compares candidate text with what is on disk, carries over
//! anything after the sentinel marker line, and writes atomically only
//! when the bytes differ.

pub mod native;
pub mod writer;
pub mod xsd;

pub use native::{emit_native, native_header};
pub use writer::{render_lines, write_if_changed, PendingOutput, WriteOutcome, SENTINEL_MARKER};
pub use xsd::{emit_schema, schema_document, DEFAULT_NAMESPACE};
