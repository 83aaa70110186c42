//! # Error Hierarchy
//!
//! Structured error types for the whole compiler, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every error is fatal to the current invocation. Variants carry the
//! locator an engine developer needs to fix their snippet: the field or
//! type name and, where the error originates in source text, its line and
//! column. The originating file path is attached by the CLI.

use std::path::PathBuf;

use thiserror::Error;

use crate::location::SourceLocation;

/// Top-level error type for every compiler stage.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// None of the requested top-level declaration groups is present.
    #[error("snippet declares none of the groups {}", quoted_list(.expected))]
    MissingDeclarationGroup {
        /// The group names that were searched for.
        expected: Vec<String>,
    },

    /// A field's declared value does not map to one of the eight kinds.
    #[error("{location}: field \"{field}\" has unsupported type ({found})")]
    UnsupportedFieldType {
        /// The offending field name.
        field: String,
        /// Description of the literal shape that was found.
        found: String,
        /// Position of the field declaration.
        location: SourceLocation,
    },

    /// A field name collides within a type's effective field set.
    #[error("{location}: duplicate field \"{field_name}\" in node type \"{type_name}\"")]
    DuplicateFieldName {
        /// The node type whose flattened field set collides.
        type_name: String,
        /// The colliding field name.
        field_name: String,
        /// Position of the second declaration.
        location: SourceLocation,
    },

    /// Two node types in one group share a name.
    #[error("{location}: node type \"{type_name}\" is declared more than once")]
    DuplicateNodeType {
        /// The repeated type name.
        type_name: String,
        /// Position of the second declaration.
        location: SourceLocation,
    },

    /// The authoring snippet is not well-formed.
    #[error("{location}: {message}")]
    Parse {
        /// Position at which parsing failed.
        location: SourceLocation,
        /// Human-readable description.
        message: String,
    },

    /// Input unreadable or output unwritable.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    /// Build a [`SchemaError::Parse`] at `location`.
    pub fn parse(location: SourceLocation, message: impl Into<String>) -> Self {
        Self::Parse {
            location,
            message: message.into(),
        }
    }

    /// Build a [`SchemaError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Source position of the error, when it has one.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Self::UnsupportedFieldType { location, .. }
            | Self::DuplicateFieldName { location, .. }
            | Self::DuplicateNodeType { location, .. }
            | Self::Parse { location, .. } => Some(*location),
            Self::MissingDeclarationGroup { .. } | Self::Io { .. } => None,
        }
    }
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_group_lists_expected_names() {
        let err = SchemaError::MissingDeclarationGroup {
            expected: vec!["Settings".into(), "Attributes".into()],
        };
        assert_eq!(
            err.to_string(),
            "snippet declares none of the groups \"Settings\" or \"Attributes\""
        );
        assert!(err.location().is_none());
    }

    #[test]
    fn duplicate_field_names_type_and_field() {
        let err = SchemaError::DuplicateFieldName {
            type_name: "MeshNode".into(),
            field_name: "pos".into(),
            location: SourceLocation::new(9, 13),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("9:13:"));
        assert!(msg.contains("\"pos\""));
        assert!(msg.contains("\"MeshNode\""));
    }

    #[test]
    fn unsupported_field_names_field() {
        let err = SchemaError::UnsupportedFieldType {
            field: "weights".into(),
            found: "list".into(),
            location: SourceLocation::new(3, 9),
        };
        assert_eq!(
            err.to_string(),
            "3:9: field \"weights\" has unsupported type (list)"
        );
        assert_eq!(err.location(), Some(SourceLocation::new(3, 9)));
    }

    #[test]
    fn io_error_names_path() {
        let err = SchemaError::io(
            "out/engine_nodes_attributes.h",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("out/engine_nodes_attributes.h"));
        assert!(msg.contains("denied"));
    }
}
