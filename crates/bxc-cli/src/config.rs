//! # Output Layout
//!
//! Where the generated files for an input go. The only external
//! configuration is the tool root, taken from `--schema-root` or the
//! `BX_TOOL_ROOT` environment variable.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable naming the tools checkout.
pub const TOOL_ROOT_ENV: &str = "BX_TOOL_ROOT";

/// Schema directory below the tool root.
pub const SCHEMA_SUBDIR: &str = "SceneEditor/Schemas";

/// Body of the dependency stamp file.
pub const DEPS_PLACEHOLDER: &str =
    "This file is output to allow the build system to track dependencies";

/// Paths of the three outputs for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Native attribute header.
    pub attributes_header: PathBuf,
    /// Editor schema document.
    pub schema_document: PathBuf,
    /// Dependency stamp.
    pub deps_stamp: PathBuf,
}

impl OutputLayout {
    /// Derive output paths from the input path and an optional tool root.
    pub fn resolve(input: &Path, tool_root: Option<&Path>) -> Result<Self> {
        let stem = input
            .file_stem()
            .and_then(OsStr::to_str)
            .with_context(|| format!("input path has no usable file name: {}", input.display()))?;
        let input_dir = input.parent().unwrap_or_else(|| Path::new(""));
        let schema_dir = schema_dir(input_dir, tool_root);

        Ok(Self {
            attributes_header: input_dir.join(format!("{stem}_attributes.h")),
            schema_document: schema_dir.join(format!("{stem}_schema.xsd")),
            deps_stamp: input_dir.join(format!("{stem}.deps")),
        })
    }
}

/// `<root>/SceneEditor/Schemas` for a usable tool root, else `input_dir`.
///
/// A root is usable when it is non-empty and names an existing directory.
pub fn schema_dir(input_dir: &Path, tool_root: Option<&Path>) -> PathBuf {
    match tool_root {
        Some(root) if root.as_os_str().is_empty() => input_dir.to_path_buf(),
        Some(root) if root.is_dir() => root.join(SCHEMA_SUBDIR),
        Some(root) => {
            tracing::warn!(
                root = %root.display(),
                "tool root is not a directory; writing schema next to the input"
            );
            input_dir.to_path_buf()
        }
        None => input_dir.to_path_buf(),
    }
}

/// Tool root from `BX_TOOL_ROOT`, if set and non-empty.
pub fn tool_root_from_env() -> Option<PathBuf> {
    std::env::var_os(TOOL_ROOT_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
