//! # bxc-cli — Command-Line Driver
//!
//! Provides the `bxc` binary. One invocation compiles one authoring
//! snippet:
//!
//! ```bash
//! bxc engine/nodes.bx                 # regenerate what changed
//! bxc engine/nodes.bx --check         # exit 1 if anything is stale
//! bxc engine/nodes.bx --dump-model    # print the attribute model as JSON
//! ```
//!
//! ## Outputs
//!
//! For `dir/X.bx`:
//!
//! - `dir/X_attributes.h`: native attribute macros.
//! - `<schema dir>/X_schema.xsd`: editor schema. The schema directory is
//!   `$BX_TOOL_ROOT/SceneEditor/Schemas` when the tool root is usable,
//!   otherwise `dir`.
//! - `dir/X.deps`: stamp file for build-system dependency tracking.
//!
//! Every output is computed, and every existing output read, before the
//! first write. An error anywhere leaves all previous outputs untouched.

pub mod compile;
pub mod config;
