//! # Compile Command
//!
//! The pipeline for one input: read, load both declaration groups, build
//! the attribute model, generate, then write.
//!
//! Writing is two-phase. Every output is rendered and compared against
//! disk first; only when all of that has succeeded are the stale outputs
//! committed. `--check` stops after the first phase.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use bxc_codegen::{native_header, schema_document, PendingOutput, WriteOutcome, DEFAULT_NAMESPACE};
use bxc_core::SchemaError;
use bxc_model::{build_schema, AttributeModel};
use bxc_schema::{load, ATTRIBUTES_GROUP, DEFAULT_GROUPS};

use crate::config::{tool_root_from_env, OutputLayout, DEPS_PLACEHOLDER};

/// Arguments of a compile run.
#[derive(Args, Debug, Clone)]
pub struct CompileArgs {
    /// Authoring snippet to compile.
    pub input: PathBuf,

    /// Compare outputs with disk without writing. Exits 1 if any is stale.
    #[arg(long)]
    pub check: bool,

    /// Print the attribute model as JSON on stdout.
    #[arg(long)]
    pub dump_model: bool,

    /// Tool root for the schema output. Overrides BX_TOOL_ROOT.
    #[arg(long, value_name = "DIR")]
    pub schema_root: Option<PathBuf>,

    /// XML target namespace of the generated schema.
    #[arg(long, value_name = "NS", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

/// What happened to one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    /// Already up to date.
    Current,
    /// Differs from disk; not written because of `--check`.
    Stale,
    /// Created or replaced.
    Written,
}

/// Result of a compile run.
#[derive(Debug)]
pub struct CompileReport {
    /// The built attribute model.
    pub model: AttributeModel,
    /// Status of every output, in generation order.
    pub outputs: Vec<(PathBuf, OutputStatus)>,
}

impl CompileReport {
    /// Number of files written.
    pub fn written(&self) -> usize {
        self.count(OutputStatus::Written)
    }

    /// Number of outputs left stale by a check run.
    pub fn stale(&self) -> usize {
        self.count(OutputStatus::Stale)
    }

    fn count(&self, status: OutputStatus) -> usize {
        self.outputs.iter().filter(|(_, s)| *s == status).count()
    }
}

/// Execute the compile command. Returns the process exit code.
pub fn run_compile(args: &CompileArgs) -> Result<u8> {
    let tool_root = args.schema_root.clone().or_else(tool_root_from_env);
    let report = compile(args, tool_root.as_deref())?;

    if args.dump_model {
        let json = serde_json::to_string_pretty(&report.model)
            .context("failed to serialize attribute model")?;
        println!("{json}");
    }

    for (path, status) in &report.outputs {
        match status {
            OutputStatus::Current => tracing::info!(path = %path.display(), "up to date"),
            OutputStatus::Stale => tracing::warn!(path = %path.display(), "out of date"),
            OutputStatus::Written => tracing::info!(path = %path.display(), "written"),
        }
    }

    if args.check && report.stale() > 0 {
        return Ok(1);
    }
    Ok(0)
}

/// Compile `args.input` with an already-resolved tool root.
pub fn compile(args: &CompileArgs, tool_root: Option<&Path>) -> Result<CompileReport> {
    let input = &args.input;
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let layout = OutputLayout::resolve(input, tool_root)?;

    let schema = load(&source, &DEFAULT_GROUPS)
        .map_err(|e| log_error_position(input, e))
        .with_context(|| format!("failed to load {}", input.display()))?;
    let model = build_schema(&schema)
        .map_err(|e| log_error_position(input, e))
        .with_context(|| format!("invalid attribute model in {}", input.display()))?;

    let mut planned: Vec<(PathBuf, Vec<String>)> = Vec::with_capacity(3);
    match model.group(ATTRIBUTES_GROUP) {
        Some(containers) => {
            tracing::debug!(node_types = containers.len(), "generating attribute outputs");
            planned.push((layout.attributes_header.clone(), native_header(containers)));
            planned.push((
                layout.schema_document.clone(),
                schema_document(containers, &args.namespace),
            ));
        }
        None => tracing::info!("no Attributes group; header and schema skipped"),
    }
    planned.push((layout.deps_stamp.clone(), vec![DEPS_PLACEHOLDER.to_string()]));

    let pending = planned
        .into_iter()
        .map(|(path, lines)| {
            PendingOutput::prepare(&path, &lines)
                .with_context(|| format!("failed to prepare {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut outputs = Vec::with_capacity(pending.len());
    for output in pending {
        let path = output.path().to_path_buf();
        let status = if !output.is_stale() {
            OutputStatus::Current
        } else if args.check {
            OutputStatus::Stale
        } else {
            match output.commit()? {
                WriteOutcome::Written => OutputStatus::Written,
                WriteOutcome::Unmodified => OutputStatus::Current,
            }
        };
        outputs.push((path, status));
    }

    Ok(CompileReport { model, outputs })
}

fn log_error_position(input: &Path, err: SchemaError) -> SchemaError {
    if let Some(at) = err.location() {
        tracing::debug!(
            file = %input.display(),
            line = at.line,
            column = at.column,
            "schema error position"
        );
    }
    err
}
