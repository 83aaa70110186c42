//! # Idempotent Output Writer
//!
//! Generated files sit inside an incremental build: touching a file whose
//! bytes did not change forces every dependent translation unit to rebuild.
//! This module writes only when the candidate text differs from what is on
//! disk, and each write is atomic (temporary file in the target directory,
//! then rename).
//!
//! ## Sentinel Marker
//!
//! A generated file may carry hand-written content below a marker line
//! ([`SENTINEL_MARKER`]). When the existing file has the marker at the start
//! of a line, the marker and everything after it is appended to the
//! regenerated text verbatim, separated by a blank line.
//!
//! ## Two Phases
//!
//! [`PendingOutput::prepare`] does all the reading and comparison up front
//! and [`PendingOutput::commit`] performs the write. A caller producing
//! several outputs can prepare all of them, and only commit once nothing
//! else can fail.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bxc_core::SchemaError;
use tempfile::NamedTempFile;

/// Marker line separating regenerated text from preserved trailing content.
pub const SENTINEL_MARKER: &str =
    "// ================================================================================================";

/// Result of a write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file already held the candidate bytes; nothing was written.
    Unmodified,
    /// The file was created or replaced.
    Written,
}

/// An output whose final bytes are known but not yet written.
#[derive(Debug, Clone)]
pub struct PendingOutput {
    path: PathBuf,
    contents: Vec<u8>,
    stale: bool,
}

impl PendingOutput {
    /// Read the current file (if any) and compute the bytes it should hold.
    ///
    /// The existing file is handled as raw bytes: a preserved tail need not
    /// be valid UTF-8.
    pub fn prepare(path: impl Into<PathBuf>, lines: &[String]) -> Result<Self, SchemaError> {
        let path = path.into();
        let existing = read_existing(&path)?;
        let mut contents = render_lines(lines).into_bytes();
        if let Some(tail) = existing.as_deref().and_then(preserved_tail) {
            contents.push(b'\n');
            contents.extend_from_slice(tail);
        }
        let stale = existing.as_deref() != Some(contents.as_slice());
        Ok(Self {
            path,
            contents,
            stale,
        })
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes the file will hold after [`commit`](Self::commit).
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Whether committing would change the file.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Write the prepared bytes if they differ from the file.
    pub fn commit(self) -> Result<WriteOutcome, SchemaError> {
        if !self.stale {
            tracing::debug!(path = %self.path.display(), "output unchanged");
            return Ok(WriteOutcome::Unmodified);
        }
        write_atomic(&self.path, &self.contents).map_err(|e| SchemaError::io(&self.path, e))?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = self.contents.len(),
            "output written"
        );
        Ok(WriteOutcome::Written)
    }
}

/// Prepare and commit in one step.
pub fn write_if_changed(path: impl AsRef<Path>, lines: &[String]) -> Result<WriteOutcome, SchemaError> {
    PendingOutput::prepare(path.as_ref(), lines)?.commit()
}

/// Join lines with `\n`, terminating each one.
pub fn render_lines(lines: &[String]) -> String {
    let capacity = lines.iter().map(|l| l.len() + 1).sum();
    let mut out = String::with_capacity(capacity);
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, SchemaError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SchemaError::io(path, e)),
    }
}

/// The marker line and everything after it, if the marker starts a line.
fn preserved_tail(existing: &[u8]) -> Option<&[u8]> {
    let marker = SENTINEL_MARKER.as_bytes();
    existing
        .windows(marker.len())
        .enumerate()
        .find(|(i, window)| *window == marker && (*i == 0 || existing[i - 1] == b'\n'))
        .map(|(i, _)| &existing[i..])
}

/// Mode given to outputs that did not exist before.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Replace `path` with `bytes` via a temporary file in the same directory.
///
/// The replacement keeps the permissions of the file it replaces; a new
/// file gets [`NEW_FILE_MODE`] rather than the temporary file's 0600.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    match fs::metadata(path) {
        Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => set_new_file_permissions(tmp.as_file())?,
        Err(e) => return Err(e),
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_new_file_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn set_new_file_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
