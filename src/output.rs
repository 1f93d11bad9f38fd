//! Output routing: decide where serialized records go and put them there.
//!
//! Precedence: clipboard, then stdout, then an explicit trailing filename,
//! then hyperpath[0] from the registry. File targets append by default;
//! overwrite mode wipes the file after an interactive confirmation.

use crate::hyperpaths::{self, HyperpathError};
use crate::services::clipboard::{Clipboard, ClipboardError};
use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum OutputError {
    /// The user declined an overwrite. Not a failure: callers exit
    /// cleanly and silently.
    Aborted,
    IoError(String),
    Clipboard(ClipboardError),
    Hyperpath(HyperpathError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Aborted => write!(f, "aborted by user"),
            OutputError::IoError(msg) => write!(f, "IO error: {msg}"),
            OutputError::Clipboard(e) => write!(f, "{e}"),
            OutputError::Hyperpath(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for OutputError {}

impl From<ClipboardError> for OutputError {
    fn from(e: ClipboardError) -> Self {
        OutputError::Clipboard(e)
    }
}

impl From<HyperpathError> for OutputError {
    fn from(e: HyperpathError) -> Self {
        OutputError::Hyperpath(e)
    }
}

/// Where a write will land. File targets are opened at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
    Clipboard,
}

impl OutputTarget {
    /// Human-readable destination for status reporting.
    pub fn describe(&self) -> String {
        match self {
            OutputTarget::File(path) => path.display().to_string(),
            OutputTarget::Stdout => "stdout".to_string(),
            OutputTarget::Clipboard => "system clipboard".to_string(),
        }
    }
}

fn io_err(path: &Path, e: std::io::Error) -> OutputError {
    OutputError::IoError(format!("{}: {}", path.display(), e))
}

/// Resolve the output target for this invocation.
///
/// `confirm_in`/`prompt_out` carry the overwrite confirmation dialog so
/// tests can script it.
pub fn choose_output(
    explicit: Option<&str>,
    overwrite: bool,
    to_stdout: bool,
    to_clipboard: bool,
    registry: &Path,
    confirm_in: &mut impl BufRead,
    prompt_out: &mut impl Write,
) -> Result<OutputTarget, OutputError> {
    if to_clipboard {
        return Ok(OutputTarget::Clipboard);
    }
    if to_stdout {
        return Ok(OutputTarget::Stdout);
    }
    if let Some(path) = explicit {
        return prepare_file(Path::new(path), overwrite, confirm_in, prompt_out);
    }
    // Fall back to hyperpath[0].
    let paths = hyperpaths::load(registry)?;
    match paths.first() {
        Some(first) => prepare_file(Path::new(first), overwrite, confirm_in, prompt_out),
        None => Err(HyperpathError::NoHyperpaths.into()),
    }
}

/// Prepare a file target. In overwrite mode a pre-existing file is removed
/// after the user confirms with `y`; any other answer aborts the whole
/// operation. Writes themselves always open in append-or-create mode, so a
/// just-wiped file simply starts over from empty.
fn prepare_file(
    path: &Path,
    overwrite: bool,
    confirm_in: &mut impl BufRead,
    prompt_out: &mut impl Write,
) -> Result<OutputTarget, OutputError> {
    if overwrite && path.exists() {
        writeln!(prompt_out, "The file '{}' will be overwritten.", path.display())
            .map_err(|e| io_err(path, e))?;
        write!(prompt_out, "Proceed? y/n: ").map_err(|e| io_err(path, e))?;
        prompt_out.flush().map_err(|e| io_err(path, e))?;

        let mut answer = String::new();
        confirm_in.read_line(&mut answer).map_err(|e| io_err(path, e))?;
        if answer.trim() != "y" {
            tracing::info!(path = %path.display(), "overwrite declined");
            return Err(OutputError::Aborted);
        }
        std::fs::remove_file(path).map_err(|e| io_err(path, e))?;
    }
    Ok(OutputTarget::File(path.to_path_buf()))
}

/// Write `text` to the target and return the destination description.
pub fn write(
    target: &OutputTarget,
    text: &str,
    clipboard: &mut Clipboard,
) -> Result<String, OutputError> {
    match target {
        OutputTarget::File(path) => {
            let mut file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|e| io_err(path, e))?;
            file.write_all(text.as_bytes()).map_err(|e| io_err(path, e))?;
        }
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| OutputError::IoError(format!("stdout: {e}")))?;
        }
        OutputTarget::Clipboard => {
            clipboard.write_all(text)?;
        }
    }
    tracing::debug!(bytes = text.len(), dest = %target.describe(), "wrote output");
    Ok(target.describe())
}

/// Rewrite a bytemark file in full: remove, recreate, write.
///
/// Record files are managed by whole-file replacement, never in-place
/// edits; deletion of a record is just its omission from `content`.
pub fn rewrite_file(path: &Path, content: &str) -> Result<(), OutputError> {
    if path.exists() {
        std::fs::remove_file(path).map_err(|e| io_err(path, e))?;
    }
    std::fs::write(path, content).map_err(|e| io_err(path, e))
}
