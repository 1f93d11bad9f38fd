//! The hyperpath registry: an ordered list of save-target paths persisted
//! as `<index>: <path>` lines.
//!
//! The on-disk index is not an identity. Every persist rewrites the whole
//! file and renumbers entries 0..N-1 from their position in the list, so
//! stray or stale indices in the file never survive a mutation.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Default registry location, one per working directory.
pub const REGISTRY_PATH: &str = "./hyperpaths";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HyperpathError {
    /// Registry file exists and is non-empty but no line parsed.
    NoHyperpaths,
    /// Attempt to edit an index beyond one-past-the-end.
    OutOfRange { index: usize, len: usize },
    IoError(String),
}

impl std::fmt::Display for HyperpathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HyperpathError::NoHyperpaths => write!(f, "no hyperpaths found"),
            HyperpathError::OutOfRange { index, len } => {
                write!(f, "cannot edit hyperpath[{index}]: registry has {len} entries")
            }
            HyperpathError::IoError(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for HyperpathError {}

/// Result of validating and applying a hyperpath edit. `written` means the
/// registry was updated; `valid` means the path is usable (possibly after
/// the caller creates the file).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    pub written: bool,
    pub valid: bool,
}

fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+): (.+)$").expect("hyperpath line regex"))
}

fn io_err(path: &Path, e: std::io::Error) -> HyperpathError {
    HyperpathError::IoError(format!("{}: {}", path.display(), e))
}

/// Scan raw registry text for `N: path` lines.
///
/// The path is everything after the first `": "`, so paths may contain
/// spaces and colons. Lines that do not match are ignored; the second
/// return value counts how many non-empty lines were skipped so callers
/// can surface possible corruption.
pub fn parse_registry(raw: &str) -> (Vec<String>, usize) {
    let mut paths = Vec::new();
    let mut skipped = 0;
    for line in raw.lines() {
        if let Some(caps) = line_regex().captures(line) {
            paths.push(caps[2].to_string());
        } else if !line.trim().is_empty() {
            skipped += 1;
        }
    }
    (paths, skipped)
}

/// Create the registry file if it does not exist yet.
pub fn ensure_registry(registry: &Path) -> Result<(), HyperpathError> {
    if !registry.exists() {
        fs::File::create(registry).map_err(|e| io_err(registry, e))?;
    }
    Ok(())
}

/// Load all hyperpaths from the registry file.
///
/// An empty file yields an empty list (first-run setup handles that); a
/// non-empty file from which nothing parses is `NoHyperpaths`.
pub fn load(registry: &Path) -> Result<Vec<String>, HyperpathError> {
    let raw = fs::read_to_string(registry).map_err(|e| io_err(registry, e))?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    let (paths, skipped) = parse_registry(&raw);
    if skipped > 0 {
        tracing::warn!(
            skipped,
            registry = %registry.display(),
            "ignored unparsable registry lines"
        );
    }
    if paths.is_empty() {
        return Err(HyperpathError::NoHyperpaths);
    }
    Ok(paths)
}

/// Rewrite the registry: delete, recreate, and write `i: path` lines
/// renumbered from list position.
pub fn persist(registry: &Path, paths: &[String]) -> Result<(), HyperpathError> {
    if registry.exists() {
        fs::remove_file(registry).map_err(|e| io_err(registry, e))?;
    }
    let mut content = String::new();
    for (i, path) in paths.iter().enumerate() {
        content.push_str(&format!("{i}: {path}\n"));
    }
    fs::write(registry, content).map_err(|e| io_err(registry, e))
}

/// Set entry `n` to `path` (append when `n == len`) and persist.
pub fn change_nth(registry: &Path, path: &str, n: usize) -> Result<(), HyperpathError> {
    let mut paths = match load(registry) {
        Ok(paths) => paths,
        // An unparsable registry gets rebuilt from scratch here.
        Err(HyperpathError::NoHyperpaths) => Vec::new(),
        Err(e) => return Err(e),
    };
    if n > paths.len() {
        return Err(HyperpathError::OutOfRange { index: n, len: paths.len() });
    }
    if n == paths.len() {
        paths.push(path.to_string());
    } else {
        paths[n] = path.to_string();
    }
    persist(registry, &paths)
}

/// Validate `path` and, when it names an existing regular file, install it
/// at registry position `n`.
///
/// Tilde is expanded before any check. A path whose file is missing but
/// whose parent directory exists is reported valid-but-unwritten so the
/// caller can offer to create the file.
pub fn edit_nth(registry: &Path, path: &str, n: usize) -> Result<EditOutcome, HyperpathError> {
    let expanded = expand_tilde(path);
    let candidate = Path::new(&expanded);

    if candidate.is_file() {
        change_nth(registry, &expanded, n)?;
        return Ok(EditOutcome { written: true, valid: true });
    }
    if candidate.exists() {
        // Directories and other non-files are never valid targets.
        return Ok(EditOutcome { written: false, valid: false });
    }
    let parent_is_dir = candidate
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::is_dir)
        .unwrap_or(false);
    Ok(EditOutcome { written: false, valid: parent_is_dir })
}

/// Expand `~` to the current user's home directory.
pub fn expand_tilde(path: &str) -> String {
    match dirs::home_dir() {
        Some(home) => path.replace('~', &home.to_string_lossy()),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_lines() {
        let raw = "0: /tmp/a.md\n1: /tmp/b.md\n";
        let (paths, skipped) = parse_registry(raw);
        assert_eq!(paths, vec!["/tmp/a.md", "/tmp/b.md"]);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_parse_keeps_spaces_and_colons_in_path() {
        let raw = "0: /tmp/my notes: vol 2.md\n";
        let (paths, _) = parse_registry(raw);
        assert_eq!(paths, vec!["/tmp/my notes: vol 2.md"]);
    }

    #[test]
    fn test_parse_ignores_and_counts_junk() {
        let raw = "garbage\n0: /tmp/a.md\nnot a path line\n\n1: /tmp/b.md\n";
        let (paths, skipped) = parse_registry(raw);
        assert_eq!(paths.len(), 2);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_parse_ignores_original_indices() {
        // Indices on disk are not identities; order of appearance wins.
        let raw = "7: /tmp/a.md\n3: /tmp/b.md\n";
        let (paths, _) = parse_registry(raw);
        assert_eq!(paths, vec!["/tmp/a.md", "/tmp/b.md"]);
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths_alone() {
        assert_eq!(expand_tilde("/tmp/a.md"), "/tmp/a.md");
    }
}
