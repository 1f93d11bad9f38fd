//! System clipboard access via arboard, with an internal fallback buffer.
//!
//! On X11 the clipboard owner must stay alive to answer paste requests
//! from other applications, so the arboard handle lives in a static for
//! the process lifetime. Tests run in internal-only mode and never touch
//! the real clipboard.

use std::sync::Mutex;

/// Process-lifetime clipboard holder (X11 ownership, see module docs).
static SYSTEM_CLIPBOARD: Mutex<Option<arboard::Clipboard>> = Mutex::new(None);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    Unavailable(String),
    ReadFailed(String),
    WriteFailed(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Unavailable(msg) => write!(f, "clipboard unavailable: {msg}"),
            ClipboardError::ReadFailed(msg) => write!(f, "clipboard read failed: {msg}"),
            ClipboardError::WriteFailed(msg) => write!(f, "clipboard write failed: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Clipboard handle used by output routing and url-mode capture.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    /// Shadow copy of the last write; the read source in internal-only mode.
    internal: String,
    internal_only: bool,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Internal-only mode: reads and writes use the shadow buffer and the
    /// system clipboard is never opened. For tests.
    pub fn set_internal_only(&mut self, enabled: bool) {
        self.internal_only = enabled;
    }

    /// Write `text` to the system clipboard.
    pub fn write_all(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.internal = text.to_string();
        if self.internal_only {
            return Ok(());
        }

        let mut guard = SYSTEM_CLIPBOARD
            .lock()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        if guard.is_none() {
            match arboard::Clipboard::new() {
                Ok(cb) => *guard = Some(cb),
                Err(e) => {
                    tracing::debug!("arboard clipboard init failed: {e}");
                    return Err(ClipboardError::Unavailable(e.to_string()));
                }
            }
        }
        match guard.as_mut() {
            Some(cb) => cb.set_text(text).map_err(|e| {
                tracing::debug!("arboard copy failed: {e}");
                ClipboardError::WriteFailed(e.to_string())
            }),
            None => Err(ClipboardError::Unavailable("no clipboard handle".to_string())),
        }
    }

    /// Read the current system clipboard contents.
    pub fn read_all(&mut self) -> Result<String, ClipboardError> {
        if self.internal_only {
            return Ok(self.internal.clone());
        }

        let mut guard = SYSTEM_CLIPBOARD
            .lock()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        if guard.is_none() {
            match arboard::Clipboard::new() {
                Ok(cb) => *guard = Some(cb),
                Err(e) => return Err(ClipboardError::Unavailable(e.to_string())),
            }
        }
        match guard.as_mut() {
            Some(cb) => cb.get_text().map_err(|e| {
                tracing::debug!("arboard paste failed: {e}");
                ClipboardError::ReadFailed(e.to_string())
            }),
            None => Err(ClipboardError::Unavailable("no clipboard handle".to_string())),
        }
    }
}
