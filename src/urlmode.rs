//! Ad-hoc URL capture: turn whatever URL is on the system clipboard into
//! a bytemark, using the page's `<title>` as the record title.

use crate::bytemark::Bytemark;
use crate::services::clipboard::{Clipboard, ClipboardError};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlModeError {
    Clipboard(ClipboardError),
    Http(String),
    /// The clipboard held something that is not a fetchable URL.
    NotAUrl(String),
}

impl std::fmt::Display for UrlModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlModeError::Clipboard(e) => write!(f, "{e}"),
            UrlModeError::Http(msg) => write!(f, "HTTP error: {msg}"),
            UrlModeError::NotAUrl(s) => write!(f, "clipboard does not hold a URL: {s:?}"),
        }
    }
}

impl std::error::Error for UrlModeError {}

impl From<ClipboardError> for UrlModeError {
    fn from(e: ClipboardError) -> Self {
        UrlModeError::Clipboard(e)
    }
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title regex"))
}

/// Read a URL from the system clipboard and build a record from it.
pub fn capture_from_clipboard(clipboard: &mut Clipboard) -> Result<Bytemark, UrlModeError> {
    let url = clipboard.read_all()?;
    let url = url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(UrlModeError::NotAUrl(url.to_string()));
    }
    capture_url(url)
}

/// Fetch `url` and build a timestamped record titled with the page's
/// `<title>`, falling back to the URL itself when there is none.
///
/// Unlike scraped articles, captured records carry no extra rows; they
/// decode like any other bytemark.
pub fn capture_url(url: &str) -> Result<Bytemark, UrlModeError> {
    tracing::info!(url, "visiting");
    let body = ureq::get(url)
        .call()
        .map_err(|e| UrlModeError::Http(e.to_string()))?
        .into_string()
        .map_err(|e| UrlModeError::Http(e.to_string()))?;

    let title = extract_title(&body).unwrap_or_else(|| url.to_string());
    Ok(Bytemark::new(title, url))
}

/// Pull the first `<title>` out of an HTML document.
pub fn extract_title(html: &str) -> Option<String> {
    title_regex()
        .captures(html)
        .map(|c| c[1].split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
}
