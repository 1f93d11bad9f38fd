//! Parsing of human-typed article selections ("1 2 3", "1-3").

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// A selection token the parser could not accept. The whole input is
/// rejected on the first bad token; there is no partial application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    InvalidSelection(String),
    InvalidRange(String),
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::InvalidSelection(token) => write!(f, "Invalid selection: {token}"),
            SelectionError::InvalidRange(token) => write!(f, "Invalid range: {token}"),
        }
    }
}

impl std::error::Error for SelectionError {}

fn range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)-(\d+)$").expect("range regex"))
}

fn int_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+$").expect("int regex"))
}

/// Parse a space-separated selection line into a deduplicated set of
/// 1-based indices, each within `1..=max`.
///
/// Tokens are bare integers or inclusive `a-b` ranges with `a <= b`.
/// Anything else (including an out-of-bounds index) fails the whole call.
pub fn parse_selections(input: &str, max: usize) -> Result<BTreeSet<usize>, SelectionError> {
    let mut selections = BTreeSet::new();

    for token in input.split(' ').filter(|t| !t.trim().is_empty()) {
        let token = token.trim();
        if let Some(caps) = range_regex().captures(token) {
            let from: usize = caps[1]
                .parse()
                .map_err(|_| SelectionError::InvalidRange(token.to_string()))?;
            let to: usize = caps[2]
                .parse()
                .map_err(|_| SelectionError::InvalidRange(token.to_string()))?;
            if to < from || from < 1 || to > max {
                return Err(SelectionError::InvalidRange(token.to_string()));
            }
            selections.extend(from..=to);
        } else if int_regex().is_match(token) {
            let sel: usize = token
                .parse()
                .map_err(|_| SelectionError::InvalidSelection(token.to_string()))?;
            if sel < 1 || sel > max {
                return Err(SelectionError::InvalidSelection(token.to_string()));
            }
            selections.insert(sel);
        } else {
            return Err(SelectionError::InvalidSelection(token.to_string()));
        }
    }

    Ok(selections)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 30;

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_bare_integers() {
        assert_eq!(parse_selections("1 2 3", MAX).unwrap(), set(&[1, 2, 3]));
    }

    #[test]
    fn test_range() {
        assert_eq!(parse_selections("1-3", MAX).unwrap(), set(&[1, 2, 3]));
    }

    #[test]
    fn test_dedup_across_token_forms() {
        assert_eq!(parse_selections("1 1-3", MAX).unwrap(), set(&[1, 2, 3]));
    }

    #[test]
    fn test_extra_whitespace_is_tolerated() {
        assert_eq!(parse_selections("  4   7 ", MAX).unwrap(), set(&[4, 7]));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            parse_selections("0", MAX),
            Err(SelectionError::InvalidSelection("0".to_string()))
        );
        assert_eq!(
            parse_selections("31", MAX),
            Err(SelectionError::InvalidSelection("31".to_string()))
        );
        assert!(parse_selections("30", MAX).is_ok());
    }

    #[test]
    fn test_descending_range_fails() {
        assert_eq!(
            parse_selections("5-2", MAX),
            Err(SelectionError::InvalidRange("5-2".to_string()))
        );
    }

    #[test]
    fn test_range_bounds() {
        assert!(parse_selections("0-3", MAX).is_err());
        assert!(parse_selections("29-31", MAX).is_err());
    }

    #[test]
    fn test_garbage_token_rejects_whole_input() {
        assert_eq!(
            parse_selections("1 2 x", MAX),
            Err(SelectionError::InvalidSelection("x".to_string()))
        );
    }

    #[test]
    fn test_empty_input_is_empty_set() {
        assert!(parse_selections("", MAX).unwrap().is_empty());
    }

    #[test]
    fn test_smaller_max_is_honored() {
        assert!(parse_selections("5", 4).is_err());
        assert!(parse_selections("4", 4).is_ok());
    }
}
