//! Pure, order-preserving operators over ordered lists.
//!
//! The bytemark manager and the hyperpaths menu both reorder their lists
//! through these three primitives. Every operator returns a fresh `Vec`
//! and leaves untouched elements in their original relative order.

/// Index out of range for the list an operator was applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl std::fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "index {} out of bounds for list of length {}", self.index, self.len)
    }
}

impl std::error::Error for OutOfBounds {}

fn check(index: usize, len: usize) -> Result<(), OutOfBounds> {
    if index < len {
        Ok(())
    } else {
        Err(OutOfBounds { index, len })
    }
}

/// Return a copy of `list` with the element at `index` removed.
pub fn delete_at<T: Clone>(list: &[T], index: usize) -> Result<Vec<T>, OutOfBounds> {
    check(index, list.len())?;
    let mut out = Vec::with_capacity(list.len() - 1);
    out.extend_from_slice(&list[..index]);
    out.extend_from_slice(&list[index + 1..]);
    Ok(out)
}

/// Return a copy of `list` with the elements at `a` and `b` exchanged.
///
/// The menus use this with adjacent indices for single-step "move up/down";
/// it is the only reordering primitive.
pub fn swap_at<T: Clone>(list: &[T], a: usize, b: usize) -> Result<Vec<T>, OutOfBounds> {
    check(a, list.len())?;
    check(b, list.len())?;
    let mut out = list.to_vec();
    out.swap(a, b);
    Ok(out)
}

/// Return a copy of `list` with `item` inserted immediately before `index`.
///
/// `index == list.len()` appends. Inserting `list[i]` at `i` duplicates a
/// record so that the copy immediately precedes the original.
pub fn insert_at<T: Clone>(list: &[T], item: T, index: usize) -> Result<Vec<T>, OutOfBounds> {
    if index > list.len() {
        return Err(OutOfBounds { index, len: list.len() });
    }
    let mut out = Vec::with_capacity(list.len() + 1);
    out.extend_from_slice(&list[..index]);
    out.push(item);
    out.extend_from_slice(&list[index..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into(), "d".into()]
    }

    #[test]
    fn test_delete_preserves_order() {
        let out = delete_at(&sample(), 1).unwrap();
        assert_eq!(out, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_delete_first_and_last() {
        assert_eq!(delete_at(&sample(), 0).unwrap(), vec!["b", "c", "d"]);
        assert_eq!(delete_at(&sample(), 3).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_delete_out_of_range() {
        let err = delete_at(&sample(), 4).unwrap_err();
        assert_eq!(err, OutOfBounds { index: 4, len: 4 });
    }

    #[test]
    fn test_swap_exchanges_only_two() {
        let out = swap_at(&sample(), 0, 2).unwrap();
        assert_eq!(out, vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_swap_is_involution() {
        let once = swap_at(&sample(), 1, 3).unwrap();
        let twice = swap_at(&once, 1, 3).unwrap();
        assert_eq!(twice, sample());
    }

    #[test]
    fn test_swap_same_index_is_identity() {
        assert_eq!(swap_at(&sample(), 2, 2).unwrap(), sample());
    }

    #[test]
    fn test_insert_shifts_tail_right() {
        let out = insert_at(&sample(), "x".to_string(), 1).unwrap();
        assert_eq!(out, vec!["a", "x", "b", "c", "d"]);
    }

    #[test]
    fn test_insert_at_end_appends() {
        let out = insert_at(&sample(), "x".to_string(), 4).unwrap();
        assert_eq!(out, vec!["a", "b", "c", "d", "x"]);
    }

    #[test]
    fn test_insert_past_end_fails() {
        assert!(insert_at(&sample(), "x".to_string(), 5).is_err());
    }

    #[test]
    fn test_duplicate_precedes_original() {
        let list = sample();
        let out = insert_at(&list, list[2].clone(), 2).unwrap();
        assert_eq!(out.len(), list.len() + 1);
        assert_eq!(out[2], "c");
        assert_eq!(out[3], "c");
        assert_eq!(&out[4..], &list[3..]);
    }
}
