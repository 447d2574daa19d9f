//! Set difference keyed on a caller-chosen field

use crate::error::{Error, Result, Side};
use std::collections::HashSet;

/// Outcome of a keyed comparison between two collections
///
/// `added` holds elements present only in the desired input, in desired
/// order; `removed` holds elements present only in the observed input, in
/// observed order. Elements present in both appear in neither.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedDiff<T> {
    /// Elements to add, cloned from the desired input
    pub added: Vec<T>,
    /// Elements to remove, cloned from the observed input
    pub removed: Vec<T>,
}

impl<T> KeyedDiff<T> {
    /// True if the two inputs covered the same key set
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compute which elements to add and remove to turn `observed` into `desired`
///
/// Elements are compared solely by the key `key` extracts; two elements with
/// the same key are treated as the same element even if other fields differ.
/// Runs in O(n + m) time using hashed key lookups. Order within each output
/// follows the corresponding input.
///
/// # Errors
///
/// Returns [`Error::DuplicateKey`] if either input contains two elements
/// with the same key, naming the input and the offending key. Inputs are a
/// set keyed by `key`; a duplicate means the caller's data is already
/// malformed and any diff over it would be ambiguous.
///
/// # Examples
///
/// ```
/// use warden_diff::diff_by_key;
///
/// let observed = vec!["10.0.0.0/8".to_string(), "9.9.9.9/32".to_string()];
/// let desired = vec!["10.0.0.0/8".to_string(), "1.2.3.0/24".to_string()];
///
/// let diff = diff_by_key(&observed, &desired, |s| s.as_str()).unwrap();
/// assert_eq!(diff.added, vec!["1.2.3.0/24".to_string()]);
/// assert_eq!(diff.removed, vec!["9.9.9.9/32".to_string()]);
/// ```
pub fn diff_by_key<T, F>(observed: &[T], desired: &[T], key: F) -> Result<KeyedDiff<T>>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let observed_keys = key_set(observed, &key, Side::Observed)?;
    let desired_keys = key_set(desired, &key, Side::Desired)?;

    let added = desired
        .iter()
        .filter(|item| !observed_keys.contains(key(item)))
        .cloned()
        .collect();
    let removed = observed
        .iter()
        .filter(|item| !desired_keys.contains(key(item)))
        .cloned()
        .collect();

    Ok(KeyedDiff { added, removed })
}

fn key_set<'a, T, F>(items: &'a [T], key: &F, side: Side) -> Result<HashSet<&'a str>>
where
    F: Fn(&T) -> &str,
{
    let mut keys = HashSet::with_capacity(items.len());
    for item in items {
        let k = key(item);
        if !keys.insert(k) {
            return Err(Error::DuplicateKey {
                side,
                key: k.to_string(),
            });
        }
    }
    Ok(keys)
}
