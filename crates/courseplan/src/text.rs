//! Small text helpers for listing courses and instructors.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

/// Joins items into an English list: `"A"`, `"A and B"`, `"A, B, and C"`.
///
/// `conjunction` is usually `"and"` or `"or"`.
pub fn humanize_list<T: Display>(items: &[T], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} {conjunction} {second}"),
        [init @ .., last] => {
            let init = init
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{init}, {conjunction} {last}")
        }
    }
}

/// Shortens a full name to its first and last words, dropping middle names.
pub fn simplify_name(name: &str) -> String {
    let mut tokens = name.split_whitespace();
    match (tokens.next(), tokens.last()) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(first), None) => first.to_string(),
        _ => String::new(),
    }
}

/// Removes duplicates, keeping the first occurrence of each item in order.
pub fn unique<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}
