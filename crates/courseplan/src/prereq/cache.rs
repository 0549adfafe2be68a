//! Memoization of rendered prerequisite text.

use super::render::serialize;
use super::types::PrerequisiteClause;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Structural identity of a clause tree.
///
/// Two clauses get the same key iff they have the same shape, operators and
/// course ids, regardless of where they were allocated.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct ClauseKey([u8; 32]);

impl ClauseKey {
    /// Computes the key by hashing a length-prefixed pre-order encoding of
    /// the tree.
    pub fn of(clause: &PrerequisiteClause) -> Self {
        let mut hasher = Sha256::new();
        feed(&mut hasher, clause);
        Self(hasher.finalize().into())
    }
}

fn feed(hasher: &mut Sha256, clause: &PrerequisiteClause) {
    match clause {
        PrerequisiteClause::Leaf(course) => {
            hasher.update(b"L");
            hasher.update((course.id.len() as u64).to_le_bytes());
            hasher.update(course.id.as_bytes());
        }
        PrerequisiteClause::Compound { operator, children } => {
            let tag = operator.as_str();
            hasher.update(b"C");
            hasher.update((tag.len() as u64).to_le_bytes());
            hasher.update(tag.as_bytes());
            hasher.update((children.len() as u64).to_le_bytes());
            for child in children {
                feed(hasher, child);
            }
        }
    }
}

impl fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 bytes are plenty to tell keys apart in logs
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Hit/miss counters for a [`RenderCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Thread-safe cache of rendered prerequisite text.
///
/// Rendering is pure, so entries never go stale; `clear` exists only to bound
/// memory when the catalog is reloaded.
#[derive(Default)]
pub struct RenderCache {
    entries: DashMap<ClauseKey, Arc<str>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rendered text of `clause`, rendering it on first use.
    pub fn get_or_render(&self, clause: &PrerequisiteClause) -> Arc<str> {
        let key = ClauseKey::of(clause);
        if let Some(text) = self.entries.get(&key).map(|entry| Arc::clone(entry.value())) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return text;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let rendered: Arc<str> = Arc::from(serialize(clause));
        debug!("Rendered prerequisite clause {key} ({} chars)", rendered.len());
        Arc::clone(self.entries.entry(key).or_insert(rendered).value())
    }

    /// Returns the cached text for `clause` without rendering.
    pub fn get(&self, clause: &PrerequisiteClause) -> Option<Arc<str>> {
        self.entries
            .get(&ClauseKey::of(clause))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Removes every entry and resets the counters.
    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
