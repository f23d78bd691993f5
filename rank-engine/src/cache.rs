//! FILENAME: rank-engine/src/cache.rs
//! Tooltip Cache - Generation-gated memo table for rank annotations.
//!
//! The cache is designed for:
//! - Cheap re-sorts: sorting never recomputes or changes tooltip text
//! - Wholesale invalidation: a peer-set change drops every entry at once
//! - Bounded memory: at most rows x columns entries per generation
//!
//! Entries are keyed by (row label, column name) and tagged with the
//! peer-set generation they were computed under. The generation counter
//! increments exactly when the peer set changes; an entry from a prior
//! generation is never served.

use std::collections::HashMap;

use crate::annotate::Annotation;
use crate::error::ViewError;

/// Key of one cached tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TooltipKey {
    row: String,
    column: String,
}

/// One rendered tooltip and the generation it was computed under.
#[derive(Debug, Clone)]
struct CachedTooltip {
    text: String,
    generation: u64,
}

/// Memo table for rendered rank annotations.
#[derive(Debug, Default)]
pub struct TooltipCache {
    entries: HashMap<TooltipKey, CachedTooltip>,
    generation: u64,
}

impl TooltipCache {
    pub fn new() -> Self {
        TooltipCache {
            entries: HashMap::new(),
            generation: 0,
        }
    }

    /// The live peer-set generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops every entry and advances the generation. Called exactly when
    /// the peer set changes; sort-only and visibility-only changes must not
    /// reach this.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }

    /// Returns the cached tooltip text for (row, column), computing and
    /// storing it on first access under the current generation.
    ///
    /// `generation` is the caller's view of the live generation; a mismatch
    /// with the cache's own counter aborts the lookup without touching any
    /// state (see `ViewError::GenerationMismatch`).
    pub fn get_or_compute(
        &mut self,
        row: &str,
        column: &str,
        generation: u64,
        compute: impl FnOnce() -> Annotation,
    ) -> Result<&str, ViewError> {
        if generation != self.generation {
            return Err(ViewError::GenerationMismatch {
                state: generation,
                cache: self.generation,
            });
        }

        let key = TooltipKey {
            row: row.to_string(),
            column: column.to_string(),
        };
        let current = self.generation;
        let entry = self.entries.entry(key).or_insert_with(|| CachedTooltip {
            text: compute().to_string(),
            generation: current,
        });
        // invalidate_all() clears wholesale, so a surviving entry is always
        // from the live generation.
        debug_assert_eq!(entry.generation, current);
        Ok(&entry.text)
    }

    /// Number of entries held under the current generation.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(row: &str, rank: usize, total: usize) -> Annotation {
        Annotation::Ranked {
            row: row.to_string(),
            column: "X".to_string(),
            rank,
            total,
        }
    }

    #[test]
    fn test_miss_computes_and_stores() {
        let mut cache = TooltipCache::new();
        let text = cache
            .get_or_compute("Ale", "X", 0, || ranked("Ale", 1, 2))
            .unwrap()
            .to_string();
        assert_eq!(text, "**Ale / X**\n1. farligaste av 2\n");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_hit_does_not_recompute() {
        let mut cache = TooltipCache::new();
        cache
            .get_or_compute("Ale", "X", 0, || ranked("Ale", 1, 2))
            .unwrap();
        // A hit must return the stored text; the closure would produce a
        // different rank if it ran.
        let text = cache
            .get_or_compute("Ale", "X", 0, || ranked("Ale", 9, 9))
            .unwrap();
        assert_eq!(text, "**Ale / X**\n1. farligaste av 2\n");
    }

    #[test]
    fn test_invalidate_all_drops_entries_and_bumps_generation() {
        let mut cache = TooltipCache::new();
        cache
            .get_or_compute("Ale", "X", 0, || ranked("Ale", 1, 2))
            .unwrap();
        cache.invalidate_all();
        assert_eq!(cache.generation(), 1);
        assert!(cache.is_empty());

        let text = cache
            .get_or_compute("Ale", "X", 1, || ranked("Ale", 1, 1))
            .unwrap();
        assert_eq!(text, "**Ale / X**\n1. farligaste av 1\n");
    }

    #[test]
    fn test_generation_mismatch_fails_fast() {
        let mut cache = TooltipCache::new();
        cache.invalidate_all();
        let result = cache.get_or_compute("Ale", "X", 0, || ranked("Ale", 1, 2));
        assert!(matches!(
            result,
            Err(ViewError::GenerationMismatch { state: 0, cache: 1 })
        ));
        assert!(cache.is_empty());
    }
}
