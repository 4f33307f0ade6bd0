//! Processing statistics tracking.
//!
//! Thread-safe per-category counters updated by every worker as it records
//! its target. A category counter only moves once the line is on disk; a
//! failed write is counted as unrecorded instead.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use crate::classify::Category;

/// Thread-safe processing statistics tracker.
///
/// All categories are initialized to zero on creation, so the map is never
/// mutated afterwards and can be shared across tasks with `Arc`.
pub struct ProcessingStats {
    categories: HashMap<Category, AtomicUsize>,
    fatal: AtomicUsize,
    unrecorded: AtomicUsize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut categories = HashMap::new();
        for category in Category::iter() {
            categories.insert(category, AtomicUsize::new(0));
        }

        ProcessingStats {
            categories,
            fatal: AtomicUsize::new(0),
            unrecorded: AtomicUsize::new(0),
        }
    }

    /// Increment the counter for a category.
    pub fn increment(&self, category: Category) {
        if let Some(counter) = self.categories.get(&category) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                category
            );
        }
    }

    /// Increment the fatal-error counter (fatal outcomes are also counted in their category).
    pub fn increment_fatal(&self) {
        self.fatal.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the counter of targets whose result line could not be written.
    pub fn increment_unrecorded(&self) {
        self.unrecorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_count(&self, category: Category) -> usize {
        self.categories
            .get(&category)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn fatal_count(&self) -> usize {
        self.fatal.load(Ordering::SeqCst)
    }

    pub fn unrecorded_count(&self) -> usize {
        self.unrecorded.load(Ordering::SeqCst)
    }

    /// Sum over all categories; equals the number of recorded targets.
    pub fn total(&self) -> usize {
        self.categories
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
