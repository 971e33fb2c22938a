use serde::{Deserialize, Serialize};

use crate::render::TextMetrics;

use super::AxisLabel;

/// Runtime metrics exposed by the per-engine label cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub populated: bool,
}

/// Cache validity key: the engine change version, the surface size the
/// labels were laid out for, and the surface's metrics of a reference text.
///
/// The reference metrics tell surfaces with different text measurement
/// apart, so switching backends at an unchanged size re-measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct LabelCacheKey {
    version: u64,
    width_bits: u64,
    height_bits: u64,
    reference_bits: (u64, u64),
}

impl LabelCacheKey {
    pub(super) fn new(version: u64, width: f64, height: f64, reference: TextMetrics) -> Self {
        Self {
            version,
            width_bits: width.to_bits(),
            height_bits: height.to_bits(),
            reference_bits: (reference.width.to_bits(), reference.height.to_bits()),
        }
    }
}

/// Measured sample label sizes and the labels generated from them.
#[derive(Debug, Clone, PartialEq, Default)]
pub(super) struct LabelLayout {
    pub(super) horizontal_metrics: TextMetrics,
    pub(super) vertical_metrics: TextMetrics,
    pub(super) horizontal: Vec<AxisLabel>,
    pub(super) vertical_primary: Vec<AxisLabel>,
    pub(super) vertical_secondary: Vec<AxisLabel>,
}

/// Single-entry cache; any key change drops the entry.
#[derive(Debug, Default)]
pub(super) struct LabelCache {
    entry: Option<(LabelCacheKey, LabelLayout)>,
    hits: u64,
    misses: u64,
}

impl LabelCache {
    pub(super) fn get(&mut self, key: LabelCacheKey) -> Option<LabelLayout> {
        match &self.entry {
            Some((cached_key, layout)) if *cached_key == key => {
                self.hits = self.hits.saturating_add(1);
                Some(layout.clone())
            }
            _ => None,
        }
    }

    pub(super) fn insert(&mut self, key: LabelCacheKey, layout: LabelLayout) {
        self.misses = self.misses.saturating_add(1);
        self.entry = Some((key, layout));
    }

    pub(super) fn clear(&mut self) {
        self.entry = None;
    }

    pub(super) fn stats(&self) -> LabelCacheStats {
        LabelCacheStats {
            hits: self.hits,
            misses: self.misses,
            populated: self.entry.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelCache, LabelCacheKey, LabelLayout};
    use crate::render::TextMetrics;

    #[test]
    fn entry_is_only_served_for_matching_key() {
        let reference = TextMetrics::new(60.0, 12.0);
        let mut cache = LabelCache::default();
        let key = LabelCacheKey::new(3, 200.0, 100.0, reference);
        cache.insert(key, LabelLayout::default());

        assert!(cache.get(key).is_some());
        assert!(cache.get(LabelCacheKey::new(4, 200.0, 100.0, reference)).is_none());
        assert!(cache.get(LabelCacheKey::new(3, 201.0, 100.0, reference)).is_none());
        assert!(
            cache
                .get(LabelCacheKey::new(3, 200.0, 100.0, TextMetrics::new(72.0, 12.0)))
                .is_none()
        );

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
        cache.clear();
        assert!(!cache.stats().populated);
    }
}
