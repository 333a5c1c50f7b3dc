use crate::geometry::Size;

/// Everything gradient geometry depends on. `revision` is bumped when colors
/// change so that a recolor invalidates like a resize does.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CacheKey {
    pub size: Size,
    pub radius: f64,
    pub revision: u64,
}

/// Single-entry memo for size-derived paint objects.
///
/// Rebuilds whenever the container size or the arc radius differ from the
/// cached entry, never on a plain redraw.
#[derive(Debug, Clone)]
pub struct GradientCache<V> {
    entry: Option<(CacheKey, V)>,
}

impl<V> Default for GradientCache<V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<V> GradientCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fresh(&self, key: CacheKey) -> bool {
        self.entry.as_ref().is_some_and(|(cached, _)| *cached == key)
    }

    pub fn get_or_build(&mut self, key: CacheKey, build: impl FnOnce() -> V) -> &V {
        if !self.is_fresh(key) {
            self.entry = None;
        }
        &self.entry.get_or_insert_with(|| (key, build())).1
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(side: f64, radius: f64) -> CacheKey {
        CacheKey {
            size: Size::square(side),
            radius,
            revision: 0,
        }
    }

    #[test]
    fn test_reuses_entry_for_same_key() {
        let mut cache = GradientCache::new();
        let mut builds = 0;
        for _ in 0..3 {
            cache.get_or_build(key(100.0, 20.0), || {
                builds += 1;
                "g"
            });
        }
        assert_eq!(builds, 1);
    }

    #[test]
    fn test_rebuilds_on_radius_or_size_change() {
        let mut cache = GradientCache::new();
        assert_eq!(*cache.get_or_build(key(100.0, 20.0), || 1), 1);
        assert_eq!(*cache.get_or_build(key(100.0, 30.0), || 2), 2);
        assert_eq!(*cache.get_or_build(key(120.0, 30.0), || 3), 3);
        assert!(cache.is_fresh(key(120.0, 30.0)));
        assert!(!cache.is_fresh(key(100.0, 20.0)));
    }

    #[test]
    fn test_revision_and_invalidate() {
        let mut cache = GradientCache::new();
        cache.get_or_build(key(100.0, 20.0), || 1);
        let bumped = CacheKey {
            revision: 1,
            ..key(100.0, 20.0)
        };
        assert!(!cache.is_fresh(bumped));

        cache.invalidate();
        assert!(!cache.is_fresh(key(100.0, 20.0)));
        assert_eq!(*cache.get_or_build(key(100.0, 20.0), || 4), 4);
    }
}
