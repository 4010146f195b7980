// ABOUTME: Process-wide image cache keyed by food log entry identifier
// ABOUTME: Concurrent map with per-key atomic insert/remove and no expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use dashmap::DashMap;
use image::DynamicImage;
use std::sync::Arc;
use tracing::debug;

/// Shared in-memory image cache
///
/// Cloning yields another handle to the same map. Entries live until removed
/// or until [`ImageCache::clear`]; there is no TTL and no capacity bound.
/// Operations on one key are atomic; nothing spans keys.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    entries: Arc<DashMap<String, Arc<DynamicImage>>>,
}

impl ImageCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached image for `entry_id`
    #[must_use]
    pub fn get(&self, entry_id: &str) -> Option<Arc<DynamicImage>> {
        let hit = self.entries.get(entry_id).map(|entry| Arc::clone(entry.value()));
        debug!(entry_id, hit = hit.is_some(), "Image cache lookup");
        hit
    }

    /// Store (or overwrite) the image for `entry_id`
    pub fn insert(&self, entry_id: impl Into<String>, image: Arc<DynamicImage>) {
        self.entries.insert(entry_id.into(), image);
    }

    /// Remove the image for `entry_id`, reporting whether one was cached
    pub fn remove(&self, entry_id: &str) -> bool {
        self.entries.remove(entry_id).is_some()
    }

    /// Drop every cached image
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Whether `entry_id` has a cached image
    #[must_use]
    pub fn contains(&self, entry_id: &str) -> bool {
        self.entries.contains_key(entry_id)
    }

    /// Number of cached images
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn image(width: u32) -> Arc<DynamicImage> {
        Arc::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(width, 1, Rgb([0, 0, 0]))))
    }

    #[test]
    fn test_insert_overwrites_same_key() {
        let cache = ImageCache::new();
        cache.insert("e1", image(10));
        cache.insert("e1", image(20));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("e1").unwrap().width(), 20);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = ImageCache::new();
        let other = cache.clone();
        other.insert("pending-1", image(5));

        assert!(cache.contains("pending-1"));
        assert!(cache.remove("pending-1"));
        assert!(!other.remove("pending-1"));
        assert!(other.is_empty());
    }

    #[test]
    fn test_clear_removes_everything() {
        let cache = ImageCache::new();
        cache.insert("a", image(1));
        cache.insert("b", image(2));
        cache.clear();

        assert!(cache.get("a").is_none());
        assert!(cache.is_empty());
    }
}
