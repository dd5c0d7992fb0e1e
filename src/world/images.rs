//! Sprite dimension lookup
//!
//! The image loader lives outside the physics core. All the core needs from
//! it is the pixel size of a sprite once it has finished loading.

use std::collections::HashMap;

/// Source of sprite pixel dimensions
pub trait SpriteSource {
    /// Width and height of the sprite, or `None` while it is still loading
    fn sprite_size(&self, asset_key: &str) -> Option<(f64, f64)>;
}

/// In-memory sprite size table
#[derive(Debug, Clone, Default)]
pub struct SpriteSizes {
    sizes: HashMap<String, (f64, f64)>,
}

impl SpriteSizes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a loaded sprite's size
    pub fn insert(&mut self, asset_key: impl Into<String>, width: f64, height: f64) {
        self.sizes.insert(asset_key.into(), (width, height));
    }

    pub fn with(mut self, asset_key: impl Into<String>, width: f64, height: f64) -> Self {
        self.insert(asset_key, width, height);
        self
    }
}

impl SpriteSource for SpriteSizes {
    fn sprite_size(&self, asset_key: &str) -> Option<(f64, f64)> {
        // A zero-sized image hasn't decoded yet
        self.sizes
            .get(asset_key)
            .copied()
            .filter(|&(w, h)| usable_size(w, h))
    }
}

/// Whether a reported sprite size can back a bounding box
pub fn usable_size(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}
