//! Bounding box construction from sprite metadata
//!
//! By default an entity's box matches its sprite's pixel size. Sprites with a
//! lot of transparent space (tree canopies, cars seen from above) can get a
//! tighter box from a per-asset inset spec, loaded from JSON such as:
//!
//! ```json
//! { "tree-1": { "top": 20, "bottom": 20, "left": 15, "right": 15 } }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{OrientedBox, Point};

/// Distances in pixels from the sprite's anchor to each edge of its box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxInsets {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Builds oriented boxes for entities, honoring per-asset insets
#[derive(Debug, Clone, Default)]
pub struct BoundingBoxBuilder {
    specs: HashMap<String, BoxInsets>,
}

impl BoundingBoxBuilder {
    pub fn new(specs: HashMap<String, BoxInsets>) -> Self {
        Self { specs }
    }

    /// Parse inset specs from a JSON object keyed by asset
    pub fn from_json(json: &str) -> Result<Self> {
        let specs: HashMap<String, BoxInsets> = serde_json::from_str(json)?;
        log::info!("Loaded {} bounding box specs", specs.len());
        Ok(Self::new(specs))
    }

    pub fn insert(&mut self, asset_key: impl Into<String>, insets: BoxInsets) {
        self.specs.insert(asset_key.into(), insets);
    }

    pub fn insets(&self, asset_key: &str) -> Option<&BoxInsets> {
        self.specs.get(asset_key)
    }

    /// Build the box for a sprite anchored at `position`
    ///
    /// Without a spec the box covers the whole `width` x `height` sprite.
    pub fn build(
        &self,
        asset_key: &str,
        width: f64,
        height: f64,
        position: Point,
        rotation: f64,
    ) -> OrientedBox {
        match self.specs.get(asset_key) {
            Some(i) => {
                OrientedBox::from_extents(position, i.top, i.bottom, i.left, i.right, rotation)
            }
            None => OrientedBox::new(position, width, height, rotation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn test_without_spec_matches_sprite() {
        let builder = BoundingBoxBuilder::default();
        let bbox = builder.build("crate", 64.0, 32.0, pt(100.0, 50.0), 0.0);
        assert_eq!(bbox.vertices()[0], pt(68.0, 34.0));
        assert_eq!(bbox.vertices()[2], pt(132.0, 66.0));
        assert_eq!(bbox.center_offset(), Vector::ZERO);
    }

    #[test]
    fn test_spec_insets_and_offset() {
        let builder = BoundingBoxBuilder::from_json(
            r#"{ "car-green": { "top": 10, "bottom": 30, "left": 20, "right": 20 } }"#,
        )
        .unwrap();
        let bbox = builder.build("car-green", 128.0, 128.0, pt(0.0, 0.0), 0.0);
        let v = bbox.vertices();
        assert_eq!(v[0], pt(-20.0, -10.0));
        assert_eq!(v[1], pt(20.0, -10.0));
        assert_eq!(v[2], pt(20.0, 30.0));
        assert_eq!(v[3], pt(-20.0, 30.0));
        assert_eq!(bbox.center_offset(), Vector::new(0.0, 10.0).unwrap());
    }

    #[test]
    fn test_rotation_applied_after_insets() {
        let mut builder = BoundingBoxBuilder::default();
        builder.insert(
            "tree-1",
            BoxInsets {
                top: 5.0,
                bottom: 5.0,
                left: 10.0,
                right: 10.0,
            },
        );
        let bbox = builder.build("tree-1", 256.0, 256.0, pt(0.0, 0.0), 90.0);
        assert_eq!(bbox.rotation(), 90.0);
        // 20 wide, 10 tall, turned on its side
        let xs: Vec<f64> = bbox.vertices().iter().map(|p| p.x()).collect();
        let span = xs.iter().cloned().fold(f64::MIN, f64::max)
            - xs.iter().cloned().fold(f64::MAX, f64::min);
        assert!((span - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_specs() {
        assert!(BoundingBoxBuilder::from_json(r#"{ "x": { "top": 1 } }"#).is_err());
        assert!(BoundingBoxBuilder::from_json("not json").is_err());
    }
}
