//! Visible region of the world
//!
//! The viewport is a world-space rectangle whose `position` is its top-left
//! corner. It can follow an entity, in which case `sync` recenters it on that
//! entity every frame.

use crate::geometry::{OrientedBox, Point, Vector};
use crate::physics::sat::{Collider, ColliderId, collision_data};

use super::entity::{Entity, EntityId};
use super::scene::Scene;

#[derive(Debug, Clone)]
pub struct ViewPort {
    width: f64,
    height: f64,
    position: Point,
    follow: Option<EntityId>,
    bbox: OrientedBox,
}

impl ViewPort {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            position: Point::ORIGIN,
            follow: None,
            bbox: Self::frame(Point::ORIGIN, width, height),
        }
    }

    fn frame(position: Point, width: f64, height: f64) -> OrientedBox {
        OrientedBox::from_extents(position, 0.0, height, 0.0, width, 0.0)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Top-left corner in world space
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.bbox.set_position(position);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.bbox = Self::frame(self.position, width, height);
    }

    #[inline]
    pub fn following(&self) -> Option<EntityId> {
        self.follow
    }

    /// Keep `id` centered from the next `sync` on
    pub fn center_on(&mut self, id: EntityId) {
        self.follow = Some(id);
    }

    /// Stop following
    pub fn release(&mut self) {
        self.follow = None;
    }

    /// Recenter on the followed entity
    ///
    /// Releases the entity if it has left the scene.
    pub fn sync(&mut self, scene: &Scene) {
        let Some(id) = self.follow else {
            return;
        };
        match scene.get(id) {
            Some(entity) => {
                let half = Vector::new_unchecked(self.width / 2.0, self.height / 2.0);
                let target = entity.position() + -half;
                self.set_position(target);
            }
            None => {
                log::debug!("viewport target {} left the scene", id);
                self.follow = None;
            }
        }
    }

    /// Whether a world point lies strictly inside the viewport
    pub fn test_point(&self, point: Point) -> bool {
        point.x() > self.position.x()
            && point.x() < self.position.x() + self.width
            && point.y() > self.position.y()
            && point.y() < self.position.y() + self.height
    }

    /// Whether any part of an entity is visible
    ///
    /// Entities without a box are tested by their position only.
    pub fn test_entity(&self, entity: &Entity) -> bool {
        if entity.bounding_box().is_some() {
            collision_data(entity, self).is_some()
        } else {
            self.test_point(entity.position())
        }
    }

    /// Convert a world point to viewport coordinates
    pub fn translate_in_viewport(&self, point: Point) -> Point {
        Point::ORIGIN + (point - self.position)
    }
}

impl Collider for ViewPort {
    fn collider_id(&self) -> ColliderId {
        ColliderId::Viewport
    }

    fn anchor(&self) -> Point {
        self.bbox.center()
    }

    fn collider_box(&self) -> Option<&OrientedBox> {
        Some(&self.bbox)
    }
}
