//! Per-tick motion and collision resolution
//!
//! A tick runs in fixed phases, each one completed for the whole scene before
//! the next starts:
//!
//! 1. create missing bounding boxes for sprites that have finished loading
//! 2. group moving colliders with their broad phase candidates
//! 3. integrate every dynamic entity
//! 4. push moving colliders out of blocking tiles
//! 5. resolve moving colliders against their candidates
//!
//! Motion is applied unconditionally and corrected afterwards; there is no
//! rollback. Each resolution only moves the tested entity, so simultaneous
//! collisions resolve in scene order.

use crate::geometry::{OrientedBox, Point, Ray, Vector, find_angle};
use crate::settings::PhysicsSettings;
use crate::world::{
    CollisionResponse, Entity, Projectile, Scene, SpriteSource, TileMap, usable_size,
};

use super::bounds::BoundingBoxBuilder;
use super::broad_phase::BroadPhase;
use super::intersection::intersect_segment_box;
use super::sat::{Collider, CollisionData, collision_data};

/// Drives the physics of a scene
#[derive(Debug, Clone)]
pub struct PhysicsProcessor {
    settings: PhysicsSettings,
    broad_phase: BroadPhase,
    bounds: BoundingBoxBuilder,
}

impl Default for PhysicsProcessor {
    fn default() -> Self {
        Self::new(PhysicsSettings::default(), BoundingBoxBuilder::default())
    }
}

impl PhysicsProcessor {
    pub fn new(settings: PhysicsSettings, bounds: BoundingBoxBuilder) -> Self {
        Self {
            broad_phase: BroadPhase::new(settings.cell_size),
            settings,
            bounds,
        }
    }

    #[inline]
    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    #[inline]
    pub fn broad_phase(&self) -> &BroadPhase {
        &self.broad_phase
    }

    #[inline]
    pub fn bounds(&self) -> &BoundingBoxBuilder {
        &self.bounds
    }

    pub fn bounds_mut(&mut self) -> &mut BoundingBoxBuilder {
        &mut self.bounds
    }

    /// Limit a frame delta to `[0, max_delta]` seconds
    ///
    /// NaN counts as no time passing.
    pub fn clamp_delta(&self, delta: f64) -> f64 {
        let clamped = if delta.is_nan() {
            0.0
        } else {
            delta.max(0.0).min(self.settings.max_delta)
        };
        if clamped != delta {
            log::warn!("Clamped frame delta {}s to {}s", delta, clamped);
        }
        clamped
    }

    /// Advance the scene by `delta` seconds
    ///
    /// Returns every collision that was resolved, tile hits first.
    pub fn tick<S>(
        &self,
        scene: &mut Scene,
        sprites: &S,
        tiles: Option<&TileMap>,
        delta: f64,
    ) -> Vec<CollisionData>
    where
        S: SpriteSource + ?Sized,
    {
        let delta = self.clamp_delta(delta);
        self.refresh_boxes(scene, sprites);

        let groups = self.broad_phase.groups(scene.entities());
        let entities = scene.entities_mut();

        for entity in entities.iter_mut() {
            integrate(entity, delta);
        }

        let mut resolved = Vec::new();

        if let Some(map) = tiles {
            for group in &groups {
                let entity = &mut entities[group.subject];
                let Some(radius) = entity.bounding_box().map(OrientedBox::radius) else {
                    continue;
                };
                for tile in map.blocking_tiles_near(entity.position(), radius) {
                    if let Some(data) = collision_data(&*entity, &tile) {
                        resolve(entity, &data, tile.anchor());
                        resolved.push(data);
                    }
                }
            }
        }

        for group in &groups {
            for &target in &group.targets {
                let (tested, other) = (&entities[group.subject], &entities[target]);
                if !tested.collidable || !other.collidable {
                    continue;
                }
                let Some(data) = collision_data(tested, other) else {
                    continue;
                };
                let anchor = other.anchor();
                resolve(&mut entities[group.subject], &data, anchor);
                resolved.push(data);
            }
        }

        resolved
    }

    /// Give a box to every entity whose sprite size is now known
    pub fn refresh_boxes<S>(&self, scene: &mut Scene, sprites: &S)
    where
        S: SpriteSource + ?Sized,
    {
        for entity in scene.entities_mut() {
            if entity.bounding_box().is_some() {
                continue;
            }
            let Some((width, height)) = sprites.sprite_size(entity.asset_key()) else {
                continue;
            };
            if !usable_size(width, height) {
                log::warn!(
                    "Ignoring {}x{} sprite size for {} ({})",
                    width,
                    height,
                    entity.id(),
                    entity.asset_key()
                );
                continue;
            }
            let bbox = self.bounds.build(
                entity.asset_key(),
                width,
                height,
                entity.position(),
                entity.rotation(),
            );
            log::debug!(
                "Created {}x{} box for {} ({})",
                bbox.width(),
                bbox.height(),
                entity.id(),
                entity.asset_key()
            );
            entity.set_bounding_box(Some(bbox));
        }
    }

    /// Where a ray enters and leaves a box, using the configured ray length
    pub fn ray_hits(&self, ray: &Ray, bbox: &OrientedBox) -> Vec<Point> {
        intersect_segment_box(&ray.to_segment(self.settings.ray_length), bbox)
    }

    /// Whether a projectile has outlived the configured lifetime
    pub fn projectile_expired(&self, projectile: &Projectile, now: f64) -> bool {
        projectile.ttl_with(now, self.settings.projectile_ttl_ms) <= 0.0
    }
}

/// Move a dynamic entity along its direction
fn integrate(entity: &mut Entity, delta: f64) {
    let Some(motion) = entity.motion else {
        return;
    };
    let step = motion.direction.normalize_or_zero() * (motion.speed * delta);
    if step.x() == 0.0 && step.y() == 0.0 {
        return;
    }
    entity.set_position(entity.position() + step);
}

fn resolve(entity: &mut Entity, data: &CollisionData, target_anchor: Point) {
    match entity.response {
        CollisionResponse::PushApart => push_apart(entity, data, target_anchor),
        CollisionResponse::Rebound => rebound(entity, data, target_anchor),
    }
    log::debug!(
        "Resolved {:?} against {:?}: overlap {:.3}, now at ({:.3}, {:.3})",
        data.tested,
        data.target,
        data.overlap_amount(),
        entity.position().x(),
        entity.position().y()
    );
}

/// The collision axis, signed to point from the target towards the entity
fn outward_axis(position: Point, data: &CollisionData, target_anchor: Point) -> Vector {
    let axis = data.axis();
    let pushed = position + axis * data.overlap_amount();
    // The axis sign is arbitrary; flip it if it pushed the pair together
    if pushed.distance(target_anchor) < position.distance(target_anchor) {
        -axis
    } else {
        axis
    }
}

/// Move the entity out along the collision axis, away from the target
fn push_apart(entity: &mut Entity, data: &CollisionData, target_anchor: Point) {
    let position = entity.position();
    let normal = outward_axis(position, data, target_anchor);
    entity.set_position(position + normal * data.overlap_amount());
}

/// Separate the entity, then reflect its direction if it was heading into the target
///
/// The speed is scaled by the angle between the old and new direction over
/// 180°, so head-on bounces keep their speed and glancing ones lose most of it.
/// An entity that is already moving away keeps its direction and speed.
fn rebound(entity: &mut Entity, data: &CollisionData, target_anchor: Point) {
    let Some(mut motion) = entity.motion else {
        return push_apart(entity, data, target_anchor);
    };
    let position = entity.position();
    let normal = outward_axis(position, data, target_anchor);
    entity.set_position(position + normal * data.overlap_amount());

    if motion.direction.dot(normal) >= 0.0 {
        return;
    }
    let reflected = motion.direction.reflect(normal);
    let angle = find_angle(motion.direction, reflected).unwrap_or(0.0);
    motion.direction = reflected;
    motion.speed *= angle / 180.0;
    entity.motion = Some(motion);
}
