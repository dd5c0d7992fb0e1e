//! Projectiles travelling along rays
//!
//! A projectile's position is never stored. It is derived from the firing
//! time, so a peer that receives the same ray, speed and timestamp places the
//! projectile identically without replaying any ticks.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use crate::consts::{BULLET_SPEED, PROJECTILE_TTL_MS};
use crate::error::Result;
use crate::geometry::{LineSegment, Point, Ray, Vector};

/// A projectile fired along a ray
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    ray: Ray,
    /// Units per second
    speed: f64,
    /// Firing time in milliseconds
    timestamp: f64,
    /// Time of the last hit test, in milliseconds
    last_update: f64,
    /// Entity used to draw the projectile
    pub entity: Option<EntityId>,
    pub damage: f64,
}

impl Projectile {
    pub fn new(ray: Ray, speed: f64, timestamp: f64) -> Self {
        Self {
            ray,
            speed,
            timestamp,
            last_update: timestamp,
            entity: None,
            damage: 0.0,
        }
    }

    /// A rifle bullet fired at `timestamp`
    pub fn bullet(origin: Point, direction: Vector, timestamp: f64) -> Result<Self> {
        Ok(Self::new(Ray::new(origin, direction)?, BULLET_SPEED, timestamp))
    }

    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_damage(mut self, damage: f64) -> Self {
        self.damage = damage;
        self
    }

    #[inline]
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Speed is fixed for the projectile's lifetime; fire a new one to change it
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    #[inline]
    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    /// Position at `time` (milliseconds)
    pub fn position_at(&self, time: f64) -> Point {
        let elapsed = (time - self.timestamp) / 1000.0;
        self.ray.point_at(self.speed * elapsed)
    }

    /// Path covered since the last update
    pub fn travel_segment(&self, now: f64) -> LineSegment {
        LineSegment::new(self.position_at(self.last_update), self.position_at(now))
    }

    /// Mark the hit test at `now` as done
    pub fn update(&mut self, now: f64) {
        self.last_update = now;
    }

    /// Milliseconds left before the projectile expires
    pub fn ttl(&self, now: f64) -> f64 {
        self.ttl_with(now, PROJECTILE_TTL_MS)
    }

    pub fn ttl_with(&self, now: f64, lifetime_ms: f64) -> f64 {
        lifetime_ms - (now - self.timestamp)
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.ttl(now) <= 0.0
    }
}
