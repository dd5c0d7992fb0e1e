//! Crate Physics demo
//!
//! Builds a small level, runs two seconds of simulated frames and logs what
//! happened. Run with `RUST_LOG=debug` to see every box creation and
//! collision.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Crate Physics demo starting...");

    if let Err(e) = demo::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The engine drives the processor itself on the web
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use crate_physics::geometry::{Point, Vector};
    use crate_physics::physics::{BoundingBoxBuilder, PhysicsProcessor, intersect_projectile_box};
    use crate_physics::world::{
        DeltaTimer, EntityKind, EntitySnapshot, Projectile, Scene, SpriteSizes, Tile, TileMap,
        ViewPort,
    };
    use crate_physics::{PhysicsSettings, Result};

    const BOX_SPECS: &str = r#"{
        "tree-1": { "top": 20, "bottom": 20, "left": 15, "right": 15 },
        "car-green": { "top": 50, "bottom": 50, "left": 25, "right": 25 }
    }"#;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run() -> Result<()> {
        let settings = PhysicsSettings::default();
        let processor =
            PhysicsProcessor::new(settings.clone(), BoundingBoxBuilder::from_json(BOX_SPECS)?);

        let sprites = SpriteSizes::new()
            .with("crate", 64.0, 64.0)
            .with("car-green", 64.0, 128.0)
            .with("tree-1", 256.0, 256.0)
            .with("soldier", 32.0, 32.0)
            .with("grenade", 16.0, 16.0);

        // A 40x40 map walled off along its top row
        let mut map = TileMap::new(40, 40, settings.tile_size);
        let wall = vec![
            Tile {
                blocking: true,
                ..Tile::default()
            };
            40
        ];
        map.apply_tile_data(&[wall]);

        let mut scene = Scene::new();
        let mut rng = Pcg32::seed_from_u64(0xC0FFEE);
        for i in 0..30 {
            let kind = match i % 3 {
                0 => EntityKind::CrateBig,
                1 => EntityKind::CarGreen,
                _ => EntityKind::Tree1,
            };
            let position = Point::new(
                rng.random_range(64.0..1216.0),
                rng.random_range(64.0..1216.0),
            )?;
            let rotation = rng.random_range(0.0..360.0);
            let id = scene.next_entity_id();
            scene.add(kind.spawn(id, position, rotation));
        }

        let player: EntitySnapshot = serde_json::from_str(
            r#"{
                "type": "Soldier",
                "networkUid": "player-1",
                "position": { "x": 640, "y": 640 },
                "direction": { "x": 0, "y": -1 },
                "speed": 200
            }"#,
        )?;
        let player_id = scene.next_entity_id();
        scene.add(player.spawn(player_id));

        let grenade_id = scene.next_entity_id();
        let mut grenade = EntityKind::Grenade.spawn(grenade_id, Point::new(600.0, 700.0)?, 0.0);
        if let Some(motion) = grenade.motion.as_mut() {
            motion.direction = Vector::new(-1.0, -0.5)?;
        }
        scene.add(grenade);

        let mut viewport = ViewPort::new(800.0, 600.0);
        viewport.center_on(player_id);

        let mut timer = DeltaTimer::new(0.0);
        let mut bullet = Projectile::bullet(Point::new(640.0, 640.0)?, Vector::new(1.0, 0.2)?, 0.0)?;

        let mut collisions = 0;
        let mut bullet_hits = 0;
        for frame in 1..=120 {
            let now = frame as f64 * FRAME_MS;
            timer.update(now);
            collisions += processor.tick(&mut scene, &sprites, Some(&map), timer.delta()).len();
            viewport.sync(&scene);

            if !processor.projectile_expired(&bullet, now) {
                for target in scene.iter().filter(|e| e.collidable && e.id() != player_id) {
                    if let Some(bbox) = target.bounding_box() {
                        if !intersect_projectile_box(&bullet, bbox, now).is_empty() {
                            log::info!("Bullet hit {} ({}) at frame {}", target.id(), target.asset_key(), frame);
                            bullet_hits += 1;
                        }
                    }
                }
                bullet.update(now);
            }
        }

        let visible = scene.iter().filter(|e| viewport.test_entity(e)).count();
        if let Some(p) = scene.get(player_id) {
            log::info!("Player ended at ({:.1}, {:.1})", p.position().x(), p.position().y());
        }
        log::info!(
            "{} entities, {} collisions resolved, {} bullet hits, {} visible",
            scene.len(),
            collisions,
            bullet_hits,
            visible
        );
        println!("\n✓ Simulated 120 frames: {} collisions resolved", collisions);
        Ok(())
    }
}
