//! The fire wall: a band sweeping in from the left that speeds up over time.

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::FireConfig;

/// Flicker blob drawn inside the band. `x` is relative to the wall's left
/// edge, `y` is in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct FireParticle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    pub angle: f64,
}

pub struct FireWall {
    pub x: f64,
    pub speed: f64,
    /// Gap between the wall's leading edge and the player, floored at 0.
    pub distance: f64,
    particles: Vec<FireParticle>,
    last_particle_ms: f64,
    cfg: FireConfig,
}

impl FireWall {
    pub fn new<R: Rng + ?Sized>(cfg: &FireConfig, view_width: f64, world_height: f64, rng: &mut R) -> Self {
        let mut wall = Self {
            x: -view_width,
            speed: cfg.base_speed,
            distance: cfg.start_distance,
            particles: Vec::with_capacity(cfg.particle_count),
            last_particle_ms: 0.0,
            cfg: cfg.clone(),
        };
        wall.spawn_particles(world_height, rng);
        wall
    }

    pub fn width(&self) -> f64 {
        self.cfg.width
    }

    pub fn leading_edge(&self) -> f64 {
        self.x + self.cfg.width
    }

    pub fn particles(&self) -> &[FireParticle] {
        &self.particles
    }

    /// Advance one frame. Acceleration scales with `delta_frames` (elapsed
    /// time in reference frames) while the per-frame move does not, so a slow
    /// display gets a slower wall but the same ramp-up over wall-clock time.
    ///
    /// Returns true when the wall has reached the player.
    pub fn advance(&mut self, delta_frames: f64, player_x: f64) -> bool {
        let delta = delta_frames.clamp(0.0, self.cfg.max_delta_frames);
        self.speed = (self.speed + self.cfg.acceleration * delta).min(self.cfg.max_speed);
        self.x += self.speed;
        self.distance = (player_x - self.leading_edge()).max(0.0);
        self.distance <= 0.0
    }

    /// Water-can pickup: push the wall back off-screen and drop to base speed.
    pub fn douse(&mut self, view_width: f64) {
        self.x = -view_width;
        self.speed = self.cfg.base_speed;
    }

    /// Drift particles, at most once per `particle_interval_ms`. Particles that
    /// leave the band are re-seeded at a random spot inside it.
    pub fn update_particles<R: Rng + ?Sized>(&mut self, now_ms: f64, world_height: f64, rng: &mut R) {
        if now_ms - self.last_particle_ms <= self.cfg.particle_interval_ms {
            return;
        }
        let width = self.cfg.width;
        for p in &mut self.particles {
            p.x += p.angle.cos() * p.speed;
            p.y += p.angle.sin() * p.speed;
            if p.x > width || p.x < 0.0 {
                p.x = rng.r#gen::<f64>() * width;
            }
            if p.y > world_height || p.y < 0.0 {
                p.y = rng.r#gen::<f64>() * world_height;
            }
        }
        self.last_particle_ms = now_ms;
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, view_width: f64, world_height: f64, rng: &mut R) {
        self.x = -view_width;
        self.speed = self.cfg.base_speed;
        self.distance = self.cfg.start_distance;
        self.spawn_particles(world_height, rng);
    }

    fn spawn_particles<R: Rng + ?Sized>(&mut self, world_height: f64, rng: &mut R) {
        let c = &self.cfg;
        self.particles.clear();
        for _ in 0..c.particle_count {
            self.particles.push(FireParticle {
                x: rng.r#gen::<f64>() * c.width,
                y: rng.r#gen::<f64>() * world_height,
                size: c.min_particle_size + rng.r#gen::<f64>() * (c.max_particle_size - c.min_particle_size),
                speed: c.min_particle_speed + rng.r#gen::<f64>() * (c.max_particle_speed - c.min_particle_speed),
                angle: rng.r#gen::<f64>() * TAU,
            });
        }
    }
}
