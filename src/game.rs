//! One run of the game, independent of the browser.
//!
//! [`Game::step`] is the whole per-frame loop: input, physics, collision,
//! pickups, platform streaming, camera, animation, fire. Rendering only reads
//! from a `Game`.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::camera::Camera;
use crate::collision;
use crate::config::Tuning;
use crate::error::ConfigError;
use crate::fire::FireWall;
use crate::geom::Viewport;
use crate::input::InputState;
use crate::player::Player;
use crate::world::{DecorationKind, Platform, PlatformField};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// Touched down after being airborne.
    Landed,
    Collected(DecorationKind),
    CaughtByFire,
    Restarted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub points: u64,
    pub water_cans: u32,
    pub coins: u32,
    pub emoji: u32,
}

pub struct Game {
    tuning: Tuning,
    view: Viewport,
    rng: Xoshiro256PlusPlus,
    player: Player,
    field: PlatformField,
    camera: Camera,
    fire: Option<FireWall>,
    score: Score,
    game_over: bool,
    // Jump must be let go once after game over before a press restarts, so a
    // player still holding thrust when caught does not restart instantly.
    restart_armed: bool,
    last_step_ms: Option<f64>,
}

impl Game {
    pub fn new(tuning: Tuning, view: Viewport, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let field = PlatformField::new(view, &tuning.world, &tuning.decorations, &mut rng);
        let fire = tuning
            .fire
            .enabled
            .then(|| FireWall::new(&tuning.fire, view.width, view.height, &mut rng));
        log::info!(
            "new run: view {}x{}, seed {:#x}, fire {}",
            view.width,
            view.height,
            seed,
            if fire.is_some() { "on" } else { "off" }
        );
        Ok(Self {
            player: Player::spawn(&tuning.player, view.width, view.height),
            camera: Camera::new(&tuning.camera),
            field,
            fire,
            tuning,
            view,
            rng,
            score: Score::default(),
            game_over: false,
            restart_armed: false,
            last_step_ms: None,
        })
    }

    pub fn step(&mut self, input: &InputState, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let delta_frames = match self.last_step_ms {
            Some(last) => (now_ms - last) / self.tuning.fire.frame_ms,
            None => 1.0,
        };
        self.last_step_ms = Some(now_ms);

        if self.game_over {
            if !input.jump {
                self.restart_armed = true;
            } else if self.restart_armed {
                self.restart();
                events.push(GameEvent::Restarted);
            }
            if let Some(fire) = self.fire.as_mut() {
                fire.update_particles(now_ms, self.view.height, &mut self.rng);
            }
            return events;
        }

        let physics = &self.tuning.physics;
        let prev = self.player.position();
        let was_grounded = self.player.grounded;
        self.player.apply_input(input, physics);
        self.player.apply_gravity(physics);
        self.player.integrate();

        let contacts = collision::resolve(
            &mut self.player,
            prev,
            self.field.platforms(),
            self.field.world_height(),
            self.tuning.world.ground_height,
        );
        if (contacts.landed || contacts.floor_clamped) && !was_grounded {
            events.push(GameEvent::Landed);
        }

        for kind in self.field.collect(&self.player.rect) {
            self.apply_pickup(kind);
            events.push(GameEvent::Collected(kind));
        }

        self.field.stream(self.player.rect.x, &mut self.rng);
        self.camera.follow(&self.player.rect, self.view, self.field.world_height());
        self.player.update_animation(input, &self.tuning.player);

        if let Some(fire) = self.fire.as_mut() {
            let caught = fire.advance(delta_frames, self.player.rect.x);
            fire.update_particles(now_ms, self.view.height, &mut self.rng);
            if caught {
                self.game_over = true;
                self.restart_armed = false;
                log::info!(
                    "caught by fire at x={:.0}, {} points",
                    self.player.rect.x,
                    self.score.points
                );
                events.push(GameEvent::CaughtByFire);
            }
        }
        events
    }

    fn apply_pickup(&mut self, kind: DecorationKind) {
        let d = &self.tuning.decorations;
        match kind {
            DecorationKind::WaterCan => {
                self.score.water_cans += 1;
                self.score.points += d.water_can_score;
                if let Some(fire) = self.fire.as_mut() {
                    fire.douse(self.view.width);
                }
            }
            DecorationKind::Coin => {
                self.score.coins += 1;
                self.score.points += d.coin_value;
            }
            DecorationKind::Emoji => {
                self.score.emoji += 1;
                self.score.points += d.emoji_value;
            }
        }
        log::info!("picked up {:?}, {} points", kind, self.score.points);
    }

    /// Fresh run in the same window, continuing the same random stream.
    pub fn restart(&mut self) {
        self.score = Score::default();
        self.game_over = false;
        self.restart_armed = false;
        self.player = Player::spawn(&self.tuning.player, self.view.width, self.view.height);
        self.field.reset(&mut self.rng);
        self.camera.reset();
        if let Some(fire) = self.fire.as_mut() {
            fire.reset(self.view.width, self.view.height, &mut self.rng);
        }
        log::info!("restart");
    }

    pub fn resize(&mut self, view: Viewport) {
        log::debug!("resize to {}x{}", view.width, view.height);
        self.view = view;
        self.field.resize(view);
        let max_y = view.height - self.player.rect.height;
        self.player.rect.y = self.player.rect.y.min(max_y);
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn platforms(&self) -> &[Platform] {
        self.field.platforms()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn fire(&self) -> Option<&FireWall> {
        self.fire.as_ref()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn view(&self) -> Viewport {
        self.view
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
