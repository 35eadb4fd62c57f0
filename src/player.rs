//! The player actor: a single rectangle driven by input and gravity.

use crate::config::{JumpModel, PhysicsConfig, PlayerConfig};
use crate::geom::Rect;
use crate::input::InputState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimState {
    Idle,
    Running,
    Jumping,
    Falling,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub vx: f64,
    pub vy: f64,
    pub grounded: bool,
    /// Set by a head bump; blocks steering and jumping for the next frame.
    pub touching_ceiling: bool,
    /// 1 facing right, -1 facing left.
    pub facing: i8,
    pub anim: AnimState,
    pub frame_index: u32,
    frame_counter: u32,
    // Jump held on the previous frame (edge detection for impulse jumps).
    jump_latch: bool,
}

impl Player {
    pub fn spawn(cfg: &PlayerConfig, view_width: f64, world_height: f64) -> Self {
        Self {
            rect: Rect::new(
                view_width * cfg.spawn_x_ratio,
                world_height - cfg.spawn_height,
                cfg.width,
                cfg.height,
            ),
            vx: 0.0,
            vy: 0.0,
            grounded: false,
            touching_ceiling: false,
            facing: 1,
            anim: AnimState::Idle,
            frame_index: 0,
            frame_counter: 0,
            jump_latch: false,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.rect.x, self.rect.y)
    }

    /// Steering and jumping. Must run before [`Player::apply_gravity`] so a
    /// thrust jump is always countered by gravity within the same frame.
    pub fn apply_input(&mut self, input: &InputState, physics: &PhysicsConfig) {
        if self.touching_ceiling {
            self.vx = 0.0;
        } else {
            let speed = if self.grounded {
                physics.move_speed
            } else {
                physics.move_speed * physics.air_control
            };
            match input.horizontal() {
                -1 => self.vx = -speed,
                1 => self.vx = speed,
                _ => self.vx *= physics.friction,
            }
        }

        let pressed = input.jump && !self.jump_latch;
        self.jump_latch = input.jump;
        match physics.jump {
            JumpModel::Thrust => {
                if input.jump && !self.touching_ceiling {
                    self.vy = (self.vy + physics.jump_acceleration).max(physics.min_jump_velocity);
                }
            }
            JumpModel::Impulse { velocity } => {
                if pressed && self.grounded && !self.touching_ceiling {
                    self.vy = -velocity;
                    self.grounded = false;
                }
            }
        }
    }

    pub fn apply_gravity(&mut self, physics: &PhysicsConfig) {
        self.vy = (self.vy + physics.gravity).min(physics.terminal_velocity);
    }

    /// Move by the current velocity. The world has a hard left edge at x = 0
    /// and is unbounded to the right.
    pub fn integrate(&mut self) {
        self.rect.x = (self.rect.x + self.vx).max(0.0);
        self.rect.y += self.vy;
    }

    pub fn update_animation(&mut self, input: &InputState, cfg: &PlayerConfig) {
        let next = if !self.grounded {
            if self.vy < 0.0 { AnimState::Jumping } else { AnimState::Falling }
        } else if self.vx.abs() > cfg.run_threshold {
            AnimState::Running
        } else {
            AnimState::Idle
        };

        if input.left {
            self.facing = -1;
        }
        if input.right {
            self.facing = 1;
        }

        if next != self.anim {
            self.anim = next;
            self.frame_index = 0;
            self.frame_counter = 0;
        }

        if cfg.frame_delay > 0 {
            self.frame_counter += 1;
            if self.frame_counter >= cfg.frame_delay {
                self.frame_counter = 0;
                self.frame_index = (self.frame_index + 1) % cfg.run_frame_count.max(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(left: bool, right: bool, jump: bool) -> InputState {
        InputState { left, right, jump }
    }

    #[test]
    fn test_spawn_position() {
        let p = Player::spawn(&PlayerConfig::default(), 800.0, 600.0);
        assert_eq!(p.position(), (400.0, 300.0));
        assert_eq!(p.rect.width, 30.0);
        assert_eq!(p.rect.height, 40.0);
    }

    #[test]
    fn test_grounded_vs_air_speed() {
        let physics = PhysicsConfig::default();
        let mut p = Player::spawn(&PlayerConfig::default(), 800.0, 600.0);
        p.grounded = true;
        p.apply_input(&held(false, true, false), &physics);
        assert!((p.vx - 8.4).abs() < 1e-9);
        p.grounded = false;
        p.apply_input(&held(true, false, false), &physics);
        assert!((p.vx + 8.4 * 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_friction_decays_velocity() {
        let physics = PhysicsConfig::default();
        let mut p = Player::spawn(&PlayerConfig::default(), 800.0, 600.0);
        p.vx = 10.0;
        p.apply_input(&InputState::default(), &physics);
        assert!((p.vx - 9.2).abs() < 1e-9);
    }

    #[test]
    fn test_ceiling_blocks_steering_and_thrust() {
        let physics = PhysicsConfig::default();
        let mut p = Player::spawn(&PlayerConfig::default(), 800.0, 600.0);
        p.touching_ceiling = true;
        p.vx = 5.0;
        p.apply_input(&held(false, true, true), &physics);
        assert_eq!(p.vx, 0.0);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn test_thrust_is_capped_then_gravity_applies() {
        let physics = PhysicsConfig::default();
        let mut p = Player::spawn(&PlayerConfig::default(), 800.0, 600.0);
        for _ in 0..50 {
            p.apply_input(&held(false, false, true), &physics);
            assert!(p.vy >= physics.min_jump_velocity);
            p.apply_gravity(&physics);
        }
        // Steady state: capped thrust plus one frame of gravity.
        assert!((p.vy - (physics.min_jump_velocity + physics.gravity)).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_velocity() {
        let physics = PhysicsConfig::default();
        let mut p = Player::spawn(&PlayerConfig::default(), 800.0, 600.0);
        for _ in 0..100 {
            p.apply_gravity(&physics);
        }
        assert_eq!(p.vy, physics.terminal_velocity);
    }

    #[test]
    fn test_impulse_jump_needs_ground_and_fresh_press() {
        let physics = PhysicsConfig { jump: JumpModel::Impulse { velocity: 12.0 }, ..PhysicsConfig::default() };
        let mut p = Player::spawn(&PlayerConfig::default(), 800.0, 600.0);

        p.apply_input(&held(false, false, true), &physics);
        assert_eq!(p.vy, 0.0, "airborne press must not jump");

        p.grounded = true;
        p.apply_input(&held(false, false, true), &physics);
        assert_eq!(p.vy, 0.0, "still held from the previous frame");

        p.apply_input(&InputState::default(), &physics);
        p.grounded = true;
        p.apply_input(&held(false, false, true), &physics);
        assert_eq!(p.vy, -12.0);
        assert!(!p.grounded);
    }

    #[test]
    fn test_integrate_clamps_left_edge() {
        let mut p = Player::spawn(&PlayerConfig::default(), 0.0, 600.0);
        p.vx = -5.0;
        p.vy = 2.0;
        p.integrate();
        assert_eq!(p.rect.x, 0.0);
        assert_eq!(p.rect.y, 302.0);
    }

    #[test]
    fn test_animation_states_and_frames() {
        let cfg = PlayerConfig::default();
        let mut p = Player::spawn(&cfg, 800.0, 600.0);
        p.vy = -3.0;
        p.update_animation(&InputState::default(), &cfg);
        assert_eq!(p.anim, AnimState::Jumping);
        p.vy = 2.0;
        p.update_animation(&InputState::default(), &cfg);
        assert_eq!(p.anim, AnimState::Falling);

        p.grounded = true;
        p.vx = -4.0;
        let left = held(true, false, false);
        p.update_animation(&left, &cfg);
        assert_eq!(p.anim, AnimState::Running);
        assert_eq!(p.facing, -1);
        assert_eq!(p.frame_index, 0);
        // One tick already counted on the state change frame.
        for _ in 1..cfg.frame_delay {
            p.update_animation(&left, &cfg);
        }
        assert_eq!(p.frame_index, 1);
        for _ in 0..cfg.frame_delay * (cfg.run_frame_count - 1) {
            p.update_animation(&left, &cfg);
        }
        assert_eq!(p.frame_index, 0, "wraps after run_frame_count frames");

        p.vx = 0.1;
        p.update_animation(&InputState::default(), &cfg);
        assert_eq!(p.anim, AnimState::Idle);
    }
}
