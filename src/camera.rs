//! Smoothed follow camera with a vertical deadzone.

use crate::config::CameraConfig;
use crate::geom::{Rect, Viewport};

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    deadzone: f64,
    smoothing: f64,
}

impl Camera {
    pub fn new(cfg: &CameraConfig) -> Self {
        Self { x: 0.0, y: 0.0, deadzone: cfg.vertical_deadzone, smoothing: cfg.smoothing }
    }

    /// Ease toward the player. Horizontally the target keeps the player
    /// centred (never left of the world origin). Vertically the camera only
    /// retargets once the player leaves the deadzone band around screen
    /// centre, and never shows anything outside `[0, world_height]`.
    pub fn follow(&mut self, player: &Rect, view: Viewport, world_height: f64) {
        let target_x = (player.x - view.width / 2.0).max(0.0);

        let screen_center_y = self.y + view.height / 2.0;
        let mut target_y = self.y;
        if (player.y - screen_center_y).abs() > self.deadzone {
            let wanted = player.y - view.height / 2.0;
            target_y = wanted.min(world_height - view.height).max(0.0);
        }

        self.x += (target_x - self.x) * self.smoothing;
        self.y += (target_y - self.y) * self.smoothing;
    }

    pub fn to_screen(&self, rect: &Rect) -> Rect {
        rect.translated(-self.x, -self.y)
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    fn cam() -> Camera {
        Camera::new(&CameraConfig::default())
    }

    #[test]
    fn test_horizontal_smoothing_step() {
        let mut c = cam();
        let player = Rect::new(1400.0, 300.0, 30.0, 40.0);
        c.follow(&player, VIEW, 600.0);
        // Target 1000, 15% of the way.
        assert!((c.x - 150.0).abs() < 1e-9);
        c.follow(&player, VIEW, 600.0);
        assert!((c.x - (150.0 + 850.0 * 0.15)).abs() < 1e-9);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut c = cam();
        let player = Rect::new(5000.0, 300.0, 30.0, 40.0);
        let mut last = c.x;
        for _ in 0..300 {
            c.follow(&player, VIEW, 600.0);
            assert!(c.x >= last && c.x <= 4600.0);
            last = c.x;
        }
        assert!((c.x - 4600.0).abs() < 1e-3);
    }

    #[test]
    fn test_never_left_of_origin() {
        let mut c = cam();
        c.follow(&Rect::new(10.0, 300.0, 30.0, 40.0), VIEW, 600.0);
        assert_eq!(c.x, 0.0);
    }

    #[test]
    fn test_deadzone_holds_vertical() {
        let mut c = cam();
        // Screen centre is y=300; 120 away is inside the 150 band.
        let tall_world = 2000.0;
        c.follow(&Rect::new(0.0, 420.0, 30.0, 40.0), VIEW, tall_world);
        assert_eq!(c.y, 0.0);
        // 400 away: retarget to 700 - 300 = 400.
        c.follow(&Rect::new(0.0, 700.0, 30.0, 40.0), VIEW, tall_world);
        assert!((c.y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_clamped_to_world() {
        let mut c = cam();
        c.smoothing = 1.0;
        c.follow(&Rect::new(0.0, 1900.0, 30.0, 40.0), VIEW, 1000.0);
        assert_eq!(c.y, 400.0);
        // One-screen world: there is nowhere to scroll.
        let mut c = cam();
        c.smoothing = 1.0;
        c.follow(&Rect::new(0.0, 580.0, 30.0, 40.0), VIEW, 600.0);
        assert_eq!(c.y, 0.0);
    }

    #[test]
    fn test_to_screen() {
        let mut c = cam();
        c.x = 100.0;
        c.y = 20.0;
        assert_eq!(c.to_screen(&Rect::new(150.0, 50.0, 10.0, 10.0)), Rect::new(50.0, 30.0, 10.0, 10.0));
    }
}
