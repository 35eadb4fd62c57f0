//! Directional AABB resolution of the player against platforms.
//!
//! The side a platform was entered from is decided by where the player was
//! *before* this frame's integration, not by penetration depth. With the
//! speeds involved (well under a platform's thickness per frame) that is
//! exact, and it keeps corner cases deterministic.

use crate::geom::Rect;
use crate::player::Player;
use crate::world::Platform;

/// Which side of a platform the player came in from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Player was below: head bump.
    Below,
    /// Player was above: landing.
    Above,
    Left,
    Right,
}

/// What happened during one resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Contacts {
    pub landed: bool,
    pub bumped_head: bool,
    pub hit_wall: bool,
    /// Snapped onto the ground line by the world floor clamp.
    pub floor_clamped: bool,
}

/// Classify entry side from the previous position. Priority is below, above,
/// left, right; `None` means the rectangles already overlapped last frame and
/// nothing is done about it.
pub fn entry_side(prev: &Rect, platform: &Rect) -> Option<Side> {
    if prev.y >= platform.bottom() {
        Some(Side::Below)
    } else if prev.bottom() <= platform.y {
        Some(Side::Above)
    } else if prev.right() <= platform.x {
        Some(Side::Left)
    } else if prev.x >= platform.right() {
        Some(Side::Right)
    } else {
        None
    }
}

/// Resolve the player against every platform, then clamp into the world's
/// vertical bounds and onto the ground line.
///
/// `prev` is the player's position before [`Player::integrate`]. Platforms are
/// visited in order, each against the player's already-corrected rectangle.
pub fn resolve(
    player: &mut Player,
    prev: (f64, f64),
    platforms: &[Platform],
    world_height: f64,
    ground_height: f64,
) -> Contacts {
    let mut contacts = Contacts::default();
    player.grounded = false;
    player.touching_ceiling = false;

    let (prev_x, prev_y) = prev;
    let prev_rect = Rect { x: prev_x, y: prev_y, ..player.rect };

    for platform in platforms {
        let p = &platform.rect;
        if !player.rect.overlaps(p) {
            continue;
        }
        match entry_side(&prev_rect, p) {
            Some(Side::Below) => {
                player.rect.y = p.bottom();
                player.vy = 0.0;
                player.vx = 0.0;
                player.rect.x = prev_x;
                player.touching_ceiling = true;
                contacts.bumped_head = true;
            }
            Some(Side::Above) => {
                player.rect.y = p.y - player.rect.height;
                player.vy = 0.0;
                player.grounded = true;
                contacts.landed = true;
            }
            Some(Side::Left) => {
                player.rect.x = p.x - player.rect.width;
                player.vx = 0.0;
                contacts.hit_wall = true;
            }
            Some(Side::Right) => {
                player.rect.x = p.right();
                player.vx = 0.0;
                contacts.hit_wall = true;
            }
            None => {}
        }
    }

    let h = player.rect.height;
    player.rect.y = player.rect.y.max(0.0).min(world_height - h);

    let floor = world_height - h - ground_height;
    if player.rect.y > floor {
        player.rect.y = floor;
        player.vy = 0.0;
        player.grounded = true;
        contacts.floor_clamped = true;
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;

    const WORLD_H: f64 = 600.0;
    const GROUND_H: f64 = 40.0;

    fn player_at(x: f64, y: f64) -> Player {
        let mut p = Player::spawn(&PlayerConfig::default(), 0.0, WORLD_H);
        p.rect.x = x;
        p.rect.y = y;
        p
    }

    fn slab(x: f64, y: f64, w: f64, h: f64) -> Platform {
        Platform::new(Rect::new(x, y, w, h), false)
    }

    #[test]
    fn test_entry_side_priority() {
        let plat = Rect::new(100.0, 100.0, 50.0, 20.0);
        // Diagonally above-left: vertical classification wins.
        assert_eq!(entry_side(&Rect::new(60.0, 50.0, 30.0, 40.0), &plat), Some(Side::Above));
        assert_eq!(entry_side(&Rect::new(60.0, 130.0, 30.0, 40.0), &plat), Some(Side::Below));
        assert_eq!(entry_side(&Rect::new(60.0, 90.0, 30.0, 40.0), &plat), Some(Side::Left));
        assert_eq!(entry_side(&Rect::new(160.0, 90.0, 30.0, 40.0), &plat), Some(Side::Right));
        assert_eq!(entry_side(&Rect::new(110.0, 90.0, 30.0, 40.0), &plat), None);
    }

    #[test]
    fn test_landing_snaps_on_top() {
        let plats = [slab(100.0, 300.0, 200.0, 20.0)];
        let mut p = player_at(150.0, 265.0);
        p.vy = 8.0;
        let contacts = resolve(&mut p, (150.0, 258.0), &plats, WORLD_H, GROUND_H);
        assert!(contacts.landed);
        assert!(p.grounded);
        assert_eq!(p.rect.y, 260.0);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn test_head_bump_restores_x_and_stops() {
        let plats = [slab(100.0, 200.0, 200.0, 20.0)];
        let mut p = player_at(156.0, 215.0);
        p.vx = 6.0;
        p.vy = -7.0;
        let contacts = resolve(&mut p, (150.0, 222.0), &plats, WORLD_H, GROUND_H);
        assert!(contacts.bumped_head);
        assert!(p.touching_ceiling);
        assert_eq!(p.rect.y, 220.0);
        assert_eq!(p.rect.x, 150.0);
        assert_eq!((p.vx, p.vy), (0.0, 0.0));
    }

    #[test]
    fn test_side_walls() {
        let plats = [slab(100.0, 200.0, 200.0, 100.0)];
        let mut p = player_at(75.0, 220.0);
        p.vx = 8.0;
        let contacts = resolve(&mut p, (68.0, 220.0), &plats, WORLD_H, GROUND_H);
        assert!(contacts.hit_wall);
        assert_eq!(p.rect.x, 70.0);
        assert_eq!(p.vx, 0.0);

        let mut p = player_at(295.0, 220.0);
        p.vx = -8.0;
        resolve(&mut p, (302.0, 220.0), &plats, WORLD_H, GROUND_H);
        assert_eq!(p.rect.x, 300.0);
        assert_eq!(p.vx, 0.0);
    }

    #[test]
    fn test_flags_reset_each_pass() {
        let mut p = player_at(10.0, 100.0);
        p.grounded = true;
        p.touching_ceiling = true;
        let contacts = resolve(&mut p, (10.0, 100.0), &[], WORLD_H, GROUND_H);
        assert_eq!(contacts, Contacts::default());
        assert!(!p.grounded);
        assert!(!p.touching_ceiling);
    }

    #[test]
    fn test_world_top_and_floor_clamps() {
        let mut p = player_at(10.0, -20.0);
        resolve(&mut p, (10.0, -10.0), &[], WORLD_H, GROUND_H);
        assert_eq!(p.rect.y, 0.0);

        let mut p = player_at(10.0, 590.0);
        p.vy = 8.4;
        let contacts = resolve(&mut p, (10.0, 582.0), &[], WORLD_H, GROUND_H);
        assert!(contacts.floor_clamped);
        assert!(p.grounded);
        assert_eq!(p.rect.y, WORLD_H - 40.0 - GROUND_H);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn test_preexisting_overlap_left_alone() {
        let plats = [slab(0.0, 0.0, 500.0, 500.0)];
        let mut p = player_at(100.0, 100.0);
        p.vx = 3.0;
        let contacts = resolve(&mut p, (97.0, 100.0), &plats, WORLD_H, GROUND_H);
        assert_eq!(contacts, Contacts::default());
        assert_eq!(p.rect.x, 100.0);
        assert_eq!(p.vx, 3.0);
    }
}
