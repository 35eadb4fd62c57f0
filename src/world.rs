//! Endless platform field.
//!
//! Platforms are generated ahead of the player and dropped once they fall far
//! enough behind, so the live set stays bounded however far the player runs.
//! The ground is a single wide slab that is re-centred under the player
//! instead of being extended.

use rand::Rng;

use crate::config::{DecorationConfig, WorldConfig};
use crate::geom::{Rect, Viewport};

/// Starter layout: (x as a fraction of viewport width, height above world bottom).
const STARTER_PLATFORMS: [(f64, f64); 5] =
    [(0.2, 120.0), (0.6, 180.0), (1.0, 240.0), (1.4, 180.0), (1.8, 120.0)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    WaterCan,
    Coin,
    Emoji,
}

impl DecorationKind {
    pub fn glyph(self) -> &'static str {
        match self {
            DecorationKind::WaterCan => "🚰",
            DecorationKind::Coin => "🪙",
            DecorationKind::Emoji => "😊",
        }
    }
}

/// A pickup sitting on a platform. `offset` is relative to the platform's
/// top-left corner so it moves with the platform (the ground slides).
#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub offset: Rect,
    pub collected: bool,
}

impl Decoration {
    /// Centred on top of a platform of width `platform_width`.
    pub fn on_top(kind: DecorationKind, platform_width: f64, size: f64) -> Self {
        Self {
            kind,
            offset: Rect::new(platform_width / 2.0 - size / 2.0, -size, size, size),
            collected: false,
        }
    }

    /// Where this decoration sits when its platform's top-left corner is at
    /// `origin` (world space for pickups, screen space for drawing).
    pub fn placed_at(&self, origin: &Rect) -> Rect {
        self.offset.translated(origin.x, origin.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    pub is_ground: bool,
    pub decorations: Vec<Decoration>,
}

impl Platform {
    pub fn new(rect: Rect, is_ground: bool) -> Self {
        Self { rect, is_ground, decorations: Vec::new() }
    }
}

/// Counts from one [`PlatformField::stream`] call, for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub generated: usize,
    pub removed: usize,
}

pub struct PlatformField {
    platforms: Vec<Platform>,
    /// Right edge of the furthest generated platform.
    last_x: f64,
    view: Viewport,
    world: WorldConfig,
    decorations: DecorationConfig,
}

impl PlatformField {
    pub fn new<R: Rng + ?Sized>(
        view: Viewport,
        world: &WorldConfig,
        decorations: &DecorationConfig,
        rng: &mut R,
    ) -> Self {
        let mut field = Self {
            platforms: Vec::new(),
            last_x: 0.0,
            view,
            world: world.clone(),
            decorations: decorations.clone(),
        };
        field.reset(rng);
        field
    }

    /// Back to the ground plus the starter platforms.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.platforms.clear();
        self.platforms.push(Platform::new(self.ground_rect(0.0), true));

        let world_h = self.view.height;
        for (ratio, height) in STARTER_PLATFORMS {
            let rect = Rect::new(
                self.view.width * ratio,
                world_h - height,
                self.world.starter_platform_width,
                self.world.platform_height,
            );
            let platform = self.decorate(Platform::new(rect, false), rng);
            self.platforms.push(platform);
        }
        self.last_x = self
            .platforms
            .iter()
            .map(|p| p.rect.right())
            .fold(f64::NEG_INFINITY, f64::max);
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn ground(&self) -> &Platform {
        &self.platforms[0]
    }

    pub fn last_x(&self) -> f64 {
        self.last_x
    }

    pub fn world_height(&self) -> f64 {
        self.view.height
    }

    /// Append one platform past `last_x`.
    pub fn generate_platform<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let w = &self.world;
        let spacing = lerp(w.min_platform_spacing, w.max_platform_spacing, rng.r#gen());
        let x = self.last_x + spacing;
        let width = lerp(w.min_platform_width, w.max_platform_width, rng.r#gen());
        let max_y = self.view.height - w.ground_height - w.ground_clearance;
        let y = lerp(w.min_platform_y, max_y, rng.r#gen());

        let platform = self.decorate(Platform::new(Rect::new(x, y, width, w.platform_height), false), rng);
        log::trace!("platform at x={:.0} y={:.0} w={:.0}", x, y, width);
        self.platforms.push(platform);
        self.last_x = x + width;
    }

    /// Keep the world populated around `player_x`: re-centre the ground,
    /// generate up to the look-ahead distance, drop platforms beyond the
    /// cleanup distance behind.
    pub fn stream<R: Rng + ?Sized>(&mut self, player_x: f64, rng: &mut R) -> StreamStats {
        let mut stats = StreamStats::default();
        let vw = self.view.width;
        if vw > 0.0 {
            let ground_x = (player_x / vw).floor() * vw - vw;
            self.platforms[0].rect = self.ground_rect(ground_x);
        }

        let ahead = vw * self.world.generation_distance_screens;
        while self.last_x - player_x < ahead {
            self.generate_platform(rng);
            stats.generated += 1;
        }

        let cleanup_x = player_x - vw * self.world.cleanup_distance_screens;
        let before = self.platforms.len();
        self.platforms.retain(|p| p.is_ground || p.rect.right() >= cleanup_x);
        stats.removed = before - self.platforms.len();

        if stats.generated > 0 || stats.removed > 0 {
            log::debug!(
                "stream: +{} -{} platforms ({} live)",
                stats.generated,
                stats.removed,
                self.platforms.len()
            );
        }
        stats
    }

    /// Mark every uncollected decoration the player overlaps as collected and
    /// report what was picked up. A decoration is only ever reported once.
    pub fn collect(&mut self, player: &Rect) -> Vec<DecorationKind> {
        let mut picked = Vec::new();
        for platform in &mut self.platforms {
            let origin = platform.rect;
            for decoration in platform.decorations.iter_mut().filter(|d| !d.collected) {
                if player.overlaps(&decoration.placed_at(&origin)) {
                    decoration.collected = true;
                    picked.push(decoration.kind);
                }
            }
        }
        picked
    }

    #[cfg(test)]
    pub(crate) fn platforms_mut(&mut self) -> &mut [Platform] {
        &mut self.platforms
    }

    /// The world height tracks the viewport height.
    pub fn resize(&mut self, view: Viewport) {
        self.view = view;
        let x = self.platforms[0].rect.x;
        self.platforms[0].rect = self.ground_rect(x);
    }

    fn ground_rect(&self, x: f64) -> Rect {
        Rect::new(
            x,
            self.view.height - self.world.ground_height,
            self.view.width * self.world.ground_width_screens,
            self.world.ground_height,
        )
    }

    fn decorate<R: Rng + ?Sized>(&self, mut platform: Platform, rng: &mut R) -> Platform {
        if let Some(kind) = roll_decoration(&self.decorations, rng.r#gen()) {
            platform
                .decorations
                .push(Decoration::on_top(kind, platform.rect.width, self.decorations.size));
        }
        platform
    }
}

/// Map a roll in `[0, 1)` onto the cumulative decoration chances.
pub fn roll_decoration(cfg: &DecorationConfig, roll: f64) -> Option<DecorationKind> {
    let mut threshold = cfg.water_can_chance;
    if roll < threshold {
        return Some(DecorationKind::WaterCan);
    }
    threshold += cfg.coin_chance;
    if roll < threshold {
        return Some(DecorationKind::Coin);
    }
    threshold += cfg.emoji_chance;
    if roll < threshold {
        return Some(DecorationKind::Emoji);
    }
    None
}

fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + t * (max - min)
}
