//! Canvas 2D drawing of a [`Game`]. Read-only with respect to game state.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::game::Game;
use crate::geom::Rect;
use crate::world::Platform;

const BACKGROUND: &str = "#1E1E2E";
const PLATFORM: &str = "#4A4A5E";
const GROUND: &str = "#5D5D7D";
const PLAYER: &str = "#4488FF";
const PLAYER_SHADE: &str = "#2266DD";
const FIRE: &str = "#FF4400";
const FIRE_PARTICLE: &str = "#FF8844";
const UI_BACKGROUND: &str = "rgba(0, 0, 0, 0.8)";
const UI_TEXT: &str = "#FFFFFF";

const HUD_HEIGHT: f64 = 60.0;
const METER_WIDTH: f64 = 200.0;
const METER_HEIGHT: f64 = 10.0;
/// Distance at which the meter reads full.
const METER_RANGE: f64 = 1000.0;

pub fn render(ctx: &CanvasRenderingContext2d, game: &Game) {
    let view = game.view();
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, view.width, view.height);

    draw_fire(ctx, game);
    for platform in game.platforms() {
        draw_platform(ctx, game, platform);
    }
    draw_player(ctx, game);
    draw_hud(ctx, game);
}

fn draw_fire(ctx: &CanvasRenderingContext2d, game: &Game) {
    let Some(fire) = game.fire() else { return };
    let screen_x = fire.x - game.camera().x;
    let height = game.view().height;

    ctx.set_fill_style_str(FIRE);
    ctx.fill_rect(screen_x, 0.0, fire.width(), height);

    ctx.save();
    ctx.set_global_alpha(0.7);
    ctx.set_fill_style_str(FIRE_PARTICLE);
    for p in fire.particles() {
        ctx.begin_path();
        ctx.arc(screen_x + p.x, p.y, p.size, 0.0, TAU).ok();
        ctx.fill();
    }
    ctx.restore();
}

fn draw_platform(ctx: &CanvasRenderingContext2d, game: &Game, platform: &Platform) {
    let screen = game.camera().to_screen(&platform.rect);
    if !game.view().shows(&screen) {
        return;
    }
    ctx.set_fill_style_str(if platform.is_ground { GROUND } else { PLATFORM });
    ctx.fill_rect(screen.x, screen.y, screen.width, screen.height);

    let size = game.tuning().decorations.size;
    for decoration in platform.decorations.iter().filter(|d| !d.collected) {
        let r = decoration.placed_at(&screen);
        ctx.save();
        ctx.set_font(&format!("{}px Arial", size));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(decoration.kind.glyph(), r.x + r.width / 2.0, r.y + r.height / 2.0)
            .ok();
        ctx.restore();
    }
}

fn draw_player(ctx: &CanvasRenderingContext2d, game: &Game) {
    let player = game.player();
    let Rect { x, y, width, height } = game.camera().to_screen(&player.rect);

    ctx.save();
    ctx.set_shadow_color("rgba(0, 0, 0, 0.3)");
    ctx.set_shadow_blur(15.0);
    ctx.set_shadow_offset_x(5.0);
    ctx.set_shadow_offset_y(5.0);

    let gradient = ctx.create_linear_gradient(x, y, x + width, y + height);
    gradient.add_color_stop(0.0, PLAYER).ok();
    gradient.add_color_stop(1.0, PLAYER_SHADE).ok();
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(x, y, width, height);

    // Highlight, offset toward the facing direction while running.
    ctx.set_shadow_color("rgba(255, 255, 255, 0.2)");
    ctx.set_shadow_blur(5.0);
    ctx.set_shadow_offset_x(-2.0);
    ctx.set_shadow_offset_y(-2.0);
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.1)");
    let bob = if player.frame_index % 2 == 1 { 1.0 } else { 0.0 };
    ctx.fill_rect(x + 2.0 + f64::from(player.facing), y + 2.0 - bob, width - 4.0, height - 4.0);
    ctx.restore();
}

fn draw_hud(ctx: &CanvasRenderingContext2d, game: &Game) {
    let view = game.view();
    let score = game.score();
    ctx.save();

    ctx.set_fill_style_str(UI_BACKGROUND);
    ctx.fill_rect(0.0, 0.0, view.width, HUD_HEIGHT);

    ctx.set_font("bold 20px Arial");
    ctx.set_fill_style_str(UI_TEXT);
    ctx.set_text_align("left");
    let counters = if game.fire().is_some() {
        format!("Water Cans: {}", score.water_cans)
    } else {
        format!("Coins: {}  Smiles: {}  Score: {}", score.coins, score.emoji, score.points)
    };
    ctx.fill_text(&counters, 20.0, 35.0).ok();

    if let Some(fire) = game.fire() {
        ctx.set_text_align("right");
        ctx.fill_text(&format!("Distance: {}m", fire.distance.floor()), view.width - 20.0, 35.0)
            .ok();

        let meter_x = (view.width - METER_WIDTH) / 2.0;
        let meter_y = 25.0;
        ctx.set_fill_style_str("#333");
        ctx.fill_rect(meter_x, meter_y, METER_WIDTH, METER_HEIGHT);
        let ratio = (fire.distance / METER_RANGE).min(1.0);
        ctx.set_fill_style_str(FIRE);
        ctx.fill_rect(meter_x, meter_y, METER_WIDTH * ratio, METER_HEIGHT);
    }

    if game.is_over() {
        ctx.set_font("bold 48px Arial");
        ctx.set_fill_style_str(FIRE);
        ctx.set_text_align("center");
        let cx = view.width / 2.0;
        let cy = view.height / 2.0;
        ctx.fill_text("GAME OVER", cx, cy).ok();
        ctx.set_font("bold 24px Arial");
        ctx.fill_text("Press SPACE to restart", cx, cy + 50.0).ok();
    }
    ctx.restore();
}
