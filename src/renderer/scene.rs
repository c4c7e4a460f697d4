//! Frame composition
//!
//! Reads the post-update session and turns it into surface calls: backdrop,
//! entities, HUD and the per-phase screens. Nothing here mutates the game.

use glam::Vec2;

use super::sprites::{Draw, DrawContext, draw_all};
use super::surface::{Color, Surface, TextAlign, TextBaseline, TextStyle, colors};
use crate::assets::{AssetId, AssetRegistry};
use crate::consts::*;
use crate::error::StartupError;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Rect, background_for};

const SCREEN: Rect = Rect::new(0.0, 0.0, WIDTH, HEIGHT);

/// Counters and timers shown over the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub coins: u32,
    pub jumps: u32,
    /// Seconds of shield left, if active
    pub shield_remaining: Option<f64>,
    pub magnet_remaining: Option<f64>,
    pub paused: bool,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let player = state.player.as_ref();
        Self {
            score: state.score_floor(),
            high_score: state.high_score,
            coins: state.coins,
            jumps: state.jumps,
            shield_remaining: player.and_then(|p| p.shield).map(|e| e.remaining(state.clock)),
            magnet_remaining: player.and_then(|p| p.magnet).map(|e| e.remaining(state.clock)),
            paused: state.phase == GamePhase::Paused,
        }
    }

    /// Best score to show on the game-over screen
    pub fn display_high_score(&self) -> u64 {
        self.score.max(self.high_score)
    }

    pub fn pause_button_label(&self) -> &'static str {
        if self.paused { "▶" } else { "❚❚" }
    }
}

/// Everything one frame needs to be drawn
pub struct Scene<'a> {
    pub state: &'a GameState,
    pub assets: &'a AssetRegistry,
    pub settings: &'a Settings,
    pub startup_error: Option<&'a StartupError>,
}

impl Scene<'_> {
    /// Render offset for the current earthquake, if it should be shown
    pub fn shake_offset(&self) -> Vec2 {
        let shaking_phase = matches!(self.state.phase, GamePhase::Playing | GamePhase::Paused);
        if shaking_phase && self.settings.effective_screen_shake() {
            self.state.environment.shake_offset
        } else {
            Vec2::ZERO
        }
    }

    fn context(&self) -> DrawContext<'_> {
        DrawContext {
            assets: self.assets,
            clock: self.state.clock,
            magnet_radius: self.state.tuning.magnet_radius,
        }
    }
}

fn white(size: f32) -> TextStyle {
    TextStyle::new(size, colors::WHITE)
}

/// Draw a complete frame
pub fn draw_scene(surface: &mut dyn Surface, scene: &Scene) {
    if let Some(error) = scene.startup_error {
        draw_startup_error(surface, error);
        return;
    }

    let state = scene.state;
    match state.phase {
        GamePhase::Loading => {
            draw_backdrop(surface, scene);
            surface.text("Loading Assets...", Vec2::new(WIDTH / 2.0, HEIGHT / 2.0), &white(30.0).align(TextAlign::Center));
        }
        GamePhase::Tutorial => draw_tutorial(surface, scene),
        GamePhase::Title => {
            draw_backdrop(surface, scene);
            draw_snow(surface, scene);
            draw_title(surface);
        }
        GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver => {
            let hud = Hud::from_state(state);

            surface.save();
            surface.translate(scene.shake_offset());
            draw_backdrop(surface, scene);
            if state.phase != GamePhase::GameOver {
                draw_snow(surface, scene);
            }
            draw_world(surface, scene);
            if state.phase == GamePhase::Playing {
                draw_hud(surface, &hud, scene.settings);
            }
            surface.restore();

            match state.phase {
                GamePhase::Paused => draw_paused(surface, &hud),
                GamePhase::GameOver => draw_game_over(surface, &hud),
                _ => {}
            }
        }
    }
}

/// Palette fill, background image and ground line
fn draw_backdrop(surface: &mut dyn Surface, scene: &Scene) {
    let env = &scene.state.environment;
    surface.fill_rect(SCREEN, env.palette.background.into());
    if let Some(image) = background_for(env.transition, scene.assets) {
        surface.draw_image(image, SCREEN, 0.0, 1.0);
    }
    surface.line(
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(WIDTH, GROUND_Y),
        2.0,
        env.palette.line.into(),
    );
}

fn draw_snow(surface: &mut dyn Surface, scene: &Scene) {
    let ctx = scene.context();
    draw_all(&scene.state.environment.snow, surface, &ctx);
}

/// Entities in back-to-front order
fn draw_world(surface: &mut dyn Surface, scene: &Scene) {
    let state = scene.state;
    let ctx = scene.context();
    draw_all(&state.obstacles, surface, &ctx);
    draw_all(&state.power_ups, surface, &ctx);
    draw_all(&state.collectibles, surface, &ctx);
    if let Some(player) = &state.player {
        player.draw(surface, &ctx);
    }
    draw_all(&state.floating_texts, surface, &ctx);
}

fn draw_hud(surface: &mut dyn Surface, hud: &Hud, settings: &Settings) {
    let right = white(24.0).align(TextAlign::Right);
    surface.text(&format!("Score: {}", hud.score), Vec2::new(WIDTH - 10.0, 10.0), &right);
    surface.text(&format!("HI: {}", hud.high_score), Vec2::new(WIDTH - 10.0, 35.0), &right);
    surface.text(&format!("Coins: {}", hud.coins), Vec2::new(WIDTH - 10.0, 60.0), &right);

    // Timers stack down the left side, under the pause button
    let effects = [("Shield", hud.shield_remaining), ("Magnet", hud.magnet_remaining)];
    let mut y = PAUSE_RESUME_BUTTON.bottom() + 10.0;
    for (name, remaining) in effects {
        if let Some(secs) = remaining {
            surface.text(&format!("{}: {:.1}s", name, secs), Vec2::new(10.0, y), &white(20.0));
            y += 25.0;
        }
    }

    if settings.show_jump_counter {
        let style = white(18.0).align(TextAlign::Right).baseline(TextBaseline::Bottom);
        surface.text(&format!("Jumps: {}", hud.jumps), Vec2::new(WIDTH - 10.0, HEIGHT - 25.0), &style);
    }

    draw_button(surface, PAUSE_RESUME_BUTTON, hud.pause_button_label(), 20.0);
}

fn draw_button(surface: &mut dyn Surface, rect: Rect, label: &str, size: f32) {
    surface.fill_rect(rect, colors::BUTTON_BG);
    surface.text(label, rect.center(), &white(size).bold().centered());
}

fn draw_overlay(surface: &mut dyn Surface, color: Color) {
    surface.fill_rect(SCREEN, color);
}

fn draw_tutorial(surface: &mut dyn Surface, scene: &Scene) {
    if scene.assets.is_ready(AssetId::BackgroundDay) {
        surface.draw_image(AssetId::BackgroundDay, SCREEN, 0.0, 1.0);
    } else {
        surface.fill_rect(SCREEN, colors::WHITE);
    }
    draw_overlay(surface, colors::OVERLAY);

    let center = white(48.0).bold().align(TextAlign::Center);
    surface.text("How to Play", Vec2::new(WIDTH / 2.0, 50.0), &center);

    let heading = TextStyle::new(24.0, colors::YELLOW).bold();
    let body = white(20.0);
    let columns = [
        (
            WIDTH * 0.15,
            "Keyboard",
            [
                ("Jump / Double Jump:", "   - SPACEBAR"),
                ("Duck / Slide (Hold):", "   - DOWN ARROW or S"),
                ("Switch Skin:", "   - C key"),
            ],
        ),
        (
            WIDTH * 0.55,
            "Touch",
            [
                ("Jump / Double Jump:", "   - TAP Right Half of Screen"),
                ("Duck / Slide (Hold):", "   - TAP and HOLD Left Half"),
                ("Pause / Resume:", "   - Button (Top Left) or P / ESC"),
            ],
        ),
    ];
    for (x, title, rows) in columns {
        let mut y = 120.0;
        surface.text(title, Vec2::new(x, y), &heading);
        y += 45.0;
        for (label, keys) in rows {
            surface.text(label, Vec2::new(x, y), &body);
            surface.text(keys, Vec2::new(x, y + 30.0), &body);
            y += 75.0;
        }
    }

    let prompt = TextStyle::new(24.0, colors::YELLOW).align(TextAlign::Center);
    surface.text(
        "Press SPACEBAR or TAP Screen to Continue",
        Vec2::new(WIDTH / 2.0, HEIGHT - 40.0),
        &prompt,
    );
}

fn draw_title(surface: &mut dyn Surface) {
    draw_overlay(surface, colors::TITLE_OVERLAY);
    let mid = Vec2::new(WIDTH / 2.0, HEIGHT / 2.0);
    surface.text("Dino Run", mid - Vec2::Y * 70.0, &white(40.0).bold().centered());
    surface.text("Press SPACE or TAP to Start", mid, &white(24.0).centered());
    surface.text("Controls Refresher:", mid + Vec2::Y * 40.0, &white(20.0).centered());
    surface.text(
        "Jump: Space/RightTap | Duck: Down/S/LeftTap(Hold)",
        mid + Vec2::Y * 70.0,
        &white(16.0).centered(),
    );
    surface.text("Skin: C | Pause: Button or P", mid + Vec2::Y * 95.0, &white(16.0).centered());
}

fn draw_paused(surface: &mut dyn Surface, hud: &Hud) {
    draw_overlay(surface, colors::OVERLAY);
    surface.text(
        "PAUSED",
        Vec2::new(WIDTH / 2.0, HEIGHT / 2.0 - 30.0),
        &white(72.0).bold().centered(),
    );
    draw_button(surface, PAUSE_RESUME_BUTTON, hud.pause_button_label(), 20.0);
}

fn draw_game_over(surface: &mut dyn Surface, hud: &Hud) {
    draw_overlay(surface, colors::OVERLAY);
    let mid = Vec2::new(WIDTH / 2.0, HEIGHT / 2.0);
    surface.text("GAME OVER", mid - Vec2::Y * 60.0, &white(48.0).bold().centered());
    surface.text(&format!("Your Score: {}", hud.score), mid, &white(24.0).centered());
    surface.text(
        &format!("High Score: {}", hud.display_high_score()),
        mid + Vec2::Y * 35.0,
        &white(24.0).centered(),
    );
    surface.text(
        &format!("Total Jumps: {}", hud.jumps),
        Vec2::new(WIDTH / 2.0, HEIGHT - 30.0),
        &white(16.0).align(TextAlign::Center).baseline(TextBaseline::Bottom),
    );
    draw_button(surface, RESTART_BUTTON, "Restart", 22.0);
}

fn draw_startup_error(surface: &mut dyn Surface, error: &StartupError) {
    surface.fill_rect(SCREEN, colors::ERROR_BG);
    let mid = Vec2::new(WIDTH / 2.0, HEIGHT / 2.0);
    surface.text("Error Loading Assets!", mid, &white(30.0).centered());
    surface.text(&error.to_string(), mid + Vec2::Y * 40.0, &white(16.0).centered());
}
