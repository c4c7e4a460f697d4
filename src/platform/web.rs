//! Browser backend
//!
//! Canvas 2D surface, `<img>`/`<audio>` handles, event listeners and the
//! `requestAnimationFrame` loop. Everything here is glue; the game itself
//! only sees [`Surface`], [`AudioBackend`] and [`InputEvent`]s.

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlAudioElement, HtmlCanvasElement, HtmlImageElement, KeyboardEvent,
    PointerEvent,
};

use super::{CAPTURED_KEYS, MUTE_KEY, key_down, key_up, to_surface};
use crate::assets::{AssetId, AssetKind};
use crate::audio::{AudioBackend, SoundEffect};
use crate::consts::{HEIGHT, WIDTH};
use crate::error::PlaybackError;
use crate::game::Game;
use crate::input::InputEvent;
use crate::persistence::LocalStore;
use crate::renderer::{Color, Surface, TextAlign, TextBaseline, TextStyle};
use crate::sim::{GamePhase, Rect};
use crate::tuning::Tuning;

/// Directory the asset files are served from
const ASSET_BASE: &str = "assets/";

/// `HAVE_CURRENT_DATA`
const AUDIO_READY_STATE: u16 = 2;

/// DOM elements for every asset, shared by the surface and the audio backend
#[derive(Default)]
struct AssetHandles {
    images: HashMap<AssetId, HtmlImageElement>,
    sounds: HashMap<AssetId, HtmlAudioElement>,
}

impl AssetHandles {
    fn create() -> Result<Self, JsValue> {
        let mut handles = Self::default();
        for id in AssetId::ALL {
            match id.kind() {
                AssetKind::Image => {
                    handles.images.insert(id, HtmlImageElement::new()?);
                }
                AssetKind::Audio => {
                    handles.sounds.insert(id, HtmlAudioElement::new()?);
                }
            }
        }
        Ok(handles)
    }

    /// Attach load callbacks and start every download
    fn start_loading(&self, game: &Rc<RefCell<Game>>) -> Result<(), JsValue> {
        log::info!("Loading {} assets", AssetId::ALL.len());
        for (&id, img) in &self.images {
            let on_load = {
                let game = game.clone();
                let img = img.clone();
                Closure::<dyn FnMut()>::new(move || {
                    let mut g = game.borrow_mut();
                    if img.complete() && img.natural_width() > 0 {
                        g.assets_mut().mark_ready(id);
                    } else {
                        g.assets_mut().mark_failed(id, "image decoded with zero size");
                    }
                })
            };
            img.set_onload(Some(on_load.as_ref().unchecked_ref()));
            on_load.forget();

            let on_error = failure_callback(game, id, "image request failed");
            img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
            on_error.forget();

            img.set_src(&format!("{ASSET_BASE}{}", id.file_name()));
        }

        for (&id, audio) in &self.sounds {
            let on_data = {
                let game = game.clone();
                Closure::<dyn FnMut()>::new(move || game.borrow_mut().assets_mut().mark_ready(id))
            };
            audio.add_event_listener_with_callback("loadeddata", on_data.as_ref().unchecked_ref())?;
            on_data.forget();

            let on_error = failure_callback(game, id, "audio request failed");
            audio.set_onerror(Some(on_error.as_ref().unchecked_ref()));
            on_error.forget();

            audio.set_preload("auto");
            audio.set_src(&format!("{ASSET_BASE}{}", id.file_name()));
            audio.load();
        }
        Ok(())
    }
}

fn failure_callback(game: &Rc<RefCell<Game>>, id: AssetId, reason: &'static str) -> Closure<dyn FnMut()> {
    let game = game.clone();
    Closure::<dyn FnMut()>::new(move || game.borrow_mut().assets_mut().mark_failed(id, reason))
}

/// [`Surface`] over a canvas 2D context
pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    handles: Rc<AssetHandles>,
}

impl Canvas2dSurface {
    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl Surface for Canvas2dSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn draw_image(&mut self, image: AssetId, rect: Rect, rotation: f32, alpha: f32) {
        let Some(img) = self.handles.images.get(&image) else {
            return;
        };
        let center = rect.center();
        self.ctx.save();
        self.ctx.set_global_alpha(alpha as f64);
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        if rotation != 0.0 {
            let _ = self.ctx.rotate(rotation as f64);
        }
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            -(rect.w as f64) / 2.0,
            -(rect.h as f64) / 2.0,
            rect.w as f64,
            rect.h as f64,
        );
        self.ctx.restore();
    }

    fn text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.ctx.set_font(&style.font());
        self.ctx.set_fill_style_str(&style.color.to_css());
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_text_baseline(match style.baseline {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        });
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}

/// [`AudioBackend`] over `<audio>` elements
pub struct HtmlAudioBackend {
    handles: Rc<AssetHandles>,
}

impl HtmlAudioBackend {
    fn element(&self, id: AssetId) -> Result<&HtmlAudioElement, PlaybackError> {
        self.handles
            .sounds
            .get(&id)
            .filter(|el| el.ready_state() >= AUDIO_READY_STATE)
            .ok_or(PlaybackError::NotReady(id))
    }

    /// `play()` returns a promise; a rejection is only known later, so it is logged then
    fn start(el: &HtmlAudioElement, id: AssetId) -> Result<(), PlaybackError> {
        let promise = el.play().map_err(|e| PlaybackError::Rejected {
            asset: id,
            reason: format!("{e:?}"),
        })?;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                let error = PlaybackError::Rejected {
                    asset: id,
                    reason: format!("{e:?}"),
                };
                log::error!("Audio playback failed: {}", error);
            }
        });
        Ok(())
    }
}

impl AudioBackend for HtmlAudioBackend {
    fn play_music(&mut self, from_start: bool, volume: f32) -> Result<(), PlaybackError> {
        let id = AssetId::BackgroundMusic;
        let el = self.element(id)?;
        el.set_loop(true);
        el.set_volume(volume as f64);
        if from_start {
            el.set_current_time(0.0);
        }
        Self::start(el, id)
    }

    fn pause_music(&mut self) {
        if let Some(el) = self.handles.sounds.get(&AssetId::BackgroundMusic) {
            let _ = el.pause();
        }
    }

    fn set_music_volume(&mut self, volume: f32) {
        if let Some(el) = self.handles.sounds.get(&AssetId::BackgroundMusic) {
            el.set_volume(volume as f64);
        }
    }

    fn play_effect(&mut self, effect: SoundEffect, volume: f32) -> Result<(), PlaybackError> {
        let id = effect.asset();
        let el = self.element(id)?;
        el.set_volume(volume as f64);
        el.set_current_time(0.0);
        Self::start(el, id)
    }
}

/// Boot the game on the page's `#canvas` element
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or("no #canvas element")?
        .dyn_into()?;
    canvas.set_width(WIDTH as u32);
    canvas.set_height(HEIGHT as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2d context unavailable")?
        .dyn_into()?;

    let handles = Rc::new(AssetHandles::create()?);
    let seed = js_sys::Date::now() as u64;
    let game = Rc::new(RefCell::new(Game::new(
        Tuning::default(),
        seed,
        Box::new(LocalStore),
        Box::new(HtmlAudioBackend {
            handles: handles.clone(),
        }),
    )));
    log::info!("Game initialized with seed: {}", seed);

    handles.start_loading(&game)?;
    setup_keyboard(&game)?;
    setup_pointer(&canvas, &game)?;
    setup_auto_pause(&game)?;

    let surface = Canvas2dSurface { ctx, handles };
    request_animation_frame(game, surface);

    log::info!("Dino Run running!");
    Ok(())
}

fn setup_keyboard(game: &Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    let on_down = {
        let game = game.clone();
        Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let code = event.code();
            if CAPTURED_KEYS.contains(&code.as_str()) {
                event.prevent_default();
            }
            if event.repeat() {
                return;
            }
            let mut g = game.borrow_mut();
            if code == MUTE_KEY {
                g.toggle_mute();
                return;
            }
            if let Some(input) = key_down(&code, g.phase()) {
                g.handle_input(input);
            }
        })
    };
    window.add_event_listener_with_callback("keydown", on_down.as_ref().unchecked_ref())?;
    on_down.forget();

    let on_up = {
        let game = game.clone();
        Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(input) = key_up(&event.code()) {
                game.borrow_mut().handle_input(input);
            }
        })
    };
    window.add_event_listener_with_callback("keyup", on_up.as_ref().unchecked_ref())?;
    on_up.forget();
    Ok(())
}

fn setup_pointer(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let on_down = {
        let game = game.clone();
        let canvas = canvas.clone();
        Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            event.prevent_default();
            let r = canvas.get_bounding_client_rect();
            let point = to_surface(
                Vec2::new(event.client_x() as f32, event.client_y() as f32),
                Vec2::new(r.left() as f32, r.top() as f32),
                Vec2::new(r.width() as f32, r.height() as f32),
            );
            game.borrow_mut().pointer_down(point);
        })
    };
    canvas.add_event_listener_with_callback("pointerdown", on_down.as_ref().unchecked_ref())?;
    on_down.forget();

    let on_up = {
        let game = game.clone();
        Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            event.prevent_default();
            game.borrow_mut().pointer_up();
        })
    };
    canvas.add_event_listener_with_callback("pointerup", on_up.as_ref().unchecked_ref())?;
    on_up.forget();

    let no_menu = Closure::<dyn FnMut(_)>::new(|event: web_sys::Event| event.prevent_default());
    canvas.add_event_listener_with_callback("contextmenu", no_menu.as_ref().unchecked_ref())?;
    no_menu.forget();
    Ok(())
}

/// Pause when the tab is hidden or the window loses focus
fn setup_auto_pause(game: &Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let on_visibility = {
        let game = game.clone();
        let document = document.clone();
        Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document.visibility_state() == web_sys::VisibilityState::Hidden {
                pause_if_playing(&game, "tab hidden");
            }
        })
    };
    document.add_event_listener_with_callback("visibilitychange", on_visibility.as_ref().unchecked_ref())?;
    on_visibility.forget();

    let on_blur = {
        let game = game.clone();
        Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| pause_if_playing(&game, "window blur"))
    };
    window.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())?;
    on_blur.forget();
    Ok(())
}

fn pause_if_playing(game: &Rc<RefCell<Game>>, why: &str) {
    let mut g = game.borrow_mut();
    if g.phase() == GamePhase::Playing {
        g.handle_input(InputEvent::Pause);
        log::info!("Auto-paused ({})", why);
    }
}

fn request_animation_frame(game: Rc<RefCell<Game>>, surface: Canvas2dSurface) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(game, surface, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(game: Rc<RefCell<Game>>, mut surface: Canvas2dSurface, time: f64) {
    {
        let mut g = game.borrow_mut();
        g.frame(time);
        g.draw(&mut surface);
    }

    request_animation_frame(game, surface);
}
