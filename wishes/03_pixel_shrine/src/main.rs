//! Pixel Shrine - the hold rite with pixel-art dressing
//!
//! Third pass at the shrine. Same five-second hold as before, now with a
//! pixel portrait on every card, a pixel dagger hanging under the heading,
//! and sparkles when a wish is granted.

mod drawing;
mod sprites;
mod ui;

use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::Egui;
use serde::{Deserialize, Serialize};
use shared::{CharacterId, HoldEngine, HoldEvent, Roster};

use drawing::{CardState, ShrineLayout, BROKEN_FLASH_SECS, GRANTED_FLASH_SECS};

const DEMO_NAME: &str = "pixel_shrine";

fn main() {
    nannou::app(model).update(update).run();
}

/// Persisted settings for this demo
#[derive(Debug, Serialize, Deserialize)]
struct Config {
    reduced_motion: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reduced_motion: false,
        }
    }
}

struct Model {
    egui: Egui,
    roster: Roster,
    engine: HoldEngine,
    /// Green glow and sparkles after a fulfillment, pruned once they fade
    granted_flash: Option<(CharacterId, Instant)>,
    /// Flicker after a hold breaks with progress on the counter
    broken_flash: Option<(CharacterId, Instant)>,
    reduced_motion: bool,
}

fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Pixel Shrine")
        .size(1040, 700)
        .min_size(820, 600)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config: Config = shared::load_config(DEMO_NAME)
        .ok()
        .flatten()
        .unwrap_or_default();

    Model {
        egui,
        roster: Roster::new(),
        engine: HoldEngine::new(),
        granted_flash: None,
        broken_flash: None,
        reduced_motion: config.reduced_motion,
    }
}

/// Persist the current settings, warning on failure rather than crashing.
fn save_config(model: &Model) {
    let config = Config {
        reduced_motion: model.reduced_motion,
    };
    if let Err(e) = shared::save_config(DEMO_NAME, &config) {
        eprintln!("Failed to save config: {}", e);
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);

    model.engine.advance(update.since_last, &mut model.roster);
    for event in model.engine.drain_events() {
        match event {
            HoldEvent::Granted { target } => {
                model.granted_flash = Some((target, Instant::now()));
            }
            HoldEvent::Broken { target, progress } if progress > 0 => {
                model.broken_flash = Some((target, Instant::now()));
            }
            _ => {}
        }
    }

    let hold = model.engine.active_target().and_then(|id| {
        model
            .roster
            .get(id)
            .map(|c| (c.name, model.engine.progress_of(id)))
    });

    let ctx = model.egui.begin_frame();
    let result = ui::draw_controls(
        &ctx,
        model.roster.fulfilled_count(),
        model.roster.len(),
        hold,
        &mut model.reduced_motion,
    );
    drop(ctx);

    if result.reduced_motion_changed {
        save_config(model);
    }

    prune_flashes(model);
}

fn prune_flashes(model: &mut Model) {
    if let Some((_, at)) = model.granted_flash {
        if at.elapsed().as_secs_f32() > GRANTED_FLASH_SECS {
            model.granted_flash = None;
        }
    }
    if let Some((_, at)) = model.broken_flash {
        if at.elapsed().as_secs_f32() > BROKEN_FLASH_SECS {
            model.broken_flash = None;
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();
    let layout = ShrineLayout::calculate(window_rect, model.roster.len());
    let mouse = app.mouse.position();
    let hovered = layout.hit_test_card(mouse.x, mouse.y);

    drawing::draw_backdrop(&draw, window_rect);
    drawing::draw_heading(&draw, window_rect, &layout);
    drawing::draw_page_dagger(&draw, &layout);

    for (i, character) in model.roster.iter().enumerate() {
        let state = CardState {
            hovered: hovered == Some(i),
            holding: model.engine.active_target() == Some(character.id),
            progress: model.engine.fraction_of(character.id),
            granted_flash: flash_age(&model.granted_flash, character.id),
            broken_flash: flash_age(&model.broken_flash, character.id),
        };
        drawing::draw_character_card(
            &draw,
            layout.card_rects[i],
            character,
            state,
            model.reduced_motion,
        );
    }

    if model.roster.all_fulfilled() {
        drawing::draw_all_freed_banner(&draw, window_rect);
    }

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

/// seconds since the flash started, if it belongs to this character
fn flash_age(flash: &Option<(CharacterId, Instant)>, id: CharacterId) -> Option<f32> {
    match flash {
        Some((flash_id, at)) if *flash_id == id => Some(at.elapsed().as_secs_f32()),
        _ => None,
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if key == Key::R {
        model.reduced_motion = !model.reduced_motion;
        save_config(model);
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let layout = ShrineLayout::calculate(app.window_rect(), model.roster.len());
    let mouse = app.mouse.position();
    if let Some(slot) = layout.hit_test_button(mouse.x, mouse.y) {
        if let Some(id) = model.roster.id_at(slot) {
            model.engine.begin(&model.roster, id);
        }
    }
}

fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    model.engine.end();
}

fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    end_hold_if_outside(app, model, pos.x, pos.y);
}

/// Break the live hold when the pointer is no longer over the held button.
fn end_hold_if_outside(app: &App, model: &mut Model, x: f32, y: f32) {
    let target = match model.engine.active_target() {
        Some(target) => target,
        None => return,
    };
    let slot = match model.roster.slot_of(target) {
        Some(slot) => slot,
        None => return,
    };
    let layout = ShrineLayout::calculate(app.window_rect(), model.roster.len());
    let button = ShrineLayout::button_rect(layout.card_rects[slot]);
    if !button.contains(pt2(x, y)) {
        model.engine.end();
    }
}

fn raw_window_event(app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);

    match event {
        nannou::winit::event::WindowEvent::Touch(touch) => {
            let window_rect = app.window_rect();
            let x = touch.location.x as f32 - window_rect.w() / 2.0;
            let y = window_rect.h() / 2.0 - touch.location.y as f32;
            match touch.phase {
                nannou::winit::event::TouchPhase::Started => {
                    let layout = ShrineLayout::calculate(window_rect, model.roster.len());
                    if let Some(slot) = layout.hit_test_button(x, y) {
                        if let Some(id) = model.roster.id_at(slot) {
                            model.engine.begin(&model.roster, id);
                        }
                    }
                }
                nannou::winit::event::TouchPhase::Moved => {
                    end_hold_if_outside(app, model, x, y);
                }
                nannou::winit::event::TouchPhase::Ended
                | nannou::winit::event::TouchPhase::Cancelled => {
                    model.engine.end();
                }
            }
        }
        nannou::winit::event::WindowEvent::Focused(false) => {
            model.engine.end();
        }
        _ => {}
    }
}
