//! Votive Panel - click-to-fulfill wish cards
//!
//! First pass at the shrine. Three characters, each with a wish and a
//! button; a click fulfills the wish outright. Later passes replace the
//! click with a sustained press.

mod drawing;
mod ui;

use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::Egui;
use serde::{Deserialize, Serialize};
use shared::{CharacterId, Roster};

use drawing::{CardState, ShrineLayout, GRANTED_FLASH_SECS};

const DEMO_NAME: &str = "votive_panel";

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
    /// Card slot whose button the pointer went down on
    pressed_slot: Option<usize>,
    /// Green glow after a fulfillment, pruned once it fades
    granted_flash: Option<(CharacterId, Instant)>,
    reduced_motion: bool,
}

fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Votive Panel")
        .size(980, 620)
        .min_size(760, 520)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
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
        pressed_slot: None,
        granted_flash: None,
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
    let ctx = model.egui.begin_frame();
    let result = ui::draw_controls(
        &ctx,
        model.roster.fulfilled_count(),
        model.roster.len(),
        &mut model.reduced_motion,
    );
    drop(ctx);

    if result.reduced_motion_changed {
        save_config(model);
    }

    if let Some((_, at)) = model.granted_flash {
        if at.elapsed().as_secs_f32() > GRANTED_FLASH_SECS {
            model.granted_flash = None;
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
    drawing::draw_heading(&draw, window_rect, layout.heading_y);

    for (i, character) in model.roster.iter().enumerate() {
        let state = CardState {
            hovered: hovered == Some(i),
            pressed: model.pressed_slot == Some(i) && !character.fulfilled,
            granted_flash: flash_age(&model.granted_flash, character.id),
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
            if model.roster.is_eligible(id) {
                model.pressed_slot = Some(slot);
            }
        }
    }
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let slot = match model.pressed_slot.take() {
        Some(slot) => slot,
        None => return,
    };

    // A click only counts if the release lands on the same button.
    let layout = ShrineLayout::calculate(app.window_rect(), model.roster.len());
    let mouse = app.mouse.position();
    if layout.hit_test_button(mouse.x, mouse.y) != Some(slot) {
        return;
    }

    if let Some(id) = model.roster.id_at(slot) {
        if model.roster.fulfill(id) {
            model.granted_flash = Some((id, Instant::now()));
        }
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
