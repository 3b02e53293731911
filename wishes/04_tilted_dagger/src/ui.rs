//! UI module - egui controls panel
//!
//! Bottom panel with the freed tally, the live hold readout, the dagger
//! tilt slider, and the reduced-motion toggle.

use nannou_egui::egui;

use crate::drawing::ANGLE_LIMIT_DEG;

/// What the panel changed this frame
#[derive(Debug, Default)]
pub struct ControlsResult {
    /// Reduced-motion checkbox was toggled
    pub reduced_motion_changed: bool,
    /// Dagger tilt slider was dragged
    pub angle_changed: bool,
}

/// Draw the controls panel.
///
/// `hold` is the live session as (character name, progress 0..=100), absent
/// when nothing is held. Both `reduced_motion` and `dagger_angle_deg` are
/// mutated in place; the result says which of them the caller should persist.
pub fn draw_controls(
    ctx: &egui::Context,
    freed: usize,
    total: usize,
    hold: Option<(&str, u8)>,
    reduced_motion: &mut bool,
    dagger_angle_deg: &mut f32,
) -> ControlsResult {
    let mut result = ControlsResult::default();

    egui::TopBottomPanel::bottom("controls_panel")
        .resizable(false)
        .min_height(88.0)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Tilted Dagger");
            ui.horizontal(|ui| {
                ui.label(format!("Freed: {} / {}", freed, total));
                ui.separator();
                match hold {
                    Some((name, progress)) => {
                        ui.label(format!("Holding {}: {}%", name, progress));
                    }
                    None => {
                        ui.label("No hold in progress");
                    }
                }
                ui.separator();
                if ui
                    .checkbox(reduced_motion, "Reduced motion (R)")
                    .changed()
                {
                    result.reduced_motion_changed = true;
                }
            });
            ui.horizontal(|ui| {
                ui.label("Dagger tilt:");
                let slider = egui::Slider::new(dagger_angle_deg, -ANGLE_LIMIT_DEG..=ANGLE_LIMIT_DEG)
                    .show_value(true)
                    .suffix("\u{b0}");
                if ui
                    .add(slider)
                    .on_hover_text("Tilt the shrine dagger; arrow keys nudge it")
                    .changed()
                {
                    result.angle_changed = true;
                }
            });
            ui.add_space(4.0);
        });

    result
}
