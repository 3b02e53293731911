//! UI module - egui controls panel
//!
//! Bottom panel with the freed tally, the live hold readout, and the
//! reduced-motion toggle.

use nannou_egui::egui;

/// What the panel changed this frame
#[derive(Debug, Default)]
pub struct ControlsResult {
    /// Reduced-motion checkbox was toggled
    pub reduced_motion_changed: bool,
}

/// Draw the controls panel.
///
/// `hold` is the live session as (character name, progress 0..=100), absent
/// when nothing is held.
pub fn draw_controls(
    ctx: &egui::Context,
    freed: usize,
    total: usize,
    hold: Option<(&str, u8)>,
    reduced_motion: &mut bool,
) -> ControlsResult {
    let mut result = ControlsResult::default();

    egui::TopBottomPanel::bottom("controls_panel")
        .resizable(false)
        .min_height(72.0)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Pixel Shrine");
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
            ui.add_space(4.0);
        });

    result
}
