//! Drawing module - backdrop, pixel-art cards, and the tiltable dagger
//!
//! Fourth-pass rendering: the shrine dagger can now be tilted anywhere
//! between straight down and fully sideways either way, so the layout
//! clears its whole swing circle rather than its resting silhouette.

use nannou::prelude::*;
use shared::Character;

use crate::sprites;

/// Height reserved at the bottom for the egui controls panel.
pub const CONTROLS_PANEL_HEIGHT: f32 = 96.0;

/// How long the green glow and sparkles linger after a fulfillment.
pub const GRANTED_FLASH_SECS: f32 = 1.2;

/// How long the broken-hold flicker lasts.
pub const BROKEN_FLASH_SECS: f32 = 0.35;

/// Cell size for card portraits.
pub const PORTRAIT_CELL: f32 = 6.0;

/// Cell size for the shrine dagger.
pub const DAGGER_CELL: f32 = 4.0;

/// The dagger tilts at most this far to either side of straight down.
pub const ANGLE_LIMIT_DEG: f32 = 90.0;

/// Clamp a tilt to the supported range.
pub fn clamp_angle(deg: f32) -> f32 {
    deg.clamp(-ANGLE_LIMIT_DEG, ANGLE_LIMIT_DEG)
}

/// Color palette for the shrine theme
pub mod colors {
    use nannou::prelude::*;

    /// Deep purple, top and bottom of the backdrop
    pub const BACKDROP_EDGE: Srgb<u8> = Srgb {
        red: 88,
        green: 28,
        blue: 135,
        standard: std::marker::PhantomData,
    };

    /// Lighter purple, middle of the backdrop
    pub const BACKDROP_MID: Srgb<u8> = Srgb {
        red: 126,
        green: 34,
        blue: 206,
        standard: std::marker::PhantomData,
    };

    /// Card background
    pub const CARD_BG: Srgb<u8> = Srgb {
        red: 107,
        green: 33,
        blue: 168,
        standard: std::marker::PhantomData,
    };

    /// Action button at rest
    pub const BUTTON: Srgb<u8> = Srgb {
        red: 220,
        green: 38,
        blue: 38,
        standard: std::marker::PhantomData,
    };

    /// Action button under the pointer
    pub const BUTTON_HOVER: Srgb<u8> = Srgb {
        red: 185,
        green: 28,
        blue: 28,
        standard: std::marker::PhantomData,
    };

    /// Action button while held
    pub const BUTTON_ACTIVE: Srgb<u8> = Srgb {
        red: 153,
        green: 27,
        blue: 27,
        standard: std::marker::PhantomData,
    };

    /// Progress fill sweeping across a held button
    pub const PROGRESS_FILL: Srgb<u8> = Srgb {
        red: 248,
        green: 113,
        blue: 113,
        standard: std::marker::PhantomData,
    };

    /// Freed line, glow, and sparkle tint
    pub const FULFILLED: Srgb<u8> = Srgb {
        red: 74,
        green: 222,
        blue: 128,
        standard: std::marker::PhantomData,
    };

    /// Primary text
    pub const TEXT_PRIMARY: Srgb<u8> = Srgb {
        red: 245,
        green: 240,
        blue: 250,
        standard: std::marker::PhantomData,
    };

    /// Secondary text (wish lines, the hint)
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 205,
        green: 185,
        blue: 225,
        standard: std::marker::PhantomData,
    };

    /// Card drop shadow (use shadow() for the alpha)
    pub fn shadow() -> Srgba<u8> {
        srgba(30, 8, 50, 110)
    }
}

/// Geometry for the heading, hint, dagger, and the card slots
#[derive(Debug, Clone)]
pub struct ShrineLayout {
    pub heading_y: f32,
    pub hint_y: f32,
    /// Pivot of the shrine dagger under the hint
    pub dagger_y: f32,
    /// One rect per character card, in display order
    pub card_rects: Vec<Rect>,
}

impl ShrineLayout {
    /// Calculate the layout from the window dimensions. The card row clears
    /// the dagger's full swing circle, not just its upright extent.
    pub fn calculate(window_rect: Rect, card_count: usize) -> Self {
        let heading_y = window_rect.top() - 48.0;
        let hint_y = heading_y - 34.0;
        let dagger_y = heading_y - 92.0;

        let swing_radius = sprites::sprite_extent(&sprites::DAGGER_ROWS, DAGGER_CELL).length() / 2.0;
        let usable_top = dagger_y - swing_radius - 8.0;
        let usable_bottom = window_rect.bottom() + CONTROLS_PANEL_HEIGHT + 24.0;
        let center_y = (usable_top + usable_bottom) / 2.0;
        let card_h = (usable_top - usable_bottom).min(380.0);

        let margin = 32.0;
        let gap = 24.0;
        let count = card_count.max(1) as f32;
        let avail_w = window_rect.w() - margin * 2.0;
        let card_w = ((avail_w - gap * (count - 1.0)) / count).min(300.0);

        let row_w = card_w * count + gap * (count - 1.0);
        let start_x = -row_w / 2.0 + card_w / 2.0;

        let card_rects = (0..card_count)
            .map(|i| {
                let x = start_x + i as f32 * (card_w + gap);
                Rect::from_x_y_w_h(x, center_y, card_w, card_h)
            })
            .collect();

        Self {
            heading_y,
            hint_y,
            dagger_y,
            card_rects,
        }
    }

    /// The action button rect inside a card.
    pub fn button_rect(card: Rect) -> Rect {
        Rect::from_x_y_w_h(card.x(), card.bottom() + 52.0, card.w() - 48.0, 44.0)
    }

    /// The slice of a button covered by a hold at `fraction` of the dwell,
    /// anchored at the button's left edge.
    pub fn progress_fill_rect(button: Rect, fraction: f32) -> Rect {
        let f = fraction.clamp(0.0, 1.0);
        let w = button.w() * f;
        Rect::from_x_y_w_h(button.left() + w / 2.0, button.y(), w, button.h())
    }

    /// Center of the portrait near the top of a card.
    pub fn portrait_center(card: Rect) -> Point2 {
        pt2(card.x(), card.top() - 72.0)
    }

    /// Which card's button is under (x, y), if any.
    pub fn hit_test_button(&self, x: f32, y: f32) -> Option<usize> {
        self.card_rects
            .iter()
            .position(|&card| Self::button_rect(card).contains(pt2(x, y)))
    }

    /// Which card is under (x, y), if any.
    pub fn hit_test_card(&self, x: f32, y: f32) -> Option<usize> {
        self.card_rects.iter().position(|&r| r.contains(pt2(x, y)))
    }
}

/// Per-frame display state for one card
#[derive(Debug, Clone, Copy, Default)]
pub struct CardState {
    /// Pointer is over the card
    pub hovered: bool,
    /// This card's character is the live hold target
    pub holding: bool,
    /// Hold progress as a 0.0..=1.0 fraction (0.0 for non-targets)
    pub progress: f32,
    /// Seconds since the wish was granted, while the glow lasts
    pub granted_flash: Option<f32>,
    /// Seconds since a hold on this card broke, while the flicker lasts
    pub broken_flash: Option<f32>,
}

/// Draw the purple backdrop: a dark base with a lighter mid-field, faded
/// with stacked translucent strips.
pub fn draw_backdrop(draw: &Draw, window_rect: Rect) {
    draw.background().color(colors::BACKDROP_EDGE);

    let steps = 12;
    for i in 0..steps {
        let t = i as f32 / steps as f32;
        let h = window_rect.h() * 0.72 * (1.0 - t);
        draw.rect()
            .x_y(0.0, 0.0)
            .w_h(window_rect.w(), h)
            .color(srgba(
                colors::BACKDROP_MID.red,
                colors::BACKDROP_MID.green,
                colors::BACKDROP_MID.blue,
                20,
            ));
    }
}

/// Draw the page heading and the hold hint.
pub fn draw_heading(draw: &Draw, window_rect: Rect, layout: &ShrineLayout) {
    draw.text("Fulfill the NPCs' Biggest Wish")
        .x_y(0.0, layout.heading_y)
        .color(colors::TEXT_PRIMARY)
        .font_size(30)
        .w(window_rect.w() - 60.0);

    draw.text("Hold the button for five full seconds. Release too soon and the rite is broken.")
        .x_y(0.0, layout.hint_y)
        .color(colors::TEXT_SECONDARY)
        .font_size(14)
        .w(window_rect.w() - 80.0);
}

/// Draw the shrine dagger at its tilt, rotating about its own center.
/// Zero degrees is tip straight down; positive tilts clockwise.
pub fn draw_page_dagger(draw: &Draw, layout: &ShrineLayout, angle_deg: f32) {
    let tilted = draw
        .x_y(0.0, layout.dagger_y)
        .rotate(-clamp_angle(angle_deg).to_radians());
    sprites::draw_dagger(&tilted, pt2(0.0, 0.0), DAGGER_CELL);
}

/// Sparkle cell size over the life of a granted flash, None once it is over.
fn sparkle_cell(age: f32, reduced_motion: bool) -> Option<f32> {
    if reduced_motion {
        if age < 0.4 {
            return Some(4.0);
        }
        return None;
    }
    if age >= GRANTED_FLASH_SECS {
        return None;
    }
    let t = (age / 0.35).min(1.0);
    Some(2.0 + 3.0 * (1.0 - (1.0 - t) * (1.0 - t)))
}

/// Draw one character card: portrait, name, wish, and the hold-aware button.
pub fn draw_character_card(
    draw: &Draw,
    card: Rect,
    character: &Character,
    state: CardState,
    reduced_motion: bool,
) {
    let card = if state.hovered && !reduced_motion {
        Rect::from_x_y_w_h(card.x(), card.y(), card.w() * 1.05, card.h() * 1.05)
    } else {
        card
    };

    draw.rect()
        .x_y(card.x() + 5.0, card.y() - 5.0)
        .w_h(card.w(), card.h())
        .color(colors::shadow());
    draw.rect()
        .xy(card.xy())
        .wh(card.wh())
        .color(colors::CARD_BG);

    if let Some(age) = state.granted_flash {
        let alpha = if reduced_motion {
            if age < 0.4 { 200 } else { 0 }
        } else {
            let t = (1.0 - age / GRANTED_FLASH_SECS).clamp(0.0, 1.0);
            (t * 220.0) as u8
        };
        if alpha > 0 {
            draw.rect()
                .xy(card.xy())
                .w_h(card.w() + 10.0, card.h() + 10.0)
                .no_fill()
                .stroke(srgba(
                    colors::FULFILLED.red,
                    colors::FULFILLED.green,
                    colors::FULFILLED.blue,
                    alpha,
                ))
                .stroke_weight(3.0);
        }
    }

    let portrait_center = ShrineLayout::portrait_center(card);
    let palette = sprites::palette_for(character.id);
    sprites::draw_portrait(draw, portrait_center, PORTRAIT_CELL, &palette);

    if let Some(age) = state.granted_flash {
        if let Some(cell) = sparkle_cell(age, reduced_motion) {
            sprites::draw_sparkle(draw, portrait_center + vec2(-48.0, 28.0), cell);
            sprites::draw_sparkle(draw, portrait_center + vec2(50.0, 12.0), cell * 0.8);
            sprites::draw_sparkle(draw, portrait_center + vec2(-22.0, -44.0), cell * 0.6);
        }
    }

    draw.text(character.name)
        .x_y(card.x(), card.top() - 138.0)
        .color(colors::TEXT_PRIMARY)
        .font_size(22)
        .w(card.w() - 32.0);

    let wish_line = format!("\u{201c}{}\u{201d}", character.wish);
    draw.text(&wish_line)
        .x_y(card.x(), card.top() - 186.0)
        .color(colors::TEXT_SECONDARY)
        .font_size(15)
        .w(card.w() - 40.0);

    let button = ShrineLayout::button_rect(card);
    if character.fulfilled {
        draw.text("Wish fulfilled! She has been freed.")
            .xy(button.xy())
            .color(colors::FULFILLED)
            .font_size(15)
            .w(card.w() - 40.0);
        return;
    }

    let fill = if state.holding {
        colors::BUTTON_ACTIVE
    } else if state.hovered {
        colors::BUTTON_HOVER
    } else {
        colors::BUTTON
    };
    draw.rect().xy(button.xy()).wh(button.wh()).color(fill);

    if state.progress > 0.0 {
        let sweep = ShrineLayout::progress_fill_rect(button, state.progress);
        draw.rect()
            .xy(sweep.xy())
            .wh(sweep.wh())
            .color(colors::PROGRESS_FILL);
    }

    draw.text("Fulfill Wish (Stab)")
        .xy(button.xy())
        .color(colors::TEXT_PRIMARY)
        .font_size(15)
        .w(button.w() - 8.0);

    if let Some(age) = state.broken_flash {
        if !reduced_motion {
            let t = (1.0 - age / BROKEN_FLASH_SECS).clamp(0.0, 1.0);
            draw.rect()
                .xy(button.xy())
                .w_h(button.w() + 8.0, button.h() + 8.0)
                .no_fill()
                .stroke(srgba(255, 200, 200, (t * 200.0) as u8))
                .stroke_weight(2.0);
        }
    }
}

/// Draw the closing banner once every wish on the roster is fulfilled.
pub fn draw_all_freed_banner(draw: &Draw, window_rect: Rect) {
    let banner_y = window_rect.bottom() + CONTROLS_PANEL_HEIGHT + 36.0;

    draw.rect()
        .x_y(0.0, banner_y)
        .w_h(window_rect.w().min(460.0), 36.0)
        .color(srgba(20u8, 60u8, 35u8, 210u8));
    draw.text("All three have been freed.")
        .x_y(0.0, banner_y)
        .color(colors::FULFILLED)
        .font_size(16)
        .w(420.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_window() -> Rect {
        Rect::from_x_y_w_h(0.0, 0.0, 1040.0, 700.0)
    }

    #[test]
    fn test_clamp_angle() {
        assert_eq!(clamp_angle(0.0), 0.0);
        assert_eq!(clamp_angle(45.0), 45.0);
        assert_eq!(clamp_angle(120.0), ANGLE_LIMIT_DEG);
        assert_eq!(clamp_angle(-361.0), -ANGLE_LIMIT_DEG);
    }

    #[test]
    fn test_cards_clear_the_swing_circle() {
        let layout = ShrineLayout::calculate(test_window(), 3);
        let swing_radius =
            sprites::sprite_extent(&sprites::DAGGER_ROWS, DAGGER_CELL).length() / 2.0;
        for &card in &layout.card_rects {
            assert!(card.top() < layout.dagger_y - swing_radius);
        }
    }

    #[test]
    fn test_cards_do_not_overlap() {
        let layout = ShrineLayout::calculate(test_window(), 3);
        for pair in layout.card_rects.windows(2) {
            assert!(pair[0].right() < pair[1].left());
        }
    }

    #[test]
    fn test_sparkle_cell_pops_then_ends() {
        let start = sparkle_cell(0.0, false).unwrap();
        let later = sparkle_cell(0.3, false).unwrap();
        assert!(later > start);
        assert!(sparkle_cell(GRANTED_FLASH_SECS + 0.1, false).is_none());
    }

    #[test]
    fn test_progress_fill_spans_the_button() {
        let button = Rect::from_x_y_w_h(0.0, 0.0, 200.0, 44.0);
        let full = ShrineLayout::progress_fill_rect(button, 1.0);
        assert_eq!(full.w(), button.w());
        assert_eq!(full.right(), button.right());
    }
}
