//! Drawing module - backdrop, character cards, and layout geometry
//!
//! Renders the three-card shrine with nannou's Draw API: a purple gradient
//! backdrop, one card per character, and the action button or the freed line.

use nannou::prelude::*;
use shared::Character;

/// Height reserved at the bottom for the egui controls panel.
pub const CONTROLS_PANEL_HEIGHT: f32 = 96.0;

/// How long the green glow lingers after a wish is fulfilled.
pub const GRANTED_FLASH_SECS: f32 = 1.2;

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

    /// Action button while pressed
    pub const BUTTON_ACTIVE: Srgb<u8> = Srgb {
        red: 153,
        green: 27,
        blue: 27,
        standard: std::marker::PhantomData,
    };

    /// Freed line and glow
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

    /// Secondary text (wish lines)
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

/// Geometry for the heading and the three card slots
#[derive(Debug, Clone)]
pub struct ShrineLayout {
    /// Y position of the page heading
    pub heading_y: f32,
    /// One rect per character card, in display order
    pub card_rects: Vec<Rect>,
}

impl ShrineLayout {
    /// Calculate the layout from the window dimensions.
    ///
    /// Cards sit in a centered row between the heading and the controls
    /// panel, capped so they never grow past their design size.
    pub fn calculate(window_rect: Rect, card_count: usize) -> Self {
        let heading_y = window_rect.top() - 48.0;

        let usable_top = heading_y - 40.0;
        let usable_bottom = window_rect.bottom() + CONTROLS_PANEL_HEIGHT + 24.0;
        let center_y = (usable_top + usable_bottom) / 2.0;
        let card_h = (usable_top - usable_bottom).min(340.0);

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
            card_rects,
        }
    }

    /// The action button rect inside a card.
    pub fn button_rect(card: Rect) -> Rect {
        Rect::from_x_y_w_h(card.x(), card.bottom() + 52.0, card.w() - 48.0, 44.0)
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
    /// Pointer is down on the card's button
    pub pressed: bool,
    /// Seconds since the wish was granted, while the glow lasts
    pub granted_flash: Option<f32>,
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

/// Draw the page heading.
pub fn draw_heading(draw: &Draw, window_rect: Rect, heading_y: f32) {
    draw.text("Fulfill the NPCs' Biggest Wish")
        .x_y(0.0, heading_y)
        .color(colors::TEXT_PRIMARY)
        .font_size(30)
        .w(window_rect.w() - 60.0);
}

/// Draw one character card: name, quoted wish, and either the action button
/// or the freed line once her wish is fulfilled.
pub fn draw_character_card(
    draw: &Draw,
    card: Rect,
    character: &Character,
    state: CardState,
    reduced_motion: bool,
) {
    // Hover lift.
    let card = if state.hovered && !reduced_motion {
        Rect::from_x_y_w_h(card.x(), card.y(), card.w() * 1.05, card.h() * 1.05)
    } else {
        card
    };

    // Drop shadow, then the card itself.
    draw.rect()
        .x_y(card.x() + 5.0, card.y() - 5.0)
        .w_h(card.w(), card.h())
        .color(colors::shadow());
    draw.rect()
        .xy(card.xy())
        .wh(card.wh())
        .color(colors::CARD_BG);

    // Granted glow: a green outline that fades out.
    if let Some(age) = state.granted_flash {
        let alpha = if reduced_motion {
            // Static outline for a shorter window instead of a fade.
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

    // Name and wish.
    draw.text(character.name)
        .x_y(card.x(), card.top() - 36.0)
        .color(colors::TEXT_PRIMARY)
        .font_size(22)
        .w(card.w() - 32.0);

    let wish_line = format!("\u{201c}{}\u{201d}", character.wish);
    draw.text(&wish_line)
        .x_y(card.x(), card.top() - 92.0)
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
    } else {
        let fill = if state.pressed {
            colors::BUTTON_ACTIVE
        } else if state.hovered {
            colors::BUTTON_HOVER
        } else {
            colors::BUTTON
        };
        draw.rect().xy(button.xy()).wh(button.wh()).color(fill);
        draw.text("Fulfill Wish (Stab)")
            .xy(button.xy())
            .color(colors::TEXT_PRIMARY)
            .font_size(15)
            .w(button.w() - 8.0);
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
        Rect::from_x_y_w_h(0.0, 0.0, 980.0, 620.0)
    }

    #[test]
    fn test_layout_produces_one_rect_per_card() {
        let layout = ShrineLayout::calculate(test_window(), 3);
        assert_eq!(layout.card_rects.len(), 3);
    }

    #[test]
    fn test_cards_do_not_overlap() {
        let layout = ShrineLayout::calculate(test_window(), 3);
        for pair in layout.card_rects.windows(2) {
            assert!(pair[0].right() < pair[1].left());
        }
    }

    #[test]
    fn test_button_sits_inside_card() {
        let layout = ShrineLayout::calculate(test_window(), 3);
        for &card in &layout.card_rects {
            let button = ShrineLayout::button_rect(card);
            assert!(button.left() > card.left());
            assert!(button.right() < card.right());
            assert!(button.bottom() > card.bottom());
            assert!(button.top() < card.top());
        }
    }

    #[test]
    fn test_hit_test_button() {
        let layout = ShrineLayout::calculate(test_window(), 3);
        let button = ShrineLayout::button_rect(layout.card_rects[1]);
        assert_eq!(layout.hit_test_button(button.x(), button.y()), Some(1));

        // The gap between cards hits nothing.
        let c0 = layout.card_rects[0];
        let c1 = layout.card_rects[1];
        let gap_x = (c0.right() + c1.left()) / 2.0;
        assert_eq!(layout.hit_test_button(gap_x, button.y()), None);
        assert_eq!(layout.hit_test_card(gap_x, 0.0), None);
    }

    #[test]
    fn test_hit_test_card() {
        let layout = ShrineLayout::calculate(test_window(), 3);
        for (i, &card) in layout.card_rects.iter().enumerate() {
            assert_eq!(layout.hit_test_card(card.x(), card.y()), Some(i));
        }
    }
}
