//! Sprites module - pixel-art portraits, the dagger, and the sparkle
//!
//! Sprites are laid out as rows of characters, one character per cell, and
//! rasterized as little squares. '.' is always transparent; every other
//! character maps to a palette slot.

use nannou::prelude::*;
use shared::CharacterId;

pub const PORTRAIT_WIDTH: usize = 12;
pub const PORTRAIT_HEIGHT: usize = 14;

/// Portrait cells: o outline, h hair, s skin, e eyes, m lips, r robe,
/// g robe accent.
pub const PORTRAIT_ROWS: [&str; PORTRAIT_HEIGHT] = [
    "....oooo....",
    "..oohhhhoo..",
    ".ohhhhhhhho.",
    ".ohhhhhhhho.",
    "ohhsssssshho",
    "ohssessessho",
    "ohssssssssho",
    "ohsssmmsssho",
    ".ohssssssho.",
    "..ohhsshho..",
    ".orrrrrrrro.",
    "orrrrggrrrro",
    "orrrrggrrrro",
    "oooooooooooo",
];

pub const DAGGER_WIDTH: usize = 9;
pub const DAGGER_HEIGHT: usize = 15;

/// Dagger cells, tip pointing down: m pommel gem, n handle, g guard,
/// b blade, w edge highlight.
pub const DAGGER_ROWS: [&str; DAGGER_HEIGHT] = [
    "...mmm...",
    "....m....",
    "....n....",
    "....n....",
    "....n....",
    "ggggggggg",
    "...wbb...",
    "...wbb...",
    "...wbb...",
    "...wbb...",
    "...wbb...",
    "...wbb...",
    "...wbb...",
    "....b....",
    "....w....",
];

pub const SPARKLE_SIZE: usize = 7;

/// Four-pointed sparkle: y rays, w core.
pub const SPARKLE_ROWS: [&str; SPARKLE_SIZE] = [
    "...y...",
    "...y...",
    "..ywy..",
    "yywwwyy",
    "..ywy..",
    "...y...",
    "...y...",
];

/// Per-character colors for the portrait cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortraitPalette {
    pub outline: Srgb<u8>,
    pub hair: Srgb<u8>,
    pub skin: Srgb<u8>,
    pub eyes: Srgb<u8>,
    pub lips: Srgb<u8>,
    pub robe: Srgb<u8>,
    pub accent: Srgb<u8>,
}

fn rgb8(red: u8, green: u8, blue: u8) -> Srgb<u8> {
    Srgb {
        red,
        green,
        blue,
        standard: std::marker::PhantomData,
    }
}

/// Palette for a character id. Luna is silver and indigo, Mira auburn and
/// rose, Selene violet and midnight; anyone unknown gets a gray stand-in.
pub fn palette_for(id: CharacterId) -> PortraitPalette {
    let outline = rgb8(25, 18, 40);
    match id {
        1 => PortraitPalette {
            outline,
            hair: rgb8(202, 208, 224),
            skin: rgb8(240, 222, 208),
            eyes: rgb8(70, 72, 112),
            lips: rgb8(190, 120, 132),
            robe: rgb8(58, 48, 128),
            accent: rgb8(142, 132, 222),
        },
        2 => PortraitPalette {
            outline,
            hair: rgb8(152, 76, 46),
            skin: rgb8(236, 206, 182),
            eyes: rgb8(82, 56, 40),
            lips: rgb8(202, 92, 110),
            robe: rgb8(162, 52, 92),
            accent: rgb8(240, 152, 182),
        },
        3 => PortraitPalette {
            outline,
            hair: rgb8(122, 82, 182),
            skin: rgb8(226, 212, 226),
            eyes: rgb8(52, 46, 102),
            lips: rgb8(182, 112, 152),
            robe: rgb8(36, 30, 82),
            accent: rgb8(92, 202, 232),
        },
        _ => PortraitPalette {
            outline,
            hair: rgb8(120, 120, 128),
            skin: rgb8(210, 205, 200),
            eyes: rgb8(60, 60, 66),
            lips: rgb8(150, 110, 115),
            robe: rgb8(80, 80, 92),
            accent: rgb8(140, 140, 155),
        },
    }
}

/// Color of a portrait cell under a palette, None for transparent cells.
pub fn portrait_color(palette: &PortraitPalette, cell: char) -> Option<Srgb<u8>> {
    match cell {
        'o' => Some(palette.outline),
        'h' => Some(palette.hair),
        's' => Some(palette.skin),
        'e' => Some(palette.eyes),
        'm' => Some(palette.lips),
        'r' => Some(palette.robe),
        'g' => Some(palette.accent),
        _ => None,
    }
}

/// Color of a dagger cell, None for transparent cells.
pub fn dagger_color(cell: char) -> Option<Srgb<u8>> {
    match cell {
        'b' => Some(rgb8(190, 196, 206)),
        'w' => Some(rgb8(236, 240, 248)),
        'g' => Some(rgb8(172, 136, 62)),
        'n' => Some(rgb8(92, 62, 42)),
        'm' => Some(rgb8(172, 42, 62)),
        _ => None,
    }
}

/// Color of a sparkle cell, None for transparent cells.
pub fn sparkle_color(cell: char) -> Option<Srgb<u8>> {
    match cell {
        'y' => Some(rgb8(250, 222, 122)),
        'w' => Some(rgb8(255, 255, 255)),
        _ => None,
    }
}

/// Pixel extent of a sprite at a given cell size.
pub fn sprite_extent(rows: &[&str], cell: f32) -> Vec2 {
    let w = rows.first().map(|r| r.len()).unwrap_or(0) as f32;
    vec2(w * cell, rows.len() as f32 * cell)
}

/// Rasterize a sprite centered on `center`, one square per cell.
pub fn draw_sprite(
    draw: &Draw,
    rows: &[&str],
    center: Point2,
    cell: f32,
    color_of: impl Fn(char) -> Option<Srgb<u8>>,
) {
    let height = rows.len() as f32;
    for (row_idx, row) in rows.iter().enumerate() {
        let width = row.len() as f32;
        for (col_idx, ch) in row.chars().enumerate() {
            if let Some(color) = color_of(ch) {
                let x = center.x + (col_idx as f32 - (width - 1.0) / 2.0) * cell;
                let y = center.y + ((height - 1.0) / 2.0 - row_idx as f32) * cell;
                draw.rect().x_y(x, y).w_h(cell, cell).color(color);
            }
        }
    }
}

/// Draw a character portrait centered on `center`.
pub fn draw_portrait(draw: &Draw, center: Point2, cell: f32, palette: &PortraitPalette) {
    draw_sprite(draw, &PORTRAIT_ROWS, center, cell, |ch| {
        portrait_color(palette, ch)
    });
}

/// Draw the dagger centered on `center`, tip down when unrotated.
pub fn draw_dagger(draw: &Draw, center: Point2, cell: f32) {
    draw_sprite(draw, &DAGGER_ROWS, center, cell, dagger_color);
}

/// Draw one sparkle centered on `center`.
pub fn draw_sparkle(draw: &Draw, center: Point2, cell: f32) {
    draw_sprite(draw, &SPARKLE_ROWS, center, cell, sparkle_color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_rows_are_rectangular() {
        assert_eq!(PORTRAIT_ROWS.len(), PORTRAIT_HEIGHT);
        for row in PORTRAIT_ROWS {
            assert_eq!(row.len(), PORTRAIT_WIDTH);
        }
    }

    #[test]
    fn test_dagger_rows_are_rectangular() {
        assert_eq!(DAGGER_ROWS.len(), DAGGER_HEIGHT);
        for row in DAGGER_ROWS {
            assert_eq!(row.len(), DAGGER_WIDTH);
        }
    }

    #[test]
    fn test_sparkle_rows_are_rectangular() {
        assert_eq!(SPARKLE_ROWS.len(), SPARKLE_SIZE);
        for row in SPARKLE_ROWS {
            assert_eq!(row.len(), SPARKLE_SIZE);
        }
    }

    #[test]
    fn test_every_portrait_cell_is_mapped() {
        let palette = palette_for(2);
        for row in PORTRAIT_ROWS {
            for ch in row.chars() {
                if ch != '.' {
                    assert!(
                        portrait_color(&palette, ch).is_some(),
                        "unmapped portrait cell {:?}",
                        ch
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_dagger_cell_is_mapped() {
        for row in DAGGER_ROWS {
            for ch in row.chars() {
                if ch != '.' {
                    assert!(dagger_color(ch).is_some(), "unmapped dagger cell {:?}", ch);
                }
            }
        }
    }

    #[test]
    fn test_every_sparkle_cell_is_mapped() {
        for row in SPARKLE_ROWS {
            for ch in row.chars() {
                if ch != '.' {
                    assert!(sparkle_color(ch).is_some(), "unmapped sparkle cell {:?}", ch);
                }
            }
        }
    }

    #[test]
    fn test_cast_palettes_are_distinct() {
        let luna = palette_for(1);
        let mira = palette_for(2);
        let selene = palette_for(3);
        assert_ne!(luna.hair, mira.hair);
        assert_ne!(mira.robe, selene.robe);
        assert_ne!(luna.accent, selene.accent);
    }

    #[test]
    fn test_sprite_extent() {
        let extent = sprite_extent(&DAGGER_ROWS, 4.0);
        assert_eq!(extent.x, 36.0);
        assert_eq!(extent.y, 60.0);
    }
}
