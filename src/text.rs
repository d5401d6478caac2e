//! Characters and scrolling text on the 8x8 grid.
//!
//! Glyphs come from a caller supplied font table: 8 bytes per character code, one per row from
//! the top, the most significant bit being the leftmost column.

use crate::{Family, LedColor, LedCommand};

/// How far a glyph may be shifted sideways before it has left the grid
pub const MAX_OFFSET: i8 = 8;

const GLYPH_HEIGHT: usize = 8;

#[derive(Debug, Copy, Clone)]
pub struct Font<'a> {
    table: &'a [u8],
}

impl<'a> Font<'a> {
    pub fn new(table: &'a [u8]) -> Self {
        Self { table }
    }

    /// The rows of a character. Codes above 255 use glyph 255; characters the table doesn't reach
    /// are blank.
    pub fn glyph(&self, ch: char) -> [u8; GLYPH_HEIGHT] {
        let code = (ch as u32).min(255) as usize;
        let mut rows = [0; GLYPH_HEIGHT];
        if let Some(glyph) = self.table.get(code * GLYPH_HEIGHT..(code + 1) * GLYPH_HEIGHT) {
            rows.copy_from_slice(glyph);
        }
        rows
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ScrollDirection {
    /// Show one character after the other
    #[default]
    None,
    Left,
    Right,
}

/// A character drawn with a lateral offset
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Placement {
    pub ch: char,
    pub offset: i8,
}

/// What to draw in one frame; every frame is shown for the same time
pub type Frame = Vec<Placement>;

/// Lays out the frames of a text scrolling in `direction`.
///
/// While scrolling, two characters are visible at a time. Without scrolling each character is
/// held for 4 frames.
pub fn scroll_frames(text: &str, direction: ScrollDirection) -> Vec<Frame> {
    match direction {
        ScrollDirection::None => text
            .chars()
            .flat_map(|ch| std::iter::repeat(vec![Placement { ch, offset: 0 }]).take(4))
            .collect(),
        // Padded with blanks so full width characters leave no artifacts
        ScrollDirection::Left => {
            let chars: Vec<char> = text.chars().chain([' ']).collect();
            (0..(chars.len() + 1) * 8)
                .map(|n| scroll_frame(&chars, n))
                .collect()
        }
        ScrollDirection::Right => {
            let chars: Vec<char> = [' '].into_iter().chain(text.chars()).chain([' ']).collect();
            (1..=(chars.len() + 1) * 8 - 7)
                .rev()
                .map(|n| scroll_frame(&chars, n))
                .collect()
        }
    }
}

/// Frame `n` of a scroll: even characters enter every 16 frames, odd ones 8 frames later
fn scroll_frame(chars: &[char], n: usize) -> Frame {
    let pick = |index: usize| chars[index.min(chars.len() - 1)];
    let offset = |n: usize| MAX_OFFSET - (n % 16) as i8;

    let mut frame = Vec::with_capacity(2);
    if n <= chars.len() * 8 {
        frame.push(Placement {
            ch: pick(n / 16 * 2),
            offset: offset(n),
        });
    }
    if n > 7 {
        frame.push(Placement {
            ch: pick((n - 8) / 16 * 2 + 1),
            offset: offset(n - 8),
        });
    }
    frame
}

/// The LED commands drawing `ch`, shifted right by `offset` columns (left if negative).
///
/// Only the columns that stay on the grid are drawn: lit pixels in `color`, the others in
/// `background`. Coordinates are in [`Layout::Classic`](crate::Layout::Classic), so they have to
/// be encoded in that layout. Empty if the family has no grid to draw text on.
pub fn render_char(
    family: Family,
    font: &Font<'_>,
    ch: char,
    offset: i8,
    color: LedColor,
    background: LedColor,
) -> Vec<LedCommand> {
    let Some(origin) = family.descriptor().text_origin else {
        return Vec::new();
    };
    let offset = offset.clamp(-MAX_OFFSET, MAX_OFFSET);

    let mut commands = Vec::with_capacity(64);
    for (row, bits) in font.glyph(ch).into_iter().enumerate() {
        for column in 0..8i8 {
            let target = column + offset;
            if !(0..8).contains(&target) {
                continue;
            }
            let lit = bits & (0x80 >> column) != 0;
            commands.push(LedCommand::Xy {
                x: origin.x + target as u8,
                y: origin.y + row as u8,
                color: if lit { color } else { background },
            });
        }
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(ch: char, offset: i8) -> Placement {
        Placement { ch, offset }
    }

    fn font_table() -> Vec<u8> {
        let mut table = vec![0; 128 * 8];
        // 'A' with the outer columns of its first row lit
        table[65 * 8] = 0x81;
        table
    }

    #[test]
    fn glyph_lookup() {
        let table = font_table();
        let font = Font::new(&table);
        assert_eq!(font.glyph('A')[0], 0x81);
        assert_eq!(font.glyph('€'), [0; 8]);
    }

    #[test]
    fn scrolling_left() {
        let frames = scroll_frames("A", ScrollDirection::Left);
        assert_eq!(frames.len(), 24);
        assert_eq!(frames[0], vec![placement('A', 8)]);
        assert_eq!(frames[8], vec![placement('A', 0), placement(' ', 8)]);
        assert_eq!(frames[23], vec![placement(' ', -7)]);
    }

    #[test]
    fn scrolling_right_runs_backwards() {
        let frames = scroll_frames("A", ScrollDirection::Right);
        assert_eq!(frames.len(), 25);
        assert_eq!(frames[0], vec![placement(' ', 7)]);
        assert_eq!(frames[24], vec![placement(' ', 7)]);
        assert_eq!(frames[17], vec![placement(' ', 0), placement('A', 8)]);
    }

    #[test]
    fn holding_characters() {
        let frames = scroll_frames("AB", ScrollDirection::None);
        assert_eq!(frames.len(), 8);
        assert_eq!(frames[3], vec![placement('A', 0)]);
        assert_eq!(frames[4], vec![placement('B', 0)]);
        assert!(scroll_frames("", ScrollDirection::None).is_empty());
    }

    #[test]
    fn rendering() {
        let table = font_table();
        let font = Font::new(&table);
        let on = LedColor::Code(5);

        let commands = render_char(Family::LaunchpadMk1, &font, 'A', 0, on, LedColor::OFF);
        assert_eq!(commands.len(), 64);
        assert_eq!(commands[0], LedCommand::xy(0, 1, on));
        assert_eq!(commands[1], LedCommand::xy(1, 1, LedColor::OFF));
        assert_eq!(commands[7], LedCommand::xy(7, 1, on));

        let commands = render_char(Family::LaunchpadMk1, &font, 'A', 4, on, LedColor::OFF);
        assert_eq!(commands.len(), 32);
        assert_eq!(commands[0], LedCommand::xy(4, 1, on));

        let commands = render_char(Family::LaunchpadMk1, &font, 'A', -7, on, LedColor::OFF);
        let expected: Vec<_> = (1..=8)
            .map(|y| LedCommand::xy(0, y, if y == 1 { on } else { LedColor::OFF }))
            .collect();
        assert_eq!(commands, expected);

        assert!(render_char(Family::Dicer, &font, 'A', 0, on, LedColor::OFF).is_empty());
    }
}
