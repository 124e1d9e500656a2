use std::collections::HashMap;
use maplit::hashmap;
use crate::rendering::blittable::PixelTarget;
use crate::rendering::fonts::font_align::{HorizontalAlignment, VerticalAlignment};

pub const GLYPH_WIDTH: i32 = 5;
pub const GLYPH_HEIGHT: i32 = 7;

/// Column-major 5x7 bitmaps for printable ascii, bit 0 is the top row.
const ASCII_GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], [0x00, 0x00, 0x5F, 0x00, 0x00], [0x00, 0x07, 0x00, 0x07, 0x00],
    [0x14, 0x7F, 0x14, 0x7F, 0x14], [0x24, 0x2A, 0x7F, 0x2A, 0x12], [0x23, 0x13, 0x08, 0x64, 0x62],
    [0x36, 0x49, 0x56, 0x20, 0x50], [0x00, 0x05, 0x03, 0x00, 0x00], [0x00, 0x1C, 0x22, 0x41, 0x00],
    [0x00, 0x41, 0x22, 0x1C, 0x00], [0x2A, 0x1C, 0x7F, 0x1C, 0x2A], [0x08, 0x08, 0x3E, 0x08, 0x08],
    [0x00, 0x50, 0x30, 0x00, 0x00], [0x08, 0x08, 0x08, 0x08, 0x08], [0x00, 0x60, 0x60, 0x00, 0x00],
    [0x20, 0x10, 0x08, 0x04, 0x02], [0x3E, 0x51, 0x49, 0x45, 0x3E], [0x00, 0x42, 0x7F, 0x40, 0x00],
    [0x42, 0x61, 0x51, 0x49, 0x46], [0x21, 0x41, 0x45, 0x4B, 0x31], [0x18, 0x14, 0x12, 0x7F, 0x10],
    [0x27, 0x45, 0x45, 0x45, 0x39], [0x3C, 0x4A, 0x49, 0x49, 0x30], [0x01, 0x71, 0x09, 0x05, 0x03],
    [0x36, 0x49, 0x49, 0x49, 0x36], [0x06, 0x49, 0x49, 0x29, 0x1E], [0x00, 0x36, 0x36, 0x00, 0x00],
    [0x00, 0x56, 0x36, 0x00, 0x00], [0x08, 0x14, 0x22, 0x41, 0x00], [0x14, 0x14, 0x14, 0x14, 0x14],
    [0x00, 0x41, 0x22, 0x14, 0x08], [0x02, 0x01, 0x51, 0x09, 0x06], [0x32, 0x49, 0x79, 0x41, 0x3E],
    [0x7E, 0x11, 0x11, 0x11, 0x7E], [0x7F, 0x49, 0x49, 0x49, 0x36], [0x3E, 0x41, 0x41, 0x41, 0x22],
    [0x7F, 0x41, 0x41, 0x22, 0x1C], [0x7F, 0x49, 0x49, 0x49, 0x41], [0x7F, 0x09, 0x09, 0x09, 0x01],
    [0x3E, 0x41, 0x49, 0x49, 0x7A], [0x7F, 0x08, 0x08, 0x08, 0x7F], [0x00, 0x41, 0x7F, 0x41, 0x00],
    [0x20, 0x40, 0x41, 0x3F, 0x01], [0x7F, 0x08, 0x14, 0x22, 0x41], [0x7F, 0x40, 0x40, 0x40, 0x40],
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], [0x7F, 0x04, 0x08, 0x10, 0x7F], [0x3E, 0x41, 0x41, 0x41, 0x3E],
    [0x7F, 0x09, 0x09, 0x09, 0x06], [0x3E, 0x41, 0x51, 0x21, 0x5E], [0x7F, 0x09, 0x19, 0x29, 0x46],
    [0x46, 0x49, 0x49, 0x49, 0x31], [0x01, 0x01, 0x7F, 0x01, 0x01], [0x3F, 0x40, 0x40, 0x40, 0x3F],
    [0x1F, 0x20, 0x40, 0x20, 0x1F], [0x3F, 0x40, 0x38, 0x40, 0x3F], [0x63, 0x14, 0x08, 0x14, 0x63],
    [0x07, 0x08, 0x70, 0x08, 0x07], [0x61, 0x51, 0x49, 0x45, 0x43], [0x00, 0x7F, 0x41, 0x41, 0x00],
    [0x02, 0x04, 0x08, 0x10, 0x20], [0x00, 0x41, 0x41, 0x7F, 0x00], [0x04, 0x02, 0x01, 0x02, 0x04],
    [0x40, 0x40, 0x40, 0x40, 0x40], [0x00, 0x01, 0x02, 0x04, 0x00], [0x20, 0x54, 0x54, 0x54, 0x78],
    [0x7F, 0x48, 0x44, 0x44, 0x38], [0x38, 0x44, 0x44, 0x44, 0x20], [0x38, 0x44, 0x44, 0x48, 0x7F],
    [0x38, 0x54, 0x54, 0x54, 0x18], [0x08, 0x7E, 0x09, 0x01, 0x02], [0x0C, 0x52, 0x52, 0x52, 0x3E],
    [0x7F, 0x08, 0x04, 0x04, 0x78], [0x00, 0x44, 0x7D, 0x40, 0x00], [0x20, 0x40, 0x44, 0x3D, 0x00],
    [0x7F, 0x10, 0x28, 0x44, 0x00], [0x00, 0x41, 0x7F, 0x40, 0x00], [0x7C, 0x04, 0x18, 0x04, 0x78],
    [0x7C, 0x08, 0x04, 0x04, 0x78], [0x38, 0x44, 0x44, 0x44, 0x38], [0x7C, 0x14, 0x14, 0x14, 0x08],
    [0x08, 0x14, 0x14, 0x18, 0x7C], [0x7C, 0x08, 0x04, 0x04, 0x08], [0x48, 0x54, 0x54, 0x54, 0x20],
    [0x04, 0x3F, 0x44, 0x40, 0x20], [0x3C, 0x40, 0x40, 0x20, 0x7C], [0x1C, 0x20, 0x40, 0x20, 0x1C],
    [0x3C, 0x40, 0x30, 0x40, 0x3C], [0x44, 0x28, 0x10, 0x28, 0x44], [0x0C, 0x50, 0x50, 0x50, 0x3C],
    [0x44, 0x64, 0x54, 0x4C, 0x44], [0x00, 0x08, 0x36, 0x41, 0x00], [0x00, 0x00, 0x7F, 0x00, 0x00],
    [0x00, 0x41, 0x36, 0x08, 0x00], [0x10, 0x08, 0x08, 0x10, 0x08]
];

const FALLBACK_GLYPH: [u8; 5] = [0x02, 0x01, 0x51, 0x09, 0x06];

/// Fixed-width bitmap font with a handful of typographic extras on top of ascii.
pub struct Font {
    letter_spacing: i32,
    line_height: i32,
    extra_glyphs: HashMap<char, [u8; 5]>,
    arena: bumpalo::Bump
}

pub trait TextDrawer<Destination> {
    fn draw_text(
        &self, destination: &mut Destination,
        x: i32, y: i32, text: &str,
        color: u8
    );

    fn draw_text_scaled(
        &self, destination: &mut Destination,
        x: i32, y: i32, scale: i32, text: &str,
        color: u8
    );

    /// Draws the text over a one pixel halo of `glow_color`.
    fn draw_text_glow(
        &self, destination: &mut Destination,
        x: i32, y: i32, text: &str,
        color: u8, glow_color: u8
    );

    /// Word-wraps `text` inside the box. Returns the number of lines produced.
    fn draw_text_in_box(
        &mut self, destination: &mut Destination,
        x: i32, y: i32,
        box_width: usize, box_height: usize,
        horizontal_alignment: HorizontalAlignment,
        vertical_alignment: VerticalAlignment,
        text: &str,
        color: u8
    ) -> usize;
}

impl<P: PixelTarget> TextDrawer<P> for Font {
    fn draw_text(&self, destination: &mut P, x: i32, y: i32, text: &str, color: u8) {
        self.draw_text_scaled(destination, x, y, 1, text, color)
    }

    fn draw_text_scaled(&self, destination: &mut P, x: i32, y: i32, scale: i32, text: &str, color: u8) {
        let scale = scale.max(1);
        let mut current_x = x;
        let mut current_y = y;
        for c in text.chars() {
            if c == '\n' {
                current_x = x;
                current_y += self.line_height * scale;
                continue;
            }
            if c != ' ' {
                let columns = self.glyph(c);
                for (col, bits) in columns.iter().enumerate() {
                    for row in 0..GLYPH_HEIGHT {
                        if (*bits >> row) & 1 == 0 {
                            continue;
                        }
                        let px = current_x + col as i32 * scale;
                        let py = current_y + row * scale;
                        for sy in 0..scale {
                            for sx in 0..scale {
                                destination.plot(px + sx, py + sy, color);
                            }
                        }
                    }
                }
            }
            current_x += self.advance() * scale;
        }
    }

    fn draw_text_glow(&self, destination: &mut P, x: i32, y: i32, text: &str, color: u8, glow_color: u8) {
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            self.draw_text(destination, x + dx, y + dy, text, glow_color);
        }
        self.draw_text(destination, x, y, text, color);
    }

    fn draw_text_in_box(
        &mut self,
        destination: &mut P,
        x: i32, y: i32,
        box_width: usize, box_height: usize,
        horizontal_alignment: HorizontalAlignment,
        vertical_alignment: VerticalAlignment,
        text: &str,
        color: u8
    ) -> usize {
        struct LineInfo {
            word_count: usize,
            empty_space: i32
        }

        self.arena.reset();
        let mut line_info_vec = bumpalo::collections::Vec::new_in(&self.arena);

        let space = self.measure_text_width(" ") as usize + self.letter_spacing as usize;
        for line in text.lines() {
            let mut current_x = 0;
            let mut current_words = 0;
            for word in line.split_whitespace() {
                let new_width = self.measure_text_width(word) as usize;

                let next_x = if current_x == 0 {
                    new_width
                } else {
                    current_x + space + new_width
                };

                if next_x > box_width && current_words > 0 {
                    line_info_vec.push(LineInfo {
                        word_count: current_words,
                        empty_space: box_width as i32 - current_x as i32
                    });
                    current_x = new_width;
                    current_words = 1;
                    continue;
                }
                current_x = next_x;
                current_words += 1;
            }

            if current_words > 0 {
                line_info_vec.push(LineInfo {
                    word_count: current_words,
                    empty_space: box_width as i32 - current_x as i32
                });
            }
        }

        let result_height = self.line_height * line_info_vec.len() as i32 - (self.line_height - GLYPH_HEIGHT);
        let mut current_y = y + match vertical_alignment {
            VerticalAlignment::Top => 0,
            VerticalAlignment::Center => (box_height as i32 - result_height) / 2,
            VerticalAlignment::Bottom => box_height as i32 - result_height
        };

        let mut words = text.split_whitespace();
        for LineInfo { word_count, empty_space } in line_info_vec.iter() {
            let mut current_x = x + match horizontal_alignment {
                HorizontalAlignment::Left => 0,
                HorizontalAlignment::Center => *empty_space / 2,
                HorizontalAlignment::Right => *empty_space
            };
            for i in 0..*word_count {
                if let Some(word) = words.next() {
                    if i != 0 {
                        current_x += space as i32;
                    }
                    self.draw_text(destination, current_x, current_y, word, color);
                    current_x += self.measure_text_width(word);
                }
            }
            current_y += self.line_height;
        }
        line_info_vec.len()
    }
}

impl Font {
    pub fn new() -> Self {
        Self {
            letter_spacing: 1,
            line_height: 9,
            extra_glyphs: hashmap! {
                '°' => [0x00, 0x06, 0x09, 0x09, 0x06],
                '•' => [0x00, 0x1C, 0x1C, 0x1C, 0x00],
                '…' => [0x40, 0x00, 0x40, 0x00, 0x40],
                '—' => [0x08, 0x08, 0x08, 0x08, 0x08],
                '–' => [0x00, 0x08, 0x08, 0x08, 0x00],
                '₂' => [0x00, 0x48, 0x64, 0x58, 0x00],
                '·' => [0x00, 0x00, 0x08, 0x00, 0x00]
            },
            arena: bumpalo::Bump::new()
        }
    }

    pub fn line_height(&self) -> i32 {
        self.line_height
    }

    pub fn advance(&self) -> i32 {
        GLYPH_WIDTH + self.letter_spacing
    }

    fn glyph(&self, c: char) -> [u8; 5] {
        let code = c as u32;
        if (0x20..0x7F).contains(&code) {
            return ASCII_GLYPHS[(code - 0x20) as usize];
        }
        self.extra_glyphs.get(&c).copied().unwrap_or(FALLBACK_GLYPH)
    }

    /// Width in pixels of the widest line, without trailing letter spacing.
    pub fn measure_text_width(&self, text: &str) -> i32 {
        text.lines()
            .map(|line| line.chars().count() as i32)
            .max()
            .map(|chars| if chars == 0 { 0 } else { chars * self.advance() - self.letter_spacing })
            .unwrap_or(0)
    }

    pub fn measure_text_height(&self, text: &str) -> i32 {
        let lines = text.lines().count().max(1) as i32;
        lines * self.line_height - (self.line_height - GLYPH_HEIGHT)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new()
    }
}
