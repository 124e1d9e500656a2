pub mod font_align;
pub mod glyph_font;
