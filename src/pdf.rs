//! A canvas writing PDF content stream operators.

use crate::canvas::{Canvas, Paint, SelectionMode};
use crate::colour::{colours, Colour};
use crate::font::FontSpec;
use crate::geometry::Rect;
use crate::transform::Transform;
use crate::units::Pt;
use pdf_writer::{Content, Name, Str};

/// Renders drawings into a PDF content stream. Fonts are referred to by
/// their [FontSpec::resource_name], which the page resources must map to
/// the embedded fonts.
pub struct PdfCanvas {
    content: Content,
    /// Font selected in the current graphics state, and in every saved one
    fonts: Vec<Option<FontSpec>>,
    /// Colour of selection frames
    pub selection_colour: Colour,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        PdfCanvas {
            content: Content::new(),
            fonts: vec![None],
            selection_colour: colours::SELECTION,
        }
    }
}

impl PdfCanvas {
    pub fn new() -> PdfCanvas {
        PdfCanvas::default()
    }

    /// The raw content stream
    pub fn finish(self) -> Vec<u8> {
        self.content.finish()
    }

    /// The content stream, zlib-compressed for use with `FlateDecode`
    pub fn finish_compressed(self) -> Vec<u8> {
        let raw = self.finish();
        miniz_oxide::deflate::compress_to_vec_zlib(
            &raw,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        )
    }

    fn current_font(&mut self) -> &mut Option<FontSpec> {
        if self.fonts.is_empty() {
            self.fonts.push(None);
        }
        let last = self.fonts.len() - 1;
        &mut self.fonts[last]
    }

    fn set_fill(&mut self, colour: Colour) {
        match colour {
            Colour::RGB { r, g, b } => self.content.set_fill_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => self.content.set_fill_cmyk(c, m, y, k),
            Colour::Grey { g } => self.content.set_fill_gray(g),
        };
    }

    fn set_stroke(&mut self, colour: Colour) {
        match colour {
            Colour::RGB { r, g, b } => self.content.set_stroke_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => self.content.set_stroke_cmyk(c, m, y, k),
            Colour::Grey { g } => self.content.set_stroke_gray(g),
        };
    }

    fn path(&mut self, rect: Rect) {
        let r = rect.normalized();
        self.content
            .rect(*r.x1, *r.y1, *r.width(), *r.height());
    }
}

/// Text bytes for the content stream: two-byte glyph ids when the font can
/// map every character, WinAnsi bytes for the standard fallback font
/// otherwise
fn encode(text: &str, font: &FontSpec) -> Vec<u8> {
    let glyphs: Option<Vec<u16>> = text.chars().map(|ch| font.metrics.glyph_id(ch)).collect();
    match glyphs {
        Some(glyphs) => glyphs.iter().flat_map(|g| g.to_be_bytes()).collect(),
        None => text.chars().map(win_ansi).collect(),
    }
}

/// The WinAnsi (cp1252) byte for a character, `?` when it has none
fn win_ansi(ch: char) -> u8 {
    match ch {
        '\u{0000}'..='\u{007F}' | '\u{00A0}'..='\u{00FF}' => ch as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}

impl Canvas for PdfCanvas {
    fn save(&mut self) {
        self.content.save_state();
        let font = self.current_font().clone();
        self.fonts.push(font);
    }

    fn restore(&mut self) {
        self.content.restore_state();
        if self.fonts.len() > 1 {
            self.fonts.pop();
        }
    }

    fn transform(&mut self, transform: Transform) {
        self.content.transform(transform.to_array());
    }

    fn fill_colour(&mut self, colour: Colour) {
        self.set_fill(colour);
    }

    fn line_colour(&mut self, colour: Colour) {
        self.set_stroke(colour);
    }

    fn line_width(&mut self, width: Pt) {
        self.content.set_line_width(*width);
    }

    fn rectangle(&mut self, rect: Rect, paint: Paint) {
        self.path(rect);
        match paint {
            Paint::Fill => self.content.fill_nonzero(),
            Paint::Stroke => self.content.stroke(),
            Paint::FillAndStroke => self.content.fill_nonzero_and_stroke(),
        };
    }

    fn text(&mut self, origin: (Pt, Pt), text: &str, font: &FontSpec) {
        if text.is_empty() {
            return;
        }
        let bytes = encode(text, font);
        let changed = self.current_font().as_ref() != Some(font);

        self.content.begin_text();
        if changed {
            let name = font.resource_name();
            self.content.set_font(Name(name.as_bytes()), *font.size);
            *self.current_font() = Some(font.clone());
        }
        self.content.next_line(*origin.0, *origin.1);
        self.content.show(Str(&bytes));
        self.content.end_text();
    }

    fn selection(&mut self, rect: Rect, mode: SelectionMode) {
        let colour = self.selection_colour;
        self.content.save_state();
        self.set_stroke(colour);
        match mode {
            SelectionMode::Shape => {
                self.content.set_line_width(1.0);
            }
            SelectionMode::Text => {
                self.content.set_line_width(0.5);
                self.content.set_dash_pattern([2.0, 2.0], 0.0);
            }
        }
        self.path(rect);
        self.content.stroke();
        self.content.restore_state();
    }
}
