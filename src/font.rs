use crate::refs::{ObjectReferences, RefType};
use crate::{LayoutError, Pt};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo};
use pdf_writer::{Finish, Name, Pdf, Ref, Str};
use std::fmt;
use std::rc::Rc;

/// Everything the layout engine needs to know about a font: horizontal
/// advances and vertical metrics at a given size. Shaping is left to the
/// provider; the engine only sums advances.
pub trait FontMetrics: fmt::Debug {
    /// Horizontal advance of a single character
    fn advance(&self, ch: char, size: Pt) -> Pt;

    /// Distance from the baseline to the top of the font
    fn ascent(&self, size: Pt) -> Pt;

    /// Distance from the baseline to the bottom of the font. Usually negative
    fn descent(&self, size: Pt) -> Pt;

    /// Extra space between lines
    fn leading(&self, size: Pt) -> Pt;

    /// How much to offset a second row of text below a first one
    fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    /// Glyph id used when the canvas encodes text for this font, if known
    fn glyph_id(&self, _ch: char) -> Option<u16> {
        None
    }

    /// The parsed font behind these metrics, when there is one to embed
    fn font_file(&self) -> Option<&Font> {
        None
    }

    /// Width of a string, ignoring newlines
    fn width_of(&self, text: &str, size: Pt) -> Pt {
        text.chars()
            .filter(|&ch| ch != '\n' && ch != '\r')
            .map(|ch| self.advance(ch, size))
            .sum()
    }
}

/// A parsed TrueType / OpenType face
pub struct Font {
    pub face: OwnedFace,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.family())
            .finish()
    }
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not
    /// be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LayoutError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// Family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Embed the whole font as a composite font addressed by glyph id,
    /// returning the reference of the font resource
    pub(crate) fn write(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let base_font = format!("F{index}");

        let data_id = refs.gen(RefType::FontData(index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let descriptor_id = refs.gen(RefType::FontDescriptor(index));
        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        let bbox = face.global_bounding_box();
        let mut descriptor = writer.font_descriptor(descriptor_id);
        descriptor
            .name(Name(base_font.as_bytes()))
            .flags(flags)
            .bbox(pdf_writer::Rect::new(
                bbox.x_min as f32 * scaling,
                bbox.y_min as f32 * scaling,
                bbox.x_max as f32 * scaling,
                bbox.y_max as f32 * scaling,
            ))
            .italic_angle(0.0)
            .ascent(face.ascender() as f32 * scaling)
            .descent(face.descender() as f32 * scaling)
            .cap_height(
                face.capital_height()
                    .map(|h| h as f32 * scaling)
                    .unwrap_or(1000.0),
            )
            .stem_v(80.0)
            .font_file2(data_id);
        descriptor.finish();

        let widths: Vec<f32> = (0..face.number_of_glyphs())
            .map(|gid| {
                face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling
            })
            .collect();

        let cid_id = refs.gen(RefType::CidFont(index));
        let mut cid_font = writer.cid_font(cid_id);
        cid_font
            .subtype(CidFontType::Type2)
            .base_font(Name(base_font.as_bytes()))
            .system_info(SystemInfo {
                registry: Str(b"Adobe"),
                ordering: Str(b"Identity"),
                supplement: 0,
            })
            .font_descriptor(descriptor_id)
            .default_width(1000.0)
            .cid_to_gid_map_predefined(Name(b"Identity"));
        cid_font.widths().consecutive(0, widths);
        cid_font.finish();

        let font_id = refs.gen(RefType::Font(index));
        writer
            .type0_font(font_id)
            .base_font(Name(base_font.as_bytes()))
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_id);
        font_id
    }
}

impl FontMetrics for Font {
    fn advance(&self, ch: char, size: Pt) -> Pt {
        let face = self.face.as_face_ref();
        let advance = face
            .glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .and_then(|gid| face.glyph_hor_advance(gid))
            .unwrap_or_default();
        self.scaling(size) * advance as f32
    }

    fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    fn leading(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().line_gap() as f32
    }

    fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|gid| gid.0)
    }

    fn font_file(&self) -> Option<&Font> {
        Some(self)
    }
}

/// Font metrics defined by constant proportions of the font size. Every
/// character has the same advance, which makes layouts predictable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedMetrics {
    /// Advance of every character, in ems
    pub advance: f32,
    /// Ascent, in ems
    pub ascent: f32,
    /// Descent (negative), in ems
    pub descent: f32,
    /// Line gap, in ems
    pub leading: f32,
}

impl FixedMetrics {
    pub fn monospace(advance: f32) -> FixedMetrics {
        FixedMetrics {
            advance,
            ..FixedMetrics::default()
        }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        FixedMetrics {
            advance: 0.5,
            ascent: 0.8,
            descent: -0.2,
            leading: 0.0,
        }
    }
}

impl FontMetrics for FixedMetrics {
    fn advance(&self, _ch: char, size: Pt) -> Pt {
        size * self.advance
    }

    fn ascent(&self, size: Pt) -> Pt {
        size * self.ascent
    }

    fn descent(&self, size: Pt) -> Pt {
        size * self.descent
    }

    fn leading(&self, size: Pt) -> Pt {
        size * self.leading
    }
}

/// A font registered in a [FontBook]
#[derive(Debug)]
pub struct Face {
    pub name: String,
    pub metrics: Rc<dyn FontMetrics>,
}

/// The fonts a document may refer to. Fonts are referred to by their id in
/// the book, which canvases turn into resource names.
#[derive(Debug, Default)]
pub struct FontBook {
    pub faces: Arena<Face>,
}

impl FontBook {
    pub fn add<S: ToString>(&mut self, name: S, metrics: Rc<dyn FontMetrics>) -> Id<Face> {
        self.faces.alloc(Face {
            name: name.to_string(),
            metrics,
        })
    }

    /// Register a parsed font under its family name
    pub fn add_font(&mut self, font: Font) -> Id<Face> {
        let name = font.family().unwrap_or_else(|| format!("F{}", self.faces.len()));
        self.add(name, Rc::new(font))
    }

    pub fn get(&self, id: Id<Face>) -> Option<&Face> {
        self.faces.get(id)
    }

    /// Font selection for a registered face at a given size
    pub fn spec(&self, id: Id<Face>, size: Pt) -> Result<FontSpec, LayoutError> {
        let face = self
            .faces
            .get(id)
            .ok_or(LayoutError::UnknownFont(id.index()))?;
        Ok(FontSpec {
            id: Some(id),
            metrics: face.metrics.clone(),
            size,
        })
    }

    /// Find a face by name
    pub fn find(&self, name: &str) -> Option<Id<Face>> {
        self.faces
            .iter()
            .find(|(_, face)| face.name == name)
            .map(|(id, _)| id)
    }
}

/// The font in effect for a text run: which face, its metrics and the size
#[derive(Clone, Debug)]
pub struct FontSpec {
    /// Face in the document's [FontBook]; `None` for the built-in fallback
    pub id: Option<Id<Face>>,
    pub metrics: Rc<dyn FontMetrics>,
    pub size: Pt,
}

impl FontSpec {
    /// Fixed-proportion font used when nothing else was selected
    pub fn fallback(size: Pt) -> FontSpec {
        FontSpec {
            id: None,
            metrics: Rc::new(FixedMetrics::default()),
            size,
        }
    }

    pub fn with_size(&self, size: Pt) -> FontSpec {
        FontSpec {
            size,
            ..self.clone()
        }
    }

    /// Name of the font resource in a content stream
    pub fn resource_name(&self) -> String {
        match self.id {
            Some(id) => format!("F{}", id.index()),
            None => "Fallback".to_string(),
        }
    }

    pub fn width_of(&self, text: &str) -> Pt {
        self.metrics.width_of(text, self.size)
    }

    pub fn ascent(&self) -> Pt {
        self.metrics.ascent(self.size)
    }

    pub fn descent(&self) -> Pt {
        self.metrics.descent(self.size)
    }

    pub fn leading(&self) -> Pt {
        self.metrics.leading(self.size)
    }
}

impl PartialEq for FontSpec {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.size == other.size && Rc::ptr_eq(&self.metrics, &other.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_metrics_scale_with_size() {
        let m = FixedMetrics::monospace(0.5);
        assert_eq!(m.width_of("abcd", Pt(10.0)), Pt(20.0));
        assert_eq!(m.width_of("ab\ncd", Pt(10.0)), Pt(20.0));
        assert_eq!(m.line_height(Pt(10.0)), Pt(10.0));
    }

    #[test]
    fn font_book_resolves_specs() {
        let mut book = FontBook::default();
        let id = book.add("mono", Rc::new(FixedMetrics::monospace(0.75)));
        let spec = book.spec(id, Pt(10.0)).expect("font is registered");
        assert_eq!(spec.resource_name(), "F0");
        assert_eq!(spec.width_of("ab"), Pt(15.0));
        assert_eq!(book.find("mono"), Some(id));
        assert_eq!(spec, spec.clone());
        assert_ne!(spec, spec.with_size(Pt(11.0)));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(matches!(
            Font::load(vec![0, 1, 2, 3]),
            Err(LayoutError::FaceParsing(_))
        ));
    }
}
