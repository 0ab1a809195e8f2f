use crate::colour::{colours, Colour};
use crate::units::Pt;

/// Defaults used to seed the attribute state at the root of every document
/// evaluation, plus the colours the engine uses for its own overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Size of the fallback font when the document never selects one.
    ///
    /// Defaults to `12.0`.
    pub font_size: Pt,
    /// Fill colour for text and shapes. Defaults to black.
    pub fill_colour: Colour,
    /// Outline colour for shapes. Defaults to black.
    pub line_colour: Colour,
    /// Outline width for shapes. Defaults to `1.0`.
    pub line_width: Pt,
    /// Colour of the frame drawn around selected drawings.
    pub selection_colour: Colour,
    /// Colour of the outline drawn for an overflow box with nothing left to
    /// show.
    pub placeholder_colour: Colour,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_size: Pt(12.0),
            fill_colour: colours::BLACK,
            line_colour: colours::BLACK,
            line_width: Pt(1.0),
            selection_colour: colours::SELECTION,
            placeholder_colour: colours::PLACEHOLDER,
        }
    }
}
