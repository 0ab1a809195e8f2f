//! The graphics contract drawings paint through.
//!
//! The layout engine never rasterises anything itself. Leaves describe what
//! they look like through a [Canvas], and the host decides what a canvas
//! does with it: record it ([DisplayList]), hit-test it
//! ([Picker](crate::Picker)) or write a PDF content stream
//! ([PdfCanvas](crate::PdfCanvas)).

use crate::colour::Colour;
use crate::font::FontSpec;
use crate::geometry::Rect;
use crate::layout::Identity;
use crate::transform::Transform;
use crate::units::Pt;

/// How a closed shape is painted
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Paint {
    Fill,
    Stroke,
    FillAndStroke,
}

/// What kind of selection indicator to draw
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// A selected shape
    Shape,
    /// A selected range of text
    Text,
}

/// Drawing operations used by the layout tree. Graphics state (colours,
/// line width, transform) persists until the matching [Canvas::restore].
pub trait Canvas {
    /// Push the graphics state
    fn save(&mut self);

    /// Pop the graphics state pushed by the last [Canvas::save]
    fn restore(&mut self);

    /// Concatenate `transform` to the current transformation
    fn transform(&mut self, transform: Transform);

    fn fill_colour(&mut self, colour: Colour);

    fn line_colour(&mut self, colour: Colour);

    fn line_width(&mut self, width: Pt);

    fn rectangle(&mut self, rect: Rect, paint: Paint);

    /// Show `text` with its baseline starting at `origin`
    fn text(&mut self, origin: (Pt, Pt), text: &str, font: &FontSpec);

    /// Draw a selection indicator covering `rect`
    fn selection(&mut self, rect: Rect, mode: SelectionMode);

    /// Name the drawing operations that follow, for hit-testing
    fn name(&mut self, _id: Identity) {}
}

/// A recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Save,
    Restore,
    Transform(Transform),
    FillColour(Colour),
    LineColour(Colour),
    LineWidth(Pt),
    Rectangle(Rect, Paint),
    Text {
        origin: (Pt, Pt),
        text: String,
        font: String,
        size: Pt,
    },
    Selection(Rect, SelectionMode),
    Name(Identity),
}

/// A canvas that records every operation, for hosts that replay them later
/// and for inspecting what a layout produced
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    pub commands: Vec<Command>,
}

impl DisplayList {
    pub fn new() -> DisplayList {
        DisplayList::default()
    }

    /// Every text command, in drawing order, as `(x, y, text)`
    pub fn texts(&self) -> Vec<(Pt, Pt, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Text { origin, text, .. } => Some((origin.0, origin.1, text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Every painted rectangle, in drawing order
    pub fn rectangles(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Rectangle(r, _) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Every selection indicator, in drawing order
    pub fn selections(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Selection(r, _) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for DisplayList {
    fn save(&mut self) {
        self.commands.push(Command::Save);
    }

    fn restore(&mut self) {
        self.commands.push(Command::Restore);
    }

    fn transform(&mut self, transform: Transform) {
        self.commands.push(Command::Transform(transform));
    }

    fn fill_colour(&mut self, colour: Colour) {
        self.commands.push(Command::FillColour(colour));
    }

    fn line_colour(&mut self, colour: Colour) {
        self.commands.push(Command::LineColour(colour));
    }

    fn line_width(&mut self, width: Pt) {
        self.commands.push(Command::LineWidth(width));
    }

    fn rectangle(&mut self, rect: Rect, paint: Paint) {
        self.commands.push(Command::Rectangle(rect, paint));
    }

    fn text(&mut self, origin: (Pt, Pt), text: &str, font: &FontSpec) {
        self.commands.push(Command::Text {
            origin,
            text: text.to_string(),
            font: font.resource_name(),
            size: font.size,
        });
    }

    fn selection(&mut self, rect: Rect, mode: SelectionMode) {
        self.commands.push(Command::Selection(rect, mode));
    }

    fn name(&mut self, id: Identity) {
        self.commands.push(Command::Name(id));
    }
}
