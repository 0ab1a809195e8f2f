use crate::canvas::{Canvas, Paint, SelectionMode};
use crate::colour::Colour;
use crate::font::FontSpec;
use crate::geometry::Rect;
use crate::layout::Identity;
use crate::transform::Transform;
use crate::units::Pt;

/// A canvas that remembers which named drawing painted where, so that a
/// point can be mapped back to the drawing under it. Fed by the identify
/// traversal.
#[derive(Debug, Default)]
pub struct Picker {
    transform: Transform,
    stack: Vec<Transform>,
    current: Option<Identity>,
    hits: Vec<(Rect, Identity)>,
}

impl Picker {
    pub fn new() -> Picker {
        Picker::default()
    }

    /// Identity of the topmost (last painted) named area containing the point
    pub fn pick(&self, x: Pt, y: Pt) -> Option<Identity> {
        self.hits
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, id)| *id)
    }

    /// Every painted area with the identity it was painted under
    pub fn areas(&self) -> &[(Rect, Identity)] {
        &self.hits
    }

    fn record(&mut self, rect: Rect) {
        if let Some(id) = self.current {
            self.hits.push((self.transform.apply_rect(&rect), id));
        }
    }
}

impl Canvas for Picker {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn transform(&mut self, transform: Transform) {
        self.transform = transform.then(self.transform);
    }

    fn fill_colour(&mut self, _colour: Colour) {}

    fn line_colour(&mut self, _colour: Colour) {}

    fn line_width(&mut self, _width: Pt) {}

    fn rectangle(&mut self, rect: Rect, _paint: Paint) {
        self.record(rect.normalized());
    }

    fn text(&mut self, origin: (Pt, Pt), text: &str, font: &FontSpec) {
        let width = font.width_of(text);
        self.record(Rect::new(
            origin.0,
            origin.1 + font.descent(),
            origin.0 + width,
            origin.1 + font.ascent(),
        ));
    }

    fn selection(&mut self, _rect: Rect, _mode: SelectionMode) {}

    fn name(&mut self, id: Identity) {
        self.current = Some(id);
    }
}
