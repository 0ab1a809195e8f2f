use crate::colour::Colour;
use crate::font::FontSpec;
use crate::layout::{Axis, BreakOrder, DrawContext, Drawing, LayoutState};
use crate::transform::Transform;
use crate::units::Pt;

/// An invisible item that changes the attribute state of everything after
/// it in the same container
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Fill(Colour),
    LineColour(Colour),
    LineWidth(Pt),
    Font(FontSpec),
    FontSize(Pt),
    /// Fraction of the slack inserted between items
    Justify(Axis, f32),
    Center(Axis, f32),
    Spread(Axis, f32),
    Spacing(Axis, f32),
    /// Minimum space before and after each item
    MinimumSpace(Axis, Pt, Pt),
    /// Left and right margins
    HorizontalMargins(Pt, Pt),
    /// Top and bottom margins
    VerticalMargins(Pt, Pt),
    Transform(Transform),
}

impl Drawing for Attribute {
    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        self.apply_attributes(&mut ctx.state);
        match self {
            Attribute::Fill(colour) => ctx.canvas.fill_colour(*colour),
            Attribute::LineColour(colour) => ctx.canvas.line_colour(*colour),
            Attribute::LineWidth(width) => ctx.canvas.line_width(*width),
            Attribute::Transform(t) => ctx.canvas.transform(*t),
            _ => {}
        }
    }

    fn draw_selection(&mut self, ctx: &mut DrawContext<'_>) {
        self.draw(ctx);
    }

    fn identify(&mut self, ctx: &mut DrawContext<'_>) {
        self.draw(ctx);
    }

    /// Attributes stick to the item that follows them
    fn break_at(&mut self, order: &mut BreakOrder) -> Option<Box<dyn Drawing>> {
        *order = BreakOrder::None;
        None
    }

    fn is_attribute(&self) -> bool {
        true
    }

    fn apply_attributes(&self, state: &mut LayoutState) {
        state.has_attributes = true;
        match self {
            Attribute::Fill(colour) => state.fill = *colour,
            Attribute::LineColour(colour) => state.line_colour = *colour,
            Attribute::LineWidth(width) => state.line_width = *width,
            Attribute::Font(font) => state.font = font.clone(),
            Attribute::FontSize(size) => state.font = state.font.with_size(*size),
            Attribute::Justify(axis, amount) => state.along_mut(*axis).amount = *amount,
            Attribute::Center(axis, amount) => state.along_mut(*axis).centering = *amount,
            Attribute::Spread(axis, amount) => state.along_mut(*axis).spread = *amount,
            Attribute::Spacing(axis, amount) => state.along_mut(*axis).spacing = *amount,
            Attribute::MinimumSpace(axis, before, after) => {
                let along = state.along_mut(*axis);
                along.before = *before;
                along.after = *after;
            }
            Attribute::HorizontalMargins(left, right) => {
                state.margins.left = *left;
                state.margins.right = *right;
            }
            Attribute::VerticalMargins(top, bottom) => {
                state.margins.top = *top;
                state.margins.bottom = *bottom;
            }
            Attribute::Transform(t) => {
                state.transform = t.then(state.transform);
                state.has_matrix = true;
            }
        }
    }
}
