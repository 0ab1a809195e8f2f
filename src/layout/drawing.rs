use crate::canvas::SelectionMode;
use crate::geometry::Box3;
use crate::layout::{DrawContext, LayoutState};
use crate::units::Pt;
use std::fmt;

/// Strength of a boundary between two pieces of content. Stronger breaks
/// compare greater.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BreakOrder {
    #[default]
    None,
    Word,
    Line,
    Paragraph,
    Column,
}

/// Opaque identity of a drawing within one traversal, handed to selection
/// providers and hit-testing canvases. Identities are allocated in traversal
/// order, so the selection and identify passes agree on them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(pub u32);

/// Anything that can be placed by a layout and painted on a canvas.
///
/// Every capability has a default, so leaves only implement what they
/// actually have. None of the operations can fail.
pub trait Drawing: fmt::Debug {
    /// Paint the drawing at the context's current offset
    fn draw(&mut self, _ctx: &mut DrawContext<'_>) {}

    /// Paint a selection indicator if the selection provider reports this
    /// drawing as selected
    fn draw_selection(&mut self, ctx: &mut DrawContext<'_>) {
        ctx.select(self.bounds(), SelectionMode::Shape);
    }

    /// Name the drawing on the canvas, then paint it so a hit-testing canvas
    /// can map areas back to it
    fn identify(&mut self, ctx: &mut DrawContext<'_>) {
        let id = ctx.new_id();
        ctx.canvas.name(id);
        self.draw(ctx);
    }

    /// Smallest box enclosing what is visibly drawn, relative to the
    /// drawing's own origin
    fn bounds(&self) -> Box3 {
        Box3::empty()
    }

    /// Room a layout must reserve for the drawing
    fn space(&self) -> Box3 {
        self.bounds()
    }

    /// Split at a boundary of at least the strength requested in `order`.
    ///
    /// Returns everything after the split, and leaves in `order` the strength
    /// of the boundary actually found. An atomic drawing never splits but can
    /// be separated from its neighbours at any strength, so the default leaves
    /// `order` untouched.
    fn break_at(&mut self, _order: &mut BreakOrder) -> Option<Box<dyn Drawing>> {
        None
    }

    /// Separator extent consumed after the drawing, such as a trailing blank
    fn trailing_space_size(&self) -> Pt {
        Pt::ZERO
    }

    /// Whether this is an invisible item that only changes the layout state
    fn is_attribute(&self) -> bool {
        false
    }

    /// Apply the state changes this drawing carries
    fn apply_attributes(&self, _state: &mut LayoutState) {}
}
