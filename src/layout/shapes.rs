use crate::canvas::Paint;
use crate::geometry::{Box3, Rect};
use crate::layout::{BreakOrder, DrawContext, Drawing};

/// A filled and/or stroked rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub rect: Rect,
    pub paint: Paint,
}

impl Rectangle {
    pub fn new(rect: Rect, paint: Paint) -> Rectangle {
        Rectangle {
            rect: rect.normalized(),
            paint,
        }
    }
}

impl Drawing for Rectangle {
    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let rect = self.rect.translated(ctx.offset.x, ctx.offset.y);
        ctx.canvas.rectangle(rect, self.paint);
    }

    fn bounds(&self) -> Box3 {
        Box3::from(self.rect)
    }
}

/// Outline standing in for content that is not there, such as an overflow
/// box whose flow has nothing left
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub rect: Rect,
}

impl Placeholder {
    pub fn new(rect: Rect) -> Placeholder {
        Placeholder {
            rect: rect.normalized(),
        }
    }
}

impl Drawing for Placeholder {
    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let rect = self.rect.translated(ctx.offset.x, ctx.offset.y);
        let colour = ctx.config.placeholder_colour;
        ctx.canvas.save();
        ctx.canvas.line_colour(colour);
        ctx.canvas.rectangle(rect, Paint::Stroke);
        ctx.canvas.restore();
    }

    fn bounds(&self) -> Box3 {
        Box3::from(self.rect)
    }
}

/// An explicit, invisible break of a given strength
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawingBreak(pub BreakOrder);

impl Drawing for DrawingBreak {
    fn draw_selection(&mut self, _ctx: &mut DrawContext<'_>) {}

    fn identify(&mut self, _ctx: &mut DrawContext<'_>) {}

    fn break_at(&mut self, order: &mut BreakOrder) -> Option<Box<dyn Drawing>> {
        *order = self.0;
        None
    }
}
