//! The calls a document evaluator makes while walking its source.

use crate::canvas::Paint;
use crate::colour::Colour;
use crate::config::LayoutConfig;
use crate::flow::FlowRegistry;
use crate::font::{Face, FontBook};
use crate::geometry::{Box3, Rect};
use crate::layout::{
    Attribute, Axis, BreakOrder, Drawing, DrawingBreak, Layout, LayoutState, PageLayout,
    PageLayoutOverflow, Rectangle, TextBox, TextRun,
};
use crate::transform::Transform;
use crate::units::Pt;
use crate::LayoutError;
use id_arena::Id;
use std::cell::RefCell;
use std::rc::Rc;

/// Name of the flow text boxes join until [Builder::text_flow] picks another
pub const DEFAULT_FLOW: &str = "main";

/// A container being filled
enum Scope {
    Group(Layout),
    Page(Rc<RefCell<PageLayout>>),
}

/// An open container with the attribute state of its content so far
struct Frame {
    scope: Scope,
    state: LayoutState,
}

/// Builds the drawing tree of one evaluation.
///
/// Drawings are added to the innermost open container. Attribute calls add
/// an attribute item, which also changes the state later drawings are built
/// with, such as the font of text runs.
pub struct Builder<'a> {
    fonts: &'a FontBook,
    flows: &'a mut FlowRegistry,
    frames: Vec<Frame>,
    flow: String,
}

impl<'a> Builder<'a> {
    pub fn new(fonts: &'a FontBook, flows: &'a mut FlowRegistry, config: &LayoutConfig) -> Builder<'a> {
        let state = LayoutState::new(config);
        Builder {
            fonts,
            flows,
            frames: vec![Frame {
                scope: Scope::Group(Layout::new(state.clone())),
                state,
            }],
            flow: DEFAULT_FLOW.to_string(),
        }
    }

    /// Close every open container and return the root one
    pub fn finish(mut self) -> Layout {
        while self.frames.len() > 1 {
            self.close();
        }
        match self.frames.pop().map(|frame| frame.scope) {
            Some(Scope::Group(layout)) => layout,
            _ => Layout::default(),
        }
    }

    fn frame(&mut self) -> &mut Frame {
        if self.frames.is_empty() {
            self.frames.push(Frame {
                scope: Scope::Group(Layout::default()),
                state: LayoutState::default(),
            });
        }
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Attribute state drawings are currently built with
    pub fn state(&mut self) -> &LayoutState {
        &self.frame().state
    }

    /// Add a drawing to the innermost open container
    pub fn add(&mut self, drawing: Box<dyn Drawing>) {
        let frame = self.frame();
        if drawing.is_attribute() {
            drawing.apply_attributes(&mut frame.state);
        }
        match &mut frame.scope {
            Scope::Group(layout) => layout.add(drawing),
            Scope::Page(page) => match page.try_borrow_mut() {
                Ok(mut page) => page.add(drawing),
                Err(_) => log::warn!("text box is borrowed, dropping {drawing:?}"),
            },
        }
    }

    fn open(&mut self, scope: Scope) {
        let state = self.frame().state.clone();
        self.frames.push(Frame { scope, state });
    }

    fn close(&mut self) {
        if self.frames.len() < 2 {
            return;
        }
        if let Some(frame) = self.frames.pop() {
            let drawing: Box<dyn Drawing> = match frame.scope {
                Scope::Group(layout) => Box::new(layout),
                Scope::Page(page) => Box::new(TextBox(page)),
            };
            self.add(drawing);
        }
    }

    /// A run of text in the current font
    pub fn text<S: Into<String>>(&mut self, text: S) {
        let font = self.frame().state.font.clone();
        self.add(Box::new(TextRun::new(text, font)));
    }

    pub fn rectangle(&mut self, rect: Rect) {
        self.shape(rect, Paint::Fill);
    }

    pub fn shape(&mut self, rect: Rect, paint: Paint) {
        self.add(Box::new(Rectangle::new(rect, paint)));
    }

    /// A nested container whose attribute changes do not leak out
    pub fn group(&mut self, body: impl FnOnce(&mut Builder<'a>)) {
        let state = self.frame().state.clone();
        self.open(Scope::Group(Layout::new(state)));
        body(self);
        self.close();
    }

    /// A box text flows into, joining the current flow. Overflow boxes of the
    /// same flow continue with what does not fit here.
    pub fn text_box(&mut self, rect: Rect, body: impl FnOnce(&mut Builder<'a>)) {
        let state = self.frame().state.clone();
        let page = Rc::new(RefCell::new(PageLayout::with_state(Box3::from(rect), state)));
        self.flows.register(self.flow.clone(), &page);
        self.open(Scope::Page(page));
        body(self);
        self.close();
    }

    /// Select the flow later text boxes and overflow boxes belong to,
    /// returning the previous one
    pub fn text_flow<S: Into<String>>(&mut self, name: S) -> String {
        std::mem::replace(&mut self.flow, name.into())
    }

    /// A box continuing the current flow
    pub fn text_overflow(&mut self, rect: Rect) {
        let overflow = PageLayoutOverflow::new(rect, self.flow.clone());
        self.add(Box::new(overflow));
    }

    pub fn fill_colour(&mut self, colour: Colour) {
        self.add(Box::new(Attribute::Fill(colour)));
    }

    pub fn line_colour(&mut self, colour: Colour) {
        self.add(Box::new(Attribute::LineColour(colour)));
    }

    pub fn line_width(&mut self, width: Pt) {
        self.add(Box::new(Attribute::LineWidth(width)));
    }

    /// Select a font of the document's font book, keeping the current size
    pub fn font(&mut self, id: Id<Face>) -> Result<(), LayoutError> {
        let size = self.frame().state.font.size;
        let font = self.fonts.spec(id, size)?;
        self.add(Box::new(Attribute::Font(font)));
        Ok(())
    }

    pub fn font_size(&mut self, size: Pt) {
        self.add(Box::new(Attribute::FontSize(size)));
    }

    pub fn justify(&mut self, amount: f32, axis: Axis) {
        self.add(Box::new(Attribute::Justify(axis, amount)));
    }

    pub fn center(&mut self, amount: f32, axis: Axis) {
        self.add(Box::new(Attribute::Center(axis, amount)));
    }

    pub fn spread(&mut self, amount: f32, axis: Axis) {
        self.add(Box::new(Attribute::Spread(axis, amount)));
    }

    pub fn spacing(&mut self, amount: f32, axis: Axis) {
        self.add(Box::new(Attribute::Spacing(axis, amount)));
    }

    pub fn minimum_space(&mut self, before: Pt, after: Pt, axis: Axis) {
        self.add(Box::new(Attribute::MinimumSpace(axis, before, after)));
    }

    pub fn horizontal_margins(&mut self, left: Pt, right: Pt) {
        self.add(Box::new(Attribute::HorizontalMargins(left, right)));
    }

    pub fn vertical_margins(&mut self, top: Pt, bottom: Pt) {
        self.add(Box::new(Attribute::VerticalMargins(top, bottom)));
    }

    pub fn transform(&mut self, transform: Transform) {
        self.add(Box::new(Attribute::Transform(transform)));
    }

    pub fn translate(&mut self, x: Pt, y: Pt) {
        self.transform(Transform::translate(x, y));
    }

    /// Counter-clockwise, in radians
    pub fn rotate(&mut self, angle: f32) {
        self.transform(Transform::rotate(angle));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.transform(Transform::scale(sx, sy));
    }

    pub fn drawing_break(&mut self, order: BreakOrder) {
        self.add(Box::new(DrawingBreak(order)));
    }

    pub fn line_break(&mut self) {
        self.drawing_break(BreakOrder::Line);
    }

    pub fn paragraph_break(&mut self) {
        self.drawing_break(BreakOrder::Paragraph);
    }

    pub fn column_break(&mut self) {
        self.drawing_break(BreakOrder::Column);
    }

    /// Extent of the innermost open container, laying a text box out first
    fn extent(&mut self) -> Box3 {
        match &self.frame().scope {
            Scope::Group(layout) => layout.space(),
            Scope::Page(page) => match page.try_borrow_mut() {
                Ok(mut page) => {
                    page.compute();
                    page.bounds()
                }
                Err(_) => Box3::empty(),
            },
        }
    }

    pub fn width(&mut self) -> Pt {
        self.extent().width()
    }

    pub fn height(&mut self) -> Pt {
        self.extent().height()
    }

    pub fn depth(&mut self) -> Pt {
        self.extent().depth()
    }
}
