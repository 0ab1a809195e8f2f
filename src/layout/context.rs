use crate::canvas::{Canvas, SelectionMode};
use crate::config::LayoutConfig;
use crate::flow::FlowRegistry;
use crate::geometry::{Box3, Vector3};
use crate::layout::{Drawing, Identity, LayoutState};
use std::collections::HashSet;

/// Answers whether a drawing is currently selected
pub trait SelectionState {
    fn is_selected(&self, id: Identity) -> bool;
}

/// A selection provider with nothing selected
#[derive(Debug, Default, Copy, Clone)]
pub struct NoSelection;

impl SelectionState for NoSelection {
    fn is_selected(&self, _id: Identity) -> bool {
        false
    }
}

impl SelectionState for HashSet<Identity> {
    fn is_selected(&self, id: Identity) -> bool {
        self.contains(&id)
    }
}

/// Which of the three parallel traversals is running
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pass {
    Draw,
    Selection,
    Identify,
}

impl Pass {
    pub fn run(self, drawing: &mut dyn Drawing, ctx: &mut DrawContext<'_>) {
        match self {
            Pass::Draw => drawing.draw(ctx),
            Pass::Selection => drawing.draw_selection(ctx),
            Pass::Identify => drawing.identify(ctx),
        }
    }
}

/// Everything a traversal threads through the tree: the canvas it paints on,
/// the flows overflow boxes pull from, the attribute state and the offset
/// at which the current drawing was placed.
pub struct DrawContext<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub selection: &'a dyn SelectionState,
    pub flows: &'a mut FlowRegistry,
    pub config: &'a LayoutConfig,
    pub state: LayoutState,
    pub offset: Vector3,
    next_id: u32,
}

impl<'a> DrawContext<'a> {
    pub fn new(
        canvas: &'a mut dyn Canvas,
        selection: &'a dyn SelectionState,
        flows: &'a mut FlowRegistry,
        config: &'a LayoutConfig,
    ) -> DrawContext<'a> {
        DrawContext {
            canvas,
            selection,
            flows,
            config,
            state: LayoutState::new(config),
            offset: Vector3::default(),
            next_id: 0,
        }
    }

    /// Allocate the identity of the next drawing in traversal order
    pub fn new_id(&mut self) -> Identity {
        self.next_id += 1;
        Identity(self.next_id)
    }

    pub fn is_selected(&self, id: Identity) -> bool {
        self.selection.is_selected(id)
    }

    /// Allocate an identity and, if it is selected, frame `bounds` placed at
    /// the current offset
    pub fn select(&mut self, bounds: Box3, mode: SelectionMode) -> Identity {
        let id = self.new_id();
        if self.is_selected(id) && !bounds.is_empty() {
            let rect = bounds.translated(self.offset).to_rect();
            self.canvas.selection(rect, mode);
        }
        id
    }

    /// Run `body` with the attribute state, the offset and the canvas
    /// graphics state restored afterwards
    pub fn scoped<R>(&mut self, body: impl FnOnce(&mut DrawContext<'a>) -> R) -> R {
        let state = self.state.clone();
        let offset = self.offset;
        self.canvas.save();
        let result = body(self);
        self.canvas.restore();
        self.state = state;
        self.offset = offset;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Command, DisplayList};
    use crate::units::Pt;

    #[test]
    fn scoped_changes_do_not_leak() {
        let mut canvas = DisplayList::new();
        let mut flows = FlowRegistry::default();
        let config = LayoutConfig::default();
        let mut ctx = DrawContext::new(&mut canvas, &NoSelection, &mut flows, &config);

        ctx.scoped(|ctx| {
            ctx.state.line_width = Pt(7.0);
            ctx.offset.x = Pt(3.0);
        });
        assert_eq!(ctx.state.line_width, config.line_width);
        assert_eq!(ctx.offset.x, Pt::ZERO);
        drop(ctx);
        assert_eq!(canvas.commands, vec![Command::Save, Command::Restore]);
    }

    #[test]
    fn selected_identities_get_a_frame() {
        let mut canvas = DisplayList::new();
        let mut flows = FlowRegistry::default();
        let config = LayoutConfig::default();
        let selected: HashSet<Identity> = [Identity(2)].into_iter().collect();
        let mut ctx = DrawContext::new(&mut canvas, &selected, &mut flows, &config);
        let b = Box3::new(Pt(0.0), Pt(0.0), Pt(0.0), Pt(4.0), Pt(4.0), Pt(0.0));

        assert_eq!(ctx.select(b, SelectionMode::Shape), Identity(1));
        ctx.offset.x = Pt(10.0);
        assert_eq!(ctx.select(b, SelectionMode::Shape), Identity(2));
        drop(ctx);
        assert_eq!(canvas.selections().len(), 1);
        assert_eq!(canvas.selections()[0].x1, Pt(10.0));
    }
}
