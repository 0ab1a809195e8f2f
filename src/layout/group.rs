use crate::geometry::Box3;
use crate::layout::{DrawContext, Drawing, LayoutState, Pass};

/// A container of drawings, painted in insertion order.
///
/// Attribute changes made by one child are visible to the children after it,
/// but never escape the container.
#[derive(Debug, Default)]
pub struct Layout {
    pub items: Vec<Box<dyn Drawing>>,
    /// State the container was created with
    pub state: LayoutState,
}

impl Layout {
    pub fn new(state: LayoutState) -> Layout {
        Layout {
            items: Vec::new(),
            state,
        }
    }

    pub fn add(&mut self, item: Box<dyn Drawing>) {
        self.items.push(item);
    }

    pub fn extend<I: IntoIterator<Item = Box<dyn Drawing>>>(&mut self, items: I) {
        self.items.extend(items);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Adopt the attribute state of an enclosing container, keeping the items
    pub fn inherit(&mut self, state: &LayoutState) {
        self.state = state.clone();
    }

    pub fn items(&self) -> &[Box<dyn Drawing>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn traverse(&mut self, ctx: &mut DrawContext<'_>, pass: Pass) {
        let items = &mut self.items;
        ctx.scoped(|ctx| {
            for item in items.iter_mut() {
                pass.run(item.as_mut(), ctx);
            }
        });
    }
}

impl Drawing for Layout {
    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        self.traverse(ctx, Pass::Draw);
    }

    fn draw_selection(&mut self, ctx: &mut DrawContext<'_>) {
        self.traverse(ctx, Pass::Selection);
    }

    fn identify(&mut self, ctx: &mut DrawContext<'_>) {
        self.traverse(ctx, Pass::Identify);
    }

    fn bounds(&self) -> Box3 {
        self.items
            .iter()
            .fold(Box3::empty(), |acc, item| acc.union(&item.bounds()))
    }

    fn space(&self) -> Box3 {
        self.items
            .iter()
            .fold(Box3::empty(), |acc, item| acc.union(&item.space()))
    }
}
