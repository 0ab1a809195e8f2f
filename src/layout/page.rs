use crate::canvas::{Paint, SelectionMode};
use crate::geometry::{Box3, Vector3};
use crate::layout::{
    BreakOrder, DrawContext, Drawing, Fitting, Justification, Justifier, Layout, LayoutLine,
    LayoutState, Pass, Place,
};
use crate::units::Pt;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Fits lines top to bottom down a page, breaking at line boundaries
#[derive(Debug, Default, Copy, Clone)]
pub struct LinesInPage;

impl Fitting<LayoutLine> for LinesInPage {
    fn size(&self, line: &LayoutLine) -> Pt {
        line.space().height()
    }

    fn space_size(&self, _line: &LayoutLine) -> Pt {
        Pt::ZERO
    }

    fn split(&self, line: &mut LayoutLine, had_break: &mut bool, done: &mut bool) -> Option<LayoutLine> {
        let mut order = BreakOrder::Line;
        let rest = line.split(&mut order);
        *done = order >= BreakOrder::Column;
        *had_break = order != BreakOrder::None;
        rest
    }

    fn apply_attributes(&self, line: &LayoutLine, state: &mut LayoutState) {
        line.apply_attributes(state);
    }

    /// Lines are placed by their top edge and drawn from their baseline
    fn item_offset(&self, line: &LayoutLine) -> Pt {
        let space = line.space();
        if space.is_empty() {
            Pt::ZERO
        } else {
            -space.top()
        }
    }

    fn justification<'s>(&self, state: &'s LayoutState) -> &'s Justification {
        &state.along_y
    }
}

/// A box that flows its items into lines, and its lines down the box.
///
/// Items that do not fit are kept, and handed over by
/// [PageLayout::remaining] to a continuation page, which is how overflow
/// boxes chain several boxes into one flow.
#[derive(Debug)]
pub struct PageLayout {
    /// Items not laid out yet, and the state the page is laid out with
    pub layout: Layout,
    /// Box the lines are fitted into
    pub space: Box3,
    page: Justifier<LayoutLine>,
    /// Continuations keep the state carried over from their source
    continued: bool,
    /// State after the placed lines, carried to the continuation
    exit: Option<LayoutState>,
}

impl PageLayout {
    pub fn new(space: Box3) -> PageLayout {
        PageLayout::with_state(space, LayoutState::default())
    }

    pub fn with_state(space: Box3, state: LayoutState) -> PageLayout {
        PageLayout {
            layout: Layout::new(state),
            space,
            page: Justifier::new(),
            continued: false,
            exit: None,
        }
    }

    pub fn add(&mut self, item: Box<dyn Drawing>) {
        self.invalidate();
        self.layout.add(item);
    }

    pub fn extend<I: IntoIterator<Item = Box<dyn Drawing>>>(&mut self, items: I) {
        self.invalidate();
        self.layout.extend(items);
    }

    /// Add the content of whole lines, placed items first. Lines are laid
    /// out again here since this page may not be as wide as theirs.
    pub fn add_lines<I: IntoIterator<Item = LayoutLine>>(&mut self, lines: I) {
        self.invalidate();
        for line in lines {
            self.layout.extend(line.into_items());
        }
    }

    pub fn clear(&mut self) {
        self.layout.clear();
        self.page.clear();
        self.exit = None;
    }

    pub fn is_computed(&self) -> bool {
        self.page.is_computed()
    }

    pub fn is_continuation(&self) -> bool {
        self.continued
    }

    /// Lines placed on the page, positioned at their baseline
    pub fn lines(&self) -> &[Place<LayoutLine>] {
        &self.page.places
    }

    /// Lines that did not fit
    pub fn leftover_lines(&self) -> &VecDeque<LayoutLine> {
        &self.page.items
    }

    /// State after the placed lines, once computed
    pub fn exit_state(&self) -> Option<&LayoutState> {
        self.exit.as_ref()
    }

    /// Put the content of every line back into the item list
    fn invalidate(&mut self) {
        if self.page.places.is_empty() && self.page.items.is_empty() {
            return;
        }
        if self.page.is_computed() {
            log::warn!(
                "page gets new items after placing {} lines, laying it out again",
                self.page.places.len()
            );
        }
        let lines = std::mem::take(&mut self.page);
        let mut items: Vec<Box<dyn Drawing>> =
            lines.into_items().flat_map(LayoutLine::into_items).collect();
        items.append(&mut self.layout.items);
        self.layout.items = items;
        self.exit = None;
    }

    /// Break the items into lines, each laid out as soon as it is made so
    /// that attributes met on one line apply to the following ones, then fit
    /// the lines between the top and bottom margins. Does nothing once lines
    /// were placed.
    pub fn compute(&mut self) {
        if self.page.is_computed() {
            return;
        }
        self.invalidate();

        let mut state = self.layout.state.clone();
        state.space = self.space;
        if self.space.is_empty() {
            log::debug!("page has no space, nothing placed");
            self.exit = Some(state);
            return;
        }

        // a line too narrow for anything holds the rest of the content
        let mut stranded = None;
        let items = std::mem::take(&mut self.layout.items);
        if !items.is_empty() {
            let mut line = LayoutLine::new();
            line.extend(items);
            let mut line_state = state.clone();
            loop {
                line.compute(&mut line_state);
                if line.places().is_empty() {
                    log::debug!(
                        "line has no room between its margins, {} items left over",
                        line.leftover().len()
                    );
                    stranded = Some(line);
                    break;
                }
                let next = line.remaining();
                self.page.add(line);
                match next {
                    Some(next) => line = next,
                    None => break,
                }
            }
        }

        let top = self.space.top() - state.margins.top;
        let bottom = self.space.bottom() + state.margins.bottom;
        let mut page_state = state;
        let placed = self
            .page
            .adjust(top, bottom.min(top), true, &mut page_state, &LinesInPage);
        self.page.items.extend(stranded);
        log::trace!(
            "page placed {placed} lines, {} left over",
            self.page.items.len()
        );
        self.exit = Some(page_state);
    }

    /// A continuation page with the same space holding everything this page
    /// could not place, laid out with the state this page ended with.
    ///
    /// `None` until the page is computed, and when everything fit. A page
    /// with no room hands over all of its content, so a flow runs on past
    /// boxes too small to show any of it.
    pub fn remaining(&mut self) -> Option<PageLayout> {
        let state = self.exit.clone()?;
        if self.page.items.is_empty() && self.layout.items.is_empty() {
            return None;
        }
        let mut next = PageLayout::with_state(self.space, state);
        next.continued = true;
        next.add_lines(self.page.take_leftover());
        next.layout.extend(std::mem::take(&mut self.layout.items));
        Some(next)
    }

    fn traverse(&mut self, ctx: &mut DrawContext<'_>, pass: Pass) {
        if !self.continued {
            self.layout.inherit(&ctx.state);
        }
        self.compute();

        let mut state = self.layout.state.clone();
        state.space = self.space;
        let continued = self.continued;
        let page = &mut self.page;
        ctx.scoped(|ctx| {
            if continued {
                ctx.canvas.fill_colour(state.fill);
                ctx.canvas.line_colour(state.line_colour);
                ctx.canvas.line_width(state.line_width);
            }
            ctx.state = state;
            for place in page.places.iter_mut() {
                ctx.offset.x = Pt::ZERO;
                ctx.offset.y = place.position;
                pass.run(&mut place.item, ctx);
            }
        });
    }
}

impl Drawing for PageLayout {
    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        self.traverse(ctx, Pass::Draw);
    }

    fn draw_selection(&mut self, ctx: &mut DrawContext<'_>) {
        let id = ctx.new_id();
        if ctx.is_selected(id) {
            ctx.canvas.selection(self.space.to_rect(), SelectionMode::Shape);
        }
        self.traverse(ctx, Pass::Selection);
    }

    /// The whole box is named, so its empty regions can be picked too
    fn identify(&mut self, ctx: &mut DrawContext<'_>) {
        let id = ctx.new_id();
        ctx.canvas.name(id);
        ctx.canvas.rectangle(self.space.to_rect(), Paint::Fill);
        self.traverse(ctx, Pass::Identify);
    }

    fn bounds(&self) -> Box3 {
        self.page.places.iter().fold(Box3::empty(), |acc, place| {
            let offset = Vector3::new(Pt::ZERO, place.position, Pt::ZERO);
            acc.union(&place.item.bounds().translated(offset))
        })
    }

    fn space(&self) -> Box3 {
        self.space
    }
}

/// The drawing tree node owning a page. Shared so that a flow registry can
/// point at the page while the tree owns it.
#[derive(Debug, Clone)]
pub struct TextBox(pub Rc<RefCell<PageLayout>>);

impl TextBox {
    pub fn new(page: PageLayout) -> TextBox {
        TextBox(Rc::new(RefCell::new(page)))
    }

    pub fn page(&self) -> &Rc<RefCell<PageLayout>> {
        &self.0
    }

    fn with_page(&self, body: impl FnOnce(&mut PageLayout)) {
        match self.0.try_borrow_mut() {
            Ok(mut page) => body(&mut page),
            Err(_) => log::warn!("text box drawn from inside itself, skipping it"),
        }
    }
}

impl Drawing for TextBox {
    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        self.with_page(|page| page.draw(ctx));
    }

    fn draw_selection(&mut self, ctx: &mut DrawContext<'_>) {
        self.with_page(|page| page.draw_selection(ctx));
    }

    fn identify(&mut self, ctx: &mut DrawContext<'_>) {
        self.with_page(|page| page.identify(ctx));
    }

    fn bounds(&self) -> Box3 {
        self.0
            .try_borrow()
            .map(|page| page.bounds())
            .unwrap_or_default()
    }

    fn space(&self) -> Box3 {
        self.0
            .try_borrow()
            .map(|page| page.space())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DisplayList;
    use crate::config::LayoutConfig;
    use crate::flow::FlowRegistry;
    use crate::font::{FixedMetrics, FontSpec};
    use crate::geometry::Rect;
    use crate::layout::{Attribute, Axis, DrawingBreak, NoSelection, TextRun};

    fn font() -> FontSpec {
        FontSpec {
            id: None,
            metrics: Rc::new(FixedMetrics::monospace(0.5)),
            size: Pt(10.0),
        }
    }

    fn text(s: &str) -> Box<dyn Drawing> {
        Box::new(TextRun::new(s, font()))
    }

    /// 40 wide and 30 high: two four-letter words per line, three lines
    fn page() -> PageLayout {
        PageLayout::new(Box3::from(Rect::new(Pt(0.0), Pt(0.0), Pt(40.0), Pt(30.0))))
    }

    fn baselines(page: &PageLayout) -> Vec<f32> {
        page.lines().iter().map(|p| *p.position).collect()
    }

    fn words(items: impl Iterator<Item = Box<dyn Drawing>>) -> Vec<String> {
        items
            .map(|d| format!("{d:?}"))
            .filter_map(|s| s.split('"').nth(1).map(|t| t.trim_end().to_string()))
            .collect()
    }

    fn draw(page: &mut PageLayout) -> DisplayList {
        let mut canvas = DisplayList::new();
        let mut flows = FlowRegistry::default();
        let config = LayoutConfig::default();
        let mut ctx = DrawContext::new(&mut canvas, &NoSelection, &mut flows, &config);
        page.draw(&mut ctx);
        drop(ctx);
        canvas
    }

    #[test]
    fn empty_page_places_nothing() {
        let mut p = page();
        p.compute();
        assert!(p.lines().is_empty());
        assert!(p.remaining().is_none());
        assert!(draw(&mut p).texts().is_empty());
    }

    #[test]
    fn lines_fill_the_page_top_down() {
        let mut p = page();
        p.add(text("aaa bbb ccc ddd eee fff ggg hhh"));
        p.compute();
        assert_eq!(baselines(&p), vec![22.0, 12.0, 2.0]);
        assert_eq!(p.leftover_lines().len(), 1);

        let texts = draw(&mut p);
        assert_eq!(
            texts.texts(),
            vec![
                (Pt(0.0), Pt(22.0), "aaa"),
                (Pt(20.0), Pt(22.0), "bbb"),
                (Pt(0.0), Pt(12.0), "ccc"),
                (Pt(20.0), Pt(12.0), "ddd"),
                (Pt(0.0), Pt(2.0), "eee"),
                (Pt(20.0), Pt(2.0), "fff"),
            ]
        );
    }

    #[test]
    fn remaining_holds_everything_that_did_not_fit() {
        let mut p = page();
        p.add(text("aaa bbb ccc ddd eee fff ggg hhh"));
        p.compute();
        let mut rest = p.remaining().expect("two words are left");
        assert!(rest.is_continuation());
        assert!(p.leftover_lines().is_empty());
        assert!(p.remaining().is_none());

        let placed: Vec<String> = p
            .lines()
            .iter()
            .flat_map(|l| l.item.places().iter().map(|w| format!("{:?}", w.item)))
            .collect();
        assert_eq!(placed.len(), 6);

        rest.compute();
        assert_eq!(rest.lines().len(), 1);
        let texts = draw(&mut rest);
        assert_eq!(
            texts.texts(),
            vec![(Pt(0.0), Pt(22.0), "ggg"), (Pt(20.0), Pt(22.0), "hhh")]
        );
    }

    #[test]
    fn line_without_room_goes_to_the_next_box() {
        let mut p = page();
        p.extend([
            Box::new(Attribute::HorizontalMargins(Pt(20.0), Pt(20.0))) as Box<dyn Drawing>,
            text("aaa bbb ccc ddd"),
        ]);
        p.compute();
        assert_eq!(p.lines().len(), 1);
        assert_eq!(p.leftover_lines().len(), 1);

        let mut rest = p.remaining().expect("ccc and ddd are left");
        rest.space = Box3::from(Rect::new(Pt(100.0), Pt(0.0), Pt(200.0), Pt(30.0)));
        assert_eq!(
            draw(&mut rest).texts(),
            vec![(Pt(120.0), Pt(22.0), "ccc"), (Pt(140.0), Pt(22.0), "ddd")]
        );
    }

    #[test]
    fn page_without_room_hands_everything_on() {
        let mut p = PageLayout::new(Box3::from(Rect::new(Pt(0.0), Pt(0.0), Pt(40.0), Pt(0.0))));
        p.add(text("aaa bbb"));
        assert!(p.remaining().is_none());

        p.compute();
        assert!(p.lines().is_empty());
        let mut rest = p.remaining().expect("nothing was placed");
        assert!(p.remaining().is_none());

        rest.space = page().space;
        assert_eq!(
            draw(&mut rest).texts(),
            vec![(Pt(0.0), Pt(22.0), "aaa"), (Pt(20.0), Pt(22.0), "bbb")]
        );
    }

    #[test]
    fn compute_is_idempotent() {
        let mut p = page();
        p.add(text("lorem ipsum dolor sit amet consectetur"));
        p.compute();
        let first = baselines(&p);
        p.space = Box3::from(Rect::new(Pt(0.0), Pt(0.0), Pt(400.0), Pt(300.0)));
        p.compute();
        assert_eq!(first, baselines(&p));
    }

    #[test]
    fn vertical_margins_shrink_the_page() {
        let mut p = page();
        p.layout.state.margins.top = Pt(5.0);
        p.layout.state.margins.bottom = Pt(5.0);
        p.add(text("aaa bbb ccc ddd eee fff"));
        p.compute();
        assert_eq!(baselines(&p), vec![17.0, 7.0]);
    }

    #[test]
    fn vertical_centering() {
        let mut p = page();
        p.layout.state.along_y.centering = 1.0;
        p.add(text("aaa"));
        p.compute();
        assert_eq!(baselines(&p), vec![12.0]);
    }

    #[test]
    fn column_break_ends_the_page() {
        let mut p = page();
        p.extend([
            text("aaa"),
            Box::new(DrawingBreak(BreakOrder::Column)) as Box<dyn Drawing>,
            text("bbb"),
        ]);
        p.compute();
        assert_eq!(p.lines().len(), 1);
        let rest = p.remaining().expect("bbb goes to the next box");
        assert_eq!(words(rest.layout.items.into_iter()), vec!["bbb".to_string()]);
    }

    #[test]
    fn exit_state_carries_placed_attributes() {
        let mut p = page();
        p.extend([
            Box::new(Attribute::Justify(Axis::X, 1.0)) as Box<dyn Drawing>,
            text("aaa bbb ccc ddd eee fff ggg hhh"),
        ]);
        p.compute();
        assert_eq!(p.exit_state().map(|s| s.along_x.amount), Some(1.0));
        let rest = p.remaining().expect("overflow");
        assert_eq!(rest.layout.state.along_x.amount, 1.0);
    }

    #[test]
    fn adding_after_compute_keeps_every_item() {
        let mut p = page();
        p.add(text("aaa bbb ccc ddd eee fff ggg hhh"));
        p.compute();
        p.add(text("iii"));
        assert!(!p.is_computed());
        assert_eq!(
            words(p.layout.items.drain(..)),
            vec!["aaa", "bbb", "ccc", "ddd", "eee", "fff", "ggg", "hhh", "iii"]
        );
    }

    #[test]
    fn text_box_delegates_to_its_page() {
        let mut b = TextBox::new(page());
        b.page().borrow_mut().add(text("aaa"));
        let mut canvas = DisplayList::new();
        let mut flows = FlowRegistry::default();
        let config = LayoutConfig::default();
        let mut ctx = DrawContext::new(&mut canvas, &NoSelection, &mut flows, &config);
        b.draw(&mut ctx);
        drop(ctx);
        assert_eq!(canvas.texts(), vec![(Pt(0.0), Pt(22.0), "aaa")]);
        assert_eq!(b.space().height(), Pt(30.0));
        assert_eq!(b.bounds().width(), Pt(15.0));
    }
}
