use crate::geometry::{Box3, Vector3};
use crate::layout::{
    BreakOrder, DrawContext, Drawing, Fitting, Justification, Justifier, LayoutState, Pass, Place,
};
use crate::units::Pt;
use std::collections::VecDeque;

/// Fits drawings left to right along a line, breaking text at words
#[derive(Debug, Default, Copy, Clone)]
pub struct WordsInLine;

impl Fitting<Box<dyn Drawing>> for WordsInLine {
    fn size(&self, item: &Box<dyn Drawing>) -> Pt {
        item.space().width()
    }

    fn space_size(&self, item: &Box<dyn Drawing>) -> Pt {
        item.trailing_space_size()
    }

    fn split(
        &self,
        item: &mut Box<dyn Drawing>,
        had_break: &mut bool,
        done: &mut bool,
    ) -> Option<Box<dyn Drawing>> {
        let mut order = BreakOrder::Word;
        let rest = item.break_at(&mut order);
        *done = order >= BreakOrder::Line;
        *had_break = order != BreakOrder::None;
        rest
    }

    fn apply_attributes(&self, item: &Box<dyn Drawing>, state: &mut LayoutState) {
        if item.is_attribute() {
            item.apply_attributes(state);
        }
    }

    fn item_offset(&self, item: &Box<dyn Drawing>) -> Pt {
        let space = item.space();
        if space.is_empty() {
            Pt::ZERO
        } else {
            -space.left()
        }
    }

    fn justification<'s>(&self, state: &'s LayoutState) -> &'s Justification {
        &state.along_x
    }
}

/// One line of drawings, justified horizontally within the space of the
/// enclosing page
#[derive(Debug, Default)]
pub struct LayoutLine {
    line: Justifier<Box<dyn Drawing>>,
}

impl LayoutLine {
    pub fn new() -> LayoutLine {
        LayoutLine::default()
    }

    pub fn add(&mut self, item: Box<dyn Drawing>) {
        self.line.add(item);
    }

    pub fn extend<I: IntoIterator<Item = Box<dyn Drawing>>>(&mut self, items: I) {
        self.line.extend(items);
    }

    pub fn is_computed(&self) -> bool {
        self.line.is_computed()
    }

    pub fn places(&self) -> &[Place<Box<dyn Drawing>>] {
        &self.line.places
    }

    /// Items that did not fit on the line
    pub fn leftover(&self) -> &VecDeque<Box<dyn Drawing>> {
        &self.line.items
    }

    /// Place items between the left and right edges of `state.space`, inset
    /// by the horizontal margins. Attribute items placed on the line update
    /// `state`.
    pub fn compute(&mut self, state: &mut LayoutState) {
        if self.line.is_computed() {
            return;
        }
        if state.space.is_empty() {
            log::debug!("line laid out without any space, nothing placed");
            return;
        }
        let left = state.space.left() + state.margins.left;
        let right = state.space.right() - state.margins.right;
        self.line
            .adjust(left, right.max(left), true, state, &WordsInLine);
    }

    /// Same as [LayoutLine::compute] without touching the caller's state
    pub fn safe_compute(&mut self, state: &LayoutState) {
        let mut scratch = state.clone();
        self.compute(&mut scratch);
    }

    /// Cut the line after the first boundary of at least the strength in
    /// `order`, returning a new line with everything that follows.
    ///
    /// Placed items are searched first and win over leftover items. `order`
    /// receives the strength actually found and is left alone when nothing
    /// breaks. A boundary at the very end of the line yields no continuation
    /// but still reports its strength.
    pub fn split(&mut self, order: &mut BreakOrder) -> Option<LayoutLine> {
        if *order >= BreakOrder::Line {
            for index in 0..self.line.places.len() {
                let mut found = BreakOrder::Line;
                let next = self.line.places[index].item.break_at(&mut found);
                if next.is_some() || *order < found {
                    *order = found;
                    let mut rest = LayoutLine::new();
                    rest.line.items.extend(next);
                    rest.line
                        .items
                        .extend(self.line.places.drain(index + 1..).map(|place| place.item));
                    rest.line.items.extend(self.line.take_leftover());
                    return (!rest.line.items.is_empty()).then_some(rest);
                }
            }
        }

        for index in 0..self.line.items.len() {
            let mut found = BreakOrder::Line;
            let next = self.line.items[index].break_at(&mut found);
            if next.is_some() || found > BreakOrder::Line {
                *order = found;
                let mut rest = LayoutLine::new();
                rest.line.items.extend(next);
                rest.line.items.extend(self.line.items.drain(index + 1..));
                return (!rest.line.items.is_empty()).then_some(rest);
            }
        }

        None
    }

    /// A new line holding the items that did not fit, if any were placed
    pub fn remaining(&mut self) -> Option<LayoutLine> {
        if self.line.items.is_empty() || self.line.places.is_empty() {
            return None;
        }
        let mut rest = LayoutLine::new();
        rest.line.items = self.line.take_leftover();
        Some(rest)
    }

    /// Placed items then leftovers, in order
    pub fn into_items(self) -> impl Iterator<Item = Box<dyn Drawing>> {
        self.line.into_items()
    }

    fn traverse(&mut self, ctx: &mut DrawContext<'_>, pass: Pass) {
        if !self.line.is_computed() {
            self.safe_compute(&ctx.state);
        }
        for place in self.line.places.iter_mut() {
            ctx.offset.x = place.position;
            pass.run(place.item.as_mut(), ctx);
        }
    }

    fn placed(&self, extent: impl Fn(&dyn Drawing) -> Box3) -> Box3 {
        self.line.places.iter().fold(Box3::empty(), |acc, place| {
            let offset = Vector3::new(place.position, Pt::ZERO, Pt::ZERO);
            acc.union(&extent(place.item.as_ref()).translated(offset))
        })
    }
}

/// Lines do not scope the state: attributes on one line carry over to the
/// next line of the same page.
impl Drawing for LayoutLine {
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
        self.placed(|item| item.bounds())
    }

    fn space(&self) -> Box3 {
        self.placed(|item| item.space())
    }

    fn apply_attributes(&self, state: &mut LayoutState) {
        for place in self.line.places.iter() {
            if place.item.is_attribute() {
                place.item.apply_attributes(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DisplayList, Paint};
    use crate::config::LayoutConfig;
    use crate::flow::FlowRegistry;
    use crate::font::{FixedMetrics, FontSpec};
    use crate::geometry::Rect;
    use crate::layout::{Attribute, Axis, DrawingBreak, NoSelection, Rectangle, TextRun};
    use std::rc::Rc;

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

    fn block(width: f32) -> Box<dyn Drawing> {
        Box::new(Rectangle::new(
            Rect::new(Pt(0.0), Pt(0.0), Pt(width), Pt(1.0)),
            Paint::Fill,
        ))
    }

    fn state(width: f32) -> LayoutState {
        let mut state = LayoutState::default();
        state.space = Box3::new(Pt(0.0), Pt(0.0), Pt(0.0), Pt(width), Pt(100.0), Pt(0.0));
        state
    }

    fn positions(line: &LayoutLine) -> Vec<f32> {
        line.places().iter().map(|p| *p.position).collect()
    }

    fn texts(items: impl Iterator<Item = Box<dyn Drawing>>) -> String {
        items
            .map(|d| format!("{d:?}"))
            .collect::<Vec<_>>()
            .join("|")
    }

    #[test]
    fn blocks_fit_greedily() {
        let mut line = LayoutLine::new();
        line.extend([block(4.0), block(4.0), block(4.0), block(4.0)]);
        line.compute(&mut state(10.0));
        assert_eq!(positions(&line), vec![0.0, 4.0]);
        assert_eq!(line.leftover().len(), 2);
    }

    #[test]
    fn words_wrap_at_whitespace() {
        let mut line = LayoutLine::new();
        line.add(text("aaa bbb ccc"));
        line.compute(&mut state(40.0));
        assert_eq!(positions(&line), vec![0.0, 20.0]);

        let rest = line.remaining().expect("ccc is left over");
        assert!(line.leftover().is_empty());
        assert!(texts(rest.into_items()).contains("\"ccc\""));
    }

    #[test]
    fn margins_inset_the_line() {
        let mut line = LayoutLine::new();
        line.add(block(5.0));
        let mut s = state(100.0);
        s.margins.left = Pt(10.0);
        s.margins.right = Pt(70.0);
        s.along_x.centering = 1.0;
        line.compute(&mut s);
        assert_eq!(positions(&line), vec![17.5]);
    }

    #[test]
    fn attributes_apply_to_the_rest_of_the_line() {
        let mut line = LayoutLine::new();
        line.extend([
            block(5.0),
            Box::new(Attribute::Center(Axis::X, 1.0)) as Box<dyn Drawing>,
            block(5.0),
        ]);
        let mut s = state(20.0);
        line.compute(&mut s);
        assert_eq!(s.along_x.centering, 1.0);
        assert_eq!(positions(&line), vec![5.0, 10.0, 10.0]);

        let mut other = LayoutState::default();
        line.apply_attributes(&mut other);
        assert_eq!(other.along_x.centering, 1.0);
    }

    #[test]
    fn safe_compute_leaves_the_state_alone() {
        let mut line = LayoutLine::new();
        line.add(Box::new(Attribute::LineWidth(Pt(9.0))));
        line.add(block(1.0));
        let s = state(20.0);
        line.safe_compute(&s);
        assert!(line.is_computed());
        assert_eq!(s.line_width, LayoutState::default().line_width);
    }

    #[test]
    fn newline_ends_the_line() {
        let mut line = LayoutLine::new();
        line.add(text("one\ntwo"));
        line.compute(&mut state(100.0));
        assert_eq!(line.places().len(), 1);
        assert!(line.remaining().is_some());
    }

    #[test]
    fn strong_break_at_the_end_reports_its_order() {
        let mut line = LayoutLine::new();
        line.extend([block(1.0), Box::new(DrawingBreak(BreakOrder::Column)) as Box<dyn Drawing>]);
        line.compute(&mut state(100.0));
        assert_eq!(line.places().len(), 2);

        let mut order = BreakOrder::Line;
        assert!(line.split(&mut order).is_none());
        assert_eq!(order, BreakOrder::Column);
        assert_eq!(line.places().len(), 2);
    }

    #[test]
    fn leftover_items_split_at_newlines() {
        let mut line = LayoutLine::new();
        line.add(text("a b\nc d"));
        let mut order = BreakOrder::Line;
        let rest = line.split(&mut order).expect("newline splits the run");
        assert_eq!(order, BreakOrder::Line);
        assert!(texts(line.into_items()).contains("\"a b\\n\""));
        assert!(texts(rest.into_items()).contains("\"c d\""));
    }

    /// Two halves that only come apart at a line boundary
    #[derive(Debug)]
    struct Verse(&'static str, &'static str, f32);

    impl Drawing for Verse {
        fn space(&self) -> Box3 {
            Box3::new(Pt(0.0), Pt(0.0), Pt(0.0), Pt(self.2), Pt(10.0), Pt(0.0))
        }

        fn break_at(&mut self, order: &mut BreakOrder) -> Option<Box<dyn Drawing>> {
            if *order < BreakOrder::Line || self.1.is_empty() {
                return None;
            }
            let rest = std::mem::take(&mut self.1);
            Some(Box::new(Verse(rest, "", self.2)))
        }
    }

    #[test]
    fn placed_items_split_before_leftovers() {
        let mut line = LayoutLine::new();
        line.extend([
            Box::new(Verse("a", "b", 5.0)) as Box<dyn Drawing>,
            Box::new(Verse("c", "d", 50.0)),
        ]);
        line.compute(&mut state(10.0));
        assert_eq!(line.places().len(), 1);
        assert_eq!(line.leftover().len(), 1);

        let mut order = BreakOrder::Line;
        let rest = line.split(&mut order).expect("the placed verse splits");
        assert_eq!(order, BreakOrder::Line);
        assert_eq!(texts(line.into_items()), r#"Verse("a", "", 5.0)"#);
        assert_eq!(
            texts(rest.into_items()),
            r#"Verse("b", "", 5.0)|Verse("c", "d", 50.0)"#
        );
    }

    #[test]
    fn unbreakable_line_stays_whole() {
        let mut line = LayoutLine::new();
        line.extend([block(1.0), block(1.0)]);
        line.compute(&mut state(100.0));
        let mut order = BreakOrder::Line;
        assert!(line.split(&mut order).is_none());
        assert_eq!(order, BreakOrder::Line);
        assert!(line.remaining().is_none());
    }

    #[test]
    fn compute_is_idempotent() {
        let mut line = LayoutLine::new();
        line.add(text("lorem ipsum dolor sit amet"));
        line.compute(&mut state(60.0));
        let first = positions(&line);
        line.compute(&mut state(500.0));
        assert_eq!(first, positions(&line));
    }

    #[test]
    fn adding_after_compute_loses_nothing() {
        let mut line = LayoutLine::new();
        line.extend([block(4.0), block(4.0), block(4.0)]);
        line.compute(&mut state(10.0));
        line.add(block(1.0));
        assert!(!line.is_computed());
        assert_eq!(line.into_items().count(), 4);
    }

    #[test]
    fn draws_at_placed_positions() {
        let mut line = LayoutLine::new();
        line.add(text("aaa bbb"));
        line.compute(&mut state(100.0));

        let mut canvas = DisplayList::new();
        let mut flows = FlowRegistry::default();
        let config = LayoutConfig::default();
        let mut ctx = DrawContext::new(&mut canvas, &NoSelection, &mut flows, &config);
        line.draw(&mut ctx);
        drop(ctx);
        assert_eq!(
            canvas.texts(),
            vec![(Pt(0.0), Pt(0.0), "aaa"), (Pt(20.0), Pt(0.0), "bbb")]
        );
        assert_eq!(line.bounds().width(), Pt(35.0));
    }
}
