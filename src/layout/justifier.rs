//! One-dimensional fitting of breakable items into a span.
//!
//! The same algorithm places words along a line and lines down a page. What
//! differs between the two is supplied by a [Fitting] strategy: how big an
//! item is, how it breaks, and where its origin sits.

use crate::layout::{Justification, LayoutState};
use crate::units::Pt;
use std::collections::VecDeque;

/// Overshoot tolerated before an item is considered not to fit
const EPSILON: f32 = 0.01;

/// An item with its computed position along the fitting axis
#[derive(Debug)]
pub struct Place<T> {
    pub item: T,
    /// Extent of the item along the axis
    pub size: Pt,
    pub position: Pt,
}

/// What the fitting algorithm needs to know about one kind of item
pub trait Fitting<T> {
    /// Extent along the fitting axis
    fn size(&self, item: &T) -> Pt;

    /// Separator extent after the item
    fn space_size(&self, item: &T) -> Pt;

    /// Split the item at a boundary of the strength this axis works with,
    /// returning what follows the boundary. `had_break` reports whether the
    /// item may be separated from what follows it, `done` whether the
    /// boundary is strong enough to end the fit.
    fn split(&self, item: &mut T, had_break: &mut bool, done: &mut bool) -> Option<T>;

    /// Let attribute items change the state as they are placed
    fn apply_attributes(&self, item: &T, state: &mut LayoutState);

    /// Correction aligning the item's own origin with the axis origin
    fn item_offset(&self, item: &T) -> Pt;

    /// Justification parameters for this axis
    fn justification<'s>(&self, state: &'s LayoutState) -> &'s Justification;
}

/// Items waiting to be placed, and the places computed for those that fit.
///
/// Once `places` is non-empty the fit is final: [Justifier::adjust] returns
/// the existing count, and adding more items discards the placement.
#[derive(Debug)]
pub struct Justifier<T> {
    pub items: VecDeque<T>,
    pub places: Vec<Place<T>>,
}

impl<T> Default for Justifier<T> {
    fn default() -> Self {
        Justifier {
            items: VecDeque::new(),
            places: Vec::new(),
        }
    }
}

impl<T> Justifier<T> {
    pub fn new() -> Justifier<T> {
        Justifier::default()
    }

    pub fn is_computed(&self) -> bool {
        !self.places.is_empty()
    }

    pub fn add(&mut self, item: T) {
        self.invalidate();
        self.items.push_back(item);
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.invalidate();
        self.items.extend(items);
    }

    fn invalidate(&mut self) {
        if self.is_computed() {
            log::warn!(
                "adding items after {} were placed, discarding the placement",
                self.places.len()
            );
            self.unplace();
        }
    }

    /// Put every placed item back in front of the waiting items, in order
    pub fn unplace(&mut self) {
        for place in self.places.drain(..).rev() {
            self.items.push_front(place.item);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.places.clear();
    }

    /// Remove the items that did not fit
    pub fn take_leftover(&mut self) -> VecDeque<T> {
        std::mem::take(&mut self.items)
    }

    /// Placed items followed by leftovers, in order
    pub fn into_items(self) -> impl Iterator<Item = T> {
        self.places
            .into_iter()
            .map(|place| place.item)
            .chain(self.items)
    }

    /// Place as many items as fit between `start` and `end`, which may run
    /// in either direction, and return how many were placed.
    ///
    /// Items are taken greedily in order. When one overflows, the fit backs up
    /// to the last break point, restoring the state captured there; without a
    /// break point it ends before the overflowing item. The first item is
    /// always placed, however big. Slack is then shared out according to the
    /// axis justification, stretching gaps only when `fill` is set and the fit
    /// did not end on a strong break.
    pub fn adjust<F: Fitting<T>>(
        &mut self,
        start: Pt,
        end: Pt,
        fill: bool,
        state: &mut LayoutState,
        fitting: &F,
    ) -> usize {
        if self.is_computed() {
            return self.places.len();
        }

        let span = (end - start).abs();
        let direction = if end < start { -1.0 } else { 1.0 };
        if !(*span > 0.0) {
            log::trace!("nothing fits in an empty span");
            return 0;
        }

        let mut cursor = Pt::ZERO;
        let mut last_break: Option<(usize, LayoutState)> = None;
        let mut hard_stop = false;

        while let Some(mut item) = self.items.pop_front() {
            let mut had_break = false;
            let mut done = false;
            if let Some(rest) = fitting.split(&mut item, &mut had_break, &mut done) {
                self.items.push_front(rest);
            }

            let size = fitting.size(&item);
            if self.is_computed() && cursor + size > span + Pt(EPSILON) {
                self.items.push_front(item);
                if let Some((count, saved)) = last_break.take() {
                    for place in self.places.drain(count..).rev() {
                        self.items.push_front(place.item);
                    }
                    *state = saved;
                }
                break;
            }

            fitting.apply_attributes(&item, state);
            let just = fitting.justification(state);
            let separator = fitting.space_size(&item).max(just.before + just.after);
            let advance = size * just.spacing + separator;
            self.places.push(Place {
                item,
                size,
                position: cursor,
            });
            cursor += advance;

            if had_break {
                last_break = Some((self.places.len(), state.clone()));
            }
            if done {
                hard_stop = true;
                break;
            }
        }

        let count = self.places.len();
        if count == 0 {
            return 0;
        }

        let just = *fitting.justification(state);
        let extent = self
            .places
            .last()
            .map(|place| place.position + place.size)
            .unwrap_or_default();
        let slack = (span - extent).max(Pt::ZERO);
        let gaps = (count - 1) as f32;
        let stretch = if fill && !hard_stop && count > 1 {
            slack * just.amount / gaps
        } else {
            Pt::ZERO
        };
        let remaining = slack - stretch * gaps;
        let lead = remaining * just.centering / 2.0;
        let step = remaining * just.spread / count as f32;

        for (index, place) in self.places.iter_mut().enumerate() {
            let index = index as f32;
            let along = place.position + stretch * index + lead + step * index;
            let offset = fitting.item_offset(&place.item);
            place.position = start + along * direction + offset;
        }

        log::trace!("placed {count} items, {} left over", self.items.len());
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BreakOrder;

    #[derive(Debug, Clone, PartialEq)]
    struct Block {
        name: char,
        size: f32,
        space: f32,
        order: BreakOrder,
        line_width: Option<f32>,
    }

    fn block(name: char, size: f32) -> Block {
        Block {
            name,
            size,
            space: 0.0,
            order: BreakOrder::Word,
            line_width: None,
        }
    }

    struct Blocks;

    impl Fitting<Block> for Blocks {
        fn size(&self, item: &Block) -> Pt {
            Pt(item.size)
        }

        fn space_size(&self, item: &Block) -> Pt {
            Pt(item.space)
        }

        fn split(&self, item: &mut Block, had_break: &mut bool, done: &mut bool) -> Option<Block> {
            *had_break = item.order != BreakOrder::None;
            *done = item.order >= BreakOrder::Line;
            None
        }

        fn apply_attributes(&self, item: &Block, state: &mut LayoutState) {
            if let Some(width) = item.line_width {
                state.line_width = Pt(width);
            }
        }

        fn item_offset(&self, _item: &Block) -> Pt {
            Pt::ZERO
        }

        fn justification<'s>(&self, state: &'s LayoutState) -> &'s Justification {
            &state.along_x
        }
    }

    fn justifier(blocks: &[Block]) -> Justifier<Block> {
        let mut j = Justifier::new();
        j.extend(blocks.iter().cloned());
        j
    }

    fn positions(j: &Justifier<Block>) -> Vec<f32> {
        j.places.iter().map(|p| *p.position).collect()
    }

    fn names<'a>(blocks: impl Iterator<Item = &'a Block>) -> String {
        blocks.map(|b| b.name).collect()
    }

    #[test]
    fn greedy_first_fit() {
        let mut j = justifier(&[block('a', 4.0), block('b', 4.0), block('c', 4.0), block('d', 4.0)]);
        let mut state = LayoutState::default();
        assert_eq!(j.adjust(Pt(0.0), Pt(10.0), false, &mut state, &Blocks), 2);
        assert_eq!(positions(&j), vec![0.0, 4.0]);
        assert_eq!(names(j.items.iter()), "cd");
    }

    #[test]
    fn justification_fills_the_gaps() {
        let mut j = justifier(&[block('a', 5.0), block('b', 5.0)]);
        let mut state = LayoutState::default();
        state.along_x.amount = 1.0;
        j.adjust(Pt(0.0), Pt(20.0), true, &mut state, &Blocks);
        assert_eq!(positions(&j), vec![0.0, 15.0]);
        let gap = j.places[1].position - (j.places[0].position + j.places[0].size);
        assert_eq!(gap, Pt(10.0));
    }

    #[test]
    fn centering_shifts_everything() {
        let mut j = justifier(&[block('a', 5.0), block('b', 5.0)]);
        let mut state = LayoutState::default();
        state.along_x.centering = 1.0;
        j.adjust(Pt(0.0), Pt(20.0), false, &mut state, &Blocks);
        assert_eq!(positions(&j), vec![5.0, 10.0]);
    }

    #[test]
    fn spread_hands_out_slack_per_index() {
        let mut j = justifier(&[block('a', 5.0), block('b', 5.0)]);
        let mut state = LayoutState::default();
        state.along_x.spread = 1.0;
        j.adjust(Pt(0.0), Pt(20.0), false, &mut state, &Blocks);
        assert_eq!(positions(&j), vec![0.0, 10.0]);
    }

    #[test]
    fn oversized_item_is_forced_in() {
        let mut j = justifier(&[block('a', 50.0)]);
        let mut state = LayoutState::default();
        assert_eq!(j.adjust(Pt(0.0), Pt(10.0), true, &mut state, &Blocks), 1);
        assert_eq!(positions(&j), vec![0.0]);
        assert!(j.items.is_empty());
    }

    #[test]
    fn empty_input_places_nothing() {
        let mut j: Justifier<Block> = Justifier::new();
        let mut state = LayoutState::default();
        assert_eq!(j.adjust(Pt(0.0), Pt(10.0), true, &mut state, &Blocks), 0);
        assert!(j.places.is_empty());
    }

    #[test]
    fn empty_span_places_nothing() {
        let mut j = justifier(&[block('a', 1.0)]);
        let mut state = LayoutState::default();
        assert_eq!(j.adjust(Pt(5.0), Pt(5.0), true, &mut state, &Blocks), 0);
        assert_eq!(j.items.len(), 1);
    }

    #[test]
    fn adjust_is_idempotent() {
        let mut j = justifier(&[block('a', 3.0), block('b', 3.0), block('c', 3.0), block('d', 3.0)]);
        let mut state = LayoutState::default();
        state.along_x.centering = 0.5;
        let first = j.adjust(Pt(0.0), Pt(10.0), true, &mut state, &Blocks);
        let before = positions(&j);
        let second = j.adjust(Pt(0.0), Pt(40.0), true, &mut state, &Blocks);
        assert_eq!(first, second);
        assert_eq!(before, positions(&j));
    }

    #[test]
    fn spans_may_run_downwards() {
        let mut j = justifier(&[block('a', 10.0), block('b', 10.0), block('c', 10.0)]);
        let mut state = LayoutState::default();
        assert_eq!(j.adjust(Pt(100.0), Pt(80.0), true, &mut state, &Blocks), 2);
        assert_eq!(positions(&j), vec![100.0, 90.0]);
    }

    #[test]
    fn overflow_backs_up_to_the_last_break() {
        let mut b = block('b', 4.0);
        b.order = BreakOrder::None;
        let mut attr = block('w', 0.0);
        attr.order = BreakOrder::None;
        attr.line_width = Some(5.0);
        let mut j = justifier(&[block('a', 4.0), attr, b, block('c', 4.0)]);
        let mut state = LayoutState::default();
        let before = state.line_width;

        assert_eq!(j.adjust(Pt(0.0), Pt(10.0), false, &mut state, &Blocks), 1);
        assert_eq!(names(j.items.iter()), "wbc");
        assert_eq!(state.line_width, before);
    }

    #[test]
    fn strong_break_ends_the_fit_without_stretching() {
        let mut b = block('b', 2.0);
        b.order = BreakOrder::Line;
        let mut j = justifier(&[block('a', 2.0), b, block('c', 2.0)]);
        let mut state = LayoutState::default();
        state.along_x.amount = 1.0;

        assert_eq!(j.adjust(Pt(0.0), Pt(100.0), true, &mut state, &Blocks), 2);
        assert_eq!(positions(&j), vec![0.0, 2.0]);
        assert_eq!(names(j.items.iter()), "c");
    }

    #[test]
    fn separators_and_spacing_advance_the_cursor() {
        let mut a = block('a', 2.0);
        a.space = 1.0;
        let mut j = justifier(&[a, block('b', 2.0), block('c', 2.0)]);
        let mut state = LayoutState::default();
        state.along_x.spacing = 2.0;
        state.along_x.before = Pt(0.5);
        state.along_x.after = Pt(0.5);

        j.adjust(Pt(0.0), Pt(100.0), false, &mut state, &Blocks);
        assert_eq!(positions(&j), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn adding_after_placement_keeps_every_item() {
        let mut j = justifier(&[block('a', 4.0), block('b', 4.0), block('c', 4.0)]);
        let mut state = LayoutState::default();
        j.adjust(Pt(0.0), Pt(10.0), false, &mut state, &Blocks);
        j.add(block('d', 1.0));

        assert!(!j.is_computed());
        assert_eq!(names(j.items.iter()), "abcd");
        assert_eq!(j.adjust(Pt(0.0), Pt(100.0), false, &mut state, &Blocks), 4);
        let all: String = j.into_items().map(|b| b.name).collect();
        assert_eq!(all, "abcd");
    }
}
