use crate::canvas::SelectionMode;
use crate::font::FontSpec;
use crate::geometry::Box3;
use crate::layout::{BreakOrder, DrawContext, Drawing};
use crate::units::Pt;

/// A run of text in a single font.
///
/// Runs are split lazily by the line fitting: at whitespace when words are
/// being fitted, and only at newlines when lines are. The text drawn for a run
/// never includes its trailing whitespace, which is reported as
/// [Drawing::trailing_space_size] instead so justification can stretch it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: FontSpec,
}

impl TextRun {
    pub fn new<S: Into<String>>(text: S, font: FontSpec) -> TextRun {
        let text = text.into().replace("\r\n", "\n").replace('\r', "\n");
        TextRun { text, font }
    }

    /// The text without its trailing whitespace
    pub fn visible(&self) -> &str {
        self.text.trim_end()
    }

    fn trailing(&self) -> &str {
        &self.text[self.visible().len()..]
    }

    /// First boundary of the requested strength followed by more text, as the
    /// byte index where the continuation starts
    fn find_break(&self, requested: BreakOrder) -> Option<(usize, BreakOrder)> {
        let text = self.text.as_str();
        let mut chars = text.char_indices().peekable();
        while let Some((start, ch)) = chars.next() {
            if !ch.is_whitespace() {
                continue;
            }

            let mut end = start + ch.len_utf8();
            let mut newline = (ch == '\n').then_some(end);
            while let Some(&(i, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = i + next.len_utf8();
                if next == '\n' && newline.is_none() {
                    newline = Some(end);
                }
                chars.next();
            }
            if end >= text.len() {
                return None;
            }

            match (newline, requested) {
                (Some(at), BreakOrder::None | BreakOrder::Word | BreakOrder::Line) => {
                    // the next line starts at its text, or at the next newline
                    // so blank lines survive
                    let at = text[at..end].find('\n').map_or(end, |i| at + i);
                    return Some((at, BreakOrder::Line));
                }
                (None, BreakOrder::None | BreakOrder::Word) => return Some((end, BreakOrder::Word)),
                _ => {}
            }
        }
        None
    }

    /// Strength of the boundary after the run when it is not split
    fn ending(&self, requested: BreakOrder) -> BreakOrder {
        let trailing = self.trailing();
        if trailing.contains('\n') {
            BreakOrder::Line
        } else if !trailing.is_empty() && requested <= BreakOrder::Word {
            BreakOrder::Word
        } else {
            BreakOrder::None
        }
    }
}

impl Drawing for TextRun {
    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let visible = self.visible();
        if visible.is_empty() {
            return;
        }
        ctx.canvas
            .text((ctx.offset.x, ctx.offset.y), visible, &self.font);
    }

    fn draw_selection(&mut self, ctx: &mut DrawContext<'_>) {
        ctx.select(self.bounds(), SelectionMode::Text);
    }

    fn bounds(&self) -> Box3 {
        let width = self.font.width_of(self.visible());
        let descent = self.font.descent();
        let height = self.font.ascent() - descent;
        Box3::new(Pt::ZERO, descent, Pt::ZERO, width, height, Pt::ZERO)
    }

    fn space(&self) -> Box3 {
        let mut space = self.bounds();
        space.y1 -= self.font.leading();
        space
    }

    fn break_at(&mut self, order: &mut BreakOrder) -> Option<Box<dyn Drawing>> {
        match self.find_break(*order) {
            Some((at, found)) => {
                let rest = self.text.split_off(at);
                *order = found;
                Some(Box::new(TextRun {
                    text: rest,
                    font: self.font.clone(),
                }))
            }
            None => {
                *order = self.ending(*order);
                None
            }
        }
    }

    fn trailing_space_size(&self) -> Pt {
        self.font.width_of(self.trailing())
    }
}
