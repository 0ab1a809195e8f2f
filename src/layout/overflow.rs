use crate::geometry::{Box3, Rect};
use crate::layout::{DrawContext, Drawing, PageLayout, Pass, Placeholder};
use std::cell::RefCell;
use std::rc::Rc;

/// A box continuing a named flow: the first time it is drawn it takes over
/// whatever the flow's current page could not place, and becomes the flow's
/// current page itself. With nothing to take over it shows a placeholder.
#[derive(Debug)]
pub struct PageLayoutOverflow {
    pub bounds: Rect,
    pub flow: String,
    child: Option<Rc<RefCell<PageLayout>>>,
    placeholder: Placeholder,
}

impl PageLayoutOverflow {
    pub fn new<S: Into<String>>(bounds: Rect, flow: S) -> PageLayoutOverflow {
        let bounds = bounds.normalized();
        PageLayoutOverflow {
            bounds,
            flow: flow.into(),
            child: None,
            placeholder: Placeholder::new(bounds),
        }
    }

    /// The continuation page this box is showing, if any
    pub fn child(&self) -> Option<&Rc<RefCell<PageLayout>>> {
        self.child.as_ref()
    }

    /// Bind the continuation of the flow on first use
    pub fn has_data(&mut self, ctx: &mut DrawContext<'_>) -> bool {
        if self.child.is_none() {
            self.child = self.take_remainder(ctx);
        }
        self.child.is_some()
    }

    fn take_remainder(&self, ctx: &mut DrawContext<'_>) -> Option<Rc<RefCell<PageLayout>>> {
        let Some(source) = ctx.flows.current(&self.flow) else {
            log::debug!("flow '{}' has no source", self.flow);
            return None;
        };
        let remainder = match source.try_borrow_mut() {
            Ok(mut source) => source.remaining(),
            Err(_) => {
                log::debug!("flow '{}' is being laid out, cannot continue it", self.flow);
                return None;
            }
        };
        let Some(mut remainder) = remainder else {
            log::debug!("flow '{}' has nothing left", self.flow);
            return None;
        };

        remainder.space = Box3::from(self.bounds);
        let child = Rc::new(RefCell::new(remainder));
        ctx.flows.advance(&self.flow, &child);
        Some(child)
    }

    fn traverse(&mut self, ctx: &mut DrawContext<'_>, pass: Pass) {
        if self.has_data(ctx) {
            if let Some(child) = &self.child {
                match child.try_borrow_mut() {
                    Ok(mut page) => pass.run(&mut *page, ctx),
                    Err(_) => log::warn!("overflow box for '{}' drawn from inside itself", self.flow),
                }
            }
        } else {
            pass.run(&mut self.placeholder, ctx);
        }
    }
}

impl Drawing for PageLayoutOverflow {
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
        Box3::from(self.bounds)
    }
}
