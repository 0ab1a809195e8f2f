//! The layout engine: drawings, the containers that place them, and the
//! fitting algorithm shared by lines and pages.
//!
//! Items added to a [PageLayout] are broken into [LayoutLine]s, each line is
//! justified horizontally, then the lines are justified down the page. Both
//! steps run the same [Justifier], parameterised by a [Fitting] strategy.
//! Whatever does not fit is handed by [PageLayout::remaining] to the next
//! [PageLayoutOverflow] of the same flow.
//!
//! # Example
//!
//! ```
//! use flow_layout::{DisplayList, Document, Rect, Pt};
//!
//! let mut doc = Document::default();
//! doc.evaluate(|b| {
//!     b.text_box(Rect::new(Pt(0.0), Pt(0.0), Pt(200.0), Pt(30.0)), |b| {
//!         b.text("Lorem ipsum dolor sit amet, consectetur adipiscing elit.");
//!     });
//!     b.text_overflow(Rect::new(Pt(0.0), Pt(-100.0), Pt(200.0), Pt(-70.0)));
//! });
//!
//! let mut canvas = DisplayList::new();
//! doc.draw(&mut canvas);
//! assert!(!canvas.texts().is_empty());
//! ```

mod attributes;
mod context;
mod drawing;
mod group;
mod justifier;
mod line;
mod margins;
mod overflow;
mod page;
mod shapes;
mod state;
mod text;

pub use attributes::*;
pub use context::*;
pub use drawing::*;
pub use group::*;
pub use justifier::*;
pub use line::*;
pub use margins::*;
pub use overflow::*;
pub use page::*;
pub use shapes::*;
pub use state::*;
pub use text::*;
