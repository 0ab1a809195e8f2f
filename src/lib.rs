mod builder;
pub use builder::*;

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod document;
pub use document::*;

mod flow;
pub use flow::*;

mod font;
pub use font::*;

mod geometry;
pub use geometry::*;

/// Drawings, the containers that place them, and the justification
/// algorithm shared by lines and pages
pub mod layout;
pub use layout::*;

mod pdf;
pub use pdf::*;

mod pick;
pub use pick::*;

pub(crate) mod refs;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
