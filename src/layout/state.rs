use crate::colour::Colour;
use crate::config::LayoutConfig;
use crate::font::FontSpec;
use crate::geometry::Box3;
use crate::layout::Margins;
use crate::transform::Transform;
use crate::units::Pt;

/// The direction a justification parameter applies to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// Along a line, left to right
    X,
    /// Down a page, top to bottom
    Y,
}

/// How slack is distributed when items are fitted along one axis.
///
/// Contributions are additive: a line may be centred and spread at the same
/// time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Justification {
    /// Fraction of the slack inserted between items, `0.0..=1.0`
    pub amount: f32,
    /// Fraction of the remaining slack used to shift every item, half of it
    /// on each side
    pub centering: f32,
    /// Fraction of the remaining slack handed out per item index
    pub spread: f32,
    /// Multiplier applied to each item's size when advancing
    pub spacing: f32,
    /// Minimum space reserved before an item
    pub before: Pt,
    /// Minimum space reserved after an item
    pub after: Pt,
}

impl Default for Justification {
    fn default() -> Self {
        Justification {
            amount: 0.0,
            centering: 0.0,
            spread: 0.0,
            spacing: 1.0,
            before: Pt::ZERO,
            after: Pt::ZERO,
        }
    }
}

/// The attribute bundle drawings are evaluated and laid out with.
///
/// A plain value: containers snapshot it on entry and put the snapshot back
/// on exit, so a change made by one child is seen by the next sibling but
/// never by the container's caller.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    pub fill: Colour,
    pub line_colour: Colour,
    pub line_width: Pt,
    pub font: FontSpec,
    pub transform: Transform,
    pub margins: Margins,
    pub along_x: Justification,
    pub along_y: Justification,
    /// Box available to the enclosing page
    pub space: Box3,
    /// Set once a transform attribute was applied
    pub has_matrix: bool,
    /// Set once any attribute was applied
    pub has_attributes: bool,
}

impl LayoutState {
    pub fn new(config: &LayoutConfig) -> LayoutState {
        LayoutState {
            fill: config.fill_colour,
            line_colour: config.line_colour,
            line_width: config.line_width,
            font: FontSpec::fallback(config.font_size),
            transform: Transform::identity(),
            margins: Margins::empty(),
            along_x: Justification::default(),
            along_y: Justification::default(),
            space: Box3::empty(),
            has_matrix: false,
            has_attributes: false,
        }
    }

    pub fn along(&self, axis: Axis) -> &Justification {
        match axis {
            Axis::X => &self.along_x,
            Axis::Y => &self.along_y,
        }
    }

    pub fn along_mut(&mut self, axis: Axis) -> &mut Justification {
        match axis {
            Axis::X => &mut self.along_x,
            Axis::Y => &mut self.along_y,
        }
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        LayoutState::new(&LayoutConfig::default())
    }
}
