use crate::units::Pt;

/// Space kept clear inside a page. Lines are fitted between the left and
/// right margins, and lines between the top and bottom ones. Margins are part
/// of the attribute state, so they may change in the middle of a flow and
/// apply from the next line on.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins {
            top: Pt(0.0),
            right: Pt(0.0),
            bottom: Pt(0.0),
            left: Pt(0.0),
        }
    }
}
