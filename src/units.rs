//! Scalar units used along every layout axis.

use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// A length in document coordinates. Document coordinates are not pixels;
/// the host decides how a point maps onto the screen or the page.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    /// Absolute value of the length
    pub fn abs(self) -> Pt {
        Pt(self.0.abs())
    }

    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Mul<Pt> for Pt {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self.0 * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Div<Pt> for Pt {
    type Output = Pt;

    fn div(self, rhs: Pt) -> Pt {
        Pt(self.0 / rhs.0)
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

/// Inches, converted to [Pt] at 72 points per inch
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, From)]
pub struct In(pub f32);

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * 72.0)
    }
}

/// Millimetres, converted to [Pt] at 72 points per 25.4mm
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, From)]
pub struct Mm(pub f32);

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * 72.0 / 25.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixes_with_plain_scalars() {
        assert_eq!(Pt(4.0) * 2.0, Pt(8.0));
        assert_eq!(0.5 * Pt(4.0), Pt(2.0));
        assert_eq!(Pt(9.0) / 3.0, Pt(3.0));
        assert_eq!(-Pt(1.5), Pt(-1.5));
        assert_eq!([Pt(1.0), Pt(2.0), Pt(3.0)].into_iter().sum::<Pt>(), Pt(6.0));
    }

    #[test]
    fn converts_physical_units() {
        assert_eq!(Pt::from(In(1.0)), Pt(72.0));
        assert!((*Pt::from(Mm(25.4)) - 72.0).abs() < 1e-4);
    }
}
