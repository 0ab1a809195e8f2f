//! Rectangles, bounding volumes and offsets in document coordinates.
//!
//! Coordinates grow rightwards along x and upwards along y, the same
//! convention as PDF content streams.

use crate::units::*;

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, lower-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, lower-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, upper-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, upper-right) corner.
    pub y2: Pt,
}

impl Rect {
    pub fn new(x1: Pt, y1: Pt, x2: Pt, y2: Pt) -> Rect {
        Rect { x1, y1, x2, y2 }
    }

    /// Build a rectangle from its centre and size, the way the document
    /// language describes boxes
    pub fn centered(cx: Pt, cy: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: cx - width / 2.0,
            y1: cy - height / 2.0,
            x2: cx + width / 2.0,
            y2: cy + height / 2.0,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    /// Same rectangle with `x1 <= x2` and `y1 <= y2`
    pub fn normalized(&self) -> Rect {
        Rect {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    pub fn contains(&self, x: Pt, y: Pt) -> bool {
        let r = self.normalized();
        x >= r.x1 && x <= r.x2 && y >= r.y1 && y <= r.y2
    }

    pub fn translated(&self, dx: Pt, dy: Pt) -> Rect {
        Rect {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

/// An offset applied to drawings when they are placed by a layout
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector3 {
    pub x: Pt,
    pub y: Pt,
    pub z: Pt,
}

impl Vector3 {
    pub fn new(x: Pt, y: Pt, z: Pt) -> Vector3 {
        Vector3 { x, y, z }
    }
}

/// A bounding volume. An empty box has its lower corner above its upper
/// corner, which makes it the identity element for [Box3::union].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Box3 {
    pub x1: Pt,
    pub y1: Pt,
    pub z1: Pt,
    pub x2: Pt,
    pub y2: Pt,
    pub z2: Pt,
}

impl Default for Box3 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Box3 {
    pub fn empty() -> Box3 {
        Box3 {
            x1: Pt(f32::INFINITY),
            y1: Pt(f32::INFINITY),
            z1: Pt(f32::INFINITY),
            x2: Pt(f32::NEG_INFINITY),
            y2: Pt(f32::NEG_INFINITY),
            z2: Pt(f32::NEG_INFINITY),
        }
    }

    /// A box from its lower corner and its extent along each axis
    pub fn new(x: Pt, y: Pt, z: Pt, width: Pt, height: Pt, depth: Pt) -> Box3 {
        Box3 {
            x1: x,
            y1: y,
            z1: z,
            x2: x + width,
            y2: y + height,
            z2: z + depth,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2 || self.z1 > self.z2
    }

    pub fn width(&self) -> Pt {
        if self.is_empty() {
            Pt::ZERO
        } else {
            self.x2 - self.x1
        }
    }

    pub fn height(&self) -> Pt {
        if self.is_empty() {
            Pt::ZERO
        } else {
            self.y2 - self.y1
        }
    }

    pub fn depth(&self) -> Pt {
        if self.is_empty() {
            Pt::ZERO
        } else {
            self.z2 - self.z1
        }
    }

    pub fn left(&self) -> Pt {
        self.x1
    }

    pub fn right(&self) -> Pt {
        self.x2
    }

    pub fn bottom(&self) -> Pt {
        self.y1
    }

    pub fn top(&self) -> Pt {
        self.y2
    }

    pub fn front(&self) -> Pt {
        self.z2
    }

    pub fn back(&self) -> Pt {
        self.z1
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &Box3) -> Box3 {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Box3 {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            z1: self.z1.min(other.z1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
            z2: self.z2.max(other.z2),
        }
    }

    /// The box moved by `offset`. Empty boxes stay empty.
    pub fn translated(&self, offset: Vector3) -> Box3 {
        if self.is_empty() {
            return *self;
        }
        Box3 {
            x1: self.x1 + offset.x,
            y1: self.y1 + offset.y,
            z1: self.z1 + offset.z,
            x2: self.x2 + offset.x,
            y2: self.y2 + offset.y,
            z2: self.z2 + offset.z,
        }
    }

    /// Projection of the box on the x/y plane
    pub fn to_rect(&self) -> Rect {
        if self.is_empty() {
            return Rect::new(Pt::ZERO, Pt::ZERO, Pt::ZERO, Pt::ZERO);
        }
        Rect::new(self.x1, self.y1, self.x2, self.y2)
    }
}

impl From<Rect> for Box3 {
    fn from(r: Rect) -> Self {
        let r = r.normalized();
        Box3 {
            x1: r.x1,
            y1: r.y1,
            z1: Pt::ZERO,
            x2: r.x2,
            y2: r.y2,
            z2: Pt::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_is_union_identity() {
        let b = Box3::new(Pt(1.0), Pt(2.0), Pt(0.0), Pt(3.0), Pt(4.0), Pt(0.0));
        assert_eq!(Box3::empty().union(&b), b);
        assert_eq!(b.union(&Box3::empty()), b);
        assert_eq!(Box3::empty().width(), Pt::ZERO);
        assert!(Box3::empty().translated(Vector3::new(Pt(5.0), Pt(5.0), Pt(0.0))).is_empty());
    }

    #[test]
    fn union_covers_both() {
        let a = Box3::new(Pt(0.0), Pt(0.0), Pt(0.0), Pt(2.0), Pt(2.0), Pt(0.0));
        let b = Box3::new(Pt(5.0), Pt(-1.0), Pt(0.0), Pt(1.0), Pt(1.0), Pt(0.0));
        let u = a.union(&b);
        assert_eq!(u.left(), Pt(0.0));
        assert_eq!(u.right(), Pt(6.0));
        assert_eq!(u.bottom(), Pt(-1.0));
        assert_eq!(u.top(), Pt(2.0));
    }

    #[test]
    fn centered_rect() {
        let r = Rect::centered(Pt(10.0), Pt(20.0), Pt(4.0), Pt(6.0));
        assert_eq!(r, Rect::new(Pt(8.0), Pt(17.0), Pt(12.0), Pt(23.0)));
        assert!(r.contains(Pt(10.0), Pt(20.0)));
        assert!(!r.contains(Pt(13.0), Pt(20.0)));
    }
}
