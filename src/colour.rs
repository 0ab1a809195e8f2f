/// A colour, expressed in the device colour spaces a canvas understands
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// r, g, b range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// c, m, y, k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// g ranges from 0.0 (black) to 1.0 (white)
    Grey { g: f32 },
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

impl Colour {
    pub fn rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    pub fn cmyk(c: f32, m: f32, y: f32, k: f32) -> Colour {
        Colour::CMYK {
            c: c.clamp(0.0, 1.0),
            m: m.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
            k: k.clamp(0.0, 1.0),
        }
    }

    pub fn grey(g: f32) -> Colour {
        Colour::Grey {
            g: g.clamp(0.0, 1.0),
        }
    }
}

/// Pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const GREY: Colour = Colour::Grey { g: 0.5 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
    /// Outline of a selected shape
    pub const SELECTION: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    /// Outline of an empty overflow box
    pub const PLACEHOLDER: Colour = Colour::RGB {
        r: 0.2,
        g: 0.6,
        b: 1.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_are_clamped() {
        assert_eq!(Colour::rgb(2.0, -1.0, 0.5), Colour::RGB { r: 1.0, g: 0.0, b: 0.5 });
        assert_eq!(Colour::rgb(0.0, 0.0, 1.0), colours::BLUE);
        assert_eq!(Colour::grey(-0.5), colours::BLACK);
        assert_eq!(
            Colour::cmyk(0.0, 1.5, 0.0, 0.0),
            Colour::CMYK { c: 0.0, m: 1.0, y: 0.0, k: 0.0 }
        );
    }
}
