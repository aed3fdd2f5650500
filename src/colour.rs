/// A colour, expressed in the RGB or greyscale colour space
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b range from 0.0 to 1.0
    Rgb { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::Rgb { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::Rgb {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Create a new colour in the Gray space, g ranges from 0 to 255
    pub fn new_grey_bytes(g: u8) -> Colour {
        Colour::Grey {
            g: g as f32 / 255.0,
        }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::Rgb {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

impl<T: Into<f32>> From<[T; 3]> for Colour {
    fn from(c: [T; 3]) -> Self {
        let [r, g, b] = c;
        Colour::Rgb {
            r: r.into(),
            g: g.into(),
            b: b.into(),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const RED: Colour = Colour::Rgb {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const GREEN: Colour = Colour::Rgb {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::Rgb {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
    /// Default fill for table header rows
    pub const LIGHT_GREY: Colour = Colour::Grey { g: 240.0 / 255.0 };
    /// Default colour for separator rules in headers, footers, and logos
    pub const MID_GREY: Colour = Colour::Grey { g: 128.0 / 255.0 };
}
