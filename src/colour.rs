/// A colour, expressed in RGB, CMYK, or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    pub(crate) fn apply_fill(&self, content: &mut pdf_writer::Content) {
        match *self {
            Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
            Colour::Grey { g } => content.set_fill_gray(g),
        };
    }

    pub(crate) fn apply_stroke(&self, content: &mut pdf_writer::Content) {
        match *self {
            Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
            Colour::Grey { g } => content.set_stroke_gray(g),
        };
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// The colours a report is drawn with
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// Background of the repeated column header band
    pub const HEADER_SHADE: Colour = Colour::Grey { g: 0.85 };
    /// Background of the trailing summary box
    pub const SUMMARY_SHADE: Colour = Colour::Grey { g: 0.92 };
    /// Row separators and signature lines
    pub const RULE: Colour = Colour::Grey { g: 0.6 };
    /// Footer text
    pub const MUTED: Colour = Colour::Grey { g: 0.4 };
}
