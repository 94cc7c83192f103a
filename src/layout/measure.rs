use crate::units::Pt;

/// Which face of the report's font family a run of text is set in
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Cell text, metadata and footers
    Regular,
    /// Title lines, column headers and the summary line
    Bold,
}

/// Measures rendered text. Every layout decision in the crate is made against
/// an implementation of this trait, so the same measurer must be used for the
/// whole render.
pub trait TextMeasurer {
    /// The rendered width of `text` set in `style` at `size`
    fn measure_width(&self, text: &str, style: FontStyle, size: Pt) -> Pt;

    /// Whether `ch` can be drawn in `style`. Characters that can't are
    /// reported before layout starts.
    fn supports(&self, _ch: char, _style: FontStyle) -> bool {
        true
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_width(&self, text: &str, style: FontStyle, size: Pt) -> Pt {
        (**self).measure_width(text, style, size)
    }

    fn supports(&self, ch: char, style: FontStyle) -> bool {
        (**self).supports(ch, style)
    }
}

/// A fixed-pitch measurer: every character advances by `advance` em, in any style.
/// Layouts made with it are exact, which makes it handy for tests and for
/// monospaced reports.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Monospace {
    pub advance: f32,
}

impl Monospace {
    pub fn new(advance: f32) -> Monospace {
        Monospace { advance }
    }
}

impl Default for Monospace {
    fn default() -> Self {
        Monospace { advance: 0.6 }
    }
}

impl TextMeasurer for Monospace {
    fn measure_width(&self, text: &str, _style: FontStyle, size: Pt) -> Pt {
        size * (self.advance * text.chars().count() as f32)
    }
}
