//! The fonts a report is set in: either one of the standard PDF fonts, which
//! every viewer provides, or an embedded [Font].

use crate::font::Font;
use crate::layout::{FontStyle, TextMeasurer};
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use pdf_writer::{Name, Pdf};

/// Advance widths of printable ASCII (' ' to '~') in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722, 722, 667,
    611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500,
    222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722, 722, 667,
    611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556,
    278, 889, 611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Advance widths of the Latin-1 supplement ('\u{a0}' to 'ÿ') in 1/1000 em
const HELVETICA_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, 400, 584, 333,
    333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, 667, 667, 667, 667, 667, 667,
    1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, 722, 722, 778, 778, 778, 778, 778, 584, 778,
    722, 722, 722, 722, 667, 667, 611, 556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556,
    278, 278, 278, 278, 556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556,
    500,
];

const HELVETICA_BOLD_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, 400, 584, 333,
    333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, 722, 722, 722, 722, 722, 722,
    1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, 722, 722, 778, 778, 778, 778, 778, 584, 778,
    722, 722, 722, 722, 667, 667, 611, 556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556,
    278, 278, 278, 278, 611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611,
    556,
];

/// The standard PDF fonts a report can use without embedding anything. Text is
/// WinAnsi encoded, so only Latin-1 characters (plus the euro sign) can be drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    fn base_font(&self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"Helvetica",
            StandardFont::HelveticaBold => b"Helvetica-Bold",
        }
    }

    fn default_width(&self) -> u16 {
        match self {
            StandardFont::Helvetica => 556,
            StandardFont::HelveticaBold => 611,
        }
    }

    /// Width of `ch` in 1/1000 em. Characters WinAnsi can't encode use the
    /// font's typical lowercase width.
    pub fn char_width(&self, ch: char) -> u16 {
        let (ascii, latin1) = match self {
            StandardFont::Helvetica => (&HELVETICA_WIDTHS, &HELVETICA_LATIN1_WIDTHS),
            StandardFont::HelveticaBold => (&HELVETICA_BOLD_WIDTHS, &HELVETICA_BOLD_LATIN1_WIDTHS),
        };
        match ch {
            ' '..='~' => ascii[ch as usize - ' ' as usize],
            '\u{a0}'..='ÿ' => latin1[ch as usize - 0xA0],
            '€' => 556,
            _ => self.default_width(),
        }
    }

    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let units: u32 = text.chars().map(|ch| self.char_width(ch) as u32).sum();
        size * (units as f32 / 1000.0)
    }

    /// The WinAnsi byte for `ch`, if it has one
    pub fn encode_char(ch: char) -> Option<u8> {
        match ch as u32 {
            0x20..=0x7E | 0xA0..=0xFF => Some(ch as u8),
            0x20AC => Some(0x80),
            _ => None,
        }
    }

    pub(crate) fn encode(text: &str) -> Vec<u8> {
        text.chars()
            .map(|ch| StandardFont::encode_char(ch).unwrap_or(b'?'))
            .collect()
    }
}

/// A face a [FontFamily] can draw with
pub enum Typeface {
    Standard(StandardFont),
    Embedded(Font),
}

impl Typeface {
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        match self {
            Typeface::Standard(font) => font.width_of_text(text, size),
            Typeface::Embedded(font) => font.width_of_text(text, size),
        }
    }

    pub fn supports(&self, ch: char) -> bool {
        match self {
            Typeface::Standard(_) => StandardFont::encode_char(ch).is_some(),
            Typeface::Embedded(font) => font.glyph_id(ch).is_some(),
        }
    }

    /// Encode `text` for a content stream using this face
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Typeface::Standard(_) => StandardFont::encode(text),
            Typeface::Embedded(font) => font.encode(text),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        match self {
            Typeface::Standard(font) => {
                let id = refs.gen(RefType::Font(font_index));
                writer
                    .type1_font(id)
                    .base_font(Name(font.base_font()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Typeface::Embedded(font) => font.write(refs, font_index, writer),
        }
    }
}

impl From<StandardFont> for Typeface {
    fn from(font: StandardFont) -> Self {
        Typeface::Standard(font)
    }
}

impl From<Font> for Typeface {
    fn from(font: Font) -> Self {
        Typeface::Embedded(font)
    }
}

/// The regular and bold faces a report is set in. Without a bold face, bold
/// text is set in the regular face.
pub struct FontFamily {
    pub regular: Typeface,
    pub bold: Option<Typeface>,
}

impl FontFamily {
    pub fn new<R: Into<Typeface>>(regular: R) -> FontFamily {
        FontFamily {
            regular: regular.into(),
            bold: None,
        }
    }

    pub fn with_bold<B: Into<Typeface>>(mut self, bold: B) -> FontFamily {
        self.bold = Some(bold.into());
        self
    }

    /// Helvetica and Helvetica-Bold
    pub fn helvetica() -> FontFamily {
        FontFamily::new(StandardFont::Helvetica).with_bold(StandardFont::HelveticaBold)
    }

    pub fn face(&self, style: FontStyle) -> &Typeface {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => self.bold.as_ref().unwrap_or(&self.regular),
        }
    }

    /// Index of the PDF font resource (`/F{index}`) used for `style`
    pub(crate) fn resource_index(&self, style: FontStyle) -> usize {
        match (style, &self.bold) {
            (FontStyle::Bold, Some(_)) => 1,
            _ => 0,
        }
    }

    pub(crate) fn faces(&self) -> impl Iterator<Item = &Typeface> {
        std::iter::once(&self.regular).chain(self.bold.iter())
    }
}

impl TextMeasurer for FontFamily {
    fn measure_width(&self, text: &str, style: FontStyle, size: Pt) -> Pt {
        self.face(style).width_of_text(text, size)
    }

    fn supports(&self, ch: char, style: FontStyle) -> bool {
        self.face(style).supports(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_widths_come_from_the_metrics_table() {
        assert_eq!(StandardFont::Helvetica.char_width(' '), 278);
        assert_eq!(StandardFont::Helvetica.char_width('W'), 944);
        assert_eq!(StandardFont::HelveticaBold.char_width('~'), 584);
        assert_eq!(StandardFont::Helvetica.char_width('é'), 556);

        let width = StandardFont::Helvetica.width_of_text("Hi", Pt(10.0));
        assert!((width.0 - 9.44).abs() < 1e-4);
    }

    #[test]
    fn accented_capitals_are_as_wide_as_their_base_letters() {
        let regular = StandardFont::Helvetica;
        assert_eq!(regular.char_width('Ñ'), regular.char_width('N'));
        assert_eq!(regular.char_width('Á'), regular.char_width('A'));
        assert_eq!(regular.char_width('Ö'), 778);
        assert_eq!(regular.char_width('Æ'), 1000);
        assert_eq!(regular.char_width('\u{a0}'), 278);
        assert_eq!(regular.char_width('€'), 556);

        let bold = StandardFont::HelveticaBold;
        assert_eq!(bold.char_width('É'), bold.char_width('E'));
        assert_eq!(bold.char_width('ñ'), bold.char_width('n'));
        assert_eq!(bold.char_width('ÿ'), bold.char_width('y'));
    }

    #[test]
    fn winansi_covers_latin1_and_euro() {
        assert_eq!(StandardFont::encode("Año €5"), vec![b'A', 0xF1, b'o', b' ', 0x80, b'5']);
        assert_eq!(StandardFont::encode_char('→'), None);
    }

    #[test]
    fn bold_falls_back_to_regular() {
        let family = FontFamily::new(StandardFont::Helvetica);
        assert_eq!(family.resource_index(FontStyle::Bold), 0);
        assert_eq!(
            family.measure_width("A", FontStyle::Bold, Pt(1.0)),
            family.measure_width("A", FontStyle::Regular, Pt(1.0))
        );

        let family = FontFamily::helvetica();
        assert_eq!(family.resource_index(FontStyle::Bold), 1);
        assert_eq!(family.faces().count(), 2);
        assert!(!family.supports('→', FontStyle::Regular));
    }
}
