//! Pre-defined page sizes.
//!
//! Sizes are given in portrait orientation (width, height) where width ≤ height, except
//! for [REPORT_LANDSCAPE] which is the default canvas for tabular reports. Use the
//! [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between
//! portrait and landscape.

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));

/// A4 in landscape, rounded to whole points
pub const REPORT_LANDSCAPE: PageSize = (Pt(842.0), Pt(595.0));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_turns_landscape() {
        let (w, h) = LETTER.landscape();
        assert_eq!(w, Pt(11.0 * 72.0));
        assert_eq!(h, Pt(8.5 * 72.0));
        assert_eq!(REPORT_LANDSCAPE.portrait(), (Pt(595.0), Pt(842.0)));
    }
}
