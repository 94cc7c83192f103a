#![allow(dead_code)]

use pdf_tabulate::layout::{ColumnSpec, Monospace, PageGeometry, Row};
use pdf_tabulate::Pt;

/// One point per character at one point of font size
pub const MONO: Monospace = Monospace { advance: 1.0 };

/// A small page that holds 20 minimum-height rows below the first-page title
/// band and below the continuation gap of later pages
pub fn geometry() -> PageGeometry {
    PageGeometry {
        page_width: Pt(600.0),
        page_height: Pt(450.0),
        margin: Pt(10.0),
        header_band_height: Pt(20.0),
        font_size: Pt(8.0),
        header_font_size: Pt(8.0),
        min_row_height: Pt(20.0),
        vertical_cell_padding: Pt(4.0),
        cell_padding: Pt(2.0),
        line_spacing: Pt(2.0),
        title_band_height: Pt(10.0),
        continuation_top_gap: Pt(10.0),
        logo_height: Pt(5.0),
        summary_height: Pt(20.0),
        signer_band_height: Pt(80.0),
        trailing_gap: Pt(10.0),
    }
}

pub fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::single("A", Pt(100.0), "a"),
        ColumnSpec::single("B", Pt(300.0), "b"),
        ColumnSpec::single("C", Pt(100.0), "c"),
    ]
}

pub fn short_row() -> Row {
    Row::new().with("a", "x").with("b", "y").with("c", "z")
}

/// A row whose middle cell wraps to `lines` lines
pub fn tall_row(lines: usize) -> Row {
    let word = "w".repeat(30);
    Row::new()
        .with("a", "x")
        .with("b", vec![word.as_str(); lines].join(" "))
        .with("c", "z")
}
