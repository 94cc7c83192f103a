use crate::layout::FontStyle;
use crate::units::Pt;
use thiserror::Error;

/// All errors that a report render or write can produce
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    /// The geometry or column schema can never produce a valid layout
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    /// An image or font needed by the report is unusable
    Asset(#[from] AssetError),

    #[error("the dataset is empty; there is nothing to render")]
    /// Zero rows were supplied
    EmptyDataset,

    #[error("the render was cancelled")]
    /// The caller cancelled the render; no document was produced
    Cancelled,

    #[error("page {page} drew {drawn} rows but the pagination plan expected {planned}")]
    /// The drawing pass disagreed with the dry run
    PlanMismatch {
        page: usize,
        planned: usize,
        drawn: usize,
    },

    #[error(transparent)]
    /// An I/O error occurred while writing the document
    Io(#[from] std::io::Error),
}

/// Layout configurations rejected before any drawing happens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("a report needs at least one column")]
    NoColumns,

    #[error("column `{column}` has width {width}, which leaves no room inside its cell padding")]
    ColumnWidth { column: String, width: Pt },

    #[error("column `{column}` is {available} wide inside its padding, but `{character}` needs {required}")]
    ColumnTooNarrow {
        column: String,
        character: char,
        required: Pt,
        available: Pt,
    },

    #[error("row {row} needs {required} of height but an empty page only offers {available}")]
    RowTooTall {
        row: usize,
        required: Pt,
        available: Pt,
    },

    #[error("header `{column}` wraps to {lines} lines, {required} tall, but the header band is {available}")]
    HeaderTooTall {
        column: String,
        lines: usize,
        required: Pt,
        available: Pt,
    },

    #[error("the summary and signer block needs {required} but a page only offers {available}")]
    TrailingBlockTooTall { required: Pt, available: Pt },
}

/// Problems with images and fonts
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset `{0}` was not found")]
    Missing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to decode the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    Font(#[from] owned_ttf_parser::FaceParsingError),

    #[error("the {style:?} font has no glyph for `{character}`")]
    MissingGlyph { character: char, style: FontStyle },
}
