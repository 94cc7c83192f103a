//! Paginated tabular reports rendered to fixed-layout PDF.
//!
//! A report is a table of rows under a fixed column schema, preceded by a
//! first-page title band and followed by a summary box and a signer band.
//! Rows wrap inside their columns and never split across pages; the column
//! headers repeat on every page and every page carries a "page X of N" footer.
//!
//! ```
//! use chrono::NaiveDate;
//! use pdf_tabulate::layout::{ColumnSpec, Row};
//! use pdf_tabulate::{
//!     DocumentRenderer, FontFamily, Image, LocaleFormatter, Logos, MemoryAssets, Pt, Report,
//!     Signer,
//! };
//!
//! let logo = Image::new_raster(image::DynamicImage::new_rgb8(4, 2));
//! let assets = MemoryAssets::new().with("left", logo.clone()).with("right", logo);
//! let fonts = FontFamily::helvetica();
//! let formatter = LocaleFormatter::en_us();
//!
//! let columns = [
//!     ColumnSpec::single("Code", Pt(80.0), "code"),
//!     ColumnSpec::single("Value", Pt(80.0), "value"),
//! ];
//! let rows: Vec<Row> = (0..60)
//!     .map(|i| Row::new().with("code", format!("A-{i}")).with("value", 10.0))
//!     .collect();
//! let signers = [Signer::new("Reviewed by", "Ana Ruiz", "Auditor")];
//!
//! let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! let report = Report::new("Stock", &columns, &rows, date, Logos::new("left", "right"))
//!     .with_signers(&signers)
//!     .with_metadata_signer(&signers[0])
//!     .with_total_key("value");
//!
//! let document = DocumentRenderer::new(&fonts, &formatter, &assets)
//!     .render(&report)
//!     .unwrap();
//! assert!(document.to_bytes(&fonts).starts_with(b"%PDF"));
//! ```

mod assets;
pub use assets::*;

mod cancel;
pub use cancel::*;

mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod format;
pub use format::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Text measurement, line wrapping and page planning
pub mod layout;

mod page;
pub use page::*;

/// Common page sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod render;
pub use render::*;

mod typeface;
pub use typeface::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
