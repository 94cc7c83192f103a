//! The layout engine: text measurement, line wrapping, row measurement and
//! page planning for fixed-column tables.
//!
//! Layout happens in points on fixed-size pages with the origin at the
//! bottom-left, as in PDF. Rows are placed top-down; a row is never split
//! across pages.
//!
//! # Example
//!
//! ```
//! use pdf_tabulate::layout::{ColumnSpec, Monospace, PageGeometry, Row, TableLayout};
//! use pdf_tabulate::Pt;
//!
//! let columns = vec![
//!     ColumnSpec::single("Code", Pt(80.0), "code"),
//!     ColumnSpec::composite("Item", Pt(300.0), ["brand", "model"]),
//! ];
//! let rows: Vec<Row> = (0..100)
//!     .map(|i| Row::new().with("code", format!("A-{i}")).with("brand", "Acme"))
//!     .collect();
//!
//! let geometry = PageGeometry::default();
//! let measurer = Monospace::default();
//! let layout = TableLayout::new(&measurer, &columns, &geometry);
//! let plan = layout.estimate(&rows, 2).expect("can paginate");
//! assert_eq!(plan.per_page_row_counts.iter().sum::<usize>(), 100);
//! ```

mod geometry;
mod measure;
mod planner;
mod table;
mod wrap;

pub use geometry::*;
pub use measure::*;
pub use planner::*;
pub use table::*;
pub use wrap::*;
