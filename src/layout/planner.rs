//! Row measurement and page planning.
//!
//! The same [TableLayout::plan_page] drives both the dry run that counts pages
//! and the drawing pass; only the [DrawSink] differs.

use super::geometry::PageGeometry;
use super::measure::{FontStyle, TextMeasurer};
use super::table::{ColumnSpec, Row};
use super::wrap::{wrap_text, PageLine};
use crate::cancel::Cancellation;
use crate::error::{ConfigurationError, ReportError};
use crate::units::Pt;
use std::collections::HashSet;

/// The wrapped contents of one row and the height they need
#[derive(Clone, Debug, PartialEq)]
pub struct RowLayout {
    pub height: Pt,
    /// Wrapped lines of every cell, column by column
    pub lines: Vec<PageLine>,
    /// Number of lines in each column
    pub line_counts: Vec<usize>,
}

impl RowLayout {
    /// The lines of a single cell, top to bottom
    pub fn cell(&self, column: usize) -> impl Iterator<Item = &PageLine> {
        self.lines.iter().filter(move |line| line.column == column)
    }

    /// The tallest cell's line count, which sets the row height
    pub fn max_lines(&self) -> usize {
        self.line_counts.iter().copied().max().unwrap_or(1)
    }
}

/// Receives the placement decisions of [TableLayout::plan_page]. Positions are
/// the top edge of the placed band, in page coordinates.
pub trait DrawSink {
    fn begin_page(&mut self, _is_first_page: bool) {}
    fn column_headers(&mut self, _top: Pt) {}
    fn row(&mut self, _index: usize, _row: &Row, _layout: &RowLayout, _top: Pt) {}
}

/// A sink that draws nothing, used to count pages
#[derive(Debug, Default, Copy, Clone)]
pub struct DryRun;

impl DrawSink for DryRun {}

/// The outcome of planning one page
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PagePlan {
    pub rows_consumed: usize,
    /// The bottom edge of the last placed row
    pub end_y: Pt,
}

/// How a dataset splits over pages, computed before anything is drawn
#[derive(Clone, Debug, PartialEq)]
pub struct PaginationPlan {
    pub total_pages: usize,
    /// Rows on each content page. Only the first count can be zero, when the
    /// first row needs more room than the title band leaves.
    pub per_page_row_counts: Vec<usize>,
    /// The summary and signer block doesn't fit below the last row and gets
    /// a page of its own
    pub trailing_block_on_own_page: bool,
    /// The bottom edge of the last row on the last content page
    pub last_row_end_y: Pt,
}

impl PaginationPlan {
    /// Number of pages that carry table rows
    pub fn content_pages(&self) -> usize {
        self.per_page_row_counts.len()
    }
}

/// Lays out a fixed column schema against a fixed page geometry
pub struct TableLayout<'a, M: ?Sized> {
    measurer: &'a M,
    columns: &'a [ColumnSpec],
    geometry: &'a PageGeometry,
    cancellation: Option<&'a Cancellation>,
}

impl<'a, M: TextMeasurer + ?Sized> TableLayout<'a, M> {
    pub fn new(
        measurer: &'a M,
        columns: &'a [ColumnSpec],
        geometry: &'a PageGeometry,
    ) -> TableLayout<'a, M> {
        TableLayout {
            measurer,
            columns,
            geometry,
            cancellation: None,
        }
    }

    /// Check `cancellation` between the pages of [TableLayout::estimate]
    pub fn with_cancellation(mut self, cancellation: &'a Cancellation) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    pub fn columns(&self) -> &'a [ColumnSpec] {
        self.columns
    }

    pub fn geometry(&self) -> &'a PageGeometry {
        self.geometry
    }

    pub fn table_width(&self) -> Pt {
        self.columns.iter().map(|column| column.width).sum()
    }

    /// Width available to the text of a cell
    pub fn inner_width(&self, column: &ColumnSpec) -> Pt {
        column.width - self.geometry.cell_padding * 2.0
    }

    /// Rejects schemas that could never be laid out: no columns, columns with
    /// no room inside their padding, columns narrower than a single character
    /// of their own header or contents, and header labels that wrap taller
    /// than the header band.
    pub fn validate(&self, rows: &[Row]) -> Result<(), ConfigurationError> {
        if self.columns.is_empty() {
            return Err(ConfigurationError::NoColumns);
        }

        for column in self.columns {
            let available = self.inner_width(column);
            if !available.0.is_finite() || available.0 <= 0.0 {
                return Err(ConfigurationError::ColumnWidth {
                    column: column.header.clone(),
                    width: column.width,
                });
            }

            self.check_glyphs_fit(
                column,
                column.header.chars(),
                FontStyle::Bold,
                self.geometry.header_font_size,
            )?;

            let body: String = rows.iter().map(|row| column.resolve(row)).collect();
            self.check_glyphs_fit(column, body.chars(), FontStyle::Regular, self.geometry.font_size)?;

            let lines = self.header_lines(column).len();
            let required = self.header_height(lines);
            if required > self.geometry.header_band_height {
                return Err(ConfigurationError::HeaderTooTall {
                    column: column.header.clone(),
                    lines,
                    required,
                    available: self.geometry.header_band_height,
                });
            }
        }

        Ok(())
    }

    fn check_glyphs_fit<I: Iterator<Item = char>>(
        &self,
        column: &ColumnSpec,
        chars: I,
        style: FontStyle,
        size: Pt,
    ) -> Result<(), ConfigurationError> {
        let available = self.inner_width(column);
        let mut seen: HashSet<char> = HashSet::new();
        let mut buf = [0u8; 4];
        for ch in chars.filter(|ch| *ch != ' ') {
            if !seen.insert(ch) {
                continue;
            }
            let required = self.measurer.measure_width(ch.encode_utf8(&mut buf), style, size);
            if required > available {
                return Err(ConfigurationError::ColumnTooNarrow {
                    column: column.header.clone(),
                    character: ch,
                    required,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Wraps a column header label to its column
    pub fn header_lines(&self, column: &ColumnSpec) -> Vec<String> {
        wrap_text(
            &column.header,
            self.inner_width(column),
            self.measurer,
            FontStyle::Bold,
            self.geometry.header_font_size,
        )
    }

    /// Height of a header label that wraps to `lines` lines
    fn header_height(&self, lines: usize) -> Pt {
        let geometry = self.geometry;
        (geometry.header_font_size + geometry.line_spacing) * lines as f32 - geometry.line_spacing
    }

    /// Wraps every cell of `row`. All cells share one height, set by the cell
    /// with the most lines.
    pub fn layout_row(&self, row: &Row) -> RowLayout {
        let mut lines = Vec::new();
        let mut line_counts = Vec::with_capacity(self.columns.len());

        for (column_index, column) in self.columns.iter().enumerate() {
            let wrapped = wrap_text(
                &column.resolve(row),
                self.inner_width(column),
                self.measurer,
                FontStyle::Regular,
                self.geometry.font_size,
            );
            line_counts.push(wrapped.len());
            lines.extend(wrapped.into_iter().enumerate().map(|(line, text)| PageLine {
                text,
                column: column_index,
                line,
            }));
        }

        let max_lines = line_counts.iter().copied().max().unwrap_or(1);
        let text_height = self.geometry.line_height() * max_lines as f32
            + self.geometry.vertical_cell_padding * 2.0;

        RowLayout {
            height: self.geometry.min_row_height.max(text_height),
            lines,
            line_counts,
        }
    }

    pub fn row_height(&self, row: &Row) -> Pt {
        self.layout_row(row).height
    }

    /// Places as many of `rows` as fit on one page starting at `start_y`,
    /// reporting every placement to `sink`. `first_index` is the dataset index
    /// of `rows[0]`.
    ///
    /// The first page has the least room. When its first row only fits on a
    /// continuation page, the first page is left with its headers alone and
    /// the row moves on. A row that doesn't fit an empty continuation page
    /// either is a configuration error.
    pub fn plan_page<S: DrawSink + ?Sized>(
        &self,
        rows: &[Row],
        first_index: usize,
        start_y: Pt,
        is_first_page: bool,
        sink: &mut S,
    ) -> Result<PagePlan, ConfigurationError> {
        let geometry = self.geometry;
        sink.begin_page(is_first_page);

        let mut y = start_y - geometry.top_reserve(is_first_page);
        sink.column_headers(y);
        y -= geometry.header_band_height;

        let mut consumed = 0;
        for (offset, row) in rows.iter().enumerate() {
            let layout = self.layout_row(row);
            if y - layout.height < geometry.margin {
                if consumed == 0 {
                    let available = self.continuation_room(start_y);
                    if !is_first_page || layout.height > available {
                        return Err(ConfigurationError::RowTooTall {
                            row: first_index + offset,
                            required: layout.height,
                            available,
                        });
                    }
                }
                break;
            }

            sink.row(first_index + offset, row, &layout, y);
            y -= layout.height;
            consumed += 1;
        }

        log::trace!(
            "planned page (first: {is_first_page}): {consumed} of {} rows, ending at {y}",
            rows.len()
        );

        Ok(PagePlan {
            rows_consumed: consumed,
            end_y: y,
        })
    }

    /// Height an empty continuation page offers its rows
    fn continuation_room(&self, start_y: Pt) -> Pt {
        let geometry = self.geometry;
        start_y - geometry.top_reserve(false) - geometry.header_band_height - geometry.margin
    }

    /// Dry-runs the whole dataset to find how many pages the report needs,
    /// including a page of its own for the trailing block when it can't follow
    /// the last row.
    pub fn estimate(&self, rows: &[Row], signer_count: usize) -> Result<PaginationPlan, ReportError> {
        if rows.is_empty() {
            return Err(ReportError::EmptyDataset);
        }

        let geometry = self.geometry;
        let trailing = geometry.trailing_block_height(signer_count);
        let own_page_room = geometry.content_top() - geometry.top_reserve(false) - geometry.margin;
        if trailing > own_page_room {
            return Err(ConfigurationError::TrailingBlockTooTall {
                required: trailing,
                available: own_page_room,
            }
            .into());
        }

        let mut per_page_row_counts = Vec::new();
        let mut next = 0;
        let mut end_y = geometry.content_top();
        while next < rows.len() {
            if let Some(cancellation) = self.cancellation {
                cancellation.check()?;
            }

            let plan = self.plan_page(
                &rows[next..],
                next,
                geometry.content_top(),
                per_page_row_counts.is_empty(),
                &mut DryRun,
            )?;
            per_page_row_counts.push(plan.rows_consumed);
            next += plan.rows_consumed;
            end_y = plan.end_y;
        }

        let trailing_block_on_own_page = end_y - geometry.margin < trailing;
        let total_pages = per_page_row_counts.len() + usize::from(trailing_block_on_own_page);

        log::debug!(
            "pagination: {} rows over {total_pages} pages {per_page_row_counts:?}, trailing block on own page: {trailing_block_on_own_page}",
            rows.len()
        );

        Ok(PaginationPlan {
            total_pages,
            per_page_row_counts,
            trailing_block_on_own_page,
            last_row_end_y: end_y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Monospace;

    // one unit per character per point of font size
    const MONO: Monospace = Monospace { advance: 1.0 };

    fn geometry() -> PageGeometry {
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

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::single("A", Pt(100.0), "a"),
            ColumnSpec::single("B", Pt(300.0), "b"),
            ColumnSpec::single("C", Pt(100.0), "c"),
        ]
    }

    fn short_row() -> Row {
        Row::new().with("a", "x").with("b", "y").with("c", "z")
    }

    #[test]
    fn the_tallest_cell_sets_the_row_height() {
        let geometry = geometry();
        let columns = columns();
        let layout = TableLayout::new(&MONO, &columns, &geometry);

        // 296pt inner width holds 37 characters at 8pt; four words of 30 force four lines
        let word = "w".repeat(30);
        let middle = vec![word.as_str(); 4].join(" ");
        let row = Row::new().with("a", "one").with("b", middle).with("c", "two");

        let row_layout = layout.layout_row(&row);
        assert_eq!(row_layout.line_counts, vec![1, 4, 1]);
        assert_eq!(row_layout.height, Pt(4.0 * (8.0 + 2.0) + 2.0 * 4.0));
        assert_eq!(row_layout.cell(1).count(), 4);
    }

    #[test]
    fn short_rows_use_the_minimum_height() {
        let geometry = geometry();
        let columns = columns();
        let layout = TableLayout::new(&MONO, &columns, &geometry);
        assert_eq!(layout.row_height(&short_row()), Pt(20.0));
        assert_eq!(layout.row_height(&Row::new()), Pt(20.0));
    }

    #[test]
    fn rows_that_would_cross_the_margin_move_to_the_next_page() {
        let geometry = geometry();
        let columns = columns();
        let layout = TableLayout::new(&MONO, &columns, &geometry);
        let rows = vec![short_row(); 45];

        let plan = layout
            .plan_page(&rows, 0, geometry.content_top(), true, &mut DryRun)
            .expect("rows fit");
        assert_eq!(plan.rows_consumed, 20);
        assert_eq!(plan.end_y, geometry.margin);
    }

    #[test]
    fn sinks_see_every_placement() {
        #[derive(Default)]
        struct Recorder {
            pages: usize,
            headers: Vec<Pt>,
            rows: Vec<(usize, Pt)>,
        }

        impl DrawSink for Recorder {
            fn begin_page(&mut self, _is_first_page: bool) {
                self.pages += 1;
            }
            fn column_headers(&mut self, top: Pt) {
                self.headers.push(top);
            }
            fn row(&mut self, index: usize, _row: &Row, layout: &RowLayout, top: Pt) {
                assert_eq!(layout.height, Pt(20.0));
                self.rows.push((index, top));
            }
        }

        let geometry = geometry();
        let columns = columns();
        let layout = TableLayout::new(&MONO, &columns, &geometry);
        let rows = vec![short_row(); 2];
        let mut recorder = Recorder::default();
        layout
            .plan_page(&rows, 7, geometry.content_top(), false, &mut recorder)
            .expect("rows fit");

        assert_eq!(recorder.pages, 1);
        assert_eq!(recorder.headers, vec![Pt(430.0)]);
        assert_eq!(recorder.rows, vec![(7, Pt(410.0)), (8, Pt(390.0))]);
    }

    #[test]
    fn a_row_taller_than_a_page_is_a_configuration_error() {
        let geometry = geometry();
        let columns = columns();
        let layout = TableLayout::new(&MONO, &columns, &geometry);

        // 12 characters per line in the 100pt column, so this needs 46 lines
        let rows = vec![Row::new().with("a", "x".repeat(550))];
        let err = layout
            .plan_page(&rows, 0, geometry.content_top(), true, &mut DryRun)
            .expect_err("row can't fit");
        assert_eq!(
            err,
            ConfigurationError::RowTooTall {
                row: 0,
                required: Pt(468.0),
                available: Pt(400.0),
            }
        );
    }

    #[test]
    fn a_tall_first_row_waits_for_the_roomier_second_page() {
        // 310pt of rows on the first page, 400pt on the others
        let geometry = geometry().with_title_band_height(Pt(100.0));
        let columns = columns();
        let layout = TableLayout::new(&MONO, &columns, &geometry);

        // 35 lines make a 358pt row
        let word = "w".repeat(30);
        let tall = Row::new().with("b", vec![word.as_str(); 35].join(" "));
        assert_eq!(layout.row_height(&tall), Pt(358.0));

        let plan = layout
            .estimate(&[tall.clone(), short_row()], 0)
            .expect("the tall row fits a continuation page");
        assert_eq!(plan.per_page_row_counts, vec![0, 2]);

        let plan = layout
            .estimate(&[short_row(), tall], 0)
            .expect("the tall row fits a continuation page");
        assert_eq!(plan.per_page_row_counts, vec![1, 1]);

        let taller = Row::new().with("b", vec![word.as_str(); 40].join(" "));
        let err = layout.estimate(&[taller], 0).expect_err("408pt never fits");
        assert!(matches!(
            err,
            ReportError::Configuration(ConfigurationError::RowTooTall { row: 0, available, .. })
                if available == Pt(400.0)
        ));
    }

    #[test]
    fn forty_five_rows_fill_three_pages() {
        let geometry = geometry();
        let columns = columns();
        let layout = TableLayout::new(&MONO, &columns, &geometry);
        let rows = vec![short_row(); 45];

        let plan = layout.estimate(&rows, 2).expect("plan");
        assert_eq!(plan.per_page_row_counts, vec![20, 20, 5]);
        assert!(!plan.trailing_block_on_own_page);
        assert_eq!(plan.total_pages, 3);
        assert_eq!(plan.content_pages(), 3);
    }

    #[test]
    fn a_full_last_page_pushes_the_trailing_block_over() {
        let geometry = geometry();
        let columns = columns();
        let layout = TableLayout::new(&MONO, &columns, &geometry);
        let rows = vec![short_row(); 40];

        let plan = layout.estimate(&rows, 1).expect("plan");
        assert_eq!(plan.per_page_row_counts, vec![20, 20]);
        assert!(plan.trailing_block_on_own_page);
        assert_eq!(plan.total_pages, 3);
    }

    #[test]
    fn empty_datasets_are_rejected() {
        let geometry = geometry();
        let columns = columns();
        let layout = TableLayout::new(&MONO, &columns, &geometry);
        assert!(matches!(layout.estimate(&[], 0), Err(ReportError::EmptyDataset)));
    }

    #[test]
    fn cancelled_estimates_stop() {
        let geometry = geometry();
        let columns = columns();
        let cancellation = Cancellation::new();
        cancellation.cancel();
        let layout = TableLayout::new(&MONO, &columns, &geometry).with_cancellation(&cancellation);
        let rows = vec![short_row(); 3];
        assert!(matches!(layout.estimate(&rows, 0), Err(ReportError::Cancelled)));
    }

    #[test]
    fn header_labels_must_fit_the_header_band() {
        let geometry = geometry();

        // 12 characters per line; two 8pt lines need 18pt of the 20pt band
        let columns = vec![ColumnSpec::single("Quantity on hand", Pt(100.0), "a")];
        let layout = TableLayout::new(&MONO, &columns, &geometry);
        assert_eq!(layout.header_lines(&columns[0]).len(), 2);
        assert!(layout.validate(&[short_row()]).is_ok());

        let columns = vec![ColumnSpec::single("Quantity on hand per site", Pt(100.0), "a")];
        let layout = TableLayout::new(&MONO, &columns, &geometry);
        let err = layout.validate(&[short_row()]).expect_err("three lines overflow");
        assert_eq!(
            err,
            ConfigurationError::HeaderTooTall {
                column: "Quantity on hand per site".into(),
                lines: 3,
                required: Pt(28.0),
                available: Pt(20.0),
            }
        );
    }

    #[test]
    fn columns_narrower_than_a_glyph_are_rejected_up_front() {
        let geometry = geometry();
        let columns = vec![ColumnSpec::single("A", Pt(10.0), "a")];
        let layout = TableLayout::new(&MONO, &columns, &geometry);

        // inner width is 6pt, every glyph is 8pt wide
        let err = layout.validate(&[short_row()]).expect_err("too narrow");
        assert!(matches!(
            err,
            ConfigurationError::ColumnTooNarrow { character: 'A', .. }
        ));
    }

    #[test]
    fn columns_without_room_inside_their_padding_are_rejected() {
        let geometry = geometry();
        let columns = vec![ColumnSpec::single("A", Pt(4.0), "a")];
        let layout = TableLayout::new(&MONO, &columns, &geometry);
        assert!(matches!(
            layout.validate(&[]),
            Err(ConfigurationError::ColumnWidth { .. })
        ));
        let none: Vec<ColumnSpec> = Vec::new();
        let layout = TableLayout::new(&MONO, &none, &geometry);
        assert_eq!(layout.validate(&[]), Err(ConfigurationError::NoColumns));
    }
}
