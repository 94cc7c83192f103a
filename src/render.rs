//! Draws a paginated report: a first-page title band, a repeated column header
//! band, wrapped rows, "page X of N" footers and a trailing summary and signer
//! block.
//!
//! Rendering is all-or-nothing. The page count is settled by a dry run before
//! the first page is drawn, and any failure (including cancellation) returns an
//! error instead of a partial document.

use crate::assets::AssetStore;
use crate::cancel::Cancellation;
use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::error::{AssetError, ReportError};
use crate::format::Formatter;
use crate::image::Image;
use crate::info::Info;
use crate::layout::{
    ColumnSpec, DrawSink, FontStyle, PageGeometry, PaginationPlan, Row, RowLayout,
    TableLayout, TextMeasurer,
};
use crate::page::{ImageLayout, LineLayout, Page, RectLayout, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::units::Pt;
use chrono::NaiveDate;
use id_arena::Id;

/// Baseline offset below the top of a line box, as a fraction of the font size
const BASELINE_DROP: f32 = 0.8;
/// Width of separators and box outlines
const RULE_WIDTH: Pt = Pt(0.5);
/// Title lines drawn on the first page
const MAX_TITLE_LINES: usize = 4;

/// Someone who signs off on the report
#[derive(Clone, Debug, PartialEq)]
pub struct Signer {
    /// What the signature attests to, e.g. "Reviewed by"
    pub concept: String,
    pub name: String,
    /// The signer's role
    pub title: String,
}

impl Signer {
    pub fn new<C: ToString, N: ToString, T: ToString>(concept: C, name: N, title: T) -> Signer {
        Signer {
            concept: concept.to_string(),
            name: name.to_string(),
            title: title.to_string(),
        }
    }
}

/// The centred lines at the top of the first page; only the first four are drawn
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TitleBlock {
    pub lines: Vec<String>,
}

impl TitleBlock {
    pub fn new<S: ToString>(title: S) -> TitleBlock {
        TitleBlock {
            lines: vec![title.to_string()],
        }
    }

    /// Add a line above the existing ones, e.g. an organization name
    pub fn with_heading<S: ToString>(mut self, heading: S) -> TitleBlock {
        self.lines.insert(0, heading.to_string());
        self
    }

    /// The main title: the last line
    pub fn title(&self) -> &str {
        self.lines.last().map(String::as_str).unwrap_or_default()
    }
}

impl From<&str> for TitleBlock {
    fn from(title: &str) -> Self {
        TitleBlock::new(title)
    }
}

/// Asset identifiers of the two first-page logos
#[derive(Clone, Debug, PartialEq)]
pub struct Logos {
    pub left: String,
    pub right: String,
}

impl Logos {
    pub fn new<L: ToString, R: ToString>(left: L, right: R) -> Logos {
        Logos {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

/// The fixed wording printed on a report
#[derive(Clone, Debug, PartialEq)]
pub struct Labels {
    pub prepared_by: String,
    pub position: String,
    pub date: String,
    pub page: String,
    pub of: String,
    /// Sits between the row count and the formatted total in the summary box
    pub items_with_total: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            prepared_by: "Prepared by".into(),
            position: "Position".into(),
            date: "Date".into(),
            page: "Page".into(),
            of: "of".into(),
            items_with_total: "items with total value".into(),
        }
    }
}

impl Labels {
    pub fn footer(&self, page_number: usize, total: usize) -> String {
        format!("{} {page_number} {} {total}", self.page, self.of)
    }

    pub fn summary(&self, count: usize, total: &str) -> String {
        format!("{count} {} {total}", self.items_with_total)
    }
}

/// Everything one report is made from
#[derive(Clone, Debug)]
pub struct Report<'a> {
    pub title: TitleBlock,
    pub columns: &'a [ColumnSpec],
    pub rows: &'a [Row],
    /// Signers drawn in the signature band, left to right
    pub signers: &'a [Signer],
    /// Whose name and role appear in the first-page metadata block
    pub metadata_signer: Option<&'a Signer>,
    /// The date printed in the metadata block
    pub date: NaiveDate,
    pub logos: Logos,
    /// Field summed for the summary box; without one the total is zero
    pub total_key: Option<String>,
}

impl<'a> Report<'a> {
    pub fn new<T: Into<TitleBlock>>(
        title: T,
        columns: &'a [ColumnSpec],
        rows: &'a [Row],
        date: NaiveDate,
        logos: Logos,
    ) -> Report<'a> {
        Report {
            title: title.into(),
            columns,
            rows,
            signers: &[],
            metadata_signer: None,
            date,
            logos,
            total_key: None,
        }
    }

    pub fn with_signers(mut self, signers: &'a [Signer]) -> Self {
        self.signers = signers;
        self
    }

    pub fn with_metadata_signer(mut self, signer: &'a Signer) -> Self {
        self.metadata_signer = Some(signer);
        self
    }

    pub fn with_total_key<S: ToString>(mut self, key: S) -> Self {
        self.total_key = Some(key.to_string());
        self
    }

    /// Sum of the numeric values of the total field
    pub fn total(&self) -> f64 {
        let Some(key) = &self.total_key else {
            return 0.0;
        };
        self.rows
            .iter()
            .filter_map(|row| row.get(key))
            .filter_map(|value| value.as_number())
            .sum()
    }
}

/// Turns a [Report] into a [Document]. A renderer holds no per-render state,
/// so one instance can serve any number of renders.
pub struct DocumentRenderer<'a> {
    measurer: &'a dyn TextMeasurer,
    formatter: &'a dyn Formatter,
    assets: &'a dyn AssetStore,
    geometry: PageGeometry,
    labels: Labels,
    cancellation: Option<Cancellation>,
}

impl<'a> DocumentRenderer<'a> {
    pub fn new(
        measurer: &'a dyn TextMeasurer,
        formatter: &'a dyn Formatter,
        assets: &'a dyn AssetStore,
    ) -> DocumentRenderer<'a> {
        DocumentRenderer {
            measurer,
            formatter,
            assets,
            geometry: PageGeometry::default(),
            labels: Labels::default(),
            cancellation: None,
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Check `cancellation` before the dry run and between pages
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    fn check_cancelled(&self) -> Result<(), ReportError> {
        match &self.cancellation {
            Some(cancellation) => cancellation.check(),
            None => Ok(()),
        }
    }

    /// Computes the pagination plan for `report` without drawing anything
    pub fn plan(&self, report: &Report) -> Result<PaginationPlan, ReportError> {
        self.geometry.validate()?;
        let layout = self.table_layout(report.columns);
        layout.validate(report.rows)?;
        layout.estimate(report.rows, report.signers.len())
    }

    fn table_layout<'s>(&'s self, columns: &'s [ColumnSpec]) -> TableLayout<'s, dyn TextMeasurer + 'a> {
        let layout = TableLayout::new(self.measurer, columns, &self.geometry);
        match &self.cancellation {
            Some(cancellation) => layout.with_cancellation(cancellation),
            None => layout,
        }
    }

    pub fn render(&self, report: &Report) -> Result<Document, ReportError> {
        self.check_cancelled()?;
        if report.rows.is_empty() {
            return Err(ReportError::EmptyDataset);
        }
        self.geometry.validate()?;

        let layout = self.table_layout(report.columns);
        layout.validate(report.rows)?;

        let summary = self.labels.summary(
            report.rows.len(),
            &self.formatter.currency(report.total()),
        );
        let metadata = self.metadata_lines(report);
        self.preflight(report, &layout, &summary, &metadata)?;

        let left_logo = self.assets.load_image(&report.logos.left)?;
        let right_logo = self.assets.load_image(&report.logos.right)?;
        log::debug!(
            "loaded logos `{}` ({}x{}) and `{}` ({}x{})",
            report.logos.left,
            left_logo.width,
            left_logo.height,
            report.logos.right,
            right_logo.width,
            right_logo.height
        );

        let plan = layout.estimate(report.rows, report.signers.len())?;

        let mut document = Document::default();
        document.set_info(Info::new().title(report.title.title()).subject(&summary));
        let logos = [
            (document.add_image(left_logo.clone()), left_logo),
            (document.add_image(right_logo.clone()), right_logo),
        ];

        let painter = Painter::new(self, &layout, plan.total_pages);
        let geometry = &self.geometry;
        let size = (geometry.page_width, geometry.page_height);

        let mut next = 0;
        let mut pages = Vec::with_capacity(plan.total_pages);
        for (index, &planned) in plan.per_page_row_counts.iter().enumerate() {
            self.check_cancelled()?;

            let is_first_page = index == 0;
            let mut page = Page::new(size, geometry.margin, index, plan.total_pages);
            if is_first_page {
                painter.title_band(&mut page, &report.title, &metadata, &logos);
            }

            let mut sink = PageSink {
                painter: &painter,
                page: &mut page,
            };
            let drawn = layout.plan_page(
                &report.rows[next..],
                next,
                geometry.content_top(),
                is_first_page,
                &mut sink,
            )?;
            if drawn.rows_consumed != planned {
                return Err(ReportError::PlanMismatch {
                    page: index,
                    planned,
                    drawn: drawn.rows_consumed,
                });
            }
            next += drawn.rows_consumed;

            painter.rule(&mut page, drawn.end_y);
            painter.footer(&mut page);

            let is_last_content_page = index + 1 == plan.content_pages();
            if is_last_content_page && !plan.trailing_block_on_own_page {
                log::debug!("trailing block follows the last row on page {}", index + 1);
                painter.trailing_block(&mut page, drawn.end_y, &summary, report.signers);
            }
            pages.push(page);
        }

        if plan.trailing_block_on_own_page {
            self.check_cancelled()?;
            log::debug!("trailing block moves to page {}", plan.total_pages);

            let mut page = Page::new(size, geometry.margin, plan.total_pages - 1, plan.total_pages);
            let top = geometry.content_top() - geometry.top_reserve(false);
            painter.trailing_block(&mut page, top, &summary, report.signers);
            painter.footer(&mut page);
            pages.push(page);
        }

        for page in pages {
            document.add_page(page);
        }
        Ok(document)
    }

    fn metadata_lines(&self, report: &Report) -> Vec<String> {
        let labels = &self.labels;
        let mut lines = Vec::with_capacity(3);
        if let Some(signer) = report.metadata_signer {
            lines.push(format!("{}: {}", labels.prepared_by, signer.name));
            lines.push(format!("{}: {}", labels.position, signer.title));
        }
        lines.push(format!(
            "{}: {}",
            labels.date,
            self.formatter.long_date(report.date)
        ));
        lines
    }

    /// Checks that every string the render will draw can be drawn, before
    /// any layout happens
    fn preflight(
        &self,
        report: &Report,
        layout: &TableLayout<'_, dyn TextMeasurer + 'a>,
        summary: &str,
        metadata: &[String],
    ) -> Result<(), AssetError> {
        let check = |text: &str, style: FontStyle| -> Result<(), AssetError> {
            match text
                .chars()
                .find(|&ch| ch != ' ' && !self.measurer.supports(ch, style))
            {
                Some(character) => Err(AssetError::MissingGlyph { character, style }),
                None => Ok(()),
            }
        };

        for line in report.title.lines.iter().take(MAX_TITLE_LINES) {
            check(line, FontStyle::Bold)?;
        }
        for column in layout.columns() {
            check(&column.header, FontStyle::Bold)?;
            for row in report.rows {
                check(&column.resolve(row), FontStyle::Regular)?;
            }
        }
        for line in metadata {
            check(line, FontStyle::Regular)?;
        }
        for signer in report.signers {
            check(&signer.concept, FontStyle::Bold)?;
            check(&signer.name, FontStyle::Regular)?;
            check(&signer.title, FontStyle::Regular)?;
        }
        check(summary, FontStyle::Bold)?;
        check(&self.labels.footer(0, 0), FontStyle::Regular)?;
        check("123456789", FontStyle::Regular)
    }
}

/// Forwards the planner's placements to a page being drawn
struct PageSink<'s, 'r> {
    painter: &'s Painter<'r>,
    page: &'s mut Page,
}

impl DrawSink for PageSink<'_, '_> {
    fn column_headers(&mut self, top: Pt) {
        self.painter.column_headers(self.page, top);
    }

    fn row(&mut self, _index: usize, _row: &Row, layout: &RowLayout, top: Pt) {
        self.painter.row(self.page, layout, top);
    }
}

/// Drawing routines for one render
struct Painter<'r> {
    measurer: &'r dyn TextMeasurer,
    geometry: &'r PageGeometry,
    labels: &'r Labels,
    columns: &'r [ColumnSpec],
    header_lines: Vec<Vec<String>>,
    column_x: Vec<Pt>,
    table_x: Pt,
    table_width: Pt,
    total_pages: usize,
}

impl<'r> Painter<'r> {
    fn new<M: TextMeasurer + ?Sized>(
        renderer: &'r DocumentRenderer<'_>,
        layout: &TableLayout<'r, M>,
        total_pages: usize,
    ) -> Painter<'r> {
        let geometry = &renderer.geometry;
        let columns = layout.columns();
        let table_width = layout.table_width();
        let printable = geometry.page_width - geometry.margin * 2.0;
        let table_x = if table_width <= printable {
            geometry.margin + (printable - table_width) / 2.0
        } else {
            log::warn!("table is {table_width} wide but the page only has {printable} between its margins");
            geometry.margin
        };

        let mut column_x = Vec::with_capacity(columns.len());
        let mut x = table_x;
        for column in columns {
            column_x.push(x);
            x += column.width;
        }

        Painter {
            measurer: renderer.measurer,
            geometry,
            labels: &renderer.labels,
            columns,
            header_lines: columns.iter().map(|c| layout.header_lines(c)).collect(),
            column_x,
            table_x,
            table_width,
            total_pages,
        }
    }

    fn text(
        &self,
        page: &mut Page,
        text: &str,
        style: FontStyle,
        size: Pt,
        colour: Colour,
        coords: (Pt, Pt),
    ) {
        if text.is_empty() {
            return;
        }
        page.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont { style, size },
            colour,
            coords,
        });
    }

    /// Text centred horizontally on `center_x`
    fn centered_text(
        &self,
        page: &mut Page,
        text: &str,
        style: FontStyle,
        size: Pt,
        center_x: Pt,
        baseline: Pt,
    ) {
        let width = self.measurer.measure_width(text, style, size);
        self.text(
            page,
            text,
            style,
            size,
            colours::BLACK,
            (center_x - width / 2.0, baseline),
        );
    }

    /// Lines centred in a column and, as a block, vertically centred in a
    /// band given as its top edge and height
    fn centered_block<'t, I: ExactSizeIterator<Item = &'t str>>(
        &self,
        page: &mut Page,
        lines: I,
        (style, size): (FontStyle, Pt),
        column: usize,
        (top, height): (Pt, Pt),
    ) {
        let count = lines.len();
        if count == 0 {
            return;
        }
        let advance = size + self.geometry.line_spacing;
        let block = advance * count as f32 - self.geometry.line_spacing;
        let block_top = top - (height - block) / 2.0;
        let center_x = self.column_x[column] + self.columns[column].width / 2.0;

        for (i, line) in lines.enumerate() {
            let baseline = block_top - advance * i as f32 - size * BASELINE_DROP;
            self.centered_text(page, line, style, size, center_x, baseline);
        }
    }

    /// A full-width horizontal rule across the table
    fn rule(&self, page: &mut Page, y: Pt) {
        page.add_line(LineLayout {
            from: (self.table_x, y),
            to: (self.table_x + self.table_width, y),
            width: RULE_WIDTH,
            colour: colours::RULE,
        });
    }

    fn title_band(
        &self,
        page: &mut Page,
        title: &TitleBlock,
        metadata: &[String],
        logos: &[(Id<Image>, Image); 2],
    ) {
        let g = self.geometry;
        let top = g.content_top();

        let [(left_id, left), (right_id, right)] = logos;
        let left_width = g.logo_height * left.aspect_ratio();
        let right_width = g.logo_height * right.aspect_ratio();
        page.add_image(ImageLayout {
            image_id: *left_id,
            position: Rect::from_xywh(g.margin, top - g.logo_height, left_width, g.logo_height),
        });
        page.add_image(ImageLayout {
            image_id: *right_id,
            position: Rect::from_xywh(
                g.page_width - g.margin - right_width,
                top - g.logo_height,
                right_width,
                g.logo_height,
            ),
        });

        let title_advance = g.header_font_size + Pt(4.0);
        let title_lines = title.lines.len().min(MAX_TITLE_LINES);
        for (i, line) in title.lines.iter().take(MAX_TITLE_LINES).enumerate() {
            let baseline = top - g.header_font_size * BASELINE_DROP - title_advance * i as f32;
            self.centered_text(
                page,
                line,
                FontStyle::Bold,
                g.header_font_size,
                g.page_width / 2.0,
                baseline,
            );
        }

        let metadata_top = top - g.logo_height.max(title_advance * title_lines as f32) - Pt(8.0);
        let metadata_advance = g.font_size + g.line_spacing + Pt(2.0);
        for (i, line) in metadata.iter().enumerate() {
            let baseline = metadata_top - g.font_size * BASELINE_DROP - metadata_advance * i as f32;
            self.text(
                page,
                line,
                FontStyle::Regular,
                g.font_size,
                colours::BLACK,
                (g.margin, baseline),
            );
        }
    }

    fn column_headers(&self, page: &mut Page, top: Pt) {
        let g = self.geometry;
        page.add_rect(RectLayout {
            rect: Rect::from_xywh(
                self.table_x,
                top - g.header_band_height,
                self.table_width,
                g.header_band_height,
            ),
            fill: Some(colours::HEADER_SHADE),
            stroke: Some((colours::RULE, RULE_WIDTH)),
        });

        for (column, lines) in self.header_lines.iter().enumerate() {
            self.centered_block(
                page,
                lines.iter().map(String::as_str),
                (FontStyle::Bold, g.header_font_size),
                column,
                (top, g.header_band_height),
            );
        }
    }

    fn row(&self, page: &mut Page, layout: &RowLayout, top: Pt) {
        self.rule(page, top);
        for column in 0..self.columns.len() {
            let lines: Vec<&str> = layout.cell(column).map(|line| line.text.as_str()).collect();
            self.centered_block(
                page,
                lines.into_iter(),
                (FontStyle::Regular, self.geometry.font_size),
                column,
                (top, layout.height),
            );
        }
    }

    fn footer(&self, page: &mut Page) {
        let g = self.geometry;
        let text = self.labels.footer(page.index + 1, self.total_pages);
        let width = self.measurer.measure_width(&text, FontStyle::Regular, g.font_size);
        let baseline = g.margin / 2.0 - g.font_size * 0.4;
        self.text(
            page,
            &text,
            FontStyle::Regular,
            g.font_size,
            colours::MUTED,
            (g.page_width - g.margin - width, baseline),
        );
    }

    /// The summary box and signer band, hanging below `top`
    fn trailing_block(&self, page: &mut Page, top: Pt, summary: &str, signers: &[Signer]) {
        let g = self.geometry;
        let table_center = self.table_x + self.table_width / 2.0;

        let summary_top = top - g.trailing_gap;
        page.add_rect(RectLayout {
            rect: Rect::from_xywh(
                self.table_x,
                summary_top - g.summary_height,
                self.table_width,
                g.summary_height,
            ),
            fill: Some(colours::SUMMARY_SHADE),
            stroke: Some((colours::RULE, RULE_WIDTH)),
        });
        let baseline = summary_top - (g.summary_height + g.header_font_size) / 2.0
            + g.header_font_size * (1.0 - BASELINE_DROP);
        self.centered_text(
            page,
            summary,
            FontStyle::Bold,
            g.header_font_size,
            table_center,
            baseline,
        );

        if signers.is_empty() {
            return;
        }

        let band_top = summary_top - g.summary_height - g.trailing_gap;
        let box_width = self.table_width / signers.len() as f32;
        let signature_y = band_top - g.signer_band_height * 0.6;
        let text_advance = g.font_size + g.line_spacing;

        for (i, signer) in signers.iter().enumerate() {
            let x = self.table_x + box_width * i as f32;
            let center = x + box_width / 2.0;
            page.add_rect(RectLayout {
                rect: Rect::from_xywh(
                    x,
                    band_top - g.signer_band_height,
                    box_width,
                    g.signer_band_height,
                ),
                fill: None,
                stroke: Some((colours::RULE, RULE_WIDTH)),
            });

            self.centered_text(
                page,
                &signer.concept,
                FontStyle::Bold,
                g.font_size,
                center,
                band_top - g.vertical_cell_padding - g.font_size * BASELINE_DROP,
            );
            page.add_line(LineLayout {
                from: (x + box_width * 0.15, signature_y),
                to: (x + box_width * 0.85, signature_y),
                width: RULE_WIDTH,
                colour: colours::BLACK,
            });
            let name_baseline = signature_y - g.line_spacing - g.font_size * BASELINE_DROP;
            self.centered_text(
                page,
                &signer.name,
                FontStyle::Regular,
                g.font_size,
                center,
                name_baseline,
            );
            self.centered_text(
                page,
                &signer.title,
                FontStyle::Regular,
                g.font_size,
                center,
                name_baseline - text_advance,
            );
        }
    }
}
