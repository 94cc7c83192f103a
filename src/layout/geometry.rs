use crate::error::ConfigurationError;
use crate::pagesize::{PageSize, REPORT_LANDSCAPE};
use crate::units::Pt;

/// Fixed page geometry for a report. Every value is in points; none of them
/// change during a render.
#[derive(Clone, Debug, PartialEq)]
pub struct PageGeometry {
    pub page_width: Pt,
    pub page_height: Pt,
    /// Margin on all four sides of the page
    pub margin: Pt,
    /// Height of the repeated column header band
    pub header_band_height: Pt,
    pub font_size: Pt,
    pub header_font_size: Pt,
    pub min_row_height: Pt,
    /// Space above and below the text of a row
    pub vertical_cell_padding: Pt,
    /// Space left and right of the text of a cell
    pub cell_padding: Pt,
    /// Extra space between wrapped lines
    pub line_spacing: Pt,
    /// Height reserved on the first page for logos, title lines and metadata
    pub title_band_height: Pt,
    /// Space reserved above the table on every page after the first
    pub continuation_top_gap: Pt,
    /// Height the two logos are scaled to
    pub logo_height: Pt,
    /// Height of the summary box below the last row
    pub summary_height: Pt,
    /// Height of the signer band; only reserved when there are signers
    pub signer_band_height: Pt,
    /// Space between the last row and the summary box, and between the
    /// summary box and the signer band
    pub trailing_gap: Pt,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            page_width: REPORT_LANDSCAPE.0,
            page_height: REPORT_LANDSCAPE.1,
            margin: Pt(30.0),
            header_band_height: Pt(20.0),
            font_size: Pt(8.0),
            header_font_size: Pt(9.0),
            min_row_height: Pt(18.0),
            vertical_cell_padding: Pt(4.0),
            cell_padding: Pt(4.0),
            line_spacing: Pt(2.0),
            title_band_height: Pt(130.0),
            continuation_top_gap: Pt(10.0),
            logo_height: Pt(50.0),
            summary_height: Pt(20.0),
            signer_band_height: Pt(80.0),
            trailing_gap: Pt(10.0),
        }
    }
}

impl PageGeometry {
    /// Start from the defaults on a page of the given size
    pub fn for_page(size: PageSize) -> PageGeometry {
        PageGeometry {
            page_width: size.0,
            page_height: size.1,
            ..Default::default()
        }
    }

    pub fn with_margin(mut self, margin: Pt) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_header_band_height(mut self, height: Pt) -> Self {
        self.header_band_height = height;
        self
    }

    pub fn with_font_sizes(mut self, body: Pt, header: Pt) -> Self {
        self.font_size = body;
        self.header_font_size = header;
        self
    }

    pub fn with_min_row_height(mut self, height: Pt) -> Self {
        self.min_row_height = height;
        self
    }

    pub fn with_cell_padding(mut self, horizontal: Pt, vertical: Pt) -> Self {
        self.cell_padding = horizontal;
        self.vertical_cell_padding = vertical;
        self
    }

    pub fn with_line_spacing(mut self, spacing: Pt) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn with_title_band_height(mut self, height: Pt) -> Self {
        self.title_band_height = height;
        self
    }

    pub fn with_continuation_top_gap(mut self, gap: Pt) -> Self {
        self.continuation_top_gap = gap;
        self
    }

    pub fn with_trailing_block(mut self, summary_height: Pt, signer_band_height: Pt, gap: Pt) -> Self {
        self.summary_height = summary_height;
        self.signer_band_height = signer_band_height;
        self.trailing_gap = gap;
        self
    }

    /// Vertical advance of one wrapped line
    pub fn line_height(&self) -> Pt {
        self.font_size + self.line_spacing
    }

    /// The y coordinate where content starts on every page
    pub fn content_top(&self) -> Pt {
        self.page_height - self.margin
    }

    /// Space taken above the column headers on a page
    pub fn top_reserve(&self, is_first_page: bool) -> Pt {
        if is_first_page {
            self.title_band_height
        } else {
            self.continuation_top_gap
        }
    }

    /// Height of the summary box plus, when there are signers, the signer band
    pub fn trailing_block_height(&self, signer_count: usize) -> Pt {
        let signers = if signer_count == 0 {
            Pt(0.0)
        } else {
            self.trailing_gap + self.signer_band_height
        };
        self.trailing_gap + self.summary_height + signers
    }

    /// Checks that the geometry can lay out at least a header band on any page
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let positive = [
            ("page width", self.page_width),
            ("page height", self.page_height),
            ("margin", self.margin),
            ("header band height", self.header_band_height),
            ("font size", self.font_size),
            ("header font size", self.header_font_size),
            ("minimum row height", self.min_row_height),
            ("vertical cell padding", self.vertical_cell_padding),
            ("cell padding", self.cell_padding),
            ("summary height", self.summary_height),
            ("signer band height", self.signer_band_height),
        ];
        for (name, value) in positive {
            if !value.0.is_finite() || value.0 <= 0.0 {
                return Err(ConfigurationError::InvalidGeometry(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("line spacing", self.line_spacing),
            ("title band height", self.title_band_height),
            ("continuation top gap", self.continuation_top_gap),
            ("logo height", self.logo_height),
            ("trailing gap", self.trailing_gap),
        ];
        for (name, value) in non_negative {
            if !value.0.is_finite() || value.0 < 0.0 {
                return Err(ConfigurationError::InvalidGeometry(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.header_band_height + self.margin >= self.page_height {
            return Err(ConfigurationError::InvalidGeometry(format!(
                "header band ({}) and margin ({}) leave no room on a page {} tall",
                self.header_band_height, self.margin, self.page_height
            )));
        }

        let first_page_table_top =
            self.content_top() - self.top_reserve(true) - self.header_band_height;
        if first_page_table_top <= self.margin {
            return Err(ConfigurationError::InvalidGeometry(format!(
                "the title band ({}) leaves no room for rows on the first page",
                self.title_band_height
            )));
        }

        if 2.0 * self.margin >= self.page_width {
            return Err(ConfigurationError::InvalidGeometry(format!(
                "margins ({}) are wider than the page ({})",
                self.margin, self.page_width
            )));
        }

        Ok(())
    }
}
