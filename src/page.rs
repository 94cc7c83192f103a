use crate::colour::Colour;
use crate::image::Image;
use crate::layout::FontStyle;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::typeface::FontFamily;
use crate::units::Pt;
use id_arena::{Arena, Id};
use pdf_writer::{Content, Finish, Name, Pdf, Str};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub style: FontStyle,
    pub size: Pt,
}

/// A run of text, positioned by its baseline origin
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// A straight stroked line
#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub width: Pt,
    pub colour: Colour,
}

/// A rectangle, filled and/or outlined
#[derive(Clone, PartialEq, Debug)]
pub struct RectLayout {
    pub rect: Rect,
    pub fill: Option<Colour>,
    /// Outline colour and line width
    pub stroke: Option<(Colour, Pt)>,
}

/// An image from the document's image store, stretched over `position`
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// One draw operation on a page
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Line(LineLayout),
    Rect(RectLayout),
    Image(ImageLayout),
}

/// A fixed-size canvas of absolutely positioned draw operations
#[derive(Clone, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// 0-based position of the page in its document
    pub index: usize,
    /// Number of pages in the document the page was laid out for
    pub total: usize,
    /// Draw operations, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margin: Pt, index: usize, total: usize) -> Page {
        Page {
            media_box: Rect::from_xywh(Pt(0.0), Pt(0.0), size.0, size.1),
            content_box: Rect {
                x1: margin,
                y1: margin,
                x2: size.0 - margin,
                y2: size.1 - margin,
            },
            index,
            total,
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_line(&mut self, line: LineLayout) {
        self.contents.push(PageContents::Line(line));
    }

    pub fn add_rect(&mut self, rect: RectLayout) {
        self.contents.push(PageContents::Rect(rect));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// All text on the page, in drawing order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Text(span) => Some(span),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Image(image) => Some(image),
            _ => None,
        })
    }

    /// Renders the page's draw operations into a content stream
    pub(crate) fn render(&self, fonts: &FontFamily) -> Vec<u8> {
        let mut content = Content::new();

        for item in self.contents.iter() {
            content.save_state();
            match item {
                PageContents::Text(span) => {
                    let font_name = format!("F{}", fonts.resource_index(span.font.style));
                    let encoded = fonts.face(span.font.style).encode(&span.text);
                    span.colour.apply_fill(&mut content);
                    content
                        .begin_text()
                        .set_font(Name(font_name.as_bytes()), *span.font.size)
                        .next_line(*span.coords.0, *span.coords.1)
                        .show(Str(&encoded))
                        .end_text();
                }
                PageContents::Line(line) => {
                    line.colour.apply_stroke(&mut content);
                    content
                        .set_line_width(*line.width)
                        .move_to(*line.from.0, *line.from.1)
                        .line_to(*line.to.0, *line.to.1)
                        .stroke();
                }
                PageContents::Rect(rect) => {
                    let r = &rect.rect;
                    content.rect(*r.x1, *r.y1, *r.width(), *r.height());
                    match (&rect.fill, &rect.stroke) {
                        (Some(fill), Some((stroke, width))) => {
                            fill.apply_fill(&mut content);
                            stroke.apply_stroke(&mut content);
                            content.set_line_width(**width).fill_nonzero_and_stroke();
                        }
                        (Some(fill), None) => {
                            fill.apply_fill(&mut content);
                            content.fill_nonzero();
                        }
                        (None, Some((stroke, width))) => {
                            stroke.apply_stroke(&mut content);
                            content.set_line_width(**width).stroke();
                        }
                        (None, None) => {
                            content.end_path();
                        }
                    }
                }
                PageContents::Image(image) => {
                    let p = &image.position;
                    let name = format!("I{}", image.image_id.index());
                    content
                        .transform([*p.width(), 0.0, 0.0, *p.height(), *p.x1, *p.y1])
                        .x_object(Name(name.as_bytes()));
                }
            }
            content.restore_state();
        }

        content.finish()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &FontFamily,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) {
        let id = refs.get_or_gen(RefType::Page(page_index));
        let parent = refs.get_or_gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let font_refs: Vec<(String, pdf_writer::Ref)> = (0..fonts.faces().count())
            .map(|i| (format!("F{i}"), refs.get_or_gen(RefType::Font(i))))
            .collect();
        let image_refs: Vec<(String, pdf_writer::Ref)> = images
            .iter()
            .map(|(i, _)| {
                (
                    format!("I{}", i.index()),
                    refs.get_or_gen(RefType::Image(i.index())),
                )
            })
            .collect();

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (name, font_ref) in font_refs.iter() {
            resource_fonts.pair(Name(name.as_bytes()), *font_ref);
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (name, image_ref) in image_refs.iter() {
            resource_xobjects.pair(Name(name.as_bytes()), *image_ref);
        }
        resource_xobjects.finish();
        resources.finish();
        page.finish();

        let rendered = self.render(fonts);
        writer.stream(content_id, &rendered);
    }
}
