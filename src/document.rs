use crate::{
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    typeface::FontFamily,
    ReportError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::{io::Write, path::Path};

#[derive(Default)]
/// A finished report: an ordered list of fixed-size pages plus the images they
/// draw. Write it out with [Document::write] or [Document::save].
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub images: Arena<Image>,
}

impl Document {
    /// Title, author and subject for the PDF info dictionary; without them no
    /// dictionary is written
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Add an image to the document. Images are stored "globally" within the
    /// document, such that any page can draw them through the returned id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Write the entire document to the writer, with text set in `fonts`. The whole PDF is
    /// assembled in memory first.
    pub fn write<W: Write>(&self, fonts: &FontFamily, mut w: W) -> Result<(), ReportError> {
        let bytes = self.to_bytes(fonts);
        w.write_all(&bytes)?;
        Ok(())
    }

    /// Write the document to the file at `path`, creating or truncating it
    pub fn save<P: AsRef<Path>>(&self, fonts: &FontFamily, path: P) -> Result<(), ReportError> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write(fonts, std::io::BufWriter::new(file))?;
        log::debug!("wrote {} pages to {}", self.pages.len(), path.as_ref().display());
        Ok(())
    }

    /// Serialize the document into PDF bytes
    pub fn to_bytes(&self, fonts: &FontFamily) -> Vec<u8> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (i, face) in fonts.faces().enumerate() {
            face.write(&mut refs, i, &mut writer);
        }

        for (id, image) in self.images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, page) in self.pages.iter().enumerate() {
            page.write(&mut refs, page_index, fonts, &self.images, &mut writer);
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        writer.finish()
    }
}
