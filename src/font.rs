use crate::{
    error::AssetError,
    refs::{ObjectReferences, RefType},
    Pt,
};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;
use std::path::Path;

/// A parsed TrueType or OpenType font, embedded in its entirety in the
/// generated PDF. Use an embedded font when report text goes beyond what the
/// standard PDF fonts can encode.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Parse a font from raw bytes
    pub fn load(bytes: Vec<u8>) -> Result<Font, AssetError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Font, AssetError> {
        Font::load(std::fs::read(path)?)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// The full name of the font, falling back to its family name
    pub fn name(&self) -> String {
        self.name_record(owned_ttf_parser::name_id::FULL_NAME)
            .or_else(|| self.family())
            .unwrap_or_else(|| "EmbeddedFont".to_string())
    }

    pub fn family(&self) -> Option<String> {
        self.name_record(owned_ttf_parser::name_id::FAMILY)
    }

    fn name_record(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Distance from the baseline to the bottom of the font at the given size;
    /// usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph drawn in place of characters the font doesn't cover
    pub fn replacement_glyph_id(&self) -> u16 {
        self.glyph_id('\u{FFFD}')
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Width of `text` at `size`. Characters without a glyph measure as the
    /// replacement glyph, matching what gets drawn.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let replacement = self.replacement_glyph_id();
        let units: u32 = text
            .chars()
            .map(|ch| self.glyph_id(ch).unwrap_or(replacement))
            .map(|gid| self.face().glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as u32)
            .sum();
        self.scaling(size) * units as f32
    }

    /// Encode `text` as big-endian glyph ids for an Identity-H font
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        let replacement = self.replacement_glyph_id();
        text.chars()
            .flat_map(|ch| self.glyph_id(ch).unwrap_or(replacement).to_be_bytes())
            .collect()
    }

    /// Every (glyph id, char) the font maps from Unicode, lowest glyph first
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map: BTreeMap<u16, char> = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }
        map
    }

    /// Advance widths in 1/1000 em, keyed by glyph id
    fn glyph_widths(&self) -> BTreeMap<u16, f32> {
        let scaling = 1000.0 / self.face().units_per_em() as f32;
        self.glyph_chars()
            .keys()
            .filter_map(|&gid| {
                self.face()
                    .glyph_hor_advance(GlyphId(gid))
                    .map(|advance| (gid, advance as f32 * scaling))
            })
            .collect()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));
        let widths = self.glyph_widths();

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        // group runs of consecutive glyph ids into single width arrays
        let mut w = cid_font.widths();
        let mut run: Option<(u16, Vec<f32>)> = None;
        for (gid, width) in widths {
            run = match run.take() {
                Some((start, mut run_widths)) if start as usize + run_widths.len() == gid as usize => {
                    run_widths.push(width);
                    Some((start, run_widths))
                }
                Some((start, run_widths)) => {
                    w.consecutive(start, run_widths);
                    Some((gid, vec![width]))
                }
                None => Some((gid, vec![width])),
            };
        }
        if let Some((start, run_widths)) = run {
            w.consecutive(start, run_widths);
        }
        w.finish();

        id
    }

    fn write_descriptor(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let bbox = face.global_bounding_box();

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let name = self.name().replace(' ', "");
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect::new(
            bbox.x_min as f32 * scaling,
            bbox.y_min as f32 * scaling,
            bbox.x_max as f32 * scaling,
            bbox.y_max as f32 * scaling,
        ));
        // nominal slant
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        // not recoverable from the font tables; a regular-weight estimate
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_to_unicode(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let glyphs: Vec<(u16, char)> = self.glyph_chars().into_iter().collect();
        for block in glyphs.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{units}>\n"));
            }
            map.push_str("endbfchar\n");
        }
        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer.stream(id, compressed.as_slice()).filter(Filter::FlateDecode);

        id
    }
}
