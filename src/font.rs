use crate::{
    refs::{ObjectReferences, RefType},
    BadgeError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{name_id, AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::{BTreeMap, BTreeSet};

/// A parsed font object. Fonts can be TTF or OTF fonts, and will be embedded in their
/// entirety in the generated PDF.
///
/// Within a [Document](crate::Document) fonts are referred to by their `Id<Font>`,
/// which is also the font handle the [PdfCanvas](crate::PdfCanvas) hands out.
pub struct Font {
    pub face: OwnedFace,
}

/// Look up a unicode name record in a face
pub(crate) fn face_name(face: &Face<'_>, id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .find(|name| name.name_id == id && name.is_unicode())
        .and_then(|name| name.to_string())
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, BadgeError> {
        Font::load_indexed(bytes, 0)
    }

    /// Load face `index` of a font file, which is only ever non-zero for collections
    pub fn load_indexed(bytes: Vec<u8>, index: u32) -> Result<Font, BadgeError> {
        let face = OwnedFace::from_vec(bytes, index)?;

        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    /// The full name of the font, e.g. "Georgia Bold Italic"
    pub fn name(&self) -> Option<String> {
        face_name(self.face(), name_id::FULL_NAME)
    }

    /// The family name of the font, e.g. "Georgia"
    pub fn family(&self) -> Option<String> {
        face_name(self.face(), name_id::FAMILY)
    }

    /// The PostScript name of the font, e.g. "Georgia-BoldItalic"
    pub fn postscript_name(&self) -> Option<String> {
        face_name(self.face(), name_id::POST_SCRIPT_NAME)
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Width of a run of text at the given size, summing glyph advances. Characters
    /// the font has no glyph for are measured as the replacement glyph.
    pub fn text_width(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .map(|ch| self.advance(self.glyph_id_or_replacement(ch)))
            .map(|advance| scaling * advance as f32)
            .sum()
    }

    fn advance(&self, gid: u16) -> u16 {
        self.face()
            .glyph_hor_advance(GlyphId(gid))
            .unwrap_or_default()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}')
    }

    /// The glyph to draw for `ch`: its own glyph, the replacement character, a
    /// question mark, or `.notdef` as a last resort
    pub fn glyph_id_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Glyph ids and advance widths (in 1000ths of an em) for every character drawn
    fn used_glyphs(&self, used: &BTreeSet<char>) -> BTreeMap<u16, (Option<char>, f32)> {
        let scaling = 1000.0 / self.face().units_per_em() as f32;
        let mut glyphs = BTreeMap::new();
        for &ch in used {
            let own = self.glyph_id(ch);
            let gid = own.unwrap_or_else(|| self.glyph_id_or_replacement(ch));
            let width = self.advance(gid) as f32 * scaling;
            let entry = glyphs.entry(gid).or_insert((None, width));
            // a replacement glyph shouldn't claim to be whichever char fell back to it
            if own.is_some() && entry.0.is_none() {
                entry.0 = Some(ch);
            }
        }
        glyphs
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, (Option<char>, f32)>,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, glyphs, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(self.base_font_name(font_index).as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        // group consecutive glyph ids so each run is written as one array
        let mut widths = cid_font.widths();
        let mut run: Option<(u16, Vec<f32>)> = None;
        for (&gid, &(_, width)) in glyphs.iter() {
            let extends = matches!(&run, Some((start, run_widths)) if *start as usize + run_widths.len() == gid as usize);
            if extends {
                if let Some((_, run_widths)) = run.as_mut() {
                    run_widths.push(width);
                }
            } else if let Some((start, run_widths)) = run.replace((gid, vec![width])) {
                widths.consecutive(start, run_widths);
            }
        }
        if let Some((start, run_widths)) = run {
            widths.consecutive(start, run_widths);
        }
        widths.finish();

        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn base_font_name(&self, font_index: usize) -> String {
        self.postscript_name()
            .filter(|name| name.is_ascii() && !name.contains(char::is_whitespace))
            .unwrap_or_else(|| format!("F{font_index}"))
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        let data = self.face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            data,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);
        stream.pair(Name(b"Length1"), data.len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, (Option<char>, f32)>,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let bbox = face.global_bounding_box();
        let max_width = glyphs.values().map(|&(_, w)| w).fold(0.0f32, f32::max);
        let avg_width = if glyphs.is_empty() {
            0.0
        } else {
            glyphs.values().map(|&(_, w)| w).sum::<f32>() / glyphs.len() as f32
        };

        let id = refs.gen(RefType::FontDescriptor(font_index));

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(self.base_font_name(font_index).as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        // the post table angle isn't exposed consistently across parser versions
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face
            .capital_height()
            .map(|h| h as f32 * scaling)
            .unwrap_or(face.ascender() as f32 * scaling);
        descriptor.cap_height(cap_height);
        descriptor.x_height(
            face.x_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(cap_height),
        );
        // TrueType fonts don't record a stem width; this is the usual regular-weight guess
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.missing_width(max_width);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, (Option<char>, f32)>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mapped: Vec<(u16, char)> = glyphs
            .iter()
            .filter_map(|(&gid, &(ch, _))| ch.map(|ch| (gid, ch)))
            .collect();

        // bfchar blocks hold at most 100 entries each
        for block in mapped.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let code: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{code}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);

        id
    }

    /// Write the font as a Type0 font with an Identity-H encoding, covering the
    /// characters in `used`
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        id: Id<Font>,
        used: &BTreeSet<char>,
        writer: &mut Pdf,
    ) {
        let font_index = id.index();
        let glyphs = self.used_glyphs(used);
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, &glyphs, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(self.base_font_name(font_index).as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}
