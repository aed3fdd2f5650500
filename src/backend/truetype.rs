//! Loaded TrueType/OpenType fonts: metric lookups for the layout engine
//! and full embedding (Type0/CID with a ToUnicode map) at write time.

use crate::error::Error;
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo};
use pdf_writer::{Finish, Name, Pdf, Ref, Str};
use std::collections::HashMap;

use super::pdf::{ObjectReferences, RefType};

/// A parsed font. The whole font program is embedded in the generated
/// PDF, so large fonts grow the output accordingly.
pub(crate) struct TtfFont {
    face: OwnedFace,
}

impl TtfFont {
    pub(crate) fn load(bytes: Vec<u8>) -> Result<TtfFont, Error> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(TtfFont { face })
    }

    fn units_per_em(&self) -> f32 {
        self.face.as_face_ref().units_per_em() as f32
    }

    fn glyph_index(&self, ch: char) -> owned_ttf_parser::GlyphId {
        self.face
            .as_face_ref()
            .glyph_index(ch)
            .or_else(|| self.face.as_face_ref().glyph_index('\u{FFFD}'))
            .or_else(|| self.face.as_face_ref().glyph_index('?'))
            .unwrap_or(owned_ttf_parser::GlyphId(0))
    }

    fn advance(&self, ch: char) -> f32 {
        self.face
            .as_face_ref()
            .glyph_hor_advance(self.glyph_index(ch))
            .unwrap_or_default() as f32
    }

    /// Width of `text` scaled to font units per 1000 em.
    pub(crate) fn string_width(&self, text: &str) -> f32 {
        let scale = 1000.0 / self.units_per_em();
        text.chars().map(|ch| self.advance(ch) * scale).sum()
    }

    pub(crate) fn space_width(&self) -> f32 {
        self.advance(' ') * 1000.0 / self.units_per_em()
    }

    /// Encode text as big-endian 2-byte glyph ids for an Identity-H
    /// content stream.
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            let gid = self.glyph_index(ch).0;
            out.extend_from_slice(&gid.to_be_bytes());
        }
        out
    }

    /// All glyph ids the font's unicode cmap can reach, with one
    /// representative character each.
    fn glyph_ids(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();
        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }
        map
    }

    fn write_font_data(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::FontData(index));
        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);
        id
    }

    fn write_descriptor(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let font_data_id = self.write_font_data(refs, index, writer);
        let face = self.face.as_face_ref();
        let scale = 1000.0 / self.units_per_em();

        let id = refs.gen(RefType::FontDescriptor(index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(format!("F{index}").as_bytes()));

        let mut flags = FontFlags::empty();
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scale,
            y1: bbox.y_min as f32 * scale,
            x2: bbox.x_max as f32 * scale,
            y2: bbox.y_max as f32 * scale,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scale);
        descriptor.descent(face.descender() as f32 * scale);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scale)
                .unwrap_or(1000.0),
        );
        descriptor.stem_v(80.0);
        descriptor.font_file2(font_data_id);
        descriptor.finish();

        id
    }

    fn write_cid(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let descriptor_id = self.write_descriptor(refs, index, writer);
        let scale = 1000.0 / self.units_per_em();

        let id = refs.gen(RefType::CidFont(index));
        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);

        let mut id_widths: Vec<(u16, f32)> = self
            .glyph_ids()
            .iter()
            .map(|(&gid, &ch)| (gid, self.advance(ch) * scale))
            .collect();
        id_widths.sort_by_key(|&(gid, _)| gid);

        // pack contiguous glyph-id runs into consecutive-width blocks
        let mut widths = cid_font.widths();
        let mut start: u16 = 0;
        let mut run: Vec<f32> = Vec::new();
        for (gid, width) in id_widths {
            if !run.is_empty() && gid != start + run.len() as u16 {
                widths.consecutive(start, run.drain(..));
                run.clear();
            }
            if run.is_empty() {
                start = gid;
            }
            run.push(width);
        }
        if !run.is_empty() {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        cid_font.finish();

        id
    }

    fn write_to_unicode(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::ToUnicode(index));

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

        let mut ids: Vec<(u16, char)> = self.glyph_ids().into_iter().collect();
        ids.sort_by_key(|&(gid, _)| gid);

        for block in ids.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                map.push_str(&format!("<{gid:04x}> <{:04x}>\n", ch as u32));
            }
            map.push_str("endbfchar\n");
        }
        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        id
    }

    /// Write the complete Type0 font object graph for this font.
    pub(crate) fn write(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(index));
        let cid_id = self.write_cid(refs, index, writer);
        let to_unicode_id = self.write_to_unicode(refs, index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_id);
        font.to_unicode(to_unicode_id);
    }
}
