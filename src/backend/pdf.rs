//! The shipping [`RenderBackend`]: buffers per-page content streams in
//! memory and serialises the whole object graph with `pdf-writer` when
//! the document is written out.

use super::standard::{to_winansi_bytes, StandardFont};
use super::truetype::TtfFont;
use super::{FontId, FontMetrics, ImageId, PageId, RenderBackend};
use crate::colour::Colour;
use crate::error::Error;
use crate::info::Info;
use crate::pagesize::PageSize;
use crate::transform::Transform;
use crate::units::Pt;
use image::ColorType;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Ref, Str};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub(crate) enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    ToUnicode(usize),
    FontDescriptor(usize),
    FontData(usize),
    Image(usize),
    ImageMask(usize),
}

/// Indirect-object id allocation, keyed by what the object is for.
pub(crate) struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub(crate) fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    pub(crate) fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    pub(crate) fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        self.refs.insert(ref_type, id);
        id
    }
}

enum BackendFont {
    Standard(StandardFont),
    TrueType(TtfFont),
}

enum ImageData {
    /// RGB JPEG bytes embedded as-is with a DCT filter
    Jpeg(Vec<u8>),
    /// Flate-compressed raw RGB, with an optional greyscale soft mask
    Flate { rgb: Vec<u8>, mask: Option<Vec<u8>> },
}

struct BackendImage {
    data: ImageData,
    width: u32,
    height: u32,
}

struct PdfPage {
    size: PageSize,
    /// Closed content streams in draw order; serialised as one stream
    streams: Vec<Vec<u8>>,
}

/// A [`RenderBackend`] producing PDF 1.7 output via `pdf-writer`.
///
/// Everything is buffered until [`write`](RenderBackend::write): pages
/// and resources can keep accumulating until then, which is also what
/// lets the engine come back to finished pages for per-page chrome.
#[derive(Default)]
pub struct PdfBackend {
    fonts: Vec<BackendFont>,
    standard_ids: HashMap<&'static str, FontId>,
    images: Vec<BackendImage>,
    pages: Vec<PdfPage>,
    active: Option<(usize, Content)>,
    current_font: Option<FontId>,
    info: Option<Info>,
}

impl PdfBackend {
    pub fn new() -> PdfBackend {
        PdfBackend::default()
    }

    /// Attach document metadata, written to the PDF info dictionary.
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    fn content(&mut self) -> &mut Content {
        debug_assert!(self.active.is_some(), "no content stream is open");
        &mut self.active.as_mut().expect("active content stream").1
    }

    fn decode_image(bytes: &[u8]) -> Result<BackendImage, Error> {
        let format = image::guess_format(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;
        let (width, height) = (decoded.width(), decoded.height());

        // RGB JPEGs can be embedded without re-encoding
        if format == image::ImageFormat::Jpeg && decoded.color() == ColorType::Rgb8 {
            return Ok(BackendImage {
                data: ImageData::Jpeg(bytes.to_vec()),
                width,
                height,
            });
        }

        use image::GenericImageView;
        let level = CompressionLevel::DefaultLevel as u8;
        let mask = decoded.color().has_alpha().then(|| {
            let alphas: Vec<u8> = decoded.pixels().map(|p| (p.2).0[3]).collect();
            compress_to_vec_zlib(&alphas, level)
        });
        let rgb = compress_to_vec_zlib(decoded.to_rgb8().as_raw(), level);

        Ok(BackendImage {
            data: ImageData::Flate { rgb, mask },
            width,
            height,
        })
    }

    fn write_image(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        writer: &mut Pdf,
    ) {
        let image = &self.images[index];
        let id = refs.gen(RefType::Image(index));

        let (bytes, filter, mask): (&[u8], Filter, Option<&[u8]>) = match &image.data {
            ImageData::Jpeg(bytes) => (bytes, Filter::DctDecode, None),
            ImageData::Flate { rgb, mask } => (rgb, Filter::FlateDecode, mask.as_deref()),
        };

        let mask_id = mask.map(|_| refs.gen(RefType::ImageMask(index)));

        let mut xobject = writer.image_xobject(id, bytes);
        xobject.filter(filter);
        xobject.width(image.width as i32);
        xobject.height(image.height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            xobject.s_mask(mask_id);
        }
        xobject.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask);
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(image.width as i32);
            s_mask.height(image.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }

    fn write_font(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) {
        match &self.fonts[index] {
            BackendFont::Standard(standard) => {
                let id = refs.gen(RefType::Font(index));
                let mut font = writer.type1_font(id);
                font.base_font(Name(standard.name.as_bytes()));
                if standard.name != "Symbol" && standard.name != "ZapfDingbats" {
                    font.encoding_predefined(Name(b"WinAnsiEncoding"));
                }
            }
            BackendFont::TrueType(ttf) => ttf.write(refs, index, writer),
        }
    }
}

impl FontMetrics for PdfBackend {
    fn string_width(&self, font: FontId, text: &str) -> f32 {
        match &self.fonts[font.0] {
            BackendFont::Standard(standard) => standard.string_width(text),
            BackendFont::TrueType(ttf) => ttf.string_width(text),
        }
    }

    fn space_width(&self, font: FontId) -> f32 {
        match &self.fonts[font.0] {
            BackendFont::Standard(standard) => standard.space_width(),
            BackendFont::TrueType(ttf) => ttf.space_width(),
        }
    }
}

impl RenderBackend for PdfBackend {
    fn add_page(&mut self, size: PageSize) -> PageId {
        self.pages.push(PdfPage {
            size,
            streams: Vec::new(),
        });
        PageId(self.pages.len() - 1)
    }

    fn open_stream(&mut self, page: PageId) {
        debug_assert!(self.active.is_none(), "a content stream is already open");
        self.active = Some((page.0, Content::new()));
    }

    fn close_stream(&mut self) {
        if let Some((page, content)) = self.active.take() {
            self.pages[page].streams.push(content.finish());
        }
    }

    fn register_font(&mut self, name: &str) -> Result<FontId, Error> {
        let standard = StandardFont::by_name(name)
            .ok_or_else(|| Error::UnknownStandardFont(name.to_string()))?;
        if let Some(&id) = self.standard_ids.get(standard.name) {
            return Ok(id);
        }
        self.fonts.push(BackendFont::Standard(standard));
        let id = FontId(self.fonts.len() - 1);
        self.standard_ids.insert(standard.name, id);
        Ok(id)
    }

    fn load_font_bytes(&mut self, bytes: Vec<u8>) -> Result<FontId, Error> {
        let font = TtfFont::load(bytes)?;
        self.fonts.push(BackendFont::TrueType(font));
        Ok(FontId(self.fonts.len() - 1))
    }

    fn load_image_file(&mut self, path: &Path) -> Result<ImageId, Error> {
        let bytes = std::fs::read(path)?;
        self.load_image_bytes(&bytes)
    }

    fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<ImageId, Error> {
        let image = Self::decode_image(bytes)?;
        self.images.push(image);
        Ok(ImageId(self.images.len() - 1))
    }

    fn image_size(&self, image: ImageId) -> (f32, f32) {
        let image = &self.images[image.0];
        (image.width as f32, image.height as f32)
    }

    fn begin_text(&mut self) {
        self.content().begin_text();
    }

    fn set_font(&mut self, font: FontId, size: Pt) {
        self.current_font = Some(font);
        self.content()
            .set_font(Name(format!("F{}", font.0).as_bytes()), *size);
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        match colour {
            Colour::Rgb { r, g, b } => self.content().set_fill_rgb(r, g, b),
            Colour::Grey { g } => self.content().set_fill_gray(g),
        };
    }

    fn line_offset(&mut self, x: Pt, y: Pt) {
        self.content().next_line(*x, *y);
    }

    fn show_text(&mut self, text: &str) {
        let encoded = match self.current_font.map(|id| &self.fonts[id.0]) {
            Some(BackendFont::TrueType(ttf)) => ttf.encode(text),
            _ => to_winansi_bytes(text),
        };
        self.content().show(Str(&encoded));
    }

    fn end_text(&mut self) {
        self.content().end_text();
    }

    fn set_stroke_colour(&mut self, colour: Colour) {
        match colour {
            Colour::Rgb { r, g, b } => self.content().set_stroke_rgb(r, g, b),
            Colour::Grey { g } => self.content().set_stroke_gray(g),
        };
    }

    fn set_line_width(&mut self, width: Pt) {
        self.content().set_line_width(*width);
    }

    fn move_to(&mut self, x: Pt, y: Pt) {
        self.content().move_to(*x, *y);
    }

    fn line_to(&mut self, x: Pt, y: Pt) {
        self.content().line_to(*x, *y);
    }

    fn stroke(&mut self) {
        self.content().stroke();
    }

    fn rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) {
        self.content().rect(*x, *y, *width, *height);
    }

    fn fill(&mut self) {
        self.content().fill_nonzero();
    }

    fn draw_image(&mut self, image: ImageId, x: Pt, y: Pt, width: Pt, height: Pt) {
        let content = self.content();
        content.save_state();
        content.transform([*width, 0.0, 0.0, *height, *x, *y]);
        content.x_object(Name(format!("I{}", image.0).as_bytes()));
        content.restore_state();
    }

    fn save_state(&mut self) {
        self.content().save_state();
    }

    fn restore_state(&mut self) {
        self.content().restore_state();
    }

    fn transform(&mut self, matrix: Transform) {
        self.content().transform(matrix.to_array());
    }

    fn write(&mut self, out: &mut dyn Write) -> Result<(), Error> {
        debug_assert!(self.active.is_none(), "close the active stream before writing");

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

        for index in 0..self.fonts.len() {
            self.write_font(&mut refs, index, &mut writer);
        }
        for index in 0..self.images.len() {
            self.write_image(&mut refs, index, &mut writer);
        }

        for (index, page) in self.pages.iter().enumerate() {
            let id = refs.get(RefType::Page(index)).expect("page ref generated");
            let content_id = refs.gen(RefType::ContentForPage(index));

            let mut page_writer = writer.page(id);
            page_writer.media_box(pdf_writer::Rect {
                x1: 0.0,
                y1: 0.0,
                x2: *page.size.width,
                y2: *page.size.height,
            });
            page_writer.parent(page_tree_id);
            page_writer.contents(content_id);

            let mut resources = page_writer.resources();
            let mut fonts = resources.fonts();
            for i in 0..self.fonts.len() {
                fonts.pair(
                    Name(format!("F{i}").as_bytes()),
                    refs.get(RefType::Font(i)).expect("font ref generated"),
                );
            }
            fonts.finish();
            let mut xobjects = resources.x_objects();
            for i in 0..self.images.len() {
                xobjects.pair(
                    Name(format!("I{i}").as_bytes()),
                    refs.get(RefType::Image(i)).expect("image ref generated"),
                );
            }
            xobjects.finish();
            resources.finish();
            page_writer.finish();

            // a page's streams are balanced op sequences; newline-joined
            // they form one valid content stream
            let joined = page.streams.join(&b"\n"[..]);
            let compressed = compress_to_vec_zlib(&joined, CompressionLevel::DefaultLevel as u8);
            writer
                .stream(content_id, compressed.as_slice())
                .filter(Filter::FlateDecode);
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        out.write_all(writer.finish().as_slice())?;
        Ok(())
    }
}
