//! A headless backend that records every drawing operation with resolved
//! coordinates. Nothing is rasterised or serialised; tests inspect the op
//! log to check where the engine put things.
//!
//! Metrics are fixed and deliberately simple: every glyph advances 500
//! font units and a space 250, so expected positions can be computed by
//! hand in tests.

use super::{FontId, FontMetrics, ImageId, PageId, RenderBackend};
use crate::colour::{colours, Colour};
use crate::error::Error;
use crate::pagesize::PageSize;
use crate::transform::Transform;
use crate::units::Pt;
use std::io::Write;
use std::path::Path;

/// Glyph advance in font units per 1000 em.
pub const GLYPH_WIDTH: f32 = 500.0;
/// Space advance in font units per 1000 em.
pub const SPACE_WIDTH: f32 = 250.0;

/// One recorded drawing operation, tagged with the page it landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// A `show_text` with the text state in effect at the time
    Text {
        page: usize,
        text: String,
        x: Pt,
        y: Pt,
        font: FontId,
        size: Pt,
        colour: Colour,
    },
    /// A stroked straight line (one `move_to`/`line_to` pair)
    Line {
        page: usize,
        x1: Pt,
        y1: Pt,
        x2: Pt,
        y2: Pt,
        width: Pt,
        colour: Colour,
    },
    /// A stroked rectangle
    RectStroked {
        page: usize,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        colour: Colour,
    },
    /// A filled rectangle
    RectFilled {
        page: usize,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        colour: Colour,
    },
    /// A placed image
    Image {
        page: usize,
        image: ImageId,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
    },
    /// A coordinate-system transform (image rotation)
    Transform { page: usize, matrix: Transform },
}

/// The recording [`RenderBackend`].
pub struct RecordingBackend {
    pub ops: Vec<Op>,
    pub pages: Vec<PageSize>,
    pub fonts: Vec<String>,
    images: Vec<(f32, f32)>,
    active_page: Option<usize>,
    text_x: Pt,
    text_y: Pt,
    font: Option<(FontId, Pt)>,
    fill: Colour,
    stroke_colour: Colour,
    line_width: Pt,
    path_lines: Vec<(Pt, Pt, Pt, Pt)>,
    path_rects: Vec<(Pt, Pt, Pt, Pt)>,
    path_start: Option<(Pt, Pt)>,
}

impl Default for RecordingBackend {
    fn default() -> RecordingBackend {
        RecordingBackend::new()
    }
}

impl RecordingBackend {
    pub fn new() -> RecordingBackend {
        RecordingBackend {
            ops: Vec::new(),
            pages: Vec::new(),
            fonts: Vec::new(),
            images: Vec::new(),
            active_page: None,
            text_x: Pt::ZERO,
            text_y: Pt::ZERO,
            font: None,
            fill: colours::BLACK,
            stroke_colour: colours::BLACK,
            line_width: Pt(1.0),
            path_lines: Vec::new(),
            path_rects: Vec::new(),
            path_start: None,
        }
    }

    /// Register an image with explicit intrinsic dimensions, for tests
    /// that need something other than the default 100x100.
    pub fn add_image(&mut self, width: f32, height: f32) -> ImageId {
        self.images.push((width, height));
        ImageId(self.images.len() - 1)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self) -> usize {
        self.active_page.expect("a content stream is open")
    }

    /// All text ops, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&usize, &String, Pt, Pt)> {
        self.ops.iter().filter_map(|op| match op {
            Op::Text { page, text, x, y, .. } => Some((page, text, *x, *y)),
            _ => None,
        })
    }

    /// Concatenated text drawn on one page, in draw order.
    pub fn page_text(&self, page: usize) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { page: p, text, .. } if *p == page => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl FontMetrics for RecordingBackend {
    fn string_width(&self, _font: FontId, text: &str) -> f32 {
        text.chars()
            .map(|ch| if ch == ' ' { SPACE_WIDTH } else { GLYPH_WIDTH })
            .sum()
    }

    fn space_width(&self, _font: FontId) -> f32 {
        SPACE_WIDTH
    }
}

impl RenderBackend for RecordingBackend {
    fn add_page(&mut self, size: PageSize) -> PageId {
        self.pages.push(size);
        PageId(self.pages.len() - 1)
    }

    fn open_stream(&mut self, page: PageId) {
        debug_assert!(self.active_page.is_none(), "a content stream is already open");
        self.active_page = Some(page.0);
    }

    fn close_stream(&mut self) {
        self.active_page = None;
    }

    fn register_font(&mut self, name: &str) -> Result<FontId, Error> {
        if let Some(index) = self.fonts.iter().position(|n| n == name) {
            return Ok(FontId(index));
        }
        self.fonts.push(name.to_string());
        Ok(FontId(self.fonts.len() - 1))
    }

    fn load_font_bytes(&mut self, _bytes: Vec<u8>) -> Result<FontId, Error> {
        self.fonts.push("<embedded>".to_string());
        Ok(FontId(self.fonts.len() - 1))
    }

    fn load_image_file(&mut self, _path: &Path) -> Result<ImageId, Error> {
        Ok(self.add_image(100.0, 100.0))
    }

    fn load_image_bytes(&mut self, _bytes: &[u8]) -> Result<ImageId, Error> {
        Ok(self.add_image(100.0, 100.0))
    }

    fn image_size(&self, image: ImageId) -> (f32, f32) {
        self.images[image.0]
    }

    fn begin_text(&mut self) {
        self.text_x = Pt::ZERO;
        self.text_y = Pt::ZERO;
    }

    fn set_font(&mut self, font: FontId, size: Pt) {
        self.font = Some((font, size));
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.fill = colour;
    }

    fn line_offset(&mut self, x: Pt, y: Pt) {
        self.text_x = x;
        self.text_y = y;
    }

    fn show_text(&mut self, text: &str) {
        let (font, size) = self.font.unwrap_or((FontId(0), Pt(12.0)));
        let op = Op::Text {
            page: self.page(),
            text: text.to_string(),
            x: self.text_x,
            y: self.text_y,
            font,
            size,
            colour: self.fill,
        };
        self.ops.push(op);
    }

    fn end_text(&mut self) {}

    fn set_stroke_colour(&mut self, colour: Colour) {
        self.stroke_colour = colour;
    }

    fn set_line_width(&mut self, width: Pt) {
        self.line_width = width;
    }

    fn move_to(&mut self, x: Pt, y: Pt) {
        self.path_start = Some((x, y));
    }

    fn line_to(&mut self, x: Pt, y: Pt) {
        if let Some((x1, y1)) = self.path_start.take() {
            self.path_lines.push((x1, y1, x, y));
        }
        self.path_start = Some((x, y));
    }

    fn stroke(&mut self) {
        let page = self.page();
        let width = self.line_width;
        let colour = self.stroke_colour;
        for (x1, y1, x2, y2) in self.path_lines.drain(..) {
            self.ops.push(Op::Line {
                page,
                x1,
                y1,
                x2,
                y2,
                width,
                colour,
            });
        }
        for (x, y, w, h) in self.path_rects.drain(..) {
            self.ops.push(Op::RectStroked {
                page,
                x,
                y,
                width: w,
                height: h,
                colour,
            });
        }
        self.path_start = None;
    }

    fn rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) {
        self.path_rects.push((x, y, width, height));
    }

    fn fill(&mut self) {
        let page = self.page();
        let colour = self.fill;
        for (x, y, w, h) in self.path_rects.drain(..) {
            self.ops.push(Op::RectFilled {
                page,
                x,
                y,
                width: w,
                height: h,
                colour,
            });
        }
        self.path_lines.clear();
        self.path_start = None;
    }

    fn draw_image(&mut self, image: ImageId, x: Pt, y: Pt, width: Pt, height: Pt) {
        let op = Op::Image {
            page: self.page(),
            image,
            x,
            y,
            width,
            height,
        };
        self.ops.push(op);
    }

    fn save_state(&mut self) {}

    fn restore_state(&mut self) {}

    fn transform(&mut self, matrix: Transform) {
        let op = Op::Transform {
            page: self.page(),
            matrix,
        };
        self.ops.push(op);
    }

    fn write(&mut self, _out: &mut dyn Write) -> Result<(), Error> {
        Ok(())
    }
}
