//! The rendering seam between the layout engine and the byte-level PDF
//! writer.
//!
//! The engine draws through [`RenderBackend`] and measures through
//! [`FontMetrics`]; everything PDF-specific lives behind those traits.
//! Two implementations ship with the crate: [`PdfBackend`] produces real
//! documents via `pdf-writer`, and [`RecordingBackend`] captures the
//! drawing ops for headless testing.

pub(crate) mod pdf;
mod recording;
mod standard;
mod truetype;

pub use pdf::PdfBackend;
pub use recording::{Op, RecordingBackend};
pub use standard::STANDARD_FONT_NAMES;

use crate::colour::Colour;
use crate::error::Error;
use crate::pagesize::PageSize;
use crate::transform::Transform;
use crate::units::Pt;
use std::io::Write;
use std::path::Path;

/// Handle to a font registered with a backend. Comparable by identity;
/// only meaningful to the backend that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub(crate) usize);

/// Handle to an image loaded into a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub(crate) usize);

/// Handle to a page appended to a backend document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub(crate) usize);

/// The font-metric oracle. Widths are reported in font units per 1000 em
/// (the PDF convention); the provided methods convert to points so layout
/// code never touches the raw unit.
pub trait FontMetrics {
    /// Width of `text` in the font, in units per 1000 em.
    fn string_width(&self, font: FontId, text: &str) -> f32;

    /// Advance of a single space in the font, in units per 1000 em.
    fn space_width(&self, font: FontId) -> f32;

    /// Advance of `text` at the given size, in points.
    fn text_advance(&self, font: FontId, size: Pt, text: &str) -> Pt {
        Pt(self.string_width(font, text) / 1000.0 * *size)
    }

    /// Advance of a space at the given size, in points.
    fn space_advance(&self, font: FontId, size: Pt) -> Pt {
        Pt(self.space_width(font) / 1000.0 * *size)
    }
}

/// A drawing surface for the document engine.
///
/// Lifecycle: pages are appended with [`add_page`](Self::add_page), and
/// drawing happens on the single active content stream opened with
/// [`open_stream`](Self::open_stream). Re-opening a page whose stream was
/// already closed appends a further content stream that the backend
/// concatenates after the first — the engine uses this for the chrome it
/// can only place once the total page count is known. At most one stream
/// is ever open at a time.
///
/// Drawing ops are infallible: backends buffer in memory and surface I/O
/// errors from [`write`](Self::write) and the resource-loading calls.
pub trait RenderBackend: FontMetrics {
    /// Append a page of the given size to the document.
    fn add_page(&mut self, size: PageSize) -> PageId;

    /// Open a content stream on a page. Panics in debug builds if a
    /// stream is already open.
    fn open_stream(&mut self, page: PageId);

    /// Close the active content stream.
    fn close_stream(&mut self);

    /// Resolve one of the 14 standard font names to a handle,
    /// registering it on first use.
    fn register_font(&mut self, name: &str) -> Result<FontId, Error>;

    /// Load and embed a TrueType/OpenType font from raw bytes.
    fn load_font_bytes(&mut self, bytes: Vec<u8>) -> Result<FontId, Error>;

    /// Load an image from a file on disk.
    fn load_image_file(&mut self, path: &Path) -> Result<ImageId, Error>;

    /// Load an image from encoded bytes.
    fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<ImageId, Error>;

    /// Intrinsic pixel dimensions of a loaded image.
    fn image_size(&self, image: ImageId) -> (f32, f32);

    // text state machine
    fn begin_text(&mut self);
    fn set_font(&mut self, font: FontId, size: Pt);
    fn set_fill_colour(&mut self, colour: Colour);
    /// Set the absolute baseline position for the next show inside the
    /// current begin/end pair.
    fn line_offset(&mut self, x: Pt, y: Pt);
    fn show_text(&mut self, text: &str);
    fn end_text(&mut self);

    // path construction
    fn set_stroke_colour(&mut self, colour: Colour);
    fn set_line_width(&mut self, width: Pt);
    fn move_to(&mut self, x: Pt, y: Pt);
    fn line_to(&mut self, x: Pt, y: Pt);
    fn stroke(&mut self);
    fn rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt);
    fn fill(&mut self);

    // images and transforms
    fn draw_image(&mut self, image: ImageId, x: Pt, y: Pt, width: Pt, height: Pt);
    fn save_state(&mut self);
    fn restore_state(&mut self);
    fn transform(&mut self, matrix: Transform);

    /// Serialise the finished document.
    fn write(&mut self, out: &mut dyn Write) -> Result<(), Error>;
}
