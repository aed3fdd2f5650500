//! A mid-level, opinionated library for composing paginated PDF
//! documents.
//!
//! Callers describe *what* should appear — headings, styled paragraphs,
//! nested lists, tables, images, repeating page chrome — and the engine
//! decides *where* it lands: wrapping and justifying text, sizing table
//! rows from their wrapped cells, and opening continuation pages when a
//! block would overflow the content area.
//!
//! ```no_run
//! use pdf_compose::{Config, Document, Heading, HeadingLevel, Paragraph, TextStyle};
//!
//! # fn main() -> Result<(), pdf_compose::Error> {
//! let mut doc = Document::new(Config::default())?;
//! let font = doc.resources().font("Helvetica")?;
//!
//! let title = Heading::new("Report", HeadingLevel::H1, doc.resources().font("Helvetica-Bold")?)?;
//! let body = Paragraph::from_text("Hello, world!", TextStyle::new(font))?;
//!
//! doc.add_heading(&title).add_paragraph(&body);
//! doc.save("report.pdf")?;
//! # Ok(())
//! # }
//! ```

pub mod backend;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod cursor;
pub use cursor::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod heading;
pub use heading::*;

mod image_block;
pub use image_block::*;

mod info;
pub use info::*;

/// Utility functions to break styled runs and plain text into lines
pub mod layout;

mod list;
pub use list::*;

mod logo;
pub use logo::*;

mod margins;
pub use margins::*;

mod page_numbering;
pub use page_numbering::*;

mod page_section;
pub use page_section::*;

/// Pre-defined page sizes for common paper formats
pub mod pagesize;
pub use pagesize::{PageOrientation, PageSize};

mod paragraph;
pub use paragraph::*;

mod rect;
pub use rect::*;

mod resources;
pub use resources::*;

mod safe_area;
pub use safe_area::*;

mod simple_text;
pub use simple_text::*;

mod style;
pub use style::*;

mod table;
pub use table::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

/// Re-export pdf-writer, mostly for callers implementing their own
/// [`backend::RenderBackend`]
pub use pdf_writer;
