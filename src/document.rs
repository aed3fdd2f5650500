use crate::backend::{FontId, ImageId, PdfBackend, RenderBackend};
use crate::config::Config;
use crate::cursor::Cursor;
use crate::error::Error;
use crate::heading::Heading;
use crate::image_block::ImageBlock;
use crate::list::List;
use crate::logo::Logo;
use crate::page_numbering::PageNumbering;
use crate::page_section::PageSection;
use crate::paragraph::Paragraph;
use crate::rect::Rect;
use crate::resources::ResourceManager;
use crate::simple_text::SimpleText;
use crate::table::Table;
use crate::units::Pt;
use log::debug;
use std::path::Path;

/// Vertical gap appended after images, tables, and lists
const BLOCK_SPACING: Pt = Pt(20.0);
/// Gap between the top margin and the header baseline
const HEADER_INSET: Pt = Pt(5.0);

/// The document engine. Owns the rendering backend, the page list, and
/// the cursor, and decides where each appended block lands — wrapping
/// its text, aligning it, and opening a continuation page whenever the
/// block would overflow the content area.
///
/// Blocks are appended in program order through the fluent `add_*`
/// methods. Repeating chrome (header, footer, page numbers) should be
/// configured before content is appended; it is drawn onto every page
/// during [`save`](Document::save), once the total page count is known.
/// The logo band renders eagerly at each page open since it consumes
/// content-area height.
pub struct Document<B: RenderBackend = PdfBackend> {
    backend: B,
    config: Config,
    resources: ResourceManager,
    pages: Vec<crate::backend::PageId>,
    stream_open: bool,
    cursor: Cursor,
    font_size: Pt,
    line_spacing: f32,
    header: Option<PageSection>,
    footer: Option<PageSection>,
    numbering: Option<PageNumbering>,
    logo: Option<Logo>,
    finalised: bool,
}

impl Document<PdfBackend> {
    /// Start a document on the shipping PDF backend.
    pub fn new(config: Config) -> Result<Document<PdfBackend>, Error> {
        Document::with_backend(config, PdfBackend::new())
    }
}

impl<B: RenderBackend> Document<B> {
    /// Start a document on a caller-supplied backend. The first page and
    /// its content stream are opened eagerly; the cursor starts at the
    /// content area's top-left corner.
    pub fn with_backend(config: Config, mut backend: B) -> Result<Document<B>, Error> {
        config.validate()?;
        let resources = ResourceManager::standard(&mut backend)?;

        let page = backend.add_page(config.page_size);
        backend.open_stream(page);
        let cursor = Cursor::content_top_left(config.page_size, config.safe_area);

        Ok(Document {
            backend,
            config,
            resources,
            pages: vec![page],
            stream_open: true,
            cursor,
            font_size: config.font_size,
            line_spacing: config.line_spacing,
            header: None,
            footer: None,
            numbering: None,
            logo: None,
            finalised: false,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The content rectangle of the current page.
    pub fn content_area(&self) -> Rect {
        self.config.safe_area.content_area(self.config.page_size)
    }

    /// The document's default font (initially Helvetica).
    pub fn default_font(&self) -> FontId {
        self.resources.default_font()
    }

    // ------------------------------------------------------- resources

    /// Load and register a TrueType font under a name.
    pub fn load_font<S: AsRef<str>>(&mut self, name: S, bytes: Vec<u8>) -> Result<FontId, Error> {
        let font = self.backend.load_font_bytes(bytes)?;
        self.resources.register_font(name.as_ref(), font);
        Ok(font)
    }

    /// Load an image from disk and register it under a name.
    pub fn load_image<S: AsRef<str>, P: AsRef<Path>>(
        &mut self,
        name: S,
        path: P,
    ) -> Result<ImageId, Error> {
        let image = self.backend.load_image_file(path.as_ref())?;
        self.resources.register_image(name.as_ref(), image);
        Ok(image)
    }

    /// Load an image from encoded bytes and register it under a name.
    pub fn load_image_bytes<S: AsRef<str>>(
        &mut self,
        name: S,
        bytes: &[u8],
    ) -> Result<ImageId, Error> {
        let image = self.backend.load_image_bytes(bytes)?;
        self.resources.register_image(name.as_ref(), image);
        Ok(image)
    }

    // ---------------------------------------------------------- chrome

    /// Set the repeating header band. Drawn on every page at save time.
    pub fn set_header(&mut self, header: PageSection) -> &mut Self {
        self.header = Some(header);
        self
    }

    /// Set the repeating footer band. Drawn on every page at save time.
    pub fn set_footer(&mut self, footer: PageSection) -> &mut Self {
        self.footer = Some(footer);
        self
    }

    /// Set standalone page numbering. Prefer embedding the numbering in
    /// a footer via [`PageSection::with_page_numbering`]; this path
    /// exists for documents without a footer band.
    pub fn set_page_numbering(&mut self, numbering: PageNumbering) -> &mut Self {
        self.numbering = Some(numbering);
        self
    }

    /// Set the logo band and render it on the current page at the
    /// cursor, shifting the cursor below it. Subsequent pages render it
    /// at their top.
    pub fn set_logo(&mut self, logo: Logo) -> &mut Self {
        let height = logo.total_height();
        logo.render(
            &mut self.backend,
            self.config.page_size.width,
            self.cursor.y,
            self.config.safe_area.margins.left,
            self.config.safe_area.margins.right,
        );
        self.cursor = self.cursor.move_by(Pt::ZERO, -height);
        self.logo = Some(logo);
        self
    }

    // --------------------------------------------------------- cursor

    pub fn move_to(&mut self, x: Pt, y: Pt) -> &mut Self {
        self.cursor = self.cursor.move_to(x, y);
        self
    }

    pub fn move_by(&mut self, dx: Pt, dy: Pt) -> &mut Self {
        self.cursor = self.cursor.move_by(dx, dy);
        self
    }

    pub fn move_right(&mut self, distance: Pt) -> &mut Self {
        self.cursor = self.cursor.move_by(distance, Pt::ZERO);
        self
    }

    pub fn move_down(&mut self, distance: Pt) -> &mut Self {
        self.cursor = self.cursor.move_by(Pt::ZERO, -distance);
        self
    }

    pub fn move_to_top(&mut self) -> &mut Self {
        self.cursor = self.cursor.move_to_top();
        self
    }

    pub fn move_to_bottom(&mut self) -> &mut Self {
        self.cursor = self.cursor.move_to_bottom();
        self
    }

    pub fn move_to_start(&mut self) -> &mut Self {
        self.cursor = self.cursor.move_to_start();
        self
    }

    pub fn move_to_content_percent(&mut self, px: f32, py: f32) -> Result<&mut Self, Error> {
        self.cursor = self.cursor.move_to_content_percent(px, py)?;
        Ok(self)
    }

    pub fn move_to_header(&mut self, px: f32, py: f32) -> Result<&mut Self, Error> {
        self.cursor = self.cursor.move_to_header(px, py)?;
        Ok(self)
    }

    pub fn move_to_footer(&mut self, px: f32, py: f32) -> Result<&mut Self, Error> {
        self.cursor = self.cursor.move_to_footer(px, py)?;
        Ok(self)
    }

    /// Default size for raw text written with [`add_text`](Document::add_text).
    pub fn set_font_size(&mut self, size: Pt) -> Result<&mut Self, Error> {
        if size <= Pt::ZERO {
            return Err(Error::InvalidFontSize(size));
        }
        self.font_size = size;
        Ok(self)
    }

    /// Line-spacing multiplier for raw text lines.
    pub fn set_line_spacing(&mut self, spacing: f32) -> Result<&mut Self, Error> {
        if spacing <= 0.0 {
            return Err(Error::InvalidLineSpacing(spacing));
        }
        self.line_spacing = spacing;
        Ok(self)
    }

    /// Change the default font to a registered name.
    pub fn set_default_font(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.resources.set_default_font(name)?;
        Ok(self)
    }

    // ----------------------------------------------------- pagination

    /// Open a fresh page: close the current stream, append a page,
    /// reset the cursor to the content top-left, and re-render the logo
    /// band if one is set.
    pub fn add_new_page(&mut self) -> &mut Self {
        self.page_turn();
        self
    }

    fn page_turn(&mut self) {
        if self.stream_open {
            self.backend.close_stream();
        }
        let page = self.backend.add_page(self.config.page_size);
        self.pages.push(page);
        self.backend.open_stream(page);
        self.stream_open = true;
        self.cursor = Cursor::content_top_left(self.config.page_size, self.config.safe_area);

        if let Some(logo) = &self.logo {
            logo.render(
                &mut self.backend,
                self.config.page_size.width,
                self.cursor.y,
                self.config.safe_area.margins.left,
                self.config.safe_area.margins.right,
            );
            self.cursor = self.cursor.move_by(Pt::ZERO, -logo.total_height());
        }
        debug!("page turn: now on page {}", self.pages.len());
    }

    /// Turn the page if `needed_height` does not fit above the content
    /// area's bottom edge.
    fn check_new_page(&mut self, needed_height: Pt) {
        let bottom = self.content_area().y1;
        if self.cursor.y - needed_height < bottom {
            debug!(
                "block of {needed_height} does not fit at y={}, opening a new page",
                self.cursor.y
            );
            self.page_turn();
        }
    }

    // --------------------------------------------------------- blocks

    /// Write raw text at the cursor in the default font. The cursor does
    /// not move.
    pub fn add_text<S: AsRef<str>>(&mut self, text: S) -> &mut Self {
        let font = self.resources.default_font();
        self.backend.begin_text();
        self.backend.set_font(font, self.font_size);
        self.backend.line_offset(self.cursor.x, self.cursor.y);
        self.backend.show_text(text.as_ref());
        self.backend.end_text();
        self
    }

    /// Write one line of raw text, then move the cursor to the start of
    /// the next line.
    pub fn add_line<S: AsRef<str>>(&mut self, text: S) -> &mut Self {
        self.add_text(text);
        let line_height = self.font_size * self.line_spacing;
        self.move_down(line_height).move_to_start()
    }

    pub fn add_heading(&mut self, heading: &Heading) -> &mut Self {
        let width = self.content_area().width();
        let height = heading.measure_height(&self.backend, width);
        self.check_new_page(height);
        let new_y = heading.render(&mut self.backend, self.cursor.x, self.cursor.y, width);
        self.cursor = self.cursor.move_to(self.cursor.x, new_y);
        self
    }

    pub fn add_paragraph(&mut self, paragraph: &Paragraph) -> &mut Self {
        let width = self.content_area().width();
        let height = paragraph.calculate_height(&self.backend);
        self.check_new_page(height);
        let new_y = paragraph.render(&mut self.backend, self.cursor.x, self.cursor.y, width);
        self.cursor = self.cursor.move_to(self.cursor.x, new_y);
        self
    }

    pub fn add_simple_text(&mut self, text: &SimpleText) -> &mut Self {
        let width = self.content_area().width();
        let height = text.measure_height(&self.backend, width);
        self.check_new_page(height);
        let new_y = text.render(&mut self.backend, self.cursor.x, self.cursor.y, width);
        self.cursor = self.cursor.move_to(self.cursor.x, new_y);
        self
    }

    pub fn add_list(&mut self, list: &List) -> &mut Self {
        let width = self.content_area().width();
        let height = list.measure_height(&self.backend, width);
        self.check_new_page(height);
        let new_y = list.render(&mut self.backend, self.cursor.x, self.cursor.y, width);
        self.cursor = self.cursor.move_to(self.cursor.x, new_y);
        self.move_down(BLOCK_SPACING)
    }

    pub fn add_table(&mut self, table: &Table) -> &mut Self {
        let width = self.content_area().width();
        // wrap-aware height; the base-row estimate undershoots when
        // cells wrap
        let height = table.measure_height(&self.backend, width);
        self.check_new_page(height);
        let new_y = table.render(&mut self.backend, self.cursor.x, self.cursor.y, width);
        self.cursor = self.cursor.move_to(self.cursor.x, new_y);
        self.move_down(BLOCK_SPACING)
    }

    pub fn add_image(&mut self, image: &ImageBlock) -> &mut Self {
        let width = self.content_area().width();
        self.check_new_page(image.required_height(width));
        let new_y = image.render(&mut self.backend, self.cursor.x, self.cursor.y, width);
        self.cursor = self.cursor.move_to(self.cursor.x, new_y);
        self.move_down(BLOCK_SPACING)
    }

    // ------------------------------------------------------- lifecycle

    /// Draw the deferred chrome on every page. Runs once; later calls
    /// are no-ops.
    fn flush_chrome(&mut self) {
        if self.finalised {
            return;
        }
        if self.stream_open {
            self.backend.close_stream();
            self.stream_open = false;
        }
        self.finalised = true;

        if self.header.is_none() && self.footer.is_none() && self.numbering.is_none() {
            return;
        }

        let total = self.pages.len();
        let page_size = self.config.page_size;
        let margins = self.config.safe_area.margins;

        for (index, &page) in self.pages.iter().enumerate() {
            let number = index + 1;
            self.backend.open_stream(page);

            if let Some(header) = &self.header {
                let y = page_size.height - margins.top - HEADER_INSET;
                header.render(
                    &mut self.backend,
                    page_size.width,
                    y,
                    margins.left,
                    margins.right,
                    Some((number, total)),
                );
            }
            if let Some(footer) = &self.footer {
                footer.render(
                    &mut self.backend,
                    page_size.width,
                    margins.bottom,
                    margins.left,
                    margins.right,
                    Some((number, total)),
                );
            }
            if let Some(numbering) = &self.numbering {
                numbering.render(&mut self.backend, page_size, number, total);
            }

            self.backend.close_stream();
        }
        debug!("chrome drawn on {total} pages");
    }

    /// Finalise the document and write it to a file. The file holds
    /// every appended block in its rendered position and the configured
    /// chrome on every page.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        self.flush_chrome();
        let mut file = std::fs::File::create(path.as_ref())?;
        self.backend.write(&mut file)?;
        debug!("document saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Finalise the document and hand back the backend, e.g. to inspect
    /// a recording backend's op log in tests.
    pub fn finish(mut self) -> B {
        self.flush_chrome();
        self.backend
    }

    /// Idempotent teardown: closes the active stream and abandons the
    /// document without writing anything. Dropping an unclosed document
    /// releases its resources the same way.
    pub fn close(&mut self) {
        if self.stream_open {
            self.backend.close_stream();
            self.stream_open = false;
        }
        self.finalised = true;
        debug!("document closed");
    }
}
