use crate::backend::{FontId, RenderBackend};
use crate::colour::{colours, Colour};
use crate::page_numbering::PageNumbering;
use crate::units::Pt;

/// A header or footer band: up to three text slots (left, centre,
/// right), an optional horizontal rule, and an optional embedded
/// [`PageNumbering`].
///
/// When a numbering is embedded it takes the right edge of the band and
/// suppresses the centre and right text slots — that is the canonical
/// way to number pages.
#[derive(Debug, Clone)]
pub struct PageSection {
    left_text: Option<String>,
    center_text: Option<String>,
    right_text: Option<String>,
    font: FontId,
    font_size: Pt,
    colour: Colour,
    line: bool,
    line_width: Pt,
    line_colour: Colour,
    numbering: Option<PageNumbering>,
}

impl PageSection {
    pub fn new(font: FontId) -> PageSection {
        PageSection {
            left_text: None,
            center_text: None,
            right_text: None,
            font,
            font_size: Pt(10.0),
            colour: colours::BLACK,
            line: true,
            line_width: Pt(0.5),
            line_colour: colours::BLACK,
            numbering: None,
        }
    }

    pub fn with_left_text<S: Into<String>>(mut self, text: S) -> PageSection {
        self.left_text = Some(text.into());
        self
    }

    pub fn with_center_text<S: Into<String>>(mut self, text: S) -> PageSection {
        self.center_text = Some(text.into());
        self
    }

    pub fn with_right_text<S: Into<String>>(mut self, text: S) -> PageSection {
        self.right_text = Some(text.into());
        self
    }

    pub fn with_font_size(mut self, size: Pt) -> PageSection {
        self.font_size = size;
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> PageSection {
        self.colour = colour;
        self
    }

    pub fn with_line(mut self, line: bool) -> PageSection {
        self.line = line;
        self
    }

    pub fn with_line_width(mut self, width: Pt) -> PageSection {
        self.line_width = width;
        self
    }

    pub fn with_line_colour(mut self, colour: Colour) -> PageSection {
        self.line_colour = colour;
        self
    }

    /// Embed page numbers in the band's right slot.
    pub fn with_page_numbering(mut self, numbering: PageNumbering) -> PageSection {
        self.numbering = Some(numbering);
        self
    }

    pub fn page_numbering(&self) -> Option<&PageNumbering> {
        self.numbering.as_ref()
    }

    /// A quiet grey band with a thin rule and a centred title.
    pub fn minimal<S: Into<String>>(font: FontId, title: S) -> PageSection {
        PageSection::new(font)
            .with_center_text(title)
            .with_colour(colours::MID_GREY)
            .with_line_width(Pt(0.5))
            .with_line_colour(Colour::new_rgb_bytes(200, 200, 200))
    }

    /// Company on the left, document title centred, today's date on the
    /// right.
    pub fn corporate<S: Into<String>, T: Into<String>>(
        font: FontId,
        company: S,
        document_title: T,
    ) -> PageSection {
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        PageSection::new(font)
            .with_left_text(company)
            .with_center_text(document_title)
            .with_right_text(date)
            .with_colour(Colour::new_rgb_bytes(68, 68, 68))
            .with_line_colour(Colour::new_rgb_bytes(68, 68, 68))
    }

    /// Footer with embedded page numbers on the right.
    pub fn page_number_footer<S: Into<String>>(
        font: FontId,
        left_text: S,
        numbering: PageNumbering,
    ) -> PageSection {
        PageSection::new(font)
            .with_left_text(left_text)
            .with_font_size(Pt(8.0))
            .with_colour(colours::MID_GREY)
            .with_line_colour(Colour::new_rgb_bytes(200, 200, 200))
            .with_page_numbering(numbering)
    }

    fn show<B: RenderBackend>(&self, backend: &mut B, x: Pt, y: Pt, text: &str) {
        backend.begin_text();
        backend.set_font(self.font, self.font_size);
        backend.line_offset(x, y);
        backend.show_text(text);
        backend.end_text();
    }

    /// Render the band with its text baseline at `y`. `numbers` carries
    /// `(page_number, total_pages)` when the caller knows them; without
    /// them an embedded numbering stays silent.
    pub fn render<B: RenderBackend>(
        &self,
        backend: &mut B,
        page_width: Pt,
        y: Pt,
        margin_left: Pt,
        margin_right: Pt,
        numbers: Option<(usize, usize)>,
    ) {
        let content_width = page_width - margin_left - margin_right;
        let line_y = y - self.font_size / 2.0;

        backend.set_fill_colour(self.colour);

        if let Some(left) = self.left_text.as_deref().filter(|t| !t.is_empty()) {
            self.show(backend, margin_left, y, left);
        }

        match (&self.numbering, numbers) {
            (Some(numbering), Some((page_number, total_pages))) => {
                let text = numbering.format_page_number(page_number, total_pages);
                let text_width = backend.text_advance(self.font, self.font_size, &text);
                self.show(backend, page_width - margin_right - text_width, y, &text);
            }
            _ => {
                if let Some(center) = self.center_text.as_deref().filter(|t| !t.is_empty()) {
                    let text_width = backend.text_advance(self.font, self.font_size, center);
                    let center_x = margin_left + (content_width - text_width) / 2.0;
                    self.show(backend, center_x, y, center);
                }
                if let Some(right) = self.right_text.as_deref().filter(|t| !t.is_empty()) {
                    let text_width = backend.text_advance(self.font, self.font_size, right);
                    self.show(backend, page_width - margin_right - text_width, y, right);
                }
            }
        }

        if self.line {
            backend.set_stroke_colour(self.line_colour);
            backend.set_line_width(self.line_width);
            backend.move_to(margin_left, line_y);
            backend.line_to(page_width - margin_right, line_y);
            backend.stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Op, RecordingBackend};
    use crate::pagesize;
    use crate::page_numbering::NumberingFormat;

    fn render(section: &PageSection, numbers: Option<(usize, usize)>) -> RecordingBackend {
        let mut backend = RecordingBackend::new();
        let page = backend.add_page(pagesize::A4);
        backend.open_stream(page);
        section.render(
            &mut backend,
            pagesize::A4.width,
            Pt(30.0),
            Pt(50.0),
            Pt(50.0),
            numbers,
        );
        backend.close_stream();
        backend
    }

    #[test]
    fn renders_all_three_slots() {
        let section = PageSection::new(FontId(0))
            .with_left_text("left")
            .with_center_text("mid")
            .with_right_text("right");
        let backend = render(&section, None);
        assert_eq!(backend.page_text(0), vec!["left", "mid", "right"]);
    }

    #[test]
    fn embedded_numbering_takes_precedence() {
        let numbering = PageNumbering::new(FontId(0)).with_format(NumberingFormat::WithTotal);
        let section = PageSection::new(FontId(0))
            .with_center_text("mid")
            .with_right_text("right")
            .with_page_numbering(numbering);
        let backend = render(&section, Some((2, 5)));
        assert_eq!(backend.page_text(0), vec!["2 de 5"]);
    }

    #[test]
    fn rule_spans_the_content_width() {
        let section = PageSection::new(FontId(0)).with_left_text("x");
        let backend = render(&section, None);
        let line = backend
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Line { x1, x2, y1, .. } => Some((*x1, *x2, *y1)),
                _ => None,
            })
            .expect("a rule is drawn");
        assert_eq!(line.0, Pt(50.0));
        assert_eq!(line.1, pagesize::A4.width - Pt(50.0));
        assert_eq!(line.2, Pt(30.0) - Pt(5.0));
    }

    #[test]
    fn line_can_be_disabled() {
        let section = PageSection::new(FontId(0)).with_left_text("x").with_line(false);
        let backend = render(&section, None);
        assert!(!backend.ops.iter().any(|op| matches!(op, Op::Line { .. })));
    }
}
