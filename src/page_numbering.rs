use crate::backend::{FontId, RenderBackend};
use crate::colour::{colours, Colour};
use crate::pagesize::PageSize;
use crate::style::TextAlignment;
use crate::units::Pt;

/// How the page number string is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberingFormat {
    /// `"1"`
    #[default]
    Simple,
    /// `"1 de 10"`
    WithTotal,
    /// `"1 - 10"`
    DashTotal,
    /// `"1 (10)"`
    ParenthesesTotal,
}

/// Vertical placement of the page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberingPosition {
    Top,
    #[default]
    Bottom,
}

/// Page numbers, repeated on every page. Embedding one into a footer
/// [`PageSection`](crate::PageSection) is the usual route; a standalone
/// instance set on the document places itself via `position`,
/// `alignment`, and the margins here.
#[derive(Debug, Clone)]
pub struct PageNumbering {
    pub format: NumberingFormat,
    pub position: NumberingPosition,
    pub font: FontId,
    pub font_size: Pt,
    pub colour: Colour,
    pub alignment: TextAlignment,
    pub margin_x: Pt,
    pub margin_y: Pt,
}

impl PageNumbering {
    pub fn new(font: FontId) -> PageNumbering {
        PageNumbering {
            format: NumberingFormat::Simple,
            position: NumberingPosition::Bottom,
            font,
            font_size: Pt(10.0),
            colour: colours::BLACK,
            alignment: TextAlignment::Center,
            margin_x: Pt(50.0),
            margin_y: Pt(30.0),
        }
    }

    pub fn with_format(mut self, format: NumberingFormat) -> PageNumbering {
        self.format = format;
        self
    }

    pub fn with_position(mut self, position: NumberingPosition) -> PageNumbering {
        self.position = position;
        self
    }

    pub fn with_font_size(mut self, size: Pt) -> PageNumbering {
        self.font_size = size;
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> PageNumbering {
        self.colour = colour;
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> PageNumbering {
        self.alignment = alignment;
        self
    }

    pub fn with_margins(mut self, margin_x: Pt, margin_y: Pt) -> PageNumbering {
        self.margin_x = margin_x;
        self.margin_y = margin_y;
        self
    }

    /// The number string for a page, 1-based.
    pub fn format_page_number(&self, page_number: usize, total_pages: usize) -> String {
        match self.format {
            NumberingFormat::Simple => page_number.to_string(),
            NumberingFormat::WithTotal => format!("{page_number} de {total_pages}"),
            NumberingFormat::DashTotal => format!("{page_number} - {total_pages}"),
            NumberingFormat::ParenthesesTotal => format!("{page_number} ({total_pages})"),
        }
    }

    fn x(&self, page_width: Pt, text_width: Pt) -> Pt {
        match self.alignment {
            TextAlignment::Center => (page_width - text_width) / 2.0,
            TextAlignment::Right => page_width - text_width - self.margin_x,
            // justification is meaningless for a single string
            TextAlignment::Left | TextAlignment::Justified => self.margin_x,
        }
    }

    fn y(&self, page_height: Pt) -> Pt {
        match self.position {
            NumberingPosition::Top => page_height - self.margin_y,
            NumberingPosition::Bottom => self.margin_y + self.font_size,
        }
    }

    /// Draw the number for one page at its standalone position.
    pub fn render<B: RenderBackend>(
        &self,
        backend: &mut B,
        page_size: PageSize,
        page_number: usize,
        total_pages: usize,
    ) {
        let text = self.format_page_number(page_number, total_pages);
        let text_width = backend.text_advance(self.font, self.font_size, &text);

        backend.set_fill_colour(self.colour);
        backend.begin_text();
        backend.set_font(self.font, self.font_size);
        backend.line_offset(self.x(page_size.width, text_width), self.y(page_size.height));
        backend.show_text(&text);
        backend.end_text();
    }
}
