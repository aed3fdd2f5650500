use crate::backend::{FontId, FontMetrics, RenderBackend};
use crate::error::Error;
use crate::layout::wrap_plain;
use crate::style::{HeadingLevel, TextAlignment, TextStyle};
use crate::units::Pt;

/// A section heading. Carries a level (H1..H6) whose defaults supply the
/// font size and the vertical spacing consumed before and after the
/// text; an explicit [`TextStyle`] overrides size and colour.
#[derive(Debug, Clone)]
pub struct Heading {
    text: String,
    level: HeadingLevel,
    style: TextStyle,
    numbered: bool,
    number: Option<String>,
    alignment: TextAlignment,
}

impl Heading {
    pub fn new<S: Into<String>>(
        text: S,
        level: HeadingLevel,
        font: FontId,
    ) -> Result<Heading, Error> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::MissingField("text"));
        }
        Ok(Heading {
            text,
            level,
            style: TextStyle::new(font).with_size(level.font_size()),
            numbered: false,
            number: None,
            alignment: TextAlignment::Left,
        })
    }

    /// Replace the derived style wholesale.
    pub fn with_style(mut self, style: TextStyle) -> Heading {
        self.style = style;
        self
    }

    /// Prefix the text with a section number such as `"1.2."`.
    pub fn with_number<S: Into<String>>(mut self, number: S) -> Heading {
        self.numbered = true;
        self.number = Some(number.into());
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Heading {
        self.alignment = alignment;
        self
    }

    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    fn full_text(&self) -> String {
        match (&self.number, self.numbered) {
            (Some(number), true) => format!("{number} {}", self.text),
            _ => self.text.clone(),
        }
    }

    fn leading(&self) -> Pt {
        self.style.size * 1.2
    }

    /// Full height at the given width: spacing before, the wrapped
    /// lines, spacing after.
    pub fn measure_height(&self, metrics: &impl FontMetrics, max_width: Pt) -> Pt {
        let lines = wrap_plain(
            &self.full_text(),
            self.style.font,
            self.style.size,
            max_width,
            metrics,
        );
        self.level.spacing_before() + self.leading() * lines.len() as f32 + self.level.spacing_after()
    }

    pub fn render<B: RenderBackend>(&self, backend: &mut B, x: Pt, y: Pt, max_width: Pt) -> Pt {
        let lines = wrap_plain(
            &self.full_text(),
            self.style.font,
            self.style.size,
            max_width,
            backend,
        );

        let mut current_y = y - self.level.spacing_before();
        backend.set_fill_colour(self.style.colour);

        for line in lines {
            let text_width = backend.text_advance(self.style.font, self.style.size, &line);
            let start_x = match self.alignment {
                TextAlignment::Center => x + (max_width - text_width) / 2.0,
                TextAlignment::Right => x + max_width - text_width,
                _ => x,
            };

            backend.begin_text();
            backend.set_font(self.style.font, self.style.size);
            backend.line_offset(start_x, current_y);
            backend.show_text(&line);
            backend.end_text();

            current_y = current_y - self.leading();
        }

        current_y - self.level.spacing_after()
    }
}
