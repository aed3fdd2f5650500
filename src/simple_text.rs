use crate::backend::{FontId, FontMetrics, RenderBackend};
use crate::colour::{colours, Colour};
use crate::error::Error;
use crate::layout::wrap_plain;
use crate::units::Pt;

/// Unstyled flowing text: one font, one size, left-aligned, wrapped to
/// the available width.
#[derive(Debug, Clone)]
pub struct SimpleText {
    text: String,
    font: FontId,
    size: Pt,
    line_spacing: f32,
    colour: Colour,
}

impl SimpleText {
    pub fn new<S: Into<String>>(text: S, font: FontId) -> Result<SimpleText, Error> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::MissingField("text"));
        }
        Ok(SimpleText {
            text,
            font,
            size: Pt(12.0),
            line_spacing: 1.2,
            colour: colours::BLACK,
        })
    }

    pub fn with_size(mut self, size: Pt) -> SimpleText {
        self.size = size;
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f32) -> SimpleText {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> SimpleText {
        self.colour = colour;
        self
    }

    /// Height of one line including spacing.
    pub fn line_height(&self) -> Pt {
        self.size * self.line_spacing
    }

    /// Height of the whole block when wrapped to `max_width`.
    pub fn measure_height(&self, metrics: &impl FontMetrics, max_width: Pt) -> Pt {
        let lines = wrap_plain(&self.text, self.font, self.size, max_width, metrics);
        self.line_height() * lines.len() as f32
    }

    pub fn render<B: RenderBackend>(&self, backend: &mut B, x: Pt, y: Pt, max_width: Pt) -> Pt {
        let lines = wrap_plain(&self.text, self.font, self.size, max_width, backend);
        let mut current_y = y;

        backend.set_fill_colour(self.colour);
        for line in lines {
            backend.begin_text();
            backend.set_font(self.font, self.size);
            backend.line_offset(x, current_y);
            backend.show_text(&line);
            backend.end_text();
            current_y = current_y - self.line_height();
        }

        current_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;

    #[test]
    fn rejects_empty_text() {
        assert!(matches!(
            SimpleText::new("", FontId(0)),
            Err(Error::MissingField("text"))
        ));
    }

    #[test]
    fn measures_wrapped_height() {
        let backend = RecordingBackend::new();
        // at size 10: "aaaa" = 20pt per word; width 25 fits one word per line
        let text = SimpleText::new("aaaa aaaa aaaa", FontId(0))
            .unwrap()
            .with_size(Pt(10.0));
        assert!((text.measure_height(&backend, Pt(25.0)) - Pt(36.0)).abs() < Pt(1e-3));
        assert!((text.measure_height(&backend, Pt(1000.0)) - Pt(12.0)).abs() < Pt(1e-3));
    }
}
