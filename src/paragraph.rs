use crate::backend::{FontMetrics, RenderBackend};
use crate::error::Error;
use crate::layout::break_into_lines;
use crate::style::{StyledRun, TextAlignment, TextStyle};
use crate::units::Pt;

/// A paragraph of styled runs with one of four alignments, wrapped to
/// the width it is rendered into.
#[derive(Debug, Clone)]
pub struct Paragraph {
    runs: Vec<StyledRun>,
    alignment: TextAlignment,
    line_spacing: f32,
}

impl Paragraph {
    /// Build a paragraph from at least one styled run.
    pub fn new(runs: Vec<StyledRun>) -> Result<Paragraph, Error> {
        if runs.is_empty() {
            return Err(Error::MissingField("runs"));
        }
        Ok(Paragraph {
            runs,
            alignment: TextAlignment::Left,
            line_spacing: 1.2,
        })
    }

    /// Convenience constructor for a single-style paragraph.
    pub fn from_text<S: Into<String>>(text: S, style: TextStyle) -> Result<Paragraph, Error> {
        Paragraph::new(vec![StyledRun::new(text, style)])
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Paragraph {
        self.alignment = alignment;
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f32) -> Paragraph {
        self.line_spacing = line_spacing;
        self
    }

    /// Height of one line: the first run's font size times the spacing
    /// multiplier.
    pub fn line_height(&self) -> Pt {
        self.runs[0].style.size * self.line_spacing
    }

    /// Pre-measured height used by the paginator: the line count at
    /// unbounded width (so a single line for break-free input) times the
    /// line height.
    pub fn calculate_height(&self, metrics: &impl FontMetrics) -> Pt {
        let lines = break_into_lines(&self.runs, Pt(f32::MAX), metrics);
        self.line_height() * lines.len() as f32
    }

    /// Render at `(x, y)` within `max_width`, returning the y below the
    /// last line.
    pub fn render<B: RenderBackend>(&self, backend: &mut B, x: Pt, y: Pt, max_width: Pt) -> Pt {
        let lines = break_into_lines(&self.runs, max_width, backend);
        let line_count = lines.len();
        let mut current_y = y;

        for (index, line) in lines.iter().enumerate() {
            let word_count = line.words.len();
            let first = line.words[0].style;
            let natural_space = backend.space_advance(first.font, first.size);

            // non-terminal justified lines with at least two words
            // stretch their gaps to land exactly on the right edge
            let justified =
                self.alignment == TextAlignment::Justified && index + 1 < line_count && word_count >= 2;
            let gap = if justified {
                (max_width - line.words_width(backend)) / (word_count - 1) as f32
            } else {
                natural_space
            };

            let line_width = line.natural_width(backend);
            let start_x = match self.alignment {
                TextAlignment::Left | TextAlignment::Justified => x,
                TextAlignment::Center => x + (max_width - line_width) / 2.0,
                TextAlignment::Right => x + (max_width - line_width),
            };

            let mut current_x = start_x;
            for word in &line.words {
                let style = word.style;
                backend.set_fill_colour(style.colour);
                backend.begin_text();
                backend.set_font(style.font, style.size);
                backend.line_offset(current_x, current_y);
                backend.show_text(&word.text);
                backend.end_text();

                let advance = backend.text_advance(style.font, style.size, &word.text);
                if style.underline {
                    backend.set_line_width(style.underline_thickness);
                    backend.move_to(current_x, current_y + style.underline_offset);
                    backend.line_to(current_x + advance, current_y + style.underline_offset);
                    backend.stroke();
                }

                current_x = current_x + advance + gap;
            }

            current_y = current_y - self.line_height();
        }

        current_y
    }
}
