use crate::backend::{FontId, FontMetrics, RenderBackend};
use crate::colour::{colours, Colour};
use crate::layout::wrap_cell;
use crate::units::Pt;

/// Horizontal padding inside a cell, per side
const CELL_PADDING_X: Pt = Pt(5.0);
/// Vertical padding added around the tallest wrapped cell of a row
const CELL_PADDING_Y: Pt = Pt(20.0);

/// A rectangular grid of text cells with fixed column widths, wrapped
/// cell content, and an optional styled header row (the first data row).
///
/// Rows shorter than the column count are truncated to it, never padded.
/// When the columns are wider than the space the table is rendered into,
/// all widths are scaled down uniformly to fit.
#[derive(Debug, Clone)]
pub struct Table {
    data: Vec<Vec<String>>,
    column_widths: Vec<Pt>,
    row_height: Pt,
    font: FontId,
    font_size: Pt,
    text_colour: Colour,
    border_colour: Colour,
    border_width: Pt,
    draw_header: bool,
    header_background: Option<Colour>,
    header_text_colour: Colour,
}

impl Table {
    pub fn new(data: Vec<Vec<String>>, column_widths: Vec<Pt>, font: FontId) -> Table {
        Table {
            data,
            column_widths,
            row_height: Pt(20.0),
            font,
            font_size: Pt(12.0),
            text_colour: colours::BLACK,
            border_colour: colours::BLACK,
            border_width: Pt(0.5),
            draw_header: true,
            header_background: Some(colours::LIGHT_GREY),
            header_text_colour: colours::BLACK,
        }
    }

    /// Minimum height of every row; rows grow past it when cells wrap.
    pub fn with_row_height(mut self, height: Pt) -> Table {
        self.row_height = height;
        self
    }

    pub fn with_font_size(mut self, size: Pt) -> Table {
        self.font_size = size;
        self
    }

    pub fn with_text_colour(mut self, colour: Colour) -> Table {
        self.text_colour = colour;
        self
    }

    pub fn with_border_colour(mut self, colour: Colour) -> Table {
        self.border_colour = colour;
        self
    }

    pub fn with_border_width(mut self, width: Pt) -> Table {
        self.border_width = width;
        self
    }

    /// Treat the first row as a header (on by default).
    pub fn with_header(mut self, draw_header: bool) -> Table {
        self.draw_header = draw_header;
        self
    }

    pub fn with_header_background(mut self, colour: Option<Colour>) -> Table {
        self.header_background = colour;
        self
    }

    pub fn with_header_text_colour(mut self, colour: Colour) -> Table {
        self.header_text_colour = colour;
        self
    }

    /// Column widths scaled down uniformly when their sum exceeds the
    /// available width; unchanged otherwise.
    fn adjusted_widths(&self, available_width: Pt) -> Vec<Pt> {
        let total: Pt = self.column_widths.iter().copied().sum();
        if total > available_width && *total > 0.0 {
            let scale = *available_width / *total;
            self.column_widths.iter().map(|&w| w * scale).collect()
        } else {
            self.column_widths.clone()
        }
    }

    fn wrap_row(
        &self,
        metrics: &impl FontMetrics,
        row: &[String],
        widths: &[Pt],
    ) -> Vec<Vec<String>> {
        row.iter()
            .take(widths.len())
            .enumerate()
            .map(|(column, cell)| {
                let max = widths[column] - CELL_PADDING_X * 2.0;
                wrap_cell(cell, self.font, self.font_size, max, metrics)
            })
            .collect()
    }

    fn row_render_height(&self, wrapped: &[Vec<String>]) -> Pt {
        let tallest = wrapped
            .iter()
            .map(|lines| self.font_size * lines.len() as f32)
            .fold(Pt::ZERO, Pt::max);
        self.row_height.max(tallest + CELL_PADDING_Y)
    }

    /// Quick lower-bound estimate: every row at its base height, plus
    /// border contributions. Cells that wrap can render taller; use
    /// [`measure_height`](Table::measure_height) for the exact value.
    pub fn calculate_height(&self) -> Pt {
        let rows = self.data.len() as f32;
        let mut height = self.row_height * rows;
        if self.border_width > Pt::ZERO {
            height = height + self.border_width * rows;
        }
        height
    }

    /// Exact height at the given width: wraps every cell the same way
    /// rendering will.
    pub fn measure_height(&self, metrics: &impl FontMetrics, available_width: Pt) -> Pt {
        let widths = self.adjusted_widths(available_width);
        self.data
            .iter()
            .map(|row| self.row_render_height(&self.wrap_row(metrics, row, &widths)))
            .sum()
    }

    /// Render at `(x, y)`, returning the y below the last row.
    pub fn render<B: RenderBackend>(
        &self,
        backend: &mut B,
        x: Pt,
        y: Pt,
        available_width: Pt,
    ) -> Pt {
        let widths = self.adjusted_widths(available_width);
        let mut current_y = y;

        for (index, row) in self.data.iter().enumerate() {
            let is_header = index == 0 && self.draw_header;
            current_y = self.draw_row(backend, row, x, current_y, is_header, &widths);
        }

        current_y
    }

    fn draw_row<B: RenderBackend>(
        &self,
        backend: &mut B,
        row: &[String],
        x: Pt,
        y: Pt,
        is_header: bool,
        widths: &[Pt],
    ) -> Pt {
        let table_width: Pt = widths.iter().copied().sum();
        let wrapped = self.wrap_row(backend, row, widths);
        let row_height = self.row_render_height(&wrapped);
        let text_colour = if is_header {
            self.header_text_colour
        } else {
            self.text_colour
        };

        if is_header {
            if let Some(background) = self.header_background {
                backend.set_fill_colour(background);
                backend.rect(x, y - row_height, table_width, row_height);
                backend.fill();
            }
        }

        let mut current_x = x;
        for (column, lines) in wrapped.iter().enumerate() {
            let column_width = widths[column];

            backend.set_stroke_colour(self.border_colour);
            backend.set_line_width(self.border_width);
            backend.rect(current_x, y - row_height, column_width, row_height);
            backend.stroke();

            // centre the line stack vertically, each line horizontally
            let text_height = self.font_size * lines.len() as f32;
            let start_y = y - row_height + (row_height - text_height) / 2.0;

            for (line_index, line) in lines.iter().enumerate() {
                let text_width = backend.text_advance(self.font, self.font_size, line);
                let text_x = current_x + (column_width - text_width) / 2.0;
                let text_y = start_y + self.font_size * (lines.len() - 1 - line_index) as f32;

                backend.set_fill_colour(text_colour);
                backend.begin_text();
                backend.set_font(self.font, self.font_size);
                backend.line_offset(text_x, text_y);
                backend.show_text(line);
                backend.end_text();
            }

            current_x = current_x + column_width;
        }

        y - row_height
    }
}
