use crate::backend::{FontId, FontMetrics, RenderBackend};
use crate::colour::{colours, Colour};
use crate::error::Error;
use crate::layout::break_into_lines;
use crate::style::{StyledRun, TextStyle};
use crate::units::Pt;

/// One entry of a [`List`]: either plain text styled with the list's own
/// font, or pre-styled runs. Items may carry an explicit ordinal label
/// (e.g. `"1.2."`) and child items, which render one indentation level
/// deeper with their numbering restarted.
#[derive(Debug, Clone)]
pub struct ListItem {
    content: ItemContent,
    number: Option<String>,
    children: Vec<ListItem>,
}

#[derive(Debug, Clone)]
enum ItemContent {
    Plain(String),
    Styled(Vec<StyledRun>),
}

impl ListItem {
    pub fn plain<S: Into<String>>(text: S) -> ListItem {
        ListItem {
            content: ItemContent::Plain(text.into()),
            number: None,
            children: Vec::new(),
        }
    }

    pub fn styled(runs: Vec<StyledRun>) -> ListItem {
        ListItem {
            content: ItemContent::Styled(runs),
            number: None,
            children: Vec::new(),
        }
    }

    /// Explicit ordinal label, overriding the 1-based position.
    pub fn with_number<S: Into<String>>(mut self, number: S) -> ListItem {
        self.number = Some(number.into());
        self
    }

    pub fn with_children(mut self, children: Vec<ListItem>) -> ListItem {
        self.children = children;
        self
    }

    fn runs(&self, style: TextStyle) -> Vec<StyledRun> {
        match &self.content {
            ItemContent::Plain(text) => vec![StyledRun::new(text.clone(), style)],
            ItemContent::Styled(runs) => runs.clone(),
        }
    }
}

/// Construction parameters for a [`List`]. Only `items` and `font` have
/// no usable default.
#[derive(Debug, Clone)]
pub struct ListConfig {
    pub items: Vec<ListItem>,
    pub ordered: bool,
    pub font: Option<FontId>,
    pub font_size: Pt,
    pub colour: Colour,
    /// Horizontal inset per nesting level
    pub indentation: Pt,
    /// Extra vertical gap between item lines, in points
    pub line_spacing: Pt,
    pub bullet: String,
    /// Gap between the marker and the item text
    pub bullet_spacing: Pt,
}

impl Default for ListConfig {
    fn default() -> ListConfig {
        ListConfig {
            items: Vec::new(),
            ordered: false,
            font: None,
            font_size: Pt(12.0),
            colour: colours::BLACK,
            indentation: Pt(20.0),
            line_spacing: Pt(5.0),
            bullet: "\u{2022}".to_string(),
            bullet_spacing: Pt(10.0),
        }
    }
}

/// A bulleted or numbered list with arbitrarily nested sub-lists.
#[derive(Debug, Clone)]
pub struct List {
    items: Vec<ListItem>,
    ordered: bool,
    font: FontId,
    font_size: Pt,
    colour: Colour,
    indentation: Pt,
    line_spacing: Pt,
    bullet: String,
    bullet_spacing: Pt,
}

impl List {
    pub fn new(config: ListConfig) -> Result<List, Error> {
        if config.items.is_empty() {
            return Err(Error::EmptyList);
        }
        let font = config.font.ok_or(Error::FontMissing)?;
        Ok(List {
            items: config.items,
            ordered: config.ordered,
            font,
            font_size: config.font_size,
            colour: config.colour,
            indentation: config.indentation,
            line_spacing: config.line_spacing,
            bullet: config.bullet,
            bullet_spacing: config.bullet_spacing,
        })
    }

    fn item_style(&self) -> TextStyle {
        TextStyle::new(self.font)
            .with_size(self.font_size)
            .with_colour(self.colour)
    }

    fn marker(&self, index: usize, explicit: Option<&str>) -> String {
        if !self.ordered {
            return self.bullet.clone();
        }
        match explicit {
            Some(number) => number.to_string(),
            None => format!("{index}."),
        }
    }

    fn line_step(&self) -> Pt {
        self.font_size + self.line_spacing
    }

    /// Wrap-aware height of the whole list at the given width, nested
    /// levels included. The paginator uses this before rendering.
    pub fn measure_height(&self, metrics: &impl FontMetrics, available_width: Pt) -> Pt {
        self.measure_level(metrics, available_width, &self.items, 1)
    }

    fn measure_level(
        &self,
        metrics: &impl FontMetrics,
        available_width: Pt,
        items: &[ListItem],
        level: u32,
    ) -> Pt {
        let text_width = available_width - self.indentation * level as f32 - self.bullet_spacing;
        let mut height = Pt::ZERO;
        for item in items {
            let lines = break_into_lines(&item.runs(self.item_style()), text_width, metrics);
            height = height + self.line_step() * lines.len().max(1) as f32;
            if !item.children.is_empty() {
                height = height + self.measure_level(metrics, available_width, &item.children, level + 1);
            }
        }
        height
    }

    /// Render at `(x, y)`, returning the y below the last item. `x` is
    /// the list origin; markers indent from it by `indentation * level`.
    pub fn render<B: RenderBackend>(
        &self,
        backend: &mut B,
        x: Pt,
        y: Pt,
        available_width: Pt,
    ) -> Pt {
        self.render_level(backend, x, y, available_width, &self.items, 1)
    }

    fn render_level<B: RenderBackend>(
        &self,
        backend: &mut B,
        x: Pt,
        y: Pt,
        available_width: Pt,
        items: &[ListItem],
        level: u32,
    ) -> Pt {
        let base_indent = self.indentation * level as f32;
        let bullet_x = x + base_indent;
        let text_x = bullet_x + self.bullet_spacing;
        let mut current_y = y;

        for (index, item) in items.iter().enumerate() {
            let marker = self.marker(index + 1, item.number.as_deref());
            backend.set_fill_colour(self.colour);
            backend.begin_text();
            backend.set_font(self.font, self.font_size);
            backend.line_offset(bullet_x, current_y);
            backend.show_text(&marker);
            backend.end_text();

            let text_width = available_width - base_indent - self.bullet_spacing;
            let lines = break_into_lines(&item.runs(self.item_style()), text_width, backend);

            let mut line_y = current_y;
            for line in &lines {
                let mut current_x = text_x;
                for word in &line.words {
                    let style = word.style;
                    backend.set_fill_colour(style.colour);
                    backend.begin_text();
                    backend.set_font(style.font, style.size);
                    backend.line_offset(current_x, line_y);
                    backend.show_text(&word.text);
                    backend.end_text();
                    current_x = current_x
                        + backend.text_advance(style.font, style.size, &word.text)
                        + backend.space_advance(style.font, style.size);
                }
                line_y = line_y - self.line_step();
            }
            if lines.is_empty() {
                line_y = line_y - self.line_step();
            }

            // sub-lists indent from the same origin, one level deeper
            if !item.children.is_empty() {
                line_y = self.render_level(
                    backend,
                    x,
                    line_y,
                    available_width,
                    &item.children,
                    level + 1,
                );
            }

            current_y = line_y;
        }

        current_y
    }
}
