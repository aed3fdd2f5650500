use crate::backend::{FontId, ImageId, RenderBackend};
use crate::colour::{colours, Colour};
use crate::units::Pt;

/// Visual parameters for a [`Logo`] band.
#[derive(Debug, Clone)]
pub struct LogoStyle {
    pub font: FontId,
    pub font_size: Pt,
    pub colour: Colour,
    pub image_width: Pt,
    pub image_height: Pt,
    /// Gap between a side image and the page margin
    pub image_margin: Pt,
    pub maintain_aspect_ratio: bool,
    pub margin_bottom: Pt,
    pub line: bool,
    pub line_width: Pt,
    pub line_colour: Colour,
}

impl LogoStyle {
    pub fn new(font: FontId) -> LogoStyle {
        LogoStyle {
            font,
            font_size: Pt(12.0),
            colour: colours::BLACK,
            image_width: Pt(30.0),
            image_height: Pt(30.0),
            image_margin: Pt(10.0),
            maintain_aspect_ratio: true,
            margin_bottom: Pt(20.0),
            line: true,
            line_width: Pt(1.0),
            line_colour: colours::MID_GREY,
        }
    }

    pub fn with_font_size(mut self, size: Pt) -> LogoStyle {
        self.font_size = size;
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> LogoStyle {
        self.colour = colour;
        self
    }

    pub fn with_image_size(mut self, width: Pt, height: Pt) -> LogoStyle {
        self.image_width = width;
        self.image_height = height;
        self
    }

    pub fn with_image_margin(mut self, margin: Pt) -> LogoStyle {
        self.image_margin = margin;
        self
    }

    pub fn with_maintain_aspect_ratio(mut self, maintain: bool) -> LogoStyle {
        self.maintain_aspect_ratio = maintain;
        self
    }

    pub fn with_margin_bottom(mut self, margin: Pt) -> LogoStyle {
        self.margin_bottom = margin;
        self
    }

    pub fn with_line(mut self, line: bool) -> LogoStyle {
        self.line = line;
        self
    }

    pub fn with_line_width(mut self, width: Pt) -> LogoStyle {
        self.line_width = width;
        self
    }

    pub fn with_line_colour(mut self, colour: Colour) -> LogoStyle {
        self.line_colour = colour;
        self
    }
}

/// A repeating band at the top of each page: a centred title with
/// optional images at the margins and an optional separator rule.
#[derive(Debug, Clone)]
pub struct Logo {
    title: String,
    style: LogoStyle,
    left_image: Option<ImageId>,
    right_image: Option<ImageId>,
}

impl Logo {
    pub fn new<S: Into<String>>(title: S, style: LogoStyle) -> Logo {
        Logo {
            title: title.into(),
            style,
            left_image: None,
            right_image: None,
        }
    }

    pub fn with_left_image(mut self, image: ImageId) -> Logo {
        self.left_image = Some(image);
        self
    }

    pub fn with_right_image(mut self, image: ImageId) -> Logo {
        self.right_image = Some(image);
        self
    }

    /// Vertical space the band consumes: the taller of the title and the
    /// images, the bottom margin, and the separator's allowance.
    pub fn total_height(&self) -> Pt {
        let base = self.style.font_size.max(self.style.image_height);
        let line = if self.style.line {
            self.style.line_width + Pt(10.0)
        } else {
            Pt::ZERO
        };
        base + self.style.margin_bottom + line
    }

    /// Side-image display size, honouring the aspect-ratio flag.
    fn image_dimensions<B: RenderBackend>(&self, backend: &B, image: ImageId) -> (Pt, Pt) {
        let mut width = self.style.image_width;
        let mut height = self.style.image_height;
        if self.style.maintain_aspect_ratio {
            let (iw, ih) = backend.image_size(image);
            let ratio = ih / iw;
            if width > Pt::ZERO {
                height = width * ratio;
            } else if height > Pt::ZERO {
                width = height / ratio;
            }
        }
        (width, height)
    }

    /// Render the band with its baseline at `y`.
    pub fn render<B: RenderBackend>(
        &self,
        backend: &mut B,
        page_width: Pt,
        y: Pt,
        margin_left: Pt,
        margin_right: Pt,
    ) {
        let content_width = page_width - margin_left - margin_right;
        let line_y = y - self.style.font_size / 2.0 - Pt(5.0);

        if let Some(image) = self.left_image {
            let (width, height) = self.image_dimensions(backend, image);
            let image_x = margin_left + self.style.image_margin;
            let image_y = y - self.style.image_height + self.style.font_size / 2.0;
            backend.draw_image(image, image_x, image_y, width, height);
        }

        let text_width = backend.text_advance(self.style.font, self.style.font_size, &self.title);
        let text_x = margin_left + (content_width - text_width) / 2.0;
        backend.set_fill_colour(self.style.colour);
        backend.begin_text();
        backend.set_font(self.style.font, self.style.font_size);
        backend.line_offset(text_x, y);
        backend.show_text(&self.title);
        backend.end_text();

        if let Some(image) = self.right_image {
            let (width, height) = self.image_dimensions(backend, image);
            let image_x = page_width - margin_right - self.style.image_width - self.style.image_margin;
            let image_y = y - self.style.image_height + self.style.font_size / 2.0;
            backend.draw_image(image, image_x, image_y, width, height);
        }

        if self.style.line {
            backend.set_stroke_colour(self.style.line_colour);
            backend.set_line_width(self.style.line_width);
            backend.move_to(margin_left, line_y);
            backend.line_to(page_width - margin_right, line_y);
            backend.stroke();
        }
    }
}
