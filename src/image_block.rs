use crate::backend::{FontId, ImageId, RenderBackend};
use crate::transform::Transform;
use crate::units::Pt;

/// Horizontal placement of an image (and its caption) within the
/// available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// An image block: a loaded raster image with a requested display size,
/// optional rotation about its centre, and an optional caption drawn
/// underneath, aligned to the image.
#[derive(Debug, Clone)]
pub struct ImageBlock {
    image: ImageId,
    width: f32,
    height: f32,
    rotation_degrees: f32,
    quality: f32,
    alignment: HorizontalAlignment,
    caption: Option<Caption>,
}

#[derive(Debug, Clone)]
struct Caption {
    text: String,
    font: FontId,
    size: Pt,
}

impl ImageBlock {
    /// Wrap a loaded image at its intrinsic size.
    pub fn new<B: RenderBackend>(backend: &B, image: ImageId) -> ImageBlock {
        let (width, height) = backend.image_size(image);
        ImageBlock {
            image,
            width,
            height,
            rotation_degrees: 0.0,
            quality: 0.9,
            alignment: HorizontalAlignment::Left,
            caption: None,
        }
    }

    /// Request a display width; height follows proportionally.
    pub fn with_width(mut self, width: f32) -> ImageBlock {
        let ratio = width / self.width;
        self.width = width;
        self.height *= ratio;
        self
    }

    /// Request a display height; width follows proportionally.
    pub fn with_height(mut self, height: f32) -> ImageBlock {
        let ratio = height / self.height;
        self.height = height;
        self.width *= ratio;
        self
    }

    /// Rotation in degrees, counter-clockwise, about the image centre.
    pub fn with_rotation(mut self, degrees: f32) -> ImageBlock {
        self.rotation_degrees = degrees;
        self
    }

    /// Compression quality hint, clamped to 0.0..=1.0.
    pub fn with_quality(mut self, quality: f32) -> ImageBlock {
        self.quality = quality.clamp(0.0, 1.0);
        self
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> ImageBlock {
        self.alignment = alignment;
        self
    }

    pub fn with_caption<S: Into<String>>(mut self, text: S, font: FontId) -> ImageBlock {
        self.caption = Some(Caption {
            text: text.into(),
            font,
            size: Pt(10.0),
        });
        self
    }

    pub fn with_caption_font_size(mut self, size: Pt) -> ImageBlock {
        if let Some(caption) = &mut self.caption {
            caption.size = size;
        }
        self
    }

    /// The requested display dimensions (intrinsic if never resized).
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Display width when rendered into `available_width`: the requested
    /// width, shrunk to fit.
    pub fn target_width(&self, available_width: Pt) -> Pt {
        Pt(self.width).min(available_width)
    }

    fn target_height(&self, target_width: Pt) -> Pt {
        target_width * (self.height / self.width)
    }

    /// Vertical space the block will take: image plus caption block.
    pub fn required_height(&self, available_width: Pt) -> Pt {
        let image_height = self.target_height(self.target_width(available_width));
        match &self.caption {
            Some(caption) => image_height + caption.size + Pt(15.0),
            None => image_height,
        }
    }

    /// Render with the top edge at `y`, returning the y below the block.
    pub fn render<B: RenderBackend>(
        &self,
        backend: &mut B,
        x: Pt,
        y: Pt,
        available_width: Pt,
    ) -> Pt {
        let width = self.target_width(available_width);
        let height = self.target_height(width);

        let x_pos = match self.alignment {
            HorizontalAlignment::Left => x,
            HorizontalAlignment::Center => x + (available_width - width) / 2.0,
            HorizontalAlignment::Right => x + (available_width - width),
        };

        backend.save_state();
        if self.rotation_degrees != 0.0 {
            let centre_x = x_pos + width / 2.0;
            let centre_y = y - height / 2.0;
            backend.transform(Transform::rotate_about(
                self.rotation_degrees.to_radians(),
                centre_x,
                centre_y,
            ));
        }
        backend.draw_image(self.image, x_pos, y - height, width, height);
        backend.restore_state();

        let mut new_y = y - height;

        if let Some(caption) = &self.caption {
            let caption_width = backend.text_advance(caption.font, caption.size, &caption.text);
            let caption_x = match self.alignment {
                HorizontalAlignment::Left => x_pos,
                HorizontalAlignment::Center => x_pos + (width - caption_width) / 2.0,
                HorizontalAlignment::Right => x_pos + width - caption_width,
            };

            backend.begin_text();
            backend.set_font(caption.font, caption.size);
            backend.line_offset(caption_x, new_y - caption.size - Pt(5.0));
            backend.show_text(&caption.text);
            backend.end_text();

            new_y = new_y - (caption.size + Pt(10.0));
        }

        new_y
    }
}
