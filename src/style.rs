use crate::backend::FontId;
use crate::colour::{colours, Colour};
use crate::units::Pt;

/// Formatting for a span of text: font, size, colour, and optional
/// underline parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontId,
    pub size: Pt,
    pub colour: Colour,
    pub underline: bool,
    pub underline_thickness: Pt,
    /// Offset of the underline from the baseline; negative is below.
    pub underline_offset: Pt,
}

impl TextStyle {
    pub fn new(font: FontId) -> TextStyle {
        TextStyle {
            font,
            size: Pt(12.0),
            colour: colours::BLACK,
            underline: false,
            underline_thickness: Pt(0.5),
            underline_offset: Pt(-2.5),
        }
    }

    pub fn with_size(mut self, size: Pt) -> TextStyle {
        self.size = size;
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> TextStyle {
        self.colour = colour;
        self
    }

    pub fn with_underline(mut self, underline: bool) -> TextStyle {
        self.underline = underline;
        self
    }

    pub fn with_underline_thickness(mut self, thickness: Pt) -> TextStyle {
        self.underline_thickness = thickness;
        self
    }

    pub fn with_underline_offset(mut self, offset: Pt) -> TextStyle {
        self.underline_offset = offset;
        self
    }
}

/// A contiguous span of text carrying a single style. The text must not
/// contain line breaks — breaking lines is the layout engine's job.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub style: TextStyle,
}

impl StyledRun {
    pub fn new<S: Into<String>>(text: S, style: TextStyle) -> StyledRun {
        StyledRun {
            text: text.into(),
            style,
        }
    }
}

/// Horizontal alignment for paragraph-like blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch inter-word spacing so non-terminal lines fill the full
    /// width. Falls back to `Left` where justification is meaningless
    /// (page numbers, single-word lines, the last line).
    Justified,
}

/// Heading levels with their default font size and vertical spacing, in
/// points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn font_size(&self) -> Pt {
        match self {
            HeadingLevel::H1 => Pt(24.0),
            HeadingLevel::H2 => Pt(20.0),
            HeadingLevel::H3 => Pt(16.0),
            HeadingLevel::H4 => Pt(14.0),
            HeadingLevel::H5 => Pt(12.0),
            HeadingLevel::H6 => Pt(11.0),
        }
    }

    pub fn spacing_before(&self) -> Pt {
        match self {
            HeadingLevel::H1 => Pt(30.0),
            HeadingLevel::H2 => Pt(25.0),
            HeadingLevel::H3 => Pt(20.0),
            HeadingLevel::H4 => Pt(16.0),
            HeadingLevel::H5 => Pt(14.0),
            HeadingLevel::H6 => Pt(12.0),
        }
    }

    pub fn spacing_after(&self) -> Pt {
        match self {
            HeadingLevel::H1 => Pt(20.0),
            HeadingLevel::H2 => Pt(15.0),
            HeadingLevel::H3 => Pt(12.0),
            HeadingLevel::H4 => Pt(10.0),
            HeadingLevel::H5 => Pt(8.0),
            HeadingLevel::H6 => Pt(6.0),
        }
    }
}
