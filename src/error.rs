use crate::units::Pt;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    /// A configuration value failed validation at build time
    InvalidConfiguration(String),

    #[error("missing required field: {0}")]
    /// A component was built without a field it cannot render without
    MissingField(&'static str),

    #[error("invalid move: percentages must be within 0..=100, got ({0}, {1})")]
    /// A percent-relative cursor move was given a value outside 0..=100
    InvalidPercent(f32, f32),

    #[error("header area is not enabled in the safe area")]
    /// A header-area operation was attempted with the header band disabled
    HeaderNotEnabled,

    #[error("footer area is not enabled in the safe area")]
    /// A footer-area operation was attempted with the footer band disabled
    FooterNotEnabled,

    #[error("font is not registered: {0}")]
    /// A font name was looked up that no backend font is registered under
    FontNotRegistered(String),

    #[error("unknown standard font name: {0}")]
    /// The backend was asked for a standard font outside the 14 names
    UnknownStandardFont(String),

    #[error("list must contain at least one item")]
    /// A list was built with no items
    EmptyList,

    #[error("list has no font to render with")]
    /// A list was built without a font
    FontMissing,

    #[error("font size must be positive, got {0}")]
    /// A non-positive font size reached a validated setter
    InvalidFontSize(Pt),

    #[error("line spacing must be positive, got {0}")]
    /// A non-positive line spacing reached a validated setter
    InvalidLineSpacing(f32),

    #[error(transparent)]
    /// An I/O error from the rendering backend
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to decode an image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse a font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),
}
