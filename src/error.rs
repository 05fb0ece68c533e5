use thiserror::Error;

/// All errors that the crate can generate
///
/// Layout itself never fails once the configuration is valid: paragraphs that
/// cannot be justified fall back to word wrapping, oversized words overflow
/// their line, and text past the line budget is dropped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("line height must be finite and greater than zero, got {0}")]
    /// The configured line height can't be used to stack lines
    InvalidLineHeight(f32),

    #[error("{name} must be finite and non-negative, got {value}")]
    /// One of the bounding dimensions is negative, infinite or NaN
    InvalidDimension { name: &'static str, value: f32 },

    #[error("no advance width is available for {0:?}")]
    /// The glyph-metric supplier has no entry for a character in the text
    UnmappedGlyph(char),

    #[cfg(feature = "ttf")]
    #[error("failed to parse font face: {0}")]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),
}
