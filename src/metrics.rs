use crate::LayoutError;
use std::collections::{BTreeMap, HashMap};

/// Scale applied by hosts that measure glyphs in points but lay text out in
/// world units. Wrap a supplier in [ScaledMetrics] to apply it.
pub const POINT_TO_WORLD_SCALE: f32 = 0.05;

/// Supplies the horizontal advance of every character the engine lays out.
///
/// The supplier must be total over the text it is asked to lay out: every
/// character present in the text (other than the `'\n'` hard break, which is
/// never measured) needs an advance. Use [GlyphMetrics::check_coverage] to
/// verify this up front. Characters without an advance are laid out with a
/// zero advance and a warning is logged.
pub trait GlyphMetrics {
    /// The advance width of `ch`, or [None] if the supplier has no glyph for it
    fn advance(&self, ch: char) -> Option<f32>;

    /// The advance width of `ch`, falling back to zero for unmapped characters
    fn advance_or_zero(&self, ch: char) -> f32 {
        match self.advance(ch) {
            Some(advance) => advance,
            None => {
                log::warn!("no glyph advance for {ch:?} (U+{:04X}), using 0", ch as u32);
                0.0
            }
        }
    }

    /// Calculate the width of a given string of text as the sum of its advances
    fn width_of_text(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.advance_or_zero(ch)).sum()
    }

    /// Verify that every character in `text` has an advance, reporting the
    /// first one that doesn't
    fn check_coverage(&self, text: &str) -> Result<(), LayoutError> {
        match text
            .chars()
            .filter(|&ch| ch != '\n')
            .find(|&ch| self.advance(ch).is_none())
        {
            Some(ch) => Err(LayoutError::UnmappedGlyph(ch)),
            None => Ok(()),
        }
    }
}

impl<M: GlyphMetrics + ?Sized> GlyphMetrics for &M {
    fn advance(&self, ch: char) -> Option<f32> {
        (**self).advance(ch)
    }
}

impl<S: std::hash::BuildHasher> GlyphMetrics for HashMap<char, f32, S> {
    fn advance(&self, ch: char) -> Option<f32> {
        self.get(&ch).copied()
    }
}

impl GlyphMetrics for BTreeMap<char, f32> {
    fn advance(&self, ch: char) -> Option<f32> {
        self.get(&ch).copied()
    }
}

/// Every character has the same advance
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MonospaceMetrics(pub f32);

impl GlyphMetrics for MonospaceMetrics {
    fn advance(&self, _ch: char) -> Option<f32> {
        Some(self.0)
    }
}

/// Adapts a closure into a glyph-metric supplier
///
/// ```
/// use glyph_layout::{FnMetrics, GlyphMetrics};
///
/// let metrics = FnMetrics(|ch: char| if ch == ' ' { Some(0.5) } else { Some(1.0) });
/// assert_eq!(metrics.width_of_text("a b"), 2.5);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct FnMetrics<F>(pub F);

impl<F: Fn(char) -> Option<f32>> GlyphMetrics for FnMetrics<F> {
    fn advance(&self, ch: char) -> Option<f32> {
        (self.0)(ch)
    }
}

/// Multiplies every advance of an inner supplier by a constant factor
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaledMetrics<M> {
    pub inner: M,
    pub scale: f32,
}

impl<M: GlyphMetrics> ScaledMetrics<M> {
    pub fn new(inner: M, scale: f32) -> ScaledMetrics<M> {
        ScaledMetrics { inner, scale }
    }

    /// Scale point-sized advances into world units using [POINT_TO_WORLD_SCALE]
    pub fn point_to_world(inner: M) -> ScaledMetrics<M> {
        ScaledMetrics::new(inner, POINT_TO_WORLD_SCALE)
    }
}

impl<M: GlyphMetrics> GlyphMetrics for ScaledMetrics<M> {
    fn advance(&self, ch: char) -> Option<f32> {
        self.inner.advance(ch).map(|advance| advance * self.scale)
    }
}

#[cfg(feature = "ttf")]
mod ttf {
    use super::GlyphMetrics;
    use crate::LayoutError;
    use owned_ttf_parser::{AsFaceRef, OwnedFace};

    /// Glyph advances read from a parsed TTF or OTF font at a fixed size
    ///
    /// Characters the font has no glyph for are measured with the font's
    /// replacement glyph (`U+FFFD`) when it has one.
    pub struct FontMetrics {
        pub face: OwnedFace,
        pub size: f32,
    }

    impl FontMetrics {
        /// Load a font from raw bytes, parsing the font and returning an error if the font
        /// could not be parsed
        pub fn load(bytes: Vec<u8>, size: f32) -> Result<FontMetrics, LayoutError> {
            let face = OwnedFace::from_vec(bytes, 0)?;
            Ok(FontMetrics { face, size })
        }

        /// Calculate the default line height of the font for the configured size
        pub fn line_height(&self) -> f32 {
            let face = self.face.as_face_ref();
            let scaling = self.size / face.units_per_em() as f32;
            scaling * (face.line_gap() as f32 + face.ascender() as f32 - face.descender() as f32)
        }
    }

    impl GlyphMetrics for FontMetrics {
        fn advance(&self, ch: char) -> Option<f32> {
            let face = self.face.as_face_ref();
            let gid = face
                .glyph_index(ch)
                .or_else(|| face.glyph_index('\u{FFFD}'))?;
            let scaling = self.size / face.units_per_em() as f32;
            face.glyph_hor_advance(gid)
                .map(|advance| scaling * advance as f32)
        }
    }
}

#[cfg(feature = "ttf")]
pub use ttf::FontMetrics;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_of_text_sums_advances() {
        let metrics: HashMap<char, f32> = [('a', 1.0), ('b', 2.0), (' ', 0.5)].into_iter().collect();
        assert_eq!(metrics.width_of_text("ab ba"), 6.5);
    }

    #[test]
    fn unmapped_glyphs_measure_as_zero() {
        let metrics: BTreeMap<char, f32> = [('a', 1.0)].into_iter().collect();
        assert_eq!(metrics.width_of_text("aza"), 2.0);
    }

    #[test]
    fn coverage_reports_first_unmapped_glyph() {
        let metrics: HashMap<char, f32> = [('a', 1.0), (' ', 1.0)].into_iter().collect();
        assert_eq!(metrics.check_coverage("a a\na"), Ok(()));
        assert_eq!(
            metrics.check_coverage("a xy"),
            Err(LayoutError::UnmappedGlyph('x'))
        );
    }

    #[test]
    fn scaled_metrics_multiply_advances() {
        let metrics = ScaledMetrics::point_to_world(MonospaceMetrics(20.0));
        assert_eq!(metrics.advance('q'), Some(1.0));
    }
}
