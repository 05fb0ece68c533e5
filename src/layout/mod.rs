//! Breaking text into lines and positioning its glyphs within a box.
//!
//! Layout happens in two stages. First [`break_lines`](crate::layout::break_lines)
//! divides the text into [`Line`](crate::layout::Line)s using the config's
//! [`BreakPolicy`](crate::BreakPolicy):
//!
//! - [`wrap_by_words`](crate::layout::wrap_by_words) - greedy wrapping that keeps words whole
//! - [`wrap_by_chars`](crate::layout::wrap_by_chars) - greedy wrapping that splits words anywhere
//! - [`wrap_by_newlines`](crate::layout::wrap_by_newlines) - breaks only where the text does
//! - [`justify`](crate::layout::justify) - Knuth-Plass breaking with stretched inter-word spacing
//!
//! Then [`format_and_build`](crate::layout::format_and_build) aligns each line and
//! hands every glyph's position to a callback.
//! [`layout_text`](crate::layout::layout_text) does both and collects the result.
//!
//! The lower level pieces of the justifier ([`Item`](crate::layout::Item)s and the
//! [`KnuthPlass`](crate::layout::KnuthPlass) search) are public too, for callers
//! that want to build their own item lists.
//!
//! # Example
//!
//! ```
//! use glyph_layout::{BreakPolicy, HorizontalAlignment, LayoutConfig, MonospaceMetrics};
//! use glyph_layout::layout::layout_text;
//!
//! let config = LayoutConfig::new(20.0, 10.0)
//!     .with_break_policy(BreakPolicy::Justify)
//!     .with_horizontal_alignment(HorizontalAlignment::Left);
//! let metrics = MonospaceMetrics(1.0);
//!
//! let layout = layout_text(
//!     "The quick brown fox jumps over the lazy dog and keeps on running.",
//!     &config,
//!     &metrics,
//! )
//! .expect("config is valid");
//!
//! assert!(layout.lines.len() > 1);
//! assert_eq!(layout.lines.last().map(|line| line.spacing_ratio), Some(1.0));
//! assert_eq!(layout.size.height, layout.lines.len() as f32);
//! ```

mod items;
mod justify;
mod knuth_plass;
mod line;
mod text;
mod wrap;

pub use items::*;
pub use justify::*;
pub use knuth_plass::*;
pub use line::*;
pub use text::*;
pub use wrap::*;
