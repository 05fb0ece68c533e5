mod config;
pub use config::*;

mod error;
pub use error::*;

mod metrics;
pub use metrics::*;

/// Line breaking, justification, and glyph placement
pub mod layout;

pub use layout::{layout_text, layout_text_with, measure_text, Placement, RealizedSize, TextLayout};
