/// One line of laid out text, as produced by any of the break policies
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Multiplier applied to the advance of every space on the line; 1.0 sets
    /// spaces at their natural width
    pub spacing_ratio: f32,
}

impl Line {
    /// A line whose spaces keep their natural width
    pub fn new<S: Into<String>>(text: S) -> Line {
        Line {
            text: text.into(),
            spacing_ratio: 1.0,
        }
    }

    /// A line whose spaces are stretched (ratio > 1) or shrunk (ratio < 1)
    pub fn justified<S: Into<String>>(text: S, spacing_ratio: f32) -> Line {
        Line {
            text: text.into(),
            spacing_ratio,
        }
    }

    /// The advance of `ch` on this line, with spaces scaled by the spacing ratio
    pub(crate) fn scaled_advance(&self, ch: char, advance: f32) -> f32 {
        if ch == ' ' {
            advance * self.spacing_ratio
        } else {
            advance
        }
    }
}
