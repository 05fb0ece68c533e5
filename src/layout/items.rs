use crate::GlyphMetrics;
use derive_more::{Add, AddAssign, Sub, SubAssign};

/// Characters that separate words. `'\n'` is not among them: it is a hard
/// break and never reaches the item builder.
pub const WORD_DELIMITERS: [char; 4] = [' ', '\t', '\u{000B}', '\r'];

/// Stretch given to the glue that finishes every paragraph, large enough that
/// a paragraph's last line can always be filled out to the target width
pub const FILL_STRETCH: f32 = 10_000.0;

pub(crate) fn is_word_delimiter(ch: char) -> bool {
    WORD_DELIMITERS.contains(&ch)
}

/// The cost of breaking a line at a [Item::Penalty]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PenaltyCost {
    /// An optional break; positive costs discourage breaking here, negative
    /// costs encourage it
    Finite(f32),
    /// Never break here
    Forbidden,
    /// Always break here (end of paragraph)
    Forced,
}

/// A unit of a paragraph as seen by the line breaker
#[derive(Debug, Clone, PartialEq)]
pub enum Item<'a> {
    /// Unbreakable content, typically a word
    Box { width: f32, text: &'a str },
    /// Elastic, breakable space between boxes
    Glue {
        width: f32,
        stretch: f32,
        shrink: f32,
        text: &'a str,
    },
    /// A candidate (or forced, or forbidden) break. `width` is only added to
    /// the line when the break is taken.
    Penalty {
        width: f32,
        cost: PenaltyCost,
        flagged: bool,
    },
}

impl<'a> Item<'a> {
    pub fn is_box(&self) -> bool {
        matches!(self, Item::Box { .. })
    }

    pub fn is_forced_break(&self) -> bool {
        matches!(
            self,
            Item::Penalty {
                cost: PenaltyCost::Forced,
                ..
            }
        )
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, Item::Penalty { flagged: true, .. })
    }

    /// The text the item contributes to a line when laid out
    pub fn text(&self) -> &'a str {
        match self {
            Item::Box { text, .. } | Item::Glue { text, .. } => *text,
            Item::Penalty { .. } => "",
        }
    }
}

/// Running totals of width, stretch and shrink over a run of items
#[derive(Debug, Default, Copy, Clone, PartialEq, Add, AddAssign, Sub, SubAssign)]
pub struct Sum {
    pub width: f32,
    pub stretch: f32,
    pub shrink: f32,
}

impl Sum {
    pub fn new(width: f32, stretch: f32, shrink: f32) -> Sum {
        Sum {
            width,
            stretch,
            shrink,
        }
    }

    /// The contribution of `item` to a running sum; penalties contribute nothing
    /// until a break is taken at them
    pub fn of(item: &Item) -> Sum {
        match *item {
            Item::Box { width, .. } => Sum::new(width, 0.0, 0.0),
            Item::Glue {
                width,
                stretch,
                shrink,
                ..
            } => Sum::new(width, stretch, shrink),
            Item::Penalty { .. } => Sum::default(),
        }
    }
}

/// The nominal width and elasticity of inter-word spaces
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpaceGlue {
    pub width: f32,
    pub stretch: f32,
    pub shrink: f32,
}

impl SpaceGlue {
    /// Inter-word glue sized from the advance of a single space: spaces may
    /// stretch by half their width and shrink by a third of it
    pub fn from_metrics<M: GlyphMetrics + ?Sized>(metrics: &M) -> SpaceGlue {
        let width = metrics.advance_or_zero(' ');
        SpaceGlue {
            width,
            stretch: (width * 3.0) / 6.0,
            shrink: (width * 3.0) / 9.0,
        }
    }
}

/// Split a paragraph (text without hard breaks) into words
pub fn split_words(paragraph: &str) -> impl Iterator<Item = &str> {
    paragraph
        .split(is_word_delimiter)
        .filter(|word| !word.is_empty())
}

/// Build the item sequence for one paragraph: a box per word, inter-word glue
/// between words, and the finishing sequence (a forbidden penalty, fill glue
/// and the forced break) after the last word.
///
/// Runs of whitespace collapse to a single space glue. The paragraph must not
/// contain `'\n'`.
pub fn paragraph_items<'a, M: GlyphMetrics + ?Sized>(
    paragraph: &'a str,
    metrics: &M,
    space: SpaceGlue,
) -> Vec<Item<'a>> {
    let mut items: Vec<Item<'a>> = Vec::new();
    for word in split_words(paragraph) {
        if !items.is_empty() {
            items.push(Item::Glue {
                width: space.width,
                stretch: space.stretch,
                shrink: space.shrink,
                text: " ",
            });
        }
        items.push(Item::Box {
            width: metrics.width_of_text(word),
            text: word,
        });
    }
    finish_paragraph(&mut items);
    items
}

/// Append the sequence that ends every paragraph
pub fn finish_paragraph(items: &mut Vec<Item<'_>>) {
    items.push(Item::Penalty {
        width: 0.0,
        cost: PenaltyCost::Forbidden,
        flagged: false,
    });
    items.push(Item::Glue {
        width: 0.0,
        stretch: FILL_STRETCH,
        shrink: 0.0,
        text: "",
    });
    items.push(Item::Penalty {
        width: 0.0,
        cost: PenaltyCost::Forced,
        flagged: true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonospaceMetrics;

    #[test]
    fn words_become_boxes_separated_by_glue() {
        let metrics = MonospaceMetrics(1.0);
        let space = SpaceGlue::from_metrics(&metrics);
        let items = paragraph_items("ab  cde\tf", &metrics, space);

        let boxes: Vec<(&str, f32)> = items
            .iter()
            .filter_map(|item| match item {
                Item::Box { width, text } => Some((*text, *width)),
                _ => None,
            })
            .collect();
        assert_eq!(boxes, vec![("ab", 2.0), ("cde", 3.0), ("f", 1.0)]);

        assert!(matches!(
            items[1],
            Item::Glue {
                width,
                stretch,
                shrink,
                ..
            } if width == 1.0 && stretch == 0.5 && (shrink - 1.0 / 3.0).abs() < 1e-6
        ));
    }

    #[test]
    fn every_paragraph_ends_with_the_finishing_sequence() {
        let metrics = MonospaceMetrics(1.0);
        let items = paragraph_items("word", &metrics, SpaceGlue::from_metrics(&metrics));
        assert_eq!(items.len(), 4);
        assert!(matches!(
            items[1],
            Item::Penalty {
                cost: PenaltyCost::Forbidden,
                ..
            }
        ));
        assert!(matches!(items[2], Item::Glue { stretch, .. } if stretch == FILL_STRETCH));
        assert!(items[3].is_forced_break());
        assert_eq!(items.iter().filter(|item| item.is_forced_break()).count(), 1);
    }

    #[test]
    fn sums_subtract_componentwise() {
        let a = Sum::new(10.0, 3.0, 1.0);
        let b = Sum::new(4.0, 1.0, 0.5);
        assert_eq!(a - b, Sum::new(6.0, 2.0, 0.5));
        let mut c = b;
        c += Sum::of(&Item::Box { width: 2.0, text: "xy" });
        assert_eq!(c, Sum::new(6.0, 1.0, 0.5));
    }
}
