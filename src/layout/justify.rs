use super::items::{paragraph_items, Item, SpaceGlue};
use super::knuth_plass::{Break, KnuthPlass};
use super::line::Line;
use super::wrap::{divide_into_paragraphs, wrap_by_words};
use crate::{GlyphMetrics, LayoutConfig};

/// Tolerances tried in turn until a paragraph can be justified
pub const JUSTIFICATION_TOLERANCES: [f32; 3] = [2.0, 3.0, 4.0];

/// Break text into justified lines.
///
/// Each paragraph is broken with [KnuthPlass], retrying at each of
/// [JUSTIFICATION_TOLERANCES] until a set of breaks is found. Every line but
/// the paragraph's last then gets the spacing ratio that stretches (or
/// shrinks) its spaces to fill `max_width` exactly; last lines keep natural
/// spacing. Paragraphs that can't be justified at any tolerance (usually
/// because of a word wider than the line) are word wrapped instead.
///
/// Runs of whitespace between words collapse to a single space. The result is
/// cut to the config's [line budget](LayoutConfig::line_budget).
pub fn justify<M: GlyphMetrics + ?Sized>(
    text: &str,
    config: &LayoutConfig,
    metrics: &M,
) -> Vec<Line> {
    let space = SpaceGlue::from_metrics(metrics);
    let line_widths = [config.max_width];
    let budget = config.line_budget();

    let mut lines: Vec<Line> = Vec::new();
    for paragraph in divide_into_paragraphs(text) {
        if budget.is_some_and(|budget| lines.len() >= budget) {
            break;
        }

        if paragraph.is_empty() {
            lines.push(Line::new(""));
            continue;
        }

        let items = paragraph_items(paragraph, metrics, space);
        let breaks = JUSTIFICATION_TOLERANCES.iter().find_map(|&tolerance| {
            let breaks = KnuthPlass::new(&items, &line_widths)
                .with_tolerance(tolerance)
                .run();
            (!breaks.is_empty()).then_some(breaks)
        });

        match breaks {
            Some(breaks) => {
                lines.extend(justified_lines(&items, &breaks, config.max_width, space, metrics))
            }
            None => {
                log::info!(
                    "failed to justify paragraph using tolerances {} through {}, falling back to word wrapping",
                    JUSTIFICATION_TOLERANCES[0],
                    JUSTIFICATION_TOLERANCES[JUSTIFICATION_TOLERANCES.len() - 1]
                );
                lines.extend(wrap_by_words(paragraph, config, metrics));
            }
        }
    }

    if let Some(budget) = budget {
        lines.truncate(budget);
    }
    lines
}

/// Slice a paragraph's items at the chosen breaks and work out each line's
/// spacing ratio
fn justified_lines<M: GlyphMetrics + ?Sized>(
    items: &[Item],
    breaks: &[Break],
    target_width: f32,
    space: SpaceGlue,
    metrics: &M,
) -> Vec<Line> {
    let mut lines = Vec::with_capacity(breaks.len());
    let mut start = 0;

    for (index, b) in breaks.iter().enumerate() {
        // glue discarded at the previous break doesn't start this line
        let first = items[start..b.position]
            .iter()
            .position(Item::is_box)
            .map_or(b.position, |offset| start + offset);
        let on_line = &items[first..b.position];

        let text: String = on_line.iter().map(Item::text).collect();
        let spaces = on_line
            .iter()
            .filter(|item| matches!(item, Item::Glue { text: " ", .. }))
            .count();
        let is_last = index + 1 == breaks.len();

        if is_last || spaces == 0 || space.width <= 0.0 {
            lines.push(Line::new(text));
        } else {
            let text_width = metrics.width_of_text(&text);
            let ratio = 1.0 + (target_width - text_width) / (spaces as f32 * space.width);
            lines.push(Line::justified(text, ratio));
        }

        start = b.position + 1;
    }

    lines
}
