use super::justify::justify;
use super::line::Line;
use super::wrap::{wrap_by_chars, wrap_by_newlines, wrap_by_words};
use crate::{BreakPolicy, GlyphMetrics, HorizontalAlignment, LayoutConfig, LayoutError, VerticalAlignment};

/// A glyph positioned by the layout. `(x, y)` is the glyph's pen position on
/// its line's baseline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub glyph: char,
    pub x: f32,
    pub y: f32,
}

/// The size actually covered by laid out text, as opposed to the size of the
/// box it was laid out in
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct RealizedSize {
    /// Width of the widest line
    pub width: f32,
    /// Number of lines times the line height
    pub height: f32,
}

/// The complete result of laying out a piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<Line>,
    /// Every glyph of every line, in reading order
    pub placements: Vec<Placement>,
    pub size: RealizedSize,
}

/// Divide text into lines according to the config's [BreakPolicy]
pub fn break_lines<M: GlyphMetrics + ?Sized>(
    text: &str,
    config: &LayoutConfig,
    metrics: &M,
) -> Result<Vec<Line>, LayoutError> {
    config.validate()?;
    let lines = match config.break_policy {
        BreakPolicy::WordWrap => wrap_by_words(text, config, metrics),
        BreakPolicy::CharWrap => wrap_by_chars(text, config, metrics),
        BreakPolicy::NewlineOnly => wrap_by_newlines(text, config, metrics),
        BreakPolicy::Justify => justify(text, config, metrics),
    };
    log::debug!(
        "broke {} chars into {} lines ({}, max width {})",
        text.len(),
        lines.len(),
        config.break_policy,
        config.max_width
    );
    Ok(lines)
}

/// The width of a line as drawn, with spaces scaled by its spacing ratio
pub fn line_width<M: GlyphMetrics + ?Sized>(line: &Line, metrics: &M) -> f32 {
    line.text
        .chars()
        .map(|ch| line.scaled_advance(ch, metrics.advance_or_zero(ch)))
        .sum()
}

/// Position every glyph of the given lines within the config's box, calling
/// `place` with each glyph and its coordinates in reading order.
///
/// The box is centred on the origin with y growing upwards. Lines are stacked
/// `line_height` apart starting from the position the vertical alignment gives
/// the first line; each line starts where the horizontal alignment puts it.
/// Spaces advance by their natural width times the line's spacing ratio.
///
/// Returns the width of the widest line and the total height of the lines.
pub fn format_and_build<M, F>(
    lines: &[Line],
    config: &LayoutConfig,
    metrics: &M,
    mut place: F,
) -> RealizedSize
where
    M: GlyphMetrics + ?Sized,
    F: FnMut(char, f32, f32),
{
    let width = config.max_width;
    let height = config.max_height;
    let line_height = config.line_height;
    let total_height = lines.len() as f32 * line_height;

    let mut y = match config.vertical_alignment {
        VerticalAlignment::Top => height / 2.0 - line_height,
        VerticalAlignment::Bottom => -height / 2.0 + total_height - line_height,
        VerticalAlignment::Center => total_height / 2.0 - line_height / 2.0,
    };

    let mut realized = RealizedSize {
        width: 0.0,
        height: total_height,
    };

    for line in lines {
        let visual_width = line_width(line, metrics);
        let mut x = match config.horizontal_alignment {
            HorizontalAlignment::Left => -width / 2.0,
            HorizontalAlignment::Right => width / 2.0 - visual_width,
            HorizontalAlignment::Center => -visual_width / 2.0,
        };

        for ch in line.text.chars() {
            place(ch, x, y);
            x += line.scaled_advance(ch, metrics.advance_or_zero(ch));
        }

        y -= line_height;
        realized.width = realized.width.max(visual_width);
    }

    realized
}

/// Break text into lines and position every glyph, calling `place` for each
pub fn layout_text_with<M, F>(
    text: &str,
    config: &LayoutConfig,
    metrics: &M,
    place: F,
) -> Result<RealizedSize, LayoutError>
where
    M: GlyphMetrics + ?Sized,
    F: FnMut(char, f32, f32),
{
    let lines = break_lines(text, config, metrics)?;
    Ok(format_and_build(&lines, config, metrics, place))
}

/// Break text into lines and collect the position of every glyph
///
/// ```
/// use glyph_layout::{layout::layout_text, BreakPolicy, LayoutConfig, MonospaceMetrics};
///
/// let config = LayoutConfig::new(4.0, 4.0).with_break_policy(BreakPolicy::WordWrap);
/// let layout = layout_text("ab cd", &config, &MonospaceMetrics(1.0)).expect("valid config");
///
/// assert_eq!(layout.lines.len(), 2);
/// assert_eq!(layout.placements.len(), 4);
/// assert_eq!(layout.size.width, 2.0);
/// assert_eq!(layout.size.height, 2.0);
/// ```
pub fn layout_text<M: GlyphMetrics + ?Sized>(
    text: &str,
    config: &LayoutConfig,
    metrics: &M,
) -> Result<TextLayout, LayoutError> {
    let lines = break_lines(text, config, metrics)?;
    let mut placements: Vec<Placement> = Vec::with_capacity(text.len());
    let size = format_and_build(&lines, config, metrics, |glyph, x, y| {
        placements.push(Placement { glyph, x, y })
    });
    Ok(TextLayout {
        lines,
        placements,
        size,
    })
}

/// The size text would cover if laid out with the given config, without
/// positioning any glyphs
pub fn measure_text<M: GlyphMetrics + ?Sized>(
    text: &str,
    config: &LayoutConfig,
    metrics: &M,
) -> Result<RealizedSize, LayoutError> {
    let lines = break_lines(text, config, metrics)?;
    let width = lines
        .iter()
        .map(|line| line_width(line, metrics))
        .fold(0.0, f32::max);
    Ok(RealizedSize {
        width,
        height: lines.len() as f32 * config.line_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonospaceMetrics;

    fn collect(lines: &[Line], config: &LayoutConfig) -> (Vec<Placement>, RealizedSize) {
        let mut placements = Vec::new();
        let size = format_and_build(lines, config, &MonospaceMetrics(1.0), |glyph, x, y| {
            placements.push(Placement { glyph, x, y })
        });
        (placements, size)
    }

    #[test]
    fn top_left_starts_in_the_top_left_corner() {
        let config = LayoutConfig::new(10.0, 6.0).with_line_height(2.0);
        let (placements, size) = collect(&[Line::new("ab"), Line::new("c")], &config);
        assert_eq!(
            placements,
            vec![
                Placement { glyph: 'a', x: -5.0, y: 1.0 },
                Placement { glyph: 'b', x: -4.0, y: 1.0 },
                Placement { glyph: 'c', x: -5.0, y: -1.0 },
            ]
        );
        assert_eq!(size, RealizedSize { width: 2.0, height: 4.0 });
    }

    #[test]
    fn right_and_center_alignment_offset_each_line() {
        let lines = [Line::new("abcd"), Line::new("ab")];
        let config = LayoutConfig::new(10.0, 10.0)
            .with_horizontal_alignment(HorizontalAlignment::Right);
        let (placements, _) = collect(&lines, &config);
        assert_eq!(placements[0].x, 1.0);
        assert_eq!(placements[4].x, 3.0);

        let config = config.with_horizontal_alignment(HorizontalAlignment::Center);
        let (placements, _) = collect(&lines, &config);
        assert_eq!(placements[0].x, -2.0);
        assert_eq!(placements[4].x, -1.0);
    }

    #[test]
    fn vertical_alignment_positions_the_first_line() {
        let lines = [Line::new("a"), Line::new("b")];
        let config = LayoutConfig::new(10.0, 10.0);

        let (top, _) = collect(&lines, &config);
        assert_eq!(top[0].y, 4.0);

        let (bottom, _) = collect(&lines, &config.with_vertical_alignment(VerticalAlignment::Bottom));
        assert_eq!(bottom[0].y, -4.0);
        assert_eq!(bottom[1].y, -5.0);

        let (center, _) = collect(&lines, &config.with_vertical_alignment(VerticalAlignment::Center));
        assert_eq!(center[0].y, 0.5);
        assert_eq!(center[1].y, -0.5);
    }

    #[test]
    fn spacing_ratio_scales_only_spaces() {
        let config = LayoutConfig::new(10.0, 10.0);
        let (placements, size) = collect(&[Line::justified("a b", 3.0)], &config);
        let xs: Vec<f32> = placements.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-5.0, -4.0, -1.0]);
        assert_eq!(size.width, 5.0);
    }

    #[test]
    fn measuring_matches_building() {
        let config = LayoutConfig::new(5.0, 10.0).with_break_policy(BreakPolicy::Justify);
        let text = "one two three four five six";
        let metrics = MonospaceMetrics(1.0);
        let layout = layout_text(text, &config, &metrics).expect("valid config");
        let measured = measure_text(text, &config, &metrics).expect("valid config");
        assert_eq!(layout.size, measured);
    }

    #[test]
    fn invalid_config_is_rejected_before_layout() {
        let config = LayoutConfig::new(5.0, 10.0).with_line_height(-1.0);
        assert_eq!(
            layout_text("a", &config, &MonospaceMetrics(1.0)),
            Err(LayoutError::InvalidLineHeight(-1.0))
        );
    }
}
