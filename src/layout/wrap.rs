//! Greedy line breaking: fill the current line as far as it goes, then start
//! the next one. Every wrapper also breaks on hard breaks (`'\n'`) and stops
//! producing lines as soon as the config's line budget is used up.

use super::items::is_word_delimiter;
use super::line::Line;
use crate::{ClipMode, GlyphMetrics, LayoutConfig};

/// Split text into paragraphs on hard breaks. A trailing hard break ends the
/// last paragraph rather than starting an empty one, so `"a\n"` is one
/// paragraph and `"a\n\n"` is two (the second empty).
pub fn divide_into_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs: Vec<&str> = text.split('\n').collect();
    if paragraphs.last().is_some_and(|last| last.is_empty()) {
        paragraphs.pop();
    }
    paragraphs
}

/// Collects lines until the config says no more fit
struct LineSink<'c> {
    config: &'c LayoutConfig,
    lines: Vec<Line>,
}

impl<'c> LineSink<'c> {
    fn new(config: &'c LayoutConfig) -> LineSink<'c> {
        LineSink {
            config,
            lines: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        !self.config.is_another_line_available(self.lines.len())
    }

    /// Add a line if there's room for it, returning whether another line could
    /// still follow
    fn push(&mut self, text: String) -> bool {
        if self.is_full() {
            return false;
        }
        self.lines.push(Line::new(text));
        !self.is_full()
    }
}

/// Wrap text on whole words.
///
/// Words are runs of non-whitespace; a word moves to the next line when it
/// would push the current line past `max_width`. Whitespace between words on
/// the same line is kept as written, whitespace at a wrap point is dropped,
/// and indentation at the start of a paragraph is kept.
///
/// A word wider than `max_width` is placed alone on its own line and allowed to
/// overflow it; words are never split.
pub fn wrap_by_words<M: GlyphMetrics + ?Sized>(
    text: &str,
    config: &LayoutConfig,
    metrics: &M,
) -> Vec<Line> {
    let mut sink = LineSink::new(config);

    'paragraphs: for paragraph in divide_into_paragraphs(text) {
        let mut line = String::new();
        let mut line_width = 0.0;

        let mut rest = paragraph.trim_start_matches(is_word_delimiter);
        let indent = &paragraph[..paragraph.len() - rest.len()];
        let mut gap = indent;
        let mut at_paragraph_start = true;

        while !rest.is_empty() {
            let word_end = rest.find(is_word_delimiter).unwrap_or(rest.len());
            let (word, after) = rest.split_at(word_end);
            let next = after.trim_start_matches(is_word_delimiter);
            let next_gap = &after[..after.len() - next.len()];

            let gap_width = metrics.width_of_text(gap);
            let word_width = metrics.width_of_text(word);

            if at_paragraph_start {
                line.push_str(gap);
                line.push_str(word);
                line_width = gap_width + word_width;
            } else if line_width + gap_width + word_width <= config.max_width {
                line.push_str(gap);
                line.push_str(word);
                line_width += gap_width + word_width;
            } else {
                if !sink.push(std::mem::take(&mut line)) {
                    break 'paragraphs;
                }
                line.push_str(word);
                line_width = word_width;
            }

            at_paragraph_start = false;
            gap = next_gap;
            rest = next;
        }

        if !sink.push(line) {
            break;
        }
    }

    sink.lines
}

/// Wrap text at any character.
///
/// A character moves to the next line when it would push the current line past
/// `max_width`, but every line holds at least one character: a character wider
/// than `max_width` is placed alone and overflows.
pub fn wrap_by_chars<M: GlyphMetrics + ?Sized>(
    text: &str,
    config: &LayoutConfig,
    metrics: &M,
) -> Vec<Line> {
    let mut sink = LineSink::new(config);

    'paragraphs: for paragraph in divide_into_paragraphs(text) {
        let mut line = String::new();
        let mut line_width = 0.0;

        for ch in paragraph.chars() {
            let advance = metrics.advance_or_zero(ch);
            if !line.is_empty() && line_width + advance > config.max_width {
                if !sink.push(std::mem::take(&mut line)) {
                    break 'paragraphs;
                }
                line_width = 0.0;
            }
            line.push(ch);
            line_width += advance;
        }

        if !sink.push(line) {
            break;
        }
    }

    sink.lines
}

/// Break text only at hard breaks.
///
/// Lines may be as wide as their text, unless the config clips to bounds: then
/// a line is cut off at the first character that would cross `max_width`, and
/// the rest of that line is dropped, even characters narrow enough to fit in
/// the space left. A character that ends exactly at `max_width` is kept.
pub fn wrap_by_newlines<M: GlyphMetrics + ?Sized>(
    text: &str,
    config: &LayoutConfig,
    metrics: &M,
) -> Vec<Line> {
    let mut sink = LineSink::new(config);

    for paragraph in divide_into_paragraphs(text) {
        let line: String = match config.clip_mode {
            ClipMode::None => paragraph.to_string(),
            ClipMode::ClipToBounds => {
                let mut line_width = 0.0;
                paragraph
                    .chars()
                    .take_while(|&ch| {
                        line_width += metrics.advance_or_zero(ch);
                        line_width <= config.max_width
                    })
                    .collect()
            }
        };

        if !sink.push(line) {
            break;
        }
    }

    sink.lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonospaceMetrics;

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn paragraphs_split_on_hard_breaks() {
        assert_eq!(divide_into_paragraphs("a\nb"), vec!["a", "b"]);
        assert_eq!(divide_into_paragraphs("a\n"), vec!["a"]);
        assert_eq!(divide_into_paragraphs("a\n\n"), vec!["a", ""]);
        assert_eq!(divide_into_paragraphs("\na"), vec!["", "a"]);
        assert!(divide_into_paragraphs("").is_empty());
    }

    #[test]
    fn words_wrap_when_the_line_is_full() {
        let config = LayoutConfig::new(4.0, 10.0);
        let lines = wrap_by_words("ab cd", &config, &MonospaceMetrics(1.0));
        assert_eq!(texts(&lines), vec!["ab", "cd"]);
    }

    #[test]
    fn words_keep_inner_spacing_and_indentation() {
        let config = LayoutConfig::new(20.0, 10.0);
        let lines = wrap_by_words("  ab  cd \nef", &config, &MonospaceMetrics(1.0));
        assert_eq!(texts(&lines), vec!["  ab  cd", "ef"]);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let config = LayoutConfig::new(5.0, 10.0);
        let lines = wrap_by_words("a abcdefghij b", &config, &MonospaceMetrics(1.0));
        assert_eq!(texts(&lines), vec!["a", "abcdefghij", "b"]);
    }

    #[test]
    fn blank_lines_survive_word_wrapping() {
        let config = LayoutConfig::new(5.0, 10.0);
        let lines = wrap_by_words("a\n\nb\n", &config, &MonospaceMetrics(1.0));
        assert_eq!(texts(&lines), vec!["a", "", "b"]);
    }

    #[test]
    fn chars_wrap_at_the_width() {
        let config = LayoutConfig::new(3.0, 10.0);
        let lines = wrap_by_chars("abcdefg\nhi", &config, &MonospaceMetrics(1.0));
        assert_eq!(texts(&lines), vec!["abc", "def", "g", "hi"]);
    }

    #[test]
    fn oversized_char_is_still_placed() {
        let config = LayoutConfig::new(0.5, 10.0);
        let lines = wrap_by_chars("ab", &config, &MonospaceMetrics(1.0));
        assert_eq!(texts(&lines), vec!["a", "b"]);
    }

    #[test]
    fn newline_only_ignores_width_unless_clipping() {
        let config = LayoutConfig::new(3.0, 10.0);
        let lines = wrap_by_newlines("abcdef\ngh", &config, &MonospaceMetrics(1.0));
        assert_eq!(texts(&lines), vec!["abcdef", "gh"]);

        let config = config.with_clip_mode(ClipMode::ClipToBounds);
        let lines = wrap_by_newlines("abcdef\ngh", &config, &MonospaceMetrics(1.0));
        assert_eq!(texts(&lines), vec!["abc", "gh"]);
    }

    #[test]
    fn newline_clipping_stops_at_the_first_overflow() {
        let metrics: std::collections::HashMap<char, f32> =
            [('a', 1.0), ('b', 1.0), ('W', 3.0)].into_iter().collect();
        let config = LayoutConfig::new(3.0, 10.0).with_clip_mode(ClipMode::ClipToBounds);
        let lines = wrap_by_newlines("aWb
abb
abbb", &config, &metrics);
        assert_eq!(texts(&lines), vec!["a", "abb", "abb"]);
    }

    #[test]
    fn wrapping_stops_at_max_lines() {
        let config = LayoutConfig::new(2.0, 10.0).with_max_lines(1);
        let metrics = MonospaceMetrics(1.0);
        assert_eq!(texts(&wrap_by_words("ab cd ef", &config, &metrics)), vec!["ab"]);
        assert_eq!(texts(&wrap_by_chars("abcdef", &config, &metrics)), vec!["ab"]);
        assert_eq!(texts(&wrap_by_newlines("a\nb\nc", &config, &metrics)), vec!["a"]);
    }

    #[test]
    fn clipping_to_bounds_limits_lines_by_height() {
        let config = LayoutConfig::new(2.0, 2.5)
            .with_line_height(1.0)
            .with_clip_mode(ClipMode::ClipToBounds);
        let lines = wrap_by_words("ab cd ef gh", &config, &MonospaceMetrics(1.0));
        assert_eq!(texts(&lines), vec!["ab", "cd"]);
    }
}
