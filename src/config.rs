use crate::LayoutError;
use derive_more::Display;

/// Where each line sits horizontally within the layout box
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    #[default]
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("center")]
    Center,
}

/// Where the block of lines sits vertically within the layout box
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlignment {
    #[default]
    #[display("top")]
    Top,
    #[display("bottom")]
    Bottom,
    #[display("center")]
    Center,
}

/// How text is divided into lines
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BreakPolicy {
    /// Greedily fill lines with whole words
    #[default]
    #[display("word-wrap")]
    WordWrap,
    /// Greedily fill lines character by character, splitting words anywhere
    #[display("char-wrap")]
    CharWrap,
    /// Only break on explicit newlines
    #[display("newline-only")]
    NewlineOnly,
    /// Choose breaks that minimise total demerits over each paragraph, then
    /// stretch inter-word spaces so every line but a paragraph's last fills
    /// the width
    #[display("justify")]
    Justify,
}

/// Whether text that doesn't fit the layout box is dropped
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClipMode {
    /// Lines keep coming as long as `max_lines` allows
    #[default]
    #[display("none")]
    None,
    /// Lines that would extend past `max_height` are dropped, and with
    /// [BreakPolicy::NewlineOnly] so are characters past `max_width`
    #[display("clip-to-bounds")]
    ClipToBounds,
}

/// Everything the engine needs to know about the box text is laid out in
///
/// The box is centred on the origin: it spans `-max_width / 2 ..= max_width / 2`
/// horizontally and `-max_height / 2 ..= max_height / 2` vertically, with y
/// growing upwards.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    pub max_width: f32,
    pub max_height: f32,
    /// Maximum number of lines; 0 means unlimited
    pub max_lines: usize,
    pub line_height: f32,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub break_policy: BreakPolicy,
    pub clip_mode: ClipMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            max_width: 0.0,
            max_height: 0.0,
            max_lines: 0,
            line_height: 1.0,
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            break_policy: BreakPolicy::default(),
            clip_mode: ClipMode::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a config for a box of the given size, with every other setting
    /// at its default
    pub fn new(max_width: f32, max_height: f32) -> LayoutConfig {
        LayoutConfig {
            max_width,
            max_height,
            ..LayoutConfig::default()
        }
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    pub fn with_break_policy(mut self, policy: BreakPolicy) -> Self {
        self.break_policy = policy;
        self
    }

    pub fn with_clip_mode(mut self, clip_mode: ClipMode) -> Self {
        self.clip_mode = clip_mode;
        self
    }

    /// Check that the dimensions can be laid out against
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(LayoutError::InvalidLineHeight(self.line_height));
        }
        for (name, value) in [("max_width", self.max_width), ("max_height", self.max_height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidDimension { name, value });
            }
        }
        Ok(())
    }

    /// Whether a line can still be added after `lines_so_far` lines, given both
    /// the line limit and (when clipping) the box height
    pub fn is_another_line_available(&self, lines_so_far: usize) -> bool {
        self.line_budget().map_or(true, |budget| lines_so_far < budget)
    }

    /// The most lines this config allows, or [None] if there is no limit
    pub fn line_budget(&self) -> Option<usize> {
        let by_count = (self.max_lines != 0).then_some(self.max_lines);
        let by_height = match self.clip_mode {
            ClipMode::None => None,
            ClipMode::ClipToBounds => Some((self.max_height / self.line_height).floor() as usize),
        };
        match (by_count, by_height) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_without_max_lines_or_clipping() {
        let config = LayoutConfig::new(10.0, 1.0);
        assert_eq!(config.line_budget(), None);
        assert!(config.is_another_line_available(1_000));
    }

    #[test]
    fn max_lines_caps_the_budget() {
        let config = LayoutConfig::new(10.0, 10.0).with_max_lines(2);
        assert_eq!(config.line_budget(), Some(2));
        assert!(config.is_another_line_available(1));
        assert!(!config.is_another_line_available(2));
    }

    #[test]
    fn clipping_budget_agrees_with_predicate() {
        let config = LayoutConfig::new(10.0, 3.5)
            .with_line_height(1.0)
            .with_clip_mode(ClipMode::ClipToBounds);
        assert_eq!(config.line_budget(), Some(3));
        assert!(config.is_another_line_available(2));
        assert!(!config.is_another_line_available(3));

        let config = config.with_max_lines(2);
        assert_eq!(config.line_budget(), Some(2));
    }

    #[test]
    fn predicate_and_budget_agree_on_inexact_heights() {
        for (max_height, line_height) in [(4.5, 0.3), (1.0, 0.1), (0.7, 0.7), (2.9, 0.29)] {
            let config = LayoutConfig::new(10.0, max_height)
                .with_line_height(line_height)
                .with_clip_mode(ClipMode::ClipToBounds);
            let budget = config.line_budget().expect("clipping sets a budget");
            assert!(budget > 0, "{max_height} / {line_height}");
            assert!(config.is_another_line_available(budget - 1));
            assert!(!config.is_another_line_available(budget));
        }
    }

    #[test]
    fn exact_fit_height_admits_the_last_line() {
        let config = LayoutConfig::new(10.0, 3.0).with_clip_mode(ClipMode::ClipToBounds);
        assert_eq!(config.line_budget(), Some(3));
        assert!(config.is_another_line_available(2));
    }

    #[test]
    fn rejects_unusable_dimensions() {
        assert_eq!(
            LayoutConfig::new(10.0, 10.0).with_line_height(0.0).validate(),
            Err(LayoutError::InvalidLineHeight(0.0))
        );
        assert_eq!(
            LayoutConfig::new(-1.0, 10.0).validate(),
            Err(LayoutError::InvalidDimension {
                name: "max_width",
                value: -1.0
            })
        );
        assert!(LayoutConfig::new(f32::NAN, 10.0).validate().is_err());
        assert!(LayoutConfig::new(10.0, 10.0).validate().is_ok());
    }

    #[test]
    fn enums_display_as_kebab_case() {
        assert_eq!(BreakPolicy::NewlineOnly.to_string(), "newline-only");
        assert_eq!(ClipMode::ClipToBounds.to_string(), "clip-to-bounds");
        assert_eq!(HorizontalAlignment::Center.to_string(), "center");
    }
}
