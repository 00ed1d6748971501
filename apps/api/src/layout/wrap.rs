//! Text measurement and greedy word-wrap.
//!
//! Every block the renderers place goes through `measure`, which returns the
//! wrapped lines together with the exact height they occupy. Measuring never
//! touches the page cursor; callers decide where a measured block goes.

use tracing::warn;

use crate::layout::config::{LayoutConfig, TextStyle};
use crate::layout::font_metrics::{FontMetricTable, PT_TO_MM};

/// Upper bound on the lines a single block may wrap to.
pub const MAX_WRAPPED_LINES: usize = 500;

/// Horizontal alignment of each wrapped line within its area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// X position of a line of `line_width` inside an area starting at `x`.
    pub fn line_x(self, x: f32, area_width: f32, line_width: f32) -> f32 {
        match self {
            Align::Left => x,
            Align::Center => x + (area_width - line_width) / 2.0,
            Align::Right => x + area_width - line_width,
        }
    }
}

/// A measured block: wrapped lines plus the vertical space they need.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedText {
    pub lines: Vec<String>,
    pub style: TextStyle,
    pub line_height: f32,
    pub height: f32,
}

impl WrappedText {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Wraps `text` to `max_width` millimetres in the given style.
///
/// An empty or whitespace-only string yields zero lines and zero height.
pub fn measure(text: &str, style: TextStyle, max_width: f32, config: &LayoutConfig) -> WrappedText {
    measure_with_first_line(text, style, max_width, max_width, config)
}

/// Like `measure`, but the first line has its own width. Used where an inline
/// label already occupies the start of the first line.
pub fn measure_with_first_line(
    text: &str,
    style: TextStyle,
    first_width: f32,
    rest_width: f32,
    config: &LayoutConfig,
) -> WrappedText {
    let metrics = config.metrics(style);
    let lines = wrap_lines(text, metrics, style.size, first_width, rest_width);
    let line_height = config.line_height(style);

    WrappedText {
        height: lines.len() as f32 * line_height,
        lines,
        style,
        line_height,
    }
}

/// Greedy fill-to-width wrap. Explicit newlines start a new line; words wider
/// than a full line are broken between characters.
///
/// When the first line is narrower than the rest and the opening word does not
/// fit on it, the first line is left empty instead of splitting the word.
pub fn wrap_lines(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    first_width: f32,
    rest_width: f32,
) -> Vec<String> {
    let mut wrapper = LineWrapper {
        metrics,
        size_pt,
        first_width,
        rest_width,
        lines: Vec::new(),
        current: String::new(),
        current_width: 0.0,
        truncated: false,
    };

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            continue;
        }
        for word in paragraph.split_whitespace() {
            wrapper.push_word(word);
        }
        wrapper.finish_line();
    }

    if wrapper.truncated {
        warn!(
            max_lines = MAX_WRAPPED_LINES,
            chars = text.len(),
            "Wrapped text exceeded the line cap and was truncated"
        );
    }

    wrapper.lines
}

struct LineWrapper<'a> {
    metrics: &'a FontMetricTable,
    size_pt: f32,
    first_width: f32,
    rest_width: f32,
    lines: Vec<String>,
    current: String,
    current_width: f32,
    truncated: bool,
}

impl LineWrapper<'_> {
    fn limit(&self) -> f32 {
        if self.lines.is_empty() {
            self.first_width
        } else {
            self.rest_width
        }
    }

    fn width(&self, s: &str) -> f32 {
        self.metrics.width_mm(s, self.size_pt)
    }

    fn full(&self) -> bool {
        self.lines.len() >= MAX_WRAPPED_LINES
    }

    fn push_word(&mut self, word: &str) {
        if self.full() {
            self.truncated = true;
            return;
        }

        let word_width = self.width(word);

        if !self.current.is_empty() {
            let space_width = self.metrics.space_width * self.size_pt * PT_TO_MM;
            if self.current_width + space_width + word_width <= self.limit() {
                self.current.push(' ');
                self.current.push_str(word);
                self.current_width += space_width + word_width;
                return;
            }
            self.finish_line();
            if self.full() {
                self.truncated = true;
                return;
            }
        }

        if word_width <= self.limit() {
            self.current.push_str(word);
            self.current_width = word_width;
            return;
        }

        // Narrow first line: leave it empty and retry on a full-width line.
        if self.lines.is_empty() && word_width <= self.rest_width {
            self.lines.push(String::new());
            self.current.push_str(word);
            self.current_width = word_width;
            return;
        }

        self.split_word(word);
    }

    /// Breaks an over-long word between characters. Every chunk carries at
    /// least one character so the loop always makes progress.
    fn split_word(&mut self, word: &str) {
        for c in word.chars() {
            let char_width = self.metrics.char_width(c) * self.size_pt * PT_TO_MM;
            if !self.current.is_empty() && self.current_width + char_width > self.limit() {
                self.finish_line();
                if self.full() {
                    self.truncated = true;
                    return;
                }
            }
            self.current.push(c);
            self.current_width += char_width;
        }
    }

    fn finish_line(&mut self) {
        if self.current.is_empty() {
            return;
        }
        if self.full() {
            self.truncated = true;
        } else {
            self.lines.push(std::mem::take(&mut self.current));
        }
        self.current.clear();
        self.current_width = 0.0;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
