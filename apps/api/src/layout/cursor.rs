//! Page cursor: the single owner of page count and vertical write position
//! for one export call.
//!
//! Positions are millimetres from the top-left corner of the page; a text
//! run's `y` is its baseline. The PDF back-end flips the axis.

use serde::Serialize;

use crate::layout::config::{LayoutConfig, Rgb, TextStyle, FOOTER_FONT_SIZE};
use crate::layout::wrap::{Align, WrappedText};

const EPSILON: f32 = 1e-3;

// ────────────────────────────────────────────────────────────────────────────
// Page model
// ────────────────────────────────────────────────────────────────────────────

/// What a text run is, so tests and previews can read structure back out of
/// a laid-out page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Name,
    Contact,
    SectionTitle,
    EntryTitle,
    EntrySubtitle,
    Date,
    Label,
    Body,
    Bullet,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
    pub color: Rgb,
    pub role: TextRole,
}

/// Horizontal rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageElement {
    Text(TextRun),
    Rule(Rule),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub elements: Vec<PageElement>,
    pub footer: Option<TextRun>,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            elements: Vec::new(),
            footer: None,
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|element| match element {
            PageElement::Text(run) => Some(run),
            PageElement::Rule(_) => None,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.elements.iter().filter_map(|element| match element {
            PageElement::Rule(rule) => Some(rule),
            PageElement::Text(_) => None,
        })
    }

    pub fn section_titles(&self) -> Vec<String> {
        self.texts()
            .filter(|run| run.role == TextRole::SectionTitle)
            .map(|run| run.text.clone())
            .collect()
    }
}

/// Where and how a measured block is drawn.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub x: f32,
    /// Area the lines are aligned within.
    pub width: f32,
    pub align: Align,
    pub color: Rgb,
    pub role: TextRole,
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

pub struct PageCursor<'a> {
    config: &'a LayoutConfig,
    pages: Vec<Page>,
    y: f32,
    advanced: f32,
}

impl<'a> PageCursor<'a> {
    /// Starts at page 1 with the cursor on the top margin.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            pages: vec![Page::new(1)],
            y: config.margins.top,
            advanced: 0.0,
        }
    }

    pub fn config(&self) -> &'a LayoutConfig {
        self.config
    }

    pub fn page_number(&self) -> usize {
        self.pages.len()
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Total distance advanced over the whole document. Renderers diff this to
    /// report the height they consumed.
    pub fn total_advanced(&self) -> f32 {
        self.advanced
    }

    pub fn has_space(&self, required: f32) -> bool {
        self.y + required <= self.config.max_y() + EPSILON
    }

    pub fn at_page_top(&self) -> bool {
        (self.y - self.config.margins.top).abs() < EPSILON
    }

    /// Appends a page, resets the cursor to the top margin and stamps a
    /// provisional "Page N" footer, right-aligned.
    pub fn break_page(&mut self) {
        let number = self.pages.len() + 1;
        let mut page = Page::new(number);
        page.footer = Some(self.footer_run(format!("Page {number}"), Align::Right));
        self.pages.push(page);
        self.y = self.config.margins.top;
    }

    /// Breaks the page unless `required` fits, or the cursor is already at the
    /// top of a fresh page (a block taller than a page cannot be helped by
    /// another break).
    pub fn ensure_space(&mut self, required: f32) {
        if !self.has_space(required) && !self.at_page_top() {
            self.break_page();
        }
    }

    pub fn advance(&mut self, height: f32) {
        self.y += height;
        self.advanced += height;
    }

    /// Soft spacing: advances by `height` but never past the bottom content edge.
    pub fn pad(&mut self, height: f32) {
        let room = (self.config.max_y() - self.y).max(0.0);
        self.advance(height.min(room));
    }

    /// Moves the cursor to an absolute position on the current page. Only the
    /// header uses this, to place the name line.
    pub fn move_to(&mut self, y: f32) {
        self.y = y;
    }

    /// Draws a measured block at the cursor and advances past it.
    ///
    /// A block that fits on a page is kept whole, breaking first if needed. A
    /// block taller than a page is placed line by line.
    pub fn place(&mut self, block: &WrappedText, placement: Placement) -> f32 {
        if block.is_empty() {
            return 0.0;
        }

        if block.height <= self.config.content_height() + EPSILON {
            self.ensure_space(block.height);
            self.draw_lines(&block.lines, block.style, block.line_height, placement);
            self.advance(block.height);
        } else {
            for line in &block.lines {
                self.ensure_space(block.line_height);
                self.draw_lines(
                    std::slice::from_ref(line),
                    block.style,
                    block.line_height,
                    placement,
                );
                self.advance(block.line_height);
            }
        }

        block.height
    }

    /// Draws lines starting at the cursor without moving it.
    pub fn draw_lines(
        &mut self,
        lines: &[String],
        style: TextStyle,
        line_height: f32,
        placement: Placement,
    ) {
        let metrics = self.config.metrics(style);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let width = metrics.width_mm(line, style.size);
            let x = placement.align.line_x(placement.x, placement.width, width);
            self.push_text(TextRun {
                text: line.clone(),
                x,
                y: self.y + i as f32 * line_height,
                style,
                color: placement.color,
                role: placement.role,
            });
        }
    }

    pub fn push_text(&mut self, run: TextRun) {
        self.current_page().elements.push(PageElement::Text(run));
    }

    /// Full content-width rule at `y`.
    pub fn push_rule(&mut self, y: f32, thickness: f32, color: Rgb) {
        let x1 = self.config.margins.left;
        let x2 = x1 + self.config.content_width();
        self.current_page().elements.push(PageElement::Rule(Rule {
            x1,
            x2,
            y,
            thickness,
            color,
        }));
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    fn current_page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn footer_run(&self, text: String, align: Align) -> TextRun {
        footer_run(self.config, text, align)
    }
}

/// Footer text run at the bottom of the page, aligned within the content width.
pub fn footer_run(config: &LayoutConfig, text: String, align: Align) -> TextRun {
    let style = TextStyle::normal(FOOTER_FONT_SIZE);
    let width = config.metrics(style).width_mm(&text, style.size);
    TextRun {
        x: align.line_x(config.margins.left, config.content_width(), width),
        y: config.footer_y(),
        text,
        style,
        color: config.colors.footer,
        role: TextRole::Footer,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
