//! Layout configuration: resolves `ExportOptions` into page geometry,
//! typography and spacing. Everything is in millimetres except font sizes,
//! which stay in points.

use serde::Serialize;

use crate::layout::font_metrics::{get_metrics, FontFamily, FontMetricTable, FontWeight, PT_TO_MM};
use crate::models::{ExportOptions, Template};

/// A4 portrait.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Font size of the page-number footer.
pub const FOOTER_FONT_SIZE: f32 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    fn for_template(template: Template) -> Self {
        match template {
            Template::Compact => Margins {
                top: 8.0,
                bottom: 8.0,
                left: 12.0,
                right: 12.0,
            },
            Template::Standard => Margins {
                top: 10.0,
                bottom: 10.0,
                left: 15.0,
                right: 15.0,
            },
        }
    }
}

/// One typographic role: size in points plus weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
}

impl TextStyle {
    pub const fn normal(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }

    pub fn with_weight(self, weight: FontWeight) -> Self {
        Self { weight, ..self }
    }
}

/// The six semantic roles every renderer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Typography {
    pub name: TextStyle,
    pub contact: TextStyle,
    pub section_title: TextStyle,
    pub sub_header: TextStyle,
    pub secondary: TextStyle,
    pub body: TextStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    /// Baseline of the name line, measured from the top edge.
    pub name_from_top: f32,
    pub after_name: f32,
    pub after_contact: f32,
    pub after_header_rule: f32,
    pub section_before: f32,
    pub section_after: f32,
    pub bullet_list: f32,
    pub between_entries: f32,
    pub between_skills: f32,
    /// After a summary or objective paragraph.
    pub after_paragraph: f32,
    /// After each labelled sub-list in the extras block.
    pub after_sub_list: f32,
    pub line_height_factor: f32,
    pub bullet_indent: f32,
}

/// RGB triple, 0–255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub rule: Rgb,
    pub footer: Rgb,
}

/// Resolved layout for a single export. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    pub fonts: Typography,
    pub spacing: Spacing,
    pub colors: Palette,
    pub font_family: FontFamily,
}

impl LayoutConfig {
    /// Sizes and spacings are clamped to their accepted ranges first, so a
    /// zero or negative value can never produce a zero line height.
    pub fn from_options(options: &ExportOptions) -> Self {
        let options = options.clamped();
        Self {
            page_width: PAGE_WIDTH_MM,
            page_height: PAGE_HEIGHT_MM,
            margins: Margins::for_template(options.template),
            fonts: Typography {
                name: TextStyle::bold(options.name_size),
                contact: TextStyle::normal(options.body_text_size - 0.5),
                section_title: TextStyle::bold(options.section_header_size),
                sub_header: TextStyle::bold(options.sub_header_size),
                secondary: TextStyle::normal(options.sub_header_size),
                body: TextStyle::normal(options.body_text_size),
            },
            spacing: Spacing {
                name_from_top: 10.0,
                after_name: 2.0,
                after_contact: 3.0,
                after_header_rule: 3.0,
                section_before: options.section_spacing,
                section_after: 2.0,
                bullet_list: options.entry_spacing * 0.5,
                between_entries: 4.0,
                between_skills: 2.0,
                after_paragraph: 3.0,
                after_sub_list: 2.0,
                line_height_factor: 1.2,
                bullet_indent: 4.0,
            },
            colors: Palette {
                primary: Rgb::BLACK,
                secondary: Rgb(80, 80, 80),
                rule: Rgb(128, 128, 128),
                footer: Rgb(80, 80, 80),
            },
            font_family: options.font_family,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.page_height - self.margins.top - self.margins.bottom
    }

    /// Lowest baseline content may reach on any page.
    pub fn max_y(&self) -> f32 {
        self.page_height - self.margins.bottom
    }

    /// Height of one wrapped line in the given style.
    pub fn line_height(&self, style: TextStyle) -> f32 {
        style.size * self.spacing.line_height_factor * PT_TO_MM
    }

    pub fn metrics(&self, style: TextStyle) -> &'static FontMetricTable {
        get_metrics(self.font_family, style.weight)
    }

    /// Baseline for footers, halfway into the bottom margin.
    pub fn footer_y(&self) -> f32 {
        self.page_height - self.margins.bottom / 2.0
    }
}
