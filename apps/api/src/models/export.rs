use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::layout::font_metrics::FontFamily;

/// Page template. Only affects margin density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    #[serde(alias = "default", alias = "professional", alias = "classic")]
    Standard,
    Compact,
}

/// User-chosen typography and spacing. Every field has a default, so an
/// absent or partial options object always resolves.
///
/// Sizes are in points; spacings are in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub template: Template,
    pub name_size: f32,
    pub section_header_size: f32,
    pub sub_header_size: f32,
    pub body_text_size: f32,
    pub section_spacing: f32,
    pub entry_spacing: f32,
    pub font_family: FontFamily,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            template: Template::Standard,
            name_size: 18.0,
            section_header_size: 11.0,
            sub_header_size: 10.5,
            body_text_size: 10.0,
            section_spacing: 3.0,
            entry_spacing: 2.0,
            font_family: FontFamily::Helvetica,
        }
    }
}

/// Accepted range for each size (points) and spacing (millimetres).
const NAME_SIZE: (f32, f32) = (10.0, 36.0);
const HEADING_SIZE: (f32, f32) = (6.0, 24.0);
const BODY_SIZE: (f32, f32) = (6.0, 18.0);
const SPACING: (f32, f32) = (0.0, 20.0);

impl ExportOptions {
    /// Applies a partial options object on top of `self`. Keys that are absent
    /// keep the value from `self`; unknown keys are ignored.
    pub fn with_overrides(&self, overrides: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut merged = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(overrides);
        serde_json::from_value(Value::Object(merged))
    }

    /// Brings every size and spacing into its accepted range. Non-finite
    /// values fall back to the default.
    pub fn clamped(&self) -> Self {
        let defaults = ExportOptions::default();
        ExportOptions {
            template: self.template,
            name_size: bounded(self.name_size, defaults.name_size, NAME_SIZE),
            section_header_size: bounded(
                self.section_header_size,
                defaults.section_header_size,
                HEADING_SIZE,
            ),
            sub_header_size: bounded(self.sub_header_size, defaults.sub_header_size, HEADING_SIZE),
            body_text_size: bounded(self.body_text_size, defaults.body_text_size, BODY_SIZE),
            section_spacing: bounded(self.section_spacing, defaults.section_spacing, SPACING),
            entry_spacing: bounded(self.entry_spacing, defaults.entry_spacing, SPACING),
            font_family: self.font_family,
        }
    }
}

fn bounded(value: f32, default: f32, (min, max): (f32, f32)) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        default
    }
}
