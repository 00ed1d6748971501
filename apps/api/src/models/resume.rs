use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Career stage
// ────────────────────────────────────────────────────────────────────────────

/// Career-stage tag. Controls the narrative field, section order and whether
/// the achievements/extras block is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Experienced,
    Fresher,
    Student,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Experienced => "experienced",
            UserType::Fresher => "fresher",
            UserType::Student => "student",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume content
// ────────────────────────────────────────────────────────────────────────────

/// Structured resume content as produced by the editor. Read-only for export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub career_objective: Option<String>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub extra_curricular_activities: Vec<String>,
    #[serde(default)]
    pub languages_known: Vec<String>,
    #[serde(default)]
    pub personal_details: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form date label, e.g. "Jan 2021 - Present".
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub school: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub cgpa: Option<String>,
    #[serde(default)]
    pub relevant_coursework: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    /// Kept for the editor; never drawn in the paginated output.
    #[serde(default)]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub category: String,
    #[serde(default)]
    pub list: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Certifications
// ────────────────────────────────────────────────────────────────────────────

/// A certification entry is either a bare string or an object carrying some
/// subset of title/issuer/name/description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Certification {
    PlainText(String),
    Structured(StructuredCertification),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredCertification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unknown keys are kept so the last-resort line still has something to show.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Certification {
    /// Normalizes the entry to the single line shown after its bullet.
    ///
    /// Precedence: plain text → "title - issuer" → "title - description" →
    /// name → the one non-empty field → every non-empty value joined by " - ".
    /// Returns `None` only when the entry carries no text at all.
    pub fn display_text(&self) -> Option<String> {
        let cert = match self {
            Certification::PlainText(text) => return non_blank_str(text).map(str::to_string),
            Certification::Structured(cert) => cert,
        };

        let title = non_blank(&cert.title);
        let issuer = non_blank(&cert.issuer);
        let name = non_blank(&cert.name);
        let description = non_blank(&cert.description);

        let text = match (title, issuer, name, description) {
            (Some(t), Some(i), _, _) => format!("{t} - {i}"),
            (Some(t), None, _, Some(d)) => format!("{t} - {d}"),
            (_, _, Some(n), _) => n.to_string(),
            (Some(t), None, None, None) if cert.extra.is_empty() => t.to_string(),
            (None, Some(i), None, None) if cert.extra.is_empty() => i.to_string(),
            (None, None, None, Some(d)) if cert.extra.is_empty() => d.to_string(),
            _ => cert.joined_values(),
        };

        non_blank_str(&text).map(str::to_string)
    }
}

impl StructuredCertification {
    fn joined_values(&self) -> String {
        let known = [&self.title, &self.issuer, &self.name, &self.description]
            .into_iter()
            .filter_map(non_blank)
            .map(str::to_string);

        let extra = self.extra.values().filter_map(|value| match value {
            Value::String(s) => non_blank_str(s).map(str::to_string),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        });

        known.chain(extra).collect::<Vec<_>>().join(" - ")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Returns the trimmed value when the option holds non-whitespace text.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().and_then(non_blank_str)
}

pub fn non_blank_str(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Drops blank entries from a list of strings, keeping order.
pub fn non_blank_items(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| non_blank_str(item))
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
