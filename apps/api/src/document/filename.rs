use serde::Serialize;

use crate::models::resume::non_blank;
use crate::models::ResumeData;

/// Output format, for naming and content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Pdf,
    Doc,
}

impl FileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Pdf => "pdf",
            FileFormat::Doc => "doc",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            FileFormat::Pdf => "application/pdf",
            FileFormat::Doc => "application/msword",
        }
    }
}

/// `{Name}[_{TargetRole}]_Resume.{ext}` with whitespace runs joined by `_`
/// and characters that are illegal in file names dropped.
///
/// Falls back to `Resume.{ext}` when the name sanitizes to nothing.
pub fn derive_file_name(data: &ResumeData, format: FileFormat) -> String {
    let name = sanitize_component(&data.name);
    let role = non_blank(&data.target_role)
        .map(sanitize_component)
        .filter(|role| !role.is_empty());

    let mut stem = name;
    if let Some(role) = role {
        if !stem.is_empty() {
            stem.push('_');
        }
        stem.push_str(&role);
    }
    if !stem.is_empty() {
        stem.push('_');
    }
    stem.push_str("Resume");

    format!("{stem}.{}", format.extension())
}

fn sanitize_component(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !is_illegal(*c))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn is_illegal(c: char) -> bool {
    c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}
