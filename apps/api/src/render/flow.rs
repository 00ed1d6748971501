//! Flow-document back-end: Word-compatible HTML built from the shared
//! document model. No cursor; the host application paginates on print.

use std::fmt::Write;

use crate::document::sections::{
    ContactItem, EducationEntry, ExperienceEntry, ExtrasContent, ExtrasGroup, Header,
    ProjectEntry, Section, SectionBody, SkillLine,
};
use crate::document::DocumentModel;
use crate::errors::ExportError;
use crate::layout::font_metrics::FontFamily;
use crate::models::{ResumeData, UserType};
use crate::render::templates::{DOCUMENT_TEMPLATE, STYLESHEET_TEMPLATE};

/// Renders the flow document in the default font.
pub fn export_flow_document(data: &ResumeData, user_type: UserType) -> Result<String, ExportError> {
    export_flow_document_with_font(data, user_type, FontFamily::default())
}

pub fn export_flow_document_with_font(
    data: &ResumeData,
    user_type: UserType,
    font: FontFamily,
) -> Result<String, ExportError> {
    let model = DocumentModel::build(data, user_type);

    let mut body = String::new();
    write_header(&mut body, &model.header)?;
    for section in &model.sections {
        write_section(&mut body, section)?;
    }

    let stylesheet = fill(STYLESHEET_TEMPLATE, &[("font_stack", font.css_stack())]);
    let title = escape(&format!("{} - Resume", model.header.name));

    Ok(fill(
        DOCUMENT_TEMPLATE,
        &[
            ("title", title.as_str()),
            ("stylesheet", stylesheet.as_str()),
            ("body", body.as_str()),
        ],
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// Writes nothing for a blank name, matching the paginated layout.
fn write_header(out: &mut String, header: &Header) -> Result<(), ExportError> {
    if header.name.is_empty() {
        return Ok(());
    }

    out.push_str("<div class=\"header\">\n");
    writeln!(out, "<div class=\"name\">{}</div>", escape(&header.name.to_uppercase()))?;
    if !header.contact.is_empty() {
        let parts: Vec<String> = header.contact.iter().map(contact_part).collect();
        writeln!(out, "<div class=\"contact\">{}</div>", parts.join(" | "))?;
    }
    out.push_str("<hr class=\"header-line\">\n</div>\n");
    Ok(())
}

fn contact_part(item: &ContactItem) -> String {
    let value = escape(&item.value);
    match item.href() {
        Some(href) => format!(
            "<b>{}:</b> <a href=\"{}\">{value}</a>",
            item.label(),
            escape(&href)
        ),
        None => format!("<b>{}:</b> {value}", item.label()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn write_section(out: &mut String, section: &Section) -> Result<(), ExportError> {
    out.push_str("<div class=\"section\">\n");
    writeln!(out, "<div class=\"section-title\">{}</div>", escape(section.title))?;
    out.push_str("<div class=\"section-underline\"></div>\n");

    match &section.body {
        SectionBody::Paragraph(text) => {
            writeln!(out, "<p class=\"paragraph\">{}</p>", escape_multiline(text))?;
        }
        SectionBody::Experience(entries) => {
            for entry in entries {
                write_experience(out, entry)?;
            }
        }
        SectionBody::Education(entries) => {
            for entry in entries {
                write_education(out, entry)?;
            }
        }
        SectionBody::Projects(entries) => {
            for entry in entries {
                write_project(out, entry)?;
            }
        }
        SectionBody::Skills(lines) => {
            for line in lines {
                write_skill(out, line)?;
            }
        }
        SectionBody::Certifications(items) => write_list(out, items, "bullets")?,
        SectionBody::Extras(groups) => {
            for group in groups {
                write_extras_group(out, group)?;
            }
        }
    }

    out.push_str("</div>\n");
    Ok(())
}

/// Two-column row: title lines on the left, the date right-aligned and
/// unwrapped on the right.
fn write_dated_row(
    out: &mut String,
    title: &str,
    subtitle: &str,
    details: &[String],
    date: Option<&str>,
) -> Result<(), ExportError> {
    out.push_str("<table class=\"entry\"><tr>\n<td class=\"entry-main\">");
    if !title.is_empty() {
        write!(out, "<div class=\"entry-title\">{}</div>", escape(title))?;
    }
    if !subtitle.is_empty() {
        write!(out, "<div class=\"entry-subtitle\">{}</div>", escape(subtitle))?;
    }
    for detail in details {
        write!(out, "<div class=\"detail\">{}</div>", escape(detail))?;
    }
    out.push_str("</td>\n");
    writeln!(
        out,
        "<td class=\"entry-date\" style=\"text-align: right; white-space: nowrap;\">\
         <div class=\"year\">{}</div></td>",
        escape(date.unwrap_or(""))
    )?;
    out.push_str("</tr></table>\n");
    Ok(())
}

fn write_experience(out: &mut String, entry: &ExperienceEntry) -> Result<(), ExportError> {
    write_dated_row(
        out,
        &entry.role,
        &entry.organization,
        &[],
        entry.date.as_deref(),
    )?;
    write_list(out, &entry.bullets, "bullets")
}

fn write_education(out: &mut String, entry: &EducationEntry) -> Result<(), ExportError> {
    write_dated_row(
        out,
        &entry.degree,
        &entry.school,
        &entry.detail_lines(),
        entry.date.as_deref(),
    )
}

fn write_project(out: &mut String, entry: &ProjectEntry) -> Result<(), ExportError> {
    out.push_str("<div class=\"project\">\n");
    if !entry.title.is_empty() {
        writeln!(out, "<div class=\"entry-title\">{}</div>", escape(&entry.title))?;
    }
    write_list(out, &entry.bullets, "bullets")?;
    out.push_str("</div>\n");
    Ok(())
}

fn write_skill(out: &mut String, line: &SkillLine) -> Result<(), ExportError> {
    out.push_str("<div class=\"skills-item\">");
    let label = line.label();
    if !label.is_empty() {
        write!(
            out,
            "<span class=\"skill-category\">{}</span> ",
            escape(label.trim_end())
        )?;
    }
    writeln!(out, "{}</div>", escape(&line.list_text()))?;
    Ok(())
}

fn write_extras_group(out: &mut String, group: &ExtrasGroup) -> Result<(), ExportError> {
    writeln!(out, "<p class=\"sub-label\">{}</p>", escape(group.label))?;
    match &group.content {
        ExtrasContent::Items(items) => write_list(out, items, "bullets nested"),
        ExtrasContent::Paragraph(text) => {
            writeln!(out, "<p class=\"sub-paragraph\">{}</p>", escape_multiline(text))?;
            Ok(())
        }
    }
}

fn write_list(out: &mut String, items: &[String], class: &str) -> Result<(), ExportError> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "<ul class=\"{class}\">")?;
    for item in items {
        writeln!(out, "<li class=\"bullet\">{}</li>", escape(item))?;
    }
    out.push_str("</ul>\n");
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_multiline(text: &str) -> String {
    text.lines().map(escape).collect::<Vec<_>>().join("<br>")
}

/// Substitutes `{key}` placeholders in a single pass, so substituted values
/// are never scanned for further placeholders. Unknown braces are kept.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let matched = values
            .iter()
            .find(|(key, _)| tail.starts_with(key) && tail[key.len()..].starts_with('}'));
        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
