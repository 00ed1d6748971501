//! PDF back-end: serializes a `PaginatedDocument` through `printpdf` using the
//! built-in base-14 fonts, so no font files ship with the service.

use std::panic::{catch_unwind, AssertUnwindSafe};

use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt,
    Rgb as PdfRgb, TextItem,
};
use tracing::{debug, info};

use crate::errors::ExportError;
use crate::layout::assembler::{export_paginated_document, PaginatedDocument};
use crate::layout::config::{LayoutConfig, Rgb};
use crate::layout::cursor::{Page, PageElement, Rule, TextRun};
use crate::layout::font_metrics::{FontFamily, FontWeight};
use crate::models::{ExportOptions, ResumeData, UserType};

/// Lays out and serializes in one call.
pub fn export_pdf(
    data: &ResumeData,
    user_type: UserType,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let document = export_paginated_document(data, user_type, options);
    render_pdf(&document)
}

/// Serializes a laid-out document. A panic inside the engine is reported as an
/// engine failure rather than unwinding through the caller.
pub fn render_pdf(document: &PaginatedDocument) -> Result<Vec<u8>, ExportError> {
    let bytes = catch_unwind(AssertUnwindSafe(|| save(document))).map_err(|panic| {
        let detail = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "printpdf panicked".to_string());
        ExportError::PdfEngine(detail)
    })?;

    if bytes.is_empty() {
        return Err(ExportError::PdfEngine(
            "printpdf produced an empty document".to_string(),
        ));
    }

    info!(pages = document.page_count(), bytes = bytes.len(), "PDF rendered");
    Ok(bytes)
}

fn save(document: &PaginatedDocument) -> Vec<u8> {
    let config = &document.config;
    let mut doc = PdfDocument::new(&document.metadata.title);

    doc.metadata.info.document_title = document.metadata.title.clone();
    doc.metadata.info.author = document.metadata.author.clone();
    doc.metadata.info.subject = document.metadata.subject.clone();
    doc.metadata.info.creator = document.metadata.creator.clone();
    doc.metadata.info.producer = document.metadata.producer.clone();

    doc.pages = document
        .pages
        .iter()
        .map(|page| {
            PdfPage::new(
                Mm(config.page_width),
                Mm(config.page_height),
                page_ops(page, config),
            )
        })
        .collect();

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        debug!(count = warnings.len(), "printpdf reported warnings");
    }
    bytes
}

/// Drawing operations for one page, footer last.
pub fn page_ops(page: &Page, config: &LayoutConfig) -> Vec<Op> {
    let mut ops = Vec::new();

    for element in &page.elements {
        match element {
            PageElement::Text(run) => push_text(&mut ops, run, config),
            PageElement::Rule(rule) => push_rule(&mut ops, rule, config),
        }
    }
    if let Some(footer) = &page.footer {
        push_text(&mut ops, footer, config);
    }

    ops
}

fn push_text(ops: &mut Vec<Op>, run: &TextRun, config: &LayoutConfig) {
    let font = builtin_font(config.font_family, run.style.weight);

    ops.push(Op::StartTextSection);
    ops.push(Op::SetFillColor {
        col: pdf_color(run.color),
    });
    ops.push(Op::SetTextCursor {
        pos: point(run.x, run.y, config),
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(run.style.size),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(run.text.clone())],
        font,
    });
    ops.push(Op::EndTextSection);
}

fn push_rule(ops: &mut Vec<Op>, rule: &Rule, config: &LayoutConfig) {
    ops.push(Op::SetOutlineColor {
        col: pdf_color(rule.color),
    });
    ops.push(Op::SetOutlineThickness {
        pt: Mm(rule.thickness).into_pt(),
    });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![
                LinePoint {
                    p: point(rule.x1, rule.y, config),
                    bezier: false,
                },
                LinePoint {
                    p: point(rule.x2, rule.y, config),
                    bezier: false,
                },
            ],
            is_closed: false,
        },
    });
}

/// Layout coordinates run down from the top edge; PDF coordinates run up from
/// the bottom.
fn point(x: f32, y: f32, config: &LayoutConfig) -> Point {
    Point {
        x: Mm(x).into_pt(),
        y: Mm(config.page_height - y).into_pt(),
    }
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(PdfRgb::new(
        f32::from(color.0) / 255.0,
        f32::from(color.1) / 255.0,
        f32::from(color.2) / 255.0,
        None,
    ))
}

pub fn builtin_font(family: FontFamily, weight: FontWeight) -> BuiltinFont {
    match (family, weight) {
        (FontFamily::Helvetica, FontWeight::Normal) => BuiltinFont::Helvetica,
        (FontFamily::Helvetica, FontWeight::Bold) => BuiltinFont::HelveticaBold,
        (FontFamily::Times, FontWeight::Normal) => BuiltinFont::TimesRoman,
        (FontFamily::Times, FontWeight::Bold) => BuiltinFont::TimesBold,
        (FontFamily::Courier, FontWeight::Normal) => BuiltinFont::Courier,
        (FontFamily::Courier, FontWeight::Bold) => BuiltinFont::CourierBold,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
