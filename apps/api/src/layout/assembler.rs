//! Document assembler: drives one paginated export from resume data to a
//! finished page list.
//!
//! Stages: build the layout config and a fresh cursor, draw the header, draw
//! the narrative and body sections in the order fixed for the user type, then
//! finalize page numbers and metadata. Layout itself never fails; only the
//! PDF back-end can.

use serde::Serialize;
use tracing::debug;

use crate::document::{derive_file_name, DocumentModel, FileFormat};
use crate::layout::blocks::{render_header, render_section};
use crate::layout::config::LayoutConfig;
use crate::layout::cursor::{footer_run, Page, PageCursor};
use crate::layout::wrap::Align;
use crate::models::{ExportOptions, ResumeData, UserType};

pub const CREATOR: &str = "Resume Export Service";
pub const PRODUCER: &str = "Resume Export Service PDF Generator";
pub const SUBJECT: &str = "Professional Resume";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub creator: String,
    pub producer: String,
}

impl DocumentMetadata {
    fn for_resume(data: &ResumeData) -> Self {
        let name = data.name.trim();
        DocumentMetadata {
            title: format!("{name} - Resume"),
            subject: SUBJECT.to_string(),
            author: name.to_string(),
            creator: CREATOR.to_string(),
            producer: PRODUCER.to_string(),
        }
    }
}

/// A fully laid-out document, ready for a back-end to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedDocument {
    pub config: LayoutConfig,
    pub pages: Vec<Page>,
    pub metadata: DocumentMetadata,
    pub file_name: String,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Section headings in drawing order across all pages.
    pub fn section_titles(&self) -> Vec<String> {
        self.pages.iter().flat_map(|page| page.section_titles()).collect()
    }

    pub fn report(&self) -> LayoutReport {
        LayoutReport {
            file_name: self.file_name.clone(),
            page_count: self.page_count(),
            pages: self
                .pages
                .iter()
                .map(|page| PageReport {
                    number: page.number,
                    headings: page.section_titles(),
                    footer: page.footer.as_ref().map(|run| run.text.clone()),
                    lowest_baseline: page
                        .texts()
                        .map(|run| run.y)
                        .fold(None, |lowest: Option<f32>, y| {
                            Some(lowest.map_or(y, |current| current.max(y)))
                        }),
                })
                .collect(),
        }
    }
}

/// Page plan returned by the preview endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub file_name: String,
    pub page_count: usize,
    pub pages: Vec<PageReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub number: usize,
    pub headings: Vec<String>,
    pub footer: Option<String>,
    /// Lowest text baseline on the page in millimetres from the top edge.
    pub lowest_baseline: Option<f32>,
}

/// Lays out `data` for `user_type`. Each call owns its own cursor and pages.
pub fn export_paginated_document(
    data: &ResumeData,
    user_type: UserType,
    options: &ExportOptions,
) -> PaginatedDocument {
    let config = LayoutConfig::from_options(options);
    let model = DocumentModel::build(data, user_type);

    let pages = {
        let mut cursor = PageCursor::new(&config);

        let header_height = render_header(&mut cursor, &model.header);
        debug!(height = header_height, "Header drawn");

        for section in &model.sections {
            let height = render_section(&mut cursor, section);
            debug!(
                section = section.title,
                height,
                page = cursor.page_number(),
                "Section drawn"
            );
        }

        cursor.into_pages()
    };

    let pages = number_pages(pages, &config);

    PaginatedDocument {
        metadata: DocumentMetadata::for_resume(data),
        file_name: derive_file_name(data, FileFormat::Pdf),
        config,
        pages,
    }
}

/// Replaces the provisional footers with a centered "Page X of N" once the
/// total is known. A single-page document carries no footer.
fn number_pages(mut pages: Vec<Page>, config: &LayoutConfig) -> Vec<Page> {
    let total = pages.len();
    for page in &mut pages {
        page.footer = (total > 1).then(|| {
            footer_run(
                config,
                format!("Page {} of {total}", page.number),
                Align::Center,
            )
        });
    }
    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
