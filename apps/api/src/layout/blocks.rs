//! Block renderers: draw one header or section onto the page cursor and
//! report the vertical space consumed.
//!
//! Every renderer follows the same break discipline:
//! * a section heading is only drawn where it fits together with the first
//!   entry's minimum block, so headings are never orphaned;
//! * an entry's header (title, subtitle, date) is only drawn where it fits
//!   together with its first content item;
//! * list items are measured and placed one at a time, so page breaks fall
//!   between items (or between lines of an item taller than a page).

use crate::document::sections::{
    EducationEntry, ExperienceEntry, ExtrasContent, ExtrasGroup, Header, ProjectEntry, Section,
    SectionBody, SkillLine,
};
use crate::layout::config::{LayoutConfig, Rgb};
use crate::layout::cursor::{PageCursor, Placement, TextRole, TextRun};
use crate::layout::font_metrics::{FontWeight, PT_TO_MM};
use crate::layout::wrap::{measure, measure_with_first_line, Align, WrappedText};

const HEADER_RULE_THICKNESS: f32 = 0.4;
const SECTION_RULE_THICKNESS: f32 = 0.3;
/// Minimum horizontal gap between an entry title and its date label.
const DATE_GAP: f32 = 4.0;
const SUBTITLE_GAP: f32 = 1.0;
const PROJECT_TITLE_GAP: f32 = 2.0;
const EXTRAS_ITEM_INDENT_FACTOR: f32 = 1.5;

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Name (upper-cased, centered), pipe-joined contact line and a full-width
/// rule. Draws nothing when the name is blank.
pub fn render_header(cursor: &mut PageCursor<'_>, header: &Header) -> f32 {
    if header.name.is_empty() {
        return 0.0;
    }

    let config = cursor.config();
    let start = cursor.total_advanced();

    cursor.move_to(config.spacing.name_from_top.max(config.margins.top));

    let name = measure(
        &header.name.to_uppercase(),
        config.fonts.name,
        config.content_width(),
        config,
    );
    cursor.place(&name, centered(config, TextRole::Name));
    cursor.pad(config.spacing.after_name);

    let contact_line = header.contact_line();
    if !contact_line.is_empty() {
        let contact = measure(
            &contact_line,
            config.fonts.contact,
            config.content_width(),
            config,
        );
        cursor.place(&contact, centered(config, TextRole::Contact));
        cursor.pad(config.spacing.after_contact);
    }

    cursor.push_rule(cursor.y(), HEADER_RULE_THICKNESS, Rgb::BLACK);
    cursor.pad(config.spacing.after_header_rule);

    cursor.total_advanced() - start
}

/// Draws one section, heading included.
pub fn render_section(cursor: &mut PageCursor<'_>, section: &Section) -> f32 {
    let start = cursor.total_advanced();

    match &section.body {
        SectionBody::Paragraph(text) => render_paragraph(cursor, section.title, text),
        SectionBody::Experience(entries) => render_experience(cursor, section.title, entries),
        SectionBody::Education(entries) => render_education(cursor, section.title, entries),
        SectionBody::Projects(entries) => render_projects(cursor, section.title, entries),
        SectionBody::Skills(lines) => render_skills(cursor, section.title, lines),
        SectionBody::Certifications(items) => render_certifications(cursor, section.title, items),
        SectionBody::Extras(groups) => render_extras(cursor, section.title, groups),
    }

    cursor.total_advanced() - start
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pieces
// ────────────────────────────────────────────────────────────────────────────

fn at(x: f32, width: f32, color: Rgb, role: TextRole) -> Placement {
    Placement {
        x,
        width,
        align: Align::Left,
        color,
        role,
    }
}

fn full_width(config: &LayoutConfig, color: Rgb, role: TextRole) -> Placement {
    at(config.margins.left, config.content_width(), color, role)
}

fn centered(config: &LayoutConfig, role: TextRole) -> Placement {
    Placement {
        align: Align::Center,
        ..full_width(config, config.colors.primary, role)
    }
}

fn indented(config: &LayoutConfig, indent: f32, role: TextRole) -> Placement {
    at(
        config.margins.left + indent,
        config.content_width() - indent,
        config.colors.primary,
        role,
    )
}

fn bullet(config: &LayoutConfig, text: &str, indent: f32) -> WrappedText {
    measure(
        &format!("• {text}"),
        config.fonts.body,
        config.content_width() - indent,
        config,
    )
}

/// Space a block needs before the next page break can fall inside it: the
/// whole block when it fits on a page, otherwise its first line.
fn leading_height(config: &LayoutConfig, block: &WrappedText) -> f32 {
    if block.height <= config.content_height() {
        block.height
    } else {
        block.line_height
    }
}

fn heading_height(config: &LayoutConfig) -> f32 {
    config.line_height(config.fonts.section_title) + config.spacing.section_after
}

/// Lead-in spacing, orphan check, upper-cased title and a grey rule.
fn render_heading(cursor: &mut PageCursor<'_>, title: &str, first_block: f32) {
    let config = cursor.config();

    cursor.pad(config.spacing.section_before);
    cursor.ensure_space(heading_height(config) + first_block);

    let style = config.fonts.section_title;
    let block = measure(&title.to_uppercase(), style, config.content_width(), config);
    cursor.place(
        &block,
        full_width(config, config.colors.primary, TextRole::SectionTitle),
    );

    let rule_y = cursor.y() - style.size * PT_TO_MM / 2.0 + 0.5;
    cursor.push_rule(rule_y, SECTION_RULE_THICKNESS, config.colors.rule);
    cursor.pad(config.spacing.section_after);
}

/// Places bullet blocks with the list spacing before and after.
fn render_bullets(cursor: &mut PageCursor<'_>, bullets: &[WrappedText], placement: Placement) {
    if bullets.is_empty() {
        return;
    }
    let spacing = cursor.config().spacing.bullet_list;
    cursor.pad(spacing);
    for block in bullets {
        cursor.place(block, placement);
    }
    cursor.pad(spacing);
}

// ── dated entry header ──────────────────────────────────────────────────────

/// Title and subtitle lines of an experience or education entry, with the
/// right-aligned date label. The date wraps within a third of the content
/// width; the title wraps clear of its widest line.
struct DatedHeader {
    title: WrappedText,
    subtitle: WrappedText,
    date: Option<WrappedText>,
}

impl DatedHeader {
    fn measure(config: &LayoutConfig, title: &str, subtitle: &str, date: Option<&str>) -> Self {
        let content = config.content_width();
        let style = config.fonts.secondary;
        let date = date
            .map(|date| measure(date, style, content / 3.0, config))
            .filter(|block| !block.is_empty());

        let (title_width, subtitle_width) = match &date {
            Some(block) => {
                let metrics = config.metrics(style);
                let widest = block
                    .lines
                    .iter()
                    .map(|line| metrics.width_mm(line, style.size))
                    .fold(0.0_f32, f32::max);
                let beside_date = content - widest - DATE_GAP;
                (beside_date, beside_date.min(content / 1.5))
            }
            None => (content, content),
        };

        DatedHeader {
            title: measure(title, config.fonts.sub_header, title_width, config),
            subtitle: measure(subtitle, style, subtitle_width, config),
            date,
        }
    }

    fn height(&self) -> f32 {
        let text = self.title.height + self.subtitle.height;
        let date = self.date.as_ref().map_or(0.0, |block| block.height);
        text.max(date) + SUBTITLE_GAP
    }

    /// The date is anchored to the entry's starting position, so it lines up
    /// with the title however far the subtitle wraps.
    fn draw(&self, cursor: &mut PageCursor<'_>) {
        let config = cursor.config();
        let entry_top = cursor.y();
        let page = cursor.page_number();

        if let Some(date) = &self.date {
            cursor.draw_lines(
                &date.lines,
                date.style,
                date.line_height,
                Placement {
                    align: Align::Right,
                    ..full_width(config, config.colors.primary, TextRole::Date)
                },
            );
        }

        cursor.place(
            &self.title,
            full_width(config, config.colors.primary, TextRole::EntryTitle),
        );
        cursor.place(
            &self.subtitle,
            full_width(config, config.colors.primary, TextRole::EntrySubtitle),
        );

        if let Some(date) = &self.date {
            let date_bottom = entry_top + date.height;
            if cursor.page_number() == page && cursor.y() < date_bottom {
                cursor.advance(date_bottom - cursor.y());
            }
        }
        cursor.pad(SUBTITLE_GAP);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn render_paragraph(cursor: &mut PageCursor<'_>, title: &str, text: &str) {
    let config = cursor.config();
    let block = measure(text, config.fonts.body, config.content_width(), config);

    render_heading(cursor, title, leading_height(config, &block));
    cursor.place(&block, full_width(config, config.colors.primary, TextRole::Body));
    cursor.pad(config.spacing.after_paragraph);
}

fn render_experience(cursor: &mut PageCursor<'_>, title: &str, entries: &[ExperienceEntry]) {
    let config = cursor.config();
    let indent = config.spacing.bullet_indent;

    let measured: Vec<(DatedHeader, Vec<WrappedText>)> = entries
        .iter()
        .map(|entry| {
            (
                DatedHeader::measure(config, &entry.role, &entry.organization, entry.date.as_deref()),
                entry.bullets.iter().map(|b| bullet(config, b, indent)).collect(),
            )
        })
        .collect();

    let min_block = |(header, bullets): &(DatedHeader, Vec<WrappedText>)| {
        header.height()
            + bullets
                .first()
                .map(|first| config.spacing.bullet_list + leading_height(config, first))
                .unwrap_or(0.0)
    };

    render_heading(cursor, title, measured.first().map(min_block).unwrap_or(0.0));

    for (i, entry) in measured.iter().enumerate() {
        if i > 0 {
            cursor.pad(config.spacing.between_entries);
        }
        cursor.ensure_space(min_block(entry));

        let (header, bullets) = entry;
        header.draw(cursor);
        render_bullets(cursor, bullets, indented(config, indent, TextRole::Bullet));
    }
}

fn render_education(cursor: &mut PageCursor<'_>, title: &str, entries: &[EducationEntry]) {
    let config = cursor.config();
    let style = config.fonts.body;

    let measured: Vec<(DatedHeader, Vec<WrappedText>)> = entries
        .iter()
        .map(|entry| {
            (
                DatedHeader::measure(config, &entry.degree, &entry.school, entry.date.as_deref()),
                entry
                    .detail_lines()
                    .iter()
                    .map(|line| measure(line, style, config.content_width(), config))
                    .collect(),
            )
        })
        .collect();

    let min_block = |(header, details): &(DatedHeader, Vec<WrappedText>)| {
        header.height()
            + details
                .first()
                .map(|first| leading_height(config, first))
                .unwrap_or(0.0)
    };

    render_heading(cursor, title, measured.first().map(min_block).unwrap_or(0.0));

    for (i, entry) in measured.iter().enumerate() {
        if i > 0 {
            cursor.pad(config.spacing.between_entries);
        }
        cursor.ensure_space(min_block(entry));

        let (header, details) = entry;
        header.draw(cursor);
        for detail in details {
            cursor.place(
                detail,
                full_width(config, config.colors.secondary, TextRole::Body),
            );
        }
    }
}

fn render_projects(cursor: &mut PageCursor<'_>, title: &str, entries: &[ProjectEntry]) {
    let config = cursor.config();
    let indent = config.spacing.bullet_indent;

    let measured: Vec<(WrappedText, Vec<WrappedText>)> = entries
        .iter()
        .map(|entry| {
            (
                measure(
                    &entry.title,
                    config.fonts.sub_header,
                    config.content_width(),
                    config,
                ),
                entry.bullets.iter().map(|b| bullet(config, b, indent)).collect(),
            )
        })
        .collect();

    let min_block = |(title, bullets): &(WrappedText, Vec<WrappedText>)| {
        title.height
            + PROJECT_TITLE_GAP
            + bullets
                .first()
                .map(|first| config.spacing.bullet_list + leading_height(config, first))
                .unwrap_or(0.0)
    };

    render_heading(cursor, title, measured.first().map(min_block).unwrap_or(0.0));

    for (i, entry) in measured.iter().enumerate() {
        if i > 0 {
            cursor.pad(config.spacing.between_entries);
        }
        cursor.ensure_space(min_block(entry));

        let (title, bullets) = entry;
        cursor.place(
            title,
            full_width(config, config.colors.primary, TextRole::EntryTitle),
        );
        cursor.pad(PROJECT_TITLE_GAP);
        render_bullets(cursor, bullets, indented(config, indent, TextRole::Bullet));
    }
}

/// One skill line: a bold label followed inline by the list, whose
/// continuation lines return to the left margin.
struct MeasuredSkill {
    label: String,
    label_width: f32,
    list: WrappedText,
}

impl MeasuredSkill {
    fn measure(config: &LayoutConfig, line: &SkillLine) -> Self {
        let label = line.label();
        let label_style = config.fonts.body.with_weight(FontWeight::Bold);
        let label_width = config.metrics(label_style).width_mm(&label, label_style.size);
        let content = config.content_width();
        let list = measure_with_first_line(
            &line.list_text(),
            config.fonts.body,
            (content - label_width).max(0.0),
            content,
            config,
        );

        MeasuredSkill {
            label,
            label_width,
            list,
        }
    }

    fn height(&self) -> f32 {
        self.list.line_count().max(1) as f32 * self.list.line_height
    }
}

fn render_skills(cursor: &mut PageCursor<'_>, title: &str, lines: &[SkillLine]) {
    let config = cursor.config();
    let measured: Vec<MeasuredSkill> = lines
        .iter()
        .map(|line| MeasuredSkill::measure(config, line))
        .collect();

    let left = config.margins.left;
    let body = config.fonts.body;
    let line_height = config.line_height(body);

    let first_block = measured
        .first()
        .map(|skill| {
            if skill.height() <= config.content_height() {
                skill.height()
            } else {
                line_height
            }
        })
        .unwrap_or(0.0);
    render_heading(cursor, title, first_block);

    for (i, skill) in measured.iter().enumerate() {
        if i > 0 {
            cursor.pad(config.spacing.between_skills);
        }

        let atomic = skill.height() <= config.content_height();
        cursor.ensure_space(if atomic { skill.height() } else { line_height });

        if !skill.label.is_empty() {
            cursor.push_text(TextRun {
                text: skill.label.clone(),
                x: left,
                y: cursor.y(),
                style: body.with_weight(FontWeight::Bold),
                color: config.colors.primary,
                role: TextRole::Label,
            });
        }

        if skill.list.is_empty() {
            cursor.advance(line_height);
            continue;
        }

        for (n, line) in skill.list.lines.iter().enumerate() {
            if n > 0 && !atomic {
                cursor.ensure_space(line_height);
            }
            if !line.is_empty() {
                cursor.push_text(TextRun {
                    text: line.clone(),
                    x: if n == 0 { left + skill.label_width } else { left },
                    y: cursor.y(),
                    style: body,
                    color: config.colors.primary,
                    role: TextRole::Body,
                });
            }
            cursor.advance(line_height);
        }
    }
}

fn render_certifications(cursor: &mut PageCursor<'_>, title: &str, items: &[String]) {
    let config = cursor.config();
    let indent = config.spacing.bullet_indent;
    let bullets: Vec<WrappedText> = items.iter().map(|item| bullet(config, item, indent)).collect();

    let first_block = bullets
        .first()
        .map(|first| config.spacing.bullet_list + leading_height(config, first))
        .unwrap_or(0.0);
    render_heading(cursor, title, first_block);
    render_bullets(cursor, &bullets, indented(config, indent, TextRole::Bullet));
}

fn render_extras(cursor: &mut PageCursor<'_>, title: &str, groups: &[ExtrasGroup]) {
    let config = cursor.config();
    let label_indent = config.spacing.bullet_indent;
    let item_indent = label_indent * EXTRAS_ITEM_INDENT_FACTOR;
    let label_style = config.fonts.body.with_weight(FontWeight::Bold);

    let measured: Vec<(WrappedText, Vec<WrappedText>, TextRole)> = groups
        .iter()
        .map(|group| {
            let label = measure(
                group.label,
                label_style,
                config.content_width() - label_indent,
                config,
            );
            let (content, role) = match &group.content {
                ExtrasContent::Items(items) => (
                    items.iter().map(|item| bullet(config, item, item_indent)).collect(),
                    TextRole::Bullet,
                ),
                ExtrasContent::Paragraph(text) => (
                    vec![measure(
                        text,
                        config.fonts.body,
                        config.content_width() - item_indent,
                        config,
                    )],
                    TextRole::Body,
                ),
            };
            (label, content, role)
        })
        .collect();

    let min_block = |(label, content, _): &(WrappedText, Vec<WrappedText>, TextRole)| {
        label.height
            + content
                .first()
                .map(|first| leading_height(config, first))
                .unwrap_or(0.0)
    };

    render_heading(cursor, title, measured.first().map(min_block).unwrap_or(0.0));

    for group in &measured {
        cursor.ensure_space(min_block(group));

        let (label, content, role) = group;
        cursor.place(
            label,
            at(
                config.margins.left + label_indent,
                config.content_width() - label_indent,
                config.colors.secondary,
                TextRole::Label,
            ),
        );
        for block in content {
            cursor.place(block, indented(config, item_indent, *role));
        }
        cursor.pad(config.spacing.after_sub_list);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::sections::{DocumentModel, SectionKind};
    use crate::document::sections::tests::full_resume;
    use crate::layout::cursor::Page;
    use crate::models::{ExportOptions, UserType};

    fn make_config() -> LayoutConfig {
        LayoutConfig::from_options(&ExportOptions::default())
    }

    fn section(kind: SectionKind, body: SectionBody) -> Section {
        Section {
            kind,
            title: kind.title(UserType::Experienced),
            body,
        }
    }

    fn job(organization: &str, bullets: Vec<&str>) -> ExperienceEntry {
        ExperienceEntry {
            role: "Staff Engineer".into(),
            organization: organization.into(),
            date: Some("Jan 2021 - Present".into()),
            bullets: bullets.into_iter().map(str::to_string).collect(),
        }
    }

    fn runs_with_role(pages: &[Page], role: TextRole) -> Vec<(usize, TextRun)> {
        pages
            .iter()
            .flat_map(|page| {
                page.texts()
                    .filter(|run| run.role == role)
                    .map(|run| (page.number, run.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    // ── header ──────────────────────────────────────────────────────────────

    #[test]
    fn test_header_centers_upper_cased_name_and_contact() {
        let config = make_config();
        let model = DocumentModel::build(&full_resume(), UserType::Experienced);
        let mut cursor = PageCursor::new(&config);
        let height = render_header(&mut cursor, &model.header);
        assert!(height > 0.0);

        let pages = cursor.into_pages();
        let (_, name) = &runs_with_role(&pages, TextRole::Name)[0];
        assert_eq!(name.text, "JANE Q PUBLIC");
        let width = config.metrics(name.style).width_mm(&name.text, name.style.size);
        let center = config.margins.left + config.content_width() / 2.0;
        assert!((name.x + width / 2.0 - center).abs() < 1e-3);

        let (_, contact) = &runs_with_role(&pages, TextRole::Contact)[0];
        assert!(contact.text.starts_with("Berlin | +49 30 1234"));
        assert_eq!(pages[0].rules().count(), 1);
    }

    #[test]
    fn test_header_without_name_draws_nothing() {
        let config = make_config();
        let mut data = full_resume();
        data.name = "  ".into();
        let model = DocumentModel::build(&data, UserType::Experienced);
        let mut cursor = PageCursor::new(&config);
        assert_eq!(render_header(&mut cursor, &model.header), 0.0);
        assert!(cursor.into_pages()[0].elements.is_empty());
    }

    // ── headings ────────────────────────────────────────────────────────────

    #[test]
    fn test_heading_moves_with_first_entry_to_next_page() {
        let config = make_config();
        let mut cursor = PageCursor::new(&config);
        // Leave room for the heading alone but not the first entry.
        cursor.advance(config.content_height() - heading_height(&config) - 3.0);

        let experience = section(
            SectionKind::Experience,
            SectionBody::Experience(vec![job("Acme", vec!["Shipped things"])]),
        );
        render_section(&mut cursor, &experience);

        let pages = cursor.into_pages();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].section_titles().is_empty());
        assert!(pages[0].rules().next().is_none());
        assert_eq!(pages[1].section_titles(), vec!["EXPERIENCE"]);
    }

    #[test]
    fn test_heading_draws_title_and_rule() {
        let config = make_config();
        let mut cursor = PageCursor::new(&config);
        let certs = section(
            SectionKind::Certifications,
            SectionBody::Certifications(vec!["CKA".into()]),
        );
        let height = render_section(&mut cursor, &certs);
        assert!((height - cursor.total_advanced()).abs() < 1e-5);

        let pages = cursor.into_pages();
        assert_eq!(pages[0].section_titles(), vec!["CERTIFICATIONS"]);
        let rule = pages[0].rules().next().unwrap();
        assert_eq!(rule.x1, config.margins.left);
        assert!((rule.x2 - (config.margins.left + config.content_width())).abs() < 1e-4);
        assert_eq!(rule.color, config.colors.rule);

        let (_, bullet) = &runs_with_role(&pages, TextRole::Bullet)[0];
        assert_eq!(bullet.text, "• CKA");
        assert_eq!(bullet.x, config.margins.left + config.spacing.bullet_indent);
    }

    // ── dated entries ───────────────────────────────────────────────────────

    #[test]
    fn test_date_label_ignores_subtitle_wrapping() {
        let config = make_config();
        let short = job("Acme, Remote", vec!["Did things"]);
        let long = job(
            "Globex Corporation International Holdings Limited Partnership, \
             San Francisco Bay Area, California",
            vec!["Did things"],
        );

        let mut dates = Vec::new();
        let mut subtitle_lines = Vec::new();
        for entry in [short, long] {
            let mut cursor = PageCursor::new(&config);
            render_section(
                &mut cursor,
                &section(SectionKind::Experience, SectionBody::Experience(vec![entry])),
            );
            let pages = cursor.into_pages();
            let (_, date) = runs_with_role(&pages, TextRole::Date).remove(0);
            let (_, title) = runs_with_role(&pages, TextRole::EntryTitle).remove(0);
            assert_eq!(date.y, title.y);
            dates.push(date);
            subtitle_lines.push(runs_with_role(&pages, TextRole::EntrySubtitle).len());
        }

        assert_eq!(subtitle_lines, vec![1, 2]);
        assert_eq!(dates[0].y, dates[1].y);
        assert_eq!(dates[0].x, dates[1].x);
        // Right-aligned on the content edge.
        let width = config.metrics(dates[0].style).width_mm(&dates[0].text, dates[0].style.size);
        assert!((dates[0].x + width - (config.margins.left + config.content_width())).abs() < 1e-3);
    }

    #[test]
    fn test_long_date_stays_in_the_right_third() {
        let config = make_config();
        let mut entry = job("Acme, Remote", vec!["Did things"]);
        entry.role = "Senior Site Reliability Engineer for Platform Infrastructure".into();
        entry.date = Some(
            "January 2015 - March 2016, then again September 2017 - December 2019 (contract)"
                .into(),
        );

        let mut cursor = PageCursor::new(&config);
        render_section(
            &mut cursor,
            &section(SectionKind::Experience, SectionBody::Experience(vec![entry])),
        );
        let pages = cursor.into_pages();

        let dates = runs_with_role(&pages, TextRole::Date);
        assert!(dates.len() > 1, "date did not wrap");
        let right_third = config.margins.left + config.content_width() * 2.0 / 3.0;
        let leftmost_date = dates
            .iter()
            .map(|(_, run)| run.x)
            .fold(f32::INFINITY, f32::min);
        assert!(leftmost_date >= right_third - 1e-3);

        for (_, run) in runs_with_role(&pages, TextRole::EntryTitle) {
            let end = run.x + config.metrics(run.style).width_mm(&run.text, run.style.size);
            assert!(end <= leftmost_date - DATE_GAP + 1e-3, "{} overlaps the date", run.text);
        }

        let (_, last_date) = dates.last().unwrap();
        let (_, first_bullet) = runs_with_role(&pages, TextRole::Bullet).remove(0);
        assert!(first_bullet.y > last_date.y);
    }

    #[test]
    fn test_entry_title_stays_with_first_bullet() {
        let config = make_config();
        let mut cursor = PageCursor::new(&config);
        let long_bullet = "Migrated the billing platform to an event-sourced design ".repeat(4);
        let experience = section(
            SectionKind::Experience,
            SectionBody::Experience(vec![
                job("Acme", vec!["Short bullet"]),
                job("Globex", vec![long_bullet.as_str()]),
            ]),
        );
        // Push the second entry towards the page bottom.
        cursor.advance(config.content_height() - 45.0);
        render_section(&mut cursor, &experience);

        let pages = cursor.into_pages();
        let titles = runs_with_role(&pages, TextRole::EntryTitle);
        let bullets = runs_with_role(&pages, TextRole::Bullet);
        let second_title_page = titles[1].0;
        let second_bullet_page = bullets
            .iter()
            .find(|(_, run)| run.text.starts_with("• Migrated"))
            .map(|(page, _)| *page)
            .unwrap();
        assert_eq!(second_title_page, second_bullet_page);
    }

    #[test]
    fn test_no_gap_after_last_entry() {
        let config = make_config();
        let mut cursor = PageCursor::new(&config);
        let projects = section(
            SectionKind::Projects,
            SectionBody::Projects(vec![ProjectEntry {
                title: "chaos-kit".into(),
                bullets: vec!["Fault injection".into()],
            }]),
        );
        render_section(&mut cursor, &projects);
        let end = cursor.y();

        let pages = cursor.into_pages();
        let (_, last) = runs_with_role(&pages, TextRole::Bullet).pop().unwrap();
        let expected = last.y + config.line_height(config.fonts.body) + config.spacing.bullet_list;
        assert!((end - expected).abs() < 1e-4);
    }

    #[test]
    fn test_education_details_use_secondary_color() {
        let config = make_config();
        let model = DocumentModel::build(&full_resume(), UserType::Student);
        let education = model
            .sections
            .iter()
            .find(|s| s.kind == SectionKind::Education)
            .unwrap();
        let mut cursor = PageCursor::new(&config);
        render_section(&mut cursor, education);

        let pages = cursor.into_pages();
        let details: Vec<_> = runs_with_role(&pages, TextRole::Body)
            .into_iter()
            .map(|(_, run)| run)
            .collect();
        assert_eq!(details[0].text, "CGPA: 8.9");
        assert!(details.iter().all(|run| run.color == config.colors.secondary));
    }

    // ── skills ──────────────────────────────────────────────────────────────

    #[test]
    fn test_skill_list_follows_label_then_wraps_to_left_margin() {
        let config = make_config();
        let items: Vec<String> = (0..40).map(|i| format!("Technology{i}")).collect();
        let skills = section(
            SectionKind::Skills,
            SectionBody::Skills(vec![SkillLine {
                category: "Tools".into(),
                items,
            }]),
        );
        let mut cursor = PageCursor::new(&config);
        render_section(&mut cursor, &skills);

        let pages = cursor.into_pages();
        let (_, label) = &runs_with_role(&pages, TextRole::Label)[0];
        assert_eq!(label.text, "Tools: ");
        assert_eq!(label.x, config.margins.left);

        let lines = runs_with_role(&pages, TextRole::Body);
        assert!(lines.len() > 1);
        assert!(lines[0].1.x > config.margins.left);
        assert_eq!(lines[0].1.y, label.y);
        assert!(lines[1..].iter().all(|(_, run)| run.x == config.margins.left));
    }

    // ── extras ──────────────────────────────────────────────────────────────

    #[test]
    fn test_extras_labels_and_indented_items() {
        let config = make_config();
        let model = DocumentModel::build(&full_resume(), UserType::Fresher);
        let extras = model
            .sections
            .iter()
            .find(|s| s.kind == SectionKind::AchievementsExtras)
            .unwrap();
        let mut cursor = PageCursor::new(&config);
        render_section(&mut cursor, extras);

        let pages = cursor.into_pages();
        let labels: Vec<String> = runs_with_role(&pages, TextRole::Label)
            .into_iter()
            .map(|(_, run)| run.text)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Achievements:",
                "Extra-curricular Activities:",
                "Languages Known:",
                "Personal Details:",
            ]
        );

        let item_x = config.margins.left + config.spacing.bullet_indent * EXTRAS_ITEM_INDENT_FACTOR;
        let bullets = runs_with_role(&pages, TextRole::Bullet);
        assert!(bullets.iter().all(|(_, run)| (run.x - item_x).abs() < 1e-4));
        let (_, details) = runs_with_role(&pages, TextRole::Body).remove(0);
        assert_eq!(details.text, "Date of birth: 1 Jan 1993");
    }

    // ── cursor invariant ────────────────────────────────────────────────────

    #[test]
    fn test_cursor_stays_within_content_area_after_each_section() {
        let config = make_config();
        let model = DocumentModel::build(&full_resume(), UserType::Fresher);
        let mut cursor = PageCursor::new(&config);
        render_header(&mut cursor, &model.header);
        for section in &model.sections {
            for _ in 0..8 {
                render_section(&mut cursor, section);
                assert!(cursor.y() >= config.margins.top - 1e-4);
                assert!(cursor.y() <= config.max_y() + 1e-3, "y = {}", cursor.y());
            }
        }
    }
}
