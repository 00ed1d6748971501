//! Normalized, ordered resume sections.
//!
//! `DocumentModel::build` applies every presence rule (blank fields and empty
//! lists suppress their section, heading included) and fixes the section order
//! for the user type. Renderers only ever see non-empty sections.

use serde::Serialize;

use crate::models::resume::{non_blank, non_blank_items, non_blank_str};
use crate::models::{ResumeData, UserType};

// ────────────────────────────────────────────────────────────────────────────
// Section kinds and ordering
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    CareerObjective,
    Experience,
    Education,
    Projects,
    Skills,
    Certifications,
    AchievementsExtras,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Summary,
        SectionKind::CareerObjective,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Skills,
        SectionKind::Certifications,
        SectionKind::AchievementsExtras,
    ];

    /// Upper-cased heading text.
    pub fn title(&self, user_type: UserType) -> &'static str {
        match self {
            SectionKind::Summary => "PROFESSIONAL SUMMARY",
            SectionKind::CareerObjective => "CAREER OBJECTIVE",
            SectionKind::Experience if user_type == UserType::Fresher => "WORK EXPERIENCE",
            SectionKind::Experience => "EXPERIENCE",
            SectionKind::Education => "EDUCATION",
            SectionKind::Projects => "PROJECTS",
            SectionKind::Skills => "SKILLS",
            SectionKind::Certifications => "CERTIFICATIONS",
            SectionKind::AchievementsExtras => "ACHIEVEMENTS & EXTRAS",
        }
    }
}

/// Narrative first, then the body sections in the order fixed for the stage.
pub fn section_order(user_type: UserType) -> &'static [SectionKind] {
    use SectionKind::*;

    match user_type {
        UserType::Experienced => &[
            Summary,
            Experience,
            Projects,
            Skills,
            Certifications,
            Education,
        ],
        UserType::Fresher => &[
            Summary,
            Education,
            Experience,
            Projects,
            Skills,
            Certifications,
            AchievementsExtras,
        ],
        UserType::Student => &[
            CareerObjective,
            Education,
            Skills,
            Projects,
            Experience,
            Certifications,
            AchievementsExtras,
        ],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentModel {
    pub user_type: UserType,
    pub header: Header,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    /// Trimmed; empty when the resume has no usable name.
    pub name: String,
    pub contact: Vec<ContactItem>,
}

impl Header {
    /// Non-empty contact fields joined with a pipe.
    pub fn contact_line(&self) -> String {
        self.contact
            .iter()
            .map(|item| item.value.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Location,
    Phone,
    Email,
    Linkedin,
    Github,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub value: String,
}

impl ContactItem {
    pub fn label(&self) -> &'static str {
        match self.kind {
            ContactKind::Location => "Location",
            ContactKind::Phone => "Phone no",
            ContactKind::Email => "Email",
            ContactKind::Linkedin => "LinkedIn",
            ContactKind::Github => "GitHub",
        }
    }

    /// Link target for formats that support hyperlinks. Profile links without a
    /// scheme get `https://`.
    pub fn href(&self) -> Option<String> {
        match self.kind {
            ContactKind::Location => None,
            ContactKind::Phone => Some(format!("tel:{}", self.value.replace(' ', ""))),
            ContactKind::Email => Some(format!("mailto:{}", self.value)),
            ContactKind::Linkedin | ContactKind::Github => {
                if self.value.starts_with("http://") || self.value.starts_with("https://") {
                    Some(self.value.clone())
                } else {
                    Some(format!("https://{}", self.value))
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "entries", rename_all = "snake_case")]
pub enum SectionBody {
    Paragraph(String),
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    Projects(Vec<ProjectEntry>),
    Skills(Vec<SkillLine>),
    /// Already normalized to one display line each.
    Certifications(Vec<String>),
    Extras(Vec<ExtrasGroup>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceEntry {
    pub role: String,
    /// "company, location" or just the company.
    pub organization: String,
    pub date: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub date: Option<String>,
    pub cgpa: Option<String>,
    pub coursework: Vec<String>,
}

impl EducationEntry {
    /// Secondary lines under the school, in drawing order.
    pub fn detail_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(cgpa) = &self.cgpa {
            lines.push(format!("CGPA: {cgpa}"));
        }
        if !self.coursework.is_empty() {
            lines.push(format!("Relevant Coursework: {}", self.coursework.join(", ")));
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectEntry {
    pub title: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillLine {
    pub category: String,
    pub items: Vec<String>,
}

impl SkillLine {
    /// Bold inline label, trailing space included. Empty for an
    /// uncategorized list.
    pub fn label(&self) -> String {
        if self.category.is_empty() {
            String::new()
        } else {
            format!("{}: ", self.category)
        }
    }

    pub fn list_text(&self) -> String {
        self.items.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtrasGroup {
    pub label: &'static str,
    pub content: ExtrasContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrasContent {
    Items(Vec<String>),
    Paragraph(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Construction
// ────────────────────────────────────────────────────────────────────────────

impl DocumentModel {
    pub fn build(data: &ResumeData, user_type: UserType) -> Self {
        let sections = section_order(user_type)
            .iter()
            .filter_map(|&kind| {
                build_body(kind, data).map(|body| Section {
                    kind,
                    title: kind.title(user_type),
                    body,
                })
            })
            .collect();

        DocumentModel {
            user_type,
            header: build_header(data),
            sections,
        }
    }

    /// Heading sequence in drawing order.
    pub fn titles(&self) -> Vec<&'static str> {
        self.sections.iter().map(|section| section.title).collect()
    }
}

fn build_header(data: &ResumeData) -> Header {
    let fields = [
        (ContactKind::Location, &data.location),
        (ContactKind::Phone, &data.phone),
        (ContactKind::Email, &data.email),
        (ContactKind::Linkedin, &data.linkedin),
        (ContactKind::Github, &data.github),
    ];

    let contact = fields
        .into_iter()
        .filter_map(|(kind, value)| {
            non_blank(value).map(|value| ContactItem {
                kind,
                value: value.to_string(),
            })
        })
        .collect();

    Header {
        name: data.name.trim().to_string(),
        contact,
    }
}

fn build_body(kind: SectionKind, data: &ResumeData) -> Option<SectionBody> {
    let body = match kind {
        SectionKind::Summary => SectionBody::Paragraph(non_blank(&data.summary)?.to_string()),
        SectionKind::CareerObjective => {
            SectionBody::Paragraph(non_blank(&data.career_objective)?.to_string())
        }
        SectionKind::Experience => SectionBody::Experience(non_empty(
            data.work_experience
                .iter()
                .map(|job| ExperienceEntry {
                    role: job.role.trim().to_string(),
                    organization: match non_blank(&job.location) {
                        Some(location) => format!("{}, {location}", job.company.trim()),
                        None => job.company.trim().to_string(),
                    },
                    date: non_blank_str(&job.year).map(str::to_string),
                    bullets: non_blank_items(&job.bullets),
                })
                .filter(|entry| {
                    !entry.role.is_empty()
                        || !entry.organization.is_empty()
                        || !entry.bullets.is_empty()
                })
                .collect(),
        )?),
        SectionKind::Education => SectionBody::Education(non_empty(
            data.education
                .iter()
                .map(|edu| EducationEntry {
                    degree: edu.degree.trim().to_string(),
                    school: edu.school.trim().to_string(),
                    date: non_blank_str(&edu.year).map(str::to_string),
                    cgpa: non_blank(&edu.cgpa).map(str::to_string),
                    coursework: non_blank_items(&edu.relevant_coursework),
                })
                .filter(|entry| !entry.degree.is_empty() || !entry.school.is_empty())
                .collect(),
        )?),
        SectionKind::Projects => SectionBody::Projects(non_empty(
            data.projects
                .iter()
                .map(|project| ProjectEntry {
                    title: project.title.trim().to_string(),
                    bullets: non_blank_items(&project.bullets),
                })
                .filter(|entry| !entry.title.is_empty() || !entry.bullets.is_empty())
                .collect(),
        )?),
        SectionKind::Skills => SectionBody::Skills(non_empty(
            data.skills
                .iter()
                .map(|skill| SkillLine {
                    category: skill.category.trim().to_string(),
                    items: non_blank_items(&skill.list),
                })
                .filter(|line| !line.items.is_empty())
                .collect(),
        )?),
        SectionKind::Certifications => SectionBody::Certifications(non_empty(
            data.certifications
                .iter()
                .filter_map(|cert| cert.display_text())
                .collect(),
        )?),
        SectionKind::AchievementsExtras => SectionBody::Extras(non_empty(extras_groups(data))?),
    };

    Some(body)
}

fn extras_groups(data: &ResumeData) -> Vec<ExtrasGroup> {
    let lists = [
        ("Achievements:", &data.achievements),
        ("Extra-curricular Activities:", &data.extra_curricular_activities),
        ("Languages Known:", &data.languages_known),
    ];

    let mut groups: Vec<ExtrasGroup> = lists
        .into_iter()
        .filter_map(|(label, items)| {
            let items = non_blank_items(items);
            (!items.is_empty()).then_some(ExtrasGroup {
                label,
                content: ExtrasContent::Items(items),
            })
        })
        .collect();

    if let Some(details) = non_blank(&data.personal_details) {
        groups.push(ExtrasGroup {
            label: "Personal Details:",
            content: ExtrasContent::Paragraph(details.to_string()),
        });
    }

    groups
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::resume::{Certification, Education, Project, Skill, WorkExperience};

    /// A resume with every section populated.
    pub(crate) fn full_resume() -> ResumeData {
        ResumeData {
            name: "Jane Q Public".into(),
            target_role: Some("Senior SRE".into()),
            location: Some("Berlin".into()),
            phone: Some("+49 30 1234".into()),
            email: Some("jane@example.com".into()),
            linkedin: Some("linkedin.com/in/jane".into()),
            github: Some("https://github.com/jane".into()),
            summary: Some("Reliability engineer with eight years of on-call experience.".into()),
            career_objective: Some("Looking for a first role in infrastructure.".into()),
            work_experience: vec![WorkExperience {
                role: "Site Reliability Engineer".into(),
                company: "Acme".into(),
                location: Some("Remote".into()),
                year: "2019 - Present".into(),
                bullets: vec!["Cut paging volume by half".into()],
            }],
            education: vec![Education {
                degree: "B.Sc. Computer Science".into(),
                school: "TU Berlin".into(),
                year: "2015".into(),
                cgpa: Some("8.9".into()),
                relevant_coursework: vec!["Operating Systems".into(), "Networks".into()],
            }],
            projects: vec![Project {
                title: "chaos-kit".into(),
                bullets: vec!["Fault injection for Kubernetes".into()],
                github_url: Some("https://github.com/jane/chaos-kit".into()),
            }],
            skills: vec![Skill {
                category: "Languages".into(),
                list: vec!["Rust".into(), "Go".into()],
            }],
            certifications: vec![Certification::PlainText("CKA".into())],
            achievements: vec!["Hackathon winner".into()],
            extra_curricular_activities: vec!["Chess club".into()],
            languages_known: vec!["English".into(), "German".into()],
            personal_details: Some("Date of birth: 1 Jan 1993".into()),
        }
    }

    // ── ordering ────────────────────────────────────────────────────────────

    #[test]
    fn test_experienced_order() {
        let model = DocumentModel::build(&full_resume(), UserType::Experienced);
        assert_eq!(
            model.titles(),
            vec![
                "PROFESSIONAL SUMMARY",
                "EXPERIENCE",
                "PROJECTS",
                "SKILLS",
                "CERTIFICATIONS",
                "EDUCATION",
            ]
        );
    }

    #[test]
    fn test_fresher_order_and_heading() {
        let model = DocumentModel::build(&full_resume(), UserType::Fresher);
        assert_eq!(
            model.titles(),
            vec![
                "PROFESSIONAL SUMMARY",
                "EDUCATION",
                "WORK EXPERIENCE",
                "PROJECTS",
                "SKILLS",
                "CERTIFICATIONS",
                "ACHIEVEMENTS & EXTRAS",
            ]
        );
    }

    #[test]
    fn test_student_order_uses_objective() {
        let model = DocumentModel::build(&full_resume(), UserType::Student);
        assert_eq!(
            model.titles(),
            vec![
                "CAREER OBJECTIVE",
                "EDUCATION",
                "SKILLS",
                "PROJECTS",
                "EXPERIENCE",
                "CERTIFICATIONS",
                "ACHIEVEMENTS & EXTRAS",
            ]
        );
    }

    // ── suppression ─────────────────────────────────────────────────────────

    #[test]
    fn test_empty_fields_suppress_their_section() {
        let mut data = full_resume();
        data.summary = Some("   ".into());
        data.work_experience.clear();
        data.projects = vec![Project::default()];
        data.skills = vec![Skill {
            category: "Tools".into(),
            list: vec![" ".into()],
        }];
        data.certifications = vec![Certification::PlainText(String::new())];

        let model = DocumentModel::build(&data, UserType::Experienced);
        assert_eq!(model.titles(), vec!["EDUCATION"]);
    }

    #[test]
    fn test_extras_hidden_for_experienced() {
        let model = DocumentModel::build(&full_resume(), UserType::Experienced);
        assert!(!model
            .sections
            .iter()
            .any(|s| s.kind == SectionKind::AchievementsExtras));
    }

    #[test]
    fn test_extras_groups_skip_empty_lists() {
        let mut data = full_resume();
        data.achievements.clear();
        data.personal_details = None;
        let model = DocumentModel::build(&data, UserType::Fresher);
        let extras = model
            .sections
            .iter()
            .find(|s| s.kind == SectionKind::AchievementsExtras)
            .unwrap();
        let SectionBody::Extras(groups) = &extras.body else {
            panic!("expected extras body");
        };
        let labels: Vec<_> = groups.iter().map(|g| g.label).collect();
        assert_eq!(labels, vec!["Extra-curricular Activities:", "Languages Known:"]);
    }

    // ── normalization ───────────────────────────────────────────────────────

    #[test]
    fn test_experience_organization_joins_location() {
        let model = DocumentModel::build(&full_resume(), UserType::Experienced);
        let SectionBody::Experience(entries) = &model.sections[1].body else {
            panic!("expected experience body");
        };
        assert_eq!(entries[0].organization, "Acme, Remote");
        assert_eq!(entries[0].date.as_deref(), Some("2019 - Present"));
    }

    #[test]
    fn test_education_detail_lines() {
        let model = DocumentModel::build(&full_resume(), UserType::Experienced);
        let SectionBody::Education(entries) = &model.sections.last().unwrap().body else {
            panic!("expected education body");
        };
        assert_eq!(
            entries[0].detail_lines(),
            vec!["CGPA: 8.9", "Relevant Coursework: Operating Systems, Networks"]
        );
    }

    #[test]
    fn test_contact_line_skips_blank_fields() {
        let mut data = full_resume();
        data.phone = None;
        data.github = Some("".into());
        let model = DocumentModel::build(&data, UserType::Experienced);
        assert_eq!(
            model.header.contact_line(),
            "Berlin | jane@example.com | linkedin.com/in/jane"
        );
    }

    #[test]
    fn test_contact_hrefs() {
        let model = DocumentModel::build(&full_resume(), UserType::Experienced);
        let hrefs: Vec<_> = model.header.contact.iter().map(|c| c.href()).collect();
        assert_eq!(
            hrefs,
            vec![
                None,
                Some("tel:+49301234".to_string()),
                Some("mailto:jane@example.com".to_string()),
                Some("https://linkedin.com/in/jane".to_string()),
                Some("https://github.com/jane".to_string()),
            ]
        );
    }

    #[test]
    fn test_skill_label_omitted_without_category() {
        let line = SkillLine {
            category: String::new(),
            items: vec!["Rust".into(), "Go".into()],
        };
        assert_eq!(line.label(), "");
        assert_eq!(line.list_text(), "Rust, Go");

        let line = SkillLine {
            category: "Languages".into(),
            ..line
        };
        assert_eq!(line.label(), "Languages: ");
    }
}
