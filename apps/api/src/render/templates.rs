//! Markup skeleton and stylesheet for the flow (Word HTML) document.
//!
//! `{key}` placeholders are filled in a single pass by `flow::fill`; every
//! substituted value is escaped by the caller except `{body}`, which is
//! generated markup.

// ────────────────────────────────────────────────────────────────────────────
// Document skeleton
// ────────────────────────────────────────────────────────────────────────────

pub const DOCUMENT_TEMPLATE: &str = "\
<!DOCTYPE html>\n\
<html xmlns:o=\"urn:schemas-microsoft-com:office:office\" \
xmlns:w=\"urn:schemas-microsoft-com:office:word\" \
xmlns=\"http://www.w3.org/TR/REC-html40\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"ProgId\" content=\"Word.Document\">\n\
<meta name=\"Generator\" content=\"Microsoft Word 15\">\n\
<meta name=\"Originator\" content=\"Microsoft Word 15\">\n\
<title>{title}</title>\n\
<style>\n\
{stylesheet}\
</style>\n\
</head>\n\
<body>\n\
{body}\
</body>\n\
</html>\n";

// ────────────────────────────────────────────────────────────────────────────
// Stylesheet
// ────────────────────────────────────────────────────────────────────────────

/// `{font_stack}` is the CSS family list for the chosen font.
pub const STYLESHEET_TEMPLATE: &str = "\
@page { margin: 17.78mm; }\n\
body { font-family: {font_stack}; font-size: 10pt; line-height: 1.25; color: #000; margin: 0; padding: 0; background: white; }\n\
a, a:link, a:visited, a:active { color: #2563eb; text-decoration: underline; font-weight: inherit; font-size: inherit; }\n\
b, strong { font-weight: bold; color: #000; }\n\
.header { text-align: center; margin-bottom: 6mm; }\n\
.name { font-size: 18pt; font-weight: bold; letter-spacing: 1pt; margin-bottom: 4pt; text-transform: uppercase; }\n\
.contact { font-size: 9pt; margin-bottom: 6pt; }\n\
.header-line { border: none; border-top: 0.5pt solid #404040; margin: 0; height: 1px; width: 100%; }\n\
.section { margin-top: 10pt; }\n\
.section-title { font-size: 10pt; font-weight: bold; margin-bottom: 4pt; text-transform: uppercase; letter-spacing: 0.5pt; }\n\
.section-underline { border-bottom: 0.5pt solid #808080; margin-bottom: 4pt; height: 1px; }\n\
.entry { width: 100%; border-collapse: collapse; margin-bottom: 6pt; }\n\
.entry td { padding: 0; vertical-align: top; }\n\
.entry-main { text-align: left; }\n\
.entry-date { text-align: right; white-space: nowrap; }\n\
.entry-title { font-size: 9.5pt; font-weight: bold; }\n\
.entry-subtitle, .year { font-size: 9.5pt; font-weight: normal; }\n\
.detail { font-size: 9.5pt; color: #4b5563; }\n\
.bullets { margin-left: 4mm; margin-bottom: 4pt; margin-top: 2pt; list-style-type: disc; }\n\
.bullets.nested { margin-left: 7.5mm; }\n\
.bullet { font-size: 9.5pt; line-height: 1.25; margin: 0 0 1pt 0; }\n\
.skills-item { font-size: 9.5pt; margin: 1.5pt 0; }\n\
.skill-category { font-weight: bold; }\n\
.project { margin-bottom: 6pt; }\n\
.sub-label { font-size: 9.5pt; font-weight: bold; margin: 6pt 0 2pt 0; }\n\
.sub-paragraph { font-size: 9.5pt; line-height: 1.4; margin: 0 0 2pt 7.5mm; }\n\
.paragraph { font-size: 10pt; margin-bottom: 12pt; }\n\
@media print { body { margin: 0; } }\n";
