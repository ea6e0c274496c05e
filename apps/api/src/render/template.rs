//! Body markup for a resume. Shared verbatim by the embedded and standalone modes.
//!
//! Every user value is inserted through `escape_html`, every link target through
//! `safe_href`. Blank optional fields produce no element at all.

use crate::models::resume::{
    Education, Entry, Experience, PersonalInfo, Project, ResumeData, Skills,
};
use crate::render::escape::{escape_html, safe_href};
use crate::render::{sections_present, Section};

pub const PLACEHOLDER_NAME: &str = "Your Name";
pub const PRESENT: &str = "Present";

/// One item of the header contact line.
struct ContactItem<'a> {
    glyph: &'static str,
    value: &'a str,
    /// Link text when the value is a URL.
    link_label: Option<&'static str>,
}

pub fn render_body(data: &ResumeData) -> String {
    let mut out = String::new();
    for section in sections_present(data) {
        match section {
            Section::Header => render_header(&mut out, &data.personal),
            Section::Summary => render_summary(&mut out, &data.personal.summary),
            Section::Experience => render_experience(&mut out, &data.experience),
            Section::Education => render_education(&mut out, &data.education),
            Section::Projects => render_projects(&mut out, &data.projects),
            Section::Skills => render_skills(&mut out, &data.skills),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn render_header(out: &mut String, personal: &PersonalInfo) {
    let name = non_empty(&personal.full_name).unwrap_or(PLACEHOLDER_NAME);

    out.push_str("<div class=\"header\">\n");
    out.push_str(&format!("  <h1>{}</h1>\n", escape_html(name)));

    let contacts = [
        ContactItem {
            glyph: "📧",
            value: &personal.email,
            link_label: None,
        },
        ContactItem {
            glyph: "📞",
            value: &personal.phone,
            link_label: None,
        },
        ContactItem {
            glyph: "📍",
            value: &personal.location,
            link_label: None,
        },
        ContactItem {
            glyph: "💼",
            value: &personal.linkedin,
            link_label: Some("LinkedIn"),
        },
        ContactItem {
            glyph: "💻",
            value: &personal.github,
            link_label: Some("GitHub"),
        },
        ContactItem {
            glyph: "🌐",
            value: &personal.website,
            link_label: Some("Portfolio"),
        },
    ];
    let present: Vec<&ContactItem> = contacts.iter().filter(|c| !c.value.is_empty()).collect();

    if !present.is_empty() {
        out.push_str("  <div class=\"contact-info\">\n");
        for item in present {
            let content = match item.link_label {
                Some(label) => link(item.value, label, false),
                None => escape_html(item.value),
            };
            out.push_str(&format!("    <span>{} {}</span>\n", item.glyph, content));
        }
        out.push_str("  </div>\n");
    }
    out.push_str("</div>\n");
}

fn render_summary(out: &mut String, summary: &str) {
    open_section(out, "Professional Summary");
    out.push_str(&format!("  <div class=\"summary\">{}</div>\n", escape_html(summary)));
    close_section(out);
}

fn render_experience(out: &mut String, entries: &[Entry<Experience>]) {
    open_section(out, "Professional Experience");
    for entry in entries {
        let exp = &entry.fields;
        out.push_str("  <div class=\"experience-item\">\n");
        out.push_str("    <div class=\"experience-header\">\n");
        out.push_str("      <div>\n");
        push_div(out, "        ", Some("position"), &exp.position);
        push_div(out, "        ", Some("company"), &exp.company);
        out.push_str("      </div>\n");
        let range = date_range(&exp.start_date, end_token(exp));
        push_date_location(out, &[range.as_str(), exp.location.as_str()]);
        out.push_str("    </div>\n");
        push_div(out, "    ", Some("description"), &exp.description);
        out.push_str("  </div>\n");
    }
    close_section(out);
}

fn render_education(out: &mut String, entries: &[Entry<Education>]) {
    open_section(out, "Education");
    for entry in entries {
        let edu = &entry.fields;
        let degree = match non_empty(&edu.field) {
            Some(field) => format!("{} in {}", edu.degree, field),
            None => edu.degree.clone(),
        };
        let gpa = non_empty(&edu.gpa)
            .map(|gpa| format!("GPA: {}", gpa))
            .unwrap_or_default();

        out.push_str("  <div class=\"education-item\">\n");
        out.push_str("    <div class=\"education-header\">\n");
        out.push_str("      <div>\n");
        push_div(out, "        ", Some("degree"), &degree);
        push_div(out, "        ", Some("institution"), &edu.institution);
        out.push_str("      </div>\n");
        push_date_location(
            out,
            &[edu.graduation_date.as_str(), edu.location.as_str(), gpa.as_str()],
        );
        out.push_str("    </div>\n");
        out.push_str("  </div>\n");
    }
    close_section(out);
}

fn render_projects(out: &mut String, entries: &[Entry<Project>]) {
    open_section(out, "Projects");
    for entry in entries {
        let project = &entry.fields;
        out.push_str("  <div class=\"project-item\">\n");
        out.push_str("    <div class=\"project-header\">\n");
        push_div(out, "      ", Some("project-name"), &project.name);
        out.push_str("    </div>\n");
        push_div(out, "    ", Some("description"), &project.description);
        if !project.technologies.is_empty() {
            push_div(
                out,
                "    ",
                Some("technologies"),
                &format!("Technologies: {}", project.technologies),
            );
        }

        let links: Vec<String> = [(&project.url, "Live Demo"), (&project.github, "GitHub")]
            .into_iter()
            .filter(|(url, _)| !url.is_empty())
            .map(|(url, label)| link(url, label, true))
            .collect();
        if !links.is_empty() {
            out.push_str("    <div class=\"project-links\">\n");
            for l in links {
                out.push_str(&format!("      {}\n", l));
            }
            out.push_str("    </div>\n");
        }
        out.push_str("  </div>\n");
    }
    close_section(out);
}

fn render_skills(out: &mut String, skills: &Skills) {
    open_section(out, "Skills");
    out.push_str("  <div class=\"skills-container\">\n");
    for (title, list) in [("Technical Skills", &skills.technical), ("Soft Skills", &skills.soft)] {
        if list.is_empty() {
            continue;
        }
        out.push_str("    <div class=\"skills-category\">\n");
        out.push_str(&format!("      <h4>{}</h4>\n", title));
        out.push_str("      <div class=\"skills-list\">\n");
        for skill in list {
            out.push_str(&format!(
                "        <span class=\"skill-tag\">{}</span>\n",
                escape_html(skill)
            ));
        }
        out.push_str("      </div>\n");
        out.push_str("    </div>\n");
    }
    out.push_str("  </div>\n");
    close_section(out);
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// End of an experience date range: "Present" for an ongoing role, else the stored end date.
pub fn end_token(exp: &Experience) -> &str {
    if exp.current {
        PRESENT
    } else {
        &exp.end_date
    }
}

/// `start - end`, or whichever side is present alone.
fn date_range(start: &str, end: &str) -> String {
    match (non_empty(start), non_empty(end)) {
        (Some(start), Some(end)) => format!("{} - {}", start, end),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    }
}

fn open_section(out: &mut String, title: &str) {
    out.push_str("<div class=\"section\">\n");
    out.push_str(&format!("  <h2 class=\"section-title\">{}</h2>\n", title));
}

fn close_section(out: &mut String) {
    out.push_str("</div>\n");
}

/// Writes an escaped `<div>` unless `text` is empty.
fn push_div(out: &mut String, indent: &str, class: Option<&str>, text: &str) {
    if text.is_empty() {
        return;
    }
    let open = match class {
        Some(class) => format!("<div class=\"{}\">", class),
        None => "<div>".to_string(),
    };
    out.push_str(&format!("{}{}{}</div>\n", indent, open, escape_html(text)));
}

/// Right-aligned column of the non-empty lines, omitted when all are empty.
fn push_date_location(out: &mut String, lines: &[&str]) {
    if lines.iter().all(|l| l.is_empty()) {
        return;
    }
    out.push_str("      <div class=\"date-location\">\n");
    for line in lines {
        push_div(out, "        ", None, line);
    }
    out.push_str("      </div>\n");
}

/// An anchor for `url`, or the bare label when the URL is not a safe link target.
fn link(url: &str, label: &str, new_tab: bool) -> String {
    match safe_href(url) {
        Some(href) if new_tab => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            href, label
        ),
        Some(href) => format!("<a href=\"{}\">{}</a>", href, label),
        None => format!("<span>{}</span>", label),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
