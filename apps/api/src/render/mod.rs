//! Document renderer. Maps `ResumeData` to a self-contained styled HTML document.
//!
//! `render` is pure: the same data and mode always produce the same bytes.
//! Both modes share one body template and one rule table; `Standalone` only
//! adds the document shell and the page/print rules.

pub mod escape;
pub mod styles;
pub mod template;

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;
use crate::render::escape::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Fragment for inline preview inside the host UI.
    Embedded,
    /// Complete document for a separate print surface.
    Standalone,
}

/// Top-level blocks of the rendered resume, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Header,
    Summary,
    Experience,
    Education,
    Projects,
    Skills,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Header,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Skills,
    ];

    /// Whether this section has anything to show for `data`.
    pub fn is_emitted(self, data: &ResumeData) -> bool {
        match self {
            Section::Header => true,
            Section::Summary => !data.personal.summary.is_empty(),
            Section::Experience => !data.experience.is_empty(),
            Section::Education => !data.education.is_empty(),
            Section::Projects => !data.projects.is_empty(),
            Section::Skills => !data.skills.is_empty(),
        }
    }

    /// Heading used in the rendered document.
    pub fn title(self) -> &'static str {
        match self {
            Section::Header => "Header",
            Section::Summary => "Professional Summary",
            Section::Experience => "Professional Experience",
            Section::Education => "Education",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
        }
    }
}

/// The sections `render` will emit for `data`, in order.
pub fn sections_present(data: &ResumeData) -> Vec<Section> {
    Section::ALL
        .into_iter()
        .filter(|s| s.is_emitted(data))
        .collect()
}

/// A rendered resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    mode: RenderMode,
    title: String,
    html: String,
    body: Range<usize>,
}

impl Document {
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Plain-text document title, e.g. "Asha Rao - Resume".
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// The resume content markup, identical across modes.
    pub fn body(&self) -> &str {
        &self.html[self.body.clone()]
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

/// Title used for standalone documents and print jobs.
pub fn document_title(data: &ResumeData) -> String {
    let name = match data.personal.full_name.as_str() {
        "" => "Resume",
        name => name,
    };
    format!("{} - Resume", name)
}

pub fn render(data: &ResumeData, mode: RenderMode) -> Document {
    let title = document_title(data);
    let body = template::render_body(data);
    let css = styles::stylesheet(mode);

    let mut html = String::with_capacity(body.len() + css.len() + 512);
    match mode {
        RenderMode::Embedded => {
            html.push_str("<style>\n");
            html.push_str(&css);
            html.push_str("</style>\n");
            html.push_str(&format!("<div class=\"{}\">\n", &styles::PREVIEW_SCOPE[1..]));
        }
        RenderMode::Standalone => {
            html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
            html.push_str("<meta charset=\"UTF-8\">\n");
            html.push_str(
                "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
            );
            html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
            html.push_str("<style>\n");
            html.push_str(&css);
            html.push_str("</style>\n</head>\n<body>\n");
        }
    }

    let start = html.len();
    html.push_str(&body);
    let body_range = start..html.len();

    match mode {
        RenderMode::Embedded => html.push_str("</div>\n"),
        RenderMode::Standalone => html.push_str("</body>\n</html>\n"),
    }

    Document {
        mode,
        title,
        html,
        body: body_range,
    }
}
