use serde::{Deserialize, Serialize};

use crate::builder::drafts::EntryBuilders;
use crate::models::resume::{Collection, PersonalInfo, ResumeData};
use crate::render::Section;

/// Editor panes, in sidebar order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorSection {
    #[default]
    Personal,
    Experience,
    Education,
    Projects,
    Skills,
}

impl EditorSection {
    pub const ALL: [EditorSection; 5] = [
        EditorSection::Personal,
        EditorSection::Experience,
        EditorSection::Education,
        EditorSection::Projects,
        EditorSection::Skills,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditorSection::Personal => "Personal Info",
            EditorSection::Experience => "Experience",
            EditorSection::Education => "Education",
            EditorSection::Projects => "Projects",
            EditorSection::Skills => "Skills",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            EditorSection::Personal => "👤",
            EditorSection::Experience => "💼",
            EditorSection::Education => "🎓",
            EditorSection::Projects => "⚡",
            EditorSection::Skills => "🔧",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionOutline {
    pub section: EditorSection,
    pub label: String,
    pub icon: String,
    /// Filled personal fields, committed entries, or skills.
    pub item_count: usize,
    /// Whether this pane's data currently produces a block in the rendered resume.
    pub rendered: bool,
    /// Whether the pane's add action would be accepted. Always false for personal info.
    pub can_add: bool,
}

/// Summarises each editor pane for the sidebar.
pub fn build_outline(data: &ResumeData, drafts: &EntryBuilders) -> Vec<SectionOutline> {
    EditorSection::ALL
        .into_iter()
        .map(|section| {
            let (item_count, rendered, can_add) = match section {
                EditorSection::Personal => (filled_personal_fields(&data.personal), true, false),
                EditorSection::Experience => pane_for(data, drafts, Collection::Experience),
                EditorSection::Education => pane_for(data, drafts, Collection::Education),
                EditorSection::Projects => pane_for(data, drafts, Collection::Projects),
                EditorSection::Skills => (
                    data.skills.technical.len() + data.skills.soft.len(),
                    Section::Skills.is_emitted(data),
                    drafts.can_commit_skill(),
                ),
            };

            SectionOutline {
                section,
                label: section.label().to_string(),
                icon: section.icon().to_string(),
                item_count,
                rendered,
                can_add,
            }
        })
        .collect()
}

fn pane_for(
    data: &ResumeData,
    drafts: &EntryBuilders,
    collection: Collection,
) -> (usize, bool, bool) {
    let count = data.len_of(collection);
    (count, count > 0, drafts.can_commit(collection))
}

fn filled_personal_fields(personal: &PersonalInfo) -> usize {
    [
        &personal.full_name,
        &personal.email,
        &personal.phone,
        &personal.location,
        &personal.linkedin,
        &personal.github,
        &personal.website,
        &personal.summary,
    ]
    .iter()
    .filter(|f| !f.is_empty())
    .count()
}
