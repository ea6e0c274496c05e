//! Entry builders: the uncommitted drafts behind each "add" form.
//!
//! A draft is reset to its empty shape only after a successful commit. A
//! rejected commit leaves it untouched so the user can fix it and resubmit.

use serde::{Deserialize, Serialize};

use crate::builder::store::ResumeStore;
use crate::models::resume::{
    Collection, Education, EntryDraft, EntryId, Experience, Project, SkillKind,
};

/// In-progress skill text plus the list it will be added to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillDraft {
    pub value: String,
    pub kind: SkillKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryBuilders {
    pub experience: Experience,
    pub education: Education,
    pub project: Project,
    pub skill: SkillDraft,
}

impl EntryBuilders {
    /// Whether the draft for `collection` would currently be accepted.
    pub fn can_commit(&self, collection: Collection) -> bool {
        match collection {
            Collection::Experience => self.experience.is_committable(),
            Collection::Education => self.education.is_committable(),
            Collection::Projects => self.project.is_committable(),
        }
    }

    pub fn can_commit_skill(&self) -> bool {
        !self.skill.value.trim().is_empty()
    }

    /// Commits the draft of `collection` into `store`.
    pub fn commit(&mut self, collection: Collection, store: &mut ResumeStore) -> Option<EntryId> {
        match collection {
            Collection::Experience => commit_draft(&mut self.experience, store),
            Collection::Education => commit_draft(&mut self.education, store),
            Collection::Projects => commit_draft(&mut self.project, store),
        }
    }

    /// Commits the skill draft. Only the text is cleared; the target list is kept.
    pub fn commit_skill(&mut self, store: &mut ResumeStore) -> bool {
        let added = store.add_skill(self.skill.kind, &self.skill.value);
        if added {
            self.skill.value.clear();
        }
        added
    }
}

fn commit_draft<D: EntryDraft>(draft: &mut D, store: &mut ResumeStore) -> Option<EntryId> {
    let id = store.append_entry(draft)?;
    *draft = D::default();
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_commit_resets_draft() {
        let mut store = ResumeStore::new(None);
        let mut builders = EntryBuilders::default();
        builders.experience = Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "2022-01".to_string(),
            current: true,
            ..Default::default()
        };
        let submitted = builders.experience.clone();

        let id = builders.commit(Collection::Experience, &mut store);

        assert!(id.is_some());
        assert_eq!(builders.experience, Experience::default());
        let last = store.data().experience.last().unwrap();
        assert_eq!(last.fields, submitted);
        assert_eq!(Some(last.id), id);
    }

    #[test]
    fn test_rejected_commit_keeps_draft() {
        let mut store = ResumeStore::new(None);
        let mut builders = EntryBuilders::default();
        builders.project.name = "X".to_string();

        assert!(!builders.can_commit(Collection::Projects));
        assert!(builders.commit(Collection::Projects, &mut store).is_none());

        assert_eq!(builders.project.name, "X");
        assert!(store.data().projects.is_empty());
    }

    #[test]
    fn test_commit_skill_trims_and_keeps_kind() {
        let mut store = ResumeStore::new(None);
        let mut builders = EntryBuilders::default();
        builders.skill = SkillDraft {
            value: "  React  ".to_string(),
            kind: SkillKind::Technical,
        };

        assert!(builders.commit_skill(&mut store));
        assert_eq!(store.data().skills.technical, vec!["React".to_string()]);
        assert!(builders.skill.value.is_empty());
        assert_eq!(builders.skill.kind, SkillKind::Technical);
    }

    #[test]
    fn test_blank_skill_commit_keeps_text() {
        let mut store = ResumeStore::new(None);
        let mut builders = EntryBuilders::default();
        builders.skill.value = "   ".to_string();
        builders.skill.kind = SkillKind::Soft;

        assert!(!builders.can_commit_skill());
        assert!(!builders.commit_skill(&mut store));
        assert_eq!(builders.skill.value, "   ");
        assert!(store.data().skills.is_empty());
    }

    #[test]
    fn test_other_drafts_untouched_by_commit() {
        let mut store = ResumeStore::new(None);
        let mut builders = EntryBuilders::default();
        builders.education.institution = "IIT".to_string();
        builders.education.degree = "BTech".to_string();
        builders.project.name = "Half typed".to_string();

        builders.commit(Collection::Education, &mut store).unwrap();
        assert_eq!(builders.project.name, "Half typed");
    }
}
