//! Resume data store. Owns one `ResumeData` and its mutation primitives.
//!
//! Every operation is synchronous. Validation failures are silent no-ops that
//! report `None`/`false`; callers gate their add affordances on the same rules.

use tracing::debug;

use crate::models::resume::{
    Collection, Entry, EntryDraft, EntryId, PersonalField, ResumeData, SkillKind,
};
use crate::models::user::SessionUser;

#[derive(Debug, Clone, Default)]
pub struct ResumeStore {
    data: ResumeData,
}

impl ResumeStore {
    /// Creates an empty resume, seeding name and email from the session user if any.
    pub fn new(user: Option<&SessionUser>) -> Self {
        let mut store = Self::default();
        if let Some(user) = user {
            store.reseed(user);
        }
        store
    }

    pub fn data(&self) -> &ResumeData {
        &self.data
    }

    /// Overwrites name and email from a (new) session identity.
    pub fn reseed(&mut self, user: &SessionUser) {
        self.data.personal.full_name = user.name.clone().unwrap_or_default();
        self.data.personal.email = user.email.clone().unwrap_or_default();
    }

    /// Replaces one personal field. Any value is accepted, including empty.
    pub fn set_personal_field(&mut self, field: PersonalField, value: impl Into<String>) {
        *self.data.personal.field_mut(field) = value.into();
    }

    /// Appends a copy of `draft` to its collection if it passes the required-fields gate.
    ///
    /// Returns the fresh identifier, or `None` when the draft was rejected.
    pub fn append_entry<D: EntryDraft>(&mut self, draft: &D) -> Option<EntryId> {
        if !draft.is_committable() {
            debug!("Rejected incomplete {:?} draft", D::COLLECTION);
            return None;
        }

        let id = EntryId::new();
        D::collection_mut(&mut self.data).push(Entry {
            id,
            fields: draft.clone(),
        });
        debug!("Appended {:?} entry {}", D::COLLECTION, id);
        Some(id)
    }

    /// Removes the entry with `id` from `collection`. Returns false when nothing matched.
    pub fn remove_entry(&mut self, collection: Collection, id: EntryId) -> bool {
        let removed = match collection {
            Collection::Experience => remove_by_id(&mut self.data.experience, id),
            Collection::Education => remove_by_id(&mut self.data.education, id),
            Collection::Projects => remove_by_id(&mut self.data.projects, id),
        };
        if removed {
            debug!("Removed {:?} entry {}", collection, id);
        }
        removed
    }

    /// Appends the trimmed skill. Empty or whitespace-only input is ignored.
    pub fn add_skill(&mut self, kind: SkillKind, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        self.data.skills.list_mut(kind).push(value.to_string());
        true
    }

    /// Removes the first skill equal to `value`.
    pub fn remove_skill(&mut self, kind: SkillKind, value: &str) -> bool {
        let list = self.data.skills.list_mut(kind);
        match list.iter().position(|s| s == value) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }
}

fn remove_by_id<T>(entries: &mut Vec<Entry<T>>, id: EntryId) -> bool {
    match entries.iter().position(|e| e.id == id) {
        Some(index) => {
            entries.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Experience, Project};

    fn acme() -> Experience {
        Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "2022-01".to_string(),
            current: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_without_user_is_empty() {
        let store = ResumeStore::new(None);
        assert_eq!(store.data(), &ResumeData::default());
    }

    #[test]
    fn test_new_seeds_name_and_email() {
        let user = SessionUser {
            name: Some("Asha Rao".to_string()),
            email: Some("asha@example.com".to_string()),
        };
        let store = ResumeStore::new(Some(&user));
        assert_eq!(store.data().personal.full_name, "Asha Rao");
        assert_eq!(store.data().personal.email, "asha@example.com");
        assert!(store.data().personal.phone.is_empty());
    }

    #[test]
    fn test_reseed_clears_missing_identity_fields() {
        let mut store = ResumeStore::new(Some(&SessionUser {
            name: Some("Asha".to_string()),
            email: Some("a@example.com".to_string()),
        }));
        store.set_personal_field(PersonalField::Phone, "555");
        store.reseed(&SessionUser {
            name: Some("Ravi".to_string()),
            email: None,
        });
        assert_eq!(store.data().personal.full_name, "Ravi");
        assert!(store.data().personal.email.is_empty());
        assert_eq!(store.data().personal.phone, "555");
    }

    #[test]
    fn test_set_personal_field_accepts_empty() {
        let mut store = ResumeStore::new(None);
        store.set_personal_field(PersonalField::Summary, "Builds things");
        store.set_personal_field(PersonalField::Summary, "");
        assert!(store.data().personal.summary.is_empty());
    }

    #[test]
    fn test_append_entry_keeps_fields_and_order() {
        let mut store = ResumeStore::new(None);
        let first = acme();
        let second = Experience {
            company: "Globex".to_string(),
            position: "Intern".to_string(),
            ..Default::default()
        };
        store.append_entry(&first).unwrap();
        store.append_entry(&second).unwrap();

        let experience = &store.data().experience;
        assert_eq!(experience.len(), 2);
        assert_eq!(experience[0].fields, first);
        assert_eq!(experience[1].fields, second);
    }

    #[test]
    fn test_invalid_draft_is_idempotent_no_op() {
        let mut store = ResumeStore::new(None);
        let draft = Project {
            name: "X".to_string(),
            ..Default::default()
        };
        for _ in 0..3 {
            assert!(store.append_entry(&draft).is_none());
        }
        assert!(store.data().projects.is_empty());
    }

    #[test]
    fn test_identifiers_are_not_reused_after_removal() {
        let mut store = ResumeStore::new(None);
        let draft = Education {
            institution: "IIT".to_string(),
            degree: "BTech".to_string(),
            ..Default::default()
        };
        let first = store.append_entry(&draft).unwrap();
        assert!(store.remove_entry(Collection::Education, first));
        let second = store.append_entry(&draft).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_remove_entry_unknown_id_is_no_op() {
        let mut store = ResumeStore::new(None);
        store.append_entry(&acme()).unwrap();
        assert!(!store.remove_entry(Collection::Experience, EntryId::new()));
        assert_eq!(store.data().experience.len(), 1);
    }

    #[test]
    fn test_remove_entry_wrong_collection_is_no_op() {
        let mut store = ResumeStore::new(None);
        let id = store.append_entry(&acme()).unwrap();
        assert!(!store.remove_entry(Collection::Projects, id));
        assert_eq!(store.data().experience.len(), 1);
    }

    #[test]
    fn test_add_skill_trims_and_rejects_blank() {
        let mut store = ResumeStore::new(None);
        assert!(store.add_skill(SkillKind::Technical, "  React  "));
        assert!(!store.add_skill(SkillKind::Technical, "   "));
        assert_eq!(store.data().skills.technical, vec!["React".to_string()]);
        assert!(store.data().skills.soft.is_empty());
    }

    #[test]
    fn test_remove_skill_removes_first_occurrence_only() {
        let mut store = ResumeStore::new(None);
        store.add_skill(SkillKind::Soft, "Teamwork");
        store.add_skill(SkillKind::Soft, "Teamwork");
        assert!(store.remove_skill(SkillKind::Soft, "Teamwork"));
        assert_eq!(store.data().skills.soft.len(), 1);
        assert!(!store.remove_skill(SkillKind::Technical, "Teamwork"));
    }
}
