//! Resume data model: the single aggregate a builder session edits.
//!
//! Optional fields are plain strings; an empty string means "absent". The
//! field records (`Experience`, `Education`, `Project`) double as the drafts
//! held by the entry builders, so a committed entry is literally the draft
//! plus an identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────────────────────────────────────

/// Identifier assigned to an entry when it is committed. Only used to target removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A committed record in one of the ordered collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    pub id: EntryId,
    #[serde(flatten)]
    pub fields: T,
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
    pub summary: String,
}

/// Addressable field of [`PersonalInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Linkedin,
    Github,
    Website,
    Summary,
}

impl PersonalInfo {
    pub fn field_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::FullName => &mut self.full_name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Linkedin => &mut self.linkedin,
            PersonalField::Github => &mut self.github,
            PersonalField::Website => &mut self.website,
            PersonalField::Summary => &mut self.summary,
        }
    }
}

impl FromStr for PersonalField {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullName" | "full_name" => Ok(Self::FullName),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "location" => Ok(Self::Location),
            "linkedin" => Ok(Self::Linkedin),
            "github" => Ok(Self::Github),
            "website" => Ok(Self::Website),
            "summary" => Ok(Self::Summary),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Collection records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// Ongoing role. When set, the rendered end date is always "Present".
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub graduation_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    /// Free text, e.g. "Rust, Axum, Postgres".
    pub technologies: String,
    pub url: String,
    pub github: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    #[default]
    Technical,
    Soft,
}

impl FromStr for SkillKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "technical" => Ok(Self::Technical),
            "soft" => Ok(Self::Soft),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

/// Two independent skill lists. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

impl Skills {
    pub fn list_mut(&mut self, kind: SkillKind) -> &mut Vec<String> {
        match kind {
            SkillKind::Technical => &mut self.technical,
            SkillKind::Soft => &mut self.soft,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.technical.is_empty() && self.soft.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────────────────────────────────────

/// Names the three identified collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Experience,
    Education,
    Projects,
}

impl FromStr for Collection {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "experience" => Ok(Self::Experience),
            "education" => Ok(Self::Education),
            "projects" | "project" => Ok(Self::Projects),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub personal: PersonalInfo,
    pub experience: Vec<Entry<Experience>>,
    pub education: Vec<Entry<Education>>,
    pub projects: Vec<Entry<Project>>,
    pub skills: Skills,
}

impl ResumeData {
    pub fn len_of(&self, collection: Collection) -> usize {
        match collection {
            Collection::Experience => self.experience.len(),
            Collection::Education => self.education.len(),
            Collection::Projects => self.projects.len(),
        }
    }
}

/// A path segment or field name that does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name '{0}'")]
pub struct UnknownName(pub String);

// ────────────────────────────────────────────────────────────────────────────
// Committable drafts
// ────────────────────────────────────────────────────────────────────────────

/// A field record that can be committed into one of the [`ResumeData`] collections.
pub trait EntryDraft: Clone + Default + PartialEq {
    const COLLECTION: Collection;

    /// The minimal-required-fields gate.
    fn is_committable(&self) -> bool;

    fn collection_mut(data: &mut ResumeData) -> &mut Vec<Entry<Self>>;
}

impl EntryDraft for Experience {
    const COLLECTION: Collection = Collection::Experience;

    fn is_committable(&self) -> bool {
        !self.company.is_empty() && !self.position.is_empty()
    }

    fn collection_mut(data: &mut ResumeData) -> &mut Vec<Entry<Self>> {
        &mut data.experience
    }
}

impl EntryDraft for Education {
    const COLLECTION: Collection = Collection::Education;

    fn is_committable(&self) -> bool {
        !self.institution.is_empty() && !self.degree.is_empty()
    }

    fn collection_mut(data: &mut ResumeData) -> &mut Vec<Entry<Self>> {
        &mut data.education
    }
}

impl EntryDraft for Project {
    const COLLECTION: Collection = Collection::Projects;

    fn is_committable(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty()
    }

    fn collection_mut(data: &mut ResumeData) -> &mut Vec<Entry<Self>> {
        &mut data.projects
    }
}
