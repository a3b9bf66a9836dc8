pub mod ids;
pub mod models;
pub mod query;
pub mod seed;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use models::{
    BlogPost, BlogPostPatch, Comment, Education, EducationPatch, Experience, ExperiencePatch,
    Message, MessagePatch, NewBlogPost, NewComment, NewEducation, NewExperience, NewMessage,
    NewProject, ProfileConfig, Project, ProjectPatch, Socials,
};
pub use query::{ListQuery, Page};

/// The collection-backed entity kinds. The profile is a singleton and has no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    Post,
    Experience,
    Education,
    Message,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Post => "post",
            EntityKind::Experience => "experience",
            EntityKind::Education => "education",
            EntityKind::Message => "message",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that lives in an ordered, id-keyed collection.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Input shape for creation: the record minus its id and derived fields.
    type New;

    /// Shallow-merge shape: every `Some` field overwrites, every `None` is left alone.
    type Patch;

    fn id(&self) -> &str;

    fn from_new(id: String, new: Self::New, now: DateTime<Utc>) -> Self;

    fn apply(&mut self, patch: Self::Patch);

    /// Kinds addressed by slug expose it here so the repository can de-duplicate.
    fn slug(&self) -> Option<&str> {
        None
    }

    fn set_slug(&mut self, _slug: String) {}
}
