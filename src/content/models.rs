use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::content::ids::slugify;
use crate::content::{Entity, EntityKind};

/// Distinguishes an absent patch field from an explicit `null`.
///
/// Missing field -> `None` (leave untouched), `null` -> `Some(None)` (clear),
/// value -> `Some(Some(v))` (set).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// --- Project ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub tech_stack: Vec<String>,
    pub tags: Vec<String>,
    pub demo_url: Option<String>,
    pub repo_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewProject {
    pub title: String,
    /// Derived from the title when absent or blank.
    pub slug: Option<String>,
    pub description: String,
    pub content: String,
    pub tech_stack: Vec<String>,
    pub tags: Vec<String>,
    pub demo_url: Option<String>,
    pub repo_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_featured: bool,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    #[serde(deserialize_with = "double_option")]
    pub demo_url: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub repo_url: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub thumbnail_url: Option<Option<String>>,
    pub is_featured: Option<bool>,
    #[serde(deserialize_with = "double_option")]
    pub published_at: Option<Option<DateTime<Utc>>>,
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;
    type New = NewProject;
    type Patch = ProjectPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewProject, now: DateTime<Utc>) -> Self {
        let slug = pick_slug(new.slug, &new.title);
        Self {
            id,
            title: new.title,
            slug,
            description: new.description,
            content: new.content,
            tech_stack: new.tech_stack,
            tags: new.tags,
            demo_url: new.demo_url,
            repo_url: new.repo_url,
            thumbnail_url: new.thumbnail_url,
            is_featured: new.is_featured,
            published_at: new.published_at,
            created_at: now,
        }
    }

    fn apply(&mut self, patch: ProjectPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.slug {
            self.slug = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.content {
            self.content = v;
        }
        if let Some(v) = patch.tech_stack {
            self.tech_stack = v;
        }
        if let Some(v) = patch.tags {
            self.tags = v;
        }
        if let Some(v) = patch.demo_url {
            self.demo_url = v;
        }
        if let Some(v) = patch.repo_url {
            self.repo_url = v;
        }
        if let Some(v) = patch.thumbnail_url {
            self.thumbnail_url = v;
        }
        if let Some(v) = patch.is_featured {
            self.is_featured = v;
        }
        if let Some(v) = patch.published_at {
            self.published_at = v;
        }
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }
}

// --- Blog posts and comments ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_featured: bool,
    pub tags: Vec<String>,
    /// Append-only; there is no edit or delete path for a comment.
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_featured: bool,
    pub tags: Vec<String>,
}

/// Comments are deliberately absent: they only grow through
/// `PortfolioStore::append_comment`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub cover_image: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub published_at: Option<Option<DateTime<Utc>>>,
    pub is_featured: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl Entity for BlogPost {
    const KIND: EntityKind = EntityKind::Post;
    type New = NewBlogPost;
    type Patch = BlogPostPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewBlogPost, _now: DateTime<Utc>) -> Self {
        let slug = pick_slug(new.slug, &new.title);
        Self {
            id,
            title: new.title,
            slug,
            excerpt: new.excerpt,
            content: new.content,
            cover_image: new.cover_image,
            published_at: new.published_at,
            is_featured: new.is_featured,
            tags: new.tags,
            comments: Vec::new(),
        }
    }

    fn apply(&mut self, patch: BlogPostPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.slug {
            self.slug = v;
        }
        if let Some(v) = patch.excerpt {
            self.excerpt = v;
        }
        if let Some(v) = patch.content {
            self.content = v;
        }
        if let Some(v) = patch.cover_image {
            self.cover_image = v;
        }
        if let Some(v) = patch.published_at {
            self.published_at = v;
        }
        if let Some(v) = patch.is_featured {
            self.is_featured = v;
        }
        if let Some(v) = patch.tags {
            self.tags = v;
        }
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }
}

// --- Experience ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewExperience {
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExperiencePatch {
    pub role: Option<String>,
    pub company: Option<String>,
    pub period: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Entity for Experience {
    const KIND: EntityKind = EntityKind::Experience;
    type New = NewExperience;
    type Patch = ExperiencePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewExperience, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            role: new.role,
            company: new.company,
            period: new.period,
            description: new.description,
            tags: new.tags,
        }
    }

    fn apply(&mut self, patch: ExperiencePatch) {
        if let Some(v) = patch.role {
            self.role = v;
        }
        if let Some(v) = patch.company {
            self.company = v;
        }
        if let Some(v) = patch.period {
            self.period = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.tags {
            self.tags = v;
        }
    }
}

// --- Education ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub school: String,
    pub period: String,
    pub gpa: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewEducation {
    pub degree: String,
    pub school: String,
    pub period: String,
    pub gpa: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EducationPatch {
    pub degree: Option<String>,
    pub school: Option<String>,
    pub period: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub gpa: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl Entity for Education {
    const KIND: EntityKind = EntityKind::Education;
    type New = NewEducation;
    type Patch = EducationPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewEducation, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            degree: new.degree,
            school: new.school,
            period: new.period,
            gpa: new.gpa,
            description: new.description,
            tags: new.tags,
        }
    }

    fn apply(&mut self, patch: EducationPatch) {
        if let Some(v) = patch.degree {
            self.degree = v;
        }
        if let Some(v) = patch.school {
            self.school = v;
        }
        if let Some(v) = patch.period {
            self.period = v;
        }
        if let Some(v) = patch.gpa {
            self.gpa = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.tags {
            self.tags = v;
        }
    }
}

// --- Contact messages ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Only the read flag is mutable once a message has been received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessagePatch {
    pub is_read: Option<bool>,
}

impl Entity for Message {
    const KIND: EntityKind = EntityKind::Message;
    type New = NewMessage;
    type Patch = MessagePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_new(id: String, new: NewMessage, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            message: new.message,
            is_read: false,
            created_at: now,
        }
    }

    fn apply(&mut self, patch: MessagePatch) {
        if let Some(v) = patch.is_read {
            self.is_read = v;
        }
    }
}

// --- Profile ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Socials {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub dribbble: Option<String>,
    pub email: Option<String>,
}

/// Singleton site profile. Always replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    pub avatar_url: String,
    pub title: String,
    pub description: String,
    pub detailed_bio: String,
    pub address: String,
    pub resume_url: String,
    pub badge: String,
    pub socials: Socials,
}

fn pick_slug(explicit: Option<String>, title: &str) -> String {
    match explicit {
        Some(slug) if !slug.trim().is_empty() => slug.trim().to_string(),
        _ => slugify(title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project::from_new(
            "p1".to_string(),
            NewProject {
                title: "Rust Kernel".to_string(),
                description: "A toy kernel".to_string(),
                demo_url: Some("https://demo.example".to_string()),
                tags: vec!["rust".to_string()],
                ..Default::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn project_slug_derived_from_title() {
        assert_eq!(sample_project().slug, "rust-kernel");
    }

    #[test]
    fn explicit_slug_is_kept() {
        let p = Project::from_new(
            "p2".to_string(),
            NewProject {
                title: "Whatever".to_string(),
                slug: Some("custom-slug".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(p.slug, "custom-slug");
    }

    #[test]
    fn patch_touches_only_named_fields() {
        let mut p = sample_project();
        let before = p.clone();
        p.apply(ProjectPatch {
            description: Some("Rewritten".to_string()),
            ..Default::default()
        });
        assert_eq!(p.description, "Rewritten");
        assert_eq!(p.title, before.title);
        assert_eq!(p.slug, before.slug);
        assert_eq!(p.demo_url, before.demo_url);
        assert_eq!(p.created_at, before.created_at);
    }

    #[test]
    fn patch_json_distinguishes_null_from_missing() {
        let patch: ProjectPatch = serde_json::from_str(r#"{"demo_url": null}"#).unwrap();
        assert_eq!(patch.demo_url, Some(None));
        assert_eq!(patch.repo_url, None);

        let mut p = sample_project();
        p.apply(patch);
        assert_eq!(p.demo_url, None);
    }

    #[test]
    fn new_post_starts_without_comments() {
        let post = BlogPost::from_new(
            "b1".to_string(),
            NewBlogPost {
                title: "Hello World".to_string(),
                ..Default::default()
            },
            Utc::now(),
        );
        assert!(post.comments.is_empty());
        assert_eq!(post.slug, "hello-world");
    }

    #[test]
    fn new_message_is_unread() {
        let now = Utc::now();
        let m = Message::from_new(
            "m1".to_string(),
            NewMessage {
                name: "A".to_string(),
                email: "a@x.com".to_string(),
                message: "hi".to_string(),
            },
            now,
        );
        assert!(!m.is_read);
        assert_eq!(m.created_at, now);
    }

    #[test]
    fn profile_deserializes_with_partial_socials() {
        let profile: ProfileConfig =
            serde_json::from_str(r#"{"name":"Jo","socials":{"github":"https://github.com/jo"}}"#)
                .unwrap();
        assert_eq!(profile.name, "Jo");
        assert_eq!(
            profile.socials.github.as_deref(),
            Some("https://github.com/jo")
        );
        assert!(profile.socials.linkedin.is_none());
    }
}
