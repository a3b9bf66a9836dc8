//! The portfolio content store.
//!
//! One owned `PortfolioStore` holds every collection, the singleton profile,
//! the admin flag and the theme. All mutations go through it so that each one
//! can notify the registered observers before returning.

pub mod backend;
pub mod collection;
pub mod notify;
pub mod sqlite;
pub mod theme;

use chrono::Utc;
use thiserror::Error;

use crate::content::seed::Seed;
use crate::content::{
    BlogPost, BlogPostPatch, Comment, Education, EducationPatch, Entity, Experience,
    ExperiencePatch, Message, MessagePatch, NewBlogPost, NewComment, NewEducation,
    NewExperience, NewMessage, NewProject, ProfileConfig, Project, ProjectPatch,
};
use crate::kv::{KvError, KvStore, SqliteKv};
use crate::state::DbPool;

pub use backend::{Backend, MemoryBackend};
pub use collection::Collection;
pub use notify::{Notifier, Observer, StoreEvent, SubscriptionId};
pub use sqlite::SqliteBackend;
pub use theme::{Theme, THEME_KEY};

/// Key the profile JSON is stored under when the profile is persisted.
pub const PROFILE_KEY: &str = "profile";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Preferences error: {0}")]
    Preferences(#[from] KvError),
}

pub struct PortfolioStore {
    projects: Collection<Project>,
    posts: Collection<BlogPost>,
    experience: Collection<Experience>,
    education: Collection<Education>,
    messages: Collection<Message>,
    profile: ProfileConfig,
    persist_profile: bool,
    authenticated: bool,
    theme: Theme,
    prefs: Box<dyn KvStore>,
    notifier: Notifier,
}

impl PortfolioStore {
    /// Collections live in memory and start from `seed` every time. Only the
    /// theme goes to `prefs`.
    pub fn in_memory(seed: Seed, prefs: Box<dyn KvStore>) -> Result<Self, StoreError> {
        let mut store = Self::empty(
            Collection::new(Box::new(MemoryBackend::new())),
            Collection::new(Box::new(MemoryBackend::new())),
            Collection::new(Box::new(MemoryBackend::new())),
            Collection::new(Box::new(MemoryBackend::new())),
            Collection::new(Box::new(MemoryBackend::new())),
            prefs,
        )?;
        store.profile = store.load_seed(seed)?;
        Ok(store)
    }

    /// Collections, profile and theme all live in the database behind `pool`.
    /// Seed records are written only for kinds that have no rows yet.
    pub fn sqlite(pool: DbPool, seed: Seed) -> Result<Self, StoreError> {
        let mut store = Self::empty(
            Collection::new(Box::new(SqliteBackend::new(pool.clone()))),
            Collection::new(Box::new(SqliteBackend::new(pool.clone()))),
            Collection::new(Box::new(SqliteBackend::new(pool.clone()))),
            Collection::new(Box::new(SqliteBackend::new(pool.clone()))),
            Collection::new(Box::new(SqliteBackend::new(pool.clone()))),
            Box::new(SqliteKv::new(pool)),
        )?;
        store.persist_profile = true;
        let fallback = store.load_seed(seed)?;
        store.profile = match store.prefs.get(PROFILE_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => {
                store
                    .prefs
                    .set(PROFILE_KEY, &serde_json::to_string(&fallback)?)?;
                fallback
            }
        };
        Ok(store)
    }

    fn empty(
        projects: Collection<Project>,
        posts: Collection<BlogPost>,
        experience: Collection<Experience>,
        education: Collection<Education>,
        messages: Collection<Message>,
        prefs: Box<dyn KvStore>,
    ) -> Result<Self, StoreError> {
        let theme = match prefs.get(THEME_KEY)? {
            Some(value) => Theme::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Ignoring unknown stored theme {:?}", value);
                Theme::default()
            }),
            None => Theme::default(),
        };

        Ok(Self {
            projects,
            posts,
            experience,
            education,
            messages,
            profile: ProfileConfig::default(),
            persist_profile: false,
            authenticated: false,
            theme,
            prefs,
            notifier: Notifier::new(),
        })
    }

    /// Seed the collections and hand back the seed profile.
    fn load_seed(&mut self, seed: Seed) -> Result<ProfileConfig, StoreError> {
        self.projects.seed(seed.projects)?;
        self.posts.seed(seed.posts)?;
        self.experience.seed(seed.experience)?;
        self.education.seed(seed.education)?;
        self.messages.seed(seed.messages)?;
        Ok(seed.profile)
    }

    // --- Observers ---

    /// Register an observer. It sees only mutations made after this call.
    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn emit(&self, event: StoreEvent) {
        self.notifier.notify(&event);
    }

    fn emit_added<T: Entity>(&self, record: &T) {
        self.emit(StoreEvent::Added {
            kind: T::KIND,
            id: record.id().to_string(),
        });
    }

    fn emit_updated<T: Entity>(&self, id: &str) {
        self.emit(StoreEvent::Updated {
            kind: T::KIND,
            id: id.to_string(),
        });
    }

    fn emit_deleted<T: Entity>(&self, id: &str) {
        self.emit(StoreEvent::Deleted {
            kind: T::KIND,
            id: id.to_string(),
        });
    }

    // --- Projects ---

    pub fn projects(&self) -> Result<Vec<Project>, StoreError> {
        self.projects.list()
    }

    pub fn project(&self, id: &str) -> Result<Option<Project>, StoreError> {
        self.projects.get(id)
    }

    pub fn project_by_slug(&self, slug: &str) -> Result<Option<Project>, StoreError> {
        self.projects.find_by_slug(slug)
    }

    pub fn add_project(&mut self, new: NewProject) -> Result<Project, StoreError> {
        let project = self.projects.add(new)?;
        self.emit_added(&project);
        Ok(project)
    }

    pub fn update_project(
        &mut self,
        id: &str,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        let updated = self.projects.update(id, patch)?;
        if updated.is_some() {
            self.emit_updated::<Project>(id);
        }
        Ok(updated)
    }

    pub fn delete_project(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.projects.delete(id)?;
        if removed {
            self.emit_deleted::<Project>(id);
        }
        Ok(removed)
    }

    // --- Blog posts ---

    pub fn posts(&self) -> Result<Vec<BlogPost>, StoreError> {
        self.posts.list()
    }

    pub fn post(&self, id: &str) -> Result<Option<BlogPost>, StoreError> {
        self.posts.get(id)
    }

    pub fn post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        self.posts.find_by_slug(slug)
    }

    pub fn add_post(&mut self, new: NewBlogPost) -> Result<BlogPost, StoreError> {
        let post = self.posts.add(new)?;
        self.emit_added(&post);
        Ok(post)
    }

    pub fn update_post(
        &mut self,
        id: &str,
        patch: BlogPostPatch,
    ) -> Result<Option<BlogPost>, StoreError> {
        let updated = self.posts.update(id, patch)?;
        if updated.is_some() {
            self.emit_updated::<BlogPost>(id);
        }
        Ok(updated)
    }

    pub fn delete_post(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.posts.delete(id)?;
        if removed {
            self.emit_deleted::<BlogPost>(id);
        }
        Ok(removed)
    }

    /// Append a comment stamped with the current time. `None` if the post is absent.
    pub fn append_comment(
        &mut self,
        post_id: &str,
        new: NewComment,
    ) -> Result<Option<Comment>, StoreError> {
        let Some(mut post) = self.posts.get(post_id)? else {
            return Ok(None);
        };

        let comment = Comment {
            name: new.name,
            text: new.text,
            date: Utc::now(),
        };
        post.comments.push(comment.clone());
        self.posts.replace(post)?;

        self.emit(StoreEvent::CommentAdded {
            post_id: post_id.to_string(),
        });
        Ok(Some(comment))
    }

    // --- Experience ---

    pub fn experience(&self) -> Result<Vec<Experience>, StoreError> {
        self.experience.list()
    }

    pub fn add_experience(&mut self, new: NewExperience) -> Result<Experience, StoreError> {
        let entry = self.experience.add(new)?;
        self.emit_added(&entry);
        Ok(entry)
    }

    pub fn update_experience(
        &mut self,
        id: &str,
        patch: ExperiencePatch,
    ) -> Result<Option<Experience>, StoreError> {
        let updated = self.experience.update(id, patch)?;
        if updated.is_some() {
            self.emit_updated::<Experience>(id);
        }
        Ok(updated)
    }

    pub fn delete_experience(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.experience.delete(id)?;
        if removed {
            self.emit_deleted::<Experience>(id);
        }
        Ok(removed)
    }

    // --- Education ---

    pub fn education(&self) -> Result<Vec<Education>, StoreError> {
        self.education.list()
    }

    pub fn add_education(&mut self, new: NewEducation) -> Result<Education, StoreError> {
        let entry = self.education.add(new)?;
        self.emit_added(&entry);
        Ok(entry)
    }

    pub fn update_education(
        &mut self,
        id: &str,
        patch: EducationPatch,
    ) -> Result<Option<Education>, StoreError> {
        let updated = self.education.update(id, patch)?;
        if updated.is_some() {
            self.emit_updated::<Education>(id);
        }
        Ok(updated)
    }

    pub fn delete_education(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.education.delete(id)?;
        if removed {
            self.emit_deleted::<Education>(id);
        }
        Ok(removed)
    }

    // --- Messages ---

    pub fn messages(&self) -> Result<Vec<Message>, StoreError> {
        self.messages.list()
    }

    pub fn add_message(&mut self, new: NewMessage) -> Result<Message, StoreError> {
        let message = self.messages.add(new)?;
        self.emit_added(&message);
        Ok(message)
    }

    /// Only the read flag can change on a received message.
    pub fn update_message(
        &mut self,
        id: &str,
        patch: MessagePatch,
    ) -> Result<Option<Message>, StoreError> {
        let updated = self.messages.update(id, patch)?;
        if updated.is_some() {
            self.emit_updated::<Message>(id);
        }
        Ok(updated)
    }

    pub fn mark_message_read(&mut self, id: &str) -> Result<bool, StoreError> {
        let patch = MessagePatch {
            is_read: Some(true),
        };
        Ok(self.update_message(id, patch)?.is_some())
    }

    /// Mark every message read in one write. Returns how many flipped.
    /// A failed write changes nothing and notifies nobody.
    pub fn mark_all_read(&mut self) -> Result<usize, StoreError> {
        let unread: Vec<Message> = self
            .messages
            .list()?
            .into_iter()
            .filter(|m| !m.is_read)
            .map(|m| Message { is_read: true, ..m })
            .collect();
        let flipped = unread.len();

        if flipped > 0 {
            self.messages.replace_all(unread)?;
        }
        self.emit(StoreEvent::MessagesRead { count: flipped });
        Ok(flipped)
    }

    pub fn delete_message(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.messages.delete(id)?;
        if removed {
            self.emit_deleted::<Message>(id);
        }
        Ok(removed)
    }

    /// Counted from the current messages on every call.
    pub fn unread_count(&self) -> Result<usize, StoreError> {
        Ok(self.messages.list()?.iter().filter(|m| !m.is_read).count())
    }

    // --- Profile ---

    pub fn profile(&self) -> &ProfileConfig {
        &self.profile
    }

    /// Replace the whole profile. Callers merge partial edits beforehand.
    pub fn replace_profile(&mut self, profile: ProfileConfig) -> Result<(), StoreError> {
        if self.persist_profile {
            self.prefs
                .set(PROFILE_KEY, &serde_json::to_string(&profile)?)?;
        }
        self.profile = profile;
        self.emit(StoreEvent::ProfileReplaced);
        Ok(())
    }

    // --- Session flags ---

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Open the admin gate. Credentials are checked by the caller.
    pub fn login(&mut self) {
        self.authenticated = true;
        self.emit(StoreEvent::AuthChanged {
            authenticated: true,
        });
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        self.emit(StoreEvent::AuthChanged {
            authenticated: false,
        });
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and write it through to the preferences store.
    /// On a failed write the in-memory theme is left as it was.
    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        let next = self.theme.toggled();
        self.prefs.set(THEME_KEY, next.as_str())?;
        self.theme = next;
        self.emit(StoreEvent::ThemeChanged { theme: next });
        Ok(next)
    }
}
