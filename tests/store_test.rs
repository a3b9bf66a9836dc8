use std::sync::{Arc, Mutex};

use folio::content::seed::Seed;
use folio::content::{
    BlogPostPatch, EntityKind, ListQuery, NewBlogPost, NewComment, NewMessage, NewProject,
    ProjectPatch,
};
use folio::db;
use folio::kv::{KvStore, MemoryKv, SqliteKv};
use folio::store::{PortfolioStore, StoreEvent, Theme};
use tempfile::TempDir;

fn sample_store() -> PortfolioStore {
    PortfolioStore::in_memory(Seed::sample(), Box::new(MemoryKv::new()))
        .expect("Failed to build store")
}

fn record_events(store: &mut PortfolioStore) -> Arc<Mutex<Vec<StoreEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    store.subscribe(Box::new(move |event| sink.lock().unwrap().push(event.clone())));
    events
}

fn project(title: &str) -> NewProject {
    NewProject {
        title: title.to_string(),
        ..Default::default()
    }
}

#[test]
fn added_project_is_listed_first() {
    let mut store = sample_store();
    let before = store.projects().unwrap().len();

    let created = store.add_project(project("Tile Renderer")).unwrap();

    let projects = store.projects().unwrap();
    assert_eq!(projects.len(), before + 1);
    assert_eq!(projects[0].id, created.id);
    assert_eq!(created.slug, "tile-renderer");
    assert_eq!(
        store.project_by_slug("tile-renderer").unwrap().unwrap().id,
        created.id
    );
}

#[test]
fn ids_are_unique_across_adds() {
    let mut store = PortfolioStore::in_memory(Seed::empty(), Box::new(MemoryKv::new())).unwrap();
    let mut ids: Vec<String> = (0..50)
        .map(|i| store.add_project(project(&format!("P{}", i))).unwrap().id)
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn duplicate_titles_get_distinct_slugs() {
    let mut store = PortfolioStore::in_memory(Seed::empty(), Box::new(MemoryKv::new())).unwrap();
    let first = store.add_project(project("Same Name")).unwrap();
    let second = store.add_project(project("Same Name")).unwrap();
    assert_eq!(first.slug, "same-name");
    assert_eq!(second.slug, "same-name-2");
}

#[test]
fn update_keeps_unpatched_fields_and_position() {
    let mut store = sample_store();
    let original = store.project("seed-proj-lanyard").unwrap().unwrap();

    let updated = store
        .update_project(
            "seed-proj-lanyard",
            ProjectPatch {
                is_featured: Some(true),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

    assert!(updated.is_featured);
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.slug, original.slug);
    assert_eq!(store.projects().unwrap()[1].id, "seed-proj-lanyard");
}

#[test]
fn post_patch_does_not_touch_comments() {
    let mut store = sample_store();
    let updated = store
        .update_post(
            "seed-post-rewrite",
            BlogPostPatch {
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.comments.len(), 1);
}

#[test]
fn comments_append_in_order() {
    let mut store = sample_store();
    for text in ["first", "second"] {
        store
            .append_comment(
                "seed-post-notes",
                NewComment {
                    name: "Kim".to_string(),
                    text: text.to_string(),
                },
            )
            .unwrap()
            .unwrap();
    }

    let post = store.post("seed-post-notes").unwrap().unwrap();
    let texts: Vec<&str> = post.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[test]
fn comment_on_missing_post_is_none_and_silent() {
    let mut store = sample_store();
    let events = record_events(&mut store);

    let result = store
        .append_comment(
            "nope",
            NewComment {
                name: "Kim".to_string(),
                text: "hi".to_string(),
            },
        )
        .unwrap();

    assert!(result.is_none());
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn contact_flow_updates_unread_count() {
    let mut store = sample_store();
    assert_eq!(store.unread_count().unwrap(), 1);

    let message = store
        .add_message(NewMessage {
            name: "Robin".to_string(),
            email: "robin@example.com".to_string(),
            message: "Hello".to_string(),
        })
        .unwrap();
    assert!(!message.is_read);
    assert_eq!(store.unread_count().unwrap(), 2);

    assert!(store.mark_message_read(&message.id).unwrap());
    assert_eq!(store.unread_count().unwrap(), 1);

    assert_eq!(store.mark_all_read().unwrap(), 1);
    assert_eq!(store.unread_count().unwrap(), 0);
}

#[test]
fn every_observer_sees_each_mutation_in_order() {
    let mut store = sample_store();
    let first = record_events(&mut store);
    let second = record_events(&mut store);

    let post = store
        .add_post(NewBlogPost {
            title: "Hello".to_string(),
            ..Default::default()
        })
        .unwrap();
    store.delete_post(&post.id).unwrap();
    store.toggle_theme().unwrap();

    let expected = vec![
        StoreEvent::Added {
            kind: EntityKind::Post,
            id: post.id.clone(),
        },
        StoreEvent::Deleted {
            kind: EntityKind::Post,
            id: post.id.clone(),
        },
        StoreEvent::ThemeChanged {
            theme: Theme::Light,
        },
    ];
    assert_eq!(*first.lock().unwrap(), expected);
    assert_eq!(*second.lock().unwrap(), expected);
}

#[test]
fn unsubscribed_observer_stops_receiving() {
    let mut store = sample_store();
    let events = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&events);
    let id = store.subscribe(Box::new(move |_| *counter.lock().unwrap() += 1));

    store.login();
    assert!(store.unsubscribe(id));
    store.logout();

    assert_eq!(*events.lock().unwrap(), 1);
    assert!(!store.unsubscribe(id));
}

#[test]
fn theme_toggle_is_written_through() {
    let tmp = TempDir::new().unwrap();
    let pool = db::create_pool(&tmp.path().join("test.db")).unwrap();
    db::run_migrations(&pool).unwrap();

    let mut store =
        PortfolioStore::in_memory(Seed::sample(), Box::new(SqliteKv::new(pool.clone()))).unwrap();
    assert_eq!(store.theme(), Theme::Dark);
    assert_eq!(store.toggle_theme().unwrap(), Theme::Light);

    let kv = SqliteKv::new(pool.clone());
    assert_eq!(kv.get("theme").unwrap().as_deref(), Some("light"));

    // A fresh store reads the persisted value back
    let reopened = PortfolioStore::in_memory(Seed::sample(), Box::new(SqliteKv::new(pool))).unwrap();
    assert_eq!(reopened.theme(), Theme::Light);
}

#[test]
fn in_memory_content_resets_on_restart() {
    let mut store = sample_store();
    store.delete_project("seed-proj-ledger").unwrap();
    assert!(store.project("seed-proj-ledger").unwrap().is_none());

    let fresh = sample_store();
    assert!(fresh.project("seed-proj-ledger").unwrap().is_some());
}

#[test]
fn sqlite_content_survives_restart() {
    let tmp = TempDir::new().unwrap();
    let pool = db::create_pool(&tmp.path().join("test.db")).unwrap();
    db::run_migrations(&pool).unwrap();

    let created = {
        let mut store = PortfolioStore::sqlite(pool.clone(), Seed::sample()).unwrap();
        store.delete_project("seed-proj-ledger").unwrap();
        store.add_project(project("Kept Around")).unwrap()
    };

    let store = PortfolioStore::sqlite(pool, Seed::sample()).unwrap();
    let projects = store.projects().unwrap();
    assert_eq!(projects[0].id, created.id);
    assert!(store.project("seed-proj-ledger").unwrap().is_none());
}

#[test]
fn list_query_pages_filtered_projects() {
    let store = sample_store();
    let query = ListQuery {
        tag: Some("RUST".to_string()),
        ..Default::default()
    };
    let page = query.apply(store.projects().unwrap());
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "seed-proj-ledger");
}

#[test]
fn comment_is_stamped_at_call_time() {
    let mut store = sample_store();
    let before = chrono::Utc::now();
    let comment = store
        .append_comment(
            "seed-post-rewrite",
            NewComment {
                name: "Lee".to_string(),
                text: "Late to the party".to_string(),
            },
        )
        .unwrap()
        .unwrap();

    let post = store.post("seed-post-rewrite").unwrap().unwrap();
    assert_eq!(post.comments.len(), 2);
    assert_eq!(post.comments.last(), Some(&comment));
    assert!(comment.date >= before);
}

#[test]
fn message_lifecycle_from_empty_inbox() {
    let mut store = PortfolioStore::in_memory(Seed::empty(), Box::new(MemoryKv::new())).unwrap();
    assert!(store.messages().unwrap().is_empty());

    let message = store
        .add_message(NewMessage {
            name: "Ari".to_string(),
            email: "ari@example.com".to_string(),
            message: "Ping".to_string(),
        })
        .unwrap();
    assert_eq!(store.messages().unwrap().len(), 1);
    assert!(!store.messages().unwrap()[0].is_read);

    store.mark_message_read(&message.id).unwrap();
    assert!(store.messages().unwrap()[0].is_read);

    assert!(store.delete_message(&message.id).unwrap());
    assert!(store.messages().unwrap().is_empty());
}

#[test]
fn mark_all_read_is_idempotent() {
    let mut store = sample_store();
    store.mark_all_read().unwrap();
    let once = store.messages().unwrap();

    assert_eq!(store.mark_all_read().unwrap(), 0);
    assert_eq!(store.messages().unwrap(), once);
    assert_eq!(store.unread_count().unwrap(), 0);
}

#[test]
fn theme_toggled_twice_returns_to_dark() {
    let mut store = sample_store();
    store.toggle_theme().unwrap();
    assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);
    assert_eq!(store.theme(), Theme::Dark);
}

#[test]
fn missing_ids_leave_collections_unchanged() {
    let mut store = sample_store();
    let before = store.projects().unwrap();

    assert!(store
        .update_project("missing", ProjectPatch::default())
        .unwrap()
        .is_none());
    assert!(!store.delete_project("missing").unwrap());
    assert!(!store.mark_message_read("missing").unwrap());

    assert_eq!(store.projects().unwrap(), before);
}
