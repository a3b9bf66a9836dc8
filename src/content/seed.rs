use chrono::{DateTime, TimeZone, Utc};

use crate::content::{
    BlogPost, Comment, Education, Experience, Message, ProfileConfig, Project, Socials,
};

/// Initial contents of a fresh store.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub projects: Vec<Project>,
    pub posts: Vec<BlogPost>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub messages: Vec<Message>,
    pub profile: ProfileConfig,
}

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Seed {
    /// No records and a blank profile.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The sample portfolio the site ships with.
    pub fn sample() -> Self {
        Self {
            projects: vec![
                Project {
                    id: "seed-proj-ledger".to_string(),
                    title: "Ledger Sync".to_string(),
                    slug: "ledger-sync".to_string(),
                    description: "Offline-first bookkeeping with conflict-free sync.".to_string(),
                    content: "Ledger Sync keeps a local journal per device and merges \
                              them on reconnect."
                        .to_string(),
                    tech_stack: strings(&["Rust", "SQLite", "CRDT"]),
                    tags: strings(&["rust", "sync"]),
                    demo_url: None,
                    repo_url: Some("https://github.com/example/ledger-sync".to_string()),
                    thumbnail_url: None,
                    is_featured: true,
                    published_at: Some(date(2024, 3, 2)),
                    created_at: date(2024, 2, 20),
                },
                Project {
                    id: "seed-proj-lanyard".to_string(),
                    title: "Badge Lanyard".to_string(),
                    slug: "badge-lanyard".to_string(),
                    description: "A physics-driven conference badge for the landing page."
                        .to_string(),
                    content: "Rope joints and a ribbon mesh hanging a card you can drag."
                        .to_string(),
                    tech_stack: strings(&["TypeScript", "WebGL"]),
                    tags: strings(&["frontend", "3d"]),
                    demo_url: Some("https://example.dev/lanyard".to_string()),
                    repo_url: None,
                    thumbnail_url: None,
                    is_featured: false,
                    published_at: Some(date(2023, 11, 14)),
                    created_at: date(2023, 11, 1),
                },
            ],
            posts: vec![
                BlogPost {
                    id: "seed-post-rewrite".to_string(),
                    title: "Rewriting My Site Backend".to_string(),
                    slug: "rewriting-my-site-backend".to_string(),
                    excerpt: "Why the portfolio now runs on a tiny server.".to_string(),
                    content: "The first version kept everything in the browser...".to_string(),
                    cover_image: None,
                    published_at: Some(date(2024, 4, 10)),
                    is_featured: true,
                    tags: strings(&["rust", "meta"]),
                    comments: vec![Comment {
                        name: "Sam".to_string(),
                        text: "Nice write-up!".to_string(),
                        date: date(2024, 4, 11),
                    }],
                },
                BlogPost {
                    id: "seed-post-notes".to_string(),
                    title: "Notes on Hash Routing".to_string(),
                    slug: "notes-on-hash-routing".to_string(),
                    excerpt: "Prefix matching is enough for a five-page site.".to_string(),
                    content: "Hash routes avoid any server configuration...".to_string(),
                    cover_image: None,
                    published_at: Some(date(2023, 12, 5)),
                    is_featured: false,
                    tags: strings(&["frontend"]),
                    comments: Vec::new(),
                },
            ],
            experience: vec![
                Experience {
                    id: "seed-exp-platform".to_string(),
                    role: "Senior Software Engineer".to_string(),
                    company: "Northwind Systems".to_string(),
                    period: "2022 - Present".to_string(),
                    description: "Storage and sync services.".to_string(),
                    tags: strings(&["rust", "postgres"]),
                },
                Experience {
                    id: "seed-exp-agency".to_string(),
                    role: "Web Developer".to_string(),
                    company: "Bright Pixel Studio".to_string(),
                    period: "2019 - 2022".to_string(),
                    description: "Client sites and design systems.".to_string(),
                    tags: strings(&["typescript", "css"]),
                },
            ],
            education: vec![Education {
                id: "seed-edu-bsc".to_string(),
                degree: "B.Sc. Computer Science".to_string(),
                school: "State University".to_string(),
                period: "2015 - 2019".to_string(),
                gpa: Some("3.7".to_string()),
                description: Some("Systems track.".to_string()),
                tags: strings(&["algorithms", "networks"]),
            }],
            messages: vec![Message {
                id: "seed-msg-hello".to_string(),
                name: "Alex".to_string(),
                email: "alex@example.com".to_string(),
                message: "Loved the lanyard demo. Open to freelance work?".to_string(),
                is_read: false,
                created_at: date(2024, 5, 1),
            }],
            profile: ProfileConfig {
                name: "Jordan Lee".to_string(),
                avatar_url: "/uploads/avatar.png".to_string(),
                title: "Software Engineer".to_string(),
                description: "I build dependable systems and playful interfaces.".to_string(),
                detailed_bio: "Backend engineer by day, tinkering with graphics by night."
                    .to_string(),
                address: "Remote".to_string(),
                resume_url: "/uploads/resume.pdf".to_string(),
                badge: "Open to work".to_string(),
                socials: Socials {
                    github: Some("https://github.com/example".to_string()),
                    linkedin: Some("https://linkedin.com/in/example".to_string()),
                    email: Some("hello@example.com".to_string()),
                    ..Default::default()
                },
            },
        }
    }
}
