use serde::{Deserialize, Serialize};

use crate::content::{BlogPost, Education, Experience, Project};

/// Listing filters accepted by the public content endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Keep only records whose tags contain this value (case-insensitive).
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches before paging was applied.
    pub total: usize,
}

pub trait Listable {
    fn tags(&self) -> &[String];

    fn is_featured(&self) -> bool {
        false
    }
}

impl Listable for Project {
    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_featured(&self) -> bool {
        self.is_featured
    }
}

impl Listable for BlogPost {
    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_featured(&self) -> bool {
        self.is_featured
    }
}

impl Listable for Experience {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Listable for Education {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl ListQuery {
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        if let Some(ref tag) = self.tag {
            if !item.tags().iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if item.is_featured() != featured {
                return false;
            }
        }
        true
    }

    /// Filter then slice an already materialized list, preserving its order.
    pub fn apply<T: Listable>(&self, items: Vec<T>) -> Page<T> {
        let matched: Vec<T> = items.into_iter().filter(|i| self.matches(i)).collect();
        let total = matched.len();
        let offset = self.offset.unwrap_or(0);
        let items = match self.limit {
            Some(limit) => matched.into_iter().skip(offset).take(limit).collect(),
            None => matched.into_iter().skip(offset).collect(),
        };
        Page { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        tags: Vec<String>,
        featured: bool,
    }

    impl Listable for Item {
        fn tags(&self) -> &[String] {
            &self.tags
        }

        fn is_featured(&self) -> bool {
            self.featured
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                name: "a",
                tags: vec!["Rust".into()],
                featured: true,
            },
            Item {
                name: "b",
                tags: vec!["go".into()],
                featured: false,
            },
            Item {
                name: "c",
                tags: vec!["rust".into(), "wasm".into()],
                featured: false,
            },
        ]
    }

    #[test]
    fn empty_query_keeps_everything() {
        let page = ListQuery::default().apply(items());
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn tag_filter_ignores_case() {
        let q = ListQuery {
            tag: Some("rust".into()),
            ..Default::default()
        };
        let names: Vec<_> = q.apply(items()).items.iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn featured_filter() {
        let q = ListQuery {
            featured: Some(true),
            ..Default::default()
        };
        let page = q.apply(items());
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "a");
    }

    #[test]
    fn paging_reports_total_before_slice() {
        let q = ListQuery {
            offset: Some(1),
            limit: Some(1),
            ..Default::default()
        };
        let page = q.apply(items());
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "b");
    }

    #[test]
    fn offset_past_end_is_empty() {
        let q = ListQuery {
            offset: Some(10),
            ..Default::default()
        };
        let page = q.apply(items());
        assert_eq!(page.total, 3);
        assert!(page.items.is_empty());
    }
}
