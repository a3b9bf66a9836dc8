use serde::Serialize;

use crate::content::EntityKind;
use crate::store::theme::Theme;

/// What a mutation changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    Added { kind: EntityKind, id: String },
    Updated { kind: EntityKind, id: String },
    Deleted { kind: EntityKind, id: String },
    CommentAdded { post_id: String },
    MessagesRead { count: usize },
    ProfileReplaced,
    AuthChanged { authenticated: bool },
    ThemeChanged { theme: Theme },
}

/// Callbacks run while the store is borrowed; they must not call back into it.
pub type Observer = Box<dyn Fn(&StoreEvent) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers, invoked synchronously in registration order.
#[derive(Default)]
pub struct Notifier {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn notify(&self, event: &StoreEvent) {
        for (_, observer) in &self.observers {
            observer(event);
        }
    }
}
