use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// In-process admin sessions keyed by cookie token.
pub struct SessionStore {
    sessions: HashMap<String, Instant>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_hours: u64) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl: Duration::from_secs(ttl_hours * 3600),
        }
    }

    /// Start a session and return its token.
    pub fn create(&mut self) -> String {
        self.clear_stale();

        let token = generate_token();
        self.sessions
            .insert(token.clone(), Instant::now() + self.ttl);
        token
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.sessions
            .get(token)
            .map(|expires_at| Instant::now() < *expires_at)
            .unwrap_or(false)
    }

    pub fn revoke(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    pub fn active_count(&mut self) -> usize {
        self.clear_stale();
        self.sessions.len()
    }

    /// Remove expired sessions
    fn clear_stale(&mut self) {
        let now = Instant::now();
        self.sessions.retain(|_, expires_at| now < *expires_at);
    }
}

/// Generate a cryptographically random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
