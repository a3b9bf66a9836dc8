use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hash error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Password check did not finish: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Checks admin credentials. The store only ever learns the boolean outcome.
#[async_trait]
pub trait CredentialCheck: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> Result<bool, AuthError>;
}

/// Single admin account taken from config.
pub struct ConfiguredAdmin {
    email: String,
    password_hash: String,
}

impl ConfiguredAdmin {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

#[async_trait]
impl CredentialCheck for ConfiguredAdmin {
    async fn verify(&self, email: &str, password: &str) -> Result<bool, AuthError> {
        if self.password_hash.is_empty() {
            tracing::warn!("Admin login attempted but no password hash is configured");
            return Ok(false);
        }
        if !self.email.eq_ignore_ascii_case(email.trim()) {
            return Ok(false);
        }

        // bcrypt is deliberately slow; keep it off the async workers
        let password = password.to_string();
        let hash = self.password_hash.clone();
        let matched =
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matched)
    }
}

/// Hash a password for the `auth.admin_password_hash` config entry.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}
