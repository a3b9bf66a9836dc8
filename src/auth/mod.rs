pub mod credentials;
pub mod handlers;
pub mod session;

pub use credentials::{hash_password, AuthError, ConfiguredAdmin, CredentialCheck};
pub use session::SessionStore;
