pub mod auth;

pub use auth::{AuthConfig, AuthenticatedUser, JwtAuthenticator, require_auth};
