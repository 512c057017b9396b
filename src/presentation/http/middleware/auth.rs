use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use std::env;
use std::sync::Arc;

use crate::presentation::http::dto::ErrorDetailDto;

#[derive(Debug)]
pub enum AuthError {
    InvalidToken(String),
    MissingSubject,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidToken(msg) => write!(f, "Invalid authentication token: {}", msg),
            AuthError::MissingSubject => write!(f, "Missing user ID in token"),
        }
    }
}

impl std::error::Error for AuthError {}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub audience: String,
    pub issuer: String,
}

impl AuthConfig {
    /// Issuer is derived from the hosted platform's project ref, the same way
    /// the platform itself mints tokens.
    pub fn from_env() -> Result<Self, String> {
        let secret = env::var("SUPABASE_JWT_SECRET")
            .map_err(|_| "SUPABASE_JWT_SECRET is not set".to_string())?;
        let project_id = env::var("SUPABASE_PROJECT_ID")
            .map_err(|_| "SUPABASE_PROJECT_ID is not set".to_string())?;
        let audience =
            env::var("SUPABASE_JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".to_string());
        let issuer = format!("https://{}.supabase.co/auth/v1", project_id);

        Ok(Self {
            secret,
            audience,
            issuer,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
}

/// Stateless bearer-token verification: HS256 signature against the shared
/// secret, plus audience and issuer equality. No session state.
pub struct JwtAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthenticator {
    pub fn new(config: AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_issuer(&[config.issuer.as_str()]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    pub fn from_env() -> Result<Self, String> {
        Ok(Self::new(AuthConfig::from_env()?))
    }

    /// Returns the token's `sub` claim (the user id) or `AuthError`.
    pub fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        token_data
            .claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(AuthError::MissingSubject)
    }
}

/// User id extracted by the auth middleware, available to handlers through
/// request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

pub async fn require_auth(
    State(authenticator): State<Arc<JwtAuthenticator>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return unauthorized("Missing bearer token");
    };

    match authenticator.authenticate(token) {
        Ok(user_id) => {
            tracing::debug!(user_id = %user_id, "Authenticated request");
            request.extensions_mut().insert(AuthenticatedUser(user_id));
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!("JWT validation failed: {}", e);
            unauthorized("Invalid authentication token")
        }
    }
}

fn unauthorized(detail: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorDetailDto {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}
