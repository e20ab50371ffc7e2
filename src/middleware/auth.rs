//! Authentication middleware
//!
//! The dashboard signs users in against the hosted auth service and sends
//! its access token as a bearer token. We only verify it here.

use axum::{
    extract::{State, Request},
    middleware::Next,
    response::Response,
    http::header::AUTHORIZATION,
};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{AppState, AppError};

/// Access token claims issued by the hosted auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// User context extracted from JWT
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: String,
    pub email: Option<String>,
    pub role: String,
}

impl UserContext {
    /// Context used when authentication is disabled
    fn anonymous() -> Self {
        Self {
            user_id: "anonymous".to_string(),
            email: None,
            role: "anon".to_string(),
        }
    }
}

/// Middleware: Require user JWT authentication
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.config.auth_enabled {
        req.extensions_mut().insert(UserContext::anonymous());
        return Ok(next.run(req).await);
    }

    let token = extract_bearer_token(&req)?;
    let claims = verify_token(&token, &state.config.jwt_secret, &state.config.jwt_audience)?;

    let user_ctx = UserContext {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role.unwrap_or_else(|| "authenticated".to_string()),
    };

    tracing::trace!("Authenticated request from user {}", user_ctx.user_id);

    // Insert into request extensions
    req.extensions_mut().insert(user_ctx);

    Ok(next.run(req).await)
}

/// Decode and validate an HS256 access token
pub fn verify_token(token: &str, secret: &str, audience: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(req: &Request) -> Result<String, AppError> {
    let auth_header = req.headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Unauthorized)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

// Implement FromRequestParts for UserContext
#[axum::async_trait]
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions
            .get::<UserContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        exp: usize,
        aud: &'a str,
        role: &'a str,
    }

    fn sign(secret: &str, aud: &str, exp: usize) -> String {
        let claims = TestClaims { sub: "user-1", exp, aud, role: "authenticated" };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn in_an_hour() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_valid_token() {
        let token = sign("s3cret", "authenticated", in_an_hour());
        let claims = verify_token(&token, "s3cret", "authenticated").unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role.as_deref(), Some("authenticated"));
    }

    #[test]
    fn test_wrong_secret_or_audience() {
        let token = sign("s3cret", "authenticated", in_an_hour());
        assert!(matches!(verify_token(&token, "other", "authenticated"), Err(AppError::TokenInvalid)));
        assert!(matches!(verify_token(&token, "s3cret", "service"), Err(AppError::TokenInvalid)));
    }

    #[test]
    fn test_expired_token() {
        let long_ago = (chrono::Utc::now().timestamp() - 3600) as usize;
        let token = sign("s3cret", "authenticated", long_ago);
        assert!(matches!(verify_token(&token, "s3cret", "authenticated"), Err(AppError::TokenExpired)));
    }
}
