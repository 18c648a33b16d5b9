// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, models::user::User, state::AppState};

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - the user's email.
    pub sub: String,
    /// Opaque session id; the token is only honoured while the session is open.
    pub sid: String,
    /// User's role ('student' or 'admin').
    pub role: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Identity of the request's session, injected by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub session_id: Uuid,
    pub identity: User,
}

/// Signs a new JWT for an open session.
pub fn sign_jwt(
    session_id: Uuid,
    user: &User,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    // Calculate expiration: current time + expiration_seconds
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: user.email.clone(),
        sid: session_id.to_string(),
        role: user.role.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a JWT string.
///
/// Returns the `Claims` if valid, otherwise returns an `AppError`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

    Ok(token_data.claims)
}

/// Axum Middleware: Authentication.
///
/// Validates the 'Authorization: Bearer <token>' header and looks the session up.
/// If both are valid, injects [`CurrentUser`] into the request extensions.
/// Otherwise returns 401 Unauthorized, including for tokens of closed sessions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return Err(StatusCode::UNAUTHORIZED),
    };

    let claims =
        verify_jwt(token, &state.config.jwt_secret).map_err(|_| StatusCode::UNAUTHORIZED)?;
    let session_id = Uuid::parse_str(&claims.sid).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let identity = state
        .sessions
        .read()
        .await
        .current(session_id)
        .map(|s| s.identity.clone())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(CurrentUser {
        session_id,
        identity,
    });
    Ok(next.run(req).await)
}

/// Axum Middleware: Admin Authorization.
///
/// Must be used AFTER `auth_middleware`. Returns 403 Forbidden unless the
/// session belongs to an administrator.
pub async fn admin_middleware(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let current = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !current.identity.is_admin() {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_roundtrip_claims() {
        let user = User::admin("Admin", "admin@example.com", String::new());
        let sid = Uuid::new_v4();
        let token = sign_jwt(sid, &user, "secret", 60).unwrap();

        let claims = verify_jwt(&token, "secret").unwrap();
        assert_eq!(claims.sub, "admin@example.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.sid, sid.to_string());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let user = User::admin("Admin", "admin@example.com", String::new());
        let token = sign_jwt(Uuid::new_v4(), &user, "secret", 60).unwrap();
        assert!(verify_jwt(&token, "other").is_err());
    }
}
