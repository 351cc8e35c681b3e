use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::profile::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| Error::Authentication("Invalid session identity".to_string()))
    }

    pub fn role_parsed(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }

    /// Display name, or the account email when no name was ever set.
    pub fn display_handle(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.email.clone())
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    let auth_header = req.headers().get(axum::http::header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}

fn decode_claims(token: &str) -> std::result::Result<Claims, jsonwebtoken::errors::Error> {
    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

pub async fn require_bearer_auth(mut req: Request, next: Next) -> Response {
    let Some(token) = bearer_token(&req) else {
        return unauthorized("missing_authorization");
    };
    match decode_claims(token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(_) => unauthorized("invalid_token"),
    }
}

pub async fn require_admin(mut req: Request, next: Next) -> Response {
    let Some(token) = bearer_token(&req) else {
        return unauthorized("missing_authorization");
    };
    match decode_claims(token) {
        Ok(claims) => {
            if claims.role_parsed() != Some(Role::Admin) {
                return (StatusCode::FORBIDDEN, Json(json!({"error":"forbidden"})))
                    .into_response();
            }
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(_) => unauthorized("invalid_token"),
    }
}

/// Attaches claims when a valid bearer token is present, but never rejects:
/// used by routes that render differently for guests and members.
pub async fn attach_bearer_identity(mut req: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(&req) {
        if let Ok(claims) = decode_claims(token) {
            req.extensions_mut().insert(claims);
        }
    }
    next.run(req).await
}
