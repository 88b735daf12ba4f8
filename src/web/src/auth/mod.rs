pub mod routes;

use crate::{ApiError, AppData};
use axum::Json;
use axum::extract::{FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::IntoResponse;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::json;

const TOKEN_LIFETIME_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Bearer-token guard. Adding this extractor to a handler makes the
/// route require a valid admin token: 401 when the header is missing,
/// 403 when the token fails verification.
pub struct AuthToken(pub Claims);

impl FromRequestParts<AppData> for AuthToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppData,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized(String::from("Unauthorized")))?;

        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|err| {
            warn!("JWT verification error: {}", err);
            ApiError::Forbidden(String::from("Forbidden: Invalid or expired token"))
        })?;

        Ok(AuthToken(data.claims))
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login_action(
    State(state): State<AppData>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    let config = &state.config;

    let valid = match (&config.admin_username, &config.admin_password) {
        (Some(username), Some(password)) => {
            request.username == *username && request.password == *password
        }
        _ => false,
    };

    if !valid {
        warn!("rejected login attempt for user: {}", request.username);
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        );
    }

    let claims = Claims {
        sub: request.username,
        exp: (Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize,
    };

    match jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    ) {
        Ok(token) => (
            StatusCode::OK,
            Json(json!({ "success": true, "token": token })),
        ),
        Err(err) => {
            warn!("token issue failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": "Failed to issue token" })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_carry_the_admin_subject() {
        let claims = Claims {
            sub: String::from("admin"),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let decoded = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();

        let auth = AuthToken(decoded.claims);
        assert_eq!(auth.0.sub, "admin");
    }
}
