use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use uuid::Uuid;

use adlink_core::Error;
use adlink_core::workflow::ResponsePolicy;
use adlink_db::Database;
use adlink_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use adlink_types::models::{Role, RoleProfile, User};

use crate::error::ApiResult;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    pub response_policy: ResponsePolicy,
}

pub async fn register(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let role: Role = role
        .parse()
        .map_err(|_| Error::NotFound("registration role"))?;

    // Validate input
    if req.username.len() < 3 || req.username.len() > 32 {
        return Err(Error::Validation("username must be 3-32 characters".into()).into());
    }
    if req.password.len() < 8 {
        return Err(Error::Validation("password must be at least 8 characters".into()).into());
    }

    if state.db.user_credentials(&req.username)?.is_some() {
        return Err(Error::Conflict("username already exists").into());
    }
    if state.db.email_taken(&req.email)? {
        return Err(Error::Conflict("email already exists").into());
    }

    // Only the fields belonging to the registered role are kept.
    let profile = match role {
        Role::Admin => RoleProfile::Admin,
        Role::Sponsor => RoleProfile::Sponsor {
            industry: req.industry,
            budget: req.budget,
        },
        Role::Influencer => RoleProfile::Influencer {
            category: req.category,
            niche: req.niche,
            reach: req.reach,
        },
    };

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();

    let user = User {
        id: Uuid::new_v4(),
        username: req.username,
        name: req.name,
        email: req.email,
        profile,
        created_at: chrono::Utc::now(),
    };

    state.db.create_user(&user, &password_hash)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { user_id: user.id }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (user, stored_hash) = state
        .db
        .user_credentials(&req.username)?
        .ok_or(Error::Unauthenticated)?;

    let parsed_hash = PasswordHash::new(&stored_hash)
        .map_err(|e| anyhow::anyhow!("stored hash unreadable: {}", e))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| Error::Unauthenticated)?;

    let token = create_token(&state.jwt_secret, &user)?;

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        role: user.profile.role(),
        token,
    }))
}

/// Tokens are stateless; logout is an acknowledgement and the client
/// discards its copy.
pub async fn logout(Extension(_claims): Extension<Claims>) -> impl IntoResponse {
    Json(json!({ "message": "You have been logged out." }))
}

fn create_token(secret: &str, user: &User) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.profile.role(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
