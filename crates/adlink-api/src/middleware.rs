use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use adlink_core::Error;
use adlink_core::guard::Identity;
use adlink_types::api::Claims;

use crate::auth::AppState;
use crate::error::ApiError;

/// Extract and validate the bearer token, then park the claims in the
/// request extensions for the handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError(Error::Unauthenticated))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError(Error::Unauthenticated))?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError(Error::Unauthenticated))?;

    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}

/// The explicit identity value the decision core works with.
pub fn identity(claims: &Claims) -> Identity {
    Identity::new(claims.sub, claims.role)
}
