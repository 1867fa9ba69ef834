use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use uuid::Uuid;

use adlink_core::{Error, guard};
use adlink_types::api::Claims;
use adlink_types::models::Role;

use crate::auth::AppState;
use crate::campaigns::SearchParams;
use crate::error::ApiResult;
use crate::middleware::identity;

/// The influencer pool a sponsor picks targets from, optionally
/// filtered by name, category, or niche.
pub async fn list_influencers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    guard::require_role(Some(identity(&claims)), Role::Sponsor)?;

    let pool = state.db.influencers(params.search_query.as_deref())?;
    Ok(Json(pool))
}

pub async fn influencer_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    guard::require_role(Some(identity(&claims)), Role::Sponsor)?;

    let user = state
        .db
        .user_by_id(id)?
        .ok_or(Error::NotFound("influencer"))?;
    if user.profile.role() != Role::Influencer {
        return Err(Error::NotFound("influencer").into());
    }

    Ok(Json(user))
}
