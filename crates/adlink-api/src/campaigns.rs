use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use adlink_core::{Error, guard, validate, visibility};
use adlink_types::api::{CampaignDetail, CampaignForm, Claims};
use adlink_types::models::{Campaign, CampaignStatus, Role};

use crate::adrequests::to_view;
use crate::auth::AppState;
use crate::error::ApiResult;
use crate::middleware::identity;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search_query: Option<String>,
}

pub async fn list_campaigns(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Query(params): Query<SearchParams>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    // An unrecognized role is an authorization failure, not an empty list.
    let route_role: Role = role.parse().map_err(|_| Error::Forbidden)?;
    let viewer = guard::require_role(Some(identity(&claims)), route_role)?;

    let scope = visibility::listing_scope(viewer, params.search_query.as_deref())?;
    let campaigns = state.db.campaigns(&scope)?;

    Ok(Json(campaigns))
}

pub async fn create_campaign(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<CampaignForm>,
) -> ApiResult<impl IntoResponse> {
    let sponsor = guard::require_role(Some(identity(&claims)), Role::Sponsor)?;

    let start_date = chrono::Utc::now().date_naive();
    validate::campaign_dates(start_date, form.deadline)?;

    let campaign = Campaign {
        id: Uuid::new_v4(),
        sponsor_id: sponsor.id,
        name: form.name,
        description: form.description,
        start_date,
        end_date: form.deadline,
        budget: form.budget,
        visibility: form.visibility,
        goals: form.goals,
        status: CampaignStatus::Ongoing,
        created_at: chrono::Utc::now(),
    };

    state.db.insert_campaign(&campaign)?;

    Ok((StatusCode::CREATED, Json(campaign)))
}

/// Campaign detail. A sponsor sees their own campaign with every ad
/// request under it; an influencer sees any campaign but only their
/// own ad requests.
pub async fn view_campaign(
    State(state): State<AppState>,
    Path((role, id)): Path<(String, Uuid)>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let route_role: Role = role.parse().map_err(|_| Error::Forbidden)?;
    let viewer = guard::require_role(Some(identity(&claims)), route_role)?;

    let campaign = state
        .db
        .campaign_by_id(id)?
        .ok_or(Error::NotFound("campaign"))?;

    let records = match viewer.role {
        Role::Sponsor => {
            guard::ensure_campaign_owner(viewer, &campaign)?;
            state.db.ad_requests_for_campaign(id)?
        }
        Role::Influencer => state.db.ad_requests_for_campaign_and_influencer(id, viewer.id)?,
        Role::Admin => return Err(Error::Forbidden.into()),
    };

    Ok(Json(CampaignDetail {
        campaign,
        ad_requests: records.into_iter().map(to_view).collect(),
    }))
}

pub async fn edit_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<CampaignForm>,
) -> ApiResult<impl IntoResponse> {
    let sponsor = guard::require_role(Some(identity(&claims)), Role::Sponsor)?;

    let mut campaign = state
        .db
        .campaign_by_id(id)?
        .ok_or(Error::NotFound("campaign"))?;
    guard::ensure_campaign_owner(sponsor, &campaign)?;

    validate::campaign_dates(campaign.start_date, form.deadline)?;

    campaign.name = form.name;
    campaign.description = form.description;
    campaign.end_date = form.deadline;
    campaign.budget = form.budget;
    campaign.visibility = form.visibility;
    campaign.goals = form.goals;

    state.db.update_campaign(&campaign)?;

    Ok(Json(campaign))
}

pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let sponsor = guard::require_role(Some(identity(&claims)), Role::Sponsor)?;

    let campaign = state
        .db
        .campaign_by_id(id)?
        .ok_or(Error::NotFound("campaign"))?;
    guard::ensure_campaign_owner(sponsor, &campaign)?;

    state.db.delete_campaign(id)?;

    Ok(StatusCode::NO_CONTENT)
}
