use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use adlink_core::workflow::{self, Decision};
use adlink_core::{Error, guard, validate};
use adlink_db::models::AdRequestRecord;
use adlink_types::api::{AdRequestTerms, AdRequestView, Claims, CreateAdRequest, SendAdRequest};
use adlink_types::models::{AdRequest, CreatedBy, RequestStatus, Role, Visibility};

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::middleware::identity;

pub(crate) fn to_view(record: AdRequestRecord) -> AdRequestView {
    AdRequestView {
        id: record.request.id,
        campaign_id: record.request.campaign_id,
        influencer_id: record.request.influencer_id,
        influencer_name: record.influencer_name,
        messages: record.request.messages,
        requirements: record.request.requirements,
        payment_amount: record.request.payment_amount,
        created_by: record.request.created_by,
        status: record.request.status,
        created_at: record.request.created_at,
    }
}

/// Sponsor sends an ad request to an influencer under one of their
/// own campaigns.
pub async fn create_adrequest(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateAdRequest>,
) -> ApiResult<impl IntoResponse> {
    let sponsor = guard::require_role(Some(identity(&claims)), Role::Sponsor)?;

    let campaign = state
        .db
        .campaign_by_id(campaign_id)?
        .ok_or(Error::NotFound("campaign"))?;
    guard::ensure_campaign_owner(sponsor, &campaign)?;

    validate::ad_request_terms(&req.requirements)?;

    let target = state
        .db
        .user_by_id(req.influencer_id)?
        .ok_or(Error::NotFound("influencer"))?;
    if target.profile.role() != Role::Influencer {
        return Err(Error::Validation("target user is not an influencer".into()).into());
    }

    let request = AdRequest {
        id: Uuid::new_v4(),
        campaign_id,
        influencer_id: target.id,
        messages: req.messages,
        requirements: req.requirements,
        payment_amount: req.payment_amount,
        created_by: CreatedBy::Sponsor,
        status: RequestStatus::Pending,
        created_at: chrono::Utc::now(),
    };
    state.db.insert_ad_request(&request)?;

    Ok((
        StatusCode::CREATED,
        Json(to_view(AdRequestRecord {
            request,
            influencer_name: target.name,
        })),
    ))
}

pub async fn list_adrequests(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let sponsor = guard::require_role(Some(identity(&claims)), Role::Sponsor)?;

    let campaign = state
        .db
        .campaign_by_id(campaign_id)?
        .ok_or(Error::NotFound("campaign"))?;
    guard::ensure_campaign_owner(sponsor, &campaign)?;

    let records = state.db.ad_requests_for_campaign(campaign_id)?;
    Ok(Json(
        records.into_iter().map(to_view).collect::<Vec<_>>(),
    ))
}

pub async fn edit_adrequest(
    State(state): State<AppState>,
    Path((campaign_id, request_id)): Path<(Uuid, Uuid)>,
    Extension(claims): Extension<Claims>,
    Json(terms): Json<AdRequestTerms>,
) -> ApiResult<impl IntoResponse> {
    let sponsor = guard::require_role(Some(identity(&claims)), Role::Sponsor)?;

    let campaign = state
        .db
        .campaign_by_id(campaign_id)?
        .ok_or(Error::NotFound("campaign"))?;
    guard::ensure_campaign_owner(sponsor, &campaign)?;

    let mut record = state
        .db
        .ad_request_by_id(request_id)?
        .ok_or(Error::NotFound("ad request"))?;
    if record.request.campaign_id != campaign_id {
        return Err(Error::NotFound("ad request").into());
    }

    validate::ad_request_terms(&terms.requirements)?;

    record.request.messages = terms.messages;
    record.request.requirements = terms.requirements;
    record.request.payment_amount = terms.payment_amount;

    state.db.update_ad_request_terms(
        request_id,
        record.request.messages.as_deref(),
        &record.request.requirements,
        record.request.payment_amount,
    )?;

    Ok(Json(to_view(record)))
}

pub async fn delete_adrequest(
    State(state): State<AppState>,
    Path((campaign_id, request_id)): Path<(Uuid, Uuid)>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let sponsor = guard::require_role(Some(identity(&claims)), Role::Sponsor)?;

    let campaign = state
        .db
        .campaign_by_id(campaign_id)?
        .ok_or(Error::NotFound("campaign"))?;
    guard::ensure_campaign_owner(sponsor, &campaign)?;

    let record = state
        .db
        .ad_request_by_id(request_id)?
        .ok_or(Error::NotFound("ad request"))?;
    if record.request.campaign_id != campaign_id {
        return Err(Error::NotFound("ad request").into());
    }

    state.db.delete_ad_request(request_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Influencer proposes terms on a public campaign.
pub async fn send_ad_request(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SendAdRequest>,
) -> ApiResult<impl IntoResponse> {
    let influencer = guard::require_role(Some(identity(&claims)), Role::Influencer)?;

    let campaign = state
        .db
        .campaign_by_id(campaign_id)?
        .ok_or(Error::NotFound("campaign"))?;
    if campaign.visibility != Visibility::Public {
        return Err(Error::Forbidden.into());
    }

    validate::ad_request_terms(&req.requirements)?;

    let sender = state
        .db
        .user_by_id(influencer.id)?
        .ok_or(Error::NotFound("user"))?;

    let request = AdRequest {
        id: Uuid::new_v4(),
        campaign_id,
        influencer_id: influencer.id,
        messages: req.messages,
        requirements: req.requirements,
        payment_amount: req.payment_amount,
        created_by: CreatedBy::Influencer,
        status: RequestStatus::Pending,
        created_at: chrono::Utc::now(),
    };
    state.db.insert_ad_request(&request)?;

    Ok((
        StatusCode::CREATED,
        Json(to_view(AdRequestRecord {
            request,
            influencer_name: sender.name,
        })),
    ))
}

/// An influencer's own ad requests under one campaign.
pub async fn my_adrequests(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let influencer = guard::require_role(Some(identity(&claims)), Role::Influencer)?;

    state
        .db
        .campaign_by_id(campaign_id)?
        .ok_or(Error::NotFound("campaign"))?;

    let records = state
        .db
        .ad_requests_for_campaign_and_influencer(campaign_id, influencer.id)?;
    Ok(Json(
        records.into_iter().map(to_view).collect::<Vec<_>>(),
    ))
}

pub async fn accept(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    respond(state, claims, id, Decision::Accept).await
}

pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    respond(state, claims, id, Decision::Reject).await
}

/// The accept/reject transition: fetch, let the workflow decide, then
/// a single status write.
async fn respond(
    state: AppState,
    claims: Claims,
    id: Uuid,
    decision: Decision,
) -> ApiResult<Json<AdRequestView>> {
    let actor = identity(&claims);

    let mut record = state
        .db
        .ad_request_by_id(id)?
        .ok_or(Error::NotFound("ad request"))?;
    let campaign = state
        .db
        .campaign_by_id(record.request.campaign_id)?
        .ok_or(Error::NotFound("campaign"))?;

    workflow::authorize_response(actor, &record.request, &campaign, state.response_policy)?;
    let next = workflow::transition(record.request.status, decision)?;

    state.db.update_ad_request_status(id, next)?;
    record.request.status = next;

    Ok(Json(to_view(record)))
}
