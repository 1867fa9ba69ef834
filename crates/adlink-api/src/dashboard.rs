use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use adlink_core::{Error, guard, visibility};
use adlink_types::api::{AdminDashboard, Claims, InfluencerDashboard, SponsorDashboard};
use adlink_types::models::Role;

use crate::adrequests::to_view;
use crate::auth::AppState;
use crate::error::ApiResult;
use crate::middleware::identity;

/// Role-scoped dashboard aggregation. Each role gets the derived view
/// the workflow defines for it; the admin view is read-only oversight.
pub async fn dashboard(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Response> {
    let route_role: Role = role.parse().map_err(|_| Error::Forbidden)?;
    let viewer = guard::require_role(Some(identity(&claims)), route_role)?;

    let body = match viewer.role {
        Role::Admin => Json(AdminDashboard {
            ongoing_campaigns: state.db.ongoing_campaigns()?,
            all_users: state.db.all_users()?,
            all_campaigns: state
                .db
                .campaigns(&visibility::campaign_scope(viewer, None))?,
            all_ad_requests: state
                .db
                .all_ad_requests()?
                .into_iter()
                .map(to_view)
                .collect(),
        })
        .into_response(),

        Role::Sponsor => Json(SponsorDashboard {
            ongoing_campaigns: state.db.ongoing_campaigns_by_sponsor(viewer.id)?,
            pending_requests: state
                .db
                .pending_inbound_for_sponsor(viewer.id)?
                .into_iter()
                .map(to_view)
                .collect(),
        })
        .into_response(),

        Role::Influencer => {
            let influencer = state
                .db
                .user_by_id(viewer.id)?
                .ok_or(Error::NotFound("user"))?;

            Json(InfluencerDashboard {
                influencer,
                ongoing_campaigns: state.db.accepted_ongoing_campaigns(viewer.id)?,
                pending_requests: state
                    .db
                    .pending_inbound_for_influencer(viewer.id)?
                    .into_iter()
                    .map(to_view)
                    .collect(),
            })
            .into_response()
        }
    };

    Ok(body)
}
