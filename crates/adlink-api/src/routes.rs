use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::auth::AppState;
use crate::{adrequests, auth, campaigns, dashboard, influencers, middleware};

/// The full route table. Register and login are anonymous; everything
/// else sits behind the bearer-token layer.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/register/{role}", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/logout", post(auth::logout))
        .route("/{role}/dashboard", get(dashboard::dashboard))
        .route("/{role}/campaigns", get(campaigns::list_campaigns))
        .route("/{role}/campaigns/{id}", get(campaigns::view_campaign))
        .route("/sponsor/create_campaign", post(campaigns::create_campaign))
        .route("/sponsor/campaigns/{id}/edit", put(campaigns::edit_campaign))
        .route(
            "/sponsor/campaigns/{id}/delete",
            delete(campaigns::delete_campaign),
        )
        .route(
            "/sponsor/campaigns/{id}/create_adrequest",
            post(adrequests::create_adrequest),
        )
        .route(
            "/sponsor/campaigns/{id}/adrequests",
            get(adrequests::list_adrequests),
        )
        .route(
            "/sponsor/campaigns/{id}/adrequests/{rid}/edit",
            put(adrequests::edit_adrequest),
        )
        .route(
            "/sponsor/campaigns/{id}/adrequests/{rid}/delete",
            delete(adrequests::delete_adrequest),
        )
        .route(
            "/influencer/send_ad_request/{campaign_id}",
            post(adrequests::send_ad_request),
        )
        .route(
            "/influencer/campaigns/{id}/adrequests",
            get(adrequests::my_adrequests),
        )
        .route("/adrequests/{id}/accept", post(adrequests::accept))
        .route("/adrequests/{id}/reject", post(adrequests::reject))
        .route("/sponsor/influencers", get(influencers::list_influencers))
        .route(
            "/sponsor/influencers/{id}",
            get(influencers::influencer_profile),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ))
        .with_state(state);

    Router::new().merge(public).merge(protected)
}
