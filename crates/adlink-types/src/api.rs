use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Campaign, CreatedBy, RequestStatus, Role, User, Visibility};

// -- JWT Claims --

/// JWT claims shared between the REST middleware and the auth handlers.
/// Canonical definition lives here in adlink-types so every consumer
/// agrees on the identity shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub exp: usize,
}

// -- Auth --

/// Registration payload. The role comes from the route path; only the
/// fields belonging to that role are read, the rest are ignored.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub industry: Option<String>,
    pub budget: Option<i64>,
    pub category: Option<String>,
    pub niche: Option<String>,
    pub reach: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub token: String,
}

// -- Campaigns --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignForm {
    pub name: String,
    pub description: String,
    /// End date of the campaign.
    pub deadline: NaiveDate,
    pub budget: i64,
    pub visibility: Visibility,
    pub goals: Option<String>,
}

/// Campaign detail: the campaign plus the ad requests the viewer is
/// allowed to see under it.
#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignDetail {
    pub campaign: Campaign,
    pub ad_requests: Vec<AdRequestView>,
}

// -- Ad requests --

/// Sponsor-initiated ad request. The influencer is keyed by id; the
/// influencer pool endpoint is where ids come from.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAdRequest {
    pub influencer_id: Uuid,
    pub messages: Option<String>,
    pub requirements: String,
    pub payment_amount: i64,
}

/// Influencer-initiated proposal on a public campaign.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendAdRequest {
    pub messages: Option<String>,
    pub requirements: String,
    pub payment_amount: i64,
}

/// Editable terms of an existing ad request.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdRequestTerms {
    pub messages: Option<String>,
    pub requirements: String,
    pub payment_amount: i64,
}

/// Ad request with the influencer's display name resolved for listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdRequestView {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub influencer_id: Uuid,
    pub influencer_name: String,
    pub messages: Option<String>,
    pub requirements: String,
    pub payment_amount: i64,
    pub created_by: CreatedBy,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

// -- Dashboards --

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub ongoing_campaigns: Vec<Campaign>,
    pub all_users: Vec<User>,
    pub all_campaigns: Vec<Campaign>,
    pub all_ad_requests: Vec<AdRequestView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SponsorDashboard {
    pub ongoing_campaigns: Vec<Campaign>,
    pub pending_requests: Vec<AdRequestView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InfluencerDashboard {
    pub influencer: User,
    pub ongoing_campaigns: Vec<Campaign>,
    pub pending_requests: Vec<AdRequestView>,
}
