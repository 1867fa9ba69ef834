use adlink_types::models::Role;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::guard::Identity;

/// Which slice of the campaign table a viewer may list. The store
/// executes the scope; this module only decides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignScope {
    /// Admin oversight: everything.
    All,
    /// A sponsor's own campaigns.
    BySponsor(Uuid),
    /// Influencer default view: public and still ongoing.
    PublicOngoing,
    /// Influencer search: substring match on name/description/goals.
    /// Drops the ongoing filter but never the visibility filter, so a
    /// completed public campaign is reachable and a private one never is.
    PublicMatching(String),
}

/// Scope for the viewer's campaign listing. A blank search term is the
/// default listing, not an empty search.
pub fn campaign_scope(viewer: Identity, search: Option<&str>) -> CampaignScope {
    match viewer.role {
        Role::Admin => CampaignScope::All,
        Role::Sponsor => CampaignScope::BySponsor(viewer.id),
        Role::Influencer => match search.map(str::trim) {
            Some(term) if !term.is_empty() => CampaignScope::PublicMatching(term.to_string()),
            _ => CampaignScope::PublicOngoing,
        },
    }
}

/// The `/{role}/campaigns` listing is a sponsor/influencer surface;
/// any other role gets an authorization failure, not an empty list.
pub fn listing_scope(viewer: Identity, search: Option<&str>) -> Result<CampaignScope> {
    match viewer.role {
        Role::Sponsor | Role::Influencer => Ok(campaign_scope(viewer, search)),
        Role::Admin => Err(Error::Forbidden),
    }
}
