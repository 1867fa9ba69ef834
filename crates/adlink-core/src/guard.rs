use adlink_types::models::{AdRequest, Campaign, Role};
use uuid::Uuid;

use crate::error::{Error, Result};

/// The authenticated identity for one request, decoded from the
/// session token and threaded explicitly into every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

impl Identity {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }
}

/// Route-level check: an identity must be present and its role must
/// match the role the route is scoped to.
pub fn require_role(identity: Option<Identity>, expected: Role) -> Result<Identity> {
    let identity = identity.ok_or(Error::Unauthenticated)?;
    if identity.role != expected {
        return Err(Error::Forbidden);
    }
    Ok(identity)
}

/// Ownership check for campaign-scoped actions: role alone is not
/// enough, the acting sponsor must be the stored owner.
pub fn ensure_campaign_owner(identity: Identity, campaign: &Campaign) -> Result<()> {
    if identity.role != Role::Sponsor || campaign.sponsor_id != identity.id {
        return Err(Error::Forbidden);
    }
    Ok(())
}

/// Target check for influencer actions on an ad request: the acting
/// influencer must be the one the request points at.
pub fn ensure_request_target(identity: Identity, request: &AdRequest) -> Result<()> {
    if identity.role != Role::Influencer || request.influencer_id != identity.id {
        return Err(Error::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlink_types::models::{CampaignStatus, CreatedBy, RequestStatus, Visibility};
    use chrono::{NaiveDate, Utc};

    fn campaign(sponsor_id: Uuid) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            sponsor_id,
            name: "Summer Sale".into(),
            description: "seasonal push".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            budget: 500,
            visibility: Visibility::Public,
            goals: None,
            status: CampaignStatus::Ongoing,
            created_at: Utc::now(),
        }
    }

    fn ad_request(influencer_id: Uuid) -> AdRequest {
        AdRequest {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            influencer_id,
            messages: None,
            requirements: "post 3x".into(),
            payment_amount: 200,
            created_by: CreatedBy::Sponsor,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_identity_is_unauthenticated() {
        assert!(matches!(
            require_role(None, Role::Sponsor),
            Err(Error::Unauthenticated)
        ));
    }

    #[test]
    fn role_mismatch_is_forbidden() {
        let influencer = Identity::new(Uuid::new_v4(), Role::Influencer);
        assert!(matches!(
            require_role(Some(influencer), Role::Sponsor),
            Err(Error::Forbidden)
        ));
        assert!(require_role(Some(influencer), Role::Influencer).is_ok());
    }

    #[test]
    fn only_the_owning_sponsor_passes() {
        let owner = Identity::new(Uuid::new_v4(), Role::Sponsor);
        let other = Identity::new(Uuid::new_v4(), Role::Sponsor);
        let campaign = campaign(owner.id);

        assert!(ensure_campaign_owner(owner, &campaign).is_ok());
        assert!(matches!(
            ensure_campaign_owner(other, &campaign),
            Err(Error::Forbidden)
        ));
    }

    #[test]
    fn ownership_needs_the_sponsor_role_too() {
        let id = Uuid::new_v4();
        let not_a_sponsor = Identity::new(id, Role::Influencer);
        assert!(matches!(
            ensure_campaign_owner(not_a_sponsor, &campaign(id)),
            Err(Error::Forbidden)
        ));
    }

    #[test]
    fn only_the_targeted_influencer_passes() {
        let target = Identity::new(Uuid::new_v4(), Role::Influencer);
        let bystander = Identity::new(Uuid::new_v4(), Role::Influencer);
        let request = ad_request(target.id);

        assert!(ensure_request_target(target, &request).is_ok());
        assert!(matches!(
            ensure_request_target(bystander, &request),
            Err(Error::Forbidden)
        ));
    }
}
