use adlink_types::models::{AdRequest, Campaign, CreatedBy, RequestStatus, Role};

use crate::error::{Error, Result};
use crate::guard::{self, Identity};

/// The two ways out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn target_status(self) -> RequestStatus {
        match self {
            Decision::Accept => RequestStatus::Accepted,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

/// Who may answer an influencer-created request. As shipped, any
/// authenticated sponsor may — not just the owner of the parent
/// campaign. `owning_sponsor_only` switches in the strict rule; it
/// stays off until product confirms the broad permission is a bug.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsePolicy {
    pub owning_sponsor_only: bool,
}

/// Accept/reject is reserved for the counter-party of whoever created
/// the request:
/// - sponsor-created: only the targeted influencer, never a sponsor
///   (not even the campaign owner);
/// - influencer-created: only a sponsor, subject to `policy`.
pub fn authorize_response(
    actor: Identity,
    request: &AdRequest,
    campaign: &Campaign,
    policy: ResponsePolicy,
) -> Result<()> {
    match (actor.role, request.created_by) {
        (Role::Influencer, CreatedBy::Sponsor) => guard::ensure_request_target(actor, request),
        (Role::Sponsor, CreatedBy::Influencer) => {
            if policy.owning_sponsor_only && campaign.sponsor_id != actor.id {
                return Err(Error::Forbidden);
            }
            Ok(())
        }
        _ => Err(Error::Forbidden),
    }
}

/// The status state machine. `Pending` is the only state with exits;
/// a resolved request denies further transitions instead of silently
/// succeeding.
pub fn transition(current: RequestStatus, decision: Decision) -> Result<RequestStatus> {
    match current {
        RequestStatus::Pending => Ok(decision.target_status()),
        RequestStatus::Accepted | RequestStatus::Rejected => {
            Err(Error::Conflict("ad request already resolved"))
        }
    }
}
