use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Raised when a stored tag value does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTag {
    kind: &'static str,
    value: String,
}

impl InvalidTag {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for InvalidTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for InvalidTag {}

macro_rules! tagged_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = InvalidTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(InvalidTag::new($kind, other)),
                }
            }
        }
    };
}

tagged_enum!(Role, "role", {
    Admin => "admin",
    Sponsor => "sponsor",
    Influencer => "influencer",
});

tagged_enum!(Visibility, "visibility", {
    Public => "public",
    Private => "private",
});

tagged_enum!(CampaignStatus, "campaign status", {
    Ongoing => "ongoing",
    Completed => "completed",
    Cancelled => "cancelled",
});

tagged_enum!(RequestStatus, "ad request status", {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
});

tagged_enum!(CreatedBy, "ad request creator", {
    Sponsor => "sponsor",
    Influencer => "influencer",
});

/// Role-specific profile data. One variant per role keeps the roles
/// mutually exclusive by construction; the optional fields mirror what
/// registration collects for each role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    Admin,
    Sponsor {
        industry: Option<String>,
        budget: Option<i64>,
    },
    Influencer {
        category: Option<String>,
        niche: Option<String>,
        reach: Option<i64>,
    },
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::Sponsor { .. } => Role::Sponsor,
            Self::Influencer { .. } => Role::Influencer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub profile: RoleProfile,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub sponsor_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: i64,
    pub visibility: Visibility,
    pub goals: Option<String>,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRequest {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub influencer_id: Uuid,
    pub messages: Option<String>,
    pub requirements: String,
    pub payment_amount: i64,
    pub created_by: CreatedBy,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}
