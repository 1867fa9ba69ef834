//! Database row types — these map directly to SQLite rows.
//! Distinct from the adlink-types domain models to keep the DB layer
//! independent; conversions into domain values live here so corrupt
//! rows surface as store errors instead of leaking strings upward.

use adlink_types::models::{AdRequest, Campaign, Role, RoleProfile, User};
use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use uuid::Uuid;

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub industry: Option<String>,
    pub budget: Option<i64>,
    pub category: Option<String>,
    pub niche: Option<String>,
    pub reach: Option<i64>,
    pub created_at: String,
}

impl UserRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            name: row.get(2)?,
            email: row.get(3)?,
            password: row.get(4)?,
            role: row.get(5)?,
            industry: row.get(6)?,
            budget: row.get(7)?,
            category: row.get(8)?,
            niche: row.get(9)?,
            reach: row.get(10)?,
            created_at: row.get(11)?,
        })
    }

    pub fn into_user(self) -> Result<User> {
        let role: Role = self
            .role
            .parse()
            .map_err(|e| anyhow!("user {}: {}", self.id, e))?;

        let profile = match role {
            Role::Admin => RoleProfile::Admin,
            Role::Sponsor => RoleProfile::Sponsor {
                industry: self.industry,
                budget: self.budget,
            },
            Role::Influencer => RoleProfile::Influencer {
                category: self.category,
                niche: self.niche,
                reach: self.reach,
            },
        };

        Ok(User {
            id: parse_uuid(&self.id, "user id")?,
            username: self.username,
            name: self.name,
            email: self.email,
            profile,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

pub struct CampaignRow {
    pub id: String,
    pub sponsor_id: String,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: i64,
    pub visibility: String,
    pub goals: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl CampaignRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            sponsor_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            start_date: row.get(4)?,
            end_date: row.get(5)?,
            budget: row.get(6)?,
            visibility: row.get(7)?,
            goals: row.get(8)?,
            status: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    pub fn into_campaign(self) -> Result<Campaign> {
        Ok(Campaign {
            sponsor_id: parse_uuid(&self.sponsor_id, "sponsor id")?,
            name: self.name,
            description: self.description,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            budget: self.budget,
            visibility: self
                .visibility
                .parse()
                .map_err(|e| anyhow!("campaign {}: {}", self.id, e))?,
            goals: self.goals,
            status: self
                .status
                .parse()
                .map_err(|e| anyhow!("campaign {}: {}", self.id, e))?,
            created_at: parse_timestamp(&self.created_at)?,
            id: parse_uuid(&self.id, "campaign id")?,
        })
    }
}

pub struct AdRequestRow {
    pub id: String,
    pub campaign_id: String,
    pub influencer_id: String,
    pub influencer_name: String,
    pub messages: Option<String>,
    pub requirements: String,
    pub payment_amount: i64,
    pub created_by: String,
    pub status: String,
    pub created_at: String,
}

impl AdRequestRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            campaign_id: row.get(1)?,
            influencer_id: row.get(2)?,
            influencer_name: row.get(3)?,
            messages: row.get(4)?,
            requirements: row.get(5)?,
            payment_amount: row.get(6)?,
            created_by: row.get(7)?,
            status: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    pub fn into_record(self) -> Result<AdRequestRecord> {
        let request = AdRequest {
            campaign_id: parse_uuid(&self.campaign_id, "campaign id")?,
            influencer_id: parse_uuid(&self.influencer_id, "influencer id")?,
            messages: self.messages,
            requirements: self.requirements,
            payment_amount: self.payment_amount,
            created_by: self
                .created_by
                .parse()
                .map_err(|e| anyhow!("ad request {}: {}", self.id, e))?,
            status: self
                .status
                .parse()
                .map_err(|e| anyhow!("ad request {}: {}", self.id, e))?,
            created_at: parse_timestamp(&self.created_at)?,
            id: parse_uuid(&self.id, "ad request id")?,
        };

        Ok(AdRequestRecord {
            request,
            influencer_name: self.influencer_name,
        })
    }
}

/// An ad request with the influencer's display name already joined in,
/// so listings never go back for it row by row.
pub struct AdRequestRecord {
    pub request: AdRequest,
    pub influencer_name: String,
}

fn parse_uuid(value: &str, what: &str) -> Result<Uuid> {
    value
        .parse()
        .map_err(|e| anyhow!("corrupt {} '{}': {}", what, value, e))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow!("corrupt date '{}': {}", value, e))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    value
        .parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
            // Parse as naive UTC and convert.
            chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
        })
        .map_err(|e| anyhow!("corrupt timestamp '{}': {}", value, e))
}
