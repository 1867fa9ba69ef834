use adlink_core::visibility::CampaignScope;
use adlink_types::models::{AdRequest, Campaign, RequestStatus, User};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::Database;
use crate::models::{AdRequestRecord, AdRequestRow, CampaignRow, UserRow};

const USER_COLS: &str =
    "id, username, name, email, password, role, industry, budget, category, niche, reach, created_at";

const CAMPAIGN_COLS: &str =
    "id, sponsor_id, name, description, start_date, end_date, budget, visibility, goals, status, created_at";

// Listings join the influencer's display name in one pass.
const AD_REQUEST_COLS: &str = "r.id, r.campaign_id, r.influencer_id, u.name, r.messages, \
     r.requirements, r.payment_amount, r.created_by, r.status, r.created_at";

impl Database {
    // -- Users --

    pub fn create_user(&self, user: &User, password_hash: &str) -> Result<()> {
        use adlink_types::models::RoleProfile;

        let (industry, budget, category, niche, reach) = match &user.profile {
            RoleProfile::Admin => (None, None, None, None, None),
            RoleProfile::Sponsor { industry, budget } => {
                (industry.clone(), *budget, None, None, None)
            }
            RoleProfile::Influencer {
                category,
                niche,
                reach,
            } => (None, None, category.clone(), niche.clone(), *reach),
        };

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, name, email, password, role, industry, budget, category, niche, reach)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                rusqlite::params![
                    user.id.to_string(),
                    user.username,
                    user.name,
                    user.email,
                    password_hash,
                    user.profile.role().as_str(),
                    industry,
                    budget,
                    category,
                    niche,
                    reach,
                ],
            )?;
            Ok(())
        })
    }

    /// Login lookup: the user plus their stored password hash.
    pub fn user_credentials(&self, username: &str) -> Result<Option<(User, String)>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {USER_COLS} FROM users WHERE username = ?1");
            let mut stmt = conn.prepare(&sql)?;
            let row = stmt.query_row([username], UserRow::from_row).optional()?;

            match row {
                Some(row) => {
                    let hash = row.password.clone();
                    Ok(Some((row.into_user()?, hash)))
                }
                None => Ok(None),
            }
        })
    }

    pub fn user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {USER_COLS} FROM users WHERE id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            let row = stmt
                .query_row([id.to_string()], UserRow::from_row)
                .optional()?;
            row.map(UserRow::into_user).transpose()
        })
    }

    pub fn email_taken(&self, email: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM users WHERE email = ?1",
                [email],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
    }

    pub fn all_users(&self) -> Result<Vec<User>> {
        self.with_conn(|conn| query_users(conn, "ORDER BY rowid", rusqlite::params![]))
    }

    /// The influencer pool, optionally narrowed by a case-insensitive
    /// substring match on name, category, or niche.
    pub fn influencers(&self, search: Option<&str>) -> Result<Vec<User>> {
        self.with_conn(|conn| match search {
            Some(term) => {
                let clause = like_clause(&["name", "category", "niche"], 1);
                let tail = format!("WHERE role = 'influencer' AND ({clause}) ORDER BY rowid");
                query_users(conn, &tail, rusqlite::params![like_pattern(term)])
            }
            None => query_users(
                conn,
                "WHERE role = 'influencer' ORDER BY rowid",
                rusqlite::params![],
            ),
        })
    }

    /// Cascades: the user's campaigns go with them, and transitively
    /// those campaigns' ad requests, plus any ad requests targeting
    /// the user as influencer.
    pub fn delete_user(&self, id: Uuid) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM users WHERE id = ?1", [id.to_string()])?;
            Ok(n > 0)
        })
    }

    // -- Campaigns --

    pub fn insert_campaign(&self, campaign: &Campaign) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO campaigns (id, sponsor_id, name, description, start_date, end_date, budget, visibility, goals, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                rusqlite::params![
                    campaign.id.to_string(),
                    campaign.sponsor_id.to_string(),
                    campaign.name,
                    campaign.description,
                    campaign.start_date.to_string(),
                    campaign.end_date.to_string(),
                    campaign.budget,
                    campaign.visibility.as_str(),
                    campaign.goals,
                    campaign.status.as_str(),
                ],
            )?;
            Ok(())
        })
    }

    pub fn campaign_by_id(&self, id: Uuid) -> Result<Option<Campaign>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {CAMPAIGN_COLS} FROM campaigns WHERE id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            let row = stmt
                .query_row([id.to_string()], CampaignRow::from_row)
                .optional()?;
            row.map(CampaignRow::into_campaign).transpose()
        })
    }

    /// Updates the editable fields. The start date and status are not
    /// part of the edit surface.
    pub fn update_campaign(&self, campaign: &Campaign) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE campaigns
                 SET name = ?1, description = ?2, end_date = ?3, budget = ?4, visibility = ?5, goals = ?6
                 WHERE id = ?7",
                rusqlite::params![
                    campaign.name,
                    campaign.description,
                    campaign.end_date.to_string(),
                    campaign.budget,
                    campaign.visibility.as_str(),
                    campaign.goals,
                    campaign.id.to_string(),
                ],
            )?;
            Ok(n > 0)
        })
    }

    /// Cascades to the campaign's ad requests.
    pub fn delete_campaign(&self, id: Uuid) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM campaigns WHERE id = ?1", [id.to_string()])?;
            Ok(n > 0)
        })
    }

    /// Executes a viewer scope decided by the visibility filter.
    pub fn campaigns(&self, scope: &CampaignScope) -> Result<Vec<Campaign>> {
        self.with_conn(|conn| match scope {
            CampaignScope::All => query_campaigns(conn, "ORDER BY rowid", rusqlite::params![]),
            CampaignScope::BySponsor(sponsor_id) => query_campaigns(
                conn,
                "WHERE sponsor_id = ?1 ORDER BY rowid",
                rusqlite::params![sponsor_id.to_string()],
            ),
            CampaignScope::PublicOngoing => query_campaigns(
                conn,
                "WHERE status = 'ongoing' AND visibility = 'public' ORDER BY rowid",
                rusqlite::params![],
            ),
            CampaignScope::PublicMatching(term) => {
                let clause = like_clause(&["name", "description", "goals"], 1);
                let tail = format!("WHERE visibility = 'public' AND ({clause}) ORDER BY rowid");
                query_campaigns(conn, &tail, rusqlite::params![like_pattern(term)])
            }
        })
    }

    pub fn ongoing_campaigns(&self) -> Result<Vec<Campaign>> {
        self.with_conn(|conn| {
            query_campaigns(
                conn,
                "WHERE status = 'ongoing' ORDER BY rowid",
                rusqlite::params![],
            )
        })
    }

    pub fn ongoing_campaigns_by_sponsor(&self, sponsor_id: Uuid) -> Result<Vec<Campaign>> {
        self.with_conn(|conn| {
            query_campaigns(
                conn,
                "WHERE status = 'ongoing' AND sponsor_id = ?1 ORDER BY rowid",
                rusqlite::params![sponsor_id.to_string()],
            )
        })
    }

    // -- Ad requests --

    pub fn insert_ad_request(&self, request: &AdRequest) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO ad_requests (id, campaign_id, influencer_id, messages, requirements, payment_amount, created_by, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    request.id.to_string(),
                    request.campaign_id.to_string(),
                    request.influencer_id.to_string(),
                    request.messages,
                    request.requirements,
                    request.payment_amount,
                    request.created_by.as_str(),
                    request.status.as_str(),
                ],
            )?;
            Ok(())
        })
    }

    pub fn ad_request_by_id(&self, id: Uuid) -> Result<Option<AdRequestRecord>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {AD_REQUEST_COLS} FROM ad_requests r
                 JOIN users u ON r.influencer_id = u.id
                 WHERE r.id = ?1"
            );
            let mut stmt = conn.prepare(&sql)?;
            let row = stmt
                .query_row([id.to_string()], AdRequestRow::from_row)
                .optional()?;
            row.map(AdRequestRow::into_record).transpose()
        })
    }

    pub fn update_ad_request_terms(
        &self,
        id: Uuid,
        messages: Option<&str>,
        requirements: &str,
        payment_amount: i64,
    ) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE ad_requests SET messages = ?1, requirements = ?2, payment_amount = ?3 WHERE id = ?4",
                rusqlite::params![messages, requirements, payment_amount, id.to_string()],
            )?;
            Ok(n > 0)
        })
    }

    /// The single-row status write behind accept/reject. Last writer
    /// wins between racing clients; the workflow has already decided
    /// the transition is legal.
    pub fn update_ad_request_status(&self, id: Uuid, status: RequestStatus) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE ad_requests SET status = ?1 WHERE id = ?2",
                rusqlite::params![status.as_str(), id.to_string()],
            )?;
            Ok(n > 0)
        })
    }

    pub fn delete_ad_request(&self, id: Uuid) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM ad_requests WHERE id = ?1", [id.to_string()])?;
            Ok(n > 0)
        })
    }

    pub fn ad_requests_for_campaign(&self, campaign_id: Uuid) -> Result<Vec<AdRequestRecord>> {
        self.with_conn(|conn| {
            query_ad_requests(
                conn,
                "WHERE r.campaign_id = ?1 ORDER BY r.rowid",
                rusqlite::params![campaign_id.to_string()],
            )
        })
    }

    pub fn ad_requests_for_campaign_and_influencer(
        &self,
        campaign_id: Uuid,
        influencer_id: Uuid,
    ) -> Result<Vec<AdRequestRecord>> {
        self.with_conn(|conn| {
            query_ad_requests(
                conn,
                "WHERE r.campaign_id = ?1 AND r.influencer_id = ?2 ORDER BY r.rowid",
                rusqlite::params![campaign_id.to_string(), influencer_id.to_string()],
            )
        })
    }

    pub fn all_ad_requests(&self) -> Result<Vec<AdRequestRecord>> {
        self.with_conn(|conn| query_ad_requests(conn, "ORDER BY r.rowid", rusqlite::params![]))
    }

    // -- Dashboards --

    /// Campaigns an influencer is actually working: reachable through
    /// one of their accepted ad requests and still ongoing.
    pub fn accepted_ongoing_campaigns(&self, influencer_id: Uuid) -> Result<Vec<Campaign>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {cols} FROM campaigns c
                 JOIN ad_requests r ON r.campaign_id = c.id
                 WHERE c.status = 'ongoing'
                   AND r.influencer_id = ?1
                   AND r.status = 'accepted'
                 GROUP BY c.id
                 ORDER BY c.rowid",
                cols = campaign_cols("c")
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([influencer_id.to_string()], CampaignRow::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows.into_iter().map(CampaignRow::into_campaign).collect()
        })
    }

    /// Sponsor-created, still pending, tied to an ongoing campaign:
    /// the influencer's inbound queue.
    pub fn pending_inbound_for_influencer(
        &self,
        influencer_id: Uuid,
    ) -> Result<Vec<AdRequestRecord>> {
        self.with_conn(|conn| {
            query_ad_requests(
                conn,
                "JOIN campaigns c ON r.campaign_id = c.id
                 WHERE c.status = 'ongoing'
                   AND r.influencer_id = ?1
                   AND r.status = 'pending'
                   AND r.created_by = 'sponsor'
                 ORDER BY r.rowid",
                rusqlite::params![influencer_id.to_string()],
            )
        })
    }

    /// Influencer-created, still pending, under one of this sponsor's
    /// campaigns: the sponsor's inbound queue.
    pub fn pending_inbound_for_sponsor(&self, sponsor_id: Uuid) -> Result<Vec<AdRequestRecord>> {
        self.with_conn(|conn| {
            query_ad_requests(
                conn,
                "JOIN campaigns c ON r.campaign_id = c.id
                 WHERE c.sponsor_id = ?1
                   AND r.status = 'pending'
                   AND r.created_by = 'influencer'
                 ORDER BY r.rowid",
                rusqlite::params![sponsor_id.to_string()],
            )
        })
    }
}

fn query_users(
    conn: &Connection,
    tail: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> Result<Vec<User>> {
    let sql = format!("SELECT {USER_COLS} FROM users {tail}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params, UserRow::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    rows.into_iter().map(UserRow::into_user).collect()
}

fn query_campaigns(
    conn: &Connection,
    tail: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> Result<Vec<Campaign>> {
    let sql = format!("SELECT {CAMPAIGN_COLS} FROM campaigns {tail}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params, CampaignRow::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    rows.into_iter().map(CampaignRow::into_campaign).collect()
}

fn query_ad_requests(
    conn: &Connection,
    tail: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> Result<Vec<AdRequestRecord>> {
    let sql = format!(
        "SELECT {AD_REQUEST_COLS} FROM ad_requests r
         JOIN users u ON r.influencer_id = u.id
         {tail}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params, AdRequestRow::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    rows.into_iter().map(AdRequestRow::into_record).collect()
}

fn campaign_cols(alias: &str) -> String {
    CAMPAIGN_COLS
        .split(", ")
        .map(|col| format!("{alias}.{col}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `(LOWER(a) LIKE ?n OR LOWER(b) LIKE ?n ...)` over a caller-chosen
/// column set; the search contract is substring, case-insensitive.
fn like_clause(columns: &[&str], param: usize) -> String {
    columns
        .iter()
        .map(|col| format!("LOWER({col}) LIKE ?{param}"))
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn like_pattern(term: &str) -> String {
    format!("%{}%", term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlink_types::models::{
        CampaignStatus, CreatedBy, RoleProfile, Visibility,
    };
    use chrono::{NaiveDate, Utc};

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sponsor(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.into(),
            name: username.into(),
            email: format!("{username}@example.com"),
            profile: RoleProfile::Sponsor {
                industry: Some("retail".into()),
                budget: Some(1000),
            },
            created_at: Utc::now(),
        }
    }

    fn influencer(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.into(),
            name: username.into(),
            email: format!("{username}@example.com"),
            profile: RoleProfile::Influencer {
                category: Some("tech".into()),
                niche: Some("gadgets".into()),
                reach: Some(5000),
            },
            created_at: Utc::now(),
        }
    }

    fn campaign(
        owner: &User,
        name: &str,
        visibility: Visibility,
        status: CampaignStatus,
    ) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            sponsor_id: owner.id,
            name: name.into(),
            description: "seasonal push".into(),
            start_date: date(2025, 6, 1),
            end_date: date(2025, 8, 1),
            budget: 500,
            visibility,
            goals: Some("grow reach".into()),
            status,
            created_at: Utc::now(),
        }
    }

    fn request(campaign: &Campaign, target: &User, created_by: CreatedBy) -> AdRequest {
        AdRequest {
            id: Uuid::new_v4(),
            campaign_id: campaign.id,
            influencer_id: target.id,
            messages: None,
            requirements: "post 3x".into(),
            payment_amount: 200,
            created_by,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn user_round_trips_with_profile() {
        let db = db();
        let acme = sponsor("acme");
        db.create_user(&acme, "hash").unwrap();

        let loaded = db.user_by_id(acme.id).unwrap().unwrap();
        assert_eq!(loaded.username, "acme");
        assert_eq!(
            loaded.profile,
            RoleProfile::Sponsor {
                industry: Some("retail".into()),
                budget: Some(1000),
            }
        );

        let (_, hash) = db.user_credentials("acme").unwrap().unwrap();
        assert_eq!(hash, "hash");
        assert!(db.user_credentials("nobody").unwrap().is_none());
    }

    #[test]
    fn unique_fields_are_checkable() {
        let db = db();
        db.create_user(&sponsor("acme"), "hash").unwrap();

        assert!(db.email_taken("acme@example.com").unwrap());
        assert!(!db.email_taken("other@example.com").unwrap());
        assert!(db.user_credentials("acme").unwrap().is_some());

        // The store itself also refuses duplicates.
        assert!(db.create_user(&sponsor("acme"), "hash").is_err());
    }

    #[test]
    fn campaign_scopes_filter_by_role_and_visibility() {
        let db = db();
        let acme = sponsor("acme");
        db.create_user(&acme, "hash").unwrap();

        let summer = campaign(&acme, "Summer Sale", Visibility::Public, CampaignStatus::Ongoing);
        let flash = campaign(&acme, "Flash Sale", Visibility::Public, CampaignStatus::Completed);
        let secret = campaign(&acme, "Secret Sale", Visibility::Private, CampaignStatus::Ongoing);
        for c in [&summer, &flash, &secret] {
            db.insert_campaign(c).unwrap();
        }

        let all = db.campaigns(&CampaignScope::All).unwrap();
        assert_eq!(all.len(), 3);

        let own = db.campaigns(&CampaignScope::BySponsor(acme.id)).unwrap();
        assert_eq!(own.len(), 3);
        assert!(
            db.campaigns(&CampaignScope::BySponsor(Uuid::new_v4()))
                .unwrap()
                .is_empty()
        );

        // Default influencer view: ongoing AND public.
        let listed = db.campaigns(&CampaignScope::PublicOngoing).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, summer.id);

        // Search drops the ongoing filter but never the visibility one.
        let found = db
            .campaigns(&CampaignScope::PublicMatching("SALE".into()))
            .unwrap();
        let ids: Vec<Uuid> = found.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![summer.id, flash.id]);
    }

    #[test]
    fn campaign_search_reaches_description_and_goals() {
        let db = db();
        let acme = sponsor("acme");
        db.create_user(&acme, "hash").unwrap();

        let c = campaign(&acme, "Launch", Visibility::Public, CampaignStatus::Ongoing);
        db.insert_campaign(&c).unwrap();

        for term in ["seasonal", "REACH", "launch"] {
            let found = db
                .campaigns(&CampaignScope::PublicMatching(term.into()))
                .unwrap();
            assert_eq!(found.len(), 1, "term '{term}' should match");
        }
        assert!(
            db.campaigns(&CampaignScope::PublicMatching("quarterly".into()))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn listings_keep_insertion_order() {
        let db = db();
        let acme = sponsor("acme");
        db.create_user(&acme, "hash").unwrap();

        let names = ["first", "second", "third"];
        for name in names {
            db.insert_campaign(&campaign(
                &acme,
                name,
                Visibility::Public,
                CampaignStatus::Ongoing,
            ))
            .unwrap();
        }

        let listed = db.campaigns(&CampaignScope::BySponsor(acme.id)).unwrap();
        let listed_names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(listed_names, names);
    }

    #[test]
    fn ad_request_round_trips_with_influencer_name() {
        let db = db();
        let acme = sponsor("acme");
        let jane = influencer("jane");
        db.create_user(&acme, "hash").unwrap();
        db.create_user(&jane, "hash").unwrap();

        let c = campaign(&acme, "Summer Sale", Visibility::Public, CampaignStatus::Ongoing);
        db.insert_campaign(&c).unwrap();

        let r = request(&c, &jane, CreatedBy::Sponsor);
        db.insert_ad_request(&r).unwrap();

        let record = db.ad_request_by_id(r.id).unwrap().unwrap();
        assert_eq!(record.request.status, RequestStatus::Pending);
        assert_eq!(record.request.created_by, CreatedBy::Sponsor);
        assert_eq!(record.influencer_name, "jane");

        assert!(db.ad_request_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn referential_integrity_is_enforced() {
        let db = db();
        let jane = influencer("jane");
        db.create_user(&jane, "hash").unwrap();

        let orphan = AdRequest {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            influencer_id: jane.id,
            messages: None,
            requirements: "post 3x".into(),
            payment_amount: 200,
            created_by: CreatedBy::Sponsor,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };
        assert!(db.insert_ad_request(&orphan).is_err());
    }

    #[test]
    fn status_and_terms_updates_hit_one_row() {
        let db = db();
        let acme = sponsor("acme");
        let jane = influencer("jane");
        db.create_user(&acme, "hash").unwrap();
        db.create_user(&jane, "hash").unwrap();
        let c = campaign(&acme, "Summer Sale", Visibility::Public, CampaignStatus::Ongoing);
        db.insert_campaign(&c).unwrap();
        let r = request(&c, &jane, CreatedBy::Sponsor);
        db.insert_ad_request(&r).unwrap();

        assert!(db.update_ad_request_status(r.id, RequestStatus::Accepted).unwrap());
        assert!(!db.update_ad_request_status(Uuid::new_v4(), RequestStatus::Accepted).unwrap());

        assert!(
            db.update_ad_request_terms(r.id, Some("hello"), "post 5x", 250)
                .unwrap()
        );

        let record = db.ad_request_by_id(r.id).unwrap().unwrap();
        assert_eq!(record.request.status, RequestStatus::Accepted);
        assert_eq!(record.request.requirements, "post 5x");
        assert_eq!(record.request.payment_amount, 250);
        assert_eq!(record.request.messages.as_deref(), Some("hello"));
    }

    #[test]
    fn deleting_a_campaign_cascades_to_its_ad_requests() {
        let db = db();
        let acme = sponsor("acme");
        let jane = influencer("jane");
        db.create_user(&acme, "hash").unwrap();
        db.create_user(&jane, "hash").unwrap();

        let c = campaign(&acme, "Summer Sale", Visibility::Public, CampaignStatus::Ongoing);
        db.insert_campaign(&c).unwrap();
        db.insert_ad_request(&request(&c, &jane, CreatedBy::Sponsor)).unwrap();
        db.insert_ad_request(&request(&c, &jane, CreatedBy::Influencer)).unwrap();

        assert!(db.delete_campaign(c.id).unwrap());
        assert!(db.all_ad_requests().unwrap().is_empty());
        assert!(!db.delete_campaign(c.id).unwrap());
    }

    #[test]
    fn deleting_a_sponsor_cascades_through_campaigns() {
        let db = db();
        let acme = sponsor("acme");
        let jane = influencer("jane");
        db.create_user(&acme, "hash").unwrap();
        db.create_user(&jane, "hash").unwrap();

        let c = campaign(&acme, "Summer Sale", Visibility::Public, CampaignStatus::Ongoing);
        db.insert_campaign(&c).unwrap();
        db.insert_ad_request(&request(&c, &jane, CreatedBy::Sponsor)).unwrap();

        assert!(db.delete_user(acme.id).unwrap());
        assert!(db.campaigns(&CampaignScope::All).unwrap().is_empty());
        assert!(db.all_ad_requests().unwrap().is_empty());

        // Jane herself survives.
        assert!(db.user_by_id(jane.id).unwrap().is_some());
    }

    #[test]
    fn influencer_dashboard_queries() {
        let db = db();
        let acme = sponsor("acme");
        let jane = influencer("jane");
        db.create_user(&acme, "hash").unwrap();
        db.create_user(&jane, "hash").unwrap();

        let ongoing = campaign(&acme, "Summer Sale", Visibility::Public, CampaignStatus::Ongoing);
        let finished = campaign(&acme, "Flash Sale", Visibility::Public, CampaignStatus::Completed);
        db.insert_campaign(&ongoing).unwrap();
        db.insert_campaign(&finished).unwrap();

        // Two accepted requests on the same ongoing campaign: it must
        // appear once. An accepted request on a finished campaign must
        // not appear at all.
        let mut accepted_a = request(&ongoing, &jane, CreatedBy::Sponsor);
        accepted_a.status = RequestStatus::Accepted;
        let mut accepted_b = request(&ongoing, &jane, CreatedBy::Influencer);
        accepted_b.status = RequestStatus::Accepted;
        let mut accepted_done = request(&finished, &jane, CreatedBy::Sponsor);
        accepted_done.status = RequestStatus::Accepted;
        let pending_inbound = request(&ongoing, &jane, CreatedBy::Sponsor);
        let pending_own = request(&ongoing, &jane, CreatedBy::Influencer);
        let pending_done = request(&finished, &jane, CreatedBy::Sponsor);
        for r in [&accepted_a, &accepted_b, &accepted_done, &pending_inbound, &pending_own, &pending_done] {
            db.insert_ad_request(r).unwrap();
        }

        let working = db.accepted_ongoing_campaigns(jane.id).unwrap();
        assert_eq!(working.len(), 1);
        assert_eq!(working[0].id, ongoing.id);

        // Inbound queue: sponsor-created, pending, ongoing campaign only.
        let inbound = db.pending_inbound_for_influencer(jane.id).unwrap();
        assert_eq!(inbound.len(), 1);
        assert_eq!(inbound[0].request.id, pending_inbound.id);
    }

    #[test]
    fn sponsor_dashboard_queries() {
        let db = db();
        let acme = sponsor("acme");
        let rival = sponsor("rival");
        let jane = influencer("jane");
        for (u, h) in [(&acme, "h"), (&rival, "h"), (&jane, "h")] {
            db.create_user(u, h).unwrap();
        }

        let mine = campaign(&acme, "Summer Sale", Visibility::Public, CampaignStatus::Ongoing);
        let theirs = campaign(&rival, "Other Sale", Visibility::Public, CampaignStatus::Ongoing);
        db.insert_campaign(&mine).unwrap();
        db.insert_campaign(&theirs).unwrap();

        let proposal = request(&mine, &jane, CreatedBy::Influencer);
        let outbound = request(&mine, &jane, CreatedBy::Sponsor);
        let other_proposal = request(&theirs, &jane, CreatedBy::Influencer);
        for r in [&proposal, &outbound, &other_proposal] {
            db.insert_ad_request(r).unwrap();
        }

        let inbound = db.pending_inbound_for_sponsor(acme.id).unwrap();
        assert_eq!(inbound.len(), 1);
        assert_eq!(inbound[0].request.id, proposal.id);

        let ongoing = db.ongoing_campaigns_by_sponsor(acme.id).unwrap();
        assert_eq!(ongoing.len(), 1);
        assert_eq!(ongoing[0].id, mine.id);
    }

    #[test]
    fn influencer_pool_search() {
        let db = db();
        let jane = influencer("jane");
        let mut bob = influencer("bob");
        bob.profile = RoleProfile::Influencer {
            category: Some("food".into()),
            niche: Some("street eats".into()),
            reach: Some(900),
        };
        let acme = sponsor("acme");
        for u in [&jane, &bob, &acme] {
            db.create_user(u, "hash").unwrap();
        }

        // Sponsors are never part of the pool.
        let pool = db.influencers(None).unwrap();
        assert_eq!(pool.len(), 2);

        let by_niche = db.influencers(Some("GADGET")).unwrap();
        assert_eq!(by_niche.len(), 1);
        assert_eq!(by_niche[0].username, "jane");

        let by_name = db.influencers(Some("bob")).unwrap();
        assert_eq!(by_name.len(), 1);
        assert!(db.influencers(Some("fashion")).unwrap().is_empty());
    }
}
