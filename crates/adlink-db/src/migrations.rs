use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            role        TEXT NOT NULL
                        CHECK (role IN ('admin', 'sponsor', 'influencer')),
            industry    TEXT,
            budget      INTEGER,
            category    TEXT,
            niche       TEXT,
            reach       INTEGER,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS campaigns (
            id           TEXT PRIMARY KEY,
            sponsor_id   TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name         TEXT NOT NULL,
            description  TEXT NOT NULL,
            start_date   TEXT NOT NULL,
            end_date     TEXT NOT NULL,
            budget       INTEGER NOT NULL,
            visibility   TEXT NOT NULL DEFAULT 'public'
                         CHECK (visibility IN ('public', 'private')),
            goals        TEXT,
            status       TEXT NOT NULL DEFAULT 'ongoing'
                         CHECK (status IN ('ongoing', 'completed', 'cancelled')),
            created_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_campaigns_sponsor
            ON campaigns(sponsor_id);

        CREATE TABLE IF NOT EXISTS ad_requests (
            id              TEXT PRIMARY KEY,
            campaign_id     TEXT NOT NULL REFERENCES campaigns(id) ON DELETE CASCADE,
            influencer_id   TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            messages        TEXT,
            requirements    TEXT NOT NULL,
            payment_amount  INTEGER NOT NULL,
            created_by      TEXT NOT NULL DEFAULT 'sponsor'
                            CHECK (created_by IN ('sponsor', 'influencer')),
            status          TEXT NOT NULL DEFAULT 'pending'
                            CHECK (status IN ('pending', 'accepted', 'rejected')),
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_ad_requests_campaign
            ON ad_requests(campaign_id);

        CREATE INDEX IF NOT EXISTS idx_ad_requests_influencer
            ON ad_requests(influencer_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
