use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use adlink_api::auth::AppStateInner;
use adlink_api::routes;
use adlink_core::workflow::ResponsePolicy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adlink=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("ADLINK_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("ADLINK_DB_PATH").unwrap_or_else(|_| "adlink.db".into());
    let host = std::env::var("ADLINK_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("ADLINK_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Off until product confirms the broad sponsor permission is a bug.
    let response_policy = ResponsePolicy {
        owning_sponsor_only: std::env::var("ADLINK_OWNING_SPONSOR_ONLY")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false),
    };

    // Init database
    let db = adlink_db::Database::open(&PathBuf::from(&db_path))?;

    let state = Arc::new(AppStateInner {
        db,
        jwt_secret,
        response_policy,
    });

    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("adlink server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
