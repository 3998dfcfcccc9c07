use std::sync::{Arc, Mutex};

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use sessionflow::config::AppConfig;
use sessionflow::db;
use sessionflow::handlers;
use sessionflow::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings", get(handlers::bookings::get_bookings))
        .route(
            "/api/bookings/user/:user_id",
            get(handlers::bookings::get_user_bookings),
        )
        .route(
            "/api/bookings/:id/status",
            put(handlers::bookings::update_booking_status),
        )
        .route(
            "/api/receipts/:booking_id",
            get(handlers::receipts::download_receipt),
        )
        .route(
            "/api/notify-admin",
            post(handlers::notifications::notify_admin),
        )
        .route(
            "/api/notify-admin/notifications",
            get(handlers::notifications::get_notifications),
        )
        .route(
            "/api/notify-admin/notifications/:id",
            put(handlers::notifications::mark_notification_read),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
