#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the road risk map.
//!
//! Serves the REST API for querying roads and issue reports as `GeoJSON`
//! feature collections, accepts new issue reports, and serves the
//! dashboard bundle and uploaded media as static files. Connects to
//! Postgres when reachable and otherwise falls back to an in-memory
//! store behind the same database interface, so handler code is
//! identical for both.

mod handlers;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use road_risk_database::{db, run_migrations};
use std::sync::Arc;
use switchy_database::Database;

/// Shared application state.
pub struct AppState {
    /// Database connection (Postgres or the in-memory fallback).
    pub db: Arc<dyn Database>,
    /// Serializes "insert issue, then recompute" so each recomputation
    /// observes a consistent snapshot of the road's issues.
    pub report_lock: tokio::sync::Mutex<()>,
}

/// Starts the road risk map API server.
///
/// Connects to the Postgres database and runs migrations; if the
/// connection fails, opens the in-memory fallback store instead. This is
/// a regular async function — the caller provides the async runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if migrations fail on the Postgres store or the fallback
/// store cannot be opened.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Connecting to database...");
    let db_conn: Box<dyn Database> = match db::connect_from_env().await {
        Ok(conn) => {
            log::info!("Running migrations...");
            run_migrations(conn.as_ref())
                .await
                .expect("Failed to run migrations");
            conn
        }
        Err(e) => {
            log::warn!("Postgres unavailable ({e}); using the in-memory fallback store");
            db::connect_fallback()
                .await
                .expect("Failed to open fallback store")
        }
    };

    let state = web::Data::new(AppState {
        db: Arc::from(db_conn),
        report_lock: tokio::sync::Mutex::new(()),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/roads", web::get().to(handlers::roads))
                    .route("/issues", web::get().to(handlers::issues))
                    .route("/report", web::post().to(handlers::report)),
            )
            // Serve uploaded issue media
            .service(Files::new("/uploads", "uploads"))
            // Serve dashboard static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
