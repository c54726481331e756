mod middleware;
mod routes;

use axum::http::header::{ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use axum::{routing::post, Router};
use shared::utils::config;
use std::str::FromStr;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::Level;
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() {
    config::load();

    let log_level = config::get("LOG_LEVEL");

    let timer = time::format_description::parse("[hour]:[minute]:[second]").expect("Valid time");
    let time_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = fmt::time::OffsetTime::new(time_offset, timer);

    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_ansi(false)
        .with_max_level(Level::from_str(&log_level).expect("Valid log level"))
        .json()
        .init();

    let cors_layer = CorsLayer::new()
        .allow_headers([ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE, ORIGIN])
        .allow_methods(tower_http::cors::Any)
        .allow_origin(tower_http::cors::Any);

    let app = Router::new()
        .nest(
            "/github",
            Router::new()
                .route("/issue", post(routes::github::issue::process))
                .route("/ref", post(routes::github::tag::release_notes)),
        )
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new().gzip(true).deflate(true));

    let port = config::get_optional("PORT").unwrap_or_else(|| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Port to be free");

    println!("App listening at http://localhost:{port}");
    axum::serve(listener, app).await.expect("Server to run");
}
