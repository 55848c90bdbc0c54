use std::net::SocketAddr;

use axum::{Router, Server, http::HeaderValue, middleware::from_fn};
use tower_http::cors::{Any, CorsLayer};
use vazifeban::{
    AppState, config::Config, db::build_pool, init_tracing, middleware::logger, routes,
};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    init_tracing(&config);

    let db = match build_pool(&config.database()) {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "Database pool initialization failed");
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = match config.server_address().parse() {
        Ok(addr) => addr,
        Err(err) => {
            tracing::error!(error = %err, address = %config.server_address(), "Invalid server address");
            std::process::exit(1);
        }
    };

    let cors = cors_layer(&config.server().cors_origins);
    let state = AppState::new(db, config);

    let app: Router = routes::create_router(state)
        .layer(cors)
        .layer(from_fn(logger));

    tracing::info!(address = %addr, "Server running");
    if let Err(err) = Server::bind(&addr).serve(app.into_make_service()).await {
        tracing::error!(error = %err, "Server terminated");
        std::process::exit(1);
    }
}
