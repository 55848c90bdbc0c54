pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod permissions;
pub mod routes;
pub mod schema;
pub mod services;
pub mod validation;

use std::sync::Arc;

use tracing::Level;

use crate::config::Config;
use crate::db::DbPool;
use crate::middleware::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        let auth_service = AuthService::new(config.auth());
        Self {
            db,
            config: Arc::new(config),
            auth_service,
        }
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level = parse_level(&logging.level);

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_max_level(level).init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }
}
