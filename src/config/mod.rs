//! Configuration modules for the QRPass API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables once at startup. The resulting structs are
//! immutable and carried through [`crate::state::AppState`]; no part of
//! the application reads the environment after boot.

pub mod bootstrap;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

use bootstrap::BootstrapConfig;
use cors::CorsConfig;
use database::DatabaseConfig;
use jwt::JwtConfig;
use server::ServerConfig;

/// Top-level application configuration, built once in `main`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub bootstrap: Option<BootstrapConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(),
            server: ServerConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cors: CorsConfig::from_env(),
            bootstrap: BootstrapConfig::from_env(),
        }
    }
}
