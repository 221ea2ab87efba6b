use std::env;

/// Server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Deployment environment name reported by the health endpoint.
    pub environment: String,
    /// Directory holding the built dashboard assets.
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            listen_addr: env::var("SB_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            environment: env::var("SB_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            static_dir: env::var("SB_STATIC_DIR").unwrap_or_else(|_| "frontend/build".to_string()),
        }
    }
}
