use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub contest_dir: String,
    pub roster_path: String,
    pub ui_dir: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load environment variables from root .env file (two levels up)
        // Try root .env first, then fallback to local .env
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            // Fallback to current directory .env for backward compatibility
            dotenvy::dotenv().ok();
        }

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            // Load base config from TOML file
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        // Extract values with fallbacks to ENV or defaults
        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:8298".to_string());

        let contest_dir = settings
            .get_string("catalog.contest_dir")
            .or_else(|_| env::var("CONTEST_DIR"))
            .unwrap_or_else(|_| "./data/contest".to_string());

        let roster_path = settings
            .get_string("catalog.roster_path")
            .or_else(|_| env::var("ROSTER_PATH"))
            .unwrap_or_else(|_| "./data/officers.csv".to_string());

        let ui_dir = settings
            .get_string("server.ui_dir")
            .or_else(|_| env::var("UI_DIR"))
            .ok();

        Ok(Config {
            bind_addr,
            contest_dir,
            roster_path,
            ui_dir,
        })
    }
}
