/**
 * Logging configuration
 * Where logs go and how verbose they are
 */
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Directory for the rolling `app.log` and `error.log` files.
    pub directory: PathBuf,
    /// Default level for this crate when `RUST_LOG` is unset.
    pub level: String,
    /// JSON lines instead of the pretty console format.
    pub json: bool,
    pub environment: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        Self::for_environment(environment, std::env::var("LOG_LEVEL").ok())
    }

    pub fn for_environment(environment: String, level: Option<String>) -> Self {
        let is_production = environment == "production";
        Self {
            directory: PathBuf::from("logs"),
            level: level.unwrap_or_else(|| {
                if is_production { "info" } else { "debug" }.to_string()
            }),
            json: is_production,
            environment,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn filter_directive(&self) -> String {
        format!(
            "insurance_insight={},tower_http=debug,axum=debug",
            self.level
        )
    }
}
