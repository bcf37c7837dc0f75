/**
 * Configuration
 * Settings read from the environment (and `.env`) at startup
 */
use anyhow::Context;
use bcrypt::{hash, DEFAULT_COST};
use std::{fmt, net::SocketAddr, path::PathBuf};
use url::Url;

pub const DEFAULT_SITE_URL: &str = "https://www.goinsurancenews.com";
pub const DEFAULT_SITE_NAME: &str = "Insurance Insight";
pub const DEFAULT_JWT_SECRET: &str = "default-jwt-secret-change-in-production";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub site_url: Url,
    pub site_name: String,
    /// Directory holding the four JSON sources.
    pub data_dir: PathBuf,
    /// Generated bundle script, preferred over `data_dir` when present.
    pub data_bundle: PathBuf,
    /// Static assets served under `/assets`.
    pub assets_dir: PathBuf,
    /// Origins allowed by CORS; empty means the local development defaults.
    pub allowed_origins: Vec<String>,
    pub auth: AuthConfig,
}

/// Admin credentials and token signing secret.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub admin_email: String,
    /// bcrypt hash; `None` disables admin login.
    pub admin_password_hash: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("admin_email", &self.admin_email)
            .field("admin_login_enabled", &self.admin_password_hash.is_some())
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            admin_email: String::new(),
            admin_password_hash: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            environment: "development".to_string(),
            site_url: Url::parse(DEFAULT_SITE_URL).expect("default site URL is valid"),
            site_name: DEFAULT_SITE_NAME.to_string(),
            data_dir: PathBuf::from("data"),
            data_bundle: PathBuf::from("scripts/data.js"),
            assets_dir: PathBuf::from("assets"),
            allowed_origins: Vec::new(),
            auth: AuthConfig::default(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// `ALLOWED_ORIGINS` (comma-separated) or else `FRONTEND_ORIGIN`.
fn allowed_origins_from_env() -> Vec<String> {
    let split = |s: String| -> Vec<String> {
        s.split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    };
    std::env::var("ALLOWED_ORIGINS")
        .ok()
        .map(split)
        .filter(|origins| !origins.is_empty())
        .or_else(|| std::env::var("FRONTEND_ORIGIN").ok().map(split))
        .unwrap_or_default()
}

impl Config {
    /// Read configuration from environment variables, falling back to
    /// defaults suitable for local development.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let site_url = match std::env::var("SITE_URL") {
            Ok(raw) => Url::parse(&raw).with_context(|| format!("SITE_URL is not a URL: {}", raw))?,
            Err(_) => defaults.site_url,
        };

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a port number: {}", raw))?,
            Err(_) => defaults.port,
        };

        let config = Self {
            host: env_or("HOST", &defaults.host),
            port,
            environment: env_or("ENVIRONMENT", &defaults.environment),
            site_url,
            site_name: env_or("SITE_NAME", &defaults.site_name),
            data_dir: std::env::var("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            data_bundle: std::env::var("DATA_BUNDLE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_bundle),
            assets_dir: std::env::var("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            allowed_origins: allowed_origins_from_env(),
            auth: AuthConfig::from_env()?,
        };
        config.check()?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid HOST/PORT: {}:{}", self.host, self.port))
    }

    /// Refuse insecure settings in production; warn about them elsewhere.
    fn check(&self) -> anyhow::Result<()> {
        if self.is_production() && self.auth.jwt_secret == DEFAULT_JWT_SECRET {
            anyhow::bail!(
                "JWT_SECRET must be set to a secure, unique value in production. \
                 Refusing to start with the default secret."
            );
        }
        if self.auth.admin_password_hash.is_none() {
            tracing::warn!(
                "Neither ADMIN_HASH_PASSWORD nor ADMIN_PASSWORD is set; admin login is disabled"
            );
        } else if self.auth.admin_email.is_empty() {
            tracing::warn!("ADMIN_EMAIL is not set; admin login is disabled");
        }
        Ok(())
    }
}

impl AuthConfig {
    fn from_env() -> anyhow::Result<Self> {
        let admin_password_hash = if let Ok(hashed) = std::env::var("ADMIN_HASH_PASSWORD") {
            Some(hashed)
        } else if let Ok(plain) = std::env::var("ADMIN_PASSWORD") {
            Some(hash(&plain, DEFAULT_COST).context("failed to hash ADMIN_PASSWORD")?)
        } else {
            None
        };

        Ok(Self {
            jwt_secret: env_or("JWT_SECRET", DEFAULT_JWT_SECRET),
            admin_email: env_or("ADMIN_EMAIL", ""),
            admin_password_hash,
        })
    }

    pub fn login_enabled(&self) -> bool {
        self.admin_password_hash.is_some() && !self.admin_email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr().unwrap().port(), 3001);
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = Config {
            environment: "production".to_string(),
            ..Config::default()
        };
        assert!(config.check().is_err());
    }

    #[test]
    fn test_auth_debug_redacts_secret() {
        let auth = AuthConfig {
            jwt_secret: "super-secret".to_string(),
            admin_email: "a@b.c".to_string(),
            admin_password_hash: Some("hash".to_string()),
        };
        let printed = format!("{:?}", auth);
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("hash\""));
        assert!(auth.login_enabled());
    }
}
