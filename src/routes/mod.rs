/**
 * Routes Module
 * Page, admin and API route handlers
 */
use serde::{Deserialize, Serialize};

pub mod admin;
pub mod auth;
pub mod blog;
pub mod health;
pub mod rss;
pub mod site;

/// Error body shared by the JSON endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }
}
