pub mod analyze;

use serde::{Deserialize, Serialize};
use crate::settings;

/// Base URL of the backend API, from settings.
fn api_base() -> String {
    settings::get_settings().api_base_url()
}

/// Error Response
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub success: bool,
}
