use common::{BenefitRow, PlanAnalysis};
use extract::PlanAnalyst;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Analyst that reads uploaded plan documents
    pub analyst: Arc<dyn PlanAnalyst>,
    /// Cache of finished analyses keyed by document fingerprint
    pub cache: Cache<String, PlanAnalysis>,
    /// Loaded application configuration
    pub config: Arc<AppConfig>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("cache_entries", &self.cache.entry_count())
            .field("config", &self.config)
            .finish()
    }
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// LLM credential status
    pub llm: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::analyze::analyze_plans,
    ),
    components(
        schemas(
            ApiResponse<Vec<PlanAnalysis>>,
            ErrorResponse,
            HealthResponse,
            PlanAnalysis,
            BenefitRow,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "analyze", description = "Plan document analysis endpoints"),
    ),
    info(
        title = "PlanLens API",
        description = "Insurance Plan Analyzer API - Upload plan documents and get metrics, value trends and plain-language summaries",
        version = "0.1.0",
        contact(
            name = "PlanLens Team",
            email = "contact@planlens.app"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
