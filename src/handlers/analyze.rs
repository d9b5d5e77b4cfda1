use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use common::PlanAnalysis;
use extract::{ExtractError, PlanAnalyst};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// One uploaded document pending analysis
struct UploadedDocument {
    name: String,
    data: Vec<u8>,
}

/// Analyze uploaded plan documents
#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "analyze",
    request_body(content_type = "multipart/form-data", description = "Plan documents in repeated `files` fields"),
    responses(
        (status = 200, description = "All documents analyzed successfully", body = ApiResponse<Vec<PlanAnalysis>>),
        (status = 422, description = "No files uploaded or unreadable request", body = ErrorResponse),
        (status = 500, description = "Analysis of a document failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn analyze_plans(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Vec<PlanAnalysis>>>, (StatusCode, Json<ErrorResponse>)> {
    let mut documents = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Rejecting malformed multipart request: {}", e);
                return Err(rejection(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("Malformed multipart request: {e}"),
                    "BAD_MULTIPART",
                ));
            }
        };

        if field.name() != Some("files") {
            trace!("Skipping unrelated multipart field {:?}", field.name());
            continue;
        }

        let name = field.file_name().unwrap_or("upload").to_string();
        let data = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                warn!("Failed to read upload '{}': {}", name, e);
                return Err(rejection(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("Failed to read upload '{name}': {e}"),
                    "BAD_UPLOAD",
                ));
            }
        };
        debug!("Received upload '{}' ({} bytes)", name, data.len());
        documents.push(UploadedDocument { name, data });
    }

    if documents.is_empty() {
        return Err(rejection(
            StatusCode::UNPROCESSABLE_ENTITY,
            "No files uploaded".to_string(),
            "NO_FILES",
        ));
    }

    // Documents are analyzed in upload order and the first failure aborts
    // the whole batch
    let mut results = Vec::with_capacity(documents.len());
    for document in &documents {
        match analyze_document(&state, document).await {
            Ok(analysis) => results.push(analysis),
            Err(e) => {
                error!("Analysis of '{}' failed: {}", document.name, e);
                return Err(rejection(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Analysis of '{}' failed: {e}", document.name),
                    "ANALYSIS_FAILED",
                ));
            }
        }
    }

    info!("Analyzed {} document(s)", results.len());
    let response = ApiResponse {
        data: results,
        message: "Documents analyzed successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Analyze one document, serving repeated uploads from the cache.
async fn analyze_document(
    state: &AppState,
    document: &UploadedDocument,
) -> Result<PlanAnalysis, ExtractError> {
    let cache_key = document_fingerprint(&document.name, &document.data);

    // Check cache first
    if let Some(analysis) = state.cache.get(&cache_key).await {
        debug!("Returning cached analysis for '{}'", document.name);
        return Ok(analysis);
    }

    let analysis = analyze_bytes(state.analyst.as_ref(), &document.name, &document.data).await?;

    // Cache the result
    state.cache.insert(cache_key, analysis.clone()).await;
    Ok(analysis)
}

/// Run the full analysis pipeline over one document's bytes: text
/// extraction, LLM metrics extraction, indicator computation and the
/// written summary.
///
/// Shared by the web handler and the `analyze` CLI command.
pub async fn analyze_bytes(
    analyst: &dyn PlanAnalyst,
    file_name: &str,
    data: &[u8],
) -> Result<PlanAnalysis, ExtractError> {
    let text = extract::document_text(file_name, data)?;
    let mut metrics = analyst.extract_metrics(&text).await?;

    // A plan without a usable name is labelled after its file
    let product_name = match metrics.product_name.as_deref() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => file_stem(file_name),
    };
    metrics.product_name = Some(product_name.clone());

    let indicators = compute::plan_indicators(&metrics);
    let summary = analyst.summarize(&metrics, &indicators).await?;

    Ok(PlanAnalysis::from_parts(product_name, metrics, indicators, summary))
}

/// Cache key for one upload. The display name is part of the key since it
/// feeds the product-name fallback.
fn document_fingerprint(file_name: &str, data: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    data.hash(&mut hasher);
    format!("analysis_{:016x}_{}", hasher.finish(), file_name)
}

fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(|stem| stem.to_string())
        .unwrap_or_else(|| file_name.to_string())
}

fn rejection(status: StatusCode, error: String, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error,
            code: code.to_string(),
            success: false,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_strips_the_extension() {
        assert_eq!(file_stem("evergreen_plan.pdf"), "evergreen_plan");
        assert_eq!(file_stem("notes.final.txt"), "notes.final");
        assert_eq!(file_stem("noext"), "noext");
    }

    #[test]
    fn fingerprints_differ_by_content_and_name() {
        let a = document_fingerprint("plan.txt", b"alpha");
        let b = document_fingerprint("plan.txt", b"beta");
        let c = document_fingerprint("other.txt", b"alpha");

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, document_fingerprint("plan.txt", b"alpha"));
    }
}
