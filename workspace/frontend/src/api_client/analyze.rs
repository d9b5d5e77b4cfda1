use common::{ApiResponse, PlanAnalysis};
use gloo_net::http::Request;
use web_sys::FormData;

use super::{api_base, ErrorResponse};

/// Upload plan documents and return one analysis per document.
///
/// Each entry pairs the browser file with the display name it is uploaded
/// under; the backend names plans without a printed product name after it.
pub async fn analyze_plans(files: &[(String, web_sys::File)]) -> Result<Vec<PlanAnalysis>, String> {
    let form = FormData::new().map_err(|e| {
        let error_msg = format!("Failed to build form data: {:?}", e);
        log::error!("POST /analyze - {}", error_msg);
        error_msg
    })?;

    for (name, file) in files {
        form.append_with_blob_and_filename("files", file, name).map_err(|e| {
            let error_msg = format!("Failed to attach '{}': {:?}", name, e);
            log::error!("POST /analyze - {}", error_msg);
            error_msg
        })?;
    }

    let url = format!("{}/analyze", api_base());
    log::debug!("POST request to: {} ({} file(s))", url, files.len());

    let response = Request::post(&url)
        .body(form)
        .map_err(|e| {
            let error_msg = format!("Failed to build request: {}", e);
            log::error!("POST /analyze - {}", error_msg);
            error_msg
        })?
        .send()
        .await
        .map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("POST /analyze - {}", error_msg);
            error_msg
        })?;

    if !response.ok() {
        log::warn!("POST /analyze - Non-OK response: {}", response.status());
        let error_response: Result<ErrorResponse, _> = response.json().await;
        return Err(match error_response {
            Ok(err) => {
                log::error!("POST /analyze - API error: {}", err.error);
                format!("Error: {}", err.error)
            }
            Err(_) => {
                let error_msg = format!("HTTP error: {}", response.status());
                log::error!("POST /analyze - {}", error_msg);
                error_msg
            }
        });
    }

    log::trace!("POST /analyze - Response received, parsing JSON");
    let api_response: ApiResponse<Vec<PlanAnalysis>> = response
        .json()
        .await
        .map_err(|e| {
            let error_msg = format!("Failed to parse response: {}", e);
            log::error!("POST /analyze - {}", error_msg);
            error_msg
        })?;

    log::info!("POST /analyze - Success ({} analyses)", api_response.data.len());
    Ok(api_response.data)
}
