//! Plain-text extraction from uploaded documents.

use std::path::Path;

use tracing::{debug, trace};

use crate::error::{ExtractError, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Whether the upload should be treated as a PDF.
///
/// The leading magic bytes win over the file name, so a misnamed PDF is
/// still handled as one.
fn is_pdf(file_name: &str, data: &[u8]) -> bool {
    if data.starts_with(PDF_MAGIC) {
        return true;
    }
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Extract the text of an uploaded document.
///
/// PDFs go through `pdf_extract`; anything else is taken as UTF-8 with
/// invalid sequences replaced. A document that yields only whitespace is
/// rejected since there is nothing to analyze.
pub fn document_text(file_name: &str, data: &[u8]) -> Result<String> {
    let text = if is_pdf(file_name, data) {
        debug!("Extracting PDF text from '{}' ({} bytes)", file_name, data.len());
        pdf_extract::extract_text_from_mem(data).map_err(|e| {
            ExtractError::Document(format!("PDF extraction failed for '{file_name}': {e}"))
        })?
    } else {
        String::from_utf8_lossy(data).into_owned()
    };

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyDocument(file_name.to_string()));
    }
    trace!("Extracted {} characters from '{}'", text.len(), file_name);
    Ok(text)
}
