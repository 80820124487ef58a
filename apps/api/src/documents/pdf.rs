use super::DocumentError;

/// Text and page count of a PDF. Pages come from `lopdf`, text from `pdf-extract`.
pub(super) fn extract(bytes: &[u8]) -> Result<(String, Option<u32>), DocumentError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| DocumentError::Malformed(format!("invalid PDF: {e}")))?;
    let page_count = u32::try_from(doc.get_pages().len())
        .ok()
        .filter(|n| *n > 0);

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| DocumentError::Malformed(format!("PDF text extraction failed: {e}")))?;

    tracing::debug!(?page_count, chars = text.len(), "PDF decoded");
    Ok((text, page_count))
}
