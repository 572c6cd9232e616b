//! PDF text extraction

use std::path::Path;

use crate::error::{Error, Result};

/// Extract the plain-text content of a PDF file.
///
/// Uses pdf-extract first and falls back to lopdf when it cannot handle the
/// file. Returns `Error::Parse` when no text can be recovered at all; callers
/// in the indexing pipeline treat that as a skip, not a fatal failure.
pub fn extract_text(path: &Path) -> Result<String> {
    let data = std::fs::read(path)?;

    let raw = match pdf_extract::extract_text_from_mem(&data) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("pdf-extract failed for {}: {}, trying fallback", path.display(), e);
            extract_text_fallback(&data)?
        }
    };

    let content = normalize(&raw);
    if content.is_empty() {
        return Err(Error::Parse(format!(
            "no text content could be extracted from {}",
            path.display()
        )));
    }

    Ok(content)
}

/// Fallback extraction using lopdf's page-level text API.
fn extract_text_fallback(data: &[u8]) -> Result<String> {
    let doc = lopdf::Document::load_mem(data)
        .map_err(|e| Error::Parse(format!("failed to load PDF: {}", e)))?;

    let mut all_text = String::new();
    for page_number in doc.get_pages().keys() {
        // A page that yields no text contributes nothing rather than failing
        // the whole document.
        if let Ok(text) = doc.extract_text(&[*page_number]) {
            all_text.push_str(&text);
            all_text.push('\n');
        }
    }

    Ok(all_text)
}

/// Strip null characters and collapse the line structure.
fn normalize(text: &str) -> String {
    text.replace('\0', "")
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
