use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Failure while turning an attachment batch into text. The `Display`
/// text is shown to the user verbatim.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {name}. Please attach .txt or .pdf files.")]
    UnsupportedType { name: String },
    #[error("Failed to read file: {name}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Error processing PDF: {name}")]
    PdfParse {
        name: String,
        #[source]
        source: lopdf::Error,
    },
}

/// Extract the text of every file in `paths`, one file at a time in list
/// order. The batch is all-or-nothing: the first failure abandons it and
/// nothing is returned, so a failed batch can never contribute partial
/// entries to the attachment buffer.
pub async fn extract_batch(paths: &[PathBuf]) -> Result<Vec<String>, ExtractError> {
    let mut texts = Vec::with_capacity(paths.len());
    for path in paths {
        texts.push(extract_file(path).await?);
    }
    Ok(texts)
}

async fn extract_file(path: &Path) -> Result<String, ExtractError> {
    let name = file_name(path);
    match extension(path).as_deref() {
        Some("txt") => read_txt(path, &name).await,
        Some("pdf") => read_pdf(path, &name).await,
        _ => Err(ExtractError::UnsupportedType { name }),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

async fn read_txt(path: &Path, name: &str) -> Result<String, ExtractError> {
    debug!(file = name, "reading text attachment");
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ExtractError::Read {
            name: name.to_string(),
            source,
        })
}

async fn read_pdf(path: &Path, name: &str) -> Result<String, ExtractError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ExtractError::Read {
            name: name.to_string(),
            source,
        })?;
    debug!(file = name, bytes = bytes.len(), "decoding PDF attachment");
    pdf_to_text(&bytes).map_err(|source| {
        warn!(file = name, error = %source, "PDF extraction failed");
        ExtractError::PdfParse {
            name: name.to_string(),
            source,
        }
    })
}

/// Pages come out in page-number order; tokens within a page are joined
/// with single spaces, pages with newlines.
fn pdf_to_text(bytes: &[u8]) -> Result<String, lopdf::Error> {
    let doc = lopdf::Document::load_mem(bytes)?;
    let mut pages = Vec::new();
    // get_pages is keyed by page number, so iteration is 1..=N.
    for &number in doc.get_pages().keys() {
        let text = doc.extract_text(&[number])?;
        pages.push(text.split_whitespace().collect::<Vec<_>>().join(" "));
    }
    Ok(pages.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(extension(Path::new("brief.TXT")).as_deref(), Some("txt"));
        assert_eq!(extension(Path::new("brief.Pdf")).as_deref(), Some("pdf"));
        assert_eq!(extension(Path::new("brief")), None);
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected() {
        let err = extract_file(Path::new("notes.docx")).await.unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType { .. }));
        assert!(err.to_string().contains("notes.docx"));
    }

    #[tokio::test]
    async fn test_missing_file_reports_name() {
        let err = extract_file(Path::new("/no/such/file.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Read { .. }));
        assert!(err.to_string().contains("file.txt"));
    }

    #[test]
    fn test_garbage_bytes_are_not_a_pdf() {
        assert!(pdf_to_text(b"this is not a pdf").is_err());
    }
}
