//! Document text extraction for uploaded resumes.
//!
//! Dispatch is strictly on the declared file extension; file contents are
//! never sniffed. Library failures are swallowed to the empty string, and an
//! empty extraction is indistinguishable from a genuinely empty document:
//! both surface as `NotExtractable`.

use std::path::Path;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    /// Unsupported extension, unreadable file, or a document with no text.
    #[error("Could not extract text from file")]
    NotExtractable,
}

/// Extracts plain text from the staged file at `path`, routing on the
/// lowercased `extension` (without the leading dot). Returns trimmed,
/// non-empty text or `NotExtractable`.
pub fn extract_text(path: &Path, extension: &str) -> Result<String, ExtractError> {
    let text = match extension.to_lowercase().as_str() {
        "pdf" => extract_pdf(path),
        "doc" | "docx" => extract_docx(path),
        _ => return Err(ExtractError::NotExtractable),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        Err(ExtractError::NotExtractable)
    } else {
        Ok(text)
    }
}

/// Whether an upload filename carries a supported extension (case-insensitive).
pub fn is_supported_filename(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    lower.ends_with(".pdf") || lower.ends_with(".docx") || lower.ends_with(".doc")
}

fn extract_pdf(path: &Path) -> String {
    match pdf_extract::extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("PDF extraction failed for {}: {e}", path.display());
            String::new()
        }
    }
}

fn extract_docx(path: &Path) -> String {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            warn!("Could not read {}: {e}", path.display());
            return String::new();
        }
    };

    let docx = match docx_rs::read_docx(&bytes) {
        Ok(d) => d,
        Err(e) => {
            warn!("DOCX parse failed for {}: {e:?}", path.display());
            return String::new();
        }
    };

    // Paragraphs in document order, runs in paragraph order, newline after
    // each paragraph.
    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for para_child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = para_child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn unsupported_extension_is_not_extractable() {
        let result = extract_text(Path::new("/nonexistent/resume.txt"), "txt");
        assert_eq!(result, Err(ExtractError::NotExtractable));
    }

    #[test]
    fn supported_filename_check_is_case_insensitive() {
        assert!(is_supported_filename("resume.PDF"));
        assert!(is_supported_filename("resume.Docx"));
        assert!(is_supported_filename("resume.doc"));
        assert!(!is_supported_filename("resume.txt"));
        assert!(!is_supported_filename("resume"));
    }

    #[test]
    fn garbage_pdf_bytes_are_not_extractable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"definitely not a pdf").unwrap();

        assert_eq!(extract_text(&path, "pdf"), Err(ExtractError::NotExtractable));
    }

    #[test]
    fn garbage_docx_bytes_are_not_extractable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        assert_eq!(extract_text(&path, "docx"), Err(ExtractError::NotExtractable));
    }

    #[test]
    fn docx_paragraphs_round_trip() {
        use docx_rs::{Docx, Paragraph, Run};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        let file = std::fs::File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Ada Lovelace")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Analyst Engine Corp")))
            .build()
            .pack(file)
            .unwrap();

        let text = extract_text(&path, "docx").unwrap();
        assert_eq!(text, "Ada Lovelace\nAnalyst Engine Corp");
    }

    #[test]
    fn doc_extension_routes_through_docx_reader() {
        // A .doc upload hits the same reader; invalid bytes degrade to
        // NotExtractable rather than an error.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.doc");
        std::fs::write(&path, b"\xd0\xcf\x11\xe0old binary word").unwrap();

        assert_eq!(extract_text(&path, "doc"), Err(ExtractError::NotExtractable));
    }
}
