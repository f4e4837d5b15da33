//! Text extraction for uploaded resume files.
//!
//! Extraction happens entirely in memory; the upload is never written to
//! disk. Supported types are PDF (via `pdf-extract`) and plain text.

use crate::errors::AppError;

/// Extracts the full text of an uploaded resume, dispatching on the file
/// extension.
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String, AppError> {
    let lower = filename.to_ascii_lowercase();

    if lower.ends_with(".pdf") {
        pdf_extract::extract_text_from_mem(data).map_err(|e| AppError::Extraction(e.to_string()))
    } else if lower.ends_with(".txt") {
        String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Extraction("Text file is not valid UTF-8".to_string()))
    } else {
        Err(AppError::Validation(
            "Unsupported file type. Please upload PDF or TXT.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_passes_through() {
        let text = extract_text("resume.txt", b"Jane Doe\nSoftware Engineer").unwrap();
        assert_eq!(text, "Jane Doe\nSoftware Engineer");
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(extract_text("RESUME.TXT", b"ok").is_ok());
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = extract_text("resume.txt", &[0xff, 0xfe, 0xfd]).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = extract_text("resume.docx", b"whatever").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
