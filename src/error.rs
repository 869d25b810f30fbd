//! Error types for document processing.
//!
//! Layout anomalies (missing header rows, out-of-tolerance columns) are not
//! errors: they degrade to raw text or unset amounts inside the pipeline.
//! These variants cover the collaborator boundary only.

use thiserror::Error;

/// Failures raised while obtaining glyphs for a document.
#[derive(Error, Debug)]
pub enum TariffError {
    #[error("glyph extraction failed for {source_label} page {page}: {message}")]
    Extraction {
        source_label: String,
        page: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no processing profile for carrier: {0}")]
    UnknownCarrier(String),

    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("PDF error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, TariffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_error_names_page_and_source() {
        let err = TariffError::Extraction {
            source_label: "tariff.json".into(),
            page: 3,
            message: "page index out of range".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("tariff.json"));
        assert!(msg.contains("page 3"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TariffError = io.into();
        assert!(matches!(err, TariffError::Io(_)));
    }
}
