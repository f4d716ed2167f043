use contracts::domain::a001_invoice::DocumentFormat;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Type de fichier invalide. Formats acceptes: PDF, XML")]
    UnsupportedFormat,
}

/// Extension check done before the file is read or sent
pub fn check_file_name(name: &str) -> Result<DocumentFormat, UploadError> {
    DocumentFormat::from_file_name(name).ok_or(UploadError::UnsupportedFormat)
}
