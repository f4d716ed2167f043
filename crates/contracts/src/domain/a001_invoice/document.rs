use serde::{Deserialize, Serialize};

/// Representation of a stored invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Xml,
}

impl DocumentFormat {
    /// Value of the `Accept` header that selects this representation
    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Xml => "application/xml",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Xml => "xml",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Xml => "XML",
        }
    }

    /// Detects the format from the last extension of a file name, ignoring case.
    /// Only `.pdf` and `.xml` files can be imported.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "xml" => Some(DocumentFormat::Xml),
            _ => None,
        }
    }

    /// Suggested download name for a stored invoice
    pub fn file_name_for(self, invoice_id: &str) -> String {
        format!("facture_{}.{}", invoice_id, self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_file_name("a.pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_file_name("A.PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_file_name("cii.Xml"), Some(DocumentFormat::Xml));
        assert_eq!(
            DocumentFormat::from_file_name("archive.2024.xml"),
            Some(DocumentFormat::Xml)
        );
    }

    #[test]
    fn test_from_file_name_rejects_other_extensions() {
        assert_eq!(DocumentFormat::from_file_name("facture.docx"), None);
        assert_eq!(DocumentFormat::from_file_name("facture.pdf.zip"), None);
        assert_eq!(DocumentFormat::from_file_name("pdf"), None);
        assert_eq!(DocumentFormat::from_file_name(""), None);
    }

    #[test]
    fn test_file_name_for() {
        assert_eq!(DocumentFormat::Pdf.file_name_for("F-1"), "facture_F-1.pdf");
        assert_eq!(DocumentFormat::Xml.file_name_for("F-1"), "facture_F-1.xml");
        assert_eq!(DocumentFormat::Xml.mime_type(), "application/xml");
    }
}
