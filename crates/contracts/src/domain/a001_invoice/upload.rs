use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `POST /invoices/upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedInvoice {
    pub id: String,
    /// Remaining metadata extracted by the backend
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
