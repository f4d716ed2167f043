use std::sync::Arc;

use async_trait::async_trait;
use contracts::domain::a001_invoice::{DocumentFormat, InvoiceDraft, InvoiceSummary, UploadedInvoice};
use gloo_net::http::Request;

use crate::shared::config::AppConfig;
use crate::shared::http::{ensure_success, read_bytes, read_json, ApiError};

/// File accepted by the client-side extension check, waiting for upload
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub name: String,
    pub size: u64,
    pub format: DocumentFormat,
    pub bytes: Arc<[u8]>,
}

/// Calls to the invoicing backend
#[async_trait(?Send)]
pub trait InvoiceApi {
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, ApiError>;

    /// Generates the invoice and returns the PDF
    async fn create_invoice(&self, draft: &InvoiceDraft) -> Result<Vec<u8>, ApiError>;

    async fn fetch_document(&self, id: &str, format: DocumentFormat) -> Result<Vec<u8>, ApiError>;

    async fn send_invoice(&self, id: &str) -> Result<(), ApiError>;

    async fn delete_invoice(&self, id: &str) -> Result<(), ApiError>;

    async fn upload_invoice(&self, file: &StagedFile) -> Result<UploadedInvoice, ApiError>;
}

/// gloo-net implementation against the configured backend
#[derive(Clone)]
pub struct HttpInvoiceApi {
    config: AppConfig,
}

impl HttpInvoiceApi {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        self.config.api_url(path)
    }
}

fn invoice_path(id: &str) -> String {
    format!("/invoices/{}", urlencoding::encode(id))
}

#[async_trait(?Send)]
impl InvoiceApi for HttpInvoiceApi {
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, ApiError> {
        let response = Request::get(&self.url("/invoices"))
            .header("Accept", "application/json")
            .send()
            .await?;
        read_json(response).await
    }

    async fn create_invoice(&self, draft: &InvoiceDraft) -> Result<Vec<u8>, ApiError> {
        let response = Request::post(&self.url("/invoices"))
            .header("Accept", DocumentFormat::Pdf.mime_type())
            .json(draft)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await?;
        read_bytes(response).await
    }

    async fn fetch_document(&self, id: &str, format: DocumentFormat) -> Result<Vec<u8>, ApiError> {
        let response = Request::get(&self.url(&invoice_path(id)))
            .header("Accept", format.mime_type())
            .send()
            .await?;
        read_bytes(response).await
    }

    async fn send_invoice(&self, id: &str) -> Result<(), ApiError> {
        let response = Request::post(&self.url(&format!("{}/send", invoice_path(id))))
            .header("Accept", "application/json")
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_invoice(&self, id: &str) -> Result<(), ApiError> {
        let response = Request::delete(&self.url(&invoice_path(id)))
            .header("Accept", "application/json")
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn upload_invoice(&self, file: &StagedFile) -> Result<UploadedInvoice, ApiError> {
        let form = multipart_body(file)?;
        let response = Request::post(&self.url("/invoices/upload"))
            .header("Accept", "application/json")
            .body(form)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await?;
        read_json(response).await
    }
}

/// `multipart/form-data` with the file under the `file` field
fn multipart_body(file: &StagedFile) -> Result<web_sys::FormData, ApiError> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(&file.bytes[..]));

    let properties = web_sys::BlobPropertyBag::new();
    properties.set_type(file.format.mime_type());
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
        .map_err(|e| ApiError::Request(format!("{:?}", e)))?;

    let form = web_sys::FormData::new().map_err(|e| ApiError::Request(format!("{:?}", e)))?;
    form.append_with_blob_and_filename("file", &blob, &file.name)
        .map_err(|e| ApiError::Request(format!("{:?}", e)))?;
    Ok(form)
}
