//! HTTP plumbing shared by the API clients
//!
//! Every non-2xx response becomes an [`ApiError::Status`]. When the body carries
//! a `detail` it is shown verbatim, otherwise `Erreur {status}: {statusText}`.

use contracts::shared::error_detail::parse_error_detail;
use gloo_net::http::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Impossible de contacter le serveur")]
    Network(String),

    #[error("{}", status_message(.status, .status_text, .detail))]
    Status {
        status: u16,
        status_text: String,
        detail: Option<String>,
    },

    #[error("Reponse invalide du serveur: {0}")]
    Decode(String),

    /// Building the request failed before anything was sent
    #[error("Requete invalide: {0}")]
    Request(String),
}

fn status_message(status: &u16, status_text: &str, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Erreur {}: {}", status, status_text),
    }
}

impl ApiError {
    /// Builds the error for a non-2xx response from its raw parts
    pub fn from_status(status: u16, status_text: &str, body: &str) -> Self {
        ApiError::Status {
            status,
            status_text: status_text.to_string(),
            detail: parse_error_detail(body),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => {
                log::error!("Network error: {}", other);
                ApiError::Network(other.to_string())
            }
        }
    }
}

/// Passes 2xx responses through, otherwise reads the body into an error
pub async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.unwrap_or_default();
    log::warn!("HTTP {} {} from {}", status, status_text, response.url());
    Err(ApiError::from_status(status, &status_text, &body))
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn read_bytes(response: Response) -> Result<Vec<u8>, ApiError> {
    let response = ensure_success(response).await?;
    response
        .binary()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_with_detail_is_verbatim() {
        let err = ApiError::from_status(404, "Not Found", r#"{"detail":"Invoice not found"}"#);
        assert_eq!(err.to_string(), "Invoice not found");
    }

    #[test]
    fn test_status_without_body_is_generic() {
        let err = ApiError::from_status(502, "Bad Gateway", "<html>oops</html>");
        assert_eq!(err.to_string(), "Erreur 502: Bad Gateway");

        let err = ApiError::from_status(500, "Internal Server Error", "");
        assert_eq!(err.to_string(), "Erreur 500: Internal Server Error");
    }

    #[test]
    fn test_network_error_hides_transport_detail() {
        let err = ApiError::Network("TypeError: Failed to fetch".to_string());
        assert_eq!(err.to_string(), "Impossible de contacter le serveur");
    }

    #[test]
    fn test_transport_failure_keeps_detail_for_logs() {
        let err = ApiError::from(gloo_net::Error::GlooError("connection refused".to_string()));
        match &err {
            ApiError::Network(detail) => assert!(detail.contains("connection refused")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.to_string(), "Impossible de contacter le serveur");
    }
}
