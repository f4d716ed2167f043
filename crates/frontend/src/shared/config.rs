//! Client configuration
//!
//! Defaults are compiled in. A page may override any field with an inline
//! JSON block: `<script id="app-config" type="application/json">{...}</script>`.

use serde::Deserialize;

const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix of backend routes; empty means same origin
    pub api_base: String,
    pub company_search_url: String,
    pub company_search_page_size: u32,
    /// Minimum trimmed query length before a search is scheduled
    pub company_search_min_chars: usize,
    pub search_debounce_ms: u32,
    pub success_dismiss_ms: u32,
    pub post_upload_navigation_ms: u32,
    pub default_iban: String,
    pub default_country_code: String,
    pub default_payment_mode: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            company_search_url: "https://recherche-entreprises.api.gouv.fr/search".to_string(),
            company_search_page_size: 5,
            company_search_min_chars: 3,
            search_debounce_ms: 300,
            success_dismiss_ms: 5000,
            post_upload_navigation_ms: 500,
            default_iban: "FR7630006000011234567890189".to_string(),
            default_country_code: "FR".to_string(),
            default_payment_mode: "58".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the inline override block, falling back to defaults
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(text) if !text.trim().is_empty() => Self::from_json(&text).unwrap_or_else(|e| {
                log::warn!("Invalid #{} block, using defaults: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }),
            _ => {
                log::debug!("Using default embedded configuration");
                Self::default()
            }
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Full URL of a backend route, e.g. `api_url("/invoices")`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config =
            AppConfig::from_json(r#"{"api_base":"http://localhost:8000/","search_debounce_ms":150}"#)
                .unwrap();
        assert_eq!(config.search_debounce_ms, 150);
        assert_eq!(config.success_dismiss_ms, 5000);
        assert_eq!(config.api_url("/invoices"), "http://localhost:8000/invoices");
    }

    #[test]
    fn test_same_origin_by_default() {
        let config = AppConfig::default();
        assert_eq!(config.api_url("/invoices/upload"), "/invoices/upload");
        assert_eq!(config.company_search_min_chars, 3);
    }
}
