use async_trait::async_trait;
use contracts::domain::a002_company::{CompanySearchResponse, CompanySearchResult};
use gloo_net::http::Request;

use crate::shared::config::AppConfig;
use crate::shared::http::{read_json, ApiError};

/// Public company registry
#[async_trait(?Send)]
pub trait CompanyDirectory {
    async fn search(&self, query: &str) -> Result<Vec<CompanySearchResult>, ApiError>;
}

/// `recherche-entreprises.api.gouv.fr` client
#[derive(Clone)]
pub struct RegistryDirectory {
    base_url: String,
    page_size: u32,
}

impl RegistryDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.company_search_url.clone(),
            page_size: config.company_search_page_size,
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}?q={}&per_page={}",
            self.base_url,
            urlencoding::encode(query),
            self.page_size
        )
    }
}

#[async_trait(?Send)]
impl CompanyDirectory for RegistryDirectory {
    async fn search(&self, query: &str) -> Result<Vec<CompanySearchResult>, ApiError> {
        let response = Request::get(&self.search_url(query))
            .header("Accept", "application/json")
            .send()
            .await?;
        let body: CompanySearchResponse = read_json(response).await?;
        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        let directory = RegistryDirectory::new(&AppConfig::default());
        assert_eq!(
            directory.search_url("boulangerie & fils"),
            "https://recherche-entreprises.api.gouv.fr/search?q=boulangerie%20%26%20fils&per_page=5"
        );
    }
}
