use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::{SearchResponse, SearchResult};
use crate::services::ApiClient;
use crate::utils::CancelToken;

/// Servicio de búsqueda de tickers sobre el ApiClient
#[derive(Clone)]
pub struct SearchService {
    api_client: ApiClient,
}

impl SearchService {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    /// Buscar tickers por símbolo o nombre de empresa.
    ///
    /// Queries más cortas que el mínimo configurado devuelven vacío SIN
    /// emitir request. Los errores pasan sin transformar (incluido
    /// `Cancelled`, que el coordinador descarta en silencio).
    pub async fn search_tickers(
        &self,
        query: &str,
        limit: u32,
        cancel_token: Option<CancelToken>,
    ) -> Result<Vec<SearchResult>, ApiError> {
        if query.chars().count() < CONFIG.search_config.min_query_len {
            return Ok(Vec::new());
        }

        let response: SearchResponse = self
            .api_client
            .get(
                "/api/search/tickers",
                vec![
                    ("q".to_string(), query.to_string()),
                    ("limit".to_string(), limit.to_string()),
                ],
                cancel_token,
            )
            .await?;

        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // La quiescencia de queries cortas no depende del navegador: nunca se
    // llega a emitir el request
    #[test]
    fn query_corta_devuelve_vacio_sin_request() {
        let service = SearchService::new(ApiClient::new("http://localhost:3000"));
        let result = futures::executor::block_on(service.search_tickers("a", 10, None));
        assert_eq!(result.expect("sin error"), Vec::new());
    }

    #[test]
    fn query_vacia_devuelve_vacio() {
        let service = SearchService::new(ApiClient::new("http://localhost:3000"));
        let result = futures::executor::block_on(service.search_tickers("", 10, None));
        assert!(result.expect("sin error").is_empty());
    }
}
