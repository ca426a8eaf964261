use serde::{Deserialize, Serialize};

/// Un resultado de búsqueda de tickers. Valor inmutable.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SearchResult {
    pub ticker: String,
    pub company_name: String,
}

/// Respuesta de GET /api/search/tickers
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializa_respuesta_del_backend() {
        let json = r#"{
            "query": "ap",
            "results": [
                {"ticker": "AAPL", "company_name": "Apple Inc."},
                {"ticker": "APO", "company_name": "Apollo Global"}
            ],
            "total": 2
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(response.query, "ap");
        assert_eq!(response.total, 2);
        assert_eq!(response.results[0].ticker, "AAPL");
        assert_eq!(response.results[1].company_name, "Apollo Global");
    }
}
