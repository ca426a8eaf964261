use crate::error::ApiError;
use crate::models::TickerMetrics;
use crate::services::ApiClient;
use crate::utils::CancelToken;

/// Obtener las métricas de valuación y scorecard para un ticker
pub async fn fetch_ticker_metrics(
    client: &ApiClient,
    ticker: &str,
    cancel_token: Option<CancelToken>,
) -> Result<TickerMetrics, ApiError> {
    let path = format!("/api/stocks/{}/metrics", ticker.to_uppercase());

    log::info!("📈 Obteniendo métricas para {}", ticker);

    client.get(&path, Vec::new(), cancel_token).await
}
