use serde::{Deserialize, Serialize};

/// Respuesta de GET /api/stocks/<TICKER>/metrics, consumida por la vista de
/// detalle. Todos los campos numéricos son opcionales: el backend omite los
/// que no puede calcular.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TickerMetrics {
    pub ticker: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub valuation: Option<ValuationMetrics>,
    #[serde(default)]
    pub scorecard: Option<Scorecard>,
}

/// Métricas de valuación
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ValuationMetrics {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub pb_ratio: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
}

/// Scorecard de fundamentales (puntajes 0-100)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct Scorecard {
    #[serde(default)]
    pub profitability: Option<f64>,
    #[serde(default)]
    pub growth: Option<f64>,
    #[serde(default)]
    pub financial_health: Option<f64>,
    #[serde(default)]
    pub overall: Option<f64>,
}
