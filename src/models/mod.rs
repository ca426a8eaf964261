pub mod auth;
pub mod metrics;
pub mod search;

pub use auth::{ApiErrorBody, LoginRequest, LoginResponse, TokenClaims};
pub use metrics::{Scorecard, TickerMetrics, ValuationMetrics};
pub use search::{SearchResponse, SearchResult};
