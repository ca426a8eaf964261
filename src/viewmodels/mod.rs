// ============================================================================
// VIEWMODELS - Lógica de presentación
// ============================================================================

pub mod search_viewmodel;
pub mod ticker_viewmodel;

pub use search_viewmodel::{SearchState, SearchViewModel};
pub use ticker_viewmodel::{TickerState, TickerViewModel};
