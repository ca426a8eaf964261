// ============================================================================
// TICKER VIEWMODEL - DETALLE DE UN TICKER
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use crate::error::ApiError;
use crate::models::TickerMetrics;
use crate::services::{fetch_ticker_metrics, ApiClient};
use crate::utils::CancelToken;

/// Estado de la vista de detalle
#[derive(Clone, Debug, PartialEq)]
pub enum TickerState {
    Loading,
    Loaded(TickerMetrics),
    Errored(String),
}

/// ViewModel del detalle de un ticker
#[derive(Clone)]
pub struct TickerViewModel {
    api_client: ApiClient,
    state: Rc<RefCell<TickerState>>,
    active: Rc<RefCell<Option<CancelToken>>>,
    change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl TickerViewModel {
    pub fn new(api_client: ApiClient) -> Self {
        Self {
            api_client,
            state: Rc::new(RefCell::new(TickerState::Loading)),
            active: Rc::new(RefCell::new(None)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn get_state(&self) -> TickerState {
        self.state.borrow().clone()
    }

    fn set_state(&self, state: TickerState) {
        *self.state.borrow_mut() = state;
        self.notify_subscribers();
    }

    /// Cargar las métricas del ticker. Un load nuevo cancela al anterior.
    pub fn load(&self, ticker: &str) {
        self.cancel_active();

        let cancel = CancelToken::new();
        *self.active.borrow_mut() = Some(cancel.clone());
        self.set_state(TickerState::Loading);

        let vm = self.clone();
        let ticker = ticker.to_string();
        spawn_local(async move {
            let result = fetch_ticker_metrics(&vm.api_client, &ticker, Some(cancel.clone())).await;
            if cancel.is_cancelled() {
                return;
            }
            match result {
                Ok(metrics) => vm.apply_loaded(metrics),
                Err(e) => vm.apply_error(e),
            }
        });
    }

    fn apply_loaded(&self, metrics: TickerMetrics) {
        *self.active.borrow_mut() = None;
        self.set_state(TickerState::Loaded(metrics));
    }

    fn apply_error(&self, error: ApiError) {
        if error.is_cancelled() {
            return;
        }
        *self.active.borrow_mut() = None;
        log::error!("❌ Error cargando métricas: {}", error);
        self.set_state(TickerState::Errored(error.to_string()));
    }

    fn cancel_active(&self) {
        if let Some(cancel) = self.active.borrow_mut().take() {
            cancel.cancel();
        }
    }

    /// Cancelar la carga en vuelo (al salir de la vista)
    pub fn teardown(&self) {
        self.cancel_active();
    }

    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn notify_subscribers(&self) {
        for callback in self.change_subscribers.borrow().iter() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm() -> TickerViewModel {
        TickerViewModel::new(ApiClient::new("http://localhost:3000"))
    }

    fn metrics(ticker: &str) -> TickerMetrics {
        TickerMetrics {
            ticker: ticker.to_string(),
            company_name: Some("Apple Inc.".to_string()),
            valuation: None,
            scorecard: None,
        }
    }

    #[test]
    fn empieza_en_loading() {
        assert_eq!(vm().get_state(), TickerState::Loading);
    }

    #[test]
    fn aplicar_metricas_pasa_a_loaded() {
        let vm = vm();
        vm.apply_loaded(metrics("AAPL"));
        match vm.get_state() {
            TickerState::Loaded(m) => assert_eq!(m.ticker, "AAPL"),
            other => panic!("estado inesperado: {:?}", other),
        }
    }

    #[test]
    fn un_error_cancelado_no_toca_el_estado() {
        let vm = vm();
        vm.apply_error(ApiError::Cancelled);
        assert_eq!(vm.get_state(), TickerState::Loading);
    }

    #[test]
    fn un_error_real_pasa_a_errored() {
        let vm = vm();
        vm.apply_error(ApiError::Remote("Stock not found".to_string()));
        assert_eq!(
            vm.get_state(),
            TickerState::Errored("Stock not found".to_string())
        );
    }
}
