// ============================================================================
// SEARCH VIEWMODEL - PIPELINE DE BÚSQUEDA DE TICKERS
// ============================================================================
// Coordina debounce, cancelación y supresión de respuestas viejas.
// Invariante central: solo el request ACTIVO puede tocar el estado; todo
// request superado se descarta sin efectos visibles.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::SearchResult;
use crate::services::SearchService;
use crate::utils::{CancelToken, Debouncer};

/// Estado visible del pipeline de búsqueda
#[derive(Clone, Debug, PartialEq)]
pub enum SearchState {
    /// Sin query (o query demasiado corta)
    Idle,
    /// Query tipeada, esperando que venza el debounce
    Debouncing { query: String },
    /// Request en vuelo
    Loading { query: String },
    /// Resultados en pantalla
    Showing {
        query: String,
        results: Vec<SearchResult>,
    },
    /// El servidor respondió sin resultados
    Empty { query: String },
    /// El request activo falló
    Errored { query: String, message: String },
}

/// Request en vuelo: su generación y el token para cancelarlo
struct ActiveRequest {
    generation: u64,
    cancel: CancelToken,
}

/// ViewModel de búsqueda
#[derive(Clone)]
pub struct SearchViewModel {
    service: SearchService,
    state: Rc<RefCell<SearchState>>,
    debouncer: Debouncer,
    /// Generación monótona: cada dispatch la incrementa, y una respuesta
    /// solo aplica si su generación sigue siendo la última
    generation: Rc<Cell<u64>>,
    active: Rc<RefCell<Option<ActiveRequest>>>,
    change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl SearchViewModel {
    pub fn new(service: SearchService) -> Self {
        Self {
            service,
            state: Rc::new(RefCell::new(SearchState::Idle)),
            debouncer: Debouncer::new(CONFIG.search_config.debounce_ms),
            generation: Rc::new(Cell::new(0)),
            active: Rc::new(RefCell::new(None)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn get_state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    fn set_state(&self, state: SearchState) {
        *self.state.borrow_mut() = state;
        self.notify_subscribers();
    }

    /// El usuario tipeó: resetear el debounce y, si la query es demasiado
    /// corta, apagar todo el pipeline (timer pendiente y request en vuelo).
    pub fn on_input(&self, query: &str) {
        let query = query.trim().to_string();

        if query.chars().count() < CONFIG.search_config.min_query_len {
            self.debouncer.cancel();
            self.cancel_active();
            self.set_state(SearchState::Idle);
            return;
        }

        self.note_pending(&query);

        let vm = self.clone();
        self.debouncer.schedule(move || {
            vm.dispatch(query);
        });
    }

    /// Registrar la query nueva como pendiente. El request en vuelo queda
    /// superado desde esta tecla, no recién al despachar: su respuesta ya no
    /// puede pisar la query que el usuario sigue tipeando.
    fn note_pending(&self, query: &str) {
        self.cancel_active();
        self.set_state(SearchState::Debouncing {
            query: query.to_string(),
        });
    }

    /// Preparar un nuevo request: cancelar el anterior, avanzar la
    /// generación y registrar el token activo. Separado de `dispatch`
    /// para poder ejercitarlo sin navegador.
    fn begin_request(&self, query: &str) -> (u64, CancelToken) {
        self.cancel_active();

        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let cancel = CancelToken::new();
        *self.active.borrow_mut() = Some(ActiveRequest {
            generation,
            cancel: cancel.clone(),
        });

        self.set_state(SearchState::Loading {
            query: query.to_string(),
        });

        (generation, cancel)
    }

    /// Lanzar el request real (venció el debounce)
    fn dispatch(&self, query: String) {
        let (generation, cancel) = self.begin_request(&query);

        log::debug!("🔎 Buscando tickers: '{}' (gen {})", query, generation);

        let vm = self.clone();
        let limit = CONFIG.search_config.default_limit;
        spawn_local(async move {
            let result = vm
                .service
                .search_tickers(&query, limit, Some(cancel))
                .await;
            match result {
                Ok(results) => vm.handle_results(generation, &query, results),
                Err(e) => vm.handle_error(generation, &query, e),
            }
        });
    }

    /// Aplicar resultados SOLO si vienen del request activo
    fn handle_results(&self, generation: u64, query: &str, results: Vec<SearchResult>) {
        if !self.take_if_active(generation) {
            log::debug!("🗑️ Respuesta superada descartada (gen {})", generation);
            return;
        }

        if results.is_empty() {
            self.set_state(SearchState::Empty {
                query: query.to_string(),
            });
        } else {
            self.set_state(SearchState::Showing {
                query: query.to_string(),
                results,
            });
        }
    }

    /// Aplicar un error SOLO si viene del request activo. Las cancelaciones
    /// nunca llegan a la UI.
    fn handle_error(&self, generation: u64, query: &str, error: ApiError) {
        if error.is_cancelled() {
            return;
        }

        if !self.take_if_active(generation) {
            return;
        }

        log::error!("❌ Búsqueda fallida para '{}': {}", query, error);
        self.set_state(SearchState::Errored {
            query: query.to_string(),
            message: error.to_string(),
        });
    }

    /// Consumir el registro activo si la generación coincide y el token no
    /// fue disparado. Devuelve false para cualquier respuesta superada.
    fn take_if_active(&self, generation: u64) -> bool {
        let mut active = self.active.borrow_mut();
        let is_active = matches!(
            active.as_ref(),
            Some(request) if request.generation == generation && !request.cancel.is_cancelled()
        );
        if is_active {
            *active = None;
        }
        is_active
    }

    fn cancel_active(&self) {
        if let Some(request) = self.active.borrow_mut().take() {
            request.cancel.cancel();
        }
    }

    /// Apagar el pipeline entero (al salir de la vista de búsqueda)
    pub fn teardown(&self) {
        self.debouncer.cancel();
        self.cancel_active();
        self.set_state(SearchState::Idle);
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
    use crate::services::ApiClient;

    fn vm() -> SearchViewModel {
        SearchViewModel::new(SearchService::new(ApiClient::new("http://localhost:3000")))
    }

    fn result(ticker: &str, name: &str) -> SearchResult {
        SearchResult {
            ticker: ticker.to_string(),
            company_name: name.to_string(),
        }
    }

    #[test]
    fn un_nuevo_request_cancela_al_anterior() {
        let vm = vm();
        let (gen_a, cancel_a) = vm.begin_request("ap");
        let (gen_b, cancel_b) = vm.begin_request("app");

        assert!(cancel_a.is_cancelled());
        assert!(!cancel_b.is_cancelled());
        assert!(gen_b > gen_a);
    }

    #[test]
    fn seguir_tipeando_supersede_al_request_en_vuelo() {
        let vm = vm();
        let (gen_a, cancel_a) = vm.begin_request("ap");

        // El usuario siguió tipeando: la query nueva todavía está en su
        // ventana de debounce cuando llega la respuesta vieja
        vm.note_pending("app");
        assert!(cancel_a.is_cancelled());

        vm.handle_results(gen_a, "ap", vec![result("APO", "Apollo Global")]);
        assert_eq!(
            vm.get_state(),
            SearchState::Debouncing {
                query: "app".to_string()
            }
        );
    }

    #[test]
    fn la_respuesta_superada_no_pisa_a_la_nueva() {
        let vm = vm();
        let (gen_a, _cancel_a) = vm.begin_request("ap");
        let (gen_b, _cancel_b) = vm.begin_request("app");

        // La respuesta vieja llega DESPUÉS de lanzado el request nuevo
        vm.handle_results(gen_a, "ap", vec![result("APO", "Apollo Global")]);
        assert_eq!(
            vm.get_state(),
            SearchState::Loading {
                query: "app".to_string()
            }
        );

        vm.handle_results(gen_b, "app", vec![result("AAPL", "Apple Inc.")]);
        match vm.get_state() {
            SearchState::Showing { query, results } => {
                assert_eq!(query, "app");
                assert_eq!(results[0].ticker, "AAPL");
            }
            other => panic!("estado inesperado: {:?}", other),
        }
    }

    #[test]
    fn la_respuesta_vieja_tampoco_pisa_resultados_ya_mostrados() {
        let vm = vm();
        let (gen_a, _) = vm.begin_request("ap");
        let (gen_b, _) = vm.begin_request("app");

        vm.handle_results(gen_b, "app", vec![result("AAPL", "Apple Inc.")]);
        vm.handle_results(gen_a, "ap", vec![result("APO", "Apollo Global")]);

        match vm.get_state() {
            SearchState::Showing { results, .. } => assert_eq!(results[0].ticker, "AAPL"),
            other => panic!("estado inesperado: {:?}", other),
        }
    }

    #[test]
    fn resultados_vacios_del_request_activo_dan_empty() {
        let vm = vm();
        let (generation, _) = vm.begin_request("zz");
        vm.handle_results(generation, "zz", Vec::new());

        assert_eq!(
            vm.get_state(),
            SearchState::Empty {
                query: "zz".to_string()
            }
        );
    }

    #[test]
    fn el_error_del_request_activo_se_muestra() {
        let vm = vm();
        let (generation, _) = vm.begin_request("ap");
        vm.handle_error(generation, "ap", ApiError::Remote("Search failed".to_string()));

        assert_eq!(
            vm.get_state(),
            SearchState::Errored {
                query: "ap".to_string(),
                message: "Search failed".to_string()
            }
        );
    }

    #[test]
    fn el_error_de_un_request_superado_se_descarta() {
        let vm = vm();
        let (gen_a, _) = vm.begin_request("ap");
        let (_gen_b, _) = vm.begin_request("app");

        vm.handle_error(gen_a, "ap", ApiError::Network("connection refused".to_string()));
        assert_eq!(
            vm.get_state(),
            SearchState::Loading {
                query: "app".to_string()
            }
        );
    }

    #[test]
    fn las_cancelaciones_nunca_llegan_a_la_ui() {
        let vm = vm();
        let (generation, cancel) = vm.begin_request("ap");
        cancel.cancel();

        vm.handle_error(generation, "ap", ApiError::Cancelled);
        assert_eq!(
            vm.get_state(),
            SearchState::Loading {
                query: "ap".to_string()
            }
        );
    }

    #[test]
    fn un_token_disparado_bloquea_la_respuesta_aunque_la_generacion_coincida() {
        let vm = vm();
        let (generation, cancel) = vm.begin_request("ap");
        cancel.cancel();

        vm.handle_results(generation, "ap", vec![result("APO", "Apollo Global")]);
        assert_eq!(
            vm.get_state(),
            SearchState::Loading {
                query: "ap".to_string()
            }
        );
    }

    #[test]
    fn teardown_cancela_el_request_en_vuelo() {
        let vm = vm();
        let (generation, cancel) = vm.begin_request("ap");
        vm.teardown();

        assert!(cancel.is_cancelled());
        assert_eq!(vm.get_state(), SearchState::Idle);

        // Si la respuesta llega después del teardown, se descarta
        vm.handle_results(generation, "ap", vec![result("APO", "Apollo Global")]);
        assert_eq!(vm.get_state(), SearchState::Idle);
    }
}
