// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Decide qué vista renderizar según la ruta y el estado de sesión. Los
// viewmodels con estado (búsqueda, detalle) se crean al entrar a su vista
// y se apagan con teardown() al salir, para que no queden requests ni
// timers vivos de una vista abandonada.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::services::{authed_client, SearchService};
use crate::state::AppState;
use crate::utils::{current_path, ROUTE_LOGIN, ROUTE_TICKER_PREFIX};
use crate::viewmodels::{SearchViewModel, TickerViewModel};
use crate::views::{render_login, render_search, render_ticker_details};

/// Aplicación principal
pub struct App {
    state: AppState,
    search_vm: Rc<RefCell<Option<SearchViewModel>>>,
    ticker_vm: Rc<RefCell<Option<(String, TickerViewModel)>>>,
    root: Element,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // Protocolo de arranque: restaurar sesión persistida (o redirigir
        // a login si no hay nada válido)
        state.session.initialize();

        // Re-renderizar ante cambios de sesión, batcheado con un Timeout(0)
        // para colapsar múltiples updates en un solo render
        state.session.subscribe_to_changes(move || {
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self {
            state,
            search_vm: Rc::new(RefCell::new(None)),
            ticker_vm: Rc::new(RefCell::new(None)),
            root,
        })
    }

    /// Renderizar aplicación completa según la ruta actual
    pub fn render(&mut self) -> Result<(), JsValue> {
        let path = current_path();
        log::debug!("🎬 Renderizando ruta: {}", path);

        let view = if path == ROUTE_LOGIN {
            self.teardown_search();
            self.teardown_ticker();
            render_login(&self.state)?
        } else if !self.state.session.is_authenticated() {
            // Guard de rutas: sin sesión válida solo existe el login
            self.teardown_search();
            self.teardown_ticker();
            render_login(&self.state)?
        } else if let Some(ticker) = path.strip_prefix(ROUTE_TICKER_PREFIX) {
            self.teardown_search();
            let vm = self.ticker_vm_for(&ticker.to_uppercase());
            render_ticker_details(&self.state, &vm, &ticker.to_uppercase())?
        } else {
            // Ruta por defecto: búsqueda
            self.teardown_ticker();
            let vm = self.search_vm();
            render_search(&self.state, &vm)?
        };

        set_inner_html(&self.root, "");
        append_child(&self.root, &view)?;

        Ok(())
    }

    /// Viewmodel de búsqueda: se crea al entrar a /search y sobrevive a los
    /// re-renders de la propia vista (conserva debounce y request activo)
    fn search_vm(&self) -> SearchViewModel {
        let mut slot = self.search_vm.borrow_mut();
        if let Some(ref vm) = *slot {
            return vm.clone();
        }

        let service = SearchService::new(authed_client(&self.state.session));
        let vm = SearchViewModel::new(service);

        // Actualización incremental: las notificaciones del pipeline solo
        // tocan el panel de resultados, nunca el input (preserva el foco)
        let vm_for_update = vm.clone();
        vm.subscribe_to_changes(move || {
            use gloo_timers::callback::Timeout;
            let vm = vm_for_update.clone();
            Timeout::new(0, move || {
                crate::views::search::update_results_panel(&vm);
            })
            .forget();
        });

        *slot = Some(vm.clone());
        vm
    }

    /// Viewmodel de detalle para un ticker. Cambiar de ticker apaga la
    /// carga anterior y arranca una nueva.
    fn ticker_vm_for(&self, ticker: &str) -> TickerViewModel {
        let mut slot = self.ticker_vm.borrow_mut();
        if let Some((ref current, ref vm)) = *slot {
            if current == ticker {
                return vm.clone();
            }
            vm.teardown();
        }

        let vm = TickerViewModel::new(authed_client(&self.state.session));
        vm.subscribe_to_changes(move || {
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });
        vm.load(ticker);

        *slot = Some((ticker.to_string(), vm.clone()));
        vm
    }

    fn teardown_search(&self) {
        if let Some(vm) = self.search_vm.borrow_mut().take() {
            vm.teardown();
        }
    }

    fn teardown_ticker(&self) {
        if let Some((_, vm)) = self.ticker_vm.borrow_mut().take() {
            vm.teardown();
        }
    }
}
