// ============================================================================
// DEBOUNCE - Colapsa ráfagas de llamadas en un único disparo diferido
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Debouncer sobre `gloo_timers::callback::Timeout`.
///
/// Cada `schedule` reemplaza (y cancela) el timer pendiente anterior, de modo
/// que solo la última llamada dentro de la ventana llega a dispararse.
/// `cancel` limpia el timer pendiente sin dispararlo; un `schedule` posterior
/// abre una ventana nueva. Con delay 0 el disparo sigue siendo diferido al
/// siguiente tick (Timeout nunca es síncrono).
///
/// Los clones comparten el mismo timer pendiente.
#[derive(Clone)]
pub struct Debouncer {
    delay_ms: u32,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Programar `f` tras la ventana de inactividad, cancelando cualquier
    /// disparo aún pendiente.
    pub fn schedule<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        let pending = self.pending.clone();
        let timeout = Timeout::new(self.delay_ms, move || {
            // Limpiar antes de disparar: f puede volver a programar
            pending.borrow_mut().take();
            f();
        });

        if let Some(previous) = self.pending.borrow_mut().replace(timeout) {
            previous.cancel();
        }
    }

    /// Cancelar el disparo pendiente (si lo hay) sin invocarlo
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.borrow_mut().take() {
            pending.cancel();
        }
    }
}

// Los timers necesitan el event loop del navegador: estos tests corren con
// `wasm-pack test`, no con cargo test nativo
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn una_rafaga_dispara_una_sola_vez_con_el_ultimo_valor() {
        let fired: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let debouncer = Debouncer::new(20);

        for query in ["a", "ap", "app"] {
            let fired = fired.clone();
            debouncer.schedule(move || fired.borrow_mut().push(query.to_string()));
        }

        TimeoutFuture::new(80).await;
        assert_eq!(*fired.borrow(), vec!["app".to_string()]);
    }

    #[wasm_bindgen_test]
    async fn cancel_evita_el_disparo_pendiente() {
        let fired = Rc::new(RefCell::new(0u32));
        let debouncer = Debouncer::new(20);

        {
            let fired = fired.clone();
            debouncer.schedule(move || *fired.borrow_mut() += 1);
        }
        debouncer.cancel();

        TimeoutFuture::new(80).await;
        assert_eq!(*fired.borrow(), 0);
    }

    #[wasm_bindgen_test]
    async fn schedule_despues_de_cancel_abre_ventana_nueva() {
        let fired = Rc::new(RefCell::new(0u32));
        let debouncer = Debouncer::new(20);

        {
            let fired = fired.clone();
            debouncer.schedule(move || *fired.borrow_mut() += 1);
        }
        debouncer.cancel();
        {
            let fired = fired.clone();
            debouncer.schedule(move || *fired.borrow_mut() += 1);
        }

        TimeoutFuture::new(80).await;
        assert_eq!(*fired.borrow(), 1);
    }
}
