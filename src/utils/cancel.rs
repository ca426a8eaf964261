// ============================================================================
// CANCEL TOKEN - Cancelación cooperativa de requests
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

/// Token de cancelación cooperativa. Los clones comparten el mismo estado:
/// cancelar cualquiera de ellos dispara todos.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marcar el token como cancelado. Idempotente.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empieza_sin_cancelar() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn los_clones_comparten_estado() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn cancelar_es_idempotente() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }
}
