// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use crate::state::SessionState;

/// Estado global de la aplicación. La reactividad vive en cada store: los
/// interesados se suscriben directamente (p.ej. `session.subscribe_to_changes`).
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
