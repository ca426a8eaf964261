// ============================================================================
// SESSION STATE - Estado de sesión autenticada
// ============================================================================
// Dueño único del token y el username. Persiste en localStorage y valida
// la expiración del JWT tanto al arrancar como ante cada consulta.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::utils::{
    current_path, get_string, is_token_valid, navigate_to, now_ms, remove_key, set_string,
    ROUTE_LOGIN, STORAGE_KEY_AUTH_TOKEN, STORAGE_KEY_AUTH_USERNAME,
};

/// Resultado de aplicar las credenciales persistidas al arrancar
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartupOutcome {
    /// Token válido: la sesión quedó poblada
    Restored,
    /// No había nada persistido, o el token estaba expirado/corrupto
    NotAuthenticated,
}

/// Estado de sesión
#[derive(Clone)]
pub struct SessionState {
    pub token: Rc<RefCell<Option<String>>>,
    pub username: Rc<RefCell<Option<String>>>,
    /// true recién después del protocolo de arranque; mientras sea false
    /// los cambios NO se persisten (evita pisar el storage con el estado
    /// vacío inicial)
    pub loaded: Rc<Cell<bool>>,
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl SessionState {
    /// Crear nuevo estado de sesión (vacío, sin cargar)
    pub fn new() -> Self {
        Self {
            token: Rc::new(RefCell::new(None)),
            username: Rc::new(RefCell::new(None)),
            loaded: Rc::new(Cell::new(false)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Obtener token
    pub fn get_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Obtener username
    pub fn get_username(&self) -> Option<String> {
        self.username.borrow().clone()
    }

    /// ¿El protocolo de arranque ya corrió?
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// ¿Hay sesión válida en el instante `at_ms`?
    /// Un token expirado cuenta como NO autenticado aunque siga en memoria.
    pub fn is_authenticated_at(&self, at_ms: f64) -> bool {
        match self.token.borrow().as_ref() {
            Some(token) => is_token_valid(token, at_ms),
            None => false,
        }
    }

    /// ¿Hay sesión válida ahora?
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(now_ms())
    }

    /// Núcleo del protocolo de arranque, separado del storage para poder
    /// probarlo: decide si las credenciales persistidas siguen sirviendo.
    ///
    /// Cualquier token inválido (expirado, corrupto, o token sin username)
    /// se descarta entero: nunca queda una sesión a medias.
    pub fn apply_persisted(
        &self,
        stored_token: Option<String>,
        stored_username: Option<String>,
        at_ms: f64,
    ) -> StartupOutcome {
        let outcome = match (stored_token, stored_username) {
            (Some(token), Some(username)) if is_token_valid(&token, at_ms) => {
                *self.token.borrow_mut() = Some(token);
                *self.username.borrow_mut() = Some(username);
                StartupOutcome::Restored
            }
            (None, None) => StartupOutcome::NotAuthenticated,
            _ => {
                log::warn!("⚠️ Credenciales persistidas inválidas o expiradas: descartando");
                self.clear_persisted();
                StartupOutcome::NotAuthenticated
            }
        };

        self.loaded.set(true);
        outcome
    }

    /// Protocolo de arranque: leer storage, validar, y redirigir a login si
    /// no hay sesión (salvo que ya estemos en /login).
    pub fn initialize(&self) {
        let stored_token = get_string(STORAGE_KEY_AUTH_TOKEN);
        let stored_username = get_string(STORAGE_KEY_AUTH_USERNAME);

        match self.apply_persisted(stored_token, stored_username, now_ms()) {
            StartupOutcome::Restored => {
                log::info!(
                    "✅ Sesión restaurada para: {}",
                    self.get_username().unwrap_or_default()
                );
            }
            StartupOutcome::NotAuthenticated => {
                if current_path() != ROUTE_LOGIN {
                    log::info!("🔒 Sin sesión válida: redirigiendo a login");
                    navigate_to(ROUTE_LOGIN);
                }
            }
        }

        self.notify_subscribers();
    }

    /// Establecer la sesión tras un login exitoso. Token y username se
    /// actualizan juntos, en memoria y en storage.
    pub fn login(&self, token: String, username: String) {
        *self.token.borrow_mut() = Some(token.clone());
        *self.username.borrow_mut() = Some(username.clone());

        if self.loaded.get() {
            if let Err(e) = set_string(STORAGE_KEY_AUTH_TOKEN, &token) {
                log::error!("❌ Error guardando token en storage: {}", e);
            }
            if let Err(e) = set_string(STORAGE_KEY_AUTH_USERNAME, &username) {
                log::error!("❌ Error guardando username en storage: {}", e);
            }
        }

        log::info!("✅ Sesión iniciada para: {}", username);
        self.notify_subscribers();
    }

    /// Cerrar sesión: limpiar memoria y las DOS claves persistidas juntas.
    /// Antes del arranque el storage no se toca, igual que en `login`.
    pub fn logout(&self) {
        *self.token.borrow_mut() = None;
        *self.username.borrow_mut() = None;
        if self.loaded.get() {
            self.clear_persisted();
        }

        log::info!("👋 Sesión cerrada");
        self.notify_subscribers();
    }

    fn clear_persisted(&self) {
        if let Err(e) = remove_key(STORAGE_KEY_AUTH_TOKEN) {
            log::error!("❌ Error limpiando token del storage: {}", e);
        }
        if let Err(e) = remove_key(STORAGE_KEY_AUTH_USERNAME) {
            log::error!("❌ Error limpiando username del storage: {}", e);
        }
    }

    /// Suscribirse a cambios de sesión
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers
    pub fn notify_subscribers(&self) {
        for callback in self.change_subscribers.borrow().iter() {
            callback();
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::test_support::make_token;
    use std::cell::Cell;

    const NOW: f64 = 1_700_000_000_000.0;

    fn future_token() -> String {
        make_token(Some(1_700_000_000 + 3_600))
    }

    fn expired_token() -> String {
        make_token(Some(1_700_000_000 - 3_600))
    }

    #[test]
    fn arranque_con_token_valido_restaura_la_sesion() {
        let session = SessionState::new();
        let outcome = session.apply_persisted(
            Some(future_token()),
            Some("maria".to_string()),
            NOW,
        );

        assert_eq!(outcome, StartupOutcome::Restored);
        assert_eq!(session.get_username(), Some("maria".to_string()));
        assert!(session.is_authenticated_at(NOW));
        assert!(session.is_loaded());
    }

    #[test]
    fn arranque_con_token_expirado_descarta_todo() {
        let session = SessionState::new();
        let outcome = session.apply_persisted(
            Some(expired_token()),
            Some("maria".to_string()),
            NOW,
        );

        assert_eq!(outcome, StartupOutcome::NotAuthenticated);
        assert_eq!(session.get_token(), None);
        assert_eq!(session.get_username(), None);
        assert!(session.is_loaded());
    }

    #[test]
    fn arranque_con_token_corrupto_descarta_todo() {
        let session = SessionState::new();
        let outcome = session.apply_persisted(
            Some("no-es-un-jwt".to_string()),
            Some("maria".to_string()),
            NOW,
        );

        assert_eq!(outcome, StartupOutcome::NotAuthenticated);
        assert!(!session.is_authenticated_at(NOW));
    }

    #[test]
    fn arranque_sin_username_no_deja_sesion_a_medias() {
        let session = SessionState::new();
        let outcome = session.apply_persisted(Some(future_token()), None, NOW);

        assert_eq!(outcome, StartupOutcome::NotAuthenticated);
        assert_eq!(session.get_token(), None);
    }

    #[test]
    fn arranque_sin_nada_persistido() {
        let session = SessionState::new();
        let outcome = session.apply_persisted(None, None, NOW);

        assert_eq!(outcome, StartupOutcome::NotAuthenticated);
        assert!(session.is_loaded());
    }

    #[test]
    fn token_expirado_en_memoria_no_cuenta_como_autenticado() {
        let session = SessionState::new();
        session.apply_persisted(None, None, NOW);
        session.login(future_token(), "maria".to_string());

        assert!(session.is_authenticated_at(NOW));
        // Una hora y un segundo después el mismo token ya expiró
        assert!(!session.is_authenticated_at(NOW + 3_601_000.0));
    }

    #[test]
    fn login_y_logout_actualizan_memoria() {
        let session = SessionState::new();
        session.apply_persisted(None, None, NOW);

        session.login(future_token(), "maria".to_string());
        assert_eq!(session.get_username(), Some("maria".to_string()));

        session.logout();
        assert_eq!(session.get_token(), None);
        assert_eq!(session.get_username(), None);
        assert!(!session.is_authenticated_at(NOW));
    }

    #[test]
    fn logout_antes_del_arranque_solo_toca_memoria() {
        let session = SessionState::new();
        session.login(future_token(), "maria".to_string());

        // Sin arranque previo: logout limpia memoria pero no escribe storage
        session.logout();
        assert_eq!(session.get_token(), None);
        assert_eq!(session.get_username(), None);
        assert!(!session.is_loaded());
    }

    #[test]
    fn los_subscribers_se_notifican_en_login_y_logout() {
        let session = SessionState::new();
        session.apply_persisted(None, None, NOW);

        let notified = Rc::new(Cell::new(0u32));
        let notified_clone = notified.clone();
        session.subscribe_to_changes(move || {
            notified_clone.set(notified_clone.get() + 1);
        });

        session.login(future_token(), "maria".to_string());
        session.logout();

        assert_eq!(notified.get(), 2);
    }

    #[test]
    fn los_clones_comparten_la_sesion() {
        let session = SessionState::new();
        session.apply_persisted(None, None, NOW);

        let clone = session.clone();
        clone.login(future_token(), "maria".to_string());

        assert_eq!(session.get_username(), Some("maria".to_string()));
    }
}
