pub mod api_client;
pub mod auth_service;
pub mod metrics_service;
pub mod search_service;

pub use api_client::{ApiClient, HttpMethod, RequestOptions};
pub use auth_service::perform_login;
pub use metrics_service::fetch_ticker_metrics;
pub use search_service::SearchService;

use crate::config::CONFIG;
use crate::state::SessionState;
use crate::utils::{navigate_to, ROUTE_LOGIN};

/// Construir el ApiClient estándar de la app: token de la sesión actual y
/// señal de unauthorized cableada a logout + redirección a login.
pub fn authed_client(session: &SessionState) -> ApiClient {
    let session_for_callback = session.clone();
    ApiClient::new(CONFIG.backend_url())
        .with_token(session.get_token())
        .with_on_unauthorized(move || {
            log::warn!("🚪 401 del servidor: cerrando sesión y redirigiendo a login");
            session_for_callback.logout();
            navigate_to(ROUTE_LOGIN);
        })
}
