/// Claves de localStorage para la sesión persistida.
/// Invariante: se escriben y se limpian siempre juntas.
pub const STORAGE_KEY_AUTH_TOKEN: &str = "auth_token";
pub const STORAGE_KEY_AUTH_USERNAME: &str = "auth_username";

/// Rutas de la aplicación
pub const ROUTE_LOGIN: &str = "/login";
pub const ROUTE_SEARCH: &str = "/search";
pub const ROUTE_TICKER_PREFIX: &str = "/ticker/";
