use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub search_config: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Ventana de debounce del input de búsqueda (ms)
    pub debounce_ms: u32,
    /// Longitud mínima de query antes de emitir requests
    pub min_query_len: usize,
    /// Límite de resultados pedido al backend
    pub default_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 2,
            default_limit: 10,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:3000".to_string(),
            backend_url_production: "https://api.finedskywalker.com".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            search_config: SearchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .unwrap_or("http://localhost:3000").to_string(),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .unwrap_or("https://api.finedskywalker.com").to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            search_config: SearchConfig {
                debounce_ms: option_env!("SEARCH_DEBOUNCE_MS")
                    .unwrap_or("300").parse().unwrap_or(300),
                min_query_len: option_env!("SEARCH_MIN_QUERY_LEN")
                    .unwrap_or("2").parse().unwrap_or(2),
                default_limit: option_env!("SEARCH_DEFAULT_LIMIT")
                    .unwrap_or("10").parse().unwrap_or(10),
            },
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_de_busqueda() {
        let config = SearchConfig::default();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.min_query_len, 2);
        assert_eq!(config.default_limit, 10);
    }

    #[test]
    fn backend_url_segun_entorno() {
        let mut config = AppConfig::default();
        assert_eq!(config.backend_url(), config.backend_url_development);
        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), "https://api.finedskywalker.com");
    }
}
