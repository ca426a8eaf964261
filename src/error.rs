// ============================================================================
// ERROR - Errores normalizados del cliente HTTP
// ============================================================================

use thiserror::Error;

/// Errores que puede producir el cliente HTTP. Los llamadores despachan por
/// variante: `Cancelled` se descarta en silencio, `Unauthorized` desmonta la
/// sesión y redirige a login, el resto se muestra como banner de error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Cancelación cooperativa de un request superado por otro más nuevo
    #[error("request cancelled")]
    Cancelled,

    /// 401 del servidor: sesión expirada o token inválido
    #[error("Unauthorized: session expired or invalid token")]
    Unauthorized,

    /// Respuesta no-2xx (distinta de 401) con mensaje derivado del body
    #[error("{0}")]
    Remote(String),

    /// Fallo de transporte o body 2xx que no decodifica
    #[error("Network error: {0}")]
    Network(String),

    /// Falta la URL base u otra configuración al momento del request
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_muestra_solo_el_mensaje() {
        let err = ApiError::Remote("HTTP 500: Internal Server Error".to_string());
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn solo_cancelled_es_cancelled() {
        assert!(ApiError::Cancelled.is_cancelled());
        assert!(!ApiError::Unauthorized.is_cancelled());
        assert!(!ApiError::Network("x".into()).is_cancelled());
    }
}
