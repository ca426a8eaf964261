use serde::{Deserialize, Serialize};

/// Body de POST /auth/login
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Respuesta de login exitoso
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body de error que devuelve el backend en respuestas no-2xx
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Claims del payload JWT que el cliente consume.
/// Solo `exp` es requerido por el contrato; el resto se ignora.
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct TokenClaims {
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub sub: Option<String>,
}
