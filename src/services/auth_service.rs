use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};
use crate::services::ApiClient;

/// Login con username y password contra POST /auth/login.
/// El client todavía no lleva token: el login es el que lo obtiene.
pub async fn perform_login(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    let request_body = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    let body = serde_json::to_value(&request_body)
        .map_err(|e| ApiError::Network(format!("Serialization error: {}", e)))?;

    log::info!("🔐 Iniciando sesión para usuario: {}", username);

    client.post("/auth/login", Some(body)).await
}
