// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// Punto de entrada único hacia el backend: inyecta credenciales, construye
// query strings, normaliza errores y emite la señal de unauthorized.
// NO tiene lógica de negocio.
// ============================================================================

use std::rc::Rc;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::ApiErrorBody;
use crate::utils::CancelToken;

/// Método HTTP soportado por el cliente
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    fn builder(&self, url: &str) -> RequestBuilder {
        match self {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
            HttpMethod::Patch => Request::patch(url),
        }
    }
}

/// Opciones de un request
#[derive(Default)]
pub struct RequestOptions {
    /// Headers extra; pisan al Content-Type por defecto si lo repiten
    pub headers: Vec<(String, String)>,
    /// Body JSON (ignorado en GET: un GET nunca lleva body)
    pub body: Option<serde_json::Value>,
    /// Parámetros de query en orden; se percent-encodean al construir la URL
    pub params: Vec<(String, String)>,
    /// Token de cancelación cooperativa
    pub cancel_token: Option<CancelToken>,
}

/// Cliente API centralizado para requests autenticados al backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    on_unauthorized: Option<Rc<dyn Fn()>>,
}

impl ApiClient {
    /// Crear cliente con la URL base (se quita el slash final)
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            on_unauthorized: None,
        }
    }

    /// Configurar el bearer token a inyectar en cada request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Configurar el callback a invocar cuando el servidor devuelve 401
    pub fn with_on_unauthorized<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_unauthorized = Some(Rc::new(callback));
        self
    }

    /// Actualizar el token (p.ej. tras un login)
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Valor del header Authorization, si hay token configurado
    fn bearer_value(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }

    /// Construir el query string `?k1=v1&k2=v2` con percent-encoding.
    /// String vacío si no hay parámetros.
    fn build_query_string(params: &[(String, String)]) -> String {
        if params.is_empty() {
            return String::new();
        }

        let encoded: Vec<String> = params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();

        format!("?{}", encoded.join("&"))
    }

    fn build_url(&self, path: &str, params: &[(String, String)]) -> String {
        format!("{}{}{}", self.base_url, path, Self::build_query_string(params))
    }

    /// Hacer un request al backend y decodificar la respuesta JSON.
    ///
    /// Garantías de cancelación: si el token se dispara antes o durante el
    /// request, la operación falla con `Cancelled` y NO produce ningún otro
    /// efecto (ni `on_unauthorized`, ni otros errores).
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        if self.base_url.is_empty() {
            return Err(ApiError::Config("API base URL is not configured".to_string()));
        }

        let cancel = options.cancel_token.clone();
        if is_cancelled(&cancel) {
            return Err(ApiError::Cancelled);
        }

        let url = self.build_url(path, &options.params);
        let mut builder = method.builder(&url);

        // Content-Type JSON por defecto, sobreescribible desde options
        let overrides_content_type = options
            .headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
        if !overrides_content_type {
            builder = builder.header("Content-Type", "application/json");
        }
        for (name, value) in &options.headers {
            builder = builder.header(name, value);
        }
        if let Some(bearer) = self.bearer_value() {
            builder = builder.header("Authorization", &bearer);
        }

        let request = match (&options.body, method) {
            (Some(body), m) if m != HttpMethod::Get => builder
                .json(body)
                .map_err(|e| ApiError::Network(format!("Serialization error: {}", e)))?,
            _ => builder
                .build()
                .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?,
        };

        log::debug!("🌐 {} {}", method.as_str(), url);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                if is_cancelled(&cancel) {
                    return Err(ApiError::Cancelled);
                }
                return Err(ApiError::Network(e.to_string()));
            }
        };

        // Un request superado se descarta acá: la respuesta ya llegó pero no
        // debe producir efectos (ni unauthorized ni banner de error)
        if is_cancelled(&cancel) {
            return Err(ApiError::Cancelled);
        }

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        if response.status() == 401 {
            if let Some(ref on_unauthorized) = self.on_unauthorized {
                on_unauthorized();
            }
            return Err(ApiError::Unauthorized);
        }

        if !response.ok() {
            let synthesized = format!("HTTP {}: {}", response.status(), response.status_text());
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error.or(body.message).unwrap_or(synthesized),
                Err(_) => synthesized,
            };
            return Err(ApiError::Remote(message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Network(format!("Parse error: {}", e)))
    }

    /// GET con query params y cancelación
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(String, String)>,
        cancel_token: Option<CancelToken>,
    ) -> Result<T, ApiError> {
        self.request(
            HttpMethod::Get,
            path,
            RequestOptions {
                params,
                cancel_token,
                ..Default::default()
            },
        )
        .await
    }

    /// POST con body JSON opcional
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        self.request(
            HttpMethod::Post,
            path,
            RequestOptions {
                body,
                ..Default::default()
            },
        )
        .await
    }

    /// PUT con body JSON opcional
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        self.request(
            HttpMethod::Put,
            path,
            RequestOptions {
                body,
                ..Default::default()
            },
        )
        .await
    }

    /// DELETE sin body
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpMethod::Delete, path, RequestOptions::default())
            .await
    }

    /// PATCH con body JSON opcional
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        self.request(
            HttpMethod::Patch,
            path,
            RequestOptions {
                body,
                ..Default::default()
            },
        )
        .await
    }
}

fn is_cancelled(token: &Option<CancelToken>) -> bool {
    token.as_ref().map(|t| t.is_cancelled()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn quita_el_slash_final_de_la_base_url() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(
            client.build_url("/auth/login", &[]),
            "http://localhost:3000/auth/login"
        );
    }

    #[test]
    fn query_string_vacio_sin_parametros() {
        assert_eq!(ApiClient::build_query_string(&[]), "");
    }

    #[test]
    fn query_string_preserva_el_orden() {
        let query = ApiClient::build_query_string(&params(&[("q", "ap"), ("limit", "10")]));
        assert_eq!(query, "?q=ap&limit=10");
    }

    #[test]
    fn query_string_percent_encodea() {
        let query = ApiClient::build_query_string(&params(&[("q", "berkshire hathaway")]));
        assert_eq!(query, "?q=berkshire%20hathaway");

        let query = ApiClient::build_query_string(&params(&[("q", "s&p=500")]));
        assert_eq!(query, "?q=s%26p%3D500");
    }

    #[test]
    fn url_de_busqueda_completa() {
        let client = ApiClient::new("http://localhost:3000");
        let url = client.build_url(
            "/api/search/tickers",
            &params(&[("q", "ap"), ("limit", "10")]),
        );
        assert_eq!(url, "http://localhost:3000/api/search/tickers?q=ap&limit=10");
    }

    #[test]
    fn bearer_solo_con_token_configurado() {
        let without_token = ApiClient::new("http://localhost:3000");
        assert_eq!(without_token.bearer_value(), None);

        let with_token =
            ApiClient::new("http://localhost:3000").with_token(Some("abc123".to_string()));
        assert_eq!(with_token.bearer_value(), Some("Bearer abc123".to_string()));
    }
}
