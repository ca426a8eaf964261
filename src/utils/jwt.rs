// ============================================================================
// JWT - Decodificación del payload y validación de expiración
// ============================================================================
// El cliente NO verifica la firma (el backend es la autoridad); solo lee el
// claim `exp` como pista proactiva de logout.
// ============================================================================

use base64::{engine::general_purpose, Engine as _};

use crate::models::TokenClaims;

/// Decodificar los claims del payload (segmento central) de un token JWT.
/// Devuelve None si el token está malformado.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = general_purpose::URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Validar el token contra el reloj dado (ms desde epoch).
/// Inválido si no decodifica, si falta `exp`, o si `exp * 1000 <= now_ms`.
pub fn is_token_valid(token: &str, now_ms: f64) -> bool {
    match decode_claims(token) {
        Some(claims) => match claims.exp {
            Some(exp) => (exp as f64) * 1000.0 > now_ms,
            None => false,
        },
        None => false,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use base64::{engine::general_purpose, Engine as _};

    /// Construir un token con la estructura de tres segmentos y el `exp` dado
    pub fn make_token(exp: Option<i64>) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = match exp {
            Some(exp) => format!(r#"{{"sub":"trader1","exp":{}}}"#, exp),
            None => r#"{"sub":"trader1"}"#.to_string(),
        };
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(payload);
        format!("{}.{}.firma-no-verificada", header, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::make_token;
    use super::*;

    #[test]
    fn token_con_exp_futuro_es_valido() {
        let now_ms = 1_700_000_000_000.0;
        let token = make_token(Some(1_700_000_000 + 3600));
        assert!(is_token_valid(&token, now_ms));
    }

    #[test]
    fn token_expirado_es_invalido() {
        let now_ms = 1_700_000_000_000.0;
        let token = make_token(Some(1_700_000_000 - 60));
        assert!(!is_token_valid(&token, now_ms));
    }

    #[test]
    fn exp_igual_a_now_es_invalido() {
        // La comparación es estricta: exp*1000 <= now_ms => inválido
        let token = make_token(Some(1_700_000_000));
        assert!(!is_token_valid(&token, 1_700_000_000_000.0));
    }

    #[test]
    fn token_sin_exp_es_invalido() {
        let token = make_token(None);
        assert!(!is_token_valid(&token, 0.0));
    }

    #[test]
    fn token_malformado_es_invalido() {
        assert!(!is_token_valid("", 0.0));
        assert!(!is_token_valid("no-es-un-jwt", 0.0));
        assert!(!is_token_valid("a.$$$no-base64$$$.c", 0.0));
        assert!(decode_claims("a.b").is_none() || !is_token_valid("a.b", 0.0));
    }

    #[test]
    fn decode_claims_lee_exp() {
        let token = make_token(Some(42));
        let claims = decode_claims(&token).expect("claims");
        assert_eq!(claims.exp, Some(42));
    }
}
