// ============================================================================
// NAVIGATION - Lectura de ruta actual y redirecciones
// ============================================================================

/// Ruta actual (pathname). Fuera del navegador devuelve "/".
pub fn current_path() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|win| win.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        "/".to_string()
    }
}

/// Pedir navegación a otra ruta de la app
pub fn navigate_to(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        log::info!("🧭 Navegando a {}", path);
        if let Some(win) = web_sys::window() {
            if let Err(e) = win.location().set_href(path) {
                log::error!("❌ Error navegando a {}: {:?}", path, e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = path;
    }
}
