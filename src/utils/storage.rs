// ============================================================================
// STORAGE - Helpers para localStorage (entradas string)
// ============================================================================

use web_sys::Storage;

/// Obtener localStorage del navegador.
/// Fuera del navegador (tests nativos) devuelve None.
pub fn get_local_storage() -> Option<Storage> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.local_storage().ok()?
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Leer una entrada string de localStorage
pub fn get_string(key: &str) -> Option<String> {
    let storage = get_local_storage()?;
    storage.get_item(key).ok()?
}

/// Guardar una entrada string en localStorage
pub fn set_string(key: &str, value: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .set_item(key, value)
        .map_err(|_| format!("Error guardando '{}' en localStorage", key))
}

/// Eliminar una entrada de localStorage
pub fn remove_key(key: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .remove_item(key)
        .map_err(|_| format!("Error eliminando '{}' de localStorage", key))
}
