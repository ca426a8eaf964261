// ============================================================================
// HEADER VIEW - Barra superior con usuario y logout
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::AppState;
use crate::utils::{navigate_to, ROUTE_LOGIN, ROUTE_SEARCH};

/// Renderizar header de la app (solo para vistas autenticadas)
pub fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("header")?.class("app-header").build();

    let brand = ElementBuilder::new("div")?
        .class("header-brand")
        .text("📊 finEdSkywalker")
        .build();

    // Click en la marca vuelve a la búsqueda
    on_click(&brand, move |_| {
        navigate_to(ROUTE_SEARCH);
    })?;

    let user_area = ElementBuilder::new("div")?.class("header-user").build();

    let username = ElementBuilder::new("span")?
        .class("header-username")
        .text(&state.session.get_username().unwrap_or_default())
        .build();

    let logout_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-logout")
        .text("Logout")
        .build();

    {
        let session = state.session.clone();
        on_click(&logout_btn, move |_| {
            session.logout();
            navigate_to(ROUTE_LOGIN);
        })?;
    }

    append_child(&user_area, &username)?;
    append_child(&user_area, &logout_btn)?;
    append_child(&header, &brand)?;
    append_child(&header, &user_area)?;

    Ok(header)
}
