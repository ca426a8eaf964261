// ============================================================================
// SEARCH VIEW - Búsqueda de tickers con autocompletado
// ============================================================================
// La vista es una función pura del SearchState: el input dispara
// vm.on_input() y el viewmodel notifica para re-renderizar.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::config::CONFIG;
use crate::dom::{
    append_child, create_element, get_element_by_id, on_click, on_input, set_attribute,
    set_class_name, set_inner_html, ElementBuilder,
};
use crate::models::SearchResult;
use crate::state::AppState;
use crate::utils::{navigate_to, ROUTE_TICKER_PREFIX};
use crate::viewmodels::{SearchState, SearchViewModel};
use crate::views::render_header;

/// Renderizar vista de búsqueda
pub fn render_search(state: &AppState, vm: &SearchViewModel) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("search-screen").build();
    append_child(&screen, &render_header(state)?)?;

    let container = ElementBuilder::new("div")?
        .class("search-container")
        .build();

    let title = ElementBuilder::new("h2")?
        .class("search-title")
        .text("Search stocks")
        .build();
    append_child(&container, &title)?;

    // El valor del input persiste entre re-renders vía el estado del VM
    let current_query = query_of(&vm.get_state());

    let input = create_element("input")?;
    set_attribute(&input, "type", "text")?;
    set_attribute(&input, "id", "ticker-search")?;
    set_attribute(&input, "placeholder", "Ticker or company name...")?;
    set_attribute(&input, "autocomplete", "off")?;
    set_attribute(&input, "value", &current_query)?;
    set_class_name(&input, "search-input");

    {
        let vm = vm.clone();
        on_input(&input, move |e: web_sys::InputEvent| {
            if let Some(target) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
                vm.on_input(&target.value());
            }
        })?;
    }
    append_child(&container, &input)?;

    // Panel de resultados según el estado del pipeline
    let panel = ElementBuilder::new("div")?
        .id("search-results")?
        .class("search-results")
        .build();
    append_child(&panel, &render_results_content(&vm.get_state())?)?;
    append_child(&container, &panel)?;

    append_child(&screen, &container)?;
    Ok(screen)
}

/// Actualización incremental: reemplazar SOLO el contenido del panel de
/// resultados. El input no se reconstruye, así el foco y el cursor del
/// usuario sobreviven a cada notificación del pipeline.
pub fn update_results_panel(vm: &SearchViewModel) {
    match get_element_by_id("search-results") {
        Some(panel) => {
            set_inner_html(&panel, "");
            match render_results_content(&vm.get_state()) {
                Ok(content) => {
                    let _ = append_child(&panel, &content);
                }
                Err(e) => log::error!("❌ Error renderizando resultados: {:?}", e),
            }
        }
        // El panel no está montado (otra vista): render completo
        None => crate::rerender_app(),
    }
}

fn query_of(state: &SearchState) -> String {
    match state {
        SearchState::Idle => String::new(),
        SearchState::Debouncing { query }
        | SearchState::Loading { query }
        | SearchState::Showing { query, .. }
        | SearchState::Empty { query }
        | SearchState::Errored { query, .. } => query.clone(),
    }
}

fn render_results_content(state: &SearchState) -> Result<Element, JsValue> {
    let panel = ElementBuilder::new("div")?.class("results-content").build();

    match state {
        SearchState::Idle => {
            let hint = ElementBuilder::new("p")?
                .class("search-hint")
                .text(&format!(
                    "Type at least {} characters to search",
                    CONFIG.search_config.min_query_len
                ))
                .build();
            append_child(&panel, &hint)?;
        }
        SearchState::Debouncing { .. } | SearchState::Loading { .. } => {
            let spinner = ElementBuilder::new("div")?
                .class("search-loading")
                .text("⏳ Searching...")
                .build();
            append_child(&panel, &spinner)?;
        }
        SearchState::Showing { results, .. } => {
            let list = ElementBuilder::new("ul")?.class("result-list").build();
            for result in results {
                append_child(&list, &render_result_item(result)?)?;
            }
            append_child(&panel, &list)?;
        }
        SearchState::Empty { query } => {
            let empty = ElementBuilder::new("p")?
                .class("search-empty")
                .text(&format!("No results for \"{}\"", query))
                .build();
            append_child(&panel, &empty)?;
        }
        SearchState::Errored { message, .. } => {
            let error = ElementBuilder::new("div")?
                .class("search-error")
                .text(message)
                .build();
            append_child(&panel, &error)?;
        }
    }

    Ok(panel)
}

fn render_result_item(result: &SearchResult) -> Result<Element, JsValue> {
    let item = ElementBuilder::new("li")?.class("result-item").build();

    let ticker = ElementBuilder::new("span")?
        .class("result-ticker")
        .text(&result.ticker)
        .build();
    let name = ElementBuilder::new("span")?
        .class("result-company")
        .text(&result.company_name)
        .build();

    append_child(&item, &ticker)?;
    append_child(&item, &name)?;

    {
        let ticker = result.ticker.to_uppercase();
        on_click(&item, move |_| {
            navigate_to(&format!("{}{}", ROUTE_TICKER_PREFIX, ticker));
        })?;
    }

    Ok(item)
}
