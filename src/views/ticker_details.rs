// ============================================================================
// TICKER DETAILS VIEW - Métricas de valuación y scorecard de un ticker
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::{Scorecard, TickerMetrics, ValuationMetrics};
use crate::state::AppState;
use crate::utils::{navigate_to, ROUTE_SEARCH};
use crate::viewmodels::{TickerState, TickerViewModel};
use crate::views::render_header;

/// Renderizar vista de detalle de un ticker
pub fn render_ticker_details(
    state: &AppState,
    vm: &TickerViewModel,
    ticker: &str,
) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("ticker-screen").build();
    append_child(&screen, &render_header(state)?)?;

    let container = ElementBuilder::new("div")?
        .class("ticker-container")
        .build();

    let back_link = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-back")
        .text("← Back to search")
        .build();
    on_click(&back_link, move |_| {
        navigate_to(ROUTE_SEARCH);
    })?;
    append_child(&container, &back_link)?;

    match vm.get_state() {
        TickerState::Loading => {
            let loading = ElementBuilder::new("div")?
                .class("ticker-loading")
                .text(&format!("⏳ Loading {}...", ticker))
                .build();
            append_child(&container, &loading)?;
        }
        TickerState::Loaded(metrics) => {
            append_child(&container, &render_metrics(&metrics)?)?;
        }
        TickerState::Errored(message) => {
            let error = ElementBuilder::new("div")?
                .class("ticker-error")
                .text(&message)
                .build();
            append_child(&container, &error)?;
        }
    }

    append_child(&screen, &container)?;
    Ok(screen)
}

fn render_metrics(metrics: &TickerMetrics) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?.class("ticker-card").build();

    let header = ElementBuilder::new("div")?.class("ticker-header").build();
    let symbol = ElementBuilder::new("h2")?
        .class("ticker-symbol")
        .text(&metrics.ticker)
        .build();
    append_child(&header, &symbol)?;
    if let Some(ref company_name) = metrics.company_name {
        let company = ElementBuilder::new("p")?
            .class("ticker-company")
            .text(company_name)
            .build();
        append_child(&header, &company)?;
    }
    append_child(&card, &header)?;

    if let Some(ref valuation) = metrics.valuation {
        append_child(&card, &render_valuation(valuation)?)?;
    }
    if let Some(ref scorecard) = metrics.scorecard {
        append_child(&card, &render_scorecard(scorecard)?)?;
    }

    Ok(card)
}

fn render_valuation(valuation: &ValuationMetrics) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("div")?
        .class("metrics-section")
        .build();
    let title = ElementBuilder::new("h3")?.text("Valuation").build();
    append_child(&section, &title)?;

    // El backend omite las métricas que no puede calcular: solo se
    // muestran las celdas presentes
    let grid = ElementBuilder::new("div")?.class("metrics-grid").build();
    if let Some(price) = valuation.price {
        append_child(&grid, &metric_cell("Price", &format!("${:.2}", price))?)?;
    }
    if let Some(market_cap) = valuation.market_cap {
        append_child(&grid, &metric_cell("Market Cap", &format_market_cap(market_cap))?)?;
    }
    if let Some(pe_ratio) = valuation.pe_ratio {
        append_child(&grid, &metric_cell("P/E", &format!("{:.2}", pe_ratio))?)?;
    }
    if let Some(pb_ratio) = valuation.pb_ratio {
        append_child(&grid, &metric_cell("P/B", &format!("{:.2}", pb_ratio))?)?;
    }
    if let Some(dividend_yield) = valuation.dividend_yield {
        append_child(
            &grid,
            &metric_cell("Dividend Yield", &format!("{:.2}%", dividend_yield))?,
        )?;
    }
    append_child(&section, &grid)?;

    Ok(section)
}

fn render_scorecard(scorecard: &Scorecard) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("div")?
        .class("metrics-section")
        .build();
    let title = ElementBuilder::new("h3")?.text("Scorecard").build();
    append_child(&section, &title)?;

    let grid = ElementBuilder::new("div")?.class("metrics-grid").build();
    if let Some(profitability) = scorecard.profitability {
        append_child(
            &grid,
            &metric_cell("Profitability", &format!("{:.1}", profitability))?,
        )?;
    }
    if let Some(growth) = scorecard.growth {
        append_child(&grid, &metric_cell("Growth", &format!("{:.1}", growth))?)?;
    }
    if let Some(financial_health) = scorecard.financial_health {
        append_child(
            &grid,
            &metric_cell("Financial Health", &format!("{:.1}", financial_health))?,
        )?;
    }
    if let Some(overall) = scorecard.overall {
        append_child(&grid, &metric_cell("Overall", &format!("{:.1}", overall))?)?;
    }
    append_child(&section, &grid)?;

    Ok(section)
}

fn metric_cell(label: &str, value: &str) -> Result<Element, JsValue> {
    let cell = ElementBuilder::new("div")?.class("metric-cell").build();
    let label_el = ElementBuilder::new("span")?
        .class("metric-label")
        .text(label)
        .build();
    let value_el = ElementBuilder::new("span")?
        .class("metric-value")
        .text(value)
        .build();
    append_child(&cell, &label_el)?;
    append_child(&cell, &value_el)?;
    Ok(cell)
}

/// Formatear market cap en B/M para no mostrar números de 12 dígitos
fn format_market_cap(market_cap: f64) -> String {
    if market_cap >= 1_000_000_000_000.0 {
        format!("${:.2}T", market_cap / 1_000_000_000_000.0)
    } else if market_cap >= 1_000_000_000.0 {
        format!("${:.2}B", market_cap / 1_000_000_000.0)
    } else if market_cap >= 1_000_000.0 {
        format!("${:.2}M", market_cap / 1_000_000.0)
    } else {
        format!("${:.0}", market_cap)
    }
}
