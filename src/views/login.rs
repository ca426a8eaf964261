// ============================================================================
// LOGIN VIEW - Formulario de inicio de sesión
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use crate::config::CONFIG;
use crate::dom::{
    append_child, create_element, get_element_by_id, on_input, on_submit, set_attribute,
    set_class_name, set_text_content, ElementBuilder,
};
use crate::services::{perform_login, ApiClient};
use crate::state::AppState;
use crate::utils::{navigate_to, ROUTE_SEARCH};

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    // Estado local del formulario (vive en los closures)
    let username = Rc::new(RefCell::new(String::new()));
    let password = Rc::new(RefCell::new(String::new()));
    let loading = Rc::new(RefCell::new(false));

    let login_screen = ElementBuilder::new("div")?.class("login-screen").build();
    let login_container = ElementBuilder::new("div")?
        .class("login-container")
        .build();

    // Header
    let login_header = ElementBuilder::new("div")?.class("login-header").build();
    let logo = ElementBuilder::new("div")?
        .class("login-logo")
        .text("📊")
        .build();
    let title = ElementBuilder::new("h1")?.text("finEdSkywalker").build();
    let subtitle = ElementBuilder::new("p")?
        .text("Stock analysis for long-term investors")
        .build();

    append_child(&login_header, &logo)?;
    append_child(&login_header, &title)?;
    append_child(&login_header, &subtitle)?;

    // Formulario
    let form = create_element("form")?;
    set_class_name(&form, "login-form");

    let username_group = create_form_group(
        "username",
        "Username",
        "Enter your username",
        "text",
        username.clone(),
    )?;
    let password_group = create_form_group(
        "password",
        "Password",
        "Enter your password",
        "password",
        password.clone(),
    )?;

    // Banner de error (oculto hasta que falle un login)
    let error_banner = ElementBuilder::new("div")?
        .id("login-error")?
        .class("login-error hidden")
        .build();

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .id("login-submit")?
        .class("btn-login")
        .text("Sign in")
        .build();

    // Submit: validar, llamar al backend y poblar la sesión
    {
        let username_clone = username.clone();
        let password_clone = password.clone();
        let loading_clone = loading.clone();
        let session = state.session.clone();

        on_submit(&form, move || {
            if *loading_clone.borrow() {
                return;
            }

            let username_val = username_clone.borrow().trim().to_string();
            let password_val = password_clone.borrow().clone();

            if username_val.is_empty() || password_val.is_empty() {
                show_error("Please enter your username and password");
                return;
            }

            *loading_clone.borrow_mut() = true;
            set_submit_disabled(true);
            hide_error();

            let session = session.clone();
            let loading_clone = loading_clone.clone();

            spawn_local(async move {
                // El login no lleva token: el client se crea pelado
                let client = ApiClient::new(CONFIG.backend_url());
                match perform_login(&client, &username_val, &password_val).await {
                    Ok(response) => {
                        session.login(response.token, response.username);
                        navigate_to(ROUTE_SEARCH);
                    }
                    Err(e) => {
                        log::error!("❌ Login fallido: {}", e);
                        show_error(&e.to_string());
                    }
                }
                *loading_clone.borrow_mut() = false;
                set_submit_disabled(false);
            });
        })?;
    }

    append_child(&form, &username_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &error_banner)?;
    append_child(&form, &submit_btn)?;

    append_child(&login_container, &login_header)?;
    append_child(&login_container, &form)?;
    append_child(&login_screen, &login_container)?;

    Ok(login_screen)
}

/// Helper para crear form group (label + input)
fn create_form_group(
    id: &str,
    label_text: &str,
    placeholder: &str,
    input_type: &str,
    value: Rc<RefCell<String>>,
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = create_element("input")?;
    set_attribute(&input, "type", input_type)?;
    set_attribute(&input, "id", id)?;
    set_attribute(&input, "name", id)?;
    set_attribute(&input, "placeholder", placeholder)?;
    set_class_name(&input, "form-input");

    {
        let value_clone = value.clone();
        on_input(&input, move |e: web_sys::InputEvent| {
            if let Some(target) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
                *value_clone.borrow_mut() = target.value();
            }
        })?;
    }

    append_child(&group, &label)?;
    append_child(&group, &input)?;

    Ok(group)
}

fn show_error(message: &str) {
    if let Some(banner) = get_element_by_id("login-error") {
        set_text_content(&banner, message);
        set_class_name(&banner, "login-error");
    }
}

fn hide_error() {
    if let Some(banner) = get_element_by_id("login-error") {
        set_text_content(&banner, "");
        set_class_name(&banner, "login-error hidden");
    }
}

fn set_submit_disabled(disabled: bool) {
    if let Some(btn) = get_element_by_id("login-submit") {
        if disabled {
            let _ = btn.set_attribute("disabled", "true");
        } else {
            let _ = btn.remove_attribute("disabled");
        }
    }
}
