//! Google Identity Services integration.
//!
//! The script is injected on demand; everything the widget reports is pushed
//! into an [`IdentityEvent`] channel instead of calling app code directly.

use futures::channel::mpsc::UnboundedSender;
use js_sys::{Object, Reflect};
use rag_chat::auth::IdentityEvent;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlScriptElement};

const GSI_SCRIPT_URL: &str = "https://accounts.google.com/gsi/client";
const GSI_SCRIPT_ID: &str = "google-identity-script";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = initialize)]
    fn gsi_initialize(config: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = renderButton)]
    fn gsi_render_button(parent: &web_sys::Element, options: &JsValue) -> Result<(), JsValue>;
}

/// Loads the widget script and renders the sign-in button into `button_id`.
pub fn load(client_id: Option<String>, button_id: &'static str, events: UnboundedSender<IdentityEvent>) {
    let Some(client_id) = client_id else {
        report(&events, IdentityEvent::Unavailable("no Google client id configured".to_string()));
        return;
    };
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        report(&events, IdentityEvent::Unavailable("no document".to_string()));
        return;
    };

    if widget_loaded() {
        initialize(&document, &client_id, button_id, events);
        return;
    }

    let script = match inject_script(&document) {
        Ok(script) => script,
        Err(e) => {
            report(&events, IdentityEvent::Unavailable(format!("script injection failed: {e:?}")));
            return;
        }
    };

    let onload_events = events.clone();
    let onload = Closure::<dyn Fn()>::new(move || {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            initialize(&document, &client_id, button_id, onload_events.clone());
        }
    });
    script.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    let onerror = Closure::<dyn Fn()>::new(move || {
        report(&events, IdentityEvent::Unavailable("script failed to load".to_string()));
    });
    script.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();
}

/// Removes the injected script tag.
pub fn unload() {
    if let Some(script) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(GSI_SCRIPT_ID))
    {
        script.remove();
    }
}

fn inject_script(document: &Document) -> Result<HtmlScriptElement, JsValue> {
    if let Some(existing) = document.get_element_by_id(GSI_SCRIPT_ID) {
        existing.remove();
    }
    let script: HtmlScriptElement = document.create_element("script")?.unchecked_into();
    script.set_id(GSI_SCRIPT_ID);
    script.set_src(GSI_SCRIPT_URL);
    script.set_async(true);
    script.set_defer(true);

    let body = document.body().ok_or_else(|| JsValue::from_str("no <body>"))?;
    body.append_child(&script)?;
    Ok(script)
}

fn widget_loaded() -> bool {
    web_sys::window()
        .and_then(|w| Reflect::get(&w, &JsValue::from_str("google")).ok())
        .is_some_and(|g| !g.is_undefined())
}

fn initialize(
    document: &Document,
    client_id: &str,
    button_id: &str,
    events: UnboundedSender<IdentityEvent>,
) {
    let callback_events = events.clone();
    let callback = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
        match Reflect::get(&response, &JsValue::from_str("credential"))
            .ok()
            .and_then(|c| c.as_string())
        {
            Some(credential) => report(&callback_events, IdentityEvent::Credential(credential)),
            None => log::error!("Identity widget returned no credential"),
        }
    });

    let result = build_config(client_id, &callback).and_then(|config| gsi_initialize(&config));
    callback.forget();
    if let Err(e) = result {
        report(&events, IdentityEvent::Unavailable(format!("initialize failed: {e:?}")));
        return;
    }

    if let Some(button) = document.get_element_by_id(button_id) {
        let options = Object::new();
        let rendered = Reflect::set(&options, &"theme".into(), &"outline".into())
            .and_then(|_| Reflect::set(&options, &"size".into(), &"large".into()))
            .and_then(|_| gsi_render_button(&button, &options));
        if let Err(e) = rendered {
            log::error!("Failed to render sign-in button: {e:?}");
        }
    }

    report(&events, IdentityEvent::Ready);
}

fn build_config(client_id: &str, callback: &Closure<dyn Fn(JsValue)>) -> Result<JsValue, JsValue> {
    let config = Object::new();
    Reflect::set(&config, &"client_id".into(), &client_id.into())?;
    Reflect::set(&config, &"callback".into(), callback.as_ref())?;
    Ok(config.into())
}

fn report(events: &UnboundedSender<IdentityEvent>, event: IdentityEvent) {
    if events.unbounded_send(event).is_err() {
        log::debug!("Login page gone, dropping identity event");
    }
}
