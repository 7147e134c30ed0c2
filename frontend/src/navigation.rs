use leptos::prelude::*;
use rag_chat::auth::{Navigator, Route};
use wasm_bindgen::JsValue;

/// Current route as derived from `location.pathname`.
pub fn current_route() -> Route {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();
    Route::from_path(&path)
}

/// History-API navigator that also updates the route signal.
#[derive(Clone, Copy)]
pub struct BrowserNavigator {
    set_route: WriteSignal<Route>,
}

impl BrowserNavigator {
    pub fn new(set_route: WriteSignal<Route>) -> Self {
        Self { set_route }
    }

    /// Keeps the route signal in sync with back/forward buttons.
    pub fn listen_popstate(&self) {
        let set_route = self.set_route;
        let handle = window_event_listener(leptos::ev::popstate, move |_| {
            set_route.set(current_route());
        });
        on_cleanup(move || handle.remove());
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        let pushed = web_sys::window()
            .and_then(|w| w.history().ok())
            .map(|h| h.push_state_with_url(&JsValue::NULL, "", Some(path)));
        if let Some(Err(e)) = pushed {
            log::error!("Failed to navigate to {path}: {e:?}");
        }
        self.set_route.set(Route::from_path(path));
    }
}
