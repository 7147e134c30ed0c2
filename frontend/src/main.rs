mod api;
mod components;
mod identity;
mod navigation;
mod state;
mod storage;

use gloo_timers::callback::Timeout;
use leptos::mount::mount_to_body;
use leptos::prelude::*;
use rag_chat::auth::Route;

use components::chat::ChatArea;
use components::layout::Layout;
use components::login::LoginPage;
use components::splash::SplashScreen;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide(api::config());

    view! {
        {move || match state.route.get() {
            Route::Login => view! { <LoginPage /> }.into_any(),
            Route::Home => view! { <Home /> }.into_any(),
        }}
    }
}

/// Home page: splash first, then the chat. The splash replays on every mount.
#[component]
fn Home() -> impl IntoView {
    let state = expect_context::<AppState>();

    let (show_splash, set_show_splash) = signal(true);
    let splash_ms = state.config.with_value(|c| c.splash_duration.as_millis() as u32);
    // The page may be gone before the timer fires.
    Timeout::new(splash_ms, move || {
        set_show_splash.try_set(false);
    })
    .forget();

    view! {
        {move || if show_splash.get() {
            view! { <SplashScreen /> }.into_any()
        } else {
            view! {
                <Layout>
                    <ChatArea />
                </Layout>
            }.into_any()
        }}
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
