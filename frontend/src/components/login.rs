use futures::channel::mpsc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rag_chat::auth::LoginFlow;

use crate::identity;
use crate::state::AppState;

const BUTTON_ID: &str = "googleSignInButton";

/// Google sign-in page. On success the session is stored and the app
/// navigates home.
#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<AppState>();

    let (tx, rx) = mpsc::unbounded();
    let flow = LoginFlow::new(state.client.get_value(), state.navigator);
    spawn_local(async move {
        let phase = flow.run(rx).await;
        log::debug!("Login flow finished in {phase:?}");
    });

    // The button container must exist before the widget renders into it.
    let client_id = state.config.with_value(|c| c.google_client_id.clone());
    let closer = tx.clone();
    Effect::new(move |_| identity::load(client_id.clone(), BUTTON_ID, tx.clone()));
    on_cleanup(move || {
        closer.close_channel();
        identity::unload();
    });

    view! {
        <div class="login-page">
            <div class="login-card">
                <h2>"Welcome to AI Chat Interface"</h2>
                <div id=BUTTON_ID class="google-button"></div>
            </div>
        </div>
    }
}
