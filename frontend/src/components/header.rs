use leptos::prelude::*;

use crate::state::AppState;

/// Top bar with the app title and the account menu.
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (menu_open, set_menu_open) = signal(false);

    let on_logout = move |_| {
        set_menu_open.set(false);
        state.logout();
    };

    view! {
        <header class="app-header">
            <h1>"AI Chat Interface"</h1>
            <div class="account-menu">
                <button
                    class="account-btn"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    "Account ▾"
                </button>
                <Show when=move || menu_open.get()>
                    <div class="menu-items">
                        <button class="menu-item" on:click=on_logout>
                            "Log out"
                        </button>
                    </div>
                </Show>
            </div>
        </header>
    }
}
