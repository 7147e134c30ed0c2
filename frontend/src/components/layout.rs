use leptos::prelude::*;

use super::header::Header;
use super::sidebar::Sidebar;

/// Sidebar on the left, header and page content on the right.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="app-container">
            <Sidebar />
            <div class="main-column">
                <Header />
                <main class="main-content">{children()}</main>
            </div>
        </div>
    }
}
