use leptos::prelude::*;

#[component]
pub fn SplashScreen() -> impl IntoView {
    view! {
        <div class="splash-screen">
            <h1 class="splash-title">"AI Chat Interface"</h1>
        </div>
    }
}
