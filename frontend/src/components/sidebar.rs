use leptos::prelude::*;

use crate::state::AppState;

/// Sidebar with search, "New Conversation" and the conversation list.
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let sidebar = state.sidebar;

    let entries = Memo::new(move |_| {
        state.conversations.with(|convos| sidebar.with(|s| s.entries(convos)))
    });

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search conversations"
                    prop:value=move || sidebar.with(|s| s.search().to_string())
                    on:input=move |ev| {
                        let term = event_target_value(&ev);
                        sidebar.update(|s| s.set_search(term));
                    }
                />
                <button class="new-chat-btn" on:click=move |_| state.new_conversation()>
                    "+ New Conversation"
                </button>
            </div>
            <div class="conversation-list">
                <Show
                    when=move || entries.with(|e| !e.is_empty())
                    fallback=|| view! { <div class="empty-state">"No conversations yet"</div> }
                >
                    <For
                        each=move || entries.get()
                        key=|entry| (entry.key(), entry.title.clone())
                        let:entry
                    >
                        {
                            let thread = entry.thread();
                            let select_thread = thread.clone();
                            let is_active = move || sidebar.with(|s| s.active() == &thread);
                            let title = entry.title.clone();
                            view! {
                                <div
                                    class="conversation-item"
                                    class:active=is_active
                                    on:click=move |_| {
                                        let thread = select_thread.clone();
                                        sidebar.update(|s| s.select(thread));
                                    }
                                >
                                    <span>{title}</span>
                                    <button
                                        class="delete-btn"
                                        title="Delete conversation"
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            state.remove_entry(&entry);
                                        }
                                    >
                                        "✕"
                                    </button>
                                </div>
                            }
                        }
                    </For>
                </Show>
            </div>
        </aside>
    }
}
