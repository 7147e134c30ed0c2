use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use rag_chat::models::{Conversation, Message};
use rag_chat::query::QueryStatus;
use rag_chat::sidebar::ActiveThread;
use wasm_bindgen::JsValue;

use crate::state::AppState;

/// Conversation history with every question/answer pair, plus the input box.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let container = NodeRef::<Div>::new();

    // Load conversations on mount
    state.load_conversations();

    // Keep the newest content in view
    Effect::new(move |_| {
        state.conversations.track();
        state.composer.with(|c| c.typing);
        if let Some(el) = container.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <div class="chat-area">
            <div class="messages-container" node_ref=container>
                {move || {
                    let loading = state.status.get() == QueryStatus::Fetching
                        && state.conversations.with(Vec::is_empty);
                    loading.then(|| view! { <div class="empty-state">"Loading conversations…"</div> })
                }}
                <For
                    each=move || state.conversations.get()
                    key=|c| (c.conversation_id, c.messages.iter().map(|m| m.message_id).collect::<Vec<_>>())
                    let:conversation
                >
                    <ConversationThread conversation=conversation />
                </For>
                <Show when=move || state.composer.with(|c| c.typing)>
                    <div class="message assistant">
                        <TypingAnimation />
                    </div>
                </Show>
            </div>

            <ChatInput />
        </div>
    }
}

/// A conversation title followed by its question/answer pairs.
#[component]
fn ConversationThread(conversation: Conversation) -> impl IntoView {
    let state = expect_context::<AppState>();
    let id = conversation.conversation_id;
    let is_active = move || state.sidebar.with(|s| s.active() == &ActiveThread::Existing(id));

    view! {
        <section class="conversation" class:active=is_active>
            <h3
                class="conversation-title"
                on:click=move |_| state.sidebar.update(|s| s.select(ActiveThread::Existing(id)))
            >
                {conversation.title}
            </h3>
            {conversation
                .messages
                .into_iter()
                .map(|message| view! { <MessagePair message=message /> })
                .collect_view()}
            <button class="delete-conversation-btn" on:click=move |_| state.delete_conversation(id)>
                "Delete Conversation"
            </button>
        </section>
    }
}

/// The user's question (deletable) and the assistant's answer.
#[component]
fn MessagePair(message: Message) -> impl IntoView {
    let state = expect_context::<AppState>();
    let id = message.message_id;
    let time = time_label(&message.created_at);

    view! {
        <div class="message user">
            <button
                class="delete-message-btn"
                title="Delete message"
                on:click=move |_| state.delete_message(id)
            >
                "✕"
            </button>
            <div>{message.question}</div>
            <span class="timestamp">{time.clone()}</span>
        </div>
        <div class="message assistant">
            <div>{message.answer}</div>
            <span class="timestamp">{time}</span>
        </div>
    }
}

#[component]
fn TypingAnimation() -> impl IntoView {
    view! {
        <div class="typing-animation">
            <span></span>
            <span></span>
            <span></span>
        </div>
    }
}

/// Chat input form; disabled while a send is in flight.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let composer = state.composer;

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.send_message();
    };

    view! {
        <form class="input-area" on:submit=on_submit>
            <div class="input-row">
                <input
                    type="text"
                    placeholder="Type your message..."
                    prop:value=move || composer.with(|c| c.input.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        composer.update(|c| c.input = value);
                    }
                />
                <button
                    type="submit"
                    class="send-btn"
                    disabled=move || !composer.with(|c| c.can_send())
                >
                    {move || if composer.with(|c| c.typing) { "Sending…" } else { "Send" }}
                </button>
            </div>
        </form>
    }
}

/// Server timestamp rendered in the browser's locale time format.
fn time_label(timestamp: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(timestamp));
    if date.get_time().is_nan() {
        return String::new();
    }
    date.to_locale_time_string("default").into()
}
