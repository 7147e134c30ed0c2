use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use rag_chat::auth::{self, Route};
use rag_chat::models::Conversation;
use rag_chat::query::QueryStatus;
use rag_chat::sidebar::{EntryKind, SidebarEntry, SidebarModel};
use rag_chat::{ChatStore, ClientConfig, Composer, Session};

use crate::api::{FetchTransport, WebChatStore, WebClient};
use crate::navigation::{current_route, BrowserNavigator};
use crate::storage::LocalTokenStore;

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub config: StoredValue<ClientConfig>,
    pub client: StoredValue<Rc<WebClient>, LocalStorage>,
    pub store: StoredValue<WebChatStore, LocalStorage>,
    pub navigator: BrowserNavigator,

    // --- Read signals (for components to subscribe to) ---
    pub route: ReadSignal<Route>,
    pub conversations: ReadSignal<Vec<Conversation>>,
    pub status: ReadSignal<QueryStatus>,

    // --- Read/write view models ---
    pub composer: RwSignal<Composer>,
    pub sidebar: RwSignal<SidebarModel>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide(config: ClientConfig) -> Self {
        let (route, set_route) = signal(current_route());
        let (conversations, set_conversations) = signal(Vec::<Conversation>::new());
        let (status, set_status) = signal(QueryStatus::Idle);

        let client = Rc::new(WebClient::new(
            config.clone(),
            FetchTransport,
            Session::new(LocalTokenStore),
        ));
        let store = ChatStore::new(Rc::clone(&client));
        store.subscribe(move |cache| {
            set_status.set(cache.status());
            set_conversations.set(cache.data().clone());
        });

        let navigator = BrowserNavigator::new(set_route);
        navigator.listen_popstate();

        let state = Self {
            config: StoredValue::new(config),
            client: StoredValue::new_local(client),
            store: StoredValue::new_local(store),
            navigator,
            route,
            conversations,
            status,
            composer: RwSignal::new(Composer::default()),
            sidebar: RwSignal::new(SidebarModel::default()),
        };

        provide_context(state);
        state
    }

    /// Load conversations from the backend.
    pub fn load_conversations(&self) {
        let store = self.store.get_value();
        spawn_local(async move {
            if let Err(e) = store.refresh().await {
                log::error!("Failed to fetch conversations: {e}");
            }
        });
    }

    /// Send the composer's text to the active thread.
    pub fn send_message(&self) {
        let mut text = None;
        self.composer.update(|c| text = c.begin_send());
        let Some(text) = text else {
            return;
        };

        let sent_from = self.sidebar.with_untracked(|s| s.active().clone());
        let store = self.store.get_value();
        let composer = self.composer;
        let sidebar = self.sidebar;

        spawn_local(async move {
            let result = store.send_message(&text, sent_from.conversation_id()).await;
            match &result {
                Ok(resp) => sidebar.update(|s| s.thread_saved(&sent_from, resp.conversation_id)),
                Err(e) => log::error!("Error sending message: {e}"),
            }
            composer.update(|c| c.finish_send(result.is_ok()));
        });
    }

    pub fn delete_conversation(&self, id: i64) {
        let store = self.store.get_value();
        let sidebar = self.sidebar;
        spawn_local(async move {
            match store.delete_conversation(id).await {
                Ok(()) => sidebar.update(|s| s.conversation_removed(id)),
                Err(e) => log::error!("Failed to delete conversation {id}: {e}"),
            }
        });
    }

    pub fn delete_message(&self, id: i64) {
        let store = self.store.get_value();
        spawn_local(async move {
            if let Err(e) = store.delete_message(id).await {
                log::error!("Failed to delete message {id}: {e}");
            }
        });
    }

    /// Start a local draft thread from the sidebar.
    pub fn new_conversation(&self) {
        let remote_count = self.conversations.with_untracked(Vec::len);
        self.sidebar.update(|s| {
            s.new_conversation(chrono::Utc::now(), remote_count);
        });
    }

    /// Drafts are only local; server conversations go through the API.
    pub fn remove_entry(&self, entry: &SidebarEntry) {
        match &entry.kind {
            EntryKind::Draft(id) => self.sidebar.update(|s| s.remove_draft(id)),
            EntryKind::Remote(id) => self.delete_conversation(*id),
        }
    }

    /// The next user must not see this user's history, even if the token
    /// could not be removed.
    pub fn logout(&self) {
        self.store.get_value().reset();
        let client = self.client.get_value();
        if let Err(e) = auth::logout(client.session(), &self.navigator) {
            log::error!("Logout failed: {e}");
        }
        self.sidebar.set(SidebarModel::default());
        self.composer.set(Composer::default());
    }
}
