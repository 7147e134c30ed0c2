use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApiClient, Transport};
use crate::errors::ApiError;
use crate::models::{Conversation, SendMessageResponse};
use crate::query::{QueryCache, QueryStatus};
use crate::session::TokenStore;

type Listener = Box<dyn Fn(&QueryCache<Vec<Conversation>>)>;

/// Conversation history cache plus the mutations that invalidate it.
///
/// Mutations never patch the cached list: on success the whole history is
/// invalidated and fetched again.
pub struct ChatStore<T, S> {
    client: Rc<ApiClient<T, S>>,
    conversations: Rc<RefCell<QueryCache<Vec<Conversation>>>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl<T, S> Clone for ChatStore<T, S> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            conversations: Rc::clone(&self.conversations),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T: Transport, S: TokenStore> ChatStore<T, S> {
    pub fn new(client: Rc<ApiClient<T, S>>) -> Self {
        Self {
            client,
            conversations: Rc::new(RefCell::new(QueryCache::new())),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Registers a callback run with the cache after every change.
    pub fn subscribe(&self, listener: impl Fn(&QueryCache<Vec<Conversation>>) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.conversations.borrow().data().clone()
    }

    pub fn status(&self) -> QueryStatus {
        self.conversations.borrow().status()
    }

    /// Fetches the full history into the cache.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let generation = self.conversations.borrow_mut().begin_fetch();
        self.notify();

        let result = self.client.history().await;
        let accepted = match result {
            Ok(convos) => Ok(self.conversations.borrow_mut().resolve(generation, convos)),
            Err(e) => {
                self.conversations.borrow_mut().reject(generation);
                Err(e)
            }
        };
        self.notify();

        match accepted {
            Ok(false) => {
                log::debug!("Dropped superseded history fetch #{generation}");
                Ok(())
            }
            Ok(true) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Sends a message and re-fetches the history once the server answered.
    pub async fn send_message(
        &self,
        message: &str,
        conversation_id: Option<i64>,
    ) -> Result<SendMessageResponse, ApiError> {
        let resp = self.client.send_message(message, conversation_id).await?;
        self.invalidate().await;
        Ok(resp)
    }

    pub async fn delete_conversation(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_conversation(id).await?;
        self.invalidate().await;
        Ok(())
    }

    pub async fn delete_message(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_message(id).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Drops the cached history, e.g. when the signed-in user changes.
    pub fn reset(&self) {
        self.conversations.borrow_mut().clear();
        self.notify();
    }

    /// The mutation already succeeded, so a failed refetch is only logged.
    async fn invalidate(&self) {
        if let Err(e) = self.refresh().await {
            log::error!("Failed to refresh conversations: {e}");
        }
    }

    /// Listeners get a snapshot, so they may call back into the store.
    fn notify(&self) {
        let snapshot = self.conversations.borrow().clone();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }
}

/// Chat input state: the draft text and the typing indicator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Composer {
    pub input: String,
    pub typing: bool,
}

impl Composer {
    pub fn can_send(&self) -> bool {
        !self.typing && !self.input.trim().is_empty()
    }

    /// Starts a send: returns the trimmed text and raises the typing flag.
    /// Blank input, or a send already in flight, yields `None`.
    pub fn begin_send(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        self.typing = true;
        Some(self.input.trim().to_string())
    }

    /// Ends a send. The input is only cleared when the server accepted it.
    pub fn finish_send(&mut self, succeeded: bool) {
        if succeeded {
            self.input.clear();
        }
        self.typing = false;
    }
}
