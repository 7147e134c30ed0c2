//! Fakes shared by the unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::api::{ApiClient, HttpRequest, HttpResponse, Transport};
use crate::auth::Navigator;
use crate::config::ClientConfig;
use crate::errors::ApiError;
use crate::session::{MemoryTokenStore, Session, TokenStore};

/// Replays queued responses in order and records every request.
#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Rc<RefCell<VecDeque<Result<HttpResponse, ApiError>>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub fn fail(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Transport for FakeTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".to_string())))
    }
}

/// Token store whose `clear` always fails, like a locked-down `localStorage`.
pub struct StuckTokenStore {
    token: String,
}

impl StuckTokenStore {
    pub fn new(token: &str) -> Self {
        Self { token: token.to_string() }
    }
}

impl TokenStore for StuckTokenStore {
    fn load(&self) -> Option<String> {
        Some(self.token.clone())
    }

    fn store(&self, _token: &str) -> Result<(), ApiError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        Err(ApiError::Storage("removeItem denied".to_string()))
    }
}

pub fn client_with(
    transport: FakeTransport,
    store: MemoryTokenStore,
) -> ApiClient<FakeTransport, MemoryTokenStore> {
    ApiClient::new(ClientConfig::default(), transport, Session::new(store))
}

/// Records every path it is asked to navigate to.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    visited: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.borrow_mut().push(path.to_string());
    }
}

pub fn conversation_json(id: i64, title: &str, message_ids: &[i64]) -> serde_json::Value {
    let messages: Vec<_> = message_ids
        .iter()
        .map(|m| {
            serde_json::json!({
                "message_id": m,
                "question": format!("question {m}"),
                "answer": format!("answer {m}"),
                "created_at": "2024-05-01T10:00:00Z",
                "updated_at": "2024-05-01T10:00:00Z",
            })
        })
        .collect();
    serde_json::json!({
        "conversation_id": id,
        "title": title,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
        "messages": messages,
    })
}
