use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::errors::ApiError;
use crate::models::{
    AuthResponse, Conversation, GoogleAuthRequest, SendMessageRequest, SendMessageResponse,
};
use crate::session::{Session, TokenStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every backend route the client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    History,
    SendMessage,
    DeleteConversation(i64),
    DeleteMessage(i64),
    GoogleAuth,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::History => Method::Get,
            Endpoint::SendMessage | Endpoint::GoogleAuth => Method::Post,
            Endpoint::DeleteConversation(_) | Endpoint::DeleteMessage(_) => Method::Delete,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::History => "/chat/history/".to_string(),
            Endpoint::SendMessage => "/chat/sendmessage/".to_string(),
            Endpoint::DeleteConversation(id) => format!("/chat/delconversation/{id}/"),
            Endpoint::DeleteMessage(id) => format!("/chat/delmessage/{id}/"),
            Endpoint::GoogleAuth => "/authentication/google/".to_string(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Endpoint::GoogleAuth)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a single HTTP exchange. No retry, no timeout.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Thin wrapper over the chat REST API.
pub struct ApiClient<T, S> {
    config: ClientConfig,
    transport: T,
    session: Session<S>,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub fn new(config: ClientConfig, transport: T, session: Session<S>) -> Self {
        Self { config, transport, session }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Fetches every conversation of the signed-in user, messages included.
    pub async fn history(&self) -> Result<Vec<Conversation>, ApiError> {
        let endpoint = Endpoint::History;
        let body = self.call(endpoint, None).await?;
        decode(endpoint, &body)
    }

    /// Sends a question; `None` starts a new conversation server-side.
    pub async fn send_message(
        &self,
        message: &str,
        conversation_id: Option<i64>,
    ) -> Result<SendMessageResponse, ApiError> {
        let endpoint = Endpoint::SendMessage;
        let request = SendMessageRequest { message: message.to_string(), conversation_id };
        let body = self.call(endpoint, Some(encode(&request)?)).await?;
        decode(endpoint, &body)
    }

    pub async fn delete_conversation(&self, id: i64) -> Result<(), ApiError> {
        self.call(Endpoint::DeleteConversation(id), None).await?;
        Ok(())
    }

    pub async fn delete_message(&self, id: i64) -> Result<(), ApiError> {
        self.call(Endpoint::DeleteMessage(id), None).await?;
        Ok(())
    }

    /// Trades a Google ID credential for an application token.
    pub async fn exchange_google_credential(
        &self,
        credential: &str,
    ) -> Result<AuthResponse, ApiError> {
        let endpoint = Endpoint::GoogleAuth;
        let request = GoogleAuthRequest { token: credential.to_string() };
        let body = self.call(endpoint, Some(encode(&request)?)).await?;
        decode(endpoint, &body)
    }

    async fn call(&self, endpoint: Endpoint, body: Option<String>) -> Result<String, ApiError> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if endpoint.requires_auth() {
            match self.session.bearer() {
                Some(value) => headers.push(("Authorization".to_string(), value)),
                None => log::warn!("No auth token stored, calling {} unauthenticated", endpoint.path()),
            }
        }

        let request = HttpRequest {
            method: endpoint.method(),
            url: self.config.url(&endpoint.path()),
            headers,
            body,
        };
        log::debug!("{} {}", request.method, request.url);

        let resp = self.transport.execute(request).await?;
        if !resp.ok() {
            return Err(ApiError::Status {
                endpoint: endpoint.path(),
                status: resp.status,
                body: resp.body,
            });
        }
        Ok(resp.body)
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(ApiError::Encode)
}

fn decode<R: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<R, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::decode(endpoint.path(), e))
}
