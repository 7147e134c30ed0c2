use gloo_net::http::{Method as GlooMethod, RequestBuilder};
use rag_chat::{ApiClient, ApiError, ChatStore, ClientConfig, HttpRequest, HttpResponse, Method, Transport};

use crate::storage::LocalTokenStore;

/// Backend overrides captured at build time (see `build.rs`).
pub fn config() -> ClientConfig {
    ClientConfig::from_overrides(
        option_env!("RAG_CHAT_API_URL"),
        option_env!("RAG_CHAT_GOOGLE_CLIENT_ID"),
    )
}

pub type WebClient = ApiClient<FetchTransport, LocalTokenStore>;
pub type WebChatStore = ChatStore<FetchTransport, LocalTokenStore>;

/// `fetch`-backed transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            Method::Get => GlooMethod::GET,
            Method::Post => GlooMethod::POST,
            Method::Delete => GlooMethod::DELETE,
        };

        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let req = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(format!("Invalid request: {e}")))?;

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
