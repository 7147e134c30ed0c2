//! Browser-independent core of the rag-chat client: the REST wrapper, session
//! handling, the conversation cache and the view models the Leptos frontend
//! renders.

pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod errors;
pub mod models;
pub mod query;
pub mod session;
pub mod sidebar;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, Endpoint, HttpRequest, HttpResponse, Method, Transport};
pub use chat::{ChatStore, Composer};
pub use config::ClientConfig;
pub use errors::ApiError;
pub use session::{Session, TokenStore};
