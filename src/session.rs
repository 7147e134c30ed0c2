use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::ApiError;

/// Local-storage key the bearer token lives under.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Persistence backend for the bearer token.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str) -> Result<(), ApiError>;
    fn clear(&self) -> Result<(), ApiError>;
}

/// In-memory store, used when browser storage is unavailable and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self { token: Rc::new(RefCell::new(Some(token.to_string()))) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn store(&self, token: &str) -> Result<(), ApiError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        self.token.borrow_mut().take();
        Ok(())
    }
}

/// Explicit session handle passed to the networking layer.
/// The token is read from the store on every call, never cached here.
pub struct Session<S> {
    store: S,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store.load().filter(|t| !t.is_empty())
    }

    /// `Authorization` header value, or `None` when signed out.
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }

    pub fn sign_in(&self, token: &str) -> Result<(), ApiError> {
        self.store.store(token)
    }

    pub fn sign_out(&self) -> Result<(), ApiError> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_reads_store_on_each_call() {
        let store = MemoryTokenStore::default();
        let session = Session::new(store.clone());
        assert_eq!(session.bearer(), None);

        store.store("abc").unwrap();
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc"));

        session.sign_out().unwrap();
        assert_eq!(session.token(), None);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_empty_token_counts_as_signed_out() {
        let session = Session::new(MemoryTokenStore::with_token(""));
        assert_eq!(session.bearer(), None);
    }
}
