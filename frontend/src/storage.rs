use rag_chat::session::AUTH_TOKEN_KEY;
use rag_chat::{ApiError, TokenStore};
use web_sys::Storage;

/// Token store backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTokenStore;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(AUTH_TOKEN_KEY).ok().flatten()
    }

    fn store(&self, token: &str) -> Result<(), ApiError> {
        let storage =
            local_storage().ok_or_else(|| ApiError::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(AUTH_TOKEN_KEY, token)
            .map_err(|e| ApiError::Storage(format!("{e:?}")))
    }

    fn clear(&self) -> Result<(), ApiError> {
        let storage =
            local_storage().ok_or_else(|| ApiError::Storage("localStorage unavailable".to_string()))?;
        storage
            .remove_item(AUTH_TOKEN_KEY)
            .map_err(|e| ApiError::Storage(format!("{e:?}")))
    }
}
