use std::rc::Rc;

use futures::{Stream, StreamExt};

use crate::api::{ApiClient, Transport};
use crate::errors::ApiError;
use crate::session::{Session, TokenStore};

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// Client-side routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            LOGIN_PATH => Route::Login,
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => HOME_PATH,
            Route::Login => LOGIN_PATH,
        }
    }
}

pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Events emitted by the identity widget integration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentityEvent {
    /// Widget script loaded and initialized.
    Ready,
    /// Signed credential handed over by the widget.
    Credential(String),
    /// Widget could not be loaded or initialized.
    Unavailable(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginPhase {
    WidgetPending,
    WidgetReady,
    WidgetUnavailable,
    Authenticated,
}

/// Turns identity widget events into a stored session and a redirect home.
pub struct LoginFlow<T, S, N> {
    client: Rc<ApiClient<T, S>>,
    navigator: N,
    phase: LoginPhase,
}

impl<T: Transport, S: TokenStore, N: Navigator> LoginFlow<T, S, N> {
    pub fn new(client: Rc<ApiClient<T, S>>, navigator: N) -> Self {
        Self { client, navigator, phase: LoginPhase::WidgetPending }
    }

    /// Consumes events until authenticated or the channel closes.
    pub async fn run<E>(mut self, mut events: E) -> LoginPhase
    where
        E: Stream<Item = IdentityEvent> + Unpin,
    {
        while let Some(event) = events.next().await {
            if self.handle(event).await == LoginPhase::Authenticated {
                break;
            }
        }
        self.phase
    }

    pub async fn handle(&mut self, event: IdentityEvent) -> LoginPhase {
        match event {
            IdentityEvent::Ready => {
                log::debug!("Identity widget ready");
                self.phase = LoginPhase::WidgetReady;
            }
            IdentityEvent::Unavailable(reason) => {
                log::error!("{}", ApiError::IdentityUnavailable(reason));
                self.phase = LoginPhase::WidgetUnavailable;
            }
            IdentityEvent::Credential(credential) => match self.authenticate(&credential).await {
                Ok(()) => {
                    log::info!("Authentication successful");
                    self.navigator.navigate(HOME_PATH);
                    self.phase = LoginPhase::Authenticated;
                }
                Err(e) => log::error!("Authentication failed: {e}"),
            },
        }
        self.phase
    }

    async fn authenticate(&self, credential: &str) -> Result<(), ApiError> {
        let resp = self.client.exchange_google_credential(credential).await?;
        let token = resp.app_token().ok_or(ApiError::MissingToken)?;
        self.client.session().sign_in(token)
    }
}

/// Drops the stored token and sends the user to the login page.
/// If the token cannot be removed the user stays where they are.
pub fn logout<S: TokenStore>(
    session: &Session<S>,
    navigator: &impl Navigator,
) -> Result<(), ApiError> {
    session.sign_out()?;
    navigator.navigate(LOGIN_PATH);
    Ok(())
}

#[cfg(test)]
mod tests {
    use futures::channel::mpsc;

    use super::*;
    use crate::session::MemoryTokenStore;
    use crate::testing::{client_with, FakeTransport, RecordingNavigator, StuckTokenStore};

    fn flow_with(
        transport: &FakeTransport,
        store: &MemoryTokenStore,
        navigator: &RecordingNavigator,
    ) -> LoginFlow<FakeTransport, MemoryTokenStore, RecordingNavigator> {
        let client = Rc::new(client_with(transport.clone(), store.clone()));
        LoginFlow::new(client, navigator.clone())
    }

    #[tokio::test]
    async fn test_valid_credential_stores_token_and_goes_home() {
        let transport = FakeTransport::new();
        transport.respond(200, r#"{"token": "app-token", "user": {"email": "a@b.c"}}"#);
        let store = MemoryTokenStore::default();
        let navigator = RecordingNavigator::default();
        let mut flow = flow_with(&transport, &store, &navigator);

        let phase = flow.handle(IdentityEvent::Credential("jwt".to_string())).await;

        assert_eq!(phase, LoginPhase::Authenticated);
        assert_eq!(store.load().as_deref(), Some("app-token"));
        assert_eq!(navigator.visited(), ["/"]);
    }

    #[tokio::test]
    async fn test_rejected_exchange_stores_nothing() {
        let transport = FakeTransport::new();
        transport.respond(400, r#"{"error": "Invalid token"}"#);
        let store = MemoryTokenStore::default();
        let navigator = RecordingNavigator::default();
        let mut flow = flow_with(&transport, &store, &navigator);
        flow.handle(IdentityEvent::Ready).await;

        let phase = flow.handle(IdentityEvent::Credential("bad".to_string())).await;

        assert_eq!(phase, LoginPhase::WidgetReady);
        assert_eq!(store.load(), None);
        assert!(navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_response_without_token_is_a_failure() {
        let transport = FakeTransport::new();
        transport.respond(200, r#"{"user": {}}"#);
        let store = MemoryTokenStore::default();
        let navigator = RecordingNavigator::default();
        let mut flow = flow_with(&transport, &store, &navigator);

        flow.handle(IdentityEvent::Credential("jwt".to_string())).await;

        assert_eq!(store.load(), None);
        assert!(navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_run_stops_after_authentication() {
        let transport = FakeTransport::new();
        transport.fail("offline");
        transport.respond(200, r#"{"tokens": {"access": "acc", "refresh": "ref"}}"#);
        let store = MemoryTokenStore::default();
        let navigator = RecordingNavigator::default();
        let flow = flow_with(&transport, &store, &navigator);

        let (tx, rx) = mpsc::unbounded();
        tx.unbounded_send(IdentityEvent::Ready).unwrap();
        tx.unbounded_send(IdentityEvent::Credential("first".to_string())).unwrap();
        tx.unbounded_send(IdentityEvent::Credential("second".to_string())).unwrap();
        tx.unbounded_send(IdentityEvent::Credential("never read".to_string())).unwrap();

        let phase = flow.run(rx).await;

        assert_eq!(phase, LoginPhase::Authenticated);
        assert_eq!(store.load().as_deref(), Some("acc"));
        assert_eq!(transport.request_count(), 2);
        assert_eq!(navigator.visited(), ["/"]);
    }

    #[tokio::test]
    async fn test_unavailable_widget_ends_with_channel() {
        let transport = FakeTransport::new();
        let store = MemoryTokenStore::default();
        let navigator = RecordingNavigator::default();
        let flow = flow_with(&transport, &store, &navigator);

        let (tx, rx) = mpsc::unbounded();
        tx.unbounded_send(IdentityEvent::Unavailable("script failed".to_string())).unwrap();
        drop(tx);

        assert_eq!(flow.run(rx).await, LoginPhase::WidgetUnavailable);
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_logout_clears_token_and_redirects() {
        let store = MemoryTokenStore::with_token("tok");
        let session = Session::new(store.clone());
        let navigator = RecordingNavigator::default();

        logout(&session, &navigator).unwrap();

        assert_eq!(store.load(), None);
        assert_eq!(navigator.visited(), ["/login"]);
    }

    #[test]
    fn test_logout_stays_put_when_token_cannot_be_removed() {
        let session = Session::new(StuckTokenStore::new("tok"));
        let navigator = RecordingNavigator::default();

        let result = logout(&session, &navigator);

        assert!(matches!(result, Err(ApiError::Storage(_))));
        assert_eq!(session.token().as_deref(), Some("tok"));
        assert!(navigator.visited().is_empty());
    }

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/login"), Route::Login);
        assert_eq!(Route::from_path("/login/"), Route::Login);
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path("/anything"), Route::Home);
        assert_eq!(Route::Login.path(), "/login");
    }
}
