mod event;
mod store;
mod tokens;

pub use self::event::{AuthEvent, LoginRequiredReason};
pub use self::store::{FileSessionStore, MemorySessionStore};
pub use self::tokens::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, Tokens};

use crate::abstract_trait::DynSessionStore;
use shared::errors::ClientError;
use std::fmt;
use tokio::sync::{Mutex, MutexGuard, RwLock, broadcast};
use tracing::{info, warn};

const EVENT_CAPACITY: usize = 16;

/// Client-side authentication state shared by every request.
///
/// The in-memory copy is authoritative; each write is mirrored to the
/// store. Every write goes through a [`SessionWriter`], so a login, a
/// logout and a token refresh never interleave.
pub struct Session {
    tokens: RwLock<Tokens>,
    store: DynSessionStore,
    events: broadcast::Sender<AuthEvent>,
    write_guard: Mutex<()>,
}

impl Session {
    pub fn new(store: DynSessionStore) -> Self {
        Self::with_tokens(store, Tokens::default())
    }

    fn with_tokens(store: DynSessionStore, tokens: Tokens) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            tokens: RwLock::new(tokens),
            store,
            events,
            write_guard: Mutex::new(()),
        }
    }

    /// Loads the persisted tokens. An unreadable store starts an empty
    /// session instead of failing.
    pub async fn restore(store: DynSessionStore) -> Self {
        let tokens = match store.load().await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!("Discarding unreadable session: {err}");
                Tokens::default()
            }
        };

        if tokens.has_access_token() {
            info!("Restored persisted session");
        }

        Self::with_tokens(store, tokens)
    }

    pub async fn tokens(&self) -> Tokens {
        self.tokens.read().await.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        let tokens = self.tokens.read().await;
        tokens
            .has_access_token()
            .then(|| tokens.access_token.clone())
    }

    pub async fn refresh_token(&self) -> Option<String> {
        let tokens = self.tokens.read().await;
        tokens
            .has_refresh_token()
            .then(|| tokens.refresh_token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.has_access_token()
    }

    /// Waits for any in-flight refresh before installing the pair.
    pub async fn set_tokens(&self, tokens: Tokens) -> Result<(), ClientError> {
        self.lock_writes().await.set_tokens(tokens).await
    }

    /// Waits for any in-flight refresh before dropping both tokens.
    pub async fn clear(&self) -> Result<(), ClientError> {
        self.lock_writes().await.clear().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: AuthEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub(crate) async fn lock_writes(&self) -> SessionWriter<'_> {
        SessionWriter {
            _guard: self.write_guard.lock().await,
            session: self,
        }
    }
}

/// Exclusive write access to a [`Session`]. A refresh holds one across the
/// token exchange.
pub(crate) struct SessionWriter<'a> {
    session: &'a Session,
    _guard: MutexGuard<'a, ()>,
}

impl SessionWriter<'_> {
    pub(crate) async fn tokens(&self) -> Tokens {
        self.session.tokens().await
    }

    // The tokens lock is held across the store write so memory and disk
    // agree on the last write.
    pub(crate) async fn set_tokens(&self, tokens: Tokens) -> Result<(), ClientError> {
        let mut current = self.session.tokens.write().await;
        *current = tokens;
        self.session.store.save(&current).await
    }

    pub(crate) async fn clear(&self) -> Result<(), ClientError> {
        let mut current = self.session.tokens.write().await;
        *current = Tokens::default();
        self.session.store.clear().await
    }

    /// Drops both tokens and tells subscribers a fresh login is needed.
    pub(crate) async fn expire(&self, reason: LoginRequiredReason) {
        if let Err(err) = self.clear().await {
            warn!("Failed to clear persisted session: {err}");
        }
        self.session.emit(AuthEvent::LoginRequired(reason));
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::SessionStoreTrait;
    use std::sync::Arc;

    #[tokio::test]
    async fn restore_reads_persisted_tokens() {
        let store = Arc::new(MemorySessionStore::with_tokens(Tokens::new("T0", "R0")));
        let session = Session::restore(store).await;

        assert!(session.is_authenticated().await);
        assert_eq!(session.access_token().await.as_deref(), Some("T0"));
        assert_eq!(session.refresh_token().await.as_deref(), Some("R0"));
    }

    #[tokio::test]
    async fn writes_are_mirrored_to_the_store() {
        let store = Arc::new(MemorySessionStore::default());
        let session = Session::new(store.clone());

        session.set_tokens(Tokens::new("T1", "R1")).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Tokens::new("T1", "R1"));

        session.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), Tokens::default());
        assert!(!session.is_authenticated().await);
        assert_eq!(session.refresh_token().await, None);
    }

    #[tokio::test]
    async fn expire_clears_and_notifies() {
        let store = Arc::new(MemorySessionStore::with_tokens(Tokens::new("T0", "R0")));
        let session = Session::restore(store.clone()).await;
        let mut events = session.subscribe();

        session
            .lock_writes()
            .await
            .expire(LoginRequiredReason::RefreshRejected)
            .await;

        assert_eq!(session.tokens().await, Tokens::default());
        assert_eq!(store.load().await.unwrap(), Tokens::default());
        assert_eq!(
            events.recv().await.unwrap(),
            AuthEvent::LoginRequired(LoginRequiredReason::RefreshRejected)
        );
    }

    #[tokio::test]
    async fn writes_wait_for_the_held_writer() {
        let store = Arc::new(MemorySessionStore::with_tokens(Tokens::new("T0", "R0")));
        let session = Arc::new(Session::restore(store.clone()).await);

        let writer = session.lock_writes().await;
        let logout = tokio::spawn({
            let session = session.clone();
            async move { session.clear().await }
        });
        tokio::task::yield_now().await;

        writer.set_tokens(Tokens::new("T1", "R1")).await.unwrap();
        assert!(!logout.is_finished());
        drop(writer);

        logout.await.unwrap().unwrap();
        assert_eq!(session.tokens().await, Tokens::default());
        assert_eq!(store.load().await.unwrap(), Tokens::default());
    }
}
