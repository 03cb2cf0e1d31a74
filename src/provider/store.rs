use std::sync::{Mutex, MutexGuard};

use crate::core::models::{CredentialPair, FlowHandle};
use crate::core::types::AccessToken;

/// Where the authorization code grant stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    NoFlow,
    Started(FlowHandle),
    Authorized(AccessToken),
}

impl Default for FlowState {
    fn default() -> Self {
        Self::NoFlow
    }
}

#[derive(Debug, Default)]
struct Slots {
    credentials: Option<CredentialPair>,
    flow: FlowState,
}

/// Single-tenant holder of the client credentials and the grant state.
///
/// Every accessor takes the lock for one clone or one replacement, so
/// readers never observe a half-written value. Values are validated when
/// their types are constructed.
#[derive(Debug, Default)]
pub struct CredentialStore {
    slots: Mutex<Slots>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        // a panic elsewhere cannot leave a slot half-written
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replaces the credentials. A token or flow belonging to the previous
    /// credentials is discarded with them.
    pub fn set_credentials(&self, pair: CredentialPair) {
        let mut slots = self.lock();
        slots.credentials = Some(pair);
        slots.flow = FlowState::NoFlow;
    }

    pub fn credentials(&self) -> Option<CredentialPair> {
        self.lock().credentials.clone()
    }

    /// Unconditionally marks the grant as authorized with `token`.
    pub fn set_access_token(&self, token: AccessToken) {
        self.lock().flow = FlowState::Authorized(token);
    }

    /// Stores the token obtained for a flow taken with `take_flow`.
    ///
    /// Refused, and the token dropped, when the credentials were replaced or
    /// another flow was started while the code was being exchanged.
    pub fn complete_flow(&self, handle: &FlowHandle, token: AccessToken) -> bool {
        let mut slots = self.lock();
        if slots.credentials.as_ref() != Some(&handle.credentials)
            || slots.flow != FlowState::NoFlow
        {
            return false;
        }
        slots.flow = FlowState::Authorized(token);
        true
    }

    pub fn access_token(&self) -> Option<AccessToken> {
        match &self.lock().flow {
            FlowState::Authorized(token) => Some(token.clone()),
            _ => None,
        }
    }

    /// Stores a freshly started flow, superseding any earlier one.
    pub fn set_flow(&self, handle: FlowHandle) {
        self.lock().flow = FlowState::Started(handle);
    }

    pub fn flow(&self) -> Option<FlowHandle> {
        match &self.lock().flow {
            FlowState::Started(handle) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Removes and returns the started flow. A handle is handed out once.
    pub fn take_flow(&self) -> Option<FlowHandle> {
        let mut slots = self.lock();
        match std::mem::take(&mut slots.flow) {
            FlowState::Started(handle) => Some(handle),
            other => {
                slots.flow = other;
                None
            }
        }
    }

    pub fn state(&self) -> FlowState {
        self.lock().flow.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::*;

    fn pair(id: &str) -> CredentialPair {
        CredentialPair::new(ClientId::new(id).unwrap(), ClientSecret::new("secret").unwrap())
    }

    fn handle(state: &str) -> FlowHandle {
        FlowHandle {
            authorization_uri: "https://bank.example/authorize".parse().unwrap(),
            token_uri: "https://bank.example/token".parse().unwrap(),
            redirect_uri: RedirectUri::new("https://app.example/authorize/oauth2").unwrap(),
            scope: Scope::adaa(),
            credentials: pair("abc"),
            state: State::new(state).unwrap(),
        }
    }

    #[test]
    fn starts_empty() {
        let store = CredentialStore::new();
        assert_eq!(store.credentials(), None);
        assert_eq!(store.access_token(), None);
        assert_eq!(store.state(), FlowState::NoFlow);
    }

    #[test]
    fn later_flow_supersedes_earlier_one() {
        let store = CredentialStore::new();
        store.set_flow(handle("first"));
        store.set_flow(handle("second"));
        assert_eq!(store.flow().unwrap().state.as_str(), "second");
    }

    #[test]
    fn flow_is_taken_once() {
        let store = CredentialStore::new();
        store.set_flow(handle("s"));
        assert!(store.take_flow().is_some());
        assert!(store.take_flow().is_none());
        assert_eq!(store.state(), FlowState::NoFlow);
    }

    fn authorized(store: &CredentialStore) {
        store.set_credentials(pair("abc"));
        store.set_flow(handle("s"));
        let taken = store.take_flow().unwrap();
        assert!(store.complete_flow(&taken, AccessToken::new("tok").unwrap()));
    }

    #[test]
    fn take_flow_keeps_an_existing_token() {
        let store = CredentialStore::new();
        authorized(&store);
        assert!(store.take_flow().is_none());
        assert_eq!(store.access_token(), Some(AccessToken::new("tok").unwrap()));
    }

    #[test]
    fn new_credentials_discard_token() {
        let store = CredentialStore::new();
        authorized(&store);
        store.set_credentials(pair("def"));
        assert_eq!(store.access_token(), None);
        assert_eq!(store.credentials().unwrap().client_id.as_str(), "def");
    }

    #[test]
    fn set_access_token_replaces_a_started_flow() {
        let store = CredentialStore::new();
        store.set_flow(handle("s"));
        store.set_access_token(AccessToken::new("tok").unwrap());
        assert_eq!(store.flow(), None);
        assert_eq!(
            store.state(),
            FlowState::Authorized(AccessToken::new("tok").unwrap())
        );
    }

    #[test]
    fn token_for_replaced_credentials_is_refused() {
        let store = CredentialStore::new();
        store.set_credentials(pair("abc"));
        store.set_flow(handle("s"));
        let taken = store.take_flow().unwrap();

        store.set_credentials(pair("def"));
        assert!(!store.complete_flow(&taken, AccessToken::new("tok").unwrap()));
        assert_eq!(store.state(), FlowState::NoFlow);
    }

    #[test]
    fn token_for_superseded_flow_is_refused() {
        let store = CredentialStore::new();
        store.set_credentials(pair("abc"));
        store.set_flow(handle("old"));
        let taken = store.take_flow().unwrap();

        store.set_flow(handle("new"));
        assert!(!store.complete_flow(&taken, AccessToken::new("tok").unwrap()));
        assert_eq!(store.flow().unwrap().state.as_str(), "new");
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn concurrent_writers_never_tear_pairs() {
        use std::sync::Arc;

        let store = Arc::new(CredentialStore::new());
        let writers: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let id = format!("client-{}", i);
                        store.set_credentials(CredentialPair::new(
                            ClientId::new(id.clone()).unwrap(),
                            ClientSecret::new(format!("{}-secret", id)).unwrap(),
                        ));
                    }
                })
            })
            .collect();

        for _ in 0..200 {
            if let Some(pair) = store.credentials() {
                assert_eq!(
                    pair.client_secret.as_str(),
                    format!("{}-secret", pair.client_id.as_str())
                );
            }
        }
        for w in writers {
            w.join().unwrap();
        }
    }
}
