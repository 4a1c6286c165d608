//! Identity display adapter
//!
//! Wraps an external interactive sign-in provider and exposes only a
//! "current display name or none" signal. The provider is the seam: it
//! performs the actual sign-in/sign-out flows and pushes session changes
//! over a channel the adapter subscribes to for the lifetime of the
//! process (dropping the adapter drops the subscription).
//!
//! Identity is purely cosmetic. No item-data operation consults it, and
//! a provider failure leaves the cached identity exactly as it was.

use std::sync::mpsc::Receiver;

use thiserror::Error;

/// A signed-in user's display information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayIdentity {
    /// Human display name, when the provider supplies one
    pub display_name: Option<String>,
    /// Account email
    pub email: String,
}

impl DisplayIdentity {
    /// Greeting text: the display name, falling back to the email
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Error reported when the external provider fails
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("authentication failed: {message}")]
pub struct AuthFailed {
    pub message: String,
}

impl AuthFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Session change pushed by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(DisplayIdentity),
    SignedOut,
}

/// The external identity provider seam
///
/// Implementations own the interactive flows (popups, token refresh,
/// session restoration); the adapter only cares about the results.
pub trait IdentityProvider {
    /// Run the interactive sign-in flow
    fn sign_in(&mut self) -> Result<DisplayIdentity, AuthFailed>;

    /// End the current session
    fn sign_out(&mut self) -> Result<(), AuthFailed>;

    /// Subscribe to provider-pushed session changes
    ///
    /// Called once by the adapter at construction; the subscription lives
    /// as long as the returned receiver.
    fn subscribe(&mut self) -> Receiver<SessionEvent>;
}

/// Caches the last known identity and tracks provider session changes
pub struct IdentityAdapter<P: IdentityProvider> {
    provider: P,
    events: Receiver<SessionEvent>,
    current: Option<DisplayIdentity>,
}

impl<P: IdentityProvider> IdentityAdapter<P> {
    /// Wrap a provider, subscribing to its session changes
    pub fn new(mut provider: P) -> Self {
        let events = provider.subscribe();
        Self {
            provider,
            events,
            current: None,
        }
    }

    /// Run the provider's sign-in flow
    ///
    /// On failure the cached identity is unchanged (still signed out, or
    /// still whatever it was).
    pub fn sign_in(&mut self) -> Result<DisplayIdentity, AuthFailed> {
        let identity = self.provider.sign_in()?;
        self.current = Some(identity.clone());
        Ok(identity)
    }

    /// End the session and clear the cached identity
    ///
    /// On failure the cached identity is unchanged.
    pub fn sign_out(&mut self) -> Result<(), AuthFailed> {
        self.provider.sign_out()?;
        self.current = None;
        Ok(())
    }

    /// The last known identity, or `None` when signed out
    ///
    /// Applies any session changes the provider pushed since the last
    /// call before answering.
    pub fn current_identity(&mut self) -> Option<&DisplayIdentity> {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SessionEvent::SignedIn(identity) => self.current = Some(identity),
                SessionEvent::SignedOut => self.current = None,
            }
        }
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{channel, Sender};

    /// Scripted provider for tests: queued sign-in outcomes plus a handle
    /// for pushing session events
    struct ScriptedProvider {
        sign_in_results: Vec<Result<DisplayIdentity, AuthFailed>>,
        sign_out_result: Result<(), AuthFailed>,
        push: Option<Sender<SessionEvent>>,
    }

    impl ScriptedProvider {
        fn new() -> Self {
            Self {
                sign_in_results: Vec::new(),
                sign_out_result: Ok(()),
                push: None,
            }
        }
    }

    impl IdentityProvider for ScriptedProvider {
        fn sign_in(&mut self) -> Result<DisplayIdentity, AuthFailed> {
            self.sign_in_results
                .pop()
                .unwrap_or_else(|| Err(AuthFailed::new("no scripted result")))
        }

        fn sign_out(&mut self) -> Result<(), AuthFailed> {
            self.sign_out_result.clone()
        }

        fn subscribe(&mut self) -> Receiver<SessionEvent> {
            let (tx, rx) = channel();
            self.push = Some(tx);
            rx
        }
    }

    fn pinky() -> DisplayIdentity {
        DisplayIdentity {
            display_name: Some("Pinky".to_string()),
            email: "pinky@example.com".to_string(),
        }
    }

    #[test]
    fn test_label_prefers_display_name() {
        assert_eq!(pinky().label(), "Pinky");

        let nameless = DisplayIdentity {
            display_name: None,
            email: "pinky@example.com".to_string(),
        };
        assert_eq!(nameless.label(), "pinky@example.com");
    }

    #[test]
    fn test_sign_in_caches_identity() {
        let mut provider = ScriptedProvider::new();
        provider.sign_in_results.push(Ok(pinky()));

        let mut adapter = IdentityAdapter::new(provider);
        assert!(adapter.current_identity().is_none());

        let identity = adapter.sign_in().unwrap();
        assert_eq!(identity, pinky());
        assert_eq!(adapter.current_identity(), Some(&pinky()));
    }

    #[test]
    fn test_failed_sign_in_leaves_state_unchanged() {
        let mut provider = ScriptedProvider::new();
        provider
            .sign_in_results
            .push(Err(AuthFailed::new("popup closed")));

        let mut adapter = IdentityAdapter::new(provider);
        let err = adapter.sign_in().unwrap_err();
        assert!(err.to_string().contains("popup closed"));
        assert!(adapter.current_identity().is_none());
    }

    #[test]
    fn test_sign_out_clears_identity() {
        let mut provider = ScriptedProvider::new();
        provider.sign_in_results.push(Ok(pinky()));

        let mut adapter = IdentityAdapter::new(provider);
        adapter.sign_in().unwrap();

        adapter.sign_out().unwrap();
        assert!(adapter.current_identity().is_none());
    }

    #[test]
    fn test_failed_sign_out_keeps_identity() {
        let mut provider = ScriptedProvider::new();
        provider.sign_in_results.push(Ok(pinky()));
        provider.sign_out_result = Err(AuthFailed::new("network down"));

        let mut adapter = IdentityAdapter::new(provider);
        adapter.sign_in().unwrap();

        assert!(adapter.sign_out().is_err());
        assert_eq!(adapter.current_identity(), Some(&pinky()));
    }

    #[test]
    fn test_provider_pushed_events_update_identity() {
        let mut adapter = IdentityAdapter::new(ScriptedProvider::new());
        let push = adapter.provider.push.clone().unwrap();

        // Session restored by the provider out of band
        push.send(SessionEvent::SignedIn(pinky())).unwrap();
        assert_eq!(adapter.current_identity(), Some(&pinky()));

        // Session expired on the provider side
        push.send(SessionEvent::SignedOut).unwrap();
        assert!(adapter.current_identity().is_none());
    }

    #[test]
    fn test_latest_pushed_event_wins() {
        let mut adapter = IdentityAdapter::new(ScriptedProvider::new());
        let push = adapter.provider.push.clone().unwrap();

        push.send(SessionEvent::SignedIn(pinky())).unwrap();
        push.send(SessionEvent::SignedOut).unwrap();
        push.send(SessionEvent::SignedIn(pinky())).unwrap();

        assert_eq!(adapter.current_identity(), Some(&pinky()));
    }

    #[test]
    fn test_disconnected_provider_keeps_last_identity() {
        let mut adapter = IdentityAdapter::new(ScriptedProvider::new());
        let push = adapter.provider.push.clone().unwrap();
        push.send(SessionEvent::SignedIn(pinky())).unwrap();
        assert!(adapter.current_identity().is_some());

        adapter.provider.push = None;
        drop(push);
        // Channel closed; the cached identity survives
        assert_eq!(adapter.current_identity(), Some(&pinky()));
    }
}
