//! Availability gate — decided once at startup, read-only afterwards.

use tracing::{info, warn};

use crate::llm_client::CompletionService;

/// Why AI calls are bypassed, when they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    MissingCredential,
    ProbeFailed(String),
}

/// Whether a completion-service credential was configured (and, if probed, accepted).
///
/// Plain data: cloned into the orchestrator, never mutated, so concurrent
/// readers need no locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityGate {
    unavailable: Option<Unavailable>,
}

impl AvailabilityGate {
    pub fn available() -> Self {
        Self { unavailable: None }
    }

    pub fn unavailable(reason: Unavailable) -> Self {
        Self {
            unavailable: Some(reason),
        }
    }

    /// Gate from the credential alone, without contacting the provider.
    pub fn from_credential(credential: &str) -> Self {
        if credential.trim().is_empty() {
            Self::unavailable(Unavailable::MissingCredential)
        } else {
            Self::available()
        }
    }

    /// Startup initialization. An empty credential disables AI. With `probe`
    /// set, a rejected credential also disables AI; the failure is logged and
    /// the process keeps running in degraded mode.
    pub async fn initialize(
        credential: &str,
        service: &dyn CompletionService,
        probe: bool,
    ) -> Self {
        let gate = Self::from_credential(credential);
        if !gate.is_available() {
            warn!("No GOOGLE_API_KEY found. AI features will be disabled.");
            return gate;
        }

        if probe {
            if let Err(e) = service.probe().await {
                warn!("Could not configure completion service: {e}. AI features will be disabled.");
                return Self::unavailable(Unavailable::ProbeFailed(e.to_string()));
            }
        }

        info!("Completion service configured successfully");
        gate
    }

    pub fn is_available(&self) -> bool {
        self.unavailable.is_none()
    }

    pub fn reason(&self) -> Option<&Unavailable> {
        self.unavailable.as_ref()
    }
}
