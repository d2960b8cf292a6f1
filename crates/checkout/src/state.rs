//! Checkout invocation state machine.

use serde::{Deserialize, Serialize};

/// The state of a single checkout invocation.
///
/// State transitions:
/// ```text
/// Validating ──► Building ──► Persisting ──► NotifyingQueue ──► NotifyingDelivery ──► Committed
///     │             │             │                 │                  │
///     └─────────────┴─────────────┴──► Failed       └──────────────────┴──► CommittedWithWarnings
/// ```
///
/// `Failed` is only reachable before persistence succeeds. Once the order
/// is persisted, a downstream failure ends in `CommittedWithWarnings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// Resolving and validating the basket.
    #[default]
    Validating,

    /// Resolving catalog snapshots and building the order.
    Building,

    /// Writing the order to the store.
    Persisting,

    /// Publishing the order-items notification to the queue.
    NotifyingQueue,

    /// Calling the delivery-fulfillment endpoint.
    NotifyingDelivery,

    /// Order persisted and all notifications delivered (terminal).
    Committed,

    /// Order persisted, one or more notifications parked for retry
    /// (terminal).
    CommittedWithWarnings,

    /// Nothing was committed (terminal).
    Failed,
}

impl CheckoutState {
    /// Returns true if the order exists in the store in this state.
    pub fn is_committed(&self) -> bool {
        matches!(
            self,
            CheckoutState::Committed | CheckoutState::CommittedWithWarnings
        )
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutState::Committed | CheckoutState::CommittedWithWarnings | CheckoutState::Failed
        )
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Validating => "Validating",
            CheckoutState::Building => "Building",
            CheckoutState::Persisting => "Persisting",
            CheckoutState::NotifyingQueue => "NotifyingQueue",
            CheckoutState::NotifyingDelivery => "NotifyingDelivery",
            CheckoutState::Committed => "Committed",
            CheckoutState::CommittedWithWarnings => "CommittedWithWarnings",
            CheckoutState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_validating() {
        assert_eq!(CheckoutState::default(), CheckoutState::Validating);
    }

    #[test]
    fn test_committed_states() {
        assert!(CheckoutState::Committed.is_committed());
        assert!(CheckoutState::CommittedWithWarnings.is_committed());
        assert!(!CheckoutState::Failed.is_committed());
        assert!(!CheckoutState::Persisting.is_committed());
    }

    #[test]
    fn test_terminal_states() {
        assert!(CheckoutState::Committed.is_terminal());
        assert!(CheckoutState::CommittedWithWarnings.is_terminal());
        assert!(CheckoutState::Failed.is_terminal());
        assert!(!CheckoutState::Validating.is_terminal());
        assert!(!CheckoutState::NotifyingQueue.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(CheckoutState::Committed.to_string(), "Committed");
        assert_eq!(
            CheckoutState::CommittedWithWarnings.to_string(),
            "CommittedWithWarnings"
        );
    }

    #[test]
    fn test_serialization() {
        let state = CheckoutState::NotifyingQueue;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: CheckoutState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
