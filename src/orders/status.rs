//! Order Status
//!
//! The kitchen-facing lifecycle of a submitted order.

use std::fmt;

/// Status of a submitted order.
///
/// Orders move `Pending → Preparing → Ready → Completed`; any non-terminal
/// order can be cancelled. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Submitted, not yet picked up by the kitchen.
    Pending,

    /// Being prepared.
    Preparing,

    /// Ready for pickup or service.
    Ready,

    /// Served and paid.
    Completed,

    /// Cancelled before completion.
    Cancelled,
}

impl OrderStatus {
    /// Whether no further transitions are allowed from this status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether a transition from this status to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Preparing)
                | (OrderStatus::Preparing, OrderStatus::Ready)
                | (OrderStatus::Ready, OrderStatus::Completed)
                | (
                    OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready,
                    OrderStatus::Cancelled,
                )
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };

        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_chain_is_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Preparing));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn skipping_ahead_is_rejected() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Ready));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn moving_backwards_is_rejected() {
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Preparing));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn non_terminal_statuses_can_cancel() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn terminal_statuses_reject_everything() {
        for next in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert!(
                !OrderStatus::Completed.can_transition_to(next),
                "completed should reject {next}"
            );
            assert!(
                !OrderStatus::Cancelled.can_transition_to(next),
                "cancelled should reject {next}"
            );
        }
    }

    #[test]
    fn display_uses_lowercase_labels() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    }
}
