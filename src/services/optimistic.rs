//! Optimistic display values for in-flight writes.

/// Lifecycle of a write whose result the UI wants to show before the server
/// confirms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState<T> {
    /// No write outstanding.
    Idle,
    /// A write implying this value is still in flight.
    InFlight(T),
}

/// Prefer the in-flight mutation's implied result while a write is pending;
/// fall back to the authoritative value once settled.
pub fn reconcile_optimistic<T: Clone>(authoritative: T, write: &WriteState<T>) -> T {
    match write {
        WriteState::InFlight(implied) => implied.clone(),
        WriteState::Idle => authoritative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_write_wins_while_in_flight() {
        // A like toggle shows as liked the moment it is sent.
        assert!(reconcile_optimistic(false, &WriteState::InFlight(true)));
    }

    #[test]
    fn authoritative_value_wins_once_settled() {
        assert!(reconcile_optimistic(true, &WriteState::Idle));
        assert!(!reconcile_optimistic(false, &WriteState::Idle));
    }
}
