//! Device status and transaction phase.

/// Overall device health. `Error` is terminal for the current session: every
/// registry mutation is refused until an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Ok,
    Error,
}

/// Position of the current command exchange within the transaction cycle.
///
/// `Idle` is the sole rest state and the initial state after reset. The
/// transport layer drives transitions as it processes a command: a dispatch
/// moves `Idle` into the data phase matching the command's direction (or
/// straight to `Response` for data-less commands), data phases complete into
/// `Response`, and the response completion returns to `Idle`. `NotReady` is
/// the fault parking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePhase {
    NotReady,
    Idle,
    DataIn,
    DataOut,
    Response,
}

impl DevicePhase {
    /// Whether the transport may move the device from `self` to `next`.
    ///
    /// Leaving `NotReady` is deliberately excluded: that only happens through
    /// a full reset, which also restores device status.
    pub fn can_transition_to(self, next: DevicePhase) -> bool {
        use DevicePhase::*;
        matches!(
            (self, next),
            (Idle, DataIn)
                | (Idle, DataOut)
                | (Idle, Response)
                | (DataIn, Response)
                | (DataOut, Response)
                | (Response, Idle)
                | (Idle | DataIn | DataOut | Response, NotReady)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::DevicePhase::*;

    #[test]
    fn transition_graph() {
        assert!(Idle.can_transition_to(DataIn));
        assert!(Idle.can_transition_to(DataOut));
        assert!(Idle.can_transition_to(Response));
        assert!(DataIn.can_transition_to(Response));
        assert!(DataOut.can_transition_to(Response));
        assert!(Response.can_transition_to(Idle));
        assert!(Idle.can_transition_to(NotReady));

        assert!(!Idle.can_transition_to(Idle));
        assert!(!DataIn.can_transition_to(DataOut));
        assert!(!DataIn.can_transition_to(Idle));
        assert!(!Response.can_transition_to(DataIn));
        assert!(!NotReady.can_transition_to(Idle));
        assert!(!NotReady.can_transition_to(NotReady));
    }
}
