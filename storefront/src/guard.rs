//! Per-control in-flight guard
//!
//! Each control (a favorite heart, a vote button, ...) is either idle or has
//! one request in flight. Starting an action on a busy control is refused;
//! the second click is dropped, not queued. The control returns to idle when
//! the [`InFlight`] token is dropped, whatever the outcome of the request.

use dashmap::DashSet;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    InFlight,
}

/// Tracks which controls have a request in flight
#[derive(Debug, Clone, Default)]
pub struct ActionGuard {
    busy: Arc<DashSet<String>>,
}

/// Proof that a control's action is running; releases the control on drop
#[derive(Debug)]
pub struct InFlight {
    busy: Arc<DashSet<String>>,
    control: String,
}

impl ActionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a control from idle to in-flight
    ///
    /// Returns `None` when the control already has an action running.
    pub fn try_begin(&self, control: impl Into<String>) -> Option<InFlight> {
        let control = control.into();
        if !self.busy.insert(control.clone()) {
            debug!(%control, "Request already in progress");
            return None;
        }
        Some(InFlight {
            busy: Arc::clone(&self.busy),
            control,
        })
    }

    pub fn state(&self, control: &str) -> ControlState {
        if self.busy.contains(control) {
            ControlState::InFlight
        } else {
            ControlState::Idle
        }
    }
}

impl InFlight {
    pub fn control(&self) -> &str {
        &self.control
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.busy.remove(&self.control);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_action_is_dropped() {
        let guard = ActionGuard::new();
        let first = guard.try_begin("fav:7").unwrap();
        assert_eq!(first.control(), "fav:7");
        assert_eq!(guard.state("fav:7"), ControlState::InFlight);
        assert!(guard.try_begin("fav:7").is_none());
        // other controls are independent
        assert!(guard.try_begin("fav:8").is_some());
    }

    #[test]
    fn test_drop_returns_to_idle() {
        let guard = ActionGuard::new();
        {
            let _token = guard.try_begin("vote:1").unwrap();
        }
        assert_eq!(guard.state("vote:1"), ControlState::Idle);
        assert!(guard.try_begin("vote:1").is_some());
    }

    #[test]
    fn test_clones_share_state() {
        let guard = ActionGuard::new();
        let other = guard.clone();
        let _token = guard.try_begin("cart").unwrap();
        assert_eq!(other.state("cart"), ControlState::InFlight);
    }
}
