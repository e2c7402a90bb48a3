//! Lifecycle of a single outstanding collaborator request.

use crate::error::{BoardError, BoardResult};

/// Where a request slot is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    InFlight,
    Succeeded(T),
    /// Carries the notice shown to the user.
    Failed(String),
}

/// Gate that admits one request at a time.
///
/// There is no cancellation: once [`begin`](Self::begin) succeeds the slot
/// stays busy until [`finish`](Self::finish) is called.
#[derive(Debug, Clone)]
pub struct RequestSlot<T> {
    state: RequestState<T>,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestSlot<T> {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, RequestState::InFlight)
    }

    /// Mark the slot in flight, or fail with [`BoardError::Busy`].
    pub fn begin(&mut self) -> BoardResult<()> {
        if self.is_busy() {
            return Err(BoardError::Busy);
        }
        self.state = RequestState::InFlight;
        Ok(())
    }

    /// Record the outcome. Completions for a slot that is not in flight are
    /// dropped and reported as `false`.
    pub fn finish(&mut self, result: BoardResult<T>) -> bool {
        if !self.is_busy() {
            log::warn!("dropping completion for a request that is not in flight");
            return false;
        }
        self.state = match result {
            Ok(value) => RequestState::Succeeded(value),
            Err(err) => {
                log::warn!("request failed: {err}");
                RequestState::Failed(err.notice())
            }
        };
        true
    }

    pub fn result(&self) -> Option<&T> {
        match &self.state {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(notice) => Some(notice),
            _ => None,
        }
    }

    /// Clear a failure notice back to idle.
    pub fn dismiss(&mut self) {
        if matches!(self.state, RequestState::Failed(_)) {
            self.state = RequestState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_success() {
        let mut slot = RequestSlot::<u32>::new();
        assert_eq!(slot.state(), &RequestState::Idle);
        slot.begin().unwrap();
        assert!(slot.is_busy());
        assert!(slot.finish(Ok(7)));
        assert_eq!(slot.result(), Some(&7));
        assert!(!slot.is_busy());
    }

    #[test]
    fn test_second_request_is_rejected_while_busy() {
        let mut slot = RequestSlot::<u32>::new();
        slot.begin().unwrap();
        assert_eq!(slot.begin(), Err(BoardError::Busy));
        assert!(slot.is_busy());
    }

    #[test]
    fn test_failure_clears_busy_and_keeps_notice() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut slot = RequestSlot::<u32>::new();
        slot.begin().unwrap();
        slot.finish(Err(BoardError::AiRequest("timeout".to_string())));
        assert!(!slot.is_busy());
        assert_eq!(slot.notice(), Some("AI request failed: timeout"));
        // A new request may start after a failure.
        slot.begin().unwrap();
        slot.finish(Ok(1));
        slot.dismiss();
        assert_eq!(slot.result(), Some(&1));
    }

    #[test]
    fn test_dismiss_returns_to_idle() {
        let mut slot = RequestSlot::<u32>::new();
        slot.begin().unwrap();
        slot.finish(Err(BoardError::Busy));
        slot.dismiss();
        assert_eq!(slot.state(), &RequestState::Idle);
    }

    #[test]
    fn test_stray_completion_is_ignored() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut slot = RequestSlot::<u32>::new();
        assert!(!slot.finish(Ok(3)));
        assert_eq!(slot.state(), &RequestState::Idle);
    }
}
