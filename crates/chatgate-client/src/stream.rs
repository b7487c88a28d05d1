//! Per-call streaming state.

/// Lifecycle phases of a single chat call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// Request sent, stream not yet open.
    Sending,
    /// Event stream open, deltas arriving.
    Streaming,
    /// Terminal: finished normally (sentinel, close, or diagnostic).
    Finished,
    /// Terminal: cancelled by the caller.
    Aborted,
}

/// Accumulated text for one streaming call.
///
/// Created at call start, mutated by each incoming event, terminal exactly
/// once: whichever of sentinel, upstream close, or cancellation fires first
/// wins, and later terminal events are no-ops.
#[derive(Debug, Default)]
pub struct StreamState {
    text: String,
    finished: bool,
}

impl StreamState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delta. Returns false when the state is already terminal.
    pub fn append(&mut self, delta: &str) -> bool {
        if self.finished {
            return false;
        }
        self.text.push_str(delta);
        true
    }

    /// Replace the buffer wholesale (plain-text bodies, diagnostics).
    pub fn set_text(&mut self, text: String) {
        if !self.finished {
            self.text = text;
        }
    }

    /// The text accumulated so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Mark the call terminal. Returns the accumulated text the first time
    /// and `None` on every later call.
    pub fn finish(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }
        self.finished = true;
        Some(std::mem::take(&mut self.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_deltas_in_order() {
        let mut state = StreamState::new();
        assert!(state.append("Hel"));
        assert_eq!(state.text(), "Hel");
        assert!(state.append("lo"));
        assert_eq!(state.text(), "Hello");
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut state = StreamState::new();
        state.append("Hello");
        assert_eq!(state.finish(), Some("Hello".to_string()));
        assert_eq!(state.finish(), None);
        assert!(state.is_finished());
    }

    #[test]
    fn test_append_after_finish_is_noop() {
        let mut state = StreamState::new();
        state.append("Hel");
        state.finish();
        assert!(!state.append("lo"));
    }

    #[test]
    fn test_set_text_after_finish_is_noop() {
        let mut state = StreamState::new();
        state.finish();
        state.set_text("late".to_string());
        assert_eq!(state.text(), "");
    }
}
