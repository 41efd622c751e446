//! Common types and data structures

use std::path::PathBuf;

/// Target backend for an upload. The two slots are identical apart from
/// their label and gateway path.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UploadSlot {
    A,
    B,
}

impl UploadSlot {
    pub fn label(self) -> &'static str {
        match self {
            UploadSlot::A => "A",
            UploadSlot::B => "B",
        }
    }

    /// Gateway path this slot posts to.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            UploadSlot::A => "/api/a",
            UploadSlot::B => "/api/b",
        }
    }

    /// Alert text shown when submit is pressed with no file chosen.
    pub fn missing_file_message(self) -> String {
        format!("Please select a file for Backend {}", self.label())
    }
}

/// A file picked for one of the slots. Selections persist until overwritten
/// by another pick; they are never cleared.
#[derive(Clone, Debug)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

/// Result of one settled upload task, drained by the UI thread.
pub enum UploadOutcome {
    /// The response body parsed as JSON (any HTTP status).
    Response {
        slot: UploadSlot,
        payload: serde_json::Value,
    },
    /// Network failure, unreadable file, or a non-JSON body.
    Failed { slot: UploadSlot, message: String },
}

/// State shared between the UI thread and spawned upload tasks.
///
/// `active` is bumped synchronously on the UI thread before a task is
/// spawned and dropped when the task settles, so both submit buttons
/// disable for the whole window a request is pending. Settled outcomes are
/// applied in settlement order; if two requests ever overlap, the last
/// response wins.
pub struct UploadState {
    pub active: usize,
    pub settled: Vec<UploadOutcome>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            active: 0,
            settled: Vec::new(),
        }
    }
}

impl UploadState {
    pub fn is_submitting(&self) -> bool {
        self.active > 0
    }

    /// Record a settled task. Called from the upload task, never the UI
    /// thread.
    pub fn settle(&mut self, outcome: UploadOutcome) {
        self.active = self.active.saturating_sub(1);
        self.settled.push(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_labels_and_paths() {
        assert_eq!(UploadSlot::A.label(), "A");
        assert_eq!(UploadSlot::B.label(), "B");
        assert_eq!(UploadSlot::A.endpoint_path(), "/api/a");
        assert_eq!(UploadSlot::B.endpoint_path(), "/api/b");
    }

    #[test]
    fn test_missing_file_message() {
        assert_eq!(
            UploadSlot::A.missing_file_message(),
            "Please select a file for Backend A"
        );
        assert_eq!(
            UploadSlot::B.missing_file_message(),
            "Please select a file for Backend B"
        );
    }

    #[test]
    fn test_upload_state_submitting_flag() {
        let mut state = UploadState::default();
        assert!(!state.is_submitting());

        state.active += 1;
        assert!(state.is_submitting());

        state.settle(UploadOutcome::Failed {
            slot: UploadSlot::A,
            message: "connection refused".to_string(),
        });
        assert!(!state.is_submitting());
        assert_eq!(state.settled.len(), 1);
    }

    #[test]
    fn test_settle_preserves_order() {
        let mut state = UploadState::default();
        state.active = 2;
        state.settle(UploadOutcome::Response {
            slot: UploadSlot::A,
            payload: serde_json::json!({"backend": "A"}),
        });
        state.settle(UploadOutcome::Response {
            slot: UploadSlot::B,
            payload: serde_json::json!({"backend": "B"}),
        });

        assert!(!state.is_submitting());
        let slots: Vec<&str> = state
            .settled
            .iter()
            .map(|o| match o {
                UploadOutcome::Response { slot, .. } => slot.label(),
                UploadOutcome::Failed { slot, .. } => slot.label(),
            })
            .collect();
        assert_eq!(slots, vec!["A", "B"]);
    }

    #[test]
    fn test_settle_does_not_underflow() {
        let mut state = UploadState::default();
        state.settle(UploadOutcome::Failed {
            slot: UploadSlot::B,
            message: "late".to_string(),
        });
        assert_eq!(state.active, 0);
    }
}
