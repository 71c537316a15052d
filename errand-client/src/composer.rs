use errand_core::TaskDraft;

/// Lifecycle of one task-creation attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CreationState {
    #[default]
    Idle,
    Submitting,
    Committed { id: String },
    Failed { message: String },
}

/// Holds the entered fields across a creation attempt, so a failed submit
/// keeps title, description and picked location available for retry.
#[derive(Debug, Clone, Default)]
pub struct CreationFlow {
    draft: TaskDraft,
    state: CreationState,
}

impl CreationFlow {
    pub fn new(draft: TaskDraft) -> Self {
        Self {
            draft,
            state: CreationState::Idle,
        }
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.draft
    }

    pub fn state(&self) -> CreationState {
        self.state.clone()
    }

    /// Enter `Submitting` and hand out a copy of the draft. Refuses blank
    /// titles (the attempt is simply not made) and double submission while
    /// one is already in flight.
    pub(crate) fn begin_submit(&mut self) -> Option<TaskDraft> {
        if self.draft.title.trim().is_empty() {
            return None;
        }
        if self.state == CreationState::Submitting {
            tracing::debug!("submission already in flight, ignoring");
            return None;
        }
        self.state = CreationState::Submitting;
        Some(self.draft.clone())
    }

    pub(crate) fn committed(&mut self, id: String) {
        self.state = CreationState::Committed { id };
    }

    pub(crate) fn failed(&mut self, message: String) {
        self.state = CreationState::Failed { message };
    }

    /// The initiating view went away; forget the attempt but keep the
    /// draft.
    pub(crate) fn abandoned(&mut self) {
        self.state = CreationState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: String::new(),
            location: None,
        }
    }

    #[test]
    fn test_blank_title_never_enters_submitting() {
        let mut flow = CreationFlow::new(draft("   "));
        assert!(flow.begin_submit().is_none());
        assert_eq!(flow.state(), CreationState::Idle);
    }

    #[test]
    fn test_double_submission_is_refused() {
        let mut flow = CreationFlow::new(draft("Buy milk"));
        assert!(flow.begin_submit().is_some());
        assert!(flow.begin_submit().is_none());
        assert_eq!(flow.state(), CreationState::Submitting);
    }

    #[test]
    fn test_failure_preserves_the_draft() {
        let mut flow = CreationFlow::new(draft("Buy milk"));
        flow.begin_submit();
        flow.failed("connection refused".to_string());

        assert!(matches!(flow.state(), CreationState::Failed { .. }));
        assert_eq!(flow.draft().title, "Buy milk");

        // A retry is possible from the failed state.
        assert!(flow.begin_submit().is_some());
    }
}
