use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    FetchFeed,
    FetchPost,
    ToggleLike,
    DeletePost,
    SubmitAuth,
    SubmitPost,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

/// Task lifecycle state (stored in AppState, mutated only by the reducer).
///
/// Completion events carry their [`TaskId`]; `finish_if_active` is the stale
/// guard that drops results from a mount that has since been navigated away.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
        self.cancel = started.cancel.clone();
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub fetch_feed: TaskState,
    pub fetch_post: TaskState,
    pub toggle_like: TaskState,
    pub delete_post: TaskState,
    pub submit_auth: TaskState,
    pub submit_post: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::FetchFeed => &mut self.fetch_feed,
            TaskKind::FetchPost => &mut self.fetch_post,
            TaskKind::ToggleLike => &mut self.toggle_like,
            TaskKind::DeletePost => &mut self.delete_post,
            TaskKind::SubmitAuth => &mut self.submit_auth,
            TaskKind::SubmitPost => &mut self.submit_post,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.fetch_feed.is_running()
            || self.fetch_post.is_running()
            || self.toggle_like.is_running()
            || self.delete_post.is_running()
            || self.submit_auth.is_running()
            || self.submit_post.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_if_active_rejects_stale_ids() {
        let mut seq = TaskSeq::default();
        let first = seq.next_id();
        let second = seq.next_id();

        let mut state = TaskState::default();
        state.on_started(&TaskStarted {
            id: second,
            cancel: None,
        });

        // A completion from an earlier mount must not finish the newer task.
        assert!(!state.finish_if_active(first));
        assert!(state.is_running());
        assert!(state.finish_if_active(second));
        assert!(!state.is_running());
    }

    #[test]
    fn test_clear_drops_subsequent_completions() {
        let mut seq = TaskSeq::default();
        let id = seq.next_id();

        let mut state = TaskState::default();
        state.on_started(&TaskStarted { id, cancel: None });
        state.clear();

        assert!(!state.finish_if_active(id));
    }
}
