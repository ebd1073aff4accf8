use super::{FrameToken, ListenerId, ListenerKind};

/// Listener table and frame schedule for one container.
///
/// Ids and tokens are never reused, so a stale handle can not alias a newer
/// registration.
#[derive(Debug, Default)]
pub struct HostRegistry {
    listeners: Vec<(ListenerId, ListenerKind)>,
    pending_frame: Option<FrameToken>,
    next_id: u64,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.bump());
        self.listeners.push((id, kind));
        id
    }

    /// Detaching an unknown id is a no-op.
    pub fn detach(&mut self, id: ListenerId) {
        self.listeners.retain(|(l, _)| *l != id);
    }

    /// Whether at least one listener of `kind` is attached.
    pub fn wants(&self, kind: ListenerKind) -> bool {
        self.listeners.iter().any(|(_, k)| *k == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Schedules a frame, replacing any frame still pending.
    pub fn schedule_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.bump());
        self.pending_frame = Some(token);
        token
    }

    /// Cancels `token` if it is the pending frame.
    pub fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending_frame == Some(token) {
            self.pending_frame = None;
        }
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Consumes the pending frame so the host can fire it.
    pub fn take_due_frame(&mut self) -> Option<FrameToken> {
        self.pending_frame.take()
    }

    fn bump(&mut self) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }
}
