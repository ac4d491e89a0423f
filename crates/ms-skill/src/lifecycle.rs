//! Session start/end hooks.

use std::sync::Mutex;

use ms_protocol::{Session, SkillRequest};

/// Side-effect hooks run around a session. They cannot alter the response.
pub trait SessionLifecycle: Send + Sync {
    /// Called once for a request that opens a new session.
    fn on_start(&self, request: &SkillRequest, session: &Session);

    /// Called when the platform reports the session has ended.
    fn on_end(&self, request: &SkillRequest, session: &Session);
}

/// Default hooks: log and nothing else.
pub struct LoggingLifecycle;

impl SessionLifecycle for LoggingLifecycle {
    fn on_start(&self, request: &SkillRequest, session: &Session) {
        tracing::info!(
            request_id = %request.request_id,
            session_id = %session.session_id,
            "session started"
        );
    }

    fn on_end(&self, request: &SkillRequest, session: &Session) {
        tracing::info!(
            request_id = %request.request_id,
            session_id = %session.session_id,
            reason = request.reason.as_deref().unwrap_or("unspecified"),
            "session ended"
        );
    }
}

/// Which hook fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Started { session_id: String },
    Ended { session_id: String },
}

/// Hooks that record every event, for tests.
#[derive(Default)]
pub struct RecordingLifecycle {
    events: Mutex<Vec<LifecycleEvent>>,
}

impl RecordingLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn start_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, LifecycleEvent::Started { .. }))
            .count()
    }

    pub fn end_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, LifecycleEvent::Ended { .. }))
            .count()
    }
}

impl SessionLifecycle for RecordingLifecycle {
    fn on_start(&self, _request: &SkillRequest, session: &Session) {
        self.events.lock().unwrap().push(LifecycleEvent::Started {
            session_id: session.session_id.clone(),
        });
    }

    fn on_end(&self, _request: &SkillRequest, session: &Session) {
        self.events.lock().unwrap().push(LifecycleEvent::Ended {
            session_id: session.session_id.clone(),
        });
    }
}
