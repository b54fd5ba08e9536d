use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::board::browse::Cursor;
use crate::board::dialogue::DialogueState;
use crate::board::domain::{ActorId, Role, Vacancy};

/// Single free-text input the session is waiting for outside of a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingInput {
    VacancySearch,
    CandidateSearch,
    ResumeDeletion,
}

/// Conversation state of one actor.
#[derive(Debug, Default)]
pub struct Session {
    /// `None` until the role is known, either from the stored account or a
    /// `find_jobs` / `post_jobs` choice.
    pub active_role: Option<Role>,
    pub dialogue: Option<DialogueState>,
    pub cursor: Option<Cursor<Vacancy>>,
    pub pending: Option<PendingInput>,
    pub(crate) seeded: bool,
}

impl Session {
    pub fn reset(&mut self) {
        *self = Session {
            seeded: true,
            ..Session::default()
        };
    }
}

/// One actor's session. `turn` is held for a whole event so events of the same
/// actor never interleave; `state` is only held while the session is read or
/// written.
#[derive(Debug, Default)]
pub struct SessionSlot {
    pub(super) turn: Mutex<()>,
    pub(super) state: Mutex<Session>,
}

impl SessionSlot {
    pub(crate) fn turn(&self) -> MutexGuard<'_, ()> {
        self.turn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the state, recovering it if a previous holder panicked.
    pub(crate) fn state(&self) -> MutexGuard<'_, Session> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Session slots keyed by actor. The registry lock is held only to look up or
/// create a slot.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<ActorId, Arc<SessionSlot>>>,
}

impl SessionRegistry {
    pub fn handle(&self, id: ActorId) -> Arc<SessionSlot> {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(sessions.entry(id).or_default())
    }

    pub fn forget(&self, id: ActorId) {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
