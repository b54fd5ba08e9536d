use serde::{Deserialize, Serialize};

use super::domain::ActorId;

/// Message addressed to an actor other than the one whose event is being handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: ActorId,
    pub text: String,
}

impl Notification {
    pub fn new(recipient: ActorId, text: impl Into<String>) -> Self {
        Self {
            recipient,
            text: text.into(),
        }
    }
}

/// Outbound channel to other actors. Delivery is always best effort.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("recipient {0} is unreachable")]
    Unreachable(ActorId),
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
