use serde::{Deserialize, Serialize};

use crate::board::domain::ActorId;
use crate::board::lifecycle::ActorProfile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEvent {
    pub session_id: ActorId,
    pub text: String,
    #[serde(flatten)]
    pub profile: ActorProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEvent {
    pub session_id: ActorId,
    pub callback_id: String,
    #[serde(flatten)]
    pub profile: ActorProfile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Text(TextEvent),
    Button(ButtonEvent),
}

impl InboundEvent {
    pub fn text(session_id: ActorId, text: impl Into<String>) -> Self {
        InboundEvent::Text(TextEvent {
            session_id,
            text: text.into(),
            profile: ActorProfile::default(),
        })
    }

    pub fn button(session_id: ActorId, callback_id: impl Into<String>) -> Self {
        InboundEvent::Button(ButtonEvent {
            session_id,
            callback_id: callback_id.into(),
            profile: ActorProfile::default(),
        })
    }

    pub fn session_id(&self) -> ActorId {
        match self {
            InboundEvent::Text(event) => event.session_id,
            InboundEvent::Button(event) => event.session_id,
        }
    }

    pub fn profile(&self) -> &ActorProfile {
        match self {
            InboundEvent::Text(event) => &event.profile,
            InboundEvent::Button(event) => &event.profile,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let profile = match &mut self {
            InboundEvent::Text(event) => &mut event.profile,
            InboundEvent::Button(event) => &mut event.profile,
        };
        profile.display_name = Some(name.into());
        self
    }
}

impl From<TextEvent> for InboundEvent {
    fn from(event: TextEvent) -> Self {
        InboundEvent::Text(event)
    }
}

impl From<ButtonEvent> for InboundEvent {
    fn from(event: ButtonEvent) -> Self {
        InboundEvent::Button(event)
    }
}
