//! Outbound effects for the initiating session.
//!
//! Option sets are typed; button labels are left to the transport.

use serde::{Deserialize, Serialize};

use super::dialogue::FlowKind;
use super::domain::{ActorId, ApplicationId, VacancyId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionSet {
    None,
    /// `find_jobs` / `post_jobs`.
    MainMenu,
    SeekerMenu,
    EmployerMenu,
    /// Resume management; `has_resume` selects create vs. update/view/delete.
    ResumeMenu { has_resume: bool },
    /// Shown after a field update: update again, view, back to the resume menu.
    AfterFieldUpdate,
    CancelOnly { flow: FlowKind },
    Confirm { flow: FlowKind },
    FieldChoice,
    VacancyCard {
        vacancy_id: VacancyId,
        navigation: bool,
        position: usize,
        total: usize,
    },
    /// Apply button without navigation, used by search results.
    ApplyOnly { vacancy_id: VacancyId },
    ApplicationControls { application_id: ApplicationId },
    VacancyManagement { vacancy_id: VacancyId },
    DeletionConfirm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Prompt {
        session_id: ActorId,
        text: String,
        options: OptionSet,
    },
    EditLastMessage {
        session_id: ActorId,
        text: String,
        options: OptionSet,
    },
}

impl Effect {
    pub fn prompt(session_id: ActorId, text: impl Into<String>, options: OptionSet) -> Self {
        Effect::Prompt {
            session_id,
            text: text.into(),
            options,
        }
    }

    pub fn say(session_id: ActorId, text: impl Into<String>) -> Self {
        Self::prompt(session_id, text, OptionSet::None)
    }

    pub fn edit(session_id: ActorId, text: impl Into<String>, options: OptionSet) -> Self {
        Effect::EditLastMessage {
            session_id,
            text: text.into(),
            options,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Effect::Prompt { text, .. } | Effect::EditLastMessage { text, .. } => text,
        }
    }

    pub fn options(&self) -> &OptionSet {
        match self {
            Effect::Prompt { options, .. } | Effect::EditLastMessage { options, .. } => options,
        }
    }
}
