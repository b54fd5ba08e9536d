use serde::{Deserialize, Serialize};

use super::draft::{FieldUpdateDraft, RegistrationDraft, ResumeDraft, VacancyDraft};

/// The four multi-step flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    Registration,
    VacancyCreate,
    ResumeCreate,
    ResumeFieldUpdate,
}

impl FlowKind {
    /// Stable identifier that cancels the flow from any of its states.
    pub const fn cancel_token(self) -> &'static str {
        match self {
            FlowKind::Registration => "cancel_registration",
            FlowKind::VacancyCreate => "cancel_vacancy",
            FlowKind::ResumeCreate => "cancel_resume",
            FlowKind::ResumeFieldUpdate => "cancel_update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    Name,
    Phone,
    Email,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacancyStep {
    Title,
    Company,
    Salary,
    Description,
    Requirements,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeStep {
    Position,
    Salary,
    Experience,
    Education,
    Skills,
    About,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStep {
    ChooseField,
    EnterValue,
}

/// Position inside an active flow together with its typed draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum DialogueState {
    Registration {
        step: RegistrationStep,
        draft: RegistrationDraft,
    },
    VacancyCreate {
        step: VacancyStep,
        draft: VacancyDraft,
    },
    ResumeCreate {
        step: ResumeStep,
        draft: ResumeDraft,
    },
    ResumeFieldUpdate {
        step: UpdateStep,
        draft: FieldUpdateDraft,
    },
}

impl DialogueState {
    /// Initial state of a flow with an empty draft.
    pub fn initial(kind: FlowKind) -> Self {
        match kind {
            FlowKind::Registration => DialogueState::Registration {
                step: RegistrationStep::Name,
                draft: RegistrationDraft::default(),
            },
            FlowKind::VacancyCreate => DialogueState::VacancyCreate {
                step: VacancyStep::Title,
                draft: VacancyDraft::default(),
            },
            FlowKind::ResumeCreate => DialogueState::ResumeCreate {
                step: ResumeStep::Position,
                draft: ResumeDraft::default(),
            },
            FlowKind::ResumeFieldUpdate => DialogueState::ResumeFieldUpdate {
                step: UpdateStep::ChooseField,
                draft: FieldUpdateDraft::default(),
            },
        }
    }

    pub fn kind(&self) -> FlowKind {
        match self {
            DialogueState::Registration { .. } => FlowKind::Registration,
            DialogueState::VacancyCreate { .. } => FlowKind::VacancyCreate,
            DialogueState::ResumeCreate { .. } => FlowKind::ResumeCreate,
            DialogueState::ResumeFieldUpdate { .. } => FlowKind::ResumeFieldUpdate,
        }
    }

    pub fn is_confirming(&self) -> bool {
        matches!(
            self,
            DialogueState::Registration {
                step: RegistrationStep::Confirm,
                ..
            } | DialogueState::VacancyCreate {
                step: VacancyStep::Confirm,
                ..
            } | DialogueState::ResumeCreate {
                step: ResumeStep::Confirm,
                ..
            }
        )
    }
}
