//! Pure dialogue transition: `(state, input) -> Transition`, no I/O.

use super::draft::Commit;
use super::state::{
    DialogueState, FlowKind, RegistrationStep, ResumeStep, UpdateStep, VacancyStep,
};
use crate::board::domain::ResumeField;
use crate::board::validation::{validate_email, validate_phone};

const AFFIRMATIVE: [&str; 4] = ["так", "yes", "ok", "підтверджую"];
const NEGATIVE: [&str; 4] = ["ні", "no", "cancel", "скасувати"];

/// Why an input was refused. The state does not advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputProblem {
    Empty,
    InvalidPhone,
    InvalidEmail,
    UnknownField,
    Unconfirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Advance(DialogueState),
    Reprompt {
        state: DialogueState,
        problem: InputProblem,
    },
    Commit(Commit),
    /// Cancel token or negative confirmation; the draft is dropped.
    Discard(FlowKind),
}

/// Answer at a confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

impl Confirmation {
    pub fn parse(raw: &str) -> Option<Self> {
        let folded = raw.trim().to_lowercase();
        if AFFIRMATIVE.contains(&folded.as_str()) {
            Some(Confirmation::Yes)
        } else if NEGATIVE.contains(&folded.as_str()) {
            Some(Confirmation::No)
        } else {
            None
        }
    }
}

fn non_empty(input: &str) -> Result<String, InputProblem> {
    if input.trim().is_empty() {
        Err(InputProblem::Empty)
    } else {
        Ok(input.to_string())
    }
}

fn reprompt(state: DialogueState, problem: InputProblem) -> Transition {
    Transition::Reprompt { state, problem }
}

pub fn transition(state: DialogueState, input: &str) -> Transition {
    let kind = state.kind();
    if input.trim() == kind.cancel_token() {
        return Transition::Discard(kind);
    }

    match state {
        DialogueState::Registration { step, mut draft } => match step {
            RegistrationStep::Confirm => match Confirmation::parse(input) {
                Some(Confirmation::Yes) => Transition::Commit(Commit::Registration(draft)),
                Some(Confirmation::No) => Transition::Discard(kind),
                None => reprompt(
                    DialogueState::Registration { step, draft },
                    InputProblem::Unconfirmed,
                ),
            },
            RegistrationStep::Phone if !validate_phone(input) => reprompt(
                DialogueState::Registration { step, draft },
                InputProblem::InvalidPhone,
            ),
            RegistrationStep::Email if !validate_email(input.trim()) => reprompt(
                DialogueState::Registration { step, draft },
                InputProblem::InvalidEmail,
            ),
            _ => match non_empty(input) {
                Err(problem) => reprompt(DialogueState::Registration { step, draft }, problem),
                Ok(value) => {
                    let next = match step {
                        RegistrationStep::Name => {
                            draft.name = value;
                            RegistrationStep::Phone
                        }
                        RegistrationStep::Phone => {
                            draft.phone = value.trim().to_string();
                            RegistrationStep::Email
                        }
                        RegistrationStep::Email | RegistrationStep::Confirm => {
                            draft.email = value.trim().to_string();
                            RegistrationStep::Confirm
                        }
                    };
                    Transition::Advance(DialogueState::Registration { step: next, draft })
                }
            },
        },

        DialogueState::VacancyCreate { step, mut draft } => {
            if step == VacancyStep::Confirm {
                return match Confirmation::parse(input) {
                    Some(Confirmation::Yes) => Transition::Commit(Commit::Vacancy(draft)),
                    Some(Confirmation::No) => Transition::Discard(kind),
                    None => reprompt(
                        DialogueState::VacancyCreate { step, draft },
                        InputProblem::Unconfirmed,
                    ),
                };
            }
            let value = match non_empty(input) {
                Ok(value) => value,
                Err(problem) => {
                    return reprompt(DialogueState::VacancyCreate { step, draft }, problem)
                }
            };
            let next = match step {
                VacancyStep::Title => {
                    draft.title = value;
                    VacancyStep::Company
                }
                VacancyStep::Company => {
                    draft.company = value;
                    VacancyStep::Salary
                }
                VacancyStep::Salary => {
                    draft.salary = value;
                    VacancyStep::Description
                }
                VacancyStep::Description => {
                    draft.description = value;
                    VacancyStep::Requirements
                }
                VacancyStep::Requirements | VacancyStep::Confirm => {
                    draft.requirements = value;
                    VacancyStep::Confirm
                }
            };
            Transition::Advance(DialogueState::VacancyCreate { step: next, draft })
        }

        DialogueState::ResumeCreate { step, mut draft } => {
            if step == ResumeStep::Confirm {
                return match Confirmation::parse(input) {
                    Some(Confirmation::Yes) => Transition::Commit(Commit::Resume(draft)),
                    Some(Confirmation::No) => Transition::Discard(kind),
                    None => reprompt(
                        DialogueState::ResumeCreate { step, draft },
                        InputProblem::Unconfirmed,
                    ),
                };
            }
            let value = match non_empty(input) {
                Ok(value) => value,
                Err(problem) => {
                    return reprompt(DialogueState::ResumeCreate { step, draft }, problem)
                }
            };
            let next = match step {
                ResumeStep::Position => {
                    draft.position = value;
                    ResumeStep::Salary
                }
                ResumeStep::Salary => {
                    draft.salary = value;
                    ResumeStep::Experience
                }
                ResumeStep::Experience => {
                    draft.experience = value;
                    ResumeStep::Education
                }
                ResumeStep::Education => {
                    draft.education = value;
                    ResumeStep::Skills
                }
                ResumeStep::Skills => {
                    draft.skills = value;
                    ResumeStep::About
                }
                ResumeStep::About | ResumeStep::Confirm => {
                    draft.about = value;
                    ResumeStep::Confirm
                }
            };
            Transition::Advance(DialogueState::ResumeCreate { step: next, draft })
        }

        DialogueState::ResumeFieldUpdate { step, mut draft } => match (step, draft.field) {
            (UpdateStep::ChooseField, _) => match ResumeField::from_id(input) {
                Some(field) => {
                    draft.field = Some(field);
                    Transition::Advance(DialogueState::ResumeFieldUpdate {
                        step: UpdateStep::EnterValue,
                        draft,
                    })
                }
                None => reprompt(
                    DialogueState::ResumeFieldUpdate { step, draft },
                    InputProblem::UnknownField,
                ),
            },
            (UpdateStep::EnterValue, Some(field)) => match non_empty(input) {
                Ok(value) => Transition::Commit(Commit::FieldUpdate { field, value }),
                Err(problem) => {
                    reprompt(DialogueState::ResumeFieldUpdate { step, draft }, problem)
                }
            },
            // A value step without a chosen field falls back to the choice.
            (UpdateStep::EnterValue, None) => reprompt(
                DialogueState::ResumeFieldUpdate {
                    step: UpdateStep::ChooseField,
                    draft,
                },
                InputProblem::UnknownField,
            ),
        },
    }
}
