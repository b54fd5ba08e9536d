//! Multi-step flows: registration, vacancy creation, resume creation and the
//! single-field resume update.
//!
//! [`transition`] is the pure step function; [`DialogueEngine`] gates flow
//! starts, renders prompts against the stored records and writes commits.

mod draft;
mod prompt;
mod state;
mod transition;

use std::sync::Arc;

pub use draft::{Commit, FieldUpdateDraft, RegistrationDraft, ResumeDraft, VacancyDraft};
pub use prompt::{problem_text, render, render_reprompt, Prompt, PromptContext};
pub(crate) use prompt::truncate;
pub use state::{DialogueState, FlowKind, RegistrationStep, ResumeStep, UpdateStep, VacancyStep};
pub use transition::{transition, Confirmation, InputProblem, Transition};

use super::domain::{Account, ActorId, Resume, ResumeField, Vacancy};
use super::store::{EntityStore, StoreError};

/// Why a flow could not be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRefusal {
    /// Resume creation needs a phone on the account.
    ContactsRequired,
    /// The field update needs an existing resume.
    ResumeRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started {
        state: DialogueState,
        prompt: Prompt,
    },
    /// Vacancy creation without a phone continues as registration.
    Redirected {
        notice: String,
        state: DialogueState,
        prompt: Prompt,
    },
    Refused(StartRefusal),
}

/// Record written by a committed flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Committed {
    Registration(Account),
    Vacancy(Vacancy),
    Resume(Resume),
    FieldUpdate { field: ResumeField, resume: Resume },
}

impl Committed {
    pub fn kind(&self) -> FlowKind {
        match self {
            Committed::Registration(_) => FlowKind::Registration,
            Committed::Vacancy(_) => FlowKind::VacancyCreate,
            Committed::Resume(_) => FlowKind::ResumeCreate,
            Committed::FieldUpdate { .. } => FlowKind::ResumeFieldUpdate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The flow is still running; `prompt` asks for the next (or the same) input.
    Continue {
        state: DialogueState,
        prompt: Prompt,
    },
    Committed(Committed),
    Discarded(FlowKind),
}

#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    #[error("account {0} does not exist")]
    AccountMissing(ActorId),
    #[error("resume of {0} no longer exists")]
    ResumeMissing(ActorId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct DialogueEngine<S> {
    store: Arc<S>,
}

impl<S> DialogueEngine<S>
where
    S: EntityStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn start(&self, kind: FlowKind, actor: ActorId) -> Result<StartOutcome, DialogueError> {
        let account = self.store.find_account(actor)?;
        let has_phone = account.as_ref().map(Account::has_phone).unwrap_or(false);

        match kind {
            FlowKind::VacancyCreate if !has_phone => {
                let state = DialogueState::initial(FlowKind::Registration);
                let prompt = render(&state, self.context(account.as_ref(), None));
                tracing::debug!(%actor, "vacancy creation redirected to registration");
                return Ok(StartOutcome::Redirected {
                    notice: "Before adding a vacancy, please fill in your contact details so candidates can reach you.".to_string(),
                    state,
                    prompt,
                });
            }
            FlowKind::ResumeCreate if !has_phone => {
                return Ok(StartOutcome::Refused(StartRefusal::ContactsRequired));
            }
            _ => {}
        }

        let resume = self.store.find_resume(actor)?;
        if kind == FlowKind::ResumeFieldUpdate && resume.is_none() {
            return Ok(StartOutcome::Refused(StartRefusal::ResumeRequired));
        }

        let state = DialogueState::initial(kind);
        let prompt = render(&state, self.context(account.as_ref(), resume.as_ref()));
        Ok(StartOutcome::Started { state, prompt })
    }

    pub fn submit(
        &self,
        actor: ActorId,
        state: DialogueState,
        input: &str,
    ) -> Result<SubmitOutcome, DialogueError> {
        match transition(state, input) {
            Transition::Advance(next) => {
                let prompt = self.prompt_for(actor, &next, None)?;
                Ok(SubmitOutcome::Continue {
                    state: next,
                    prompt,
                })
            }
            Transition::Reprompt { state, problem } => {
                let prompt = self.prompt_for(actor, &state, Some(problem))?;
                Ok(SubmitOutcome::Continue { state, prompt })
            }
            Transition::Commit(commit) => self.commit(actor, commit).map(SubmitOutcome::Committed),
            Transition::Discard(kind) => {
                tracing::debug!(%actor, ?kind, "dialogue discarded");
                Ok(SubmitOutcome::Discarded(kind))
            }
        }
    }

    fn prompt_for(
        &self,
        actor: ActorId,
        state: &DialogueState,
        problem: Option<InputProblem>,
    ) -> Result<Prompt, DialogueError> {
        let account = self.store.find_account(actor)?;
        let resume = match state.kind() {
            FlowKind::ResumeFieldUpdate => self.store.find_resume(actor)?,
            _ => None,
        };
        let context = self.context(account.as_ref(), resume.as_ref());
        Ok(match problem {
            Some(problem) => render_reprompt(state, problem, context),
            None => render(state, context),
        })
    }

    fn context<'a>(
        &self,
        account: Option<&'a Account>,
        resume: Option<&'a Resume>,
    ) -> PromptContext<'a> {
        PromptContext { account, resume }
    }

    fn commit(&self, actor: ActorId, commit: Commit) -> Result<Committed, DialogueError> {
        let account = self
            .store
            .find_account(actor)?
            .ok_or(DialogueError::AccountMissing(actor))?;

        let committed = match commit {
            Commit::Registration(draft) => {
                let saved = self.store.save_account(draft.apply_to(account))?;
                Committed::Registration(saved)
            }
            Commit::Vacancy(draft) => {
                let vacancy = self.store.insert_vacancy(draft.into_vacancy(&account))?;
                Committed::Vacancy(vacancy)
            }
            Commit::Resume(draft) => {
                let resume = self.store.upsert_resume(draft.into_resume(&account))?;
                Committed::Resume(resume)
            }
            Commit::FieldUpdate { field, value } => {
                let mut resume = self
                    .store
                    .find_resume(actor)?
                    .ok_or(DialogueError::ResumeMissing(actor))?;
                resume.set_field(field, value);
                let resume = self.store.update_resume(resume)?;
                Committed::FieldUpdate { field, resume }
            }
        };

        tracing::info!(%actor, kind = ?committed.kind(), "dialogue committed");
        Ok(committed)
    }
}
