//! Inbound event routing and per-session state.

mod action;
mod employer;
mod event;
mod seeker;
mod session;

use std::sync::Arc;

pub use action::{Callback, MenuAction};
pub use event::{ButtonEvent, InboundEvent, TextEvent};
pub use session::{PendingInput, Session, SessionRegistry, SessionSlot};

use super::dialogue::{
    Committed, DialogueEngine, DialogueError, DialogueState, FlowKind, StartOutcome,
    StartRefusal, SubmitOutcome,
};
use super::domain::{ActorId, Role};
use super::effect::{Effect, OptionSet};
use super::lifecycle::{ActorProfile, BoardSettings, LifecycleError, LifecycleManager};
use super::notify::Notifier;
use super::render;
use super::store::{EntityStore, StoreError, WipeReport};

const START_COMMAND: &str = "/start";
const RESET_COMMAND: &str = "/reset";
const UNAVAILABLE: &str = "The service is temporarily unavailable. Please try again later.";

/// Effects collected while handling one event.
struct Reply {
    session_id: ActorId,
    effects: Vec<Effect>,
}

impl Reply {
    fn new(session_id: ActorId) -> Self {
        Self {
            session_id,
            effects: Vec::new(),
        }
    }

    fn say(&mut self, text: impl Into<String>) {
        self.effects.push(Effect::say(self.session_id, text));
    }

    fn prompt(&mut self, text: impl Into<String>, options: OptionSet) {
        self.effects
            .push(Effect::prompt(self.session_id, text, options));
    }

    fn edit(&mut self, text: impl Into<String>, options: OptionSet) {
        self.effects.push(Effect::edit(self.session_id, text, options));
    }
}

/// Handler failure: a business rule answered with a plain message, or a store
/// outage.
enum Failure {
    Rule(String),
    Store(StoreError),
}

impl From<LifecycleError> for Failure {
    fn from(error: LifecycleError) -> Self {
        match error {
            LifecycleError::Store(error) => Failure::Store(error),
            other => Failure::Rule(other.user_message()),
        }
    }
}

impl From<DialogueError> for Failure {
    fn from(error: DialogueError) -> Self {
        match error {
            DialogueError::Store(error) => Failure::Store(error),
            DialogueError::AccountMissing(_) => {
                Failure::Rule("Profile not found. Try /start".to_string())
            }
            DialogueError::ResumeMissing(_) => {
                Failure::Rule("Resume not found. Create a resume first.".to_string())
            }
        }
    }
}

type Handled = Result<(), Failure>;

fn role_menu(role: Option<Role>) -> OptionSet {
    match role {
        Some(Role::Seeker) => OptionSet::SeekerMenu,
        Some(Role::Employer) => OptionSet::EmployerMenu,
        None => OptionSet::MainMenu,
    }
}

fn flow_name(kind: FlowKind) -> &'static str {
    match kind {
        FlowKind::Registration => "contact registration",
        FlowKind::VacancyCreate => "vacancy creation",
        FlowKind::ResumeCreate => "resume creation",
        FlowKind::ResumeFieldUpdate => "resume update",
    }
}

fn capitalized(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Routes inbound events to the dialogue engine, the lifecycle manager and the
/// browsing cursor, returning the effects for the initiating session.
pub struct Dispatcher<S, N> {
    lifecycle: LifecycleManager<S, N>,
    dialogue: DialogueEngine<S>,
    sessions: SessionRegistry,
}

impl<S, N> Dispatcher<S, N>
where
    S: EntityStore + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, settings: BoardSettings) -> Self {
        Self {
            dialogue: DialogueEngine::new(Arc::clone(&store)),
            lifecycle: LifecycleManager::new(store, notifier, settings),
            sessions: SessionRegistry::default(),
        }
    }

    pub fn lifecycle(&self) -> &LifecycleManager<S, N> {
        &self.lifecycle
    }

    pub fn handle(&self, event: InboundEvent) -> Vec<Effect> {
        let actor = event.session_id();
        let slot = self.sessions.handle(actor);
        let _turn = slot.turn();
        let mut reply = Reply::new(actor);

        let outcome = match &event {
            InboundEvent::Text(text) => {
                let mut session = slot.state();
                self.seed(actor, &mut session)
                    .and_then(|()| self.on_text(&mut session, text, &mut reply))
            }
            InboundEvent::Button(button) => self.on_button(&slot, button, &mut reply),
        };

        match outcome {
            Ok(()) => {}
            Err(Failure::Rule(message)) => reply.say(message),
            Err(Failure::Store(error)) => {
                tracing::error!(%actor, %error, "store failure while handling event");
                reply.say(UNAVAILABLE);
            }
        }
        reply.effects
    }

    /// Maintenance wipe outside of the chat; also drops the session.
    pub fn wipe_account(&self, actor: ActorId) -> Result<WipeReport, LifecycleError> {
        let report = self.lifecycle.wipe_account(actor)?;
        self.sessions.forget(actor);
        Ok(report)
    }

    pub fn active_flow(&self, actor: ActorId) -> Option<FlowKind> {
        self.sessions
            .handle(actor)
            .state()
            .dialogue
            .as_ref()
            .map(DialogueState::kind)
    }

    pub fn active_role(&self, actor: ActorId) -> Option<Role> {
        self.sessions.handle(actor).state().active_role
    }

    pub fn pending_input(&self, actor: ActorId) -> Option<PendingInput> {
        self.sessions.handle(actor).state().pending
    }

    /// The active role starts out as the last role stored on the account.
    fn seed(&self, actor: ActorId, session: &mut Session) -> Handled {
        if !session.seeded {
            session.active_role = self
                .lifecycle
                .find_account(actor)?
                .map(|account| account.role());
            session.seeded = true;
        }
        Ok(())
    }

    fn on_text(&self, session: &mut Session, event: &TextEvent, reply: &mut Reply) -> Handled {
        let actor = event.session_id;
        let text = event.text.trim();
        match text {
            START_COMMAND => return self.start(session, actor, &event.profile, reply),
            RESET_COMMAND => return self.reset(session, actor, reply),
            _ => {}
        }

        let action = MenuAction::from_id(text).filter(|action| action.available_to(session.active_role));

        if let Some(state) = session.dialogue.clone() {
            if let Some(requested) = action.and_then(MenuAction::starts_flow) {
                tracing::debug!(%actor, ?requested, active = ?state.kind(), "flow start refused");
                reply.say(format!(
                    "You are in the middle of {}. Finish it or send `{}` first.",
                    flow_name(state.kind()),
                    state.kind().cancel_token()
                ));
                return Ok(());
            }
            return self.continue_dialogue(session, actor, state, &event.text, reply);
        }

        if let Some(pending) = session.pending {
            match (pending, action) {
                (PendingInput::VacancySearch, None) => {
                    return self.search_vacancies(session, text, reply)
                }
                (PendingInput::CandidateSearch, None) => {
                    return self.search_candidates(session, text, reply)
                }
                (
                    PendingInput::ResumeDeletion,
                    Some(MenuAction::ConfirmDeletion | MenuAction::CancelDeletion),
                ) => {}
                _ => session.pending = None,
            }
        }

        match action {
            Some(action) => {
                tracing::debug!(%actor, action = action.id(), "menu action");
                self.on_action(session, actor, &event.profile, action, reply)
            }
            None => {
                reply.say(render::menu_hint());
                Ok(())
            }
        }
    }

    fn on_action(
        &self,
        session: &mut Session,
        actor: ActorId,
        profile: &ActorProfile,
        action: MenuAction,
        reply: &mut Reply,
    ) -> Handled {
        match action {
            MenuAction::FindJobs => self.select_role(session, actor, Role::Seeker, profile, reply),
            MenuAction::PostJobs => {
                self.select_role(session, actor, Role::Employer, profile, reply)
            }
            MenuAction::MainMenu => {
                reply.prompt(render::welcome(), OptionSet::MainMenu);
                Ok(())
            }
            MenuAction::Help => {
                reply.say(render::help());
                Ok(())
            }
            MenuAction::Profile => self.profile(actor, reply),
            MenuAction::Contacts => {
                self.lifecycle.ensure_account(actor, profile)?;
                self.start_flow(session, actor, FlowKind::Registration, reply)
            }
            MenuAction::AddVacancy => {
                self.start_flow(session, actor, FlowKind::VacancyCreate, reply)
            }
            MenuAction::CreateResume => {
                self.start_flow(session, actor, FlowKind::ResumeCreate, reply)
            }
            MenuAction::UpdateResume => {
                self.start_flow(session, actor, FlowKind::ResumeFieldUpdate, reply)
            }
            MenuAction::ListVacancies => self.list_vacancies(session, reply),
            MenuAction::SearchVacancies => {
                session.pending = Some(PendingInput::VacancySearch);
                reply.say(render::search_prompt(false));
                Ok(())
            }
            MenuAction::SearchCandidates => {
                session.pending = Some(PendingInput::CandidateSearch);
                reply.say(render::search_prompt(true));
                Ok(())
            }
            MenuAction::MyResume | MenuAction::ResumeMenu => self.resume_menu(actor, reply),
            MenuAction::Back => {
                reply.prompt(render::choose_action(), OptionSet::SeekerMenu);
                Ok(())
            }
            MenuAction::ViewResume => self.view_resume(actor, reply),
            MenuAction::MyApplications => self.seeker_applications(actor, reply),
            MenuAction::DeleteResume => self.request_resume_deletion(session, actor, reply),
            MenuAction::ConfirmDeletion => {
                if session.pending.take() == Some(PendingInput::ResumeDeletion) {
                    self.delete_resume(actor, reply)
                } else {
                    self.request_resume_deletion(session, actor, reply)
                }
            }
            MenuAction::CancelDeletion => {
                session.pending = None;
                reply.say("Resume deletion cancelled.");
                self.resume_menu(actor, reply)
            }
            MenuAction::MyVacancies => self.employer_vacancies(actor, reply),
            MenuAction::IncomingApplications => self.employer_applications(actor, reply),
        }
    }

    /// Lifecycle callbacks run with the session state unlocked; only paging
    /// touches it.
    fn on_button(&self, slot: &SessionSlot, event: &ButtonEvent, reply: &mut Reply) -> Handled {
        let actor = event.session_id;
        let Some(callback) = Callback::parse(&event.callback_id) else {
            tracing::debug!(%actor, callback = %event.callback_id, "unrecognised callback");
            reply.say(render::menu_hint());
            return Ok(());
        };
        tracing::debug!(%actor, %callback, "button");

        {
            let mut session = slot.state();
            self.seed(actor, &mut session)?;
            // A confirmation only covers the applications counted when it was asked.
            if session.pending == Some(PendingInput::ResumeDeletion) {
                session.pending = None;
            }
        }

        match callback {
            Callback::Apply(vacancy) => self.apply(actor, vacancy, reply),
            Callback::Navigate(direction) => self.navigate(&mut slot.state(), direction, reply),
            Callback::Viewed(id) => {
                let view = self.lifecycle.mark_viewed(actor, id)?;
                self.refresh_application(&view, reply);
                reply.say("Application status changed to 'viewed'.");
                Ok(())
            }
            Callback::Call(id) => {
                let view = self.lifecycle.offer_call(actor, id)?;
                self.refresh_application(&view, reply);
                reply.say(render::call_contacts(&view.application.user_contacts));
                Ok(())
            }
            Callback::Message(id) => {
                let view = self.lifecycle.offer_message(actor, id)?;
                self.refresh_application(&view, reply);
                reply.say(render::message_contacts(&view.application.user_contacts));
                Ok(())
            }
            Callback::Reject(id) => {
                let view = self.lifecycle.reject(actor, id)?;
                self.refresh_application(&view, reply);
                reply.say("Application rejected.");
                Ok(())
            }
            Callback::DeleteVacancy(id) => self.delete_vacancy(actor, id, reply),
        }
    }

    fn start(
        &self,
        session: &mut Session,
        actor: ActorId,
        profile: &ActorProfile,
        reply: &mut Reply,
    ) -> Handled {
        let account = self.lifecycle.ensure_account(actor, profile)?;
        session.reset();
        session.active_role = Some(account.role());
        reply.prompt(render::welcome(), OptionSet::MainMenu);
        Ok(())
    }

    fn reset(&self, session: &mut Session, actor: ActorId, reply: &mut Reply) -> Handled {
        self.lifecycle.wipe_account(actor)?;
        session.reset();
        reply.say("All data was reset! Starting over.");
        reply.prompt(render::welcome(), OptionSet::MainMenu);
        Ok(())
    }

    fn select_role(
        &self,
        session: &mut Session,
        actor: ActorId,
        role: Role,
        profile: &ActorProfile,
        reply: &mut Reply,
    ) -> Handled {
        let selection = self.lifecycle.select_role(actor, role, profile)?;
        session.active_role = Some(role);
        session.cursor = None;
        reply.say(render::role_selected(role, selection.created));
        reply.prompt(render::choose_action(), role_menu(Some(role)));
        Ok(())
    }

    fn profile(&self, actor: ActorId, reply: &mut Reply) -> Handled {
        match self.lifecycle.profile(actor)? {
            Some(summary) => {
                reply.say(render::profile(&summary));
                reply.prompt(
                    render::choose_action(),
                    role_menu(Some(summary.account.role())),
                );
            }
            None => reply.say("Profile not found. Try /start"),
        }
        Ok(())
    }

    fn start_flow(
        &self,
        session: &mut Session,
        actor: ActorId,
        kind: FlowKind,
        reply: &mut Reply,
    ) -> Handled {
        match self.dialogue.start(kind, actor)? {
            StartOutcome::Started { state, prompt } => {
                session.dialogue = Some(state);
                session.pending = None;
                reply.prompt(prompt.text, prompt.options);
            }
            StartOutcome::Redirected {
                notice,
                state,
                prompt,
            } => {
                session.dialogue = Some(state);
                session.pending = None;
                reply.say(notice);
                reply.prompt(prompt.text, prompt.options);
            }
            StartOutcome::Refused(StartRefusal::ContactsRequired) => reply.say(
                "Before creating a resume, please fill in your contact details.\n\nChoose `contacts` to add your phone and email.",
            ),
            StartOutcome::Refused(StartRefusal::ResumeRequired) => {
                reply.say("Resume not found. Create a resume first.")
            }
        }
        Ok(())
    }

    fn continue_dialogue(
        &self,
        session: &mut Session,
        actor: ActorId,
        state: DialogueState,
        input: &str,
        reply: &mut Reply,
    ) -> Handled {
        match self.dialogue.submit(actor, state, input)? {
            SubmitOutcome::Continue { state, prompt } => {
                session.dialogue = Some(state);
                reply.prompt(prompt.text, prompt.options);
            }
            SubmitOutcome::Committed(committed) => {
                session.dialogue = None;
                self.after_commit(committed, reply);
            }
            SubmitOutcome::Discarded(kind) => {
                session.dialogue = None;
                self.after_discard(actor, kind, reply)?;
            }
        }
        Ok(())
    }

    fn after_commit(&self, committed: Committed, reply: &mut Reply) {
        match committed {
            Committed::Registration(account) => {
                reply.say("Contact details saved!\n\nThey will now appear in your vacancies and resume.");
                reply.prompt(render::choose_action(), role_menu(Some(account.role())));
            }
            Committed::Vacancy(_) => {
                reply.say("Vacancy published!\n\nJob seekers will now see it in the vacancy list.");
                reply.prompt(render::choose_action(), OptionSet::EmployerMenu);
            }
            Committed::Resume(_) => {
                reply.say("Resume saved!\n\nYou can now apply to vacancies.");
                reply.prompt(
                    render::resume_menu(true),
                    OptionSet::ResumeMenu { has_resume: true },
                );
            }
            Committed::FieldUpdate { field, .. } => {
                reply.say(format!("{} updated!", capitalized(field.label())));
                reply.prompt("What would you like to do next?", OptionSet::AfterFieldUpdate);
            }
        }
    }

    fn after_discard(&self, actor: ActorId, kind: FlowKind, reply: &mut Reply) -> Handled {
        reply.say(format!("{} cancelled.", capitalized(flow_name(kind))));
        match kind {
            FlowKind::Registration => {
                let role = self
                    .lifecycle
                    .find_account(actor)?
                    .map(|account| account.role());
                reply.prompt(render::choose_action(), role_menu(role));
                Ok(())
            }
            FlowKind::VacancyCreate => {
                reply.prompt(render::choose_action(), OptionSet::EmployerMenu);
                Ok(())
            }
            FlowKind::ResumeCreate => {
                reply.prompt(render::choose_action(), OptionSet::SeekerMenu);
                Ok(())
            }
            FlowKind::ResumeFieldUpdate => self.resume_menu(actor, reply),
        }
    }
}
