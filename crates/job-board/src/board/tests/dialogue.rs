use super::common::*;
use std::sync::Arc;

use crate::board::dialogue::{
    problem_text, Committed, DialogueEngine, DialogueError, DialogueState, FlowKind,
    InputProblem, RegistrationStep, StartOutcome, StartRefusal, SubmitOutcome, VacancyStep,
};
use crate::board::domain::{Account, ResumeField, Role};
use crate::board::effect::OptionSet;
use crate::board::memory::InMemoryEntityStore;
use crate::board::store::{EntityStore, VacancyFilter};

fn engine() -> (DialogueEngine<InMemoryEntityStore>, Arc<InMemoryEntityStore>) {
    let store = Arc::new(InMemoryEntityStore::new());
    (DialogueEngine::new(Arc::clone(&store)), store)
}

fn started(outcome: StartOutcome) -> DialogueState {
    match outcome {
        StartOutcome::Started { state, .. } => state,
        other => panic!("expected the flow to start, got {other:?}"),
    }
}

fn next_state(outcome: SubmitOutcome) -> DialogueState {
    match outcome {
        SubmitOutcome::Continue { state, .. } => state,
        other => panic!("expected the flow to continue, got {other:?}"),
    }
}

/// Feeds every input except the last and returns the state before it.
fn drive(
    engine: &DialogueEngine<InMemoryEntityStore>,
    mut state: DialogueState,
    inputs: &[&str],
) -> DialogueState {
    for input in inputs {
        state = next_state(engine.submit(SEEKER, state, input).expect("submit succeeds"));
    }
    state
}

#[test]
fn registration_reprompts_bad_phone_then_commits() {
    let (engine, store) = engine();
    store
        .save_account(Account::new(SEEKER, "User", Role::Seeker))
        .expect("account saved");

    let state = started(
        engine
            .start(FlowKind::Registration, SEEKER)
            .expect("start succeeds"),
    );
    let state = drive(&engine, state, &["Ivan Petrenko"]);

    match engine.submit(SEEKER, state, "123456").expect("submit succeeds") {
        SubmitOutcome::Continue { state, prompt } => {
            assert!(matches!(
                state,
                DialogueState::Registration {
                    step: RegistrationStep::Phone,
                    ..
                }
            ));
            assert!(prompt
                .text
                .starts_with(problem_text(InputProblem::InvalidPhone)));
            let state = drive(&engine, state, &[" +380501234567 ", "ivan@gmail.com"]);
            assert!(state.is_confirming());

            match engine.submit(SEEKER, state, "Yes").expect("commit succeeds") {
                SubmitOutcome::Committed(Committed::Registration(account)) => {
                    assert_eq!(account.display_name, "Ivan Petrenko");
                    assert_eq!(account.phone.as_deref(), Some("+380501234567"));
                    assert_eq!(account.email.as_deref(), Some("ivan@gmail.com"));
                }
                other => panic!("expected registration commit, got {other:?}"),
            }
        }
        other => panic!("expected a reprompt, got {other:?}"),
    }

    let stored = store
        .find_account(SEEKER)
        .expect("lookup")
        .expect("account present");
    assert!(stored.has_phone());
}

#[test]
fn vacancy_without_phone_is_redirected_to_registration() {
    let (engine, store) = engine();
    store
        .save_account(Account::new(EMPLOYER, "Olena", Role::Employer))
        .expect("account saved");

    match engine
        .start(FlowKind::VacancyCreate, EMPLOYER)
        .expect("start succeeds")
    {
        StartOutcome::Redirected { state, prompt, .. } => {
            assert_eq!(state.kind(), FlowKind::Registration);
            assert_eq!(
                prompt.options,
                OptionSet::CancelOnly {
                    flow: FlowKind::Registration
                }
            );
        }
        other => panic!("expected a redirect, got {other:?}"),
    }
}

#[test]
fn resume_without_phone_is_refused() {
    let (engine, _store) = engine();
    let outcome = engine
        .start(FlowKind::ResumeCreate, SEEKER)
        .expect("start succeeds");
    assert_eq!(
        outcome,
        StartOutcome::Refused(StartRefusal::ContactsRequired)
    );
}

#[test]
fn field_update_requires_a_resume() {
    let (engine, store) = engine();
    account_with_contacts(&store, SEEKER, "Ivan", Role::Seeker);
    let outcome = engine
        .start(FlowKind::ResumeFieldUpdate, SEEKER)
        .expect("start succeeds");
    assert_eq!(outcome, StartOutcome::Refused(StartRefusal::ResumeRequired));
}

#[test]
fn cancel_at_every_vacancy_step_leaves_store_unchanged() {
    let (engine, store) = engine();
    employer(&store);
    let inputs = ["Rust developer", "Ferrous", "3000$", "Backend work", "Rust"];

    for answered in 0..=inputs.len() {
        let mut state = started(
            engine
                .start(FlowKind::VacancyCreate, EMPLOYER)
                .expect("start succeeds"),
        );
        for input in &inputs[..answered] {
            state = next_state(
                engine
                    .submit(EMPLOYER, state, input)
                    .expect("submit succeeds"),
            );
        }
        let outcome = engine
            .submit(EMPLOYER, state, FlowKind::VacancyCreate.cancel_token())
            .expect("cancel succeeds");
        assert_eq!(outcome, SubmitOutcome::Discarded(FlowKind::VacancyCreate));
    }

    assert!(store
        .vacancies(VacancyFilter::default())
        .expect("list")
        .is_empty());
}

#[test]
fn vacancy_commit_copies_owner_contacts() {
    let (engine, store) = engine();
    let owner = employer(&store);
    let state = started(
        engine
            .start(FlowKind::VacancyCreate, EMPLOYER)
            .expect("start succeeds"),
    );
    let mut state = state;
    for input in ["Rust developer", "Ferrous", "3000$", "Backend work", "Rust"] {
        state = next_state(
            engine
                .submit(EMPLOYER, state, input)
                .expect("submit succeeds"),
        );
    }
    assert!(matches!(
        state,
        DialogueState::VacancyCreate {
            step: VacancyStep::Confirm,
            ..
        }
    ));

    match engine.submit(EMPLOYER, state, "ok").expect("commit succeeds") {
        SubmitOutcome::Committed(Committed::Vacancy(vacancy)) => {
            assert_eq!(vacancy.title, "Rust developer");
            assert_eq!(vacancy.contacts, owner.contact_line());
            assert_eq!(vacancy.employer_id, EMPLOYER);
            assert!(vacancy.is_active);
        }
        other => panic!("expected vacancy commit, got {other:?}"),
    }
}

#[test]
fn negative_confirmation_discards_the_resume() {
    let (engine, store) = engine();
    account_with_contacts(&store, SEEKER, "Ivan", Role::Seeker);
    let state = started(
        engine
            .start(FlowKind::ResumeCreate, SEEKER)
            .expect("start succeeds"),
    );
    let state = drive(
        &engine,
        state,
        &["Tester", "1000$", "2 years", "KPI", "Selenium", "Curious"],
    );
    assert!(state.is_confirming());

    let outcome = engine.submit(SEEKER, state, "no").expect("submit succeeds");
    assert_eq!(outcome, SubmitOutcome::Discarded(FlowKind::ResumeCreate));
    assert_eq!(store.find_resume(SEEKER).expect("lookup"), None);
}

#[test]
fn field_update_commits_without_confirmation() {
    let (engine, store) = engine();
    seeker_with_resume(&store, SEEKER, "Ivan", "Tester");
    let state = started(
        engine
            .start(FlowKind::ResumeFieldUpdate, SEEKER)
            .expect("start succeeds"),
    );

    match engine
        .submit(SEEKER, state.clone(), "hobbies")
        .expect("submit succeeds")
    {
        SubmitOutcome::Continue { state: same, prompt } => {
            assert_eq!(same, state);
            assert_eq!(prompt.options, OptionSet::FieldChoice);
        }
        other => panic!("expected a reprompt, got {other:?}"),
    }

    let state = drive(&engine, state, &["skills"]);
    match engine
        .submit(SEEKER, state, "Rust, Tokio")
        .expect("commit succeeds")
    {
        SubmitOutcome::Committed(Committed::FieldUpdate { field, resume }) => {
            assert_eq!(field, ResumeField::Skills);
            assert_eq!(resume.skills, "Rust, Tokio");
            assert_eq!(resume.position, "Tester");
        }
        other => panic!("expected field update commit, got {other:?}"),
    }
}

#[test]
fn commit_without_account_is_an_error() {
    let (engine, _store) = engine();
    let state = DialogueState::initial(FlowKind::Registration);
    let state = drive(&engine, state, &["Ivan", "0501234567", "ivan@gmail.com"]);

    match engine.submit(SEEKER, state, "yes") {
        Err(DialogueError::AccountMissing(actor)) => assert_eq!(actor, SEEKER),
        other => panic!("expected a missing account, got {other:?}"),
    }
}
