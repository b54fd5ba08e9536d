use super::common::*;
use std::sync::Arc;

use crate::board::domain::{ActorId, ApplicationStatus, Role};
use crate::board::lifecycle::{ActorProfile, LifecycleError, SAMPLE_EMPLOYER_ID};
use crate::board::store::{ApplicationFilter, EntityStore, VacancyFilter};
use crate::board::views::ProfileCounts;

#[test]
fn apply_snapshots_the_resume_and_notifies_the_employer() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(Arc::clone(&notifier));
    employer(&store);
    let resume = seeker_with_resume(&store, SEEKER, "Ivan Petrenko", "QA Engineer");
    let posted = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");

    let submission = manager
        .submit_application(SEEKER, posted.id)
        .expect("application accepted");

    assert_eq!(submission.application.status, ApplicationStatus::New);
    assert_eq!(submission.application.employer_id, EMPLOYER);
    assert_eq!(submission.application.resume_data, resume.snapshot());
    assert_eq!(submission.application.user_contacts, resume.contacts);

    let sent = notifier.sent_to(EMPLOYER);
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("Rust developer"));
    assert!(sent[0].contains("Ivan Petrenko"));
}

#[test]
fn duplicate_application_is_refused_without_a_second_record() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(Arc::clone(&notifier));
    seeker_with_resume(&store, SEEKER, "Ivan", "QA Engineer");
    let posted = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");

    manager
        .submit_application(SEEKER, posted.id)
        .expect("first application");
    let second = manager.submit_application(SEEKER, posted.id);

    assert!(matches!(second, Err(LifecycleError::DuplicateApplication)));
    assert_eq!(
        store
            .applications(ApplicationFilter::by_seeker(SEEKER))
            .expect("list")
            .len(),
        1
    );
    assert_eq!(notifier.sent().len(), 1);
}

#[test]
fn apply_without_resume_leaves_store_unchanged() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(Arc::clone(&notifier));
    account_with_contacts(&store, SEEKER, "Ivan", Role::Seeker);
    let posted = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");

    let outcome = manager.submit_application(SEEKER, posted.id);

    assert!(matches!(outcome, Err(LifecycleError::NoResume)));
    assert!(store
        .applications(ApplicationFilter::default())
        .expect("list")
        .is_empty());
    assert!(notifier.sent().is_empty());
}

#[test]
fn sample_vacancies_accept_applications_silently() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(Arc::clone(&notifier));
    seeker_with_resume(&store, SEEKER, "Ivan", "QA Engineer");
    let sample = vacancy(&store, SAMPLE_EMPLOYER_ID, "DevOps Engineer", "CloudSystems");

    manager
        .submit_application(SEEKER, sample.id)
        .expect("application accepted");

    assert!(manager.is_sample(&sample));
    assert!(notifier.sent().is_empty());
}

#[test]
fn missing_vacancy_is_reported() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(notifier);
    seeker_with_resume(&store, SEEKER, "Ivan", "QA Engineer");

    let outcome = manager.submit_application(SEEKER, crate::board::domain::VacancyId(77));
    assert!(matches!(outcome, Err(LifecycleError::VacancyNotFound)));
}

#[test]
fn reject_notifies_the_seeker_and_is_idempotent() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(Arc::clone(&notifier));
    employer(&store);
    seeker_with_resume(&store, SEEKER, "Ivan", "QA Engineer");
    let posted = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");
    let application = manager
        .submit_application(SEEKER, posted.id)
        .expect("application accepted")
        .application;

    let first = manager
        .reject(EMPLOYER, application.id)
        .expect("first rejection");
    let second = manager
        .reject(EMPLOYER, application.id)
        .expect("second rejection");

    assert_eq!(first.application.status, ApplicationStatus::Rejected);
    assert_eq!(second.application.status, ApplicationStatus::Rejected);
    assert_eq!(first.applicant_name, "Ivan");

    let sent = notifier.sent_to(SEEKER);
    assert!(!sent.is_empty());
    assert!(sent[0].contains("Rust developer"));
    assert!(sent[0].contains("Ferrous"));
}

#[test]
fn rejected_application_cannot_be_marked_viewed() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(notifier);
    seeker_with_resume(&store, SEEKER, "Ivan", "QA Engineer");
    let posted = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");
    let id = manager
        .submit_application(SEEKER, posted.id)
        .expect("application accepted")
        .application
        .id;

    let viewed = manager.mark_viewed(EMPLOYER, id).expect("viewed");
    assert_eq!(viewed.application.status, ApplicationStatus::Viewed);
    manager.offer_call(EMPLOYER, id).expect("viewed again");
    manager.reject(EMPLOYER, id).expect("rejected");

    match manager.offer_message(EMPLOYER, id) {
        Err(LifecycleError::InvalidTransition { from, to }) => {
            assert_eq!(from, ApplicationStatus::Rejected);
            assert_eq!(to, ApplicationStatus::Viewed);
        }
        other => panic!("expected an invalid transition, got {other:?}"),
    }
}

#[test]
fn only_the_owner_may_review_an_application() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(notifier);
    seeker_with_resume(&store, SEEKER, "Ivan", "QA Engineer");
    let posted = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");
    let id = manager
        .submit_application(SEEKER, posted.id)
        .expect("application accepted")
        .application
        .id;

    assert!(matches!(
        manager.mark_viewed(ActorId(999), id),
        Err(LifecycleError::NotFoundOrForbidden)
    ));
    assert!(matches!(
        manager.mark_viewed(EMPLOYER, crate::board::domain::ApplicationId(404)),
        Err(LifecycleError::ApplicationNotFound)
    ));
    let stored = store
        .find_application(id)
        .expect("lookup")
        .expect("present");
    assert_eq!(stored.status, ApplicationStatus::New);
}

#[test]
fn delete_vacancy_by_non_owner_is_forbidden() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(notifier);
    let posted = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");

    let outcome = manager.delete_vacancy(ActorId(999), posted.id);

    assert!(matches!(outcome, Err(LifecycleError::NotFoundOrForbidden)));
    assert!(store.find_vacancy(posted.id).expect("lookup").is_some());
}

#[test]
fn delete_vacancy_removes_applications_and_tolerates_failed_notifications() {
    let notifier = Arc::new(FailingNotifier::unreachable(&[OTHER_SEEKER]));
    let (manager, store) = lifecycle(Arc::clone(&notifier));
    let posted = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");
    for (actor, name) in [
        (SEEKER, "Ivan"),
        (OTHER_SEEKER, "Maria"),
        (THIRD_SEEKER, "Petro"),
    ] {
        seeker_with_resume(&store, actor, name, "QA Engineer");
        manager
            .submit_application(actor, posted.id)
            .expect("application accepted");
    }

    let before = notifier.attempts().len();

    let removed = manager
        .delete_vacancy(EMPLOYER, posted.id)
        .expect("vacancy deleted");

    assert_eq!(removed.applications.len(), 3);
    assert!(store.find_vacancy(posted.id).expect("lookup").is_none());
    assert!(store
        .applications(ApplicationFilter::by_vacancy(posted.id))
        .expect("list")
        .is_empty());

    let removal_notices: Vec<ActorId> = notifier.attempts().split_off(before);
    assert_eq!(removal_notices, vec![SEEKER, OTHER_SEEKER, THIRD_SEEKER]);
}

#[test]
fn delete_resume_cascades_to_applications() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(notifier);
    seeker_with_resume(&store, SEEKER, "Ivan", "QA Engineer");
    let first = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");
    let second = vacancy(&store, EMPLOYER, "Go developer", "Gopher");
    manager.submit_application(SEEKER, first.id).expect("first");
    manager.submit_application(SEEKER, second.id).expect("second");

    assert_eq!(manager.linked_applications(SEEKER).expect("count"), 2);
    let removed = manager.delete_resume(SEEKER).expect("resume deleted");

    assert_eq!(removed.applications.len(), 2);
    assert_eq!(manager.linked_applications(SEEKER).expect("count"), 0);
    assert!(matches!(
        manager.delete_resume(SEEKER),
        Err(LifecycleError::ResumeNotFound)
    ));
}

#[test]
fn select_role_creates_then_flips_the_account() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, _store) = lifecycle(notifier);
    let profile = ActorProfile {
        display_name: Some("Olena".to_string()),
        username: Some("olena_k".to_string()),
    };

    let created = manager
        .select_role(EMPLOYER, Role::Employer, &profile)
        .expect("role selected");
    assert!(created.created);
    assert_eq!(created.account.role(), Role::Employer);
    assert_eq!(created.account.username.as_deref(), Some("olena_k"));

    let flipped = manager
        .select_role(EMPLOYER, Role::Seeker, &ActorProfile::default())
        .expect("role selected");
    assert!(!flipped.created);
    assert_eq!(flipped.account.role(), Role::Seeker);
    assert_eq!(flipped.account.display_name, "Olena");
}

#[test]
fn ensure_account_defaults_to_seeker_with_fallback_name() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, _store) = lifecycle(notifier);

    let account = manager
        .ensure_account(SEEKER, &ActorProfile::default())
        .expect("account created");

    assert_eq!(account.role(), Role::Seeker);
    assert_eq!(account.display_name, "User");
}

#[test]
fn employer_views_group_and_count_applications() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(notifier);
    employer(&store);
    let first = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");
    let second = vacancy(&store, EMPLOYER, "Go developer", "Gopher");
    seeker_with_resume(&store, SEEKER, "Ivan", "QA Engineer");
    seeker_with_resume(&store, OTHER_SEEKER, "Maria", "Developer");
    let viewed = manager
        .submit_application(SEEKER, first.id)
        .expect("applied")
        .application;
    manager.submit_application(OTHER_SEEKER, first.id).expect("applied");
    manager.submit_application(OTHER_SEEKER, second.id).expect("applied");
    manager.mark_viewed(EMPLOYER, viewed.id).expect("viewed");

    let vacancies = manager.employer_vacancies(EMPLOYER).expect("vacancies");
    let rust = vacancies
        .iter()
        .find(|view| view.vacancy.id == first.id)
        .expect("rust vacancy listed");
    assert_eq!(rust.total_applications, 2);
    assert_eq!(rust.new_applications, 1);

    let groups = manager.employer_applications(EMPLOYER).expect("groups");
    assert_eq!(groups.len(), 2);
    let total: usize = groups.iter().map(|group| group.applications.len()).sum();
    assert_eq!(total, 3);

    match manager.profile(EMPLOYER).expect("profile").expect("present").counts {
        ProfileCounts::Employer {
            vacancies,
            received_applications,
        } => {
            assert_eq!(vacancies, 2);
            assert_eq!(received_applications, 3);
        }
        other => panic!("expected employer counts, got {other:?}"),
    }
}

#[test]
fn vacancy_search_ignores_case_and_caps_results() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(notifier);
    for index in 0..10 {
        vacancy(&store, EMPLOYER, &format!("Python developer {index}"), "Snake Co");
    }
    vacancy(&store, EMPLOYER, "Accountant", "Numbers");

    let results = manager.search_vacancies("PYTHON").expect("search");
    assert_eq!(results.total, 10);
    assert_eq!(results.shown.len(), 8);
    assert!(results.is_truncated());
    assert_eq!(results.shown[0].title, "Python developer 0");

    assert!(manager
        .search_vacancies("plumber")
        .expect("search")
        .is_empty());
    assert_eq!(
        store
            .vacancies(VacancyFilter::active())
            .expect("list")
            .len(),
        11
    );
}

#[test]
fn wipe_removes_everything_the_actor_owns() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (manager, store) = lifecycle(notifier);
    employer(&store);
    let posted = vacancy(&store, EMPLOYER, "Rust developer", "Ferrous");
    seeker_with_resume(&store, SEEKER, "Ivan", "QA Engineer");
    manager.submit_application(SEEKER, posted.id).expect("applied");

    let report = manager.wipe_account(EMPLOYER).expect("wiped");

    assert!(report.account);
    assert_eq!(report.vacancies, 1);
    assert_eq!(report.applications, 1);
    assert!(store.find_account(EMPLOYER).expect("lookup").is_none());
    assert!(store.find_resume(SEEKER).expect("lookup").is_some());
}
