use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::board::dispatch::Dispatcher;
use crate::board::domain::{
    Account, ActorId, Application, ApplicationId, ApplicationStatus, NewApplication, NewResume,
    NewVacancy, Resume, Role, Vacancy, VacancyId,
};
use crate::board::effect::Effect;
use crate::board::lifecycle::{BoardSettings, LifecycleManager};
use crate::board::memory::InMemoryEntityStore;
use crate::board::notify::{Notification, Notifier, NotifyError};
use crate::board::store::{
    ApplicationFilter, EntityStore, RemovedResume, RemovedVacancy, StoreError, VacancyFilter,
    WipeReport,
};

pub(super) const EMPLOYER: ActorId = ActorId(100);
pub(super) const SEEKER: ActorId = ActorId(200);
pub(super) const OTHER_SEEKER: ActorId = ActorId(201);
pub(super) const THIRD_SEEKER: ActorId = ActorId(202);

#[derive(Default)]
pub(super) struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(super) fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }

    pub(super) fn sent_to(&self, recipient: ActorId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|notification| notification.recipient == recipient)
            .map(|notification| notification.text)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .map_err(|_| NotifyError::Transport("poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}

/// Fails every delivery to the listed recipients; records every attempt.
#[derive(Default)]
pub(super) struct FailingNotifier {
    unreachable: Vec<ActorId>,
    attempts: Mutex<Vec<ActorId>>,
}

impl FailingNotifier {
    pub(super) fn unreachable(recipients: &[ActorId]) -> Self {
        Self {
            unreachable: recipients.to_vec(),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn attempts(&self) -> Vec<ActorId> {
        self.attempts.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for FailingNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        self.attempts
            .lock()
            .map_err(|_| NotifyError::Transport("poisoned".to_string()))?
            .push(notification.recipient);
        if self.unreachable.contains(&notification.recipient) {
            return Err(NotifyError::Unreachable(notification.recipient));
        }
        Ok(())
    }
}

/// Store whose every call fails as an outage.
pub(super) struct UnavailableStore;

fn outage<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("database offline".to_string()))
}

impl EntityStore for UnavailableStore {
    fn find_account(&self, _id: ActorId) -> Result<Option<Account>, StoreError> {
        outage()
    }

    fn save_account(&self, _account: Account) -> Result<Account, StoreError> {
        outage()
    }

    fn insert_vacancy(&self, _vacancy: NewVacancy) -> Result<Vacancy, StoreError> {
        outage()
    }

    fn find_vacancy(&self, _id: VacancyId) -> Result<Option<Vacancy>, StoreError> {
        outage()
    }

    fn vacancies(&self, _filter: VacancyFilter) -> Result<Vec<Vacancy>, StoreError> {
        outage()
    }

    fn delete_vacancy_owned(
        &self,
        _employer: ActorId,
        _id: VacancyId,
    ) -> Result<RemovedVacancy, StoreError> {
        outage()
    }

    fn find_resume(&self, _user: ActorId) -> Result<Option<Resume>, StoreError> {
        outage()
    }

    fn upsert_resume(&self, _resume: NewResume) -> Result<Resume, StoreError> {
        outage()
    }

    fn update_resume(&self, _resume: Resume) -> Result<Resume, StoreError> {
        outage()
    }

    fn active_resumes(&self) -> Result<Vec<Resume>, StoreError> {
        outage()
    }

    fn delete_resume_cascade(&self, _user: ActorId) -> Result<RemovedResume, StoreError> {
        outage()
    }

    fn insert_application(
        &self,
        _application: NewApplication,
    ) -> Result<Application, StoreError> {
        outage()
    }

    fn find_application(&self, _id: ApplicationId) -> Result<Option<Application>, StoreError> {
        outage()
    }

    fn update_application_status(
        &self,
        _id: ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<Application, StoreError> {
        outage()
    }

    fn applications(&self, _filter: ApplicationFilter) -> Result<Vec<Application>, StoreError> {
        outage()
    }

    fn wipe_account(&self, _id: ActorId) -> Result<WipeReport, StoreError> {
        outage()
    }
}

pub(super) fn account_with_contacts(
    store: &InMemoryEntityStore,
    actor: ActorId,
    name: &str,
    role: Role,
) -> Account {
    let mut account = Account::new(actor, name, role);
    account.phone = Some("+380501234567".to_string());
    account.email = Some(format!("user{}@example.com", actor.0));
    store.save_account(account).expect("account saved")
}

pub(super) fn employer(store: &InMemoryEntityStore) -> Account {
    account_with_contacts(store, EMPLOYER, "Olena Koval", Role::Employer)
}

pub(super) fn seeker_with_resume(
    store: &InMemoryEntityStore,
    actor: ActorId,
    name: &str,
    position: &str,
) -> Resume {
    let account = account_with_contacts(store, actor, name, Role::Seeker);
    store
        .upsert_resume(NewResume {
            user_id: actor,
            position: position.to_string(),
            salary: Some("1500$".to_string()),
            experience: "3 years".to_string(),
            education: "KPI".to_string(),
            skills: "Rust, SQL".to_string(),
            about: None,
            contacts: account.contact_line(),
        })
        .expect("resume saved")
}

pub(super) fn vacancy(
    store: &InMemoryEntityStore,
    employer: ActorId,
    title: &str,
    company: &str,
) -> Vacancy {
    store
        .insert_vacancy(NewVacancy {
            title: title.to_string(),
            company: company.to_string(),
            salary: Some("2500$".to_string()),
            description: format!("{title} at {company}"),
            requirements: "Two years of experience".to_string(),
            contacts: "hr@example.com".to_string(),
            category: None,
            employer_id: employer,
        })
        .expect("vacancy saved")
}

pub(super) fn lifecycle<N: Notifier + 'static>(
    notifier: Arc<N>,
) -> (
    LifecycleManager<InMemoryEntityStore, N>,
    Arc<InMemoryEntityStore>,
) {
    let store = Arc::new(InMemoryEntityStore::new());
    let manager = LifecycleManager::new(Arc::clone(&store), notifier, BoardSettings::default());
    (manager, store)
}

pub(super) struct Board {
    pub(super) dispatcher: Arc<Dispatcher<InMemoryEntityStore, RecordingNotifier>>,
    pub(super) store: Arc<InMemoryEntityStore>,
    pub(super) notifier: Arc<RecordingNotifier>,
}

pub(super) fn board() -> Board {
    let store = Arc::new(InMemoryEntityStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
        BoardSettings::default(),
    ));
    Board {
        dispatcher,
        store,
        notifier,
    }
}

pub(super) fn texts(effects: &[Effect]) -> Vec<&str> {
    effects.iter().map(Effect::text).collect()
}

pub(super) fn mentions(effects: &[Effect], needle: &str) -> bool {
    effects.iter().any(|effect| effect.text().contains(needle))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
