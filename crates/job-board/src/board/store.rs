use serde::Serialize;

use super::domain::{
    Account, ActorId, Application, ApplicationId, ApplicationStatus, NewApplication, NewResume,
    NewVacancy, Resume, Vacancy, VacancyId,
};

/// Selection criteria for vacancy queries. Results are returned newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VacancyFilter {
    pub employer: Option<ActorId>,
    pub active_only: bool,
}

impl VacancyFilter {
    pub fn active() -> Self {
        Self {
            employer: None,
            active_only: true,
        }
    }

    pub fn owned_by(employer: ActorId) -> Self {
        Self {
            employer: Some(employer),
            active_only: false,
        }
    }
}

/// Selection criteria for application queries. Results are returned newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub seeker: Option<ActorId>,
    pub employer: Option<ActorId>,
    pub vacancy: Option<VacancyId>,
}

impl ApplicationFilter {
    pub fn by_seeker(seeker: ActorId) -> Self {
        Self {
            seeker: Some(seeker),
            ..Self::default()
        }
    }

    pub fn by_employer(employer: ActorId) -> Self {
        Self {
            employer: Some(employer),
            ..Self::default()
        }
    }

    pub fn by_vacancy(vacancy: VacancyId) -> Self {
        Self {
            vacancy: Some(vacancy),
            ..Self::default()
        }
    }

    pub fn matches(&self, application: &Application) -> bool {
        self.seeker.map_or(true, |id| application.user_id == id)
            && self.employer.map_or(true, |id| application.employer_id == id)
            && self.vacancy.map_or(true, |id| application.vacancy_id == id)
    }
}

/// What the cascading vacancy delete removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedVacancy {
    pub vacancy: Vacancy,
    pub applications: Vec<Application>,
}

/// What the cascading resume delete removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedResume {
    pub resume: Resume,
    pub applications: Vec<Application>,
}

/// Counts of records removed by the maintenance wipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WipeReport {
    pub vacancies: usize,
    pub resumes: usize,
    pub applications: usize,
    pub account: bool,
}

/// Persistence boundary for the four record kinds.
///
/// Compound methods (`insert_application`, `delete_vacancy_owned`,
/// `delete_resume_cascade`, `wipe_account`) are single transactions: the check and
/// the write happen atomically with respect to other callers.
pub trait EntityStore: Send + Sync {
    fn find_account(&self, id: ActorId) -> Result<Option<Account>, StoreError>;
    /// Inserts or replaces the account keyed by `external_id`.
    fn save_account(&self, account: Account) -> Result<Account, StoreError>;

    fn insert_vacancy(&self, vacancy: NewVacancy) -> Result<Vacancy, StoreError>;
    fn find_vacancy(&self, id: VacancyId) -> Result<Option<Vacancy>, StoreError>;
    fn vacancies(&self, filter: VacancyFilter) -> Result<Vec<Vacancy>, StoreError>;
    /// Removes the vacancy and every application referencing it, provided
    /// `employer` owns it. Fails with `NotFound` otherwise.
    fn delete_vacancy_owned(
        &self,
        employer: ActorId,
        id: VacancyId,
    ) -> Result<RemovedVacancy, StoreError>;

    fn find_resume(&self, user: ActorId) -> Result<Option<Resume>, StoreError>;
    /// Create-or-replace keyed by `user_id`.
    fn upsert_resume(&self, resume: NewResume) -> Result<Resume, StoreError>;
    /// Overwrites an existing resume. Fails with `NotFound` when there is none.
    fn update_resume(&self, resume: Resume) -> Result<Resume, StoreError>;
    /// Active resumes in insertion order.
    fn active_resumes(&self) -> Result<Vec<Resume>, StoreError>;
    fn delete_resume_cascade(&self, user: ActorId) -> Result<RemovedResume, StoreError>;

    /// Fails with `Conflict` when the (user, vacancy) pair already applied.
    fn insert_application(&self, application: NewApplication)
        -> Result<Application, StoreError>;
    fn find_application(&self, id: ApplicationId) -> Result<Option<Application>, StoreError>;
    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, StoreError>;
    fn applications(&self, filter: ApplicationFilter) -> Result<Vec<Application>, StoreError>;

    fn wipe_account(&self, id: ActorId) -> Result<WipeReport, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
