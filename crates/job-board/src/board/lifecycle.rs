use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::browse::{find_candidates, find_vacancies, SearchResults};
use super::domain::{
    Account, ActorId, Application, ApplicationId, ApplicationStatus, NewApplication, Resume,
    Role, Vacancy, VacancyId,
};
use super::notify::{Notification, Notifier};
use super::render;
use super::store::{
    ApplicationFilter, EntityStore, RemovedResume, RemovedVacancy, StoreError, VacancyFilter,
    WipeReport,
};
use super::views::{
    EmployerVacancyView, ProfileCounts, ProfileSummary, ReceivedApplicationView,
    SeekerApplicationView, VacancyApplications,
};

/// Owner id of the built-in demonstration vacancies.
pub const SAMPLE_EMPLOYER_ID: ActorId = ActorId(999_999_999);

const FALLBACK_NAME: &str = "User";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSettings {
    pub sample_employer: ActorId,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            sample_employer: SAMPLE_EMPLOYER_ID,
        }
    }
}

/// What the transport knows about an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
    pub display_name: Option<String>,
    pub username: Option<String>,
}

impl ActorProfile {
    fn name_or_default(&self) -> String {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_NAME)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSelection {
    pub account: Account,
    pub created: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub application: Application,
    pub vacancy: Vacancy,
}

/// Application/vacancy/resume lifecycle with best-effort notification fan-out.
pub struct LifecycleManager<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    settings: BoardSettings,
}

impl<S, N> LifecycleManager<S, N>
where
    S: EntityStore + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, settings: BoardSettings) -> Self {
        Self {
            store,
            notifier,
            settings,
        }
    }

    pub fn settings(&self) -> BoardSettings {
        self.settings
    }

    pub fn is_sample(&self, vacancy: &Vacancy) -> bool {
        vacancy.employer_id == self.settings.sample_employer
    }

    fn deliver(&self, recipient: ActorId, text: String) -> bool {
        match self.notifier.notify(Notification::new(recipient, text)) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%recipient, %error, "notification not delivered");
                false
            }
        }
    }

    pub fn find_account(&self, actor: ActorId) -> Result<Option<Account>, LifecycleError> {
        Ok(self.store.find_account(actor)?)
    }

    pub fn find_resume(&self, seeker: ActorId) -> Result<Option<Resume>, LifecycleError> {
        Ok(self.store.find_resume(seeker)?)
    }

    /// `/start`: creates the account as a seeker when it does not exist yet.
    pub fn ensure_account(
        &self,
        actor: ActorId,
        profile: &ActorProfile,
    ) -> Result<Account, LifecycleError> {
        if let Some(account) = self.store.find_account(actor)? {
            return Ok(account);
        }
        let mut account = Account::new(actor, profile.name_or_default(), Role::Seeker);
        account.username = profile.username.clone();
        let account = self.store.save_account(account)?;
        tracing::info!(%actor, "account created");
        Ok(account)
    }

    pub fn select_role(
        &self,
        actor: ActorId,
        role: Role,
        profile: &ActorProfile,
    ) -> Result<RoleSelection, LifecycleError> {
        let (account, created) = match self.store.find_account(actor)? {
            Some(mut account) => {
                account.is_employer = role.is_employer();
                (account, false)
            }
            None => {
                let mut account = Account::new(actor, profile.name_or_default(), role);
                account.username = profile.username.clone();
                (account, true)
            }
        };
        let account = self.store.save_account(account)?;
        tracing::info!(%actor, role = role.label(), created, "role selected");
        Ok(RoleSelection { account, created })
    }

    pub fn wipe_account(&self, actor: ActorId) -> Result<WipeReport, LifecycleError> {
        let report = self.store.wipe_account(actor)?;
        tracing::info!(
            %actor,
            vacancies = report.vacancies,
            resumes = report.resumes,
            applications = report.applications,
            "account wiped"
        );
        Ok(report)
    }

    pub fn submit_application(
        &self,
        seeker: ActorId,
        vacancy_id: VacancyId,
    ) -> Result<Submission, LifecycleError> {
        let resume = self
            .store
            .find_resume(seeker)?
            .ok_or(LifecycleError::NoResume)?;
        let vacancy = self
            .store
            .find_vacancy(vacancy_id)?
            .filter(|vacancy| vacancy.is_active)
            .ok_or(LifecycleError::VacancyNotFound)?;

        let application = self
            .store
            .insert_application(NewApplication {
                user_id: seeker,
                vacancy_id,
                employer_id: vacancy.employer_id,
                resume_data: resume.snapshot(),
                user_contacts: resume.contacts.clone(),
            })
            .map_err(|error| match error {
                StoreError::Conflict => LifecycleError::DuplicateApplication,
                other => LifecycleError::Store(other),
            })?;
        tracing::info!(
            %seeker,
            vacancy = %vacancy_id,
            application = %application.id,
            "application submitted"
        );

        if !self.is_sample(&vacancy) {
            let seeker_name = self
                .store
                .find_account(seeker)?
                .map(|account| account.display_name)
                .unwrap_or_else(|| FALLBACK_NAME.to_string());
            let text = render::new_application_notice(
                &vacancy,
                &seeker_name,
                &resume.position,
                application.created_at,
            );
            self.deliver(vacancy.employer_id, text);
        }

        Ok(Submission {
            application,
            vacancy,
        })
    }

    fn owned_application(
        &self,
        employer: ActorId,
        id: ApplicationId,
    ) -> Result<Application, LifecycleError> {
        let application = self
            .store
            .find_application(id)?
            .ok_or(LifecycleError::ApplicationNotFound)?;
        if application.employer_id != employer {
            return Err(LifecycleError::NotFoundOrForbidden);
        }
        Ok(application)
    }

    fn transition(
        &self,
        employer: ActorId,
        id: ApplicationId,
        target: ApplicationStatus,
    ) -> Result<ReceivedApplicationView, LifecycleError> {
        let application = self.owned_application(employer, id)?;
        if !application.status.can_transition_to(target) {
            return Err(LifecycleError::InvalidTransition {
                from: application.status,
                to: target,
            });
        }
        let application = self.store.update_application_status(id, target)?;
        tracing::info!(%employer, application = %id, status = target.label(), "application status changed");
        self.received_view(application)
    }

    pub fn mark_viewed(
        &self,
        employer: ActorId,
        id: ApplicationId,
    ) -> Result<ReceivedApplicationView, LifecycleError> {
        self.transition(employer, id, ApplicationStatus::Viewed)
    }

    /// Marks viewed; the caller shows `application.user_contacts` for a call.
    pub fn offer_call(
        &self,
        employer: ActorId,
        id: ApplicationId,
    ) -> Result<ReceivedApplicationView, LifecycleError> {
        self.transition(employer, id, ApplicationStatus::Viewed)
    }

    /// Marks viewed; the caller shows `application.user_contacts` for a message.
    pub fn offer_message(
        &self,
        employer: ActorId,
        id: ApplicationId,
    ) -> Result<ReceivedApplicationView, LifecycleError> {
        self.transition(employer, id, ApplicationStatus::Viewed)
    }

    pub fn reject(
        &self,
        employer: ActorId,
        id: ApplicationId,
    ) -> Result<ReceivedApplicationView, LifecycleError> {
        let view = self.transition(employer, id, ApplicationStatus::Rejected)?;
        let vacancy = self.store.find_vacancy(view.application.vacancy_id)?;
        let (title, company) = match &vacancy {
            Some(vacancy) => (vacancy.title.as_str(), vacancy.company.as_str()),
            None => ("Vacancy", "Company"),
        };
        self.deliver(
            view.application.user_id,
            render::rejection_notice(title, company),
        );
        Ok(view)
    }

    pub fn delete_vacancy(
        &self,
        employer: ActorId,
        id: VacancyId,
    ) -> Result<RemovedVacancy, LifecycleError> {
        let removed = self
            .store
            .delete_vacancy_owned(employer, id)
            .map_err(|error| match error {
                StoreError::NotFound => LifecycleError::NotFoundOrForbidden,
                other => LifecycleError::Store(other),
            })?;
        tracing::info!(
            %employer,
            vacancy = %id,
            applications = removed.applications.len(),
            "vacancy deleted"
        );

        let text = render::vacancy_removed_notice(&removed.vacancy);
        let mut delivered = 0;
        for application in &removed.applications {
            if self.deliver(application.user_id, text.clone()) {
                delivered += 1;
            }
        }
        tracing::debug!(
            vacancy = %id,
            delivered,
            attempted = removed.applications.len(),
            "applicants notified"
        );
        Ok(removed)
    }

    /// Number of applications deleting the seeker's resume would remove.
    pub fn linked_applications(&self, seeker: ActorId) -> Result<usize, LifecycleError> {
        Ok(self
            .store
            .applications(ApplicationFilter::by_seeker(seeker))?
            .len())
    }

    pub fn delete_resume(&self, seeker: ActorId) -> Result<RemovedResume, LifecycleError> {
        let removed = self
            .store
            .delete_resume_cascade(seeker)
            .map_err(|error| match error {
                StoreError::NotFound => LifecycleError::ResumeNotFound,
                other => LifecycleError::Store(other),
            })?;
        tracing::info!(
            %seeker,
            applications = removed.applications.len(),
            "resume deleted"
        );
        Ok(removed)
    }

    pub fn active_vacancies(&self) -> Result<Vec<Vacancy>, LifecycleError> {
        Ok(self.store.vacancies(VacancyFilter::active())?)
    }

    /// Search keeps insertion order, unlike the newest-first listing.
    pub fn search_vacancies(&self, term: &str) -> Result<SearchResults<Vacancy>, LifecycleError> {
        let mut vacancies = self.store.vacancies(VacancyFilter::active())?;
        vacancies.sort_by_key(|vacancy| vacancy.id);
        Ok(find_vacancies(vacancies, term))
    }

    pub fn search_candidates(&self, term: &str) -> Result<SearchResults<Resume>, LifecycleError> {
        Ok(find_candidates(self.store.active_resumes()?, term))
    }

    pub fn profile(&self, actor: ActorId) -> Result<Option<ProfileSummary>, LifecycleError> {
        let Some(account) = self.store.find_account(actor)? else {
            return Ok(None);
        };
        let counts = if account.is_employer {
            ProfileCounts::Employer {
                vacancies: self.store.vacancies(VacancyFilter::owned_by(actor))?.len(),
                received_applications: self
                    .store
                    .applications(ApplicationFilter::by_employer(actor))?
                    .len(),
            }
        } else {
            ProfileCounts::Seeker {
                submitted_applications: self.linked_applications(actor)?,
            }
        };
        Ok(Some(ProfileSummary { account, counts }))
    }

    pub fn seeker_applications(
        &self,
        seeker: ActorId,
    ) -> Result<Vec<SeekerApplicationView>, LifecycleError> {
        self.store
            .applications(ApplicationFilter::by_seeker(seeker))?
            .into_iter()
            .map(|application| {
                let vacancy = self.store.find_vacancy(application.vacancy_id)?;
                let sample = vacancy
                    .as_ref()
                    .map(|vacancy| self.is_sample(vacancy))
                    .unwrap_or(false);
                Ok(SeekerApplicationView {
                    application,
                    vacancy,
                    sample,
                })
            })
            .collect()
    }

    fn received_view(
        &self,
        application: Application,
    ) -> Result<ReceivedApplicationView, LifecycleError> {
        let applicant_name = self
            .store
            .find_account(application.user_id)?
            .map(|account| account.display_name)
            .unwrap_or_else(|| FALLBACK_NAME.to_string());
        Ok(ReceivedApplicationView {
            application,
            applicant_name,
        })
    }

    /// Received applications grouped by vacancy. Groups are ordered by their
    /// newest application; applications without a vacancy are skipped.
    pub fn employer_applications(
        &self,
        employer: ActorId,
    ) -> Result<Vec<VacancyApplications>, LifecycleError> {
        let applications = self
            .store
            .applications(ApplicationFilter::by_employer(employer))?;

        let mut order: Vec<VacancyId> = Vec::new();
        let mut groups: BTreeMap<VacancyId, VacancyApplications> = BTreeMap::new();
        for application in applications {
            let vacancy_id = application.vacancy_id;
            if !groups.contains_key(&vacancy_id) {
                let Some(vacancy) = self.store.find_vacancy(vacancy_id)? else {
                    continue;
                };
                order.push(vacancy_id);
                groups.insert(
                    vacancy_id,
                    VacancyApplications {
                        vacancy,
                        applications: Vec::new(),
                    },
                );
            }
            let view = self.received_view(application)?;
            if let Some(group) = groups.get_mut(&vacancy_id) {
                group.applications.push(view);
            }
        }

        Ok(order
            .into_iter()
            .filter_map(|id| groups.remove(&id))
            .collect())
    }

    pub fn employer_vacancies(
        &self,
        employer: ActorId,
    ) -> Result<Vec<EmployerVacancyView>, LifecycleError> {
        self.store
            .vacancies(VacancyFilter::owned_by(employer))?
            .into_iter()
            .map(|vacancy| {
                let applications = self
                    .store
                    .applications(ApplicationFilter::by_vacancy(vacancy.id))?;
                let new_applications = applications
                    .iter()
                    .filter(|application| application.status == ApplicationStatus::New)
                    .count();
                Ok(EmployerVacancyView {
                    total_applications: applications.len(),
                    new_applications,
                    vacancy,
                })
            })
            .collect()
    }
}

/// Business-rule violations and store failures of lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("a resume is required to apply")]
    NoResume,
    #[error("already applied to this vacancy")]
    DuplicateApplication,
    #[error("vacancy not found")]
    VacancyNotFound,
    #[error("not found or not owned by the caller")]
    NotFoundOrForbidden,
    #[error("application not found")]
    ApplicationNotFound,
    #[error("resume not found")]
    ResumeNotFound,
    #[error("cannot move application from {} to {}", from.label(), to.label())]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LifecycleError {
    /// Message shown to the actor whose event failed.
    pub fn user_message(&self) -> String {
        match self {
            LifecycleError::NoResume => {
                "A resume is required to apply.\n\nChoose `my_resume` to create one.".to_string()
            }
            LifecycleError::DuplicateApplication => {
                "You have already applied to this vacancy.".to_string()
            }
            LifecycleError::VacancyNotFound => "This vacancy is no longer available.".to_string(),
            LifecycleError::NotFoundOrForbidden => {
                "Not found, or you have no rights to manage it.".to_string()
            }
            LifecycleError::ApplicationNotFound => "Application not found.".to_string(),
            LifecycleError::ResumeNotFound => "Resume not found.".to_string(),
            LifecycleError::InvalidTransition { from, .. } => {
                format!("This application is already {}.", from.label())
            }
            LifecycleError::Store(_) => {
                "The service is temporarily unavailable. Please try again later.".to_string()
            }
        }
    }
}
