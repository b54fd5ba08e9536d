use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::domain::{
    Account, ActorId, Application, ApplicationId, ApplicationStatus, NewApplication, NewResume,
    NewVacancy, Resume, Vacancy, VacancyId,
};
use super::store::{
    ApplicationFilter, EntityStore, RemovedResume, RemovedVacancy, StoreError, VacancyFilter,
    WipeReport,
};

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<ActorId, Account>,
    vacancies: BTreeMap<VacancyId, Vacancy>,
    // insertion order doubles as the candidate search order
    resumes: Vec<Resume>,
    applications: BTreeMap<ApplicationId, Application>,
    next_vacancy: u64,
    next_application: u64,
}

impl Tables {
    fn remove_applications_where(
        &mut self,
        predicate: impl Fn(&Application) -> bool,
    ) -> Vec<Application> {
        let ids: Vec<ApplicationId> = self
            .applications
            .values()
            .filter(|application| predicate(application))
            .map(|application| application.id)
            .collect();

        ids.into_iter()
            .filter_map(|id| self.applications.remove(&id))
            .collect()
    }
}

/// Store keeping every table behind a single lock so compound operations are
/// atomic.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    tables: Mutex<Tables>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, u64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

impl EntityStore for InMemoryEntityStore {
    fn find_account(&self, id: ActorId) -> Result<Option<Account>, StoreError> {
        Ok(self.lock()?.accounts.get(&id).cloned())
    }

    fn save_account(&self, account: Account) -> Result<Account, StoreError> {
        let mut tables = self.lock()?;
        tables.accounts.insert(account.external_id, account.clone());
        Ok(account)
    }

    fn insert_vacancy(&self, vacancy: NewVacancy) -> Result<Vacancy, StoreError> {
        let mut tables = self.lock()?;
        tables.next_vacancy += 1;
        let stored = Vacancy {
            id: VacancyId(tables.next_vacancy),
            title: vacancy.title,
            company: vacancy.company,
            salary: vacancy.salary,
            description: vacancy.description,
            requirements: vacancy.requirements,
            contacts: vacancy.contacts,
            category: vacancy.category,
            is_active: true,
            employer_id: vacancy.employer_id,
            created_at: Utc::now(),
        };
        tables.vacancies.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn find_vacancy(&self, id: VacancyId) -> Result<Option<Vacancy>, StoreError> {
        Ok(self.lock()?.vacancies.get(&id).cloned())
    }

    fn vacancies(&self, filter: VacancyFilter) -> Result<Vec<Vacancy>, StoreError> {
        let tables = self.lock()?;
        let mut found: Vec<Vacancy> = tables
            .vacancies
            .values()
            .filter(|vacancy| !filter.active_only || vacancy.is_active)
            .filter(|vacancy| filter.employer.map_or(true, |id| vacancy.employer_id == id))
            .cloned()
            .collect();
        newest_first(&mut found, |vacancy| (vacancy.created_at, vacancy.id.0));
        Ok(found)
    }

    fn delete_vacancy_owned(
        &self,
        employer: ActorId,
        id: VacancyId,
    ) -> Result<RemovedVacancy, StoreError> {
        let mut tables = self.lock()?;
        match tables.vacancies.get(&id) {
            Some(vacancy) if vacancy.employer_id == employer => {}
            _ => return Err(StoreError::NotFound),
        }

        let applications = tables.remove_applications_where(|application| {
            application.vacancy_id == id
        });
        let vacancy = tables.vacancies.remove(&id).ok_or(StoreError::NotFound)?;
        Ok(RemovedVacancy {
            vacancy,
            applications,
        })
    }

    fn find_resume(&self, user: ActorId) -> Result<Option<Resume>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .resumes
            .iter()
            .find(|resume| resume.user_id == user)
            .cloned())
    }

    fn upsert_resume(&self, resume: NewResume) -> Result<Resume, StoreError> {
        let mut tables = self.lock()?;
        if let Some(existing) = tables
            .resumes
            .iter_mut()
            .find(|stored| stored.user_id == resume.user_id)
        {
            existing.position = resume.position;
            existing.salary = resume.salary;
            existing.experience = resume.experience;
            existing.education = resume.education;
            existing.skills = resume.skills;
            existing.about = resume.about;
            existing.contacts = resume.contacts;
            existing.is_active = true;
            return Ok(existing.clone());
        }

        let stored = Resume {
            user_id: resume.user_id,
            position: resume.position,
            salary: resume.salary,
            experience: resume.experience,
            education: resume.education,
            skills: resume.skills,
            about: resume.about,
            contacts: resume.contacts,
            is_active: true,
            created_at: Utc::now(),
        };
        tables.resumes.push(stored.clone());
        Ok(stored)
    }

    fn update_resume(&self, resume: Resume) -> Result<Resume, StoreError> {
        let mut tables = self.lock()?;
        let slot = tables
            .resumes
            .iter_mut()
            .find(|stored| stored.user_id == resume.user_id)
            .ok_or(StoreError::NotFound)?;
        *slot = resume.clone();
        Ok(resume)
    }

    fn active_resumes(&self) -> Result<Vec<Resume>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .resumes
            .iter()
            .filter(|resume| resume.is_active)
            .cloned()
            .collect())
    }

    fn delete_resume_cascade(&self, user: ActorId) -> Result<RemovedResume, StoreError> {
        let mut tables = self.lock()?;
        let position = tables
            .resumes
            .iter()
            .position(|resume| resume.user_id == user)
            .ok_or(StoreError::NotFound)?;

        let applications =
            tables.remove_applications_where(|application| application.user_id == user);
        let resume = tables.resumes.remove(position);
        Ok(RemovedResume {
            resume,
            applications,
        })
    }

    fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, StoreError> {
        let mut tables = self.lock()?;
        let duplicate = tables.applications.values().any(|stored| {
            stored.user_id == application.user_id && stored.vacancy_id == application.vacancy_id
        });
        if duplicate {
            return Err(StoreError::Conflict);
        }

        tables.next_application += 1;
        let stored = Application {
            id: ApplicationId(tables.next_application),
            user_id: application.user_id,
            vacancy_id: application.vacancy_id,
            employer_id: application.employer_id,
            resume_data: application.resume_data,
            user_contacts: application.user_contacts,
            status: ApplicationStatus::New,
            created_at: Utc::now(),
        };
        tables.applications.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn find_application(&self, id: ApplicationId) -> Result<Option<Application>, StoreError> {
        Ok(self.lock()?.applications.get(&id).cloned())
    }

    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, StoreError> {
        let mut tables = self.lock()?;
        let application = tables
            .applications
            .get_mut(&id)
            .ok_or(StoreError::NotFound)?;
        application.status = status;
        Ok(application.clone())
    }

    fn applications(&self, filter: ApplicationFilter) -> Result<Vec<Application>, StoreError> {
        let tables = self.lock()?;
        let mut found: Vec<Application> = tables
            .applications
            .values()
            .filter(|application| filter.matches(application))
            .cloned()
            .collect();
        newest_first(&mut found, |application| {
            (application.created_at, application.id.0)
        });
        Ok(found)
    }

    fn wipe_account(&self, id: ActorId) -> Result<WipeReport, StoreError> {
        let mut tables = self.lock()?;

        let owned: Vec<VacancyId> = tables
            .vacancies
            .values()
            .filter(|vacancy| vacancy.employer_id == id)
            .map(|vacancy| vacancy.id)
            .collect();
        let removed_applications = tables.remove_applications_where(|application| {
            application.user_id == id
                || application.employer_id == id
                || owned.contains(&application.vacancy_id)
        });
        for vacancy in &owned {
            tables.vacancies.remove(vacancy);
        }

        let resumes_before = tables.resumes.len();
        tables.resumes.retain(|resume| resume.user_id != id);
        let removed_resumes = resumes_before - tables.resumes.len();

        let account = tables.accounts.remove(&id).is_some();

        Ok(WipeReport {
            vacancies: owned.len(),
            resumes: removed_resumes,
            applications: removed_applications.len(),
            account,
        })
    }
}
