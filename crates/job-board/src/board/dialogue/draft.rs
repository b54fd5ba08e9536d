use serde::{Deserialize, Serialize};

use crate::board::domain::{Account, NewResume, NewVacancy, ResumeField};

/// Contact details collected by the registration flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl RegistrationDraft {
    pub fn apply_to(self, mut account: Account) -> Account {
        account.display_name = self.name;
        account.phone = Some(self.phone);
        account.email = Some(self.email);
        account
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyDraft {
    pub title: String,
    pub company: String,
    pub salary: String,
    pub description: String,
    pub requirements: String,
}

impl VacancyDraft {
    pub fn into_vacancy(self, owner: &Account) -> NewVacancy {
        NewVacancy {
            title: self.title,
            company: self.company,
            salary: Some(self.salary),
            description: self.description,
            requirements: self.requirements,
            contacts: owner.contact_line(),
            category: None,
            employer_id: owner.external_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDraft {
    pub position: String,
    pub salary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub about: String,
}

impl ResumeDraft {
    pub fn into_resume(self, owner: &Account) -> NewResume {
        NewResume {
            user_id: owner.external_id,
            position: self.position,
            salary: Some(self.salary),
            experience: self.experience,
            education: self.education,
            skills: self.skills,
            about: Some(self.about),
            contacts: owner.contact_line(),
        }
    }
}

/// The field chosen for a single-field resume update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdateDraft {
    pub field: Option<ResumeField>,
}

/// Result of an affirmative confirmation (or a field update value), ready to be
/// written by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    Registration(RegistrationDraft),
    Vacancy(VacancyDraft),
    Resume(ResumeDraft),
    FieldUpdate { field: ResumeField, value: String },
}
