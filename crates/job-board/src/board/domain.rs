use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// External chat identifier of an actor. Doubles as the session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub i64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VacancyId(pub u64);

impl fmt::Display for VacancyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub u64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two roles an actor can operate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Seeker,
    Employer,
}

impl Role {
    pub const fn from_flag(is_employer: bool) -> Self {
        if is_employer {
            Role::Employer
        } else {
            Role::Seeker
        }
    }

    pub const fn is_employer(self) -> bool {
        matches!(self, Role::Employer)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Role::Seeker => "Job seeker",
            Role::Employer => "Employer",
        }
    }
}

/// Registered participant. `is_employer` is the last role the actor picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub external_id: ActorId,
    pub username: Option<String>,
    pub display_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_employer: bool,
    pub registered_at: DateTime<Utc>,
}

impl Account {
    pub fn new(external_id: ActorId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            external_id,
            username: None,
            display_name: display_name.into(),
            phone: None,
            email: None,
            is_employer: role.is_employer(),
            registered_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        Role::from_flag(self.is_employer)
    }

    pub fn has_phone(&self) -> bool {
        self.phone
            .as_deref()
            .map(|phone| !phone.trim().is_empty())
            .unwrap_or(false)
    }

    /// Contact line copied into vacancies and resumes at commit time.
    pub fn contact_line(&self) -> String {
        format!(
            "{}, {}, {}",
            self.display_name,
            self.phone.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: VacancyId,
    pub title: String,
    pub company: String,
    pub salary: Option<String>,
    pub description: String,
    pub requirements: String,
    pub contacts: String,
    pub category: Option<String>,
    pub is_active: bool,
    pub employer_id: ActorId,
    pub created_at: DateTime<Utc>,
}

/// Vacancy fields supplied by the caller; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVacancy {
    pub title: String,
    pub company: String,
    pub salary: Option<String>,
    pub description: String,
    pub requirements: String,
    pub contacts: String,
    pub category: Option<String>,
    pub employer_id: ActorId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub user_id: ActorId,
    pub position: String,
    pub salary: Option<String>,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub about: Option<String>,
    pub contacts: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Resume {
    pub fn snapshot(&self) -> ResumeSnapshot {
        ResumeSnapshot {
            position: self.position.clone(),
            experience: self.experience.clone(),
            education: self.education.clone(),
            skills: self.skills.clone(),
        }
    }

    pub fn field(&self, field: ResumeField) -> Option<&str> {
        match field {
            ResumeField::Position => Some(&self.position),
            ResumeField::Salary => self.salary.as_deref(),
            ResumeField::Experience => Some(&self.experience),
            ResumeField::Education => Some(&self.education),
            ResumeField::Skills => Some(&self.skills),
            ResumeField::About => self.about.as_deref(),
        }
    }

    pub fn set_field(&mut self, field: ResumeField, value: String) {
        match field {
            ResumeField::Position => self.position = value,
            ResumeField::Salary => self.salary = Some(value),
            ResumeField::Experience => self.experience = value,
            ResumeField::Education => self.education = value,
            ResumeField::Skills => self.skills = value,
            ResumeField::About => self.about = Some(value),
        }
    }
}

/// Resume content written by the create flow. Replaces any existing resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResume {
    pub user_id: ActorId,
    pub position: String,
    pub salary: Option<String>,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub about: Option<String>,
    pub contacts: String,
}

/// Editable resume fields, keyed by a stable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeField {
    Position,
    Salary,
    Experience,
    Education,
    Skills,
    About,
}

impl ResumeField {
    pub const ALL: [ResumeField; 6] = [
        ResumeField::Position,
        ResumeField::Salary,
        ResumeField::Experience,
        ResumeField::Education,
        ResumeField::Skills,
        ResumeField::About,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            ResumeField::Position => "position",
            ResumeField::Salary => "salary",
            ResumeField::Experience => "experience",
            ResumeField::Education => "education",
            ResumeField::Skills => "skills",
            ResumeField::About => "about",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ResumeField::Position => "desired position",
            ResumeField::Salary => "desired salary",
            ResumeField::Experience => "work experience",
            ResumeField::Education => "education",
            ResumeField::Skills => "skills",
            ResumeField::About => "about yourself",
        }
    }

    pub fn from_id(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|field| field.id() == raw)
    }
}

/// Resume fields frozen into an application at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSnapshot {
    pub position: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    New,
    Viewed,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::New => "new",
            ApplicationStatus::Viewed => "viewed",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// `new -> viewed -> viewed`, `new | viewed -> rejected`, `rejected -> rejected`.
    pub const fn can_transition_to(self, target: ApplicationStatus) -> bool {
        matches!(
            (self, target),
            (ApplicationStatus::New, ApplicationStatus::Viewed)
                | (ApplicationStatus::Viewed, ApplicationStatus::Viewed)
                | (ApplicationStatus::New, ApplicationStatus::Rejected)
                | (ApplicationStatus::Viewed, ApplicationStatus::Rejected)
                | (ApplicationStatus::Rejected, ApplicationStatus::Rejected)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub user_id: ActorId,
    pub vacancy_id: VacancyId,
    pub employer_id: ActorId,
    pub resume_data: ResumeSnapshot,
    pub user_contacts: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub user_id: ActorId,
    pub vacancy_id: VacancyId,
    pub employer_id: ActorId,
    pub resume_data: ResumeSnapshot,
    pub user_contacts: String,
}
