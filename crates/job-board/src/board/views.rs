//! Read projections for profile and management screens.

use serde::Serialize;

use super::domain::{Account, Application, Vacancy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ProfileCounts {
    Employer {
        vacancies: usize,
        received_applications: usize,
    },
    Seeker {
        submitted_applications: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub account: Account,
    pub counts: ProfileCounts,
}

/// One of the seeker's own applications. `vacancy` is `None` once the vacancy
/// is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeekerApplicationView {
    pub application: Application,
    pub vacancy: Option<Vacancy>,
    pub sample: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedApplicationView {
    pub application: Application,
    pub applicant_name: String,
}

/// Received applications for one vacancy, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyApplications {
    pub vacancy: Vacancy,
    pub applications: Vec<ReceivedApplicationView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployerVacancyView {
    pub vacancy: Vacancy,
    pub total_applications: usize,
    pub new_applications: usize,
}
