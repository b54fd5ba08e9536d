//! Plain-text rendering of records and notices. Output depends only on the
//! arguments, so re-rendering the same cursor position gives the same text.

use chrono::{DateTime, Utc};

use super::dialogue::truncate;
use super::domain::{Application, ApplicationStatus, Resume, Role, Vacancy};
use super::views::{
    EmployerVacancyView, ProfileCounts, ProfileSummary, ReceivedApplicationView,
    SeekerApplicationView,
};

const SEPARATOR: &str = "--------------------";
const NOT_SET: &str = "not set";
const SAMPLE_MARKER: &str = "[sample] ";

fn day(at: DateTime<Utc>) -> String {
    at.format("%d.%m.%Y").to_string()
}

fn minute(at: DateTime<Utc>) -> String {
    at.format("%d.%m.%Y %H:%M").to_string()
}

fn or_not_set(value: Option<&str>) -> &str {
    value.filter(|value| !value.trim().is_empty()).unwrap_or(NOT_SET)
}

fn marker(sample: bool) -> &'static str {
    if sample {
        SAMPLE_MARKER
    } else {
        ""
    }
}

pub fn status_badge(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::New => "[new]",
        ApplicationStatus::Viewed => "[viewed]",
        ApplicationStatus::Rejected => "[rejected]",
    }
}

pub fn welcome() -> &'static str {
    "Welcome to the job board!\n\nChoose your goal:\n\nFind jobs - if you are looking for work\nPost jobs - if you are looking for employees"
}

pub fn choose_action() -> &'static str {
    "Choose an action:"
}

pub fn menu_hint() -> &'static str {
    "Please choose an action from the menu."
}

pub fn help() -> &'static str {
    "Help\n\n\
     For job seekers:\n\
     - list_vacancies: browse all active vacancies\n\
     - search_vacancies: search by keyword\n\
     - my_resume: create and manage your resume\n\
     - my_applications: statuses of your applications\n\
     - profile: your account data\n\
     - contacts: update contact details\n\n\
     For employers:\n\
     - add_vacancy: publish a new vacancy\n\
     - my_vacancies: manage your vacancies\n\
     - incoming_applications: review applications\n\
     - search_candidates: search resumes by keyword"
}

pub fn role_selected(role: Role, created: bool) -> String {
    let greeting = match (role, created) {
        (Role::Seeker, true) => "You are registered as a job seeker!",
        (Role::Seeker, false) => "Welcome back, job seeker!",
        (Role::Employer, true) => "You are registered as an employer!",
        (Role::Employer, false) => "Welcome back, employer!",
    };
    let advice = match role {
        Role::Seeker => "We recommend filling in your contact details: choose `contacts` in the menu.",
        Role::Employer => "Contact details are required to add vacancies: choose `contacts` in the menu.",
    };
    format!("{greeting}\n\n{advice}")
}

pub fn vacancy_card(vacancy: &Vacancy, sample: bool) -> String {
    format!(
        "{}{}\nCompany: {}\nSalary: {}\nDescription: {}\nRequirements: {}\n{SEPARATOR}",
        marker(sample),
        vacancy.title,
        vacancy.company,
        or_not_set(vacancy.salary.as_deref()),
        vacancy.description,
        vacancy.requirements,
    )
}

/// Card with its `index/total` counter line, as shown while paging.
pub fn vacancy_page(vacancy: &Vacancy, sample: bool, position: usize, total: usize) -> String {
    format!("{}\n{}/{}", vacancy_card(vacancy, sample), position + 1, total)
}

pub fn search_vacancy_entry(vacancy: &Vacancy, sample: bool) -> String {
    format!(
        "{}{}\nCompany: {}\nSalary: {}\n{}\n{SEPARATOR}",
        marker(sample),
        vacancy.title,
        vacancy.company,
        or_not_set(vacancy.salary.as_deref()),
        truncate(&vacancy.description, 100),
    )
}

pub fn candidate_entry(resume: &Resume) -> String {
    format!(
        "Position: {}\nSalary: {}\nExperience: {}\nSkills: {}\nContacts: {}\n{SEPARATOR}",
        resume.position,
        or_not_set(resume.salary.as_deref()),
        truncate(&resume.experience, 100),
        truncate(&resume.skills, 100),
        resume.contacts,
    )
}

pub fn search_prompt(candidates: bool) -> &'static str {
    if candidates {
        "Enter a keyword to search candidates, e.g. 'Python' or 'manager':"
    } else {
        "Enter a keyword to search vacancies, e.g. 'Python' or 'manager' or 'Kyiv':"
    }
}

pub fn search_header(term: &str, total: usize) -> String {
    format!("Results for '{term}' ({total}):")
}

pub fn search_empty(term: &str) -> String {
    format!("Nothing found for '{term}'. Try another keyword.")
}

pub fn search_truncated(total: usize, shown: usize) -> String {
    format!("Found {total}, showing the first {shown}. Refine the keyword to narrow the results.")
}

pub fn resume_card(resume: &Resume) -> String {
    format!(
        "Your resume:\n\nDesired position: {}\nDesired salary: {}\nExperience: {}\nEducation: {}\nSkills: {}\nAbout: {}\nContacts: {}\nCreated: {}\nStatus: {}",
        resume.position,
        or_not_set(resume.salary.as_deref()),
        resume.experience,
        resume.education,
        resume.skills,
        or_not_set(resume.about.as_deref()),
        resume.contacts,
        day(resume.created_at),
        if resume.is_active { "active" } else { "inactive" },
    )
}

pub fn resume_menu(has_resume: bool) -> &'static str {
    if has_resume {
        "Resume management\n\nChoose an action:"
    } else {
        "You don't have a resume yet.\n\nLet's create your first one!"
    }
}

pub fn profile(summary: &ProfileSummary) -> String {
    let account = &summary.account;
    let counts = match summary.counts {
        ProfileCounts::Employer {
            vacancies,
            received_applications,
        } => format!(
            "Your vacancies: {vacancies}\nApplications received: {received_applications}"
        ),
        ProfileCounts::Seeker {
            submitted_applications,
        } => format!("Applications submitted: {submitted_applications}"),
    };
    format!(
        "Your profile:\n\nName: {}\nPhone: {}\nEmail: {}\nType: {}\n{counts}\nRegistered: {}",
        account.display_name,
        or_not_set(account.phone.as_deref()),
        or_not_set(account.email.as_deref()),
        account.role().label(),
        day(account.registered_at),
    )
}

pub fn seeker_application(view: &SeekerApplicationView) -> String {
    let (title, company) = match &view.vacancy {
        Some(vacancy) => (vacancy.title.as_str(), vacancy.company.as_str()),
        None => ("Vacancy not found", "unknown"),
    };
    format!(
        "{}{title}\nCompany: {company}\nSubmitted: {}\nStatus: {} {}\n{SEPARATOR}",
        marker(view.sample),
        day(view.application.created_at),
        status_badge(view.application.status),
        view.application.status.label(),
    )
}

pub fn vacancy_group_header(vacancy: &Vacancy, count: usize) -> String {
    format!("Vacancy: {}\nApplications: {count}\n{SEPARATOR}", vacancy.title)
}

pub fn received_application(view: &ReceivedApplicationView) -> String {
    let application: &Application = &view.application;
    let snapshot = &application.resume_data;
    format!(
        "Candidate: {}\nDesired position: {}\nExperience: {}\nEducation: {}\nSkills: {}\nContacts: {}\nSubmitted: {}\nStatus: {} {}\n{SEPARATOR}",
        view.applicant_name,
        snapshot.position,
        truncate(&snapshot.experience, 80),
        truncate(&snapshot.education, 80),
        truncate(&snapshot.skills, 80),
        application.user_contacts,
        minute(application.created_at),
        status_badge(application.status),
        application.status.label(),
    )
}

pub fn employer_vacancy(view: &EmployerVacancyView) -> String {
    let vacancy = &view.vacancy;
    let mut applications = format!("{} applications", view.total_applications);
    if view.new_applications > 0 {
        applications.push_str(&format!(" ({} new)", view.new_applications));
    }
    format!(
        "{}\nCompany: {}\nSalary: {}\n{}\n{applications}\nCreated: {}\nStatus: {}\n{SEPARATOR}",
        vacancy.title,
        vacancy.company,
        or_not_set(vacancy.salary.as_deref()),
        truncate(&vacancy.description, 100),
        day(vacancy.created_at),
        if vacancy.is_active { "active" } else { "inactive" },
    )
}

pub fn call_contacts(contacts: &str) -> String {
    format!("Contacts for a call:\n{contacts}\n\nDon't forget to update the candidate after the call!")
}

pub fn message_contacts(contacts: &str) -> String {
    format!("Contacts for a message:\n{contacts}\n\nWrite to the candidate about the next steps!")
}

pub fn application_submitted(vacancy: &Vacancy) -> String {
    format!(
        "Application submitted for '{}'!\n\nThe employer will review your resume and contact you.",
        vacancy.title
    )
}

pub fn vacancy_deleted(vacancy: &Vacancy, applications: usize) -> String {
    let mut text = format!("Vacancy '{}' deleted.", vacancy.title);
    if applications > 0 {
        text.push_str(&format!(
            "\n\n{applications} applications for this vacancy were removed as well."
        ));
    }
    text
}

pub fn resume_deleted(applications: usize) -> String {
    let mut text = String::from("Resume deleted.");
    if applications > 0 {
        text.push_str(&format!(
            "\n\n{applications} of your applications were removed as well."
        ));
    }
    text
}

pub fn resume_deletion_warning(applications: usize) -> String {
    format!(
        "Warning! You have {applications} applications linked to this resume.\n\nDeleting the resume removes all of them.\n\nAre you sure you want to delete your resume?"
    )
}

/// Sent to the employer when a seeker applies.
pub fn new_application_notice(
    vacancy: &Vacancy,
    seeker_name: &str,
    position: &str,
    at: DateTime<Utc>,
) -> String {
    format!(
        "New application for your vacancy!\n\nVacancy: {}\nCandidate: {seeker_name}\nResume: {position}\nSubmitted: {}\n\nOpen `incoming_applications` for details.",
        vacancy.title,
        minute(at),
    )
}

/// Sent to the seeker when an employer rejects the application.
pub fn rejection_notice(title: &str, company: &str) -> String {
    format!(
        "Update on your application:\n\nVacancy: {title}\nCompany: {company}\nStatus: rejected\n\nThank you for applying! Unfortunately your profile does not match this position right now."
    )
}

/// Sent to each applicant of a deleted vacancy.
pub fn vacancy_removed_notice(vacancy: &Vacancy) -> String {
    format!(
        "Update on your application:\n\nVacancy: {}\nCompany: {}\nStatus: vacancy deleted\n\nThe employer removed this vacancy. Your application is no longer considered.",
        vacancy.title, vacancy.company
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::domain::{ActorId, VacancyId};

    fn vacancy() -> Vacancy {
        Vacancy {
            id: VacancyId(3),
            title: "Junior Python Developer".to_string(),
            company: "TechSolutions".to_string(),
            salary: None,
            description: "Backend services".to_string(),
            requirements: "Python, Django".to_string(),
            contacts: "hr@techsolutions.ua".to_string(),
            category: None,
            is_active: true,
            employer_id: ActorId(999_999_999),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sample_vacancies_carry_the_marker() {
        let card = vacancy_card(&vacancy(), true);
        assert!(card.starts_with("[sample] Junior Python Developer"));
        assert!(card.contains("Salary: not set"));
        assert!(!vacancy_card(&vacancy(), false).contains("[sample]"));
    }

    #[test]
    fn page_counter_is_one_based() {
        let page = vacancy_page(&vacancy(), false, 2, 3);
        assert!(page.ends_with("3/3"));
        assert_eq!(page, vacancy_page(&vacancy(), false, 2, 3));
    }

    #[test]
    fn rejection_names_title_and_company() {
        let text = rejection_notice("Junior Python Developer", "TechSolutions");
        assert!(text.contains("Junior Python Developer"));
        assert!(text.contains("TechSolutions"));
    }
}
