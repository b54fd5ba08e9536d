use super::draft::{RegistrationDraft, ResumeDraft, VacancyDraft};
use super::state::{
    DialogueState, FlowKind, RegistrationStep, ResumeStep, UpdateStep, VacancyStep,
};
use super::transition::InputProblem;
use crate::board::domain::{Account, Resume, ResumeField};
use crate::board::effect::OptionSet;

const CURRENT_VALUE_LIMIT: usize = 100;
const NOT_SET: &str = "not set";

/// Text and option set asking for the next input of a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub options: OptionSet,
}

/// Values already on record, shown next to the question that replaces them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptContext<'a> {
    pub account: Option<&'a Account>,
    pub resume: Option<&'a Resume>,
}

pub(crate) fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() > limit {
        let head: String = value.chars().take(limit).collect();
        format!("{head}...")
    } else {
        value.to_string()
    }
}

fn with_current(question: &str, current: Option<&str>) -> String {
    match current.filter(|value| !value.trim().is_empty()) {
        Some(value) => format!("{question}\nCurrent value: {}", truncate(value, CURRENT_VALUE_LIMIT)),
        None => question.to_string(),
    }
}

fn cancel_hint(kind: FlowKind) -> String {
    format!("Send `{}` to leave.", kind.cancel_token())
}

pub fn problem_text(problem: InputProblem) -> &'static str {
    match problem {
        InputProblem::Empty => "This field cannot be empty. Please try again.",
        InputProblem::InvalidPhone => {
            "Invalid phone format. Example: '+380501234567' or '0501234567'."
        }
        InputProblem::InvalidEmail => "Invalid email format. Example: 'ivan@gmail.com'.",
        InputProblem::UnknownField => "Please choose one of the offered fields.",
        InputProblem::Unconfirmed => "Please answer 'yes' to confirm or 'no' to cancel.",
    }
}

pub fn render(state: &DialogueState, context: PromptContext<'_>) -> Prompt {
    let kind = state.kind();
    let cancel_only = OptionSet::CancelOnly { flow: kind };
    let (text, options) = match state {
        DialogueState::Registration { step, draft } => {
            let account = context.account;
            match step {
                RegistrationStep::Name => (
                    with_current(
                        "Let's update your contact details!\nEnter your full name, e.g. 'Ivan Petrenko':",
                        account.map(|account| account.display_name.as_str()),
                    ),
                    cancel_only,
                ),
                RegistrationStep::Phone => (
                    with_current(
                        "Enter your phone number, e.g. '+380501234567' or '0501234567':",
                        account.and_then(|account| account.phone.as_deref()),
                    ),
                    cancel_only,
                ),
                RegistrationStep::Email => (
                    with_current(
                        "Enter your email, e.g. 'ivan@gmail.com':",
                        account.and_then(|account| account.email.as_deref()),
                    ),
                    cancel_only,
                ),
                RegistrationStep::Confirm => {
                    (registration_summary(draft), OptionSet::Confirm { flow: kind })
                }
            }
        }
        DialogueState::VacancyCreate { step, draft } => match step {
            VacancyStep::Title => (
                "Let's add a vacancy!\nEnter the job title, e.g. 'Python developer':".to_string(),
                cancel_only,
            ),
            VacancyStep::Company => ("Enter the company name:".to_string(), cancel_only),
            VacancyStep::Salary => (
                "Enter the salary, e.g. '1000$', '25000 UAH' or 'negotiable':".to_string(),
                cancel_only,
            ),
            VacancyStep::Description => (
                "Describe the job and its duties:".to_string(),
                cancel_only,
            ),
            VacancyStep::Requirements => (
                "List the requirements for candidates:".to_string(),
                cancel_only,
            ),
            VacancyStep::Confirm => (
                vacancy_summary(draft, context.account),
                OptionSet::Confirm { flow: kind },
            ),
        },
        DialogueState::ResumeCreate { step, draft } => match step {
            ResumeStep::Position => (
                "Let's create your resume!\nEnter the desired position, e.g. 'Python developer':"
                    .to_string(),
                cancel_only,
            ),
            ResumeStep::Salary => (
                "Enter the desired salary, e.g. '1000$' or 'negotiable':".to_string(),
                cancel_only,
            ),
            ResumeStep::Experience => (
                "Describe your work experience, e.g. '3 years in IT':".to_string(),
                cancel_only,
            ),
            ResumeStep::Education => ("Enter your education:".to_string(), cancel_only),
            ResumeStep::Skills => (
                "List your skills, e.g. 'Python, Django, PostgreSQL':".to_string(),
                cancel_only,
            ),
            ResumeStep::About => ("Tell a little about yourself:".to_string(), cancel_only),
            ResumeStep::Confirm => (
                resume_summary(draft, context.account),
                OptionSet::Confirm { flow: kind },
            ),
        },
        DialogueState::ResumeFieldUpdate { step, draft } => match (step, draft.field) {
            (UpdateStep::EnterValue, Some(field)) => (
                with_current(
                    &format!("Enter the new value for {}:", field.label()),
                    context.resume.and_then(|resume| resume.field(field)),
                ),
                cancel_only,
            ),
            _ => (update_overview(context.resume), OptionSet::FieldChoice),
        },
    };

    Prompt {
        text: format!("{text}\n\n{}", cancel_hint(kind)),
        options,
    }
}

/// Prompt re-sent after a refused input: the problem first, then the question.
pub fn render_reprompt(
    state: &DialogueState,
    problem: InputProblem,
    context: PromptContext<'_>,
) -> Prompt {
    let prompt = render(state, context);
    Prompt {
        text: format!("{}\n\n{}", problem_text(problem), prompt.text),
        options: prompt.options,
    }
}

fn registration_summary(draft: &RegistrationDraft) -> String {
    format!(
        "Please check your contact details:\n\nName: {}\nPhone: {}\nEmail: {}\n\nAll correct? Send 'yes' to confirm or 'no' to cancel.",
        draft.name, draft.phone, draft.email
    )
}

fn vacancy_summary(draft: &VacancyDraft, owner: Option<&Account>) -> String {
    let contacts = owner.map(Account::contact_line).unwrap_or_default();
    format!(
        "Please check the vacancy:\n\nTitle: {}\nCompany: {}\nSalary: {}\nDescription: {}\nRequirements: {}\nContacts: {contacts}\n\nAll correct? Send 'yes' to confirm or 'no' to cancel.",
        draft.title, draft.company, draft.salary, draft.description, draft.requirements
    )
}

fn resume_summary(draft: &ResumeDraft, owner: Option<&Account>) -> String {
    let contacts = owner.map(Account::contact_line).unwrap_or_default();
    format!(
        "Please check your resume:\n\nDesired position: {}\nDesired salary: {}\nExperience: {}\nEducation: {}\nSkills: {}\nAbout: {}\nContacts: {contacts}\n\nAll correct? Send 'yes' to confirm or 'no' to cancel.",
        draft.position, draft.salary, draft.experience, draft.education, draft.skills, draft.about
    )
}

fn update_overview(resume: Option<&Resume>) -> String {
    let mut text = String::from("Resume update\n\nChoose what you want to update:\n");
    for field in ResumeField::ALL {
        let current = resume
            .and_then(|resume| resume.field(field))
            .map(|value| truncate(value, 50))
            .unwrap_or_else(|| NOT_SET.to_string());
        text.push_str(&format!("\n{} (`{}`): {current}", field.label(), field.id()));
    }
    text
}
