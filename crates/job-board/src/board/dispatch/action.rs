use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::browse::Direction;
use crate::board::dialogue::FlowKind;
use crate::board::domain::{ApplicationId, Role, VacancyId};

/// Menu entries, keyed by stable identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    ListVacancies,
    SearchVacancies,
    MyResume,
    MyApplications,
    AddVacancy,
    MyVacancies,
    IncomingApplications,
    SearchCandidates,
    Profile,
    Contacts,
    Help,
    MainMenu,
    FindJobs,
    PostJobs,
    CreateResume,
    UpdateResume,
    ViewResume,
    DeleteResume,
    ResumeMenu,
    Back,
    ConfirmDeletion,
    CancelDeletion,
}

impl MenuAction {
    pub const ALL: [MenuAction; 22] = [
        MenuAction::ListVacancies,
        MenuAction::SearchVacancies,
        MenuAction::MyResume,
        MenuAction::MyApplications,
        MenuAction::AddVacancy,
        MenuAction::MyVacancies,
        MenuAction::IncomingApplications,
        MenuAction::SearchCandidates,
        MenuAction::Profile,
        MenuAction::Contacts,
        MenuAction::Help,
        MenuAction::MainMenu,
        MenuAction::FindJobs,
        MenuAction::PostJobs,
        MenuAction::CreateResume,
        MenuAction::UpdateResume,
        MenuAction::ViewResume,
        MenuAction::DeleteResume,
        MenuAction::ResumeMenu,
        MenuAction::Back,
        MenuAction::ConfirmDeletion,
        MenuAction::CancelDeletion,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            MenuAction::ListVacancies => "list_vacancies",
            MenuAction::SearchVacancies => "search_vacancies",
            MenuAction::MyResume => "my_resume",
            MenuAction::MyApplications => "my_applications",
            MenuAction::AddVacancy => "add_vacancy",
            MenuAction::MyVacancies => "my_vacancies",
            MenuAction::IncomingApplications => "incoming_applications",
            MenuAction::SearchCandidates => "search_candidates",
            MenuAction::Profile => "profile",
            MenuAction::Contacts => "contacts",
            MenuAction::Help => "help",
            MenuAction::MainMenu => "main_menu",
            MenuAction::FindJobs => "find_jobs",
            MenuAction::PostJobs => "post_jobs",
            MenuAction::CreateResume => "create_resume",
            MenuAction::UpdateResume => "update_resume",
            MenuAction::ViewResume => "view_resume",
            MenuAction::DeleteResume => "delete_resume",
            MenuAction::ResumeMenu => "resume_menu",
            MenuAction::Back => "back",
            MenuAction::ConfirmDeletion => "confirm_deletion",
            MenuAction::CancelDeletion => "cancel_deletion",
        }
    }

    pub fn from_id(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|action| action.id() == raw)
    }

    /// Role an action is reserved for; `None` means available to everyone.
    pub const fn scope(self) -> Option<Role> {
        match self {
            MenuAction::ListVacancies
            | MenuAction::SearchVacancies
            | MenuAction::MyResume
            | MenuAction::MyApplications
            | MenuAction::CreateResume
            | MenuAction::UpdateResume
            | MenuAction::ViewResume
            | MenuAction::DeleteResume
            | MenuAction::ResumeMenu
            | MenuAction::Back
            | MenuAction::ConfirmDeletion
            | MenuAction::CancelDeletion => Some(Role::Seeker),
            MenuAction::AddVacancy
            | MenuAction::MyVacancies
            | MenuAction::IncomingApplications
            | MenuAction::SearchCandidates => Some(Role::Employer),
            MenuAction::Profile
            | MenuAction::Contacts
            | MenuAction::Help
            | MenuAction::MainMenu
            | MenuAction::FindJobs
            | MenuAction::PostJobs => None,
        }
    }

    pub fn available_to(self, role: Option<Role>) -> bool {
        match self.scope() {
            None => true,
            Some(required) => role == Some(required),
        }
    }

    /// Flow entered by this action, if any.
    pub const fn starts_flow(self) -> Option<FlowKind> {
        match self {
            MenuAction::Contacts => Some(FlowKind::Registration),
            MenuAction::AddVacancy => Some(FlowKind::VacancyCreate),
            MenuAction::CreateResume => Some(FlowKind::ResumeCreate),
            MenuAction::UpdateResume => Some(FlowKind::ResumeFieldUpdate),
            _ => None,
        }
    }
}

/// Button callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callback {
    Apply(VacancyId),
    Viewed(ApplicationId),
    Call(ApplicationId),
    Message(ApplicationId),
    Reject(ApplicationId),
    DeleteVacancy(VacancyId),
    Navigate(Direction),
}

/// Decimal id in the exact form `Display` prints: digits only, no sign, no
/// leading zeros.
fn parse_id(raw: &str) -> Option<u64> {
    let canonical = !raw.is_empty()
        && raw.bytes().all(|byte| byte.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    if canonical {
        raw.parse().ok()
    } else {
        None
    }
}

impl Callback {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw {
            "prev_vacancy" => return Some(Callback::Navigate(Direction::Previous)),
            "next_vacancy" => return Some(Callback::Navigate(Direction::Next)),
            _ => {}
        }

        // `delete_vacancy_` must be tried before any shorter prefix.
        if let Some(id) = raw.strip_prefix("delete_vacancy_") {
            return parse_id(id).map(|id| Callback::DeleteVacancy(VacancyId(id)));
        }

        let (prefix, id) = raw.split_once('_')?;
        let id = parse_id(id)?;
        match prefix {
            "apply" => Some(Callback::Apply(VacancyId(id))),
            "viewed" => Some(Callback::Viewed(ApplicationId(id))),
            "call" => Some(Callback::Call(ApplicationId(id))),
            "message" => Some(Callback::Message(ApplicationId(id))),
            "reject" => Some(Callback::Reject(ApplicationId(id))),
            _ => None,
        }
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Apply(id) => write!(f, "apply_{id}"),
            Callback::Viewed(id) => write!(f, "viewed_{id}"),
            Callback::Call(id) => write!(f, "call_{id}"),
            Callback::Message(id) => write!(f, "message_{id}"),
            Callback::Reject(id) => write!(f, "reject_{id}"),
            Callback::DeleteVacancy(id) => write!(f, "delete_vacancy_{id}"),
            Callback::Navigate(Direction::Previous) => f.write_str("prev_vacancy"),
            Callback::Navigate(Direction::Next) => f.write_str("next_vacancy"),
        }
    }
}
