//! Wraparound browsing over result sets and capped substring search.

use serde::{Deserialize, Serialize};

use super::domain::{Resume, Vacancy};

/// Maximum number of vacancies shown for one search.
pub const VACANCY_SEARCH_CAP: usize = 8;
/// Maximum number of candidates shown for one search.
pub const CANDIDATE_SEARCH_CAP: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Previous,
    Next,
}

/// Ordered, non-empty result set with a current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<T> {
    items: Vec<T>,
    position: usize,
}

impl<T> Cursor<T> {
    /// Returns `None` for an empty set; callers report an empty state instead.
    pub fn open(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items, position: 0 })
        }
    }

    pub fn advance(&mut self, direction: Direction) {
        let len = self.items.len();
        self.position = match direction {
            Direction::Previous => (self.position + len - 1) % len,
            Direction::Next => (self.position + 1) % len,
        };
    }

    pub fn current(&self) -> &T {
        &self.items[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// One-based `index/total` counter for the current item.
    pub fn counter(&self) -> (usize, usize) {
        (self.position + 1, self.items.len())
    }
}

/// Capped view over a search: `shown` holds at most the cap, `total` the true
/// match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults<T> {
    pub shown: Vec<T>,
    pub total: usize,
}

impl<T> SearchResults<T> {
    fn capped(matches: Vec<T>, cap: usize) -> Self {
        let total = matches.len();
        let shown = matches.into_iter().take(cap).collect();
        Self { shown, total }
    }

    pub fn is_truncated(&self) -> bool {
        self.total > self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive match over title, description, company and requirements of
/// active vacancies. Input order is preserved.
pub fn find_vacancies(vacancies: Vec<Vacancy>, term: &str) -> SearchResults<Vacancy> {
    let needle = term.trim().to_lowercase();
    let matches = vacancies
        .into_iter()
        .filter(|vacancy| vacancy.is_active)
        .filter(|vacancy| {
            [
                vacancy.title.as_str(),
                vacancy.description.as_str(),
                vacancy.company.as_str(),
                vacancy.requirements.as_str(),
            ]
            .into_iter()
            .any(|field| contains_folded(field, &needle))
        })
        .collect();
    SearchResults::capped(matches, VACANCY_SEARCH_CAP)
}

/// Case-insensitive match over position, skills, experience and education of
/// active resumes. Input order is preserved.
pub fn find_candidates(resumes: Vec<Resume>, term: &str) -> SearchResults<Resume> {
    let needle = term.trim().to_lowercase();
    let matches = resumes
        .into_iter()
        .filter(|resume| resume.is_active)
        .filter(|resume| {
            [
                resume.position.as_str(),
                resume.skills.as_str(),
                resume.experience.as_str(),
                resume.education.as_str(),
            ]
            .into_iter()
            .any(|field| contains_folded(field, &needle))
        })
        .collect();
    SearchResults::capped(matches, CANDIDATE_SEARCH_CAP)
}
