use super::session::Session;
use super::{Dispatcher, Handled, Reply};
use crate::board::domain::{ActorId, VacancyId};
use crate::board::effect::OptionSet;
use crate::board::notify::Notifier;
use crate::board::render;
use crate::board::store::EntityStore;
use crate::board::views::ReceivedApplicationView;

impl<S, N> Dispatcher<S, N>
where
    S: EntityStore + 'static,
    N: Notifier + 'static,
{
    pub(super) fn employer_vacancies(&self, employer: ActorId, reply: &mut Reply) -> Handled {
        let views = self.lifecycle.employer_vacancies(employer)?;
        if views.is_empty() {
            reply.say("You have no vacancies yet.\n\nChoose `add_vacancy` to create the first one!");
            return Ok(());
        }
        reply.say("Your vacancies:");
        for view in &views {
            reply.prompt(
                render::employer_vacancy(view),
                OptionSet::VacancyManagement {
                    vacancy_id: view.vacancy.id,
                },
            );
        }
        Ok(())
    }

    pub(super) fn employer_applications(&self, employer: ActorId, reply: &mut Reply) -> Handled {
        let groups = self.lifecycle.employer_applications(employer)?;
        let total: usize = groups.iter().map(|group| group.applications.len()).sum();
        if total == 0 {
            reply.say("No applications for your vacancies yet.\n\nThey will appear here once candidates apply.");
            return Ok(());
        }
        reply.say(format!("Applications for your vacancies ({total}):"));
        for group in &groups {
            reply.say(render::vacancy_group_header(
                &group.vacancy,
                group.applications.len(),
            ));
            for view in &group.applications {
                reply.prompt(
                    render::received_application(view),
                    OptionSet::ApplicationControls {
                        application_id: view.application.id,
                    },
                );
            }
        }
        Ok(())
    }

    /// Re-renders the application card the employer acted on.
    pub(super) fn refresh_application(&self, view: &ReceivedApplicationView, reply: &mut Reply) {
        reply.edit(
            render::received_application(view),
            OptionSet::ApplicationControls {
                application_id: view.application.id,
            },
        );
    }

    pub(super) fn delete_vacancy(
        &self,
        employer: ActorId,
        vacancy: VacancyId,
        reply: &mut Reply,
    ) -> Handled {
        let removed = self.lifecycle.delete_vacancy(employer, vacancy)?;
        reply.say(render::vacancy_deleted(
            &removed.vacancy,
            removed.applications.len(),
        ));
        Ok(())
    }

    pub(super) fn search_candidates(
        &self,
        session: &mut Session,
        term: &str,
        reply: &mut Reply,
    ) -> Handled {
        if term.is_empty() {
            reply.say(render::search_prompt(true));
            return Ok(());
        }
        session.pending = None;

        let results = self.lifecycle.search_candidates(term)?;
        if results.is_empty() {
            reply.say(render::search_empty(term));
            return Ok(());
        }
        reply.say(render::search_header(term, results.total));
        for resume in &results.shown {
            reply.say(render::candidate_entry(resume));
        }
        if results.is_truncated() {
            reply.say(render::search_truncated(results.total, results.shown.len()));
        }
        Ok(())
    }
}
