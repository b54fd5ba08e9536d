use super::session::{PendingInput, Session};
use super::{Dispatcher, Handled, Reply};
use crate::board::browse::{Cursor, Direction};
use crate::board::domain::{ActorId, Vacancy, VacancyId};
use crate::board::effect::OptionSet;
use crate::board::notify::Notifier;
use crate::board::render;
use crate::board::store::EntityStore;

const NO_VACANCIES: &str = "There are no active vacancies right now.";
const NO_RESUME: &str = "Resume not found. Create a resume first.";

impl<S, N> Dispatcher<S, N>
where
    S: EntityStore + 'static,
    N: Notifier + 'static,
{
    fn show_page(&self, cursor: &Cursor<Vacancy>, edit: bool, reply: &mut Reply) {
        let vacancy = cursor.current();
        let (position, total) = (cursor.position(), cursor.total());
        let text =
            render::vacancy_page(vacancy, self.lifecycle.is_sample(vacancy), position, total);
        let options = OptionSet::VacancyCard {
            vacancy_id: vacancy.id,
            navigation: total > 1,
            position,
            total,
        };
        if edit {
            reply.edit(text, options);
        } else {
            reply.prompt(text, options);
        }
    }

    pub(super) fn list_vacancies(&self, session: &mut Session, reply: &mut Reply) -> Handled {
        let vacancies = self.lifecycle.active_vacancies()?;
        session.cursor = Cursor::open(vacancies);
        match &session.cursor {
            Some(cursor) => {
                reply.say("Vacancies:");
                self.show_page(cursor, false, reply);
            }
            None => reply.say(NO_VACANCIES),
        }
        Ok(())
    }

    pub(super) fn navigate(
        &self,
        session: &mut Session,
        direction: Direction,
        reply: &mut Reply,
    ) -> Handled {
        match session.cursor.as_mut() {
            Some(cursor) => {
                cursor.advance(direction);
                self.show_page(cursor, true, reply);
            }
            None => reply.say(NO_VACANCIES),
        }
        Ok(())
    }

    pub(super) fn search_vacancies(
        &self,
        session: &mut Session,
        term: &str,
        reply: &mut Reply,
    ) -> Handled {
        if term.is_empty() {
            reply.say(render::search_prompt(false));
            return Ok(());
        }
        session.pending = None;

        let results = self.lifecycle.search_vacancies(term)?;
        if results.is_empty() {
            reply.say(render::search_empty(term));
            return Ok(());
        }
        reply.say(render::search_header(term, results.total));
        for vacancy in &results.shown {
            reply.prompt(
                render::search_vacancy_entry(vacancy, self.lifecycle.is_sample(vacancy)),
                OptionSet::ApplyOnly {
                    vacancy_id: vacancy.id,
                },
            );
        }
        if results.is_truncated() {
            reply.say(render::search_truncated(results.total, results.shown.len()));
        }
        Ok(())
    }

    pub(super) fn apply(&self, seeker: ActorId, vacancy: VacancyId, reply: &mut Reply) -> Handled {
        let submission = self.lifecycle.submit_application(seeker, vacancy)?;
        reply.say(render::application_submitted(&submission.vacancy));
        Ok(())
    }

    pub(super) fn seeker_applications(&self, seeker: ActorId, reply: &mut Reply) -> Handled {
        let views = self.lifecycle.seeker_applications(seeker)?;
        if views.is_empty() {
            reply.say("You have not applied anywhere yet.\n\nBrowse the vacancies and apply to the ones you like!");
            return Ok(());
        }
        reply.say(format!("Your applications ({}):", views.len()));
        for view in &views {
            reply.say(render::seeker_application(view));
        }
        Ok(())
    }

    pub(super) fn resume_menu(&self, seeker: ActorId, reply: &mut Reply) -> Handled {
        let has_resume = self.lifecycle.find_resume(seeker)?.is_some();
        reply.prompt(
            render::resume_menu(has_resume),
            OptionSet::ResumeMenu { has_resume },
        );
        Ok(())
    }

    pub(super) fn view_resume(&self, seeker: ActorId, reply: &mut Reply) -> Handled {
        match self.lifecycle.find_resume(seeker)? {
            Some(resume) => reply.prompt(
                render::resume_card(&resume),
                OptionSet::ResumeMenu { has_resume: true },
            ),
            None => reply.say(NO_RESUME),
        }
        Ok(())
    }

    /// Deletes right away when nothing is linked to the resume; otherwise asks
    /// for confirmation first.
    pub(super) fn request_resume_deletion(
        &self,
        session: &mut Session,
        seeker: ActorId,
        reply: &mut Reply,
    ) -> Handled {
        if self.lifecycle.find_resume(seeker)?.is_none() {
            reply.say("Resume not found.");
            return Ok(());
        }
        let linked = self.lifecycle.linked_applications(seeker)?;
        if linked > 0 {
            session.pending = Some(PendingInput::ResumeDeletion);
            reply.prompt(
                render::resume_deletion_warning(linked),
                OptionSet::DeletionConfirm,
            );
            return Ok(());
        }
        self.delete_resume(seeker, reply)
    }

    pub(super) fn delete_resume(&self, seeker: ActorId, reply: &mut Reply) -> Handled {
        let removed = self.lifecycle.delete_resume(seeker)?;
        reply.say(render::resume_deleted(removed.applications.len()));
        reply.prompt(render::choose_action(), OptionSet::SeekerMenu);
        Ok(())
    }
}
