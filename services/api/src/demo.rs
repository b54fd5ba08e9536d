use crate::infra::OutboxNotifier;
use clap::Args;
use job_board::board::{
    seed, ActorId, Dispatcher, Effect, InMemoryEntityStore, InboundEvent, OptionSet, SeedPlan,
    SAMPLE_EMPLOYER_ID,
};
use job_board::board::{BoardSettings, LifecycleError};
use job_board::error::AppError;
use std::sync::Arc;

const EMPLOYER: ActorId = ActorId(1001);
const SEEKER: ActorId = ActorId(2002);

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Leave the built-in sample vacancies out of the board.
    #[arg(long)]
    pub(crate) skip_samples: bool,
    /// Print each effect as JSON instead of plain text.
    #[arg(long)]
    pub(crate) json: bool,
}

struct Session {
    dispatcher: Dispatcher<InMemoryEntityStore, OutboxNotifier>,
    outbox: Arc<OutboxNotifier>,
    json: bool,
}

impl Session {
    fn actor_label(actor: ActorId) -> &'static str {
        if actor == EMPLOYER {
            "employer"
        } else {
            "seeker"
        }
    }

    fn send(&self, event: InboundEvent, shown: &str) -> Vec<Effect> {
        let actor = event.session_id();
        println!("\n> {} {}: {}", Self::actor_label(actor), actor, shown);
        let effects = self.dispatcher.handle(event);
        for effect in &effects {
            self.print_effect(effect);
        }
        for other in [EMPLOYER, SEEKER] {
            for notification in self.outbox.drain(other) {
                println!(
                    "  [notify {} {}] {}",
                    Self::actor_label(other),
                    other,
                    indent(&notification.text)
                );
            }
        }
        effects
    }

    fn text(&self, actor: ActorId, name: &str, text: &str) -> Vec<Effect> {
        self.send(InboundEvent::text(actor, text).with_name(name), text)
    }

    fn button(&self, actor: ActorId, callback: &str) -> Vec<Effect> {
        self.send(
            InboundEvent::button(actor, callback),
            &format!("[button {callback}]"),
        )
    }

    fn script(&self, actor: ActorId, name: &str, inputs: &[&str]) {
        for input in inputs {
            self.text(actor, name, input);
        }
    }

    fn print_effect(&self, effect: &Effect) {
        if self.json {
            match serde_json::to_string(effect) {
                Ok(json) => println!("  {json}"),
                Err(err) => println!("  effect unavailable: {err}"),
            }
            return;
        }
        let verb = match effect {
            Effect::Prompt { .. } => "say",
            Effect::EditLastMessage { .. } => "edit",
        };
        println!("  [{verb}] {}", indent(effect.text()));
        if effect.options() != &OptionSet::None {
            println!("         options: {:?}", effect.options());
        }
    }
}

fn indent(text: &str) -> String {
    text.replace('\n', "\n         ")
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryEntityStore::new());
    let outbox = Arc::new(OutboxNotifier::new(100));
    let report = seed(
        store.as_ref(),
        &SeedPlan {
            samples: !args.skip_samples,
            csv: None,
        },
        SAMPLE_EMPLOYER_ID,
    )?;

    println!("Job board demo");
    println!("- {} sample vacancies loaded", report.inserted);

    let session = Session {
        dispatcher: Dispatcher::new(
            Arc::clone(&store),
            Arc::clone(&outbox),
            BoardSettings::default(),
        ),
        outbox,
        json: args.json,
    };

    println!("\nEmployer registers and publishes a vacancy");
    session.script(
        EMPLOYER,
        "Olena Koval",
        &[
            "/start",
            "post_jobs",
            "add_vacancy",
            "Olena Koval",
            "+380671112233",
            "olena@ferrous.ua",
            "yes",
            "add_vacancy",
            "Rust developer",
            "Ferrous",
            "3000$",
            "Backend services in Rust",
            "2+ years of Rust, async",
            "yes",
        ],
    );

    let vacancy = match session
        .dispatcher
        .lifecycle()
        .employer_vacancies(EMPLOYER)
        .map(|views| views.into_iter().next())
    {
        Ok(Some(view)) => view.vacancy,
        Ok(None) => {
            println!("  The vacancy was not published; stopping.");
            return Ok(());
        }
        Err(err) => {
            println!("  Vacancy lookup failed: {err}");
            return Ok(());
        }
    };

    println!("\nSeeker registers, writes a resume and browses");
    session.script(
        SEEKER,
        "Ivan Petrenko",
        &[
            "/start",
            "find_jobs",
            "contacts",
            "Ivan Petrenko",
            "0501234567",
            "ivan@gmail.com",
            "yes",
            "create_resume",
            "Rust developer",
            "2500$",
            "3 years of backend work",
            "KPI, computer science",
            "Rust, Tokio, PostgreSQL",
            "Open source contributor",
            "yes",
            "list_vacancies",
        ],
    );
    session.button(SEEKER, "next_vacancy");
    session.text(SEEKER, "Ivan Petrenko", "search_vacancies");
    session.text(SEEKER, "Ivan Petrenko", "rust");

    println!("\nSeeker applies; the employer is notified");
    session.button(SEEKER, &format!("apply_{}", vacancy.id));
    session.button(SEEKER, &format!("apply_{}", vacancy.id));

    println!("\nEmployer reviews and rejects");
    let application_id = session
        .text(EMPLOYER, "Olena Koval", "incoming_applications")
        .iter()
        .find_map(|effect| match effect.options() {
            OptionSet::ApplicationControls { application_id } => Some(*application_id),
            _ => None,
        });
    let Some(application_id) = application_id else {
        println!("  No application to review.");
        return Ok(());
    };
    session.button(EMPLOYER, &format!("viewed_{application_id}"));
    session.button(EMPLOYER, &format!("reject_{application_id}"));

    println!("\nSeeker checks the outcome");
    session.text(SEEKER, "Ivan Petrenko", "my_applications");

    match session.dispatcher.lifecycle().search_candidates("tokio") {
        Ok(results) => println!(
            "\nCandidate search for 'tokio': {} of {} shown",
            results.shown.len(),
            results.total
        ),
        Err(LifecycleError::Store(err)) => println!("\nCandidate search unavailable: {err}"),
        Err(err) => println!("\nCandidate search refused: {err}"),
    }

    Ok(())
}
