//! Chat-driven job board: dialogue flows, application lifecycle and browsing,
//! behind an [`EntityStore`] and a [`Notifier`] port.

pub mod browse;
pub mod dialogue;
pub mod dispatch;
pub mod domain;
pub mod effect;
pub mod lifecycle;
pub mod memory;
pub mod notify;
pub mod render;
pub mod router;
pub mod seed;
pub mod store;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;

pub use dispatch::{ButtonEvent, Dispatcher, InboundEvent, TextEvent};
pub use domain::{
    Account, ActorId, Application, ApplicationId, ApplicationStatus, Resume, ResumeField, Role,
    Vacancy, VacancyId,
};
pub use effect::{Effect, OptionSet};
pub use lifecycle::{
    ActorProfile, BoardSettings, LifecycleError, LifecycleManager, SAMPLE_EMPLOYER_ID,
};
pub use memory::InMemoryEntityStore;
pub use notify::{Notification, Notifier, NotifyError};
pub use router::board_router;
pub use seed::{seed, SeedError, SeedPlan, SeedReport};
pub use store::{EntityStore, StoreError};
