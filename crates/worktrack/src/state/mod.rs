//! Client-visible state, one container per concern.
//!
//! Containers load from the durable layer and apply every mutation
//! optimistically through [`Optimistic`].

mod absences;
mod calendar;
mod optimistic;
mod settings;
mod todos;

pub use absences::AbsenceState;
pub use calendar::{CalendarState, DayMap};
pub use optimistic::Optimistic;
pub use settings::SettingsState;
pub use todos::TodoState;
