//! Resource clients, one per backend resource.
//!
//! Remote-backed clients forward to the transport wrapper with literal paths
//! and verbs; mock-backed ones serve fixed datasets or read-modify-write a
//! stored collection. Appointments and schedule carry both behaviors behind
//! a port, selected by configuration.

pub mod appointments;
pub mod doctors;
pub mod glossary;
pub mod history;
pub mod schedule;
pub mod users;

pub use appointments::{AppointmentStore, AppointmentsClient, LocalAppointments, RemoteAppointments};
pub use doctors::DoctorsClient;
pub use glossary::GlossaryClient;
pub use history::HistoryClient;
pub use schedule::{FixedSchedule, RemoteSchedule, ScheduleClient, SchedulePort};
pub use users::UsersClient;

/// Case-insensitive substring match; an empty needle matches everything.
pub(crate) fn matches(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
