//! Client core for the SaludRural appointment system.
//!
//! # Overview
//! Wraps the remote JSON backend behind typed resource clients and, for the
//! resources the backend does not serve yet, persists records through an
//! injectable key-value store. Session state and auth guards live here too.
//!
//! # Design
//! - `Api` is the single transport wrapper; every remote call funnels
//!   through it and comes back normalized (server `detail` messages, 204
//!   handling, JSON bodies).
//! - I/O sits behind ports: `Transport` for HTTP, `KeyValueStore` for the
//!   two storage scopes, `Clock` for timestamps, `Navigator` for the guard
//!   redirects. Production impls are provided; tests inject their own.
//! - Appointments and schedule have a remote and a local adapter each,
//!   selected by `Config`, so moving a resource to the real backend is a
//!   configuration change.

pub mod api;
pub mod clients;
pub mod clock;
pub mod context;
pub mod error;
pub mod http;
pub mod session;
pub mod storage;
pub mod types;

pub use api::Api;
pub use clients::{
    AppointmentsClient, DoctorsClient, GlossaryClient, HistoryClient, ScheduleClient, UsersClient,
};
pub use clock::{Clock, SystemClock};
pub use context::{BackendKind, Config, Context, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use session::{Navigator, NullNavigator, SessionStore};
pub use storage::{KeyValueStore, MemoryStore};
pub use types::{
    Appointment, AppointmentStatus, Credentials, Doctor, GlossaryTerm, HistoryEntry,
    NewAppointment, NewHistoryEntry, NewUser, PasswordReset, Role, SessionUser, Slot, User,
    UserSummary,
};
