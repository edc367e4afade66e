//! Wiring: configuration, backend selection, and the context object every
//! client hangs off.
//!
//! # Design
//! The context replaces global session/storage state with explicit handles:
//! one transport, two storage scopes (session and local, mirroring the two
//! browser scopes), a clock and a navigator. Which adapter serves
//! appointments and schedule is a configuration decision, not a per-method
//! branch.

use std::sync::Arc;

use crate::api::Api;
use crate::clients::{
    AppointmentsClient, DoctorsClient, FixedSchedule, GlossaryClient, HistoryClient,
    LocalAppointments, RemoteAppointments, RemoteSchedule, ScheduleClient, UsersClient,
};
use crate::clock::{Clock, SystemClock};
use crate::http::{Transport, UreqTransport};
use crate::session::{Navigator, NullNavigator, SessionStore};
use crate::storage::{KeyValueStore, MemoryStore};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Which adapter serves a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Remote,
    Local,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub appointments: BackendKind,
    pub schedule: BackendKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            appointments: BackendKind::Local,
            schedule: BackendKind::Local,
        }
    }
}

/// Everything a resource client needs, bundled and clonable.
#[derive(Clone)]
pub struct Context {
    config: Config,
    api: Api,
    session_store: Arc<dyn KeyValueStore>,
    local_store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    navigator: Arc<dyn Navigator>,
}

impl Context {
    pub fn new(
        config: Config,
        transport: Arc<dyn Transport>,
        session_store: Arc<dyn KeyValueStore>,
        local_store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let api = Api::new(&config.base_url, transport);
        Self {
            config,
            api,
            session_store,
            local_store,
            clock,
            navigator,
        }
    }

    /// Production wiring: ureq transport, in-process stores, wall clock,
    /// no-op navigator.
    pub fn with_defaults(config: Config) -> Self {
        Self::new(
            config,
            Arc::new(UreqTransport::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(SystemClock),
            Arc::new(NullNavigator),
        )
    }

    /// Test wiring: a fresh memory store for each scope; transport, clock
    /// and navigator are supplied by the caller.
    pub fn in_memory(
        config: Config,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::new(
            config,
            transport,
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            clock,
            navigator,
        )
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn session(&self) -> SessionStore {
        SessionStore::new(self.session_store.clone(), self.navigator.clone())
    }

    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.api.clone(), self.session())
    }

    pub fn doctors(&self) -> DoctorsClient {
        DoctorsClient::new()
    }

    pub fn appointments(&self) -> AppointmentsClient {
        match self.config.appointments {
            BackendKind::Remote => {
                AppointmentsClient::new(Arc::new(RemoteAppointments::new(self.api.clone())))
            }
            BackendKind::Local => AppointmentsClient::new(Arc::new(LocalAppointments::new(
                self.local_store.clone(),
                self.clock.clone(),
            ))),
        }
    }

    pub fn schedule(&self) -> ScheduleClient {
        match self.config.schedule {
            BackendKind::Remote => {
                ScheduleClient::new(Arc::new(RemoteSchedule::new(self.api.clone())))
            }
            BackendKind::Local => ScheduleClient::new(Arc::new(FixedSchedule)),
        }
    }

    pub fn history(&self) -> HistoryClient {
        HistoryClient::new(self.local_store.clone(), self.clock.clone())
    }

    pub fn glossary(&self) -> GlossaryClient {
        GlossaryClient::new()
    }
}
