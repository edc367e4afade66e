//! Doctor availability behind a schedule port.
//!
//! [`FixedSchedule`] serves the placeholder slot list; [`RemoteSchedule`]
//! asks the backend's `disponibilidad` endpoint.

use std::sync::Arc;

use crate::api::Api;
use crate::error::ApiError;
use crate::types::Slot;

pub trait SchedulePort: Send + Sync {
    fn availability(&self, doctor_id: i64) -> Result<Vec<Slot>, ApiError>;
}

#[derive(Clone)]
pub struct ScheduleClient {
    backend: Arc<dyn SchedulePort>,
}

impl ScheduleClient {
    pub fn new(backend: Arc<dyn SchedulePort>) -> Self {
        Self { backend }
    }

    pub fn availability(&self, doctor_id: i64) -> Result<Vec<Slot>, ApiError> {
        self.backend.availability(doctor_id)
    }
}

/// Placeholder slots; the same list for every doctor.
#[derive(Clone, Default)]
pub struct FixedSchedule;

impl SchedulePort for FixedSchedule {
    fn availability(&self, _doctor_id: i64) -> Result<Vec<Slot>, ApiError> {
        Ok(vec![
            slot("2025-10-17", "09:00", true),
            slot("2025-10-17", "10:00", true),
            slot("2025-10-17", "11:00", false),
            slot("2025-10-17", "14:00", true),
            slot("2025-10-18", "09:00", true),
            slot("2025-10-18", "15:00", true),
        ])
    }
}

fn slot(fecha: &str, hora: &str, disponible: bool) -> Slot {
    Slot {
        fecha: fecha.to_string(),
        hora: hora.to_string(),
        disponible,
        id_agenda: None,
    }
}

#[derive(Clone)]
pub struct RemoteSchedule {
    api: Api,
}

impl RemoteSchedule {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

impl SchedulePort for RemoteSchedule {
    fn availability(&self, doctor_id: i64) -> Result<Vec<Slot>, ApiError> {
        self.api.get(&format!("/citas/disponibilidad/{doctor_id}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_schedule_has_open_and_taken_slots() {
        let slots = FixedSchedule.availability(1).unwrap();
        assert_eq!(slots.len(), 6);
        assert!(slots.iter().any(|s| s.disponible));
        assert!(slots.iter().any(|s| !s.disponible));
    }

    #[test]
    fn client_delegates_to_its_backend() {
        let client = ScheduleClient::new(Arc::new(FixedSchedule));
        assert_eq!(client.availability(3).unwrap().len(), 6);
    }
}
