//! Appointment operations behind a storage port.
//!
//! # Design
//! `AppointmentStore` has two adapters, selected by configuration rather
//! than branching per method:
//! - [`LocalAppointments`] keeps the whole collection under `sr_citas` and
//!   rewrites it on every mutation. Creates take a millisecond-timestamp id
//!   (not guaranteed unique across concurrent writers; accepted, since the
//!   local backend assumes a single writer). Cancel flips the status field;
//!   records are never deleted.
//! - [`RemoteAppointments`] talks to the backend's `citas` endpoints. The
//!   backend books by schedule slot, so `id_agenda` is required there.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::Api;
use crate::clock::Clock;
use crate::error::ApiError;
use crate::storage::{read_collection, write_collection, KeyValueStore, APPOINTMENTS_KEY};
use crate::types::{Appointment, AppointmentStatus, NewAppointment};

/// Storage port for appointment records.
pub trait AppointmentStore: Send + Sync {
    fn create(&self, input: &NewAppointment) -> Result<Appointment, ApiError>;
    fn for_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, ApiError>;
    fn for_doctor(&self, doctor_id: i64) -> Result<Vec<Appointment>, ApiError>;
    fn cancel(&self, id: i64) -> Result<(), ApiError>;
    fn list_all(&self) -> Result<Vec<Appointment>, ApiError>;
}

/// Facade handed to callers; delegates to whichever adapter the config
/// selected.
#[derive(Clone)]
pub struct AppointmentsClient {
    backend: Arc<dyn AppointmentStore>,
}

impl AppointmentsClient {
    pub fn new(backend: Arc<dyn AppointmentStore>) -> Self {
        Self { backend }
    }

    pub fn create(&self, input: &NewAppointment) -> Result<Appointment, ApiError> {
        self.backend.create(input)
    }

    pub fn for_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, ApiError> {
        self.backend.for_patient(patient_id)
    }

    pub fn for_doctor(&self, doctor_id: i64) -> Result<Vec<Appointment>, ApiError> {
        self.backend.for_doctor(doctor_id)
    }

    pub fn cancel(&self, id: i64) -> Result<(), ApiError> {
        self.backend.cancel(id)
    }

    pub fn list_all(&self) -> Result<Vec<Appointment>, ApiError> {
        self.backend.list_all()
    }
}

/// Adapter over the local key-value store.
pub struct LocalAppointments {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl LocalAppointments {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn read(&self) -> Vec<Appointment> {
        read_collection(self.store.as_ref(), APPOINTMENTS_KEY)
    }

    fn write(&self, citas: &[Appointment]) -> Result<(), ApiError> {
        write_collection(self.store.as_ref(), APPOINTMENTS_KEY, citas)
    }
}

impl AppointmentStore for LocalAppointments {
    fn create(&self, input: &NewAppointment) -> Result<Appointment, ApiError> {
        let now = self.clock.now();
        let cita = Appointment {
            id: now.timestamp_millis(),
            id_paciente: input.id_paciente,
            id_medico: input.id_medico,
            fecha: input.fecha.clone(),
            hora: input.hora.clone(),
            estado: AppointmentStatus::Programada,
            medico_nombre: None,
            paciente_nombre: None,
            fecha_creacion: Some(now.to_rfc3339()),
        };
        let mut citas = self.read();
        citas.push(cita.clone());
        self.write(&citas)?;
        Ok(cita)
    }

    fn for_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, ApiError> {
        Ok(self
            .read()
            .into_iter()
            .filter(|c| c.id_paciente == patient_id)
            .collect())
    }

    fn for_doctor(&self, doctor_id: i64) -> Result<Vec<Appointment>, ApiError> {
        Ok(self
            .read()
            .into_iter()
            .filter(|c| c.id_medico == doctor_id)
            .collect())
    }

    fn cancel(&self, id: i64) -> Result<(), ApiError> {
        let mut citas = self.read();
        let cita = citas
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ApiError::NotFound)?;
        cita.estado = AppointmentStatus::Cancelada;
        self.write(&citas)
    }

    fn list_all(&self) -> Result<Vec<Appointment>, ApiError> {
        Ok(self.read())
    }
}

/// Booking body the backend expects: patient plus the schedule slot.
#[derive(Debug, Serialize)]
struct CreateCita {
    id_paciente: i64,
    id_agenda: i64,
    estado: AppointmentStatus,
}

/// `201` body of `POST /citas/`.
#[derive(Debug, Deserialize)]
struct CreatedCita {
    id_cita: i64,
    #[allow(dead_code)]
    mensaje: String,
}

/// Adapter over the backend's `citas` endpoints.
#[derive(Clone)]
pub struct RemoteAppointments {
    api: Api,
}

impl RemoteAppointments {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

impl AppointmentStore for RemoteAppointments {
    fn create(&self, input: &NewAppointment) -> Result<Appointment, ApiError> {
        let id_agenda = input.id_agenda.ok_or_else(|| {
            ApiError::Validation("id_agenda is required to book remotely".to_string())
        })?;
        let body = CreateCita {
            id_paciente: input.id_paciente,
            id_agenda,
            estado: AppointmentStatus::Programada,
        };
        let created: CreatedCita = self.api.post("/citas/", &body)?;
        // The backend derives doctor, fecha and hora from the booked slot,
        // so read the record back rather than echoing the caller's fields.
        self.for_patient(input.id_paciente)?
            .into_iter()
            .find(|c| c.id == created.id_cita)
            .ok_or(ApiError::NotFound)
    }

    fn for_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, ApiError> {
        self.api.get(&format!("/citas/paciente/{patient_id}/"))
    }

    fn for_doctor(&self, doctor_id: i64) -> Result<Vec<Appointment>, ApiError> {
        self.api.get(&format!("/citas/medico/{doctor_id}/"))
    }

    fn cancel(&self, id: i64) -> Result<(), ApiError> {
        let _: serde_json::Value = self.api.post(&format!("/citas/{id}/cancelar/"), &())?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Appointment>, ApiError> {
        self.api.get("/citas/")
    }
}
