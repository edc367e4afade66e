//! Typed records for every resource the client touches.
//!
//! # Design
//! Field names match the backend's wire names one-to-one, so no rename
//! attributes are needed and schema drift shows up in integration tests.
//! Optional fields are `Option` and skipped on serialization; enums carry
//! the exact wire strings as variant names (`Programada`, `Paciente`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role carried by every user record; gates page access client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Paciente,
    Medico,
    Administrador,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Paciente => "Paciente",
            Role::Medico => "Medico",
            Role::Administrador => "Administrador",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logged-in user as returned by `POST /usuarios/login/` and cached in
/// the session store for the duration of a browsing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id_usuario: i64,
    pub nombre: String,
    pub apellidos: String,
    pub rol: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
}

/// Full user record as served by `GET /usuarios/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id_usuario: i64,
    pub nombre: String,
    pub apellidos: String,
    pub documento: String,
    pub correo: String,
    #[serde(default)]
    pub telefono: Option<String>,
    pub rol: Role,
}

/// Row shape returned by the user search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id_usuario: i64,
    pub nombre: String,
    pub apellidos: String,
    pub correo: String,
    pub rol: Role,
}

/// Payload for creating or updating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub nombre: String,
    pub apellidos: String,
    pub documento: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<NaiveDate>,
    pub correo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    pub contrasena: String,
    pub rol: Role,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub correo: String,
    pub contrasena: String,
}

/// Password-reset request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordReset {
    pub correo: String,
    pub nueva_contrasena: String,
}

/// Doctor profile. Served from a fixed dataset until the backend grows a
/// `medicos` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub id_usuario: i64,
    pub nombre: String,
    pub apellidos: String,
    pub especialidad: String,
    pub foto: String,
    pub rating: f64,
    pub descripcion: String,
    pub experiencia: String,
    pub licencia: String,
}

/// Appointment lifecycle. Canceling flips the status; records are never
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Programada,
    Cancelada,
}

/// An appointment record. The local backend stores these whole; the remote
/// backend additionally joins in the counterpart's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(alias = "id_cita")]
    pub id: i64,
    pub id_paciente: i64,
    pub id_medico: i64,
    pub fecha: String,
    pub hora: String,
    pub estado: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medico_nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paciente_nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
}

/// Payload for booking an appointment.
///
/// `id_agenda` names the schedule slot being booked; only the remote backend
/// requires it, the local one books straight from fecha/hora.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub id_paciente: i64,
    pub id_medico: i64,
    pub fecha: String,
    pub hora: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_agenda: Option<i64>,
}

/// One availability slot in a doctor's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub fecha: String,
    pub hora: String,
    pub disponible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_agenda: Option<i64>,
}

/// One clinical-history entry for a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    /// Calendar date (`YYYY-MM-DD`) assigned at insertion.
    pub fecha: String,
    pub diagnostico: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tratamiento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medico: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}

/// Payload for appending a clinical-history entry; id and date are assigned
/// on insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHistoryEntry {
    pub diagnostico: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tratamiento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medico: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}

/// Medical-glossary term served from a fixed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub id: i64,
    pub termino: String,
    pub definicion: String,
    pub causas: String,
    pub tratamientos: String,
}
