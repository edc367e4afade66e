//! Mock-backed doctor directory.
//!
//! The backend has no `medicos` endpoint yet, so the client serves a fixed
//! dataset. Search is a case-insensitive substring match over nombre,
//! apellidos, especialidad and descripcion; an empty query matches all.

use crate::clients::matches;
use crate::error::ApiError;
use crate::types::Doctor;

#[derive(Clone, Default)]
pub struct DoctorsClient;

impl DoctorsClient {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> Result<Vec<Doctor>, ApiError> {
        Ok(sample_doctors())
    }

    pub fn get(&self, id: i64) -> Result<Doctor, ApiError> {
        self.list()?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or(ApiError::NotFound)
    }

    pub fn search(&self, query: &str) -> Result<Vec<Doctor>, ApiError> {
        let q = query.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|d| {
                matches(&d.nombre, &q)
                    || matches(&d.apellidos, &q)
                    || matches(&d.especialidad, &q)
                    || matches(&d.descripcion, &q)
            })
            .collect())
    }
}

fn sample_doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: 1,
            id_usuario: 1,
            nombre: "Dra. Ana Pérez".to_string(),
            apellidos: "Pérez González".to_string(),
            especialidad: "Pediatría".to_string(),
            foto: "/assets/img/med1.svg".to_string(),
            rating: 4.8,
            descripcion: "Pediatra con 10 años de experiencia en zonas rurales.".to_string(),
            experiencia: "10 años".to_string(),
            licencia: "LIC-12345".to_string(),
        },
        Doctor {
            id: 2,
            id_usuario: 2,
            nombre: "Dr. Juan Gómez".to_string(),
            apellidos: "Gómez Martínez".to_string(),
            especialidad: "Cardiología".to_string(),
            foto: "/assets/img/med2.svg".to_string(),
            rating: 4.6,
            descripcion: "Cardiólogo especializado en seguimiento preventivo.".to_string(),
            experiencia: "15 años".to_string(),
            licencia: "LIC-67890".to_string(),
        },
        Doctor {
            id: 3,
            id_usuario: 3,
            nombre: "Dra. Carla Ruiz".to_string(),
            apellidos: "Ruiz López".to_string(),
            especialidad: "Medicina General".to_string(),
            foto: "/assets/img/med3.svg".to_string(),
            rating: 4.7,
            descripcion: "Enfoque en medicina familiar y preventiva.".to_string(),
            experiencia: "8 años".to_string(),
            licencia: "LIC-11223".to_string(),
        },
    ]
}
