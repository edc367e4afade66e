//! Clinical-history entries, stored per patient under `sr_historia_{id}`.
//!
//! Local-only: the backend has no historia endpoints. Entries get a
//! millisecond-timestamp id and the insertion calendar date, then the whole
//! collection is written back.

use std::sync::Arc;

use crate::clock::Clock;
use crate::error::ApiError;
use crate::storage::{history_key, read_collection, write_collection, KeyValueStore};
use crate::types::{HistoryEntry, NewHistoryEntry};

#[derive(Clone)]
pub struct HistoryClient {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl HistoryClient {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn for_patient(&self, patient_id: i64) -> Result<Vec<HistoryEntry>, ApiError> {
        Ok(read_collection(
            self.store.as_ref(),
            &history_key(patient_id),
        ))
    }

    pub fn add_entry(
        &self,
        patient_id: i64,
        input: &NewHistoryEntry,
    ) -> Result<HistoryEntry, ApiError> {
        let now = self.clock.now();
        let entry = HistoryEntry {
            id: now.timestamp_millis(),
            fecha: now.date_naive().to_string(),
            diagnostico: input.diagnostico.clone(),
            tratamiento: input.tratamiento.clone(),
            medico: input.medico.clone(),
            notas: input.notas.clone(),
        };
        let key = history_key(patient_id);
        let mut entries: Vec<HistoryEntry> = read_collection(self.store.as_ref(), &key);
        entries.push(entry.clone());
        write_collection(self.store.as_ref(), &key, &entries)?;
        Ok(entry)
    }
}
