//! Mock-backed medical glossary. Search covers termino and definicion,
//! case-insensitively; an empty query matches all.

use crate::clients::matches;
use crate::error::ApiError;
use crate::types::GlossaryTerm;

#[derive(Clone, Default)]
pub struct GlossaryClient;

impl GlossaryClient {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> Result<Vec<GlossaryTerm>, ApiError> {
        Ok(sample_terms())
    }

    pub fn search(&self, query: &str) -> Result<Vec<GlossaryTerm>, ApiError> {
        let q = query.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|t| matches(&t.termino, &q) || matches(&t.definicion, &q))
            .collect())
    }
}

fn sample_terms() -> Vec<GlossaryTerm> {
    vec![
        GlossaryTerm {
            id: 1,
            termino: "Hipertensión".to_string(),
            definicion: "Elevación sostenida de la presión arterial.".to_string(),
            causas: "Genética, dieta alta en sal".to_string(),
            tratamientos: "Control de presión, dieta, medicación.".to_string(),
        },
        GlossaryTerm {
            id: 2,
            termino: "Gripe".to_string(),
            definicion: "Infección respiratoria viral.".to_string(),
            causas: "Virus Influenza".to_string(),
            tratamientos: "Reposo, líquidos, antipiréticos.".to_string(),
        },
        GlossaryTerm {
            id: 3,
            termino: "Diabetes".to_string(),
            definicion: "Afección caracterizada por glucosa elevada.".to_string(),
            causas: "Genética, obesidad".to_string(),
            tratamientos: "Control dietético, medicamentos.".to_string(),
        },
    ]
}
