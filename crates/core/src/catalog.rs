//! Enumerated choices stored as short codes.
//!
//! Every catalog is a static slice of `(code, label)` pairs. Columns store the
//! code; reports and the `/catalogs` endpoint show the label. Validation
//! helpers return a field-tagged [`CoreError`] naming the accepted codes.

use serde::Serialize;

use crate::error::CoreError;

/// A `(code, label)` pair.
pub type Choice = (&'static str, &'static str);

/// Course unit track (trayecto).
pub const TRACKS: &[(i16, &str)] = &[
    (0, "Inicial"),
    (1, "1"),
    (2, "2"),
    (3, "3"),
    (4, "4"),
];

/// Course unit semester.
pub const SEMESTERS: &[Choice] = &[("NA", "No Aplica"), ("1", "1"), ("2", "2")];

/// Campus (núcleo) where a learning plan is taught.
pub const CAMPUSES: &[Choice] = &[
    ("FLO", "La Floresta"),
    ("URB", "La Urbina"),
    ("ALT", "Altagracia"),
    ("CRY", "Carayaca"),
];

/// Shift (turno).
pub const SHIFTS: &[Choice] = &[("N", "Nocturno"), ("V", "Vespertino"), ("M", "Mañana")];

pub const DEFAULT_STRATEGY: &str = "CL";

/// Didactic strategies for learning objectives.
pub const STRATEGIES: &[Choice] = &[
    ("CL", "Clase magistral"),
    ("TR", "Trabajo en grupo"),
    ("DE", "Debate"),
    ("EP", "Estudio de caso"),
    ("AP", "Aprendizaje basado en problemas"),
    ("PY", "Proyecto"),
    ("TA", "Taller"),
    ("LB", "Laboratorio"),
    ("EX", "Exposición"),
    ("SE", "Seminario"),
    ("TI", "Tutoría individual"),
    ("TC", "Tutoría colectiva"),
    ("VA", "Visita guiada"),
    ("PC", "Práctica de campo"),
    ("EV", "Evaluación"),
    ("OT", "Otras"),
];

pub const DEFAULT_INSTRUMENT: &str = "PR";

/// Evaluation instruments. Codes are unique; oral exposition uses `EO`
/// so it does not collide with the practical exam.
pub const INSTRUMENTS: &[Choice] = &[
    ("PR", "Prueba escrita (objetiva)"),
    ("PE", "Prueba escrita (ensayo)"),
    ("PO", "Prueba oral"),
    ("TR", "Trabajo escrito"),
    ("TA", "Tarea"),
    ("EX", "Examen práctico"),
    ("PY", "Proyecto"),
    ("IN", "Informe"),
    ("PC", "Participación en clase"),
    ("AC", "Actividades colaborativas"),
    ("DE", "Debate"),
    ("EO", "Exposición oral"),
    ("SE", "Seminario"),
    ("CT", "Control de lectura"),
    ("CV", "Cuestionario"),
    ("DI", "Diario reflexivo"),
    ("CA", "Carpeta de trabajos"),
    ("AU", "Autoevaluación"),
    ("CO", "Coevaluación"),
    ("OT", "Otras"),
];

pub const DEFAULT_EVALUATION_TYPE: &str = "FO";

/// Evaluation types.
pub const EVALUATION_TYPES: &[Choice] = &[
    ("DI", "Diagnóstica"),
    ("FO", "Formativa"),
    ("SU", "Sumativa"),
    ("AU", "Autoevaluación"),
    ("CO", "Coevaluación"),
];

/// Label for a code, or an empty string when the code is unknown.
pub fn label(choices: &[Choice], code: &str) -> &'static str {
    choices
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, l)| *l)
        .unwrap_or("")
}

/// Label for a course unit track.
pub fn track_label(track: i16) -> &'static str {
    TRACKS
        .iter()
        .find(|(t, _)| *t == track)
        .map(|(_, l)| *l)
        .unwrap_or("")
}

/// Validate that `code` belongs to `choices`.
pub fn validate_choice(field: &'static str, choices: &[Choice], code: &str) -> Result<(), CoreError> {
    if choices.iter().any(|(c, _)| *c == code) {
        return Ok(());
    }
    let accepted: Vec<&str> = choices.iter().map(|(c, _)| *c).collect();
    Err(CoreError::invalid(
        field,
        format!("Valor inválido '{code}'. Debe ser uno de: {}.", accepted.join(", ")),
    ))
}

/// Validate a course unit track.
pub fn validate_track(track: i16) -> Result<(), CoreError> {
    if TRACKS.iter().any(|(t, _)| *t == track) {
        Ok(())
    } else {
        Err(CoreError::invalid(
            "track",
            format!("Trayecto inválido: {track}. Debe estar entre 0 y 4."),
        ))
    }
}

/// One catalog entry as exposed over HTTP.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub code: String,
    pub label: &'static str,
}

/// Every catalog in one payload, for form builders on the client.
#[derive(Debug, Clone, Serialize)]
pub struct Catalogs {
    pub tracks: Vec<CatalogEntry>,
    pub semesters: Vec<CatalogEntry>,
    pub campuses: Vec<CatalogEntry>,
    pub shifts: Vec<CatalogEntry>,
    pub strategies: Vec<CatalogEntry>,
    pub instruments: Vec<CatalogEntry>,
    pub evaluation_types: Vec<CatalogEntry>,
    pub weights: Vec<i16>,
}

fn entries(choices: &[Choice]) -> Vec<CatalogEntry> {
    choices
        .iter()
        .map(|(code, label)| CatalogEntry {
            code: (*code).to_string(),
            label: *label,
        })
        .collect()
}

impl Catalogs {
    pub fn all() -> Self {
        Self {
            tracks: TRACKS
                .iter()
                .map(|(t, label)| CatalogEntry {
                    code: t.to_string(),
                    label: *label,
                })
                .collect(),
            semesters: entries(SEMESTERS),
            campuses: entries(CAMPUSES),
            shifts: entries(SHIFTS),
            strategies: entries(STRATEGIES),
            instruments: entries(INSTRUMENTS),
            evaluation_types: entries(EVALUATION_TYPES),
            weights: crate::weights::WEIGHT_OPTIONS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_are_unique_per_catalog() {
        for catalog in [SEMESTERS, CAMPUSES, SHIFTS, STRATEGIES, INSTRUMENTS, EVALUATION_TYPES] {
            let codes: HashSet<_> = catalog.iter().map(|(c, _)| c).collect();
            assert_eq!(codes.len(), catalog.len());
        }
    }

    #[test]
    fn defaults_are_valid_codes() {
        assert!(validate_choice("strategy", STRATEGIES, DEFAULT_STRATEGY).is_ok());
        assert!(validate_choice("instrument", INSTRUMENTS, DEFAULT_INSTRUMENT).is_ok());
        assert!(validate_choice("evaluation_type", EVALUATION_TYPES, DEFAULT_EVALUATION_TYPE).is_ok());
    }

    #[test]
    fn unknown_code_lists_accepted_values() {
        let err = validate_choice("shift", SHIFTS, "X").unwrap_err();
        assert!(err.to_string().contains("N, V, M"));
    }

    #[test]
    fn labels() {
        assert_eq!(label(CAMPUSES, "ALT"), "Altagracia");
        assert_eq!(label(SHIFTS, "M"), "Mañana");
        assert_eq!(label(SHIFTS, "?"), "");
        assert_eq!(track_label(0), "Inicial");
    }

    #[test]
    fn track_bounds() {
        assert!(validate_track(0).is_ok());
        assert!(validate_track(4).is_ok());
        assert!(validate_track(5).is_err());
    }

    #[test]
    fn catalogs_serialize_with_codes_and_labels() {
        let json = serde_json::to_value(Catalogs::all()).unwrap();
        assert_eq!(json["campuses"][0]["code"], "FLO");
        assert_eq!(json["campuses"][0]["label"], "La Floresta");
        assert_eq!(json["weights"], serde_json::json!([5, 10, 15, 20, 25]));
    }
}
