use serde::Serialize;
use std::collections::BTreeMap;

/// Categoria di un errore di validazione
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Campo obbligatorio assente o vuoto
    MissingField,
    /// Valore presente ma nel formato sbagliato
    FormatMismatch,
    /// Formato corretto ma cifra di controllo della Partita IVA errata
    ChecksumFailure,
    /// Nessuna delle due alternative (SDI / PEC) è stata indicata
    PresenceConflict,
}

/// Esito della validazione di un singolo campo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            kind: None,
        }
    }

    pub fn invalid(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
            kind: Some(kind),
        }
    }

    pub fn missing(message: impl Into<String>) -> Self {
        Self::invalid(ErrorKind::MissingField, message)
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::invalid(ErrorKind::FormatMismatch, message)
    }
}

/// Errore di un campo, come restituito al client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub kind: ErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct FieldIssue {
    kind: ErrorKind,
    message: String,
}

/// Mappa campo -> errore prodotta dalle validazioni aggregate.
///
/// Un campo compare nella mappa se e solo se la sua validazione è fallita;
/// ogni campo porta al massimo un errore. Mappa vuota = dati validi.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: BTreeMap<String, FieldIssue>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un errore; un secondo errore sullo stesso campo sostituisce il primo
    pub fn insert(&mut self, field: impl Into<String>, kind: ErrorKind, message: impl Into<String>) {
        self.entries.insert(
            field.into(),
            FieldIssue {
                kind,
                message: message.into(),
            },
        );
    }

    /// Copia nella mappa l'esito di un validatore, se negativo
    pub fn record(&mut self, field: &str, result: ValidationResult) {
        if result.valid {
            return;
        }
        let kind = result.kind.unwrap_or(ErrorKind::FormatMismatch);
        self.insert(field, kind, result.error.unwrap_or_default());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(|issue| issue.message.as_str())
    }

    pub fn kind(&self, field: &str) -> Option<ErrorKind> {
        self.entries.get(field).map(|issue| issue.kind)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn into_field_errors(self) -> Vec<FieldError> {
        self.entries
            .into_iter()
            .map(|(field, issue)| FieldError::new(field, issue.kind, issue.message))
            .collect()
    }
}

/// Risposta di errore di validazione
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub success: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResponse {
    pub fn with_errors(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            errors,
        }
    }
}

impl From<ErrorMap> for ValidationResponse {
    fn from(map: ErrorMap) -> Self {
        Self::with_errors(map.into_field_errors())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ignores_valid_results() {
        let mut errors = ErrorMap::new();
        errors.record("cap", ValidationResult::ok());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_record_keeps_message_and_kind() {
        let mut errors = ErrorMap::new();
        errors.record("cap", ValidationResult::format("Il CAP deve contenere 5 cifre"));
        assert_eq!(errors.get("cap"), Some("Il CAP deve contenere 5 cifre"));
        assert_eq!(errors.kind("cap"), Some(ErrorKind::FormatMismatch));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validation_response_from_map() {
        let mut errors = ErrorMap::new();
        errors.insert("via", ErrorKind::MissingField, "L'indirizzo è obbligatorio");
        let response = ValidationResponse::from(errors);
        assert!(!response.success);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].field, "via");
    }

    #[test]
    fn test_valid_result_serializes_without_error() {
        let json = serde_json::to_value(ValidationResult::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "valid": true }));
    }
}
