use serde::{Deserialize, Serialize};

use super::error::{ErrorKind, ErrorMap};
use crate::fiscale::{sanitize_text, strip_html_tags, validate_email, validate_telefono};

/// Lunghezza minima del messaggio, tag HTML esclusi
const MESSAGGIO_MIN_LEN: usize = 10;

/// Richiesta inviata dal modulo contatti
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ContactForm {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub azienda: Option<String>,
    #[serde(default)]
    pub messaggio: String,
}

impl ContactForm {
    /// Valida il modulo contatti e restituisce gli errori per campo
    pub fn validate(&self, max_message_len: usize) -> ErrorMap {
        let mut errors = ErrorMap::new();

        match self.nome.trim().chars().count() {
            0 => errors.insert("nome", ErrorKind::MissingField, "Il nome è obbligatorio"),
            1 => errors.insert(
                "nome",
                ErrorKind::FormatMismatch,
                "Il nome deve contenere almeno 2 caratteri",
            ),
            _ => {}
        }

        errors.record("email", validate_email(&self.email));

        if let Some(telefono) = self.telefono.as_deref().filter(|t| !t.trim().is_empty()) {
            errors.record("telefono", validate_telefono(telefono));
        }

        // Il limite massimo vale sul testo grezzo, tag compresi
        let raw_len = self.messaggio.chars().count();
        let len = strip_html_tags(&self.messaggio).trim().chars().count();
        if raw_len > max_message_len {
            errors.insert(
                "messaggio",
                ErrorKind::FormatMismatch,
                format!("Il messaggio non può superare {max_message_len} caratteri"),
            );
        } else if len == 0 {
            errors.insert("messaggio", ErrorKind::MissingField, "Il messaggio è obbligatorio");
        } else if len < MESSAGGIO_MIN_LEN {
            errors.insert(
                "messaggio",
                ErrorKind::FormatMismatch,
                format!("Il messaggio deve contenere almeno {MESSAGGIO_MIN_LEN} caratteri"),
            );
        }

        errors
    }

    /// Copia del modulo con i campi di testo ripuliti da tag ed entità HTML
    pub fn sanitized(&self) -> Self {
        let clean = |s: &str| sanitize_text(strip_html_tags(s).trim());
        Self {
            nome: clean(&self.nome),
            email: self.email.trim().to_string(),
            telefono: self.telefono.as_deref().map(clean),
            azienda: self.azienda.as_deref().map(clean),
            messaggio: clean(&self.messaggio),
        }
    }
}
