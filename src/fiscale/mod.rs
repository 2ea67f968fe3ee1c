//! Validazione dei dati fiscali italiani
//!
//! Questo modulo fornisce:
//! - i validatori dei singoli campi (Partita IVA, Codice Fiscale, SDI, PEC, ...)
//! - le utility di pulizia del testo inserito dagli utenti
//! - il dispatch dei validatori per nome del campo

mod sanitize;
mod validators;

pub use sanitize::{sanitize_text, strip_html_tags};
pub use validators::{
    validate_cap, validate_codice_fiscale, validate_codice_sdi, validate_email,
    validate_partita_iva, validate_pec, validate_provincia, validate_telefono, SDI_NON_ASSEGNATO,
};

use crate::models::error::ValidationResult;

/// Campo validabile singolarmente (validazione al blur dei form)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Campo {
    PartitaIva,
    CodiceFiscale,
    CodiceSdi,
    Pec,
    Email,
    Telefono,
    Cap,
    Provincia,
}

impl Campo {
    /// Risolve il nome del campo usato nei form
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "partita_iva" => Some(Campo::PartitaIva),
            "codice_fiscale" => Some(Campo::CodiceFiscale),
            "codice_destinatario_sdi" | "codice_sdi" => Some(Campo::CodiceSdi),
            "pec" => Some(Campo::Pec),
            "email" => Some(Campo::Email),
            "telefono" => Some(Campo::Telefono),
            "cap" => Some(Campo::Cap),
            "provincia" => Some(Campo::Provincia),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Campo::PartitaIva => "partita_iva",
            Campo::CodiceFiscale => "codice_fiscale",
            Campo::CodiceSdi => "codice_destinatario_sdi",
            Campo::Pec => "pec",
            Campo::Email => "email",
            Campo::Telefono => "telefono",
            Campo::Cap => "cap",
            Campo::Provincia => "provincia",
        }
    }

    pub fn validate(&self, value: &str) -> ValidationResult {
        match self {
            Campo::PartitaIva => validate_partita_iva(value),
            Campo::CodiceFiscale => validate_codice_fiscale(value),
            Campo::CodiceSdi => validate_codice_sdi(value),
            Campo::Pec => validate_pec(value),
            Campo::Email => validate_email(value),
            Campo::Telefono => validate_telefono(value),
            Campo::Cap => validate_cap(value),
            Campo::Provincia => validate_provincia(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campo_from_name() {
        assert_eq!(Campo::from_name("partita_iva"), Some(Campo::PartitaIva));
        assert_eq!(Campo::from_name("codice_sdi"), Some(Campo::CodiceSdi));
        assert_eq!(Campo::from_name("ragione_sociale"), None);
    }

    #[test]
    fn test_campo_name_round_trips() {
        for campo in [Campo::PartitaIva, Campo::CodiceSdi, Campo::Telefono, Campo::Provincia] {
            assert_eq!(Campo::from_name(campo.name()), Some(campo));
        }
    }

    #[test]
    fn test_campo_validate_dispatch() {
        assert!(Campo::PartitaIva.validate("03434940403").valid);
        assert!(!Campo::Cap.validate("ABCDE").valid);
    }
}
