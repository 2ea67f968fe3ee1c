use serde::{Deserialize, Serialize};

use super::error::{ErrorKind, ErrorMap};
use crate::fiscale::{
    validate_cap, validate_codice_fiscale, validate_codice_sdi, validate_partita_iva,
    validate_pec, validate_provincia, SDI_NON_ASSEGNATO,
};

/// Dati di fatturazione inseriti al checkout
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BillingRecord {
    #[serde(default)]
    pub ragione_sociale: String,
    #[serde(default)]
    pub partita_iva: String,
    #[serde(default)]
    pub codice_fiscale: Option<String>,
    #[serde(default)]
    pub codice_destinatario_sdi: String,
    #[serde(default)]
    pub pec: Option<String>,
    #[serde(default)]
    pub via: String,
    #[serde(default)]
    pub citta: String,
    #[serde(default)]
    pub cap: String,
    #[serde(default)]
    pub provincia: String,
}

impl BillingRecord {
    /// Valida i dati di fatturazione e restituisce gli errori per campo.
    /// Mappa vuota = dati pronti per la fattura elettronica.
    pub fn validate(&self) -> ErrorMap {
        let mut errors = ErrorMap::new();

        check_min_len(
            &mut errors,
            "ragione_sociale",
            &self.ragione_sociale,
            2,
            "La ragione sociale è obbligatoria",
            "La ragione sociale deve contenere almeno 2 caratteri",
        );

        errors.record("partita_iva", validate_partita_iva(&self.partita_iva));

        // Codice Fiscale facoltativo
        if let Some(cf) = non_empty(&self.codice_fiscale) {
            errors.record("codice_fiscale", validate_codice_fiscale(cf));
        }

        let sdi = self.codice_destinatario_sdi.as_str();
        let has_sdi = !sdi.is_empty() && sdi.trim() != SDI_NON_ASSEGNATO;
        let pec = non_empty(&self.pec);

        if !has_sdi && pec.is_none() {
            errors.insert(
                "codice_destinatario_sdi",
                ErrorKind::PresenceConflict,
                "Inserire il Codice Destinatario SDI oppure l'indirizzo PEC",
            );
        } else {
            if has_sdi {
                errors.record("codice_destinatario_sdi", validate_codice_sdi(sdi));
            }
            if let Some(pec) = pec {
                errors.record("pec", validate_pec(pec));
            }
        }

        check_min_len(
            &mut errors,
            "via",
            &self.via,
            3,
            "L'indirizzo è obbligatorio",
            "L'indirizzo deve contenere almeno 3 caratteri",
        );
        check_min_len(
            &mut errors,
            "citta",
            &self.citta,
            2,
            "La città è obbligatoria",
            "La città deve contenere almeno 2 caratteri",
        );

        errors.record("cap", validate_cap(&self.cap));
        errors.record("provincia", validate_provincia(&self.provincia));

        errors
    }
}

/// Valida i dati di fatturazione di un ordine B2B
pub fn validate_dati_fatturazione(record: &BillingRecord) -> ErrorMap {
    record.validate()
}

/// Valore facoltativo considerato presente se non vuoto (anche se di soli spazi)
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Campo obbligatorio con lunghezza minima (in caratteri, spazi esterni esclusi)
fn check_min_len(
    errors: &mut ErrorMap,
    field: &str,
    value: &str,
    min: usize,
    missing: &str,
    too_short: &str,
) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.insert(field, ErrorKind::MissingField, missing);
    } else if len < min {
        errors.insert(field, ErrorKind::FormatMismatch, too_short);
    }
}
