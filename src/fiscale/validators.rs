//! Validatori dei campi fiscali e di contatto italiani
//!
//! Ogni funzione è pura: rifiuta prima il valore vuoto con un errore
//! "obbligatorio", poi applica il controllo di formato del campo.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::error::{ErrorKind, ValidationResult};

static CODICE_FISCALE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{6}[0-9]{2}[A-Z][0-9]{2}[A-Z][0-9]{3}[A-Z]$").expect("regex codice fiscale")
});
static CODICE_SDI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{7}$").expect("regex codice SDI"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("regex email")
});
static TELEFONO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+39)?[0-9]{9,11}$").expect("regex telefono"));

/// Codice SDI convenzionale per "nessun codice destinatario"
pub const SDI_NON_ASSEGNATO: &str = "0000000";

/// Valida una Partita IVA (11 cifre, prefisso `IT` facoltativo, cifra di controllo)
pub fn validate_partita_iva(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::missing("La Partita IVA è obbligatoria");
    }

    let trimmed = raw.trim();
    let cleaned = match trimmed.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("IT") => trimmed[2..].trim(),
        _ => trimmed,
    };

    if cleaned.len() != 11 || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::format("La Partita IVA deve contenere 11 cifre");
    }

    let digits: Vec<u32> = cleaned.bytes().map(|b| u32::from(b - b'0')).collect();

    if digits.iter().all(|&d| d == digits[0]) {
        return ValidationResult::format("Partita IVA non valida");
    }

    if partita_iva_check_digit(&digits) != digits[10] {
        return ValidationResult::invalid(
            ErrorKind::ChecksumFailure,
            "Partita IVA non valida (cifra di controllo errata)",
        );
    }

    ValidationResult::ok()
}

/// Calcola la cifra di controllo attesa a partire dalle prime 10 cifre
fn partita_iva_check_digit(digits: &[u32]) -> u32 {
    let sum_odd: u32 = digits[..10].iter().step_by(2).sum();
    let sum_even: u32 = digits[1..10]
        .iter()
        .step_by(2)
        .map(|&d| {
            let doubled = d * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        })
        .sum();

    (10 - (sum_odd + sum_even) % 10) % 10
}

/// Valida il formato del Codice Fiscale (16 caratteri, senza carattere di controllo)
pub fn validate_codice_fiscale(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::missing("Il Codice Fiscale è obbligatorio");
    }

    let cleaned = raw.trim().to_uppercase();
    if !CODICE_FISCALE_RE.is_match(&cleaned) {
        return ValidationResult::format("Formato Codice Fiscale non valido");
    }

    ValidationResult::ok()
}

/// Valida il Codice Destinatario SDI (7 caratteri alfanumerici).
///
/// `0000000` è accettato: la sua equivalenza a "non indicato" è decisa
/// dalla validazione dei dati di fatturazione.
pub fn validate_codice_sdi(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::missing("Il Codice Destinatario SDI è obbligatorio");
    }

    let cleaned = raw.trim().to_uppercase();
    if !CODICE_SDI_RE.is_match(&cleaned) {
        return ValidationResult::format("Il Codice SDI deve contenere 7 caratteri alfanumerici");
    }

    ValidationResult::ok()
}

/// Valida un indirizzo di Posta Elettronica Certificata
pub fn validate_pec(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::missing("L'indirizzo PEC è obbligatorio");
    }

    if !EMAIL_RE.is_match(raw.trim()) {
        return ValidationResult::format("Indirizzo PEC non valido");
    }

    ValidationResult::ok()
}

pub fn validate_email(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::missing("L'indirizzo email è obbligatorio");
    }

    if !EMAIL_RE.is_match(raw.trim()) {
        return ValidationResult::format("Indirizzo email non valido");
    }

    ValidationResult::ok()
}

/// Valida un numero di telefono italiano, con o senza prefisso `+39`.
/// Spazi, trattini e parentesi sono ignorati.
pub fn validate_telefono(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::missing("Il numero di telefono è obbligatorio");
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if !TELEFONO_RE.is_match(&cleaned) {
        return ValidationResult::format("Numero di telefono non valido");
    }

    ValidationResult::ok()
}

pub fn validate_cap(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::missing("Il CAP è obbligatorio");
    }

    let cleaned = raw.trim();
    if cleaned.len() != 5 || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::format("Il CAP deve contenere 5 cifre");
    }

    ValidationResult::ok()
}

/// Valida la sigla della provincia (2 lettere, maiuscole o minuscole)
pub fn validate_provincia(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::missing("La provincia è obbligatoria");
    }

    let cleaned = raw.trim();
    if cleaned.len() != 2 || !cleaned.bytes().all(|b| b.is_ascii_alphabetic()) {
        return ValidationResult::format("La sigla della provincia deve contenere 2 lettere");
    }

    ValidationResult::ok()
}
