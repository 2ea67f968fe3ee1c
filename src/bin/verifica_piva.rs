//! Verifica da riga di comando di una o più Partite IVA

use bianchipro_fiscal::fiscale::validate_partita_iva;
use std::process::ExitCode;

/// Riga di esito per una Partita IVA, con il flag di validità
fn esito(number: &str) -> (bool, String) {
    let result = validate_partita_iva(number);
    if result.valid {
        (true, format!("{}: valida", number))
    } else {
        (false, format!("{}: {}", number, result.error.unwrap_or_default()))
    }
}

fn main() -> ExitCode {
    let numbers: Vec<String> = std::env::args().skip(1).collect();
    if numbers.is_empty() {
        eprintln!("Uso: verifica-piva <partita_iva> [<partita_iva> ...]");
        return ExitCode::from(2);
    }

    let mut all_valid = true;
    for number in &numbers {
        let (valid, line) = esito(number);
        all_valid &= valid;
        println!("{}", line);
    }

    if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
