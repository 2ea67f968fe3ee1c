//! Libreria di validazione dei dati fiscali per il checkout B2B BianchiPro

pub mod api;
pub mod fiscale;
pub mod models;

pub use models::billing::{validate_dati_fatturazione, BillingRecord};
pub use models::error::{ErrorKind, ErrorMap, ValidationResult};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Percorso di default della configurazione del servizio
pub const DEFAULT_CONFIG_PATH: &str = "config/server.toml";

/// Errori di infrastruttura (configurazione, avvio del server)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("lettura della configurazione {path} fallita: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("configurazione non valida: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("errore del server: {0}")]
    Server(#[from] std::io::Error),
}

/// Configurazione del servizio di validazione
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Filtro `tracing` (sintassi `RUST_LOG`); `RUST_LOG` ha la precedenza
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Lunghezza massima del messaggio del modulo contatti
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_max_message_len() -> usize {
    2000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            log_filter: None,
            max_message_len: default_max_message_len(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml(content: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(content)?)
    }

    /// Carica la configurazione da un file TOML
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AppError::ConfigRead {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_config_overrides() {
        let config = ServerConfig::from_toml(
            r#"
bind_address = "127.0.0.1:8080"
log_filter = "bianchipro_fiscal=debug"
max_message_len = 500
"#,
        )
        .unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.log_filter.as_deref(), Some("bianchipro_fiscal=debug"));
        assert_eq!(config.max_message_len, 500);
    }

    #[test]
    fn test_config_invalid_type() {
        let err = ServerConfig::from_toml("max_message_len = \"tanti\"").unwrap_err();
        assert!(matches!(err, AppError::ConfigParse(_)));
    }

    #[tokio::test]
    async fn test_config_missing_file() {
        let err = ServerConfig::load("config/inesistente.toml").await.unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }
}
