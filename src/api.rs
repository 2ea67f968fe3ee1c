//! Endpoint HTTP di validazione usati dai form del negozio

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::fiscale::Campo;
use crate::models::billing::BillingRecord;
use crate::models::contact::ContactForm;
use crate::models::error::{ErrorKind, FieldError, ValidationResponse};
use crate::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
}

#[derive(Serialize)]
struct SuccessResponse {
    success: bool,
}

#[derive(Serialize)]
struct ContactResponse {
    success: bool,
    contatto: ContactForm,
}

/// Valore di un singolo campo da validare
#[derive(Deserialize)]
pub struct CampoRequest {
    #[serde(default)]
    pub valore: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/fatturazione/valida", post(valida_fatturazione))
        .route("/api/campi/:campo", post(valida_campo))
        .route("/api/contatti", post(invia_contatto))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Corpo JSON illeggibile: stessa forma di risposta degli errori di validazione
fn parse_error(rejection: JsonRejection) -> Response {
    tracing::debug!(errore = %rejection.body_text(), "corpo della richiesta non valido");
    let response = ValidationResponse::with_errors(vec![FieldError::new(
        "_form",
        ErrorKind::FormatMismatch,
        format!("Errore di parsing: {}", rejection.body_text()),
    )]);
    (StatusCode::BAD_REQUEST, Json(response)).into_response()
}

// Validazione finale dei dati di fatturazione al checkout
async fn valida_fatturazione(payload: Result<Json<BillingRecord>, JsonRejection>) -> Response {
    let record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => return parse_error(rejection),
    };
    let errors = record.validate();
    if !errors.is_empty() {
        tracing::debug!(
            campi = ?errors.fields().collect::<Vec<_>>(),
            "dati di fatturazione non validi"
        );
        let response = ValidationResponse::from(errors);
        return (StatusCode::BAD_REQUEST, Json(response)).into_response();
    }

    (StatusCode::OK, Json(SuccessResponse { success: true })).into_response()
}

// Validazione al blur di un singolo campo
async fn valida_campo(
    Path(campo): Path<String>,
    payload: Result<Json<CampoRequest>, JsonRejection>,
) -> Response {
    let Some(parsed) = Campo::from_name(&campo) else {
        tracing::warn!(campo = %campo, "campo sconosciuto");
        let response = ValidationResponse::with_errors(vec![FieldError::new(
            "_form",
            ErrorKind::FormatMismatch,
            format!("Campo sconosciuto: {}", campo),
        )]);
        return (StatusCode::NOT_FOUND, Json(response)).into_response();
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return parse_error(rejection),
    };

    (StatusCode::OK, Json(parsed.validate(&request.valore))).into_response()
}

// Modulo contatti: valida e restituisce la versione ripulita
async fn invia_contatto(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => return parse_error(rejection),
    };
    let errors = form.validate(state.config.max_message_len);
    if !errors.is_empty() {
        tracing::debug!(
            campi = ?errors.fields().collect::<Vec<_>>(),
            "modulo contatti non valido"
        );
        let response = ValidationResponse::from(errors);
        return (StatusCode::BAD_REQUEST, Json(response)).into_response();
    }

    tracing::info!("richiesta di contatto ricevuta");
    let response = ContactResponse {
        success: true,
        contatto: form.sanitized(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(AppState {
            config: ServerConfig::default(),
        }))
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(uri, body.to_string()).await
    }

    async fn post_raw(uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn valid_billing() -> Value {
        json!({
            "ragione_sociale": "Bianchi Ristorazione S.r.l.",
            "partita_iva": "IT03434940403",
            "codice_destinatario_sdi": "KRRH6B9",
            "via": "Via Flaminia 120",
            "citta": "Rimini",
            "cap": "47822",
            "provincia": "RN"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_valid_billing_record() {
        let (status, body) = post_json("/api/fatturazione/valida", valid_billing()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }

    #[tokio::test]
    async fn test_billing_record_without_sdi_or_pec() {
        let mut record = valid_billing();
        record["codice_destinatario_sdi"] = json!("0000000");
        let (status, body) = post_json("/api/fatturazione/valida", record).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["field"], json!("codice_destinatario_sdi"));
        assert_eq!(errors[0]["kind"], json!("presence_conflict"));
    }

    #[tokio::test]
    async fn test_single_field_validation() {
        let (status, body) =
            post_json("/api/campi/partita_iva", json!({ "valore": "03434940401" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], json!(false));
        assert_eq!(body["kind"], json!("checksum_failure"));

        let (status, body) = post_json("/api/campi/cap", json!({ "valore": "47822" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "valid": true }));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_validation_response() {
        for uri in ["/api/fatturazione/valida", "/api/campi/cap", "/api/contatti"] {
            let (status, body) = post_raw(uri, "{not json".to_string()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["success"], json!(false));
            let errors = body["errors"].as_array().unwrap();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0]["field"], json!("_form"));
        }
    }

    #[tokio::test]
    async fn test_unknown_field() {
        let (status, body) = post_json("/api/campi/iban", json!({ "valore": "x" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["field"], json!("_form"));
    }

    #[tokio::test]
    async fn test_contact_form_sanitized() {
        let (status, body) = post_json(
            "/api/contatti",
            json!({
                "nome": "<b>Mario</b>",
                "email": "mario@osteria.it",
                "messaggio": "Serve assistenza per l'abbattitore <i>urgente</i>"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contatto"]["nome"], json!("Mario"));
        assert_eq!(
            body["contatto"]["messaggio"],
            json!("Serve assistenza per l&#39;abbattitore urgente")
        );
    }

    #[tokio::test]
    async fn test_contact_form_invalid() {
        let (status, body) = post_json(
            "/api/contatti",
            json!({ "nome": "M", "email": "mario", "messaggio": "" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    }
}
