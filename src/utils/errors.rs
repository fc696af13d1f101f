use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::utils::validation::Violation;

/// Every failure a handler can produce. All variants render as a structured
/// JSON body; infrastructure details go to the log, never to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<Violation>),

    #[error("{message}")]
    Conflict {
        field: &'static str,
        message: String,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("resend cooldown active")]
    Cooldown { retry_after_secs: u64 },

    #[error("{message}")]
    Verification {
        code: &'static str,
        message: &'static str,
    },

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("smtp transport error")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("email build error")]
    Email(#[from] lettre::error::Error),

    #[error("invalid email address")]
    Address(#[from] lettre::address::AddressError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::Verification { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Cooldown { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Database(_)
            | ApiError::Smtp(_)
            | ApiError::Email(_)
            | ApiError::Address(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(details) => HttpResponse::BadRequest().json(json!({
                "error": "Validation failed",
                "details": details,
            })),
            ApiError::Conflict { field, message } => HttpResponse::Conflict().json(json!({
                "error": message,
                "field": field,
            })),
            ApiError::BadRequest(message) => {
                HttpResponse::BadRequest().json(json!({ "error": message }))
            }
            ApiError::Cooldown { retry_after_secs } => {
                HttpResponse::TooManyRequests().json(json!({
                    "error": "Veuillez patienter avant de demander un nouveau code",
                    "retryAfterSecs": retry_after_secs,
                }))
            }
            ApiError::Verification { code, message } => HttpResponse::BadRequest().json(json!({
                "error": message,
                "code": code,
            })),
            ApiError::Database(err) => {
                log::error!("database error: {:?}", err);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Une erreur est survenue. Veuillez réessayer.",
                }))
            }
            ApiError::Smtp(err) => {
                log::error!("smtp error: {:?}", err);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Erreur lors de l'envoi de l'email",
                }))
            }
            ApiError::Email(err) => {
                log::error!("email build error: {:?}", err);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Erreur lors de l'envoi de l'email",
                }))
            }
            ApiError::Address(err) => {
                log::error!("invalid recipient address: {:?}", err);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Erreur lors de l'envoi de l'email",
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::MISSING_FIELD;
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn conflict_names_the_offending_field() {
        let err = ApiError::Conflict {
            field: "phone",
            message: "Ce numéro de téléphone est déjà utilisé. Veuillez utiliser un autre numéro."
                .to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let body = body_json(err.error_response()).await;
        assert_eq!(body["field"], "phone");
        assert!(body["error"].as_str().unwrap().contains("déjà utilisé"));
    }

    #[actix_web::test]
    async fn validation_errors_carry_the_details_array() {
        let err = ApiError::Validation(vec![Violation {
            path: "firstName".to_string(),
            code: MISSING_FIELD,
            message: "Le prénom est requis".to_string(),
        }]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = body_json(err.error_response()).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"][0]["path"], "firstName");
        assert_eq!(body["details"][0]["code"], "MISSING_FIELD");
    }

    #[actix_web::test]
    async fn cooldown_reports_remaining_seconds() {
        let err = ApiError::Cooldown {
            retry_after_secs: 42,
        };
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
        let body = body_json(err.error_response()).await;
        assert_eq!(body["retryAfterSecs"], 42);
    }

    #[actix_web::test]
    async fn verification_failures_expose_a_code_discriminant() {
        let err = ApiError::Verification {
            code: "CODE_INVALID",
            message: "Code de vérification incorrect",
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = body_json(err.error_response()).await;
        assert_eq!(body["code"], "CODE_INVALID");
    }
}
