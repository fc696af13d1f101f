use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::handlers::registration_handler::{EMAIL_TAKEN, PHONE_TAKEN};
use crate::utils::errors::ApiError;
use crate::utils::validation::format_moroccan_phone;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UniqueQuery {
    pub field: String,
    pub value: String,
}

/// Read-only probe the wizard calls while the user types, before the full
/// payload is submitted.
#[post("/api/check-unique")]
pub async fn check_unique(
    db: web::Data<PgPool>,
    payload: web::Json<UniqueQuery>,
) -> Result<HttpResponse, ApiError> {
    if payload.field.is_empty() || payload.value.is_empty() {
        return Err(ApiError::BadRequest(
            "Le champ et la valeur sont requis".to_string(),
        ));
    }

    let mut is_unique = true;
    let mut message = String::new();

    match payload.field.as_str() {
        "email" => {
            let existing = sqlx::query("SELECT id FROM leads WHERE email = $1")
                .bind(&payload.value)
                .fetch_optional(db.get_ref())
                .await?;
            if existing.is_some() {
                is_unique = false;
                message = EMAIL_TAKEN.to_string();
            }
        }
        "phone" => {
            let existing = sqlx::query("SELECT id FROM leads WHERE phone = $1")
                .bind(format_moroccan_phone(&payload.value))
                .fetch_optional(db.get_ref())
                .await?;
            if existing.is_some() {
                is_unique = false;
                message = PHONE_TAKEN.to_string();
            }
        }
        _ => {}
    }

    Ok(HttpResponse::Ok().json(json!({ "isUnique": is_unique, "message": message })))
}
