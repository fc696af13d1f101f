use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::enums::{ProfessionalInterest, Sector, UserRole};
use crate::utils::errors::ApiError;
use crate::utils::validation::is_valid_email;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewsletterPayload {
    pub email: String,
}

/// Newsletter opt-in. An existing lead only gets the flag flipped; an
/// unknown email gets a placeholder row (empty names, no phone) so the
/// subscription survives until a real registration fills it in.
#[post("/api/newsletter")]
pub async fn subscribe(
    db: web::Data<PgPool>,
    payload: web::Json<NewsletterPayload>,
) -> Result<HttpResponse, ApiError> {
    if !is_valid_email(&payload.email) {
        return Err(ApiError::BadRequest("Email invalide".to_string()));
    }

    let existing = sqlx::query("SELECT id FROM leads WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(db.get_ref())
        .await?;

    if existing.is_some() {
        sqlx::query(
            "UPDATE leads SET subscribed_to_newsletter = TRUE, updated_at = now() \
             WHERE email = $1",
        )
        .bind(&payload.email)
        .execute(db.get_ref())
        .await?;
    } else {
        sqlx::query(
            "INSERT INTO leads (id, first_name, last_name, email, phone, role, city, sector, \
             main_need, subscribed_to_newsletter, registration_date) \
             VALUES ($1, '', '', $2, NULL, $3, '', $4, $5, TRUE, now())",
        )
        .bind(Uuid::new_v4())
        .bind(&payload.email)
        .bind(UserRole::Professional.as_str())
        .bind(Sector::Autre.as_str())
        .bind(ProfessionalInterest::Autre.as_str())
        .execute(db.get_ref())
        .await?;
    }

    log::info!("newsletter subscription: {}", payload.email);
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
