use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::utils::errors::ApiError;
use crate::utils::mailer::Mailer;

#[derive(Debug, Deserialize)]
pub struct SendEmailPayload {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Generic dispatch endpoint: hands the message to the SMTP relay and
/// reports the hand-off, nothing more.
#[post("/api/send-email")]
pub async fn send_email(
    mailer: web::Data<Mailer>,
    payload: web::Json<SendEmailPayload>,
) -> Result<HttpResponse, ApiError> {
    mailer
        .send_html(&payload.to, &payload.subject, &payload.html)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Email envoyé avec succès" })))
}
