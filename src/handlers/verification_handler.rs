use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::config::Config;
use crate::utils::codes::{CodeCheck, CodeStore};
use crate::utils::errors::ApiError;
use crate::utils::mailer::Mailer;
use crate::utils::validation::is_valid_email;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendCodePayload {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyCodePayload {
    pub email: String,
    pub code: String,
}

/// Issues a 6-digit code for the address and mails it. The code is only
/// recorded once the SMTP hand-off succeeded, so a failed send leaves the
/// resend cooldown untouched.
#[post("/api/verification/send")]
pub async fn send_code(
    codes: web::Data<CodeStore>,
    mailer: web::Data<Mailer>,
    config: web::Data<Config>,
    payload: web::Json<SendCodePayload>,
) -> Result<HttpResponse, ApiError> {
    if !is_valid_email(&payload.email) {
        return Err(ApiError::BadRequest("Email invalide".to_string()));
    }

    let code = codes
        .issue(&payload.email)
        .map_err(|remaining| ApiError::Cooldown {
            retry_after_secs: remaining,
        })?;

    mailer
        .send_verification_code(&payload.email, &code, config.verification_ttl_secs / 60)
        .await?;
    codes.store(&payload.email, code);
    log::info!("verification code sent to {}", payload.email);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Code de vérification envoyé à votre adresse email",
    })))
}

/// Checks a submitted code. On success the pending entry is consumed and an
/// already-registered lead is flagged verified; leads registered afterwards
/// carry the flag in their registration payload instead.
#[post("/api/verification/verify")]
pub async fn verify_code(
    db: web::Data<PgPool>,
    codes: web::Data<CodeStore>,
    payload: web::Json<VerifyCodePayload>,
) -> Result<HttpResponse, ApiError> {
    match codes.verify(&payload.email, &payload.code) {
        CodeCheck::Verified => {
            sqlx::query("UPDATE leads SET email_verified = TRUE, updated_at = now() WHERE email = $1")
                .bind(&payload.email)
                .execute(db.get_ref())
                .await?;
            log::info!("email verified: {}", payload.email);
            Ok(HttpResponse::Ok().json(json!({ "success": true })))
        }
        CodeCheck::Mismatch => Err(ApiError::Verification {
            code: "CODE_INVALID",
            message: "Code de vérification incorrect",
        }),
        CodeCheck::Expired => Err(ApiError::Verification {
            code: "CODE_EXPIRED",
            message: "Le code de vérification a expiré. Veuillez demander un nouveau code.",
        }),
        CodeCheck::NotFound => Err(ApiError::Verification {
            code: "CODE_NOT_FOUND",
            message: "Aucun code de vérification n'a été demandé pour cette adresse.",
        }),
    }
}
