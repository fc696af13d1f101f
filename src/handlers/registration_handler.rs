use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::enums::{ProfessionalInterest, UserRole};
use crate::models::lead_model::{CompanyDetail, Lead, ProfessionalDetail};
use crate::utils::errors::ApiError;
use crate::utils::validation::{
    self, empty_to_none, BusinessPayload, ProfessionalPayload, ValidBusinessLead,
    ValidProfessionalLead,
};

pub(crate) const EMAIL_TAKEN: &str =
    "Cet email est déjà utilisé. Veuillez utiliser un autre email.";
pub(crate) const PHONE_TAKEN: &str =
    "Ce numéro de téléphone est déjà utilisé. Veuillez utiliser un autre numéro.";

#[post("/api/register/professional")]
pub async fn register_professional(
    req: HttpRequest,
    db: web::Data<PgPool>,
    payload: web::Json<ProfessionalPayload>,
) -> Result<HttpResponse, ApiError> {
    let lead = validation::validate_professional(&payload).map_err(ApiError::Validation)?;

    if !validation::phone_matches_country(&lead.phone) {
        log::warn!(
            "phone for {} passes the permissive pattern but not the country-specific one",
            lead.email
        );
    }

    let existing = find_lead_by_email(&db, &lead.email).await?;
    if existing.is_none() {
        ensure_unique_contact(&db, &lead.email, &lead.phone).await?;
    }

    let ip = client_ip(&req);
    let saved = upsert_professional(&db, &lead, existing, ip).await?;
    log::info!("professional lead registered: {}", saved.email);

    Ok(HttpResponse::Ok().json(json!({ "success": true, "user": saved })))
}

#[post("/api/register/business")]
pub async fn register_business(
    req: HttpRequest,
    db: web::Data<PgPool>,
    payload: web::Json<BusinessPayload>,
) -> Result<HttpResponse, ApiError> {
    let lead = validation::validate_business(&payload).map_err(ApiError::Validation)?;

    if !validation::phone_matches_country(&lead.phone) {
        log::warn!(
            "phone for {} passes the permissive pattern but not the country-specific one",
            lead.email
        );
    }

    let existing = find_lead_by_email(&db, &lead.email).await?;
    if existing.is_none() {
        ensure_unique_contact(&db, &lead.email, &lead.phone).await?;
    }

    let ip = client_ip(&req);
    let saved = upsert_business(&db, &lead, existing, ip).await?;
    log::info!("business lead registered: {}", saved.email);

    Ok(HttpResponse::Ok().json(json!({ "success": true, "user": saved })))
}

async fn find_lead_by_email(pool: &PgPool, email: &str) -> Result<Option<Lead>, sqlx::Error> {
    sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Advisory pre-check run for new registrations only. The database UNIQUE
/// constraints remain the authority; this exists for the friendlier
/// field-scoped message.
async fn ensure_unique_contact(pool: &PgPool, email: &str, phone: &str) -> Result<(), ApiError> {
    let email_taken = sqlx::query("SELECT id FROM leads WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    if email_taken.is_some() {
        return Err(ApiError::Conflict {
            field: "email",
            message: EMAIL_TAKEN.to_string(),
        });
    }

    let phone_taken = sqlx::query("SELECT id FROM leads WHERE phone = $1")
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    if phone_taken.is_some() {
        return Err(ApiError::Conflict {
            field: "phone",
            message: PHONE_TAKEN.to_string(),
        });
    }

    Ok(())
}

/// Maps a unique-constraint violation raced past the advisory pre-check to
/// the same field-scoped conflict the pre-check would have produced.
fn translate_write_error(err: sqlx::Error) -> ApiError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("leads_phone_key") => ApiError::Conflict {
                    field: "phone",
                    message: PHONE_TAKEN.to_string(),
                },
                _ => ApiError::Conflict {
                    field: "email",
                    message: EMAIL_TAKEN.to_string(),
                },
            };
        }
    }
    ApiError::Database(err)
}

fn client_ip(req: &HttpRequest) -> Option<String> {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
}

/// Creates or updates the lead row plus its professional detail row in one
/// transaction. The update path leaves role, trial flag, registration date
/// and IP untouched.
async fn upsert_professional(
    pool: &PgPool,
    lead: &ValidProfessionalLead,
    existing: Option<Lead>,
    ip: Option<String>,
) -> Result<Lead, ApiError> {
    let mut tx = pool.begin().await?;

    let saved = match existing {
        Some(_) => sqlx::query_as::<_, Lead>(
            "UPDATE leads SET first_name = $1, last_name = $2, phone = $3, city = $4, \
             country = $5, sector = $6, main_need = $7, contract_type = $8, \
             subscribed_to_newsletter = $9, referral_source = $10, utm_source = $11, \
             utm_medium = $12, utm_campaign = $13, email_verified = $14, updated_at = now() \
             WHERE email = $15 RETURNING *",
        )
        .bind(&lead.first_name)
        .bind(&lead.last_name)
        .bind(&lead.phone)
        .bind(&lead.city)
        .bind(&lead.country)
        .bind(lead.sector.as_str())
        .bind(ProfessionalInterest::Emploi.as_str())
        .bind(lead.contract_type.map(|c| c.as_str()))
        .bind(lead.subscribed_to_newsletter)
        .bind(empty_to_none(&lead.referral_source))
        .bind(&lead.utm_source)
        .bind(&lead.utm_medium)
        .bind(&lead.utm_campaign)
        .bind(lead.email_verified)
        .bind(&lead.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?,
        None => sqlx::query_as::<_, Lead>(
            "INSERT INTO leads (id, first_name, last_name, email, phone, role, city, country, \
             sector, main_need, contract_type, subscribed_to_newsletter, email_verified, \
             registered_for_trial, referral_source, utm_source, utm_medium, utm_campaign, \
             registration_date, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, TRUE, \
             $14, $15, $16, $17, now(), $18) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&lead.first_name)
        .bind(&lead.last_name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(UserRole::Professional.as_str())
        .bind(&lead.city)
        .bind(&lead.country)
        .bind(lead.sector.as_str())
        .bind(ProfessionalInterest::Emploi.as_str())
        .bind(lead.contract_type.map(|c| c.as_str()))
        .bind(lead.subscribed_to_newsletter)
        .bind(lead.email_verified)
        .bind(empty_to_none(&lead.referral_source))
        .bind(&lead.utm_source)
        .bind(&lead.utm_medium)
        .bind(&lead.utm_campaign)
        .bind(ip)
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?,
    };

    let interests: Vec<String> = lead
        .professional_interests
        .iter()
        .map(|i| i.as_str().to_string())
        .collect();

    let detail = sqlx::query_as::<_, ProfessionalDetail>(
        "INSERT INTO professional_details (id, lead_id, professional_interests, \
         professional_challenges, city, country) VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (lead_id) DO UPDATE SET \
         professional_interests = EXCLUDED.professional_interests, \
         professional_challenges = EXCLUDED.professional_challenges, \
         city = EXCLUDED.city, country = EXCLUDED.country RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(saved.id)
    .bind(&interests)
    .bind(empty_to_none(&lead.professional_challenges))
    .bind(&lead.city)
    .bind(&lead.country)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    log::debug!("professional detail {} upserted for lead {}", detail.id, saved.id);
    Ok(saved)
}

/// Business counterpart; the company address is stored as the lead's city,
/// matching the professional shape of the row.
async fn upsert_business(
    pool: &PgPool,
    lead: &ValidBusinessLead,
    existing: Option<Lead>,
    ip: Option<String>,
) -> Result<Lead, ApiError> {
    let mut tx = pool.begin().await?;

    let saved = match existing {
        Some(_) => sqlx::query_as::<_, Lead>(
            "UPDATE leads SET first_name = $1, last_name = $2, phone = $3, city = $4, \
             sector = $5, main_need = $6, subscribed_to_newsletter = $7, referral_source = $8, \
             utm_source = $9, utm_medium = $10, utm_campaign = $11, email_verified = $12, \
             updated_at = now() WHERE email = $13 RETURNING *",
        )
        .bind(&lead.first_name)
        .bind(&lead.last_name)
        .bind(&lead.phone)
        .bind(&lead.address)
        .bind(lead.sector.as_str())
        .bind(ProfessionalInterest::Autre.as_str())
        .bind(lead.subscribed_to_newsletter)
        .bind(empty_to_none(&lead.referral_source))
        .bind(&lead.utm_source)
        .bind(&lead.utm_medium)
        .bind(&lead.utm_campaign)
        .bind(lead.email_verified)
        .bind(&lead.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?,
        None => sqlx::query_as::<_, Lead>(
            "INSERT INTO leads (id, first_name, last_name, email, phone, role, city, sector, \
             main_need, subscribed_to_newsletter, email_verified, registered_for_trial, \
             referral_source, utm_source, utm_medium, utm_campaign, registration_date, \
             ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE, $12, $13, $14, \
             $15, now(), $16) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&lead.first_name)
        .bind(&lead.last_name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(UserRole::Business.as_str())
        .bind(&lead.address)
        .bind(lead.sector.as_str())
        .bind(ProfessionalInterest::Autre.as_str())
        .bind(lead.subscribed_to_newsletter)
        .bind(lead.email_verified)
        .bind(empty_to_none(&lead.referral_source))
        .bind(&lead.utm_source)
        .bind(&lead.utm_medium)
        .bind(&lead.utm_campaign)
        .bind(ip)
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?,
    };

    let needs: Vec<String> = lead
        .company_needs
        .iter()
        .map(|n| n.as_str().to_string())
        .collect();

    let detail = sqlx::query_as::<_, CompanyDetail>(
        "INSERT INTO company_details (id, lead_id, company_name, company_size, company_needs, \
         company_challenges) VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (lead_id) DO UPDATE SET \
         company_name = EXCLUDED.company_name, company_size = EXCLUDED.company_size, \
         company_needs = EXCLUDED.company_needs, \
         company_challenges = EXCLUDED.company_challenges RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(saved.id)
    .bind(&lead.company_name)
    .bind(lead.company_size.as_str())
    .bind(&needs)
    .bind(empty_to_none(&lead.company_challenges))
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    log::debug!("company detail {} upserted for lead {}", detail.id, saved.id);
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_unique_errors_pass_through_as_database_errors() {
        let err = translate_write_error(sqlx::Error::RowNotFound);
        match err {
            ApiError::Database(sqlx::Error::RowNotFound) => {}
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn client_ip_honors_forwarded_headers() {
        let req = actix_web::test::TestRequest::default()
            .insert_header(("x-forwarded-for", "41.140.10.5"))
            .to_http_request();
        assert_eq!(client_ip(&req), Some("41.140.10.5".to_string()));
    }
}
