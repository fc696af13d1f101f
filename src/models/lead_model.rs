use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered lead (professional or business early-access signup).
///
/// `phone` is nullable: newsletter-only placeholder rows carry no number so
/// the unique constraint never collides on a sentinel value.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub city: String,
    pub country: String,
    pub sector: String,
    pub main_need: String,
    pub contract_type: Option<String>,
    pub subscribed_to_newsletter: bool,
    pub email_verified: bool,
    pub registered_for_trial: bool,
    pub referral_source: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub registration_date: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalDetail {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub professional_interests: Vec<String>,
    pub professional_challenges: Option<String>,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub company_name: String,
    pub company_size: String,
    pub company_needs: Vec<String>,
    pub company_challenges: Option<String>,
}
