use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::enums::{CompanyNeed, CompanySize, ContractType, ProfessionalInterest, Sector};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    // Permissive pattern enforced by the lead schemas: optional leading +,
    // then at least six digits/spaces/hyphens.
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9\s-]{6,}$").unwrap();
    // Country-specific mobile patterns, matched against the whitespace-stripped number.
    static ref MA_PHONE_RE: Regex = Regex::new(r"^(?:\+212|212|0)[5-7][0-9]{8}$").unwrap();
    static ref FR_PHONE_RE: Regex = Regex::new(r"^(?:\+33|33|0)[1-9][0-9]{8}$").unwrap();
    static ref INTL_PHONE_RE: Regex = Regex::new(r"^\+?[0-9]{6,15}$").unwrap();
}

pub const MISSING_FIELD: &str = "MISSING_FIELD";
pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
pub const INVALID_ENUM_VALUE: &str = "INVALID_ENUM_VALUE";
pub const EMPTY_SELECTION: &str = "EMPTY_SELECTION";

/// One field-level validation failure, reported back to the client as-is.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub code: &'static str,
    pub message: String,
}

impl Violation {
    fn new(path: &str, code: &'static str, message: &str) -> Self {
        Self {
            path: path.to_string(),
            code,
            message: message.to_string(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Stricter per-country check with automatic country sniffing: Moroccan and
/// French mobile plans when the prefix gives the country away, the generic
/// international pattern otherwise. Advisory only, the schemas stay on the
/// permissive pattern.
pub fn phone_matches_country(phone: &str) -> bool {
    let clean: String = phone.chars().filter(|c| !c.is_whitespace()).collect();

    let second_digit_mobile = matches!(clean.as_bytes().get(1), Some(b'5'..=b'7'));
    if clean.starts_with("+212") || clean.starts_with("212") || (clean.starts_with('0') && second_digit_mobile) {
        return MA_PHONE_RE.is_match(&clean);
    }

    if clean.starts_with("+33") || clean.starts_with("33") || (clean.starts_with('0') && clean.len() == 10) {
        return FR_PHONE_RE.is_match(&clean);
    }

    INTL_PHONE_RE.is_match(&clean)
}

/// Normalizes Moroccan spellings (`06…`, `212…`, bare nine digits) to the
/// canonical `+212…` form. Anything that does not look Moroccan comes back
/// unchanged.
pub fn format_moroccan_phone(phone: &str) -> String {
    let clean: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if clean.starts_with('0') && clean.len() == 10 {
        return format!("+212{}", &clean[1..]);
    }
    if clean.starts_with("212") && (clean.len() == 12 || clean.len() == 11) {
        return format!("+{}", clean);
    }
    if clean.len() == 9 && matches!(clean.as_bytes().first(), Some(b'5') | Some(b'6') | Some(b'7')) {
        return format!("+212{}", clean);
    }

    phone.to_string()
}

/// Raw professional signup payload as the wizard submits it. Absent fields
/// default so required-ness is decided by the validator, not the decoder.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfessionalPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub sector: String,
    pub professional_interests: Vec<String>,
    pub professional_challenges: String,
    pub subscribed_to_newsletter: bool,
    pub referral_source: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub email_verified: bool,
    pub contract_type: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub sector: String,
    pub company_name: String,
    pub company_size: String,
    pub company_needs: Vec<String>,
    pub company_challenges: String,
    pub subscribed_to_newsletter: bool,
    pub referral_source: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub email_verified: bool,
}

/// Fully validated professional lead, phone already normalized.
#[derive(Debug, Clone)]
pub struct ValidProfessionalLead {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub sector: Sector,
    pub professional_interests: Vec<ProfessionalInterest>,
    pub professional_challenges: String,
    pub subscribed_to_newsletter: bool,
    pub referral_source: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub email_verified: bool,
    pub contract_type: Option<ContractType>,
}

#[derive(Debug, Clone)]
pub struct ValidBusinessLead {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub sector: Sector,
    pub company_name: String,
    pub company_size: CompanySize,
    pub company_needs: Vec<CompanyNeed>,
    pub company_challenges: String,
    pub subscribed_to_newsletter: bool,
    pub referral_source: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub email_verified: bool,
}

fn check_required(violations: &mut Vec<Violation>, path: &str, value: &str, message: &str) {
    if value.is_empty() {
        violations.push(Violation::new(path, MISSING_FIELD, message));
    }
}

fn check_email(violations: &mut Vec<Violation>, email: &str) {
    if email.is_empty() {
        violations.push(Violation::new("email", MISSING_FIELD, "L'email est requis"));
    } else if !is_valid_email(email) {
        violations.push(Violation::new("email", INVALID_FORMAT, "Email invalide"));
    }
}

fn check_phone(violations: &mut Vec<Violation>, phone: &str) {
    if phone.is_empty() {
        violations.push(Violation::new(
            "phone",
            MISSING_FIELD,
            "Le numéro de téléphone est requis",
        ));
    } else if !is_valid_phone(phone) {
        violations.push(Violation::new(
            "phone",
            INVALID_FORMAT,
            "Numéro de téléphone invalide",
        ));
    }
}

fn check_sector(violations: &mut Vec<Violation>, value: &str) -> Option<Sector> {
    match Sector::parse(value) {
        Some(sector) => Some(sector),
        None => {
            violations.push(Violation::new("sector", INVALID_ENUM_VALUE, "Secteur invalide"));
            None
        }
    }
}

/// Empty optional free-text maps to `None` so the database stores NULL
/// instead of empty strings for untouched fields.
pub fn empty_to_none(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn none_if_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(empty_to_none)
}

pub fn validate_professional(
    raw: &ProfessionalPayload,
) -> Result<ValidProfessionalLead, Vec<Violation>> {
    let mut violations = Vec::new();

    check_required(&mut violations, "firstName", &raw.first_name, "Le prénom est requis");
    check_required(&mut violations, "lastName", &raw.last_name, "Le nom est requis");
    check_email(&mut violations, &raw.email);
    check_phone(&mut violations, &raw.phone);
    check_required(&mut violations, "country", &raw.country, "Le pays est requis");

    let sector = check_sector(&mut violations, &raw.sector);

    let mut interests = Vec::new();
    for value in &raw.professional_interests {
        match ProfessionalInterest::parse(value) {
            Some(interest) => interests.push(interest),
            None => violations.push(Violation::new(
                "professionalInterests",
                INVALID_ENUM_VALUE,
                &format!("Intérêt invalide: {}", value),
            )),
        }
    }
    if raw.professional_interests.is_empty() {
        violations.push(Violation::new(
            "professionalInterests",
            EMPTY_SELECTION,
            "Sélectionnez au moins un intérêt",
        ));
    }

    let contract_type = match raw.contract_type.as_deref() {
        None | Some("") => None,
        Some(value) => match ContractType::parse(value) {
            Some(parsed) => Some(parsed),
            None => {
                violations.push(Violation::new(
                    "contractType",
                    INVALID_ENUM_VALUE,
                    "Type de contrat invalide",
                ));
                None
            }
        },
    };

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(ValidProfessionalLead {
        first_name: raw.first_name.clone(),
        last_name: raw.last_name.clone(),
        email: raw.email.clone(),
        phone: format_moroccan_phone(&raw.phone),
        city: raw.city.clone(),
        country: raw.country.clone(),
        sector: sector.unwrap(),
        professional_interests: interests,
        professional_challenges: raw.professional_challenges.clone(),
        subscribed_to_newsletter: raw.subscribed_to_newsletter,
        referral_source: raw.referral_source.clone(),
        utm_source: none_if_blank(&raw.utm_source),
        utm_medium: none_if_blank(&raw.utm_medium),
        utm_campaign: none_if_blank(&raw.utm_campaign),
        email_verified: raw.email_verified,
        contract_type,
    })
}

pub fn validate_business(raw: &BusinessPayload) -> Result<ValidBusinessLead, Vec<Violation>> {
    let mut violations = Vec::new();

    check_required(&mut violations, "firstName", &raw.first_name, "Le prénom est requis");
    check_required(&mut violations, "lastName", &raw.last_name, "Le nom est requis");
    check_email(&mut violations, &raw.email);
    check_phone(&mut violations, &raw.phone);
    check_required(&mut violations, "address", &raw.address, "L'adresse est requise");
    check_required(
        &mut violations,
        "companyName",
        &raw.company_name,
        "Le nom de l'entreprise est requis",
    );

    let sector = check_sector(&mut violations, &raw.sector);

    let company_size = match CompanySize::parse(&raw.company_size) {
        Some(size) => Some(size),
        None => {
            violations.push(Violation::new(
                "companySize",
                INVALID_ENUM_VALUE,
                "Taille d'entreprise invalide",
            ));
            None
        }
    };

    let mut needs = Vec::new();
    for value in &raw.company_needs {
        match CompanyNeed::parse(value) {
            Some(need) => needs.push(need),
            None => violations.push(Violation::new(
                "companyNeeds",
                INVALID_ENUM_VALUE,
                &format!("Besoin invalide: {}", value),
            )),
        }
    }
    if raw.company_needs.is_empty() {
        violations.push(Violation::new(
            "companyNeeds",
            EMPTY_SELECTION,
            "Sélectionnez au moins un besoin",
        ));
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(ValidBusinessLead {
        first_name: raw.first_name.clone(),
        last_name: raw.last_name.clone(),
        email: raw.email.clone(),
        phone: format_moroccan_phone(&raw.phone),
        address: raw.address.clone(),
        sector: sector.unwrap(),
        company_name: raw.company_name.clone(),
        company_size: company_size.unwrap(),
        company_needs: needs,
        company_challenges: raw.company_challenges.clone(),
        subscribed_to_newsletter: raw.subscribed_to_newsletter,
        referral_source: raw.referral_source.clone(),
        utm_source: none_if_blank(&raw.utm_source),
        utm_medium: none_if_blank(&raw.utm_medium),
        utm_campaign: none_if_blank(&raw.utm_campaign),
        email_verified: raw.email_verified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn professional_fixture() -> ProfessionalPayload {
        ProfessionalPayload {
            first_name: "Amine".to_string(),
            last_name: "Berrada".to_string(),
            email: "amine@example.com".to_string(),
            phone: "+212612345678".to_string(),
            country: "Maroc".to_string(),
            sector: "TECHNOLOGIE".to_string(),
            professional_interests: vec!["MENTORAT".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn valid_professional_payload_passes_with_defaults() {
        let lead = validate_professional(&professional_fixture()).unwrap();
        assert_eq!(lead.sector, Sector::Technologie);
        assert_eq!(lead.city, "");
        assert_eq!(lead.professional_challenges, "");
        assert!(!lead.subscribed_to_newsletter);
        assert!(lead.contract_type.is_none());
        assert!(lead.utm_source.is_none());
    }

    #[test]
    fn missing_first_name_is_reported_by_path() {
        let mut raw = professional_fixture();
        raw.first_name.clear();
        let violations = validate_professional(&raw).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "firstName");
        assert_eq!(violations[0].code, MISSING_FIELD);
    }

    #[test]
    fn unknown_sector_is_an_enum_violation() {
        let mut raw = professional_fixture();
        raw.sector = "BANQUE".to_string();
        let violations = validate_professional(&raw).unwrap_err();
        assert_eq!(violations[0].path, "sector");
        assert_eq!(violations[0].code, INVALID_ENUM_VALUE);
    }

    #[test]
    fn empty_interest_selection_is_rejected() {
        let mut raw = professional_fixture();
        raw.professional_interests.clear();
        let violations = validate_professional(&raw).unwrap_err();
        assert_eq!(violations[0].code, EMPTY_SELECTION);
    }

    #[test]
    fn several_violations_are_collected_together() {
        let raw = ProfessionalPayload::default();
        let violations = validate_professional(&raw).unwrap_err();
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"firstName"));
        assert!(paths.contains(&"email"));
        assert!(paths.contains(&"phone"));
        assert!(paths.contains(&"sector"));
        assert!(paths.contains(&"professionalInterests"));
    }

    #[test]
    fn valid_business_payload_passes() {
        let raw = BusinessPayload {
            first_name: "Sara".to_string(),
            last_name: "El Fassi".to_string(),
            email: "sara@entreprise.ma".to_string(),
            phone: "0661234567".to_string(),
            address: "Casablanca".to_string(),
            sector: "FINANCE".to_string(),
            company_name: "Atlas Conseil".to_string(),
            company_size: "BETWEEN_10_50".to_string(),
            company_needs: vec!["RESEAU_B2B".to_string(), "MENTORAT".to_string()],
            ..Default::default()
        };
        let lead = validate_business(&raw).unwrap();
        assert_eq!(lead.company_size, CompanySize::Between10And50);
        assert_eq!(lead.phone, "+212661234567");
        assert_eq!(lead.company_needs.len(), 2);
    }

    #[test]
    fn email_format_is_checked() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("user.name+tag@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn permissive_phone_pattern() {
        assert!(is_valid_phone("+212 6 12 34 56 78"));
        assert!(is_valid_phone("06-12-34-56-78"));
        assert!(is_valid_phone("123456"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+abc123456"));
    }

    #[test]
    fn country_sniffing_applies_stricter_patterns() {
        assert!(phone_matches_country("+212612345678"));
        assert!(phone_matches_country("0612345678"));
        assert!(!phone_matches_country("+21261234"));
        assert!(phone_matches_country("+33612345678"));
        assert!(!phone_matches_country("+3361234"));
        assert!(phone_matches_country("+14155550123"));
    }

    #[test]
    fn moroccan_numbers_normalize_to_plus_212() {
        assert_eq!(format_moroccan_phone("0612345678"), "+212612345678");
        assert_eq!(format_moroccan_phone("212612345678"), "+212612345678");
        assert_eq!(format_moroccan_phone("+212612345678"), "+212612345678");
        assert_eq!(format_moroccan_phone("612345678"), "+212612345678");
        assert_eq!(format_moroccan_phone("+33612345678"), "+33612345678");
    }
}
