//! Classification enumerations shared between the API and the database.
//!
//! The wire format is the canonical upper-case French string; each enum owns
//! exactly one string mapping (`as_str` / `parse`) and parsing happens once,
//! at the validation boundary. The database stores the canonical strings.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Professional,
    Business,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Professional => "PROFESSIONAL",
            UserRole::Business => "BUSINESS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    Technologie,
    AgroHalieutique,
    Commerce,
    Finance,
    Sante,
    EnergieDurabilite,
    Transport,
    Industrie,
    CommerceDistribution,
    ServicesProfessionnels,
    Tourisme,
    MediaDivertissement,
    Education,
    Autre,
}

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Technologie => "TECHNOLOGIE",
            Sector::AgroHalieutique => "AGRO_HALIEUTIQUE",
            Sector::Commerce => "COMMERCE",
            Sector::Finance => "FINANCE",
            Sector::Sante => "SANTE",
            Sector::EnergieDurabilite => "ÉNERGIE_DURABILITE",
            Sector::Transport => "TRANSPORT",
            Sector::Industrie => "INDUSTRIE",
            Sector::CommerceDistribution => "COMMERCE_DISTRIBUTION",
            Sector::ServicesProfessionnels => "SERVICES_PROFESSIONNELS",
            Sector::Tourisme => "TOURISME",
            Sector::MediaDivertissement => "MEDIA_DIVERTISSEMENT",
            Sector::Education => "EDUCATION",
            Sector::Autre => "AUTRE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TECHNOLOGIE" => Some(Sector::Technologie),
            "AGRO_HALIEUTIQUE" => Some(Sector::AgroHalieutique),
            "COMMERCE" => Some(Sector::Commerce),
            "FINANCE" => Some(Sector::Finance),
            "SANTE" => Some(Sector::Sante),
            "ÉNERGIE_DURABILITE" => Some(Sector::EnergieDurabilite),
            "TRANSPORT" => Some(Sector::Transport),
            "INDUSTRIE" => Some(Sector::Industrie),
            "COMMERCE_DISTRIBUTION" => Some(Sector::CommerceDistribution),
            "SERVICES_PROFESSIONNELS" => Some(Sector::ServicesProfessionnels),
            "TOURISME" => Some(Sector::Tourisme),
            "MEDIA_DIVERTISSEMENT" => Some(Sector::MediaDivertissement),
            "EDUCATION" => Some(Sector::Education),
            "AUTRE" => Some(Sector::Autre),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfessionalInterest {
    Mentorat,
    Reseautage,
    Emploi,
    Formation,
    Autre,
}

impl ProfessionalInterest {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfessionalInterest::Mentorat => "MENTORAT",
            ProfessionalInterest::Reseautage => "RESEAUTAGE",
            ProfessionalInterest::Emploi => "EMPLOI",
            ProfessionalInterest::Formation => "FORMATION",
            ProfessionalInterest::Autre => "AUTRE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "MENTORAT" => Some(ProfessionalInterest::Mentorat),
            "RESEAUTAGE" => Some(ProfessionalInterest::Reseautage),
            "EMPLOI" => Some(ProfessionalInterest::Emploi),
            "FORMATION" => Some(ProfessionalInterest::Formation),
            "AUTRE" => Some(ProfessionalInterest::Autre),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyNeed {
    PresentationMarque,
    ReseauB2b,
    TalentsQualifies,
    PartenariatsB2b,
    FreelancesPrestataires,
    VisibiliteMarketingDigital,
    Investissements,
    Mentorat,
    ForumsSectoriels,
    Autre,
}

impl CompanyNeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyNeed::PresentationMarque => "PRESENTATION_MARQUE",
            CompanyNeed::ReseauB2b => "RESEAU_B2B",
            CompanyNeed::TalentsQualifies => "TALENTS_QUALIFIES",
            CompanyNeed::PartenariatsB2b => "PARTENARIATS_B2B",
            CompanyNeed::FreelancesPrestataires => "FREELANCES_PRESTATAIRES",
            CompanyNeed::VisibiliteMarketingDigital => "VISIBILITE_MARKETING_DIGITAL",
            CompanyNeed::Investissements => "INVESTISSEMENTS",
            CompanyNeed::Mentorat => "MENTORAT",
            CompanyNeed::ForumsSectoriels => "FORUMS_SECTORIELS",
            CompanyNeed::Autre => "AUTRE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PRESENTATION_MARQUE" => Some(CompanyNeed::PresentationMarque),
            "RESEAU_B2B" => Some(CompanyNeed::ReseauB2b),
            "TALENTS_QUALIFIES" => Some(CompanyNeed::TalentsQualifies),
            "PARTENARIATS_B2B" => Some(CompanyNeed::PartenariatsB2b),
            "FREELANCES_PRESTATAIRES" => Some(CompanyNeed::FreelancesPrestataires),
            "VISIBILITE_MARKETING_DIGITAL" => Some(CompanyNeed::VisibiliteMarketingDigital),
            "INVESTISSEMENTS" => Some(CompanyNeed::Investissements),
            "MENTORAT" => Some(CompanyNeed::Mentorat),
            "FORUMS_SECTORIELS" => Some(CompanyNeed::ForumsSectoriels),
            "AUTRE" => Some(CompanyNeed::Autre),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySize {
    LessThan10,
    Between10And50,
    Between50And250,
    MoreThan250,
}

impl CompanySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::LessThan10 => "LESS_THAN_10",
            CompanySize::Between10And50 => "BETWEEN_10_50",
            CompanySize::Between50And250 => "BETWEEN_50_250",
            CompanySize::MoreThan250 => "MORE_THAN_250",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LESS_THAN_10" => Some(CompanySize::LessThan10),
            "BETWEEN_10_50" => Some(CompanySize::Between10And50),
            "BETWEEN_50_250" => Some(CompanySize::Between50And250),
            "MORE_THAN_250" => Some(CompanySize::MoreThan250),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractType {
    Cdi,
    Cdd,
    Freelance,
    Autre,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Cdi => "CDI",
            ContractType::Cdd => "CDD",
            ContractType::Freelance => "FREELANCE",
            ContractType::Autre => "AUTRE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CDI" => Some(ContractType::Cdi),
            "CDD" => Some(ContractType::Cdd),
            "FREELANCE" => Some(ContractType::Freelance),
            "AUTRE" => Some(ContractType::Autre),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_round_trips_through_canonical_strings() {
        for value in [
            "TECHNOLOGIE",
            "AGRO_HALIEUTIQUE",
            "COMMERCE",
            "FINANCE",
            "SANTE",
            "ÉNERGIE_DURABILITE",
            "TRANSPORT",
            "INDUSTRIE",
            "COMMERCE_DISTRIBUTION",
            "SERVICES_PROFESSIONNELS",
            "TOURISME",
            "MEDIA_DIVERTISSEMENT",
            "EDUCATION",
            "AUTRE",
        ] {
            let sector = Sector::parse(value).unwrap();
            assert_eq!(sector.as_str(), value);
        }
        assert_eq!(Sector::parse("BANQUE"), None);
    }

    #[test]
    fn company_size_rejects_lowercase() {
        assert_eq!(CompanySize::parse("less_than_10"), None);
        assert_eq!(
            CompanySize::parse("MORE_THAN_250"),
            Some(CompanySize::MoreThan250)
        );
    }

    #[test]
    fn contract_type_parses_all_variants() {
        for value in ["CDI", "CDD", "FREELANCE", "AUTRE"] {
            assert_eq!(ContractType::parse(value).unwrap().as_str(), value);
        }
    }
}
