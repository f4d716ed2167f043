use serde::{Deserialize, Serialize};

use super::vat::french_vat_number;

/// Country code written into the form when a registry result is picked
pub const REGISTRY_COUNTRY_CODE: &str = "FR";

/// Head office block of a registry result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Siege {
    #[serde(default)]
    pub siret: Option<String>,
    #[serde(default)]
    pub numero_voie: Option<String>,
    #[serde(default)]
    pub type_voie: Option<String>,
    #[serde(default)]
    pub libelle_voie: Option<String>,
    #[serde(default)]
    pub code_postal: Option<String>,
    #[serde(default)]
    pub libelle_commune: Option<String>,
}

/// One company returned by `recherche-entreprises.api.gouv.fr/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanySearchResult {
    #[serde(default)]
    pub nom_complet: String,
    #[serde(default)]
    pub siren: String,
    #[serde(default)]
    pub siege: Siege,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanySearchResponse {
    #[serde(default)]
    pub results: Vec<CompanySearchResult>,
}

/// Field values written into a party block of the invoice form
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyFill {
    pub name: String,
    pub street: String,
    pub zip_code: String,
    pub city: String,
    pub country_code: String,
    pub siret: String,
    pub vat_id: Option<String>,
}

impl CompanySearchResult {
    /// Row label in the results dropdown
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.nom_complet, self.siren)
    }

    /// `numero type libelle`, missing parts left blank, trimmed
    pub fn street_line(&self) -> String {
        let part = |p: &Option<String>| p.clone().unwrap_or_default();
        format!(
            "{} {} {}",
            part(&self.siege.numero_voie),
            part(&self.siege.type_voie),
            part(&self.siege.libelle_voie)
        )
        .trim()
        .to_string()
    }

    pub fn to_fill(&self) -> CompanyFill {
        CompanyFill {
            name: self.nom_complet.clone(),
            street: self.street_line(),
            zip_code: self.siege.code_postal.clone().unwrap_or_default(),
            city: self.siege.libelle_commune.clone().unwrap_or_default(),
            country_code: REGISTRY_COUNTRY_CODE.to_string(),
            siret: self.siege.siret.clone().unwrap_or_default(),
            vat_id: french_vat_number(&self.siren),
        }
    }
}
