use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Company type value shared by every limited partnership subtype.
pub const LIMITED_PARTNERSHIP_COMPANY_TYPE: &str = "limited-partnership";

/// Snapshot of the registry's company profile resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub company_number: String,
    pub company_name: String,
    #[serde(default)]
    pub company_status: String,
    #[serde(rename = "type")]
    pub company_type: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub date_of_creation: Option<NaiveDate>,
    #[serde(default)]
    pub confirmation_statement: Option<ConfirmationStatementDates>,
    #[serde(default)]
    pub sic_codes: Vec<String>,
    #[serde(default)]
    pub registered_office_address: Option<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationStatementDates {
    #[serde(default)]
    pub last_made_up_to: Option<NaiveDate>,
    pub next_made_up_to: NaiveDate,
    pub next_due: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub address_line_one: String,
    #[serde(default)]
    pub address_line_two: Option<String>,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// The four recognised limited partnership subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitedPartnershipSubtype {
    #[serde(rename = "limited-partnership")]
    Lp,
    #[serde(rename = "scottish-limited-partnership")]
    Slp,
    #[serde(rename = "private-fund-limited-partnership")]
    Pflp,
    #[serde(rename = "scottish-private-fund-limited-partnership")]
    Spflp,
}

impl LimitedPartnershipSubtype {
    pub const fn ordered() -> [Self; 4] {
        [Self::Lp, Self::Slp, Self::Pflp, Self::Spflp]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lp => "limited-partnership",
            Self::Slp => "scottish-limited-partnership",
            Self::Pflp => "private-fund-limited-partnership",
            Self::Spflp => "scottish-private-fund-limited-partnership",
        }
    }

    pub fn from_raw(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|subtype| subtype.as_str() == raw)
    }

    /// Private fund partnerships skip the SIC code screens.
    pub const fn is_private_fund(self) -> bool {
        matches!(self, Self::Pflp | Self::Spflp)
    }
}

impl CompanyProfile {
    pub fn has_limited_partnership_type(&self) -> bool {
        self.company_type == LIMITED_PARTNERSHIP_COMPANY_TYPE
    }

    /// Resolved subtype, present only for a limited partnership with a recognised subtype.
    pub fn limited_partnership_subtype(&self) -> Option<LimitedPartnershipSubtype> {
        if !self.has_limited_partnership_type() {
            return None;
        }

        self.subtype
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .and_then(LimitedPartnershipSubtype::from_raw)
    }

    pub fn next_made_up_to(&self) -> Option<NaiveDate> {
        self.confirmation_statement
            .map(|statement| statement.next_made_up_to)
    }

    pub fn last_made_up_to(&self) -> Option<NaiveDate> {
        self.confirmation_statement
            .and_then(|statement| statement.last_made_up_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_registry_payload() {
        let payload = r#"{
            "companyNumber": "LP123456",
            "companyName": "Test Partners",
            "companyStatus": "active",
            "type": "limited-partnership",
            "subtype": "private-fund-limited-partnership",
            "confirmationStatement": {
                "lastMadeUpTo": "2024-03-15",
                "nextMadeUpTo": "2025-03-15",
                "nextDue": "2025-03-29"
            },
            "sicCodes": ["64205"]
        }"#;

        let profile: CompanyProfile = serde_json::from_str(payload).expect("profile parses");
        assert_eq!(
            profile.limited_partnership_subtype(),
            Some(LimitedPartnershipSubtype::Pflp)
        );
        assert_eq!(
            profile.last_made_up_to(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert!(profile.registered_office_address.is_none());
    }

    #[test]
    fn subtype_ignored_for_other_company_types() {
        let profile = CompanyProfile {
            company_number: "12345678".to_string(),
            company_name: "Test Ltd".to_string(),
            company_status: "active".to_string(),
            company_type: "ltd".to_string(),
            subtype: Some("limited-partnership".to_string()),
            date_of_creation: None,
            confirmation_statement: None,
            sic_codes: Vec::new(),
            registered_office_address: None,
        };
        assert_eq!(profile.limited_partnership_subtype(), None);
        assert_eq!(profile.next_made_up_to(), None);
    }

    #[test]
    fn private_fund_subtypes() {
        let private: Vec<_> = LimitedPartnershipSubtype::ordered()
            .into_iter()
            .filter(|subtype| subtype.is_private_fund())
            .collect();
        assert_eq!(
            private,
            vec![
                LimitedPartnershipSubtype::Pflp,
                LimitedPartnershipSubtype::Spflp
            ]
        );
    }
}
