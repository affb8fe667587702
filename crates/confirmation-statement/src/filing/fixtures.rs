use chrono::NaiveDate;

use super::company::{CompanyProfile, ConfirmationStatementDates};

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Fixed evaluation day shared by unit tests.
pub(crate) fn today() -> NaiveDate {
    date(2025, 6, 10)
}

pub(crate) fn company(company_type: &str, subtype: Option<&str>) -> CompanyProfile {
    CompanyProfile {
        company_number: "12345678".to_string(),
        company_name: "Test Company".to_string(),
        company_status: "active".to_string(),
        company_type: company_type.to_string(),
        subtype: subtype.map(str::to_string),
        date_of_creation: Some(date(2015, 3, 15)),
        confirmation_statement: Some(ConfirmationStatementDates {
            last_made_up_to: Some(date(2024, 3, 15)),
            next_made_up_to: date(2025, 3, 15),
            next_due: date(2025, 3, 29),
        }),
        sic_codes: vec!["62012".to_string()],
        registered_office_address: None,
    }
}

pub(crate) fn limited_partnership(subtype: &str) -> CompanyProfile {
    CompanyProfile {
        company_number: "LP123456".to_string(),
        ..company("limited-partnership", Some(subtype))
    }
}

pub(crate) fn with_dates(
    mut profile: CompanyProfile,
    last_made_up_to: Option<NaiveDate>,
    next_made_up_to: NaiveDate,
) -> CompanyProfile {
    profile.confirmation_statement = Some(ConfirmationStatementDates {
        last_made_up_to,
        next_made_up_to,
        next_due: next_made_up_to + chrono::Duration::days(14),
    });
    profile
}
