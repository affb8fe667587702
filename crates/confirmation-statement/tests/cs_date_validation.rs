use chrono::NaiveDate;
use confirmation_statement::filing::cs_date::is_today_before_file_cs_date;
use confirmation_statement::filing::{
    validate_date_selector_value, CompanyProfile, ConfirmationStatementDates, CsDateError,
    CsDateValue, Locale,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn company(last_made_up_to: Option<NaiveDate>, next_made_up_to: NaiveDate) -> CompanyProfile {
    CompanyProfile {
        company_number: "00006400".to_string(),
        company_name: "Example Ltd".to_string(),
        company_status: "active".to_string(),
        company_type: "ltd".to_string(),
        subtype: None,
        date_of_creation: None,
        confirmation_statement: Some(ConfirmationStatementDates {
            last_made_up_to,
            next_made_up_to,
            next_due: next_made_up_to,
        }),
        sic_codes: Vec::new(),
        registered_office_address: None,
    }
}

fn verdict(value: CsDateValue, profile: &CompanyProfile, today: NaiveDate) -> Option<&'static str> {
    validate_date_selector_value(Locale::En, &value, profile, today)
}

#[test]
fn impossible_calendar_date_is_invalid() {
    let profile = company(None, day(2025, 3, 15));
    assert_eq!(
        verdict(CsDateValue::new("2025", "02", "31"), &profile, day(2025, 6, 1)),
        Some(CsDateError::InvalidDate.message(Locale::En))
    );
}

#[test]
fn blank_input_reports_no_data() {
    let profile = company(None, day(2025, 3, 15));
    assert_eq!(
        verdict(CsDateValue::default(), &profile, day(2025, 6, 1)),
        Some(CsDateError::NoDataEntered.message(Locale::En))
    );
}

#[test]
fn reference_switches_once_filing_is_due() {
    let profile = company(Some(day(2020, 3, 15)), day(2021, 3, 15));

    let after_due = day(2021, 6, 1);
    assert!(!is_today_before_file_cs_date(&profile, after_due));
    assert_eq!(
        verdict(CsDateValue::new("2021", "03", "15"), &profile, after_due),
        Some(CsDateError::DuplicateDate.message(Locale::En))
    );
    assert_eq!(
        verdict(CsDateValue::new("2021", "03", "14"), &profile, after_due),
        Some(CsDateError::DateBeforeLastStatement.message(Locale::En))
    );

    let before_due = day(2021, 1, 10);
    assert!(is_today_before_file_cs_date(&profile, before_due));
    assert_eq!(
        verdict(CsDateValue::new("2021", "01", "05"), &profile, before_due),
        None
    );
}

#[test]
fn date_between_reference_and_today_passes() {
    let profile = company(Some(day(2024, 3, 15)), day(2025, 3, 15));
    assert_eq!(
        verdict(CsDateValue::new("2025", "5", "20"), &profile, day(2025, 6, 1)),
        None
    );
    assert_eq!(
        verdict(CsDateValue::new("2025", "6", "2"), &profile, day(2025, 6, 1)),
        Some(CsDateError::DateInFuture.message(Locale::En))
    );
}
