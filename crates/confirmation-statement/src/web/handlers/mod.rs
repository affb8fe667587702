//! One module per screen; each handler returns a redirect or a [`super::page::PageView`].

pub(crate) mod acsp;
pub(crate) mod confirm_company;
pub(crate) mod confirmation;
pub(crate) mod payment;
pub(crate) mod registered_email;
pub(crate) mod review;
pub(crate) mod stop_page;
pub(crate) mod task_list;
pub(crate) mod trading_status;
pub(crate) mod transaction;

use super::error::WebError;
use super::state::FilingState;
use crate::filing::CompanyProfile;
use crate::session::SessionData;

/// Company profile for the journey, preferring the copy stored when the company was confirmed.
pub(crate) async fn journey_company(
    state: &FilingState,
    session: &SessionData,
    company_number: &str,
) -> Result<CompanyProfile, WebError> {
    if let Some(profile) = session
        .company_profile()
        .filter(|profile| profile.company_number == company_number)
    {
        return Ok(profile.clone());
    }
    Ok(state
        .company_profiles
        .get_company_profile(company_number)
        .await?)
}

/// A checkbox counts as ticked when the browser sent any non-empty value for it.
pub(crate) fn is_ticked(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.trim().is_empty())
}

/// Normalised yes/no radio answer.
pub(crate) fn yes_no(value: Option<&str>) -> Option<bool> {
    match value.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("yes") => Some(true),
        Some("no") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radio_answers_are_case_insensitive() {
        assert_eq!(yes_no(Some("YES")), Some(true));
        assert_eq!(yes_no(Some(" no ")), Some(false));
        assert_eq!(yes_no(Some("maybe")), None);
        assert_eq!(yes_no(None), None);
    }

    #[test]
    fn blank_checkbox_is_not_ticked() {
        assert!(is_ticked(Some("true")));
        assert!(!is_ticked(Some("")));
        assert!(!is_ticked(None));
    }
}
