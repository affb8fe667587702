//! Company-type resolution for limited partnerships and their per-subtype feature gates.

use chrono::NaiveDate;
use tracing::info;

use super::company::{CompanyProfile, LimitedPartnershipSubtype};
use crate::config::FeatureFlags;
use crate::telemetry::sanitise_for_log;

pub fn is_limited_partnership_company_type(company: &CompanyProfile) -> bool {
    company.limited_partnership_subtype().is_some()
}

fn has_subtype(company: &CompanyProfile, subtype: LimitedPartnershipSubtype) -> bool {
    company.limited_partnership_subtype() == Some(subtype)
}

pub fn is_standard_limited_partnership_company_type(company: &CompanyProfile) -> bool {
    has_subtype(company, LimitedPartnershipSubtype::Lp)
}

pub fn is_slp_limited_partnership_company_type(company: &CompanyProfile) -> bool {
    has_subtype(company, LimitedPartnershipSubtype::Slp)
}

pub fn is_pflp_limited_partnership_company_type(company: &CompanyProfile) -> bool {
    has_subtype(company, LimitedPartnershipSubtype::Pflp)
}

pub fn is_spflp_limited_partnership_company_type(company: &CompanyProfile) -> bool {
    has_subtype(company, LimitedPartnershipSubtype::Spflp)
}

pub fn is_private_fund_limited_partnership(company: &CompanyProfile) -> bool {
    company
        .limited_partnership_subtype()
        .is_some_and(LimitedPartnershipSubtype::is_private_fund)
}

/// Whether the subtype-specific start date has been reached on `today`.
pub fn is_limited_partnership_subtype_feature_flag_enabled(
    company: &CompanyProfile,
    flags: &FeatureFlags,
    today: NaiveDate,
) -> bool {
    let gate = match company.limited_partnership_subtype() {
        Some(LimitedPartnershipSubtype::Lp) => &flags.lp_subtype_start,
        Some(LimitedPartnershipSubtype::Slp) => &flags.slp_subtype_start,
        Some(LimitedPartnershipSubtype::Pflp) => &flags.pflp_subtype_start,
        Some(LimitedPartnershipSubtype::Spflp) => &flags.spflp_subtype_start,
        None => return false,
    };
    gate.is_active_on(today)
}

/// A company typed as a limited partnership must file on paper unless its subtype is recognised
/// and that subtype's gate is open. An unknown subtype and a closed gate land in the same place.
pub fn should_redirect_to_paper_filing_for_invalid_lp(
    company: &CompanyProfile,
    flags: &FeatureFlags,
    today: NaiveDate,
) -> bool {
    if !company.has_limited_partnership_type() {
        return false;
    }

    let redirect = !is_limited_partnership_company_type(company)
        || !is_limited_partnership_subtype_feature_flag_enabled(company, flags, today);
    if redirect {
        info!(
            company_number = %sanitise_for_log(&company.company_number),
            subtype = %sanitise_for_log(company.subtype.as_deref().unwrap_or_default()),
            "limited partnership not open for online filing, redirecting to paper"
        );
    }
    redirect
}
