//! Next and back paths for each screen, derived from three axes: standard company vs limited
//! partnership, agent (`acsp`) URL vs company URL, and private fund vs other partnership subtype.
//!
//! All paths returned here are templates; callers fill them with [`super::paths::JourneyIds`].

use super::company::CompanyProfile;
use super::limited_partnership::{
    is_limited_partnership_company_type, is_private_fund_limited_partnership,
};
use super::paths::{
    CONFIRMATION_PATH, CONFIRM_COMPANY_BACK_LINK, LP_BEFORE_YOU_FILE_PATH,
    LP_CHECK_YOUR_ANSWER_PATH, LP_CONFIRMATION_PATH, LP_CS_DATE_PATH, LP_PAYMENT_CALLBACK_PATH,
    LP_REVIEW_PATH, LP_SIC_CODE_SUMMARY_PATH, PAYMENT_CALLBACK_PATH, REVIEW_PATH, TASK_LIST_PATH,
    TRADING_STATUS_PATH,
};
use crate::session::{AcspSessionData, CsDateDecision};

/// An agent journey is recognised purely from the request path.
pub fn is_acsp_journey(path: &str) -> bool {
    path.to_ascii_lowercase().contains("acsp")
}

pub fn review_path(is_acsp_journey: bool) -> &'static str {
    if is_acsp_journey {
        LP_REVIEW_PATH
    } else {
        REVIEW_PATH
    }
}

pub fn confirmation_path(is_acsp_journey: bool) -> &'static str {
    if is_acsp_journey {
        LP_CONFIRMATION_PATH
    } else {
        CONFIRMATION_PATH
    }
}

pub fn payment_callback_path(is_acsp_journey: bool) -> &'static str {
    if is_acsp_journey {
        LP_PAYMENT_CALLBACK_PATH
    } else {
        PAYMENT_CALLBACK_PATH
    }
}

/// First screen after the transaction and submission have been created.
pub fn after_create_transaction_path(company: &CompanyProfile) -> &'static str {
    if is_limited_partnership_company_type(company) {
        LP_BEFORE_YOU_FILE_PATH
    } else {
        TRADING_STATUS_PATH
    }
}

/// Back link for the agent review screen.
///
/// Private fund partnerships never see the SIC code summary, so they step back to whichever CS
/// date screen they answered last. Everyone else, and anyone without a recorded answer, steps back
/// to the SIC code summary.
pub fn acsp_back_path(acsp: Option<&AcspSessionData>, company: &CompanyProfile) -> &'static str {
    if !is_private_fund_limited_partnership(company) {
        return LP_SIC_CODE_SUMMARY_PATH;
    }

    match acsp.map(|data| data.cs_date) {
        Some(CsDateDecision::ChangedTo(_)) => LP_CHECK_YOUR_ANSWER_PATH,
        Some(CsDateDecision::NotChanged) => LP_CS_DATE_PATH,
        Some(CsDateDecision::Undecided) | None => LP_SIC_CODE_SUMMARY_PATH,
    }
}

/// Screens of the limited partnership agent journey, in visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LpScreen {
    BeforeYouFile,
    CsDate,
    CheckYourAnswer,
    SicCodeSummary,
    Review,
    Confirmation,
}

impl LpScreen {
    pub const fn path(self) -> &'static str {
        match self {
            Self::BeforeYouFile => LP_BEFORE_YOU_FILE_PATH,
            Self::CsDate => LP_CS_DATE_PATH,
            Self::CheckYourAnswer => LP_CHECK_YOUR_ANSWER_PATH,
            Self::SicCodeSummary => LP_SIC_CODE_SUMMARY_PATH,
            Self::Review => LP_REVIEW_PATH,
            Self::Confirmation => LP_CONFIRMATION_PATH,
        }
    }
}

/// Routing view over one company and its agent answers.
#[derive(Debug, Clone, Copy)]
pub struct LpJourney<'a> {
    company: &'a CompanyProfile,
    acsp: Option<&'a AcspSessionData>,
}

impl<'a> LpJourney<'a> {
    pub fn new(company: &'a CompanyProfile, acsp: Option<&'a AcspSessionData>) -> Self {
        Self { company, acsp }
    }

    fn decision(&self) -> CsDateDecision {
        self.acsp.map(|data| data.cs_date).unwrap_or_default()
    }

    fn after_date_answered(&self) -> LpScreen {
        if is_private_fund_limited_partnership(self.company) {
            LpScreen::Review
        } else {
            LpScreen::SicCodeSummary
        }
    }

    pub fn next(&self, from: LpScreen) -> LpScreen {
        match from {
            LpScreen::BeforeYouFile => LpScreen::CsDate,
            LpScreen::CsDate => match self.decision() {
                CsDateDecision::Undecided => LpScreen::CsDate,
                CsDateDecision::ChangedTo(_) => LpScreen::CheckYourAnswer,
                CsDateDecision::NotChanged => self.after_date_answered(),
            },
            LpScreen::CheckYourAnswer => self.after_date_answered(),
            LpScreen::SicCodeSummary => LpScreen::Review,
            LpScreen::Review | LpScreen::Confirmation => LpScreen::Confirmation,
        }
    }

    pub fn back(&self, from: LpScreen) -> Option<&'static str> {
        let path = match from {
            LpScreen::BeforeYouFile => CONFIRM_COMPANY_BACK_LINK,
            LpScreen::CsDate => LP_BEFORE_YOU_FILE_PATH,
            LpScreen::CheckYourAnswer => LP_CS_DATE_PATH,
            LpScreen::SicCodeSummary => match self.decision() {
                CsDateDecision::ChangedTo(_) => LP_CHECK_YOUR_ANSWER_PATH,
                CsDateDecision::Undecided | CsDateDecision::NotChanged => LP_CS_DATE_PATH,
            },
            LpScreen::Review => acsp_back_path(self.acsp, self.company),
            LpScreen::Confirmation => return None,
        };
        Some(path)
    }

    /// Screen the user must be sent to instead of `screen`, if earlier answers are missing.
    ///
    /// An undecided CS date always forces the CS date screen; check-your-answer additionally needs
    /// a changed date.
    pub fn redirect_for(&self, screen: LpScreen) -> Option<LpScreen> {
        let Some(acsp) = self.acsp else {
            return (screen != LpScreen::BeforeYouFile).then_some(LpScreen::BeforeYouFile);
        };

        match screen {
            LpScreen::BeforeYouFile | LpScreen::Confirmation => None,
            LpScreen::CsDate => (!acsp.before_you_file_check).then_some(LpScreen::BeforeYouFile),
            _ if !acsp.before_you_file_check => Some(LpScreen::BeforeYouFile),
            LpScreen::CheckYourAnswer => match acsp.cs_date {
                CsDateDecision::ChangedTo(_) => None,
                CsDateDecision::Undecided | CsDateDecision::NotChanged => Some(LpScreen::CsDate),
            },
            LpScreen::SicCodeSummary | LpScreen::Review => {
                (!acsp.cs_date.is_decided()).then_some(LpScreen::CsDate)
            }
        }
    }
}

/// Screens of the standard company journey after the transaction exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardScreen {
    TradingStatus,
    TaskList,
    Review,
    Confirmation,
}

impl StandardScreen {
    pub const fn path(self) -> &'static str {
        match self {
            Self::TradingStatus => TRADING_STATUS_PATH,
            Self::TaskList => TASK_LIST_PATH,
            Self::Review => REVIEW_PATH,
            Self::Confirmation => CONFIRMATION_PATH,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::TradingStatus => Self::TaskList,
            Self::TaskList => Self::Review,
            Self::Review | Self::Confirmation => Self::Confirmation,
        }
    }

    pub const fn back(self) -> Option<&'static str> {
        match self {
            Self::TradingStatus => Some(CONFIRM_COMPANY_BACK_LINK),
            Self::TaskList => Some(TRADING_STATUS_PATH),
            Self::Review => Some(TASK_LIST_PATH),
            Self::Confirmation => None,
        }
    }
}
