use crate::filing::Locale;

/// Field-level messages shown when a form is re-rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMessage {
    TradingStatusMissing,
    BeforeYouFileUnchecked,
    ChangeCsDateMissing,
    ReviewConfirmationMissing,
    ConfirmAllInformationMissing,
    ConfirmLawfulActionsMissing,
    SicCodeInvalid,
    SicCodeDuplicate,
    SicCodeLimitReached,
    SicCodeLastRemaining,
    RegisteredEmailChoiceMissing,
    RegisteredEmailInvalid,
}

impl FormMessage {
    pub const fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::TradingStatusMissing, Locale::En) => "Select yes if the company is trading",
            (Self::TradingStatusMissing, Locale::Cy) => "Dewiswch ie os yw'r cwmni'n masnachu",
            (Self::BeforeYouFileUnchecked, Locale::En) => {
                "Confirm that you have checked the partnership information"
            }
            (Self::BeforeYouFileUnchecked, Locale::Cy) => {
                "Cadarnhewch eich bod wedi gwirio gwybodaeth y bartneriaeth"
            }
            (Self::ChangeCsDateMissing, Locale::En) => {
                "Select yes if you want to change the confirmation statement date"
            }
            (Self::ChangeCsDateMissing, Locale::Cy) => {
                "Dewiswch ie os ydych am newid dyddiad y datganiad cadarnhau"
            }
            (Self::ReviewConfirmationMissing, Locale::En) => {
                "Confirm that you have reviewed the information"
            }
            (Self::ReviewConfirmationMissing, Locale::Cy) => {
                "Cadarnhewch eich bod wedi adolygu'r wybodaeth"
            }
            (Self::ConfirmAllInformationMissing, Locale::En) => {
                "Confirm that all information required to be delivered has been delivered"
            }
            (Self::ConfirmAllInformationMissing, Locale::Cy) => {
                "Cadarnhewch fod yr holl wybodaeth ofynnol wedi'i chyflwyno"
            }
            (Self::ConfirmLawfulActionsMissing, Locale::En) => {
                "Confirm that the intended future activities of the partnership are lawful"
            }
            (Self::ConfirmLawfulActionsMissing, Locale::Cy) => {
                "Cadarnhewch fod gweithgareddau arfaethedig y bartneriaeth yn gyfreithlon"
            }
            (Self::SicCodeInvalid, Locale::En) => "Enter a valid 5 digit SIC code",
            (Self::SicCodeInvalid, Locale::Cy) => "Rhowch god SIC dilys 5 digid",
            (Self::SicCodeDuplicate, Locale::En) => "This SIC code has already been added",
            (Self::SicCodeDuplicate, Locale::Cy) => "Mae'r cod SIC hwn eisoes wedi'i ychwanegu",
            (Self::SicCodeLimitReached, Locale::En) => "You can only add up to 4 SIC codes",
            (Self::SicCodeLimitReached, Locale::Cy) => "Gallwch ychwanegu hyd at 4 cod SIC yn unig",
            (Self::SicCodeLastRemaining, Locale::En) => {
                "The partnership must have at least one SIC code"
            }
            (Self::SicCodeLastRemaining, Locale::Cy) => {
                "Rhaid i'r bartneriaeth gael o leiaf un cod SIC"
            }
            (Self::RegisteredEmailChoiceMissing, Locale::En) => {
                "Select yes if the registered email address is correct"
            }
            (Self::RegisteredEmailChoiceMissing, Locale::Cy) => {
                "Dewiswch ie os yw'r cyfeiriad e-bost cofrestredig yn gywir"
            }
            (Self::RegisteredEmailInvalid, Locale::En) => {
                "Enter an email address in the correct format, like name@example.com"
            }
            (Self::RegisteredEmailInvalid, Locale::Cy) => {
                "Rhowch gyfeiriad e-bost yn y fformat cywir, fel enw@enghraifft.com"
            }
        }
    }
}
