use serde::{Deserialize, Serialize};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttemptStatus {
    Started,
    AuthenticationFailed,
    AuthenticationPending,
    Authorized,
    AuthorizationFailed,
    Charged,
    PartialCharged,
    Voided,
    VoidInitiated,
    VoidFailed,
    CaptureInitiated,
    CaptureFailed,
    Failure,
    #[default]
    Pending,
    Unresolved,
}

impl AttemptStatus {
    /// Whether the processor accepted the operation, including pending outcomes.
    pub fn is_success(self) -> bool {
        !matches!(
            self,
            Self::AuthenticationFailed
                | Self::AuthorizationFailed
                | Self::VoidFailed
                | Self::CaptureFailed
                | Self::Failure
        )
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RefundStatus {
    Failure,
    ManualReview,
    #[default]
    Pending,
    Success,
    TransactionFailure,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaptureMethod {
    /// Post the payment authorization, the capture will be executed on the full amount immediately
    #[default]
    Automatic,
    /// The capture will happen only if the merchant triggers a Capture API request
    Manual,
    /// The capture can happen multiple times until the authorized amount is exhausted
    ManualMultiple,
    /// The capture can be scheduled to automatically get triggered at a specific date & time
    Scheduled,
    /// Handles separate auth and capture sequentially; same as `Automatic` for most connectors.
    SequentialAutomatic,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuthenticationType {
    ThreeDs,
    #[default]
    NoThreeDs,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurrencyUnit {
    Base,
    Minor,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum CardNetwork {
    Visa,
    Mastercard,
    AmericanExpress,
    #[serde(rename = "JCB")]
    #[strum(serialize = "JCB")]
    Jcb,
    DinersClub,
    Discover,
    Maestro,
    CartesBancaires,
}

/// Normalized decline vocabulary shared by every gateway adapter.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StandardErrorCode {
    IncorrectNumber,
    InvalidNumber,
    InvalidExpiryDate,
    InvalidCvc,
    ExpiredCard,
    IncorrectCvc,
    IncorrectZip,
    IncorrectAddress,
    IncorrectPin,
    CardDeclined,
    ProcessingError,
    CallIssuer,
    PickupCard,
    ConfigError,
    TestModeLiveCard,
    UnsupportedFeature,
    InvalidAmount,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum CountryAlpha2 {
    AR,
    AU,
    BR,
    CA,
    CL,
    CO,
    DE,
    ES,
    FR,
    GB,
    GR,
    IE,
    IN,
    IT,
    MX,
    NL,
    NZ,
    PE,
    SG,
    US,
    UY,
    ZA,
}

impl CountryAlpha2 {
    pub const fn to_alpha3(self) -> &'static str {
        match self {
            Self::AR => "ARG",
            Self::AU => "AUS",
            Self::BR => "BRA",
            Self::CA => "CAN",
            Self::CL => "CHL",
            Self::CO => "COL",
            Self::DE => "DEU",
            Self::ES => "ESP",
            Self::FR => "FRA",
            Self::GB => "GBR",
            Self::GR => "GRC",
            Self::IE => "IRL",
            Self::IN => "IND",
            Self::IT => "ITA",
            Self::MX => "MEX",
            Self::NL => "NLD",
            Self::NZ => "NZL",
            Self::PE => "PER",
            Self::SG => "SGP",
            Self::US => "USA",
            Self::UY => "URY",
            Self::ZA => "ZAF",
        }
    }
}

macro_rules! currencies {
    ($($(#[$meta:meta])* $variant:ident => ($numeric:literal, $exponent:literal)),+ $(,)?) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            Eq,
            Hash,
            PartialEq,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            strum::Display,
            strum::EnumString,
            strum::EnumIter,
        )]
        pub enum Currency {
            $(
                $(#[$meta])*
                #[doc = concat!("ISO-4217 ", $numeric)]
                $variant,
            )+
        }

        impl Currency {
            /// Three digit ISO-4217 numeric code, zero padded.
            pub const fn iso_4217(self) -> &'static str {
                match self {
                    $(Self::$variant => $numeric,)+
                }
            }

            pub const fn number_of_digits_after_decimal_point(self) -> u8 {
                match self {
                    $(Self::$variant => $exponent,)+
                }
            }
        }
    };
}

currencies! {
    AED => ("784", 2),
    ARS => ("032", 2),
    AUD => ("036", 2),
    BHD => ("048", 3),
    BRL => ("986", 2),
    CAD => ("124", 2),
    CHF => ("756", 2),
    CLP => ("152", 0),
    CNY => ("156", 2),
    COP => ("170", 2),
    CZK => ("203", 2),
    DKK => ("208", 2),
    EUR => ("978", 2),
    GBP => ("826", 2),
    HKD => ("344", 2),
    HUF => ("348", 2),
    IDR => ("360", 2),
    ILS => ("376", 2),
    INR => ("356", 2),
    JOD => ("400", 3),
    JPY => ("392", 0),
    KES => ("404", 2),
    KRW => ("410", 0),
    KWD => ("414", 3),
    MXN => ("484", 2),
    MYR => ("458", 2),
    NGN => ("566", 2),
    NOK => ("578", 2),
    NZD => ("554", 2),
    OMR => ("512", 3),
    PEN => ("604", 2),
    PHP => ("608", 2),
    PLN => ("985", 2),
    RON => ("946", 2),
    SAR => ("682", 2),
    SEK => ("752", 2),
    SGD => ("702", 2),
    THB => ("764", 2),
    TND => ("788", 3),
    TRY => ("949", 2),
    TWD => ("901", 2),
    UGX => ("800", 0),
    #[default]
    USD => ("840", 2),
    UYU => ("858", 2),
    VND => ("704", 0),
    ZAR => ("710", 2),
}

impl Currency {
    pub const fn is_zero_decimal_currency(self) -> bool {
        self.number_of_digits_after_decimal_point() == 0
    }

    pub const fn is_three_decimal_currency(self) -> bool {
        self.number_of_digits_after_decimal_point() == 3
    }
}
