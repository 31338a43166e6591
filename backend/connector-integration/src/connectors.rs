pub mod macros;

pub mod checkout;
pub use self::checkout::Checkout;

pub mod decidir;
pub use self::decidir::Decidir;

pub mod elavon;
pub use self::elavon::Elavon;

pub mod eurobank;
pub use self::eurobank::Eurobank;

pub mod eway;
pub use self::eway::Eway;

pub mod firstdata;
pub use self::firstdata::Firstdata;

pub mod hps;
pub use self::hps::Hps;

pub mod iveri;
pub use self::iveri::Iveri;

pub mod litle;
pub use self::litle::Litle;

pub mod priority;
pub use self::priority::Priority;

pub mod safecharge;
pub use self::safecharge::Safecharge;

pub mod simetrik;
pub use self::simetrik::Simetrik;
