pub mod consts;
pub mod errors;
pub mod ext_traits;
pub mod fp_utils;
pub mod pii;
pub mod request;
pub mod scrubbing;
pub mod types;

pub use request::{Method, Request, RequestBuilder, RequestContent};
pub use types::{
    AmountConvertor, FloatMajorUnit, FloatMajorUnitForConnector, MinorUnit, MinorUnitForConnector,
    StringMajorUnit, StringMajorUnitForConnector, StringMinorUnit, StringMinorUnitForConnector,
};
