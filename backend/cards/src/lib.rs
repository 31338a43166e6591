pub mod validate;

pub use validate::{CardNumber, CardNumberStrategy, CardNumberValidationErr};
