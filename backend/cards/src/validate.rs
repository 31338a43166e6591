use std::{fmt, ops::Deref, str::FromStr};

use common_enums::CardNetwork;
use common_utils::consts::{MAX_CARD_NUMBER_LENGTH, MIN_CARD_NUMBER_LENGTH};
use hyperswitch_masking::{PeekInterface, Secret, Strategy, WithType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

static CARD_NETWORK_REGEX: Lazy<Vec<(CardNetwork, Regex)>> = Lazy::new(|| {
    [
        (CardNetwork::Visa, r"^4"),
        (CardNetwork::AmericanExpress, r"^3[47]"),
        (CardNetwork::Jcb, r"^35(2[89]|[3-8])"),
        (CardNetwork::DinersClub, r"^3(0[0-5]|[689])"),
        (CardNetwork::Discover, r"^(6011|64[4-9]|65)"),
        (CardNetwork::Maestro, r"^(5018|5020|5038|5893|6304|6759|676[1-3])"),
        (
            CardNetwork::Mastercard,
            r"^(5[1-5]|2(2(2[1-9]|[3-9])|[3-6]|7([01]|20)))",
        ),
    ]
    .into_iter()
    .filter_map(|(network, pattern)| Regex::new(pattern).ok().map(|regex| (network, regex)))
    .collect()
});

#[derive(Debug, Deserialize, Serialize, Error)]
#[error("{0}")]
pub struct CardNumberValidationErr(&'static str);

/// Card number, Luhn checked on construction
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CardNumber(Secret<String, CardNumberStrategy>);

impl CardNumber {
    pub fn get_card_isin(&self) -> String {
        self.0.peek().chars().take(6).collect()
    }

    pub fn get_last4(&self) -> String {
        let digits = self.0.peek();
        digits
            .chars()
            .skip(digits.len().saturating_sub(4))
            .collect()
    }

    /// The unmasked digits, for placing on the wire.
    pub fn get_card_no(&self) -> String {
        self.0.peek().clone()
    }

    pub fn get_card_network(&self) -> Option<CardNetwork> {
        let digits = self.0.peek();
        CARD_NETWORK_REGEX
            .iter()
            .find(|(_, regex)| regex.is_match(digits))
            .map(|(network, _)| *network)
    }
}

impl FromStr for CardNumber {
    type Err = CardNumberValidationErr;

    fn from_str(card_number: &str) -> Result<Self, Self::Err> {
        let digits: String = card_number.split_whitespace().collect();
        if !(MIN_CARD_NUMBER_LENGTH..=MAX_CARD_NUMBER_LENGTH).contains(&digits.len()) {
            return Err(CardNumberValidationErr("invalid card number length"));
        }
        if !luhn(&digits) {
            return Err(CardNumberValidationErr("card number failed luhn check"));
        }
        Ok(Self(Secret::new(digits)))
    }
}

impl TryFrom<String> for CardNumber {
    type Error = CardNumberValidationErr;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl Deref for CardNumber {
    type Target = Secret<String, CardNumberStrategy>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CardNumber {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Returns false for any non digit character.
pub fn luhn(number: &str) -> bool {
    let mut sum = 0;
    for (index, ch) in number.chars().rev().enumerate() {
        let Some(mut digit) = ch.to_digit(10) else {
            return false;
        };
        if index % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    sum % 10 == 0
}

/// Shows the first six and the last four digits.
pub enum CardNumberStrategy {}

impl<T> Strategy<T> for CardNumberStrategy
where
    T: AsRef<str>,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();

        if val_str.len() < 15 || val_str.len() > 19 {
            return WithType::fmt(val, f);
        }

        if let Some(value) = val_str.get(..6) {
            write!(f, "{}{}", value, "*".repeat(val_str.len() - 6))
        } else {
            WithType::fmt(val, f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_card_number() {
        let card = CardNumber::from_str("4111 1111 1111 1111").unwrap();
        assert_eq!(card.get_card_no(), "4111111111111111");
        assert_eq!(card.get_card_isin(), "411111");
        assert_eq!(card.get_last4(), "1111");
    }

    #[test]
    fn invalid_luhn_is_rejected() {
        assert!(CardNumber::from_str("4111111111111112").is_err());
        assert!(CardNumber::from_str("41111").is_err());
        assert!(CardNumber::from_str("4111a11111111111").is_err());
    }

    #[test]
    fn debug_output_is_masked() {
        let card = CardNumber::from_str("4242424242424242").unwrap();
        assert_eq!(format!("{:?}", card.0), "424242**********");
    }

    #[test]
    fn detects_card_networks() {
        let network = |number: &str| CardNumber::from_str(number).unwrap().get_card_network();
        assert_eq!(network("4111111111111111"), Some(CardNetwork::Visa));
        assert_eq!(network("5555555555554444"), Some(CardNetwork::Mastercard));
        assert_eq!(network("378282246310005"), Some(CardNetwork::AmericanExpress));
        assert_eq!(network("6011111111111117"), Some(CardNetwork::Discover));
        assert_eq!(network("3530111333300000"), Some(CardNetwork::Jcb));
        assert_eq!(network("30569309025904"), Some(CardNetwork::DinersClub));
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: Result<CardNumber, _> = serde_json::from_str("\"4000056655665556\"");
        assert!(ok.is_ok());
        let err: Result<CardNumber, _> = serde_json::from_str("\"4000056655665557\"");
        assert!(err.is_err());
    }
}
