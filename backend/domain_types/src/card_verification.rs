//! Normalized address (AVS) and card security code (CVV) verification results.
//!
//! Processors answer with the single letter codes issued by the card networks; the
//! tables below turn those letters into a message plus street/postal match flags.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchIndicator {
    /// Matched
    Y,
    /// Did not match
    N,
    /// Verification not supported by the issuer
    X,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvsResult {
    pub code: Option<String>,
    pub message: Option<String>,
    pub street_match: Option<MatchIndicator>,
    pub postal_match: Option<MatchIndicator>,
}

const AVS_MESSAGES: &[(&str, &str)] = &[
    ("A", "Street address matches, but postal code does not match."),
    ("B", "Street address matches, but postal code not verified."),
    ("C", "Street address and postal code do not match."),
    ("D", "Street address and postal code match."),
    ("E", "AVS data is invalid or AVS is not allowed for this card type."),
    ("F", "Card member's name does not match, but billing postal code matches."),
    ("G", "Non-U.S. issuing bank does not support AVS."),
    ("H", "Card member's name does not match. Street address and postal code match."),
    ("I", "Address not verified."),
    ("J", "Card member's name, billing address, and postal code match. Shipping information verified and chargeback protection guaranteed through the Fraud Protection Program."),
    ("K", "Card member's name matches but billing address and billing postal code do not match."),
    ("L", "Card member's name and billing postal code match, but billing address does not match."),
    ("M", "Street address and postal code match."),
    ("N", "Street address and postal code do not match."),
    ("O", "Card member's name and billing address match, but billing postal code does not match."),
    ("P", "Postal code matches, but street address not verified."),
    ("Q", "Card member's name, billing address, and postal code match. Shipping information verified but chargeback protection not guaranteed."),
    ("R", "System unavailable."),
    ("S", "U.S.-issuing bank does not support AVS."),
    ("T", "Card member's name does not match, but street address matches."),
    ("U", "Address information unavailable."),
    ("V", "Card member's name, billing address, and billing postal code match."),
    ("W", "Street address does not match, but 9-digit postal code matches."),
    ("X", "Street address and 9-digit postal code match."),
    ("Y", "Street address and 5-digit postal code match."),
    ("Z", "Street address does not match, but 5-digit postal code matches."),
];

fn street_match_for(code: &str) -> Option<MatchIndicator> {
    match code {
        "A" | "B" | "D" | "H" | "J" | "M" | "O" | "Q" | "T" | "V" | "X" | "Y" => {
            Some(MatchIndicator::Y)
        }
        "C" | "K" | "L" | "N" | "W" | "Z" => Some(MatchIndicator::N),
        "G" | "S" => Some(MatchIndicator::X),
        _ => None,
    }
}

fn postal_match_for(code: &str) -> Option<MatchIndicator> {
    match code {
        "D" | "H" | "F" | "J" | "L" | "M" | "P" | "Q" | "V" | "W" | "X" | "Y" | "Z" => {
            Some(MatchIndicator::Y)
        }
        "A" | "C" | "K" | "N" | "O" => Some(MatchIndicator::N),
        "G" | "S" => Some(MatchIndicator::X),
        _ => None,
    }
}

impl AvsResult {
    /// Builds the result for a network AVS letter. Blank codes yield `None`.
    pub fn from_code(code: Option<&str>) -> Option<Self> {
        let code = code.map(str::trim).filter(|code| !code.is_empty())?;
        let code = code.to_ascii_uppercase();
        Some(Self {
            message: AVS_MESSAGES
                .iter()
                .find(|(letter, _)| *letter == code)
                .map(|(_, message)| (*message).to_string()),
            street_match: street_match_for(&code),
            postal_match: postal_match_for(&code),
            code: Some(code),
        })
    }

    /// For processors that report street and postal checks separately instead
    /// of a combined network letter.
    pub fn from_matches(
        street_match: Option<MatchIndicator>,
        postal_match: Option<MatchIndicator>,
    ) -> Option<Self> {
        let code = match (street_match, postal_match) {
            (Some(MatchIndicator::Y), Some(MatchIndicator::Y)) => "Y",
            (Some(MatchIndicator::Y), Some(MatchIndicator::N)) => "A",
            (Some(MatchIndicator::N), Some(MatchIndicator::Y)) => "Z",
            (Some(MatchIndicator::N), Some(MatchIndicator::N)) => "N",
            (Some(MatchIndicator::Y), None) => "B",
            (None, Some(MatchIndicator::Y)) => "P",
            (None, None) => return None,
            _ => "U",
        };
        Self::from_code(Some(code)).map(|result| Self {
            street_match,
            postal_match,
            ..result
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvvResult {
    pub code: String,
    pub message: Option<String>,
}

const CVV_MESSAGES: &[(&str, &str)] = &[
    ("D", "CVV check flagged transaction as suspicious"),
    ("I", "CVV failed data validation check"),
    ("M", "CVV matches"),
    ("N", "CVV does not match"),
    ("P", "CVV not processed"),
    ("S", "CVV should have been present"),
    ("U", "CVV request unable to be processed by issuer"),
    ("X", "CVV check not supported for card"),
];

impl CvvResult {
    /// Builds the result for a network CVV letter. Blank codes yield `None`.
    pub fn from_code(code: Option<&str>) -> Option<Self> {
        let code = code.map(str::trim).filter(|code| !code.is_empty())?;
        let code = code.to_ascii_uppercase();
        Some(Self {
            message: CVV_MESSAGES
                .iter()
                .find(|(letter, _)| *letter == code)
                .map(|(_, message)| (*message).to_string()),
            code,
        })
    }
}
