use common_enums::CountryAlpha2;
use common_utils::pii::Email;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PaymentAddress {
    billing: Option<Address>,
    shipping: Option<Address>,
}

impl PaymentAddress {
    pub fn new(billing: Option<Address>, shipping: Option<Address>) -> Self {
        Self { billing, shipping }
    }

    pub fn get_payment_billing(&self) -> Option<&Address> {
        self.billing.as_ref()
    }

    pub fn get_billing_address(&self) -> Option<&AddressDetails> {
        self.billing.as_ref().and_then(|billing| billing.address.as_ref())
    }
}

#[derive(Clone, Default, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address: Option<AddressDetails>,
    pub phone: Option<PhoneDetails>,
    pub email: Option<Email>,
}

#[derive(Clone, Default, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AddressDetails {
    pub city: Option<String>,
    pub country: Option<CountryAlpha2>,
    pub line1: Option<Secret<String>>,
    pub line2: Option<Secret<String>>,
    pub line3: Option<Secret<String>>,
    pub zip: Option<Secret<String>>,
    pub state: Option<Secret<String>>,
    pub first_name: Option<Secret<String>>,
    pub last_name: Option<Secret<String>>,
}

impl AddressDetails {
    /// `first last`, or whichever of the two is present.
    pub fn get_full_name(&self) -> Option<Secret<String>> {
        match (self.first_name.as_ref(), self.last_name.as_ref()) {
            (Some(first), Some(last)) => {
                Some(Secret::new(format!("{} {}", first.peek(), last.peek())))
            }
            (Some(name), None) | (None, Some(name)) => Some(name.clone()),
            (None, None) => None,
        }
    }

    /// line1 and line2 joined by a single space.
    pub fn get_combined_address_line(&self) -> Option<Secret<String>> {
        match (self.line1.as_ref(), self.line2.as_ref()) {
            (Some(line1), Some(line2)) if !line2.peek().is_empty() => {
                Some(Secret::new(format!("{} {}", line1.peek(), line2.peek())))
            }
            (Some(line1), _) => Some(line1.clone()),
            (None, line2) => line2.cloned(),
        }
    }
}

#[derive(Clone, Default, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PhoneDetails {
    pub number: Option<Secret<String>>,
    pub country_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use hyperswitch_masking::ExposeInterface;

    use super::*;

    #[test]
    fn full_name_and_lines() {
        let details = AddressDetails {
            first_name: Some(Secret::new("Jim".to_string())),
            last_name: Some(Secret::new("Smith".to_string())),
            line1: Some(Secret::new("456 My Street".to_string())),
            line2: Some(Secret::new("Apt 1".to_string())),
            ..Default::default()
        };
        assert_eq!(details.get_full_name().unwrap().expose(), "Jim Smith");
        assert_eq!(
            details.get_combined_address_line().unwrap().expose(),
            "456 My Street Apt 1"
        );
    }
}
