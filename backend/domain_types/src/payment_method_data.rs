use cards::CardNumber;
use common_enums::CardNetwork;
use error_stack::report;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::errors::ConnectorError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodData {
    Card(Card),
    /// Card previously stored at the processor, referenced by its token.
    CardToken(CardToken),
}

#[derive(Default, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub card_number: CardNumber,
    pub card_exp_month: Secret<String>,
    pub card_exp_year: Secret<String>,
    pub card_cvc: Secret<String>,
    pub card_holder_name: Option<Secret<String>>,
    pub card_network: Option<CardNetwork>,
}

#[derive(Default, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct CardToken {
    pub token: Secret<String>,
    pub card_exp_month: Option<Secret<String>>,
    pub card_exp_year: Option<Secret<String>>,
    pub card_holder_name: Option<Secret<String>>,
}

impl Card {
    pub fn get_card_expiry_year_2_digit(
        &self,
    ) -> Result<Secret<String>, error_stack::Report<ConnectorError>> {
        let binding = self.card_exp_year.clone();
        let year = binding.peek();
        Ok(Secret::new(
            year.get(year.len().saturating_sub(2)..)
                .filter(|_| year.len() >= 2)
                .ok_or(report!(ConnectorError::InvalidDataFormat {
                    field_name: "card_exp_year",
                }))?
                .to_string(),
        ))
    }

    /// Four digit year; two digit years are assumed to be in the 2000s.
    pub fn get_expiry_year_4_digit(&self) -> Secret<String> {
        let mut year = self.card_exp_year.peek().clone();
        if year.len() == 2 {
            year = format!("20{year}");
        }
        Secret::new(year)
    }

    /// Zero padded month, `"4"` becomes `"04"`.
    pub fn get_expiry_month_2_digit(&self) -> Secret<String> {
        Secret::new(format!("{:0>2}", self.card_exp_month.peek()))
    }

    pub fn get_card_expiry_month_year_2_digit_with_delimiter(
        &self,
        delimiter: String,
    ) -> Result<Secret<String>, error_stack::Report<ConnectorError>> {
        let year = self.get_card_expiry_year_2_digit()?;
        Ok(Secret::new(format!(
            "{}{}{}",
            self.get_expiry_month_2_digit().peek(),
            delimiter,
            year.peek()
        )))
    }

    /// `MMYY`
    pub fn get_expiry_date_as_mmyy(&self) -> Result<Secret<String>, error_stack::Report<ConnectorError>> {
        self.get_card_expiry_month_year_2_digit_with_delimiter(String::new())
    }

    /// `YYMM`
    pub fn get_expiry_date_as_yymm(&self) -> Result<Secret<String>, error_stack::Report<ConnectorError>> {
        let year = self.get_card_expiry_year_2_digit()?;
        Ok(Secret::new(format!(
            "{}{}",
            year.peek(),
            self.get_expiry_month_2_digit().peek()
        )))
    }

    /// `YYYY{delimiter}MM`
    pub fn get_expiry_date_as_yyyymm(&self, delimiter: &str) -> Secret<String> {
        Secret::new(format!(
            "{}{}{}",
            self.get_expiry_year_4_digit().peek(),
            delimiter,
            self.get_expiry_month_2_digit().peek()
        ))
    }

    /// Explicit network when supplied, otherwise detected from the IIN.
    pub fn get_card_network(&self) -> Option<CardNetwork> {
        self.card_network
            .or_else(|| self.card_number.get_card_network())
    }

    /// Holder name split on the last space, as most XML schemas want it.
    pub fn get_first_and_last_name(&self) -> (Option<Secret<String>>, Option<Secret<String>>) {
        match self.card_holder_name.as_ref().map(|name| name.peek().trim().to_string()) {
            Some(name) if !name.is_empty() => match name.rsplit_once(' ') {
                Some((first, last)) => (
                    Some(Secret::new(first.trim().to_string())),
                    Some(Secret::new(last.to_string())),
                ),
                None => (Some(Secret::new(name)), None),
            },
            _ => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn card(month: &str, year: &str) -> Card {
        Card {
            card_number: CardNumber::from_str("4111111111111111").unwrap(),
            card_exp_month: Secret::new(month.to_string()),
            card_exp_year: Secret::new(year.to_string()),
            card_cvc: Secret::new("123".to_string()),
            card_holder_name: Some(Secret::new("Longbob Longsen".to_string())),
            card_network: None,
        }
    }

    #[test]
    fn expiry_formats() {
        let card = card("9", "2030");
        assert_eq!(card.get_expiry_month_2_digit().peek(), "09");
        assert_eq!(card.get_expiry_date_as_mmyy().unwrap().peek(), "0930");
        assert_eq!(card.get_expiry_date_as_yymm().unwrap().peek(), "3009");
        assert_eq!(card.get_expiry_date_as_yyyymm("-").peek(), "2030-09");
        assert_eq!(
            card.get_card_expiry_month_year_2_digit_with_delimiter("/".to_string())
                .unwrap()
                .peek(),
            "09/30"
        );
    }

    #[test]
    fn two_digit_year_is_expanded() {
        assert_eq!(card("12", "31").get_expiry_year_4_digit().peek(), "2031");
    }

    #[test]
    fn one_digit_year_is_rejected() {
        assert!(card("12", "1").get_expiry_date_as_mmyy().is_err());
    }

    #[test]
    fn splits_holder_name() {
        let (first, last) = card("1", "2030").get_first_and_last_name();
        assert_eq!(first.unwrap().peek(), "Longbob");
        assert_eq!(last.unwrap().peek(), "Longsen");
    }

    #[test]
    fn detects_network_from_number() {
        assert_eq!(card("1", "2030").get_card_network(), Some(CardNetwork::Visa));
    }
}
