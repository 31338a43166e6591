//! Drives a single gateway call from the command line:
//! `gateway <connector> <flow> [options]`.

use std::{path::PathBuf, str::FromStr};

use cards::CardNumber;
use clap::Parser;
use common_enums::{CaptureMethod, CountryAlpha2, Currency};
use common_utils::{pii::Email, types::MinorUnit};
use domain_types::{
    connector_types::ConnectorEnum,
    payment_address::AddressDetails,
    payment_method_data::{Card, CardToken, PaymentMethodData},
    router_data::ConnectorAuthType,
};
use external_services::{
    configs,
    error::GatewayError,
    flows::{self, Flow, PaymentParams},
    logger, shared_metrics,
};
use hyperswitch_masking::Secret;

#[derive(Debug, Parser)]
#[command(name = "gateway", about = "Run one payment gateway flow and print the outcome")]
struct Cli {
    /// Connector name, e.g. `checkout` or `safecharge`
    connector: String,
    #[arg(value_enum)]
    flow: Flow,
    #[arg(long)]
    config: Option<PathBuf>,

    /// Amount in minor units
    #[arg(long, default_value_t = 1000)]
    amount: i64,
    #[arg(long, default_value = "USD")]
    currency: String,
    /// `automatic` or `manual`
    #[arg(long)]
    capture_method: Option<String>,

    #[arg(long)]
    card_number: Option<String>,
    #[arg(long)]
    exp_month: Option<String>,
    #[arg(long)]
    exp_year: Option<String>,
    #[arg(long)]
    cvc: Option<String>,
    #[arg(long)]
    holder_name: Option<String>,
    /// Stored card token, used instead of a card number
    #[arg(long)]
    token: Option<String>,

    #[arg(long)]
    authorization: Option<String>,
    #[arg(long)]
    connector_refund_id: Option<String>,
    /// JSON returned as `connector_metadata` by an earlier call
    #[arg(long)]
    connector_metadata: Option<String>,
    /// Gateway specific options as a JSON object
    #[arg(long)]
    metadata: Option<String>,

    #[arg(long, default_value = "order_1")]
    order_id: String,
    #[arg(long, default_value = "refund_1")]
    refund_id: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    reason: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    customer_id: Option<String>,

    #[arg(long)]
    billing_line1: Option<String>,
    #[arg(long)]
    billing_city: Option<String>,
    #[arg(long)]
    billing_zip: Option<String>,
    #[arg(long)]
    billing_country: Option<String>,

    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    key1: Option<String>,
    #[arg(long)]
    api_secret: Option<String>,

    /// Print the prometheus metrics to stderr after the call
    #[arg(long)]
    print_metrics: bool,
}

impl Cli {
    fn auth(&self) -> ConnectorAuthType {
        let secret = |value: &String| Secret::new(value.clone());
        match (&self.api_key, &self.key1, &self.api_secret) {
            (Some(api_key), Some(key1), Some(api_secret)) => ConnectorAuthType::SignatureKey {
                api_key: secret(api_key),
                key1: secret(key1),
                api_secret: secret(api_secret),
            },
            (Some(api_key), Some(key1), None) => ConnectorAuthType::BodyKey {
                api_key: secret(api_key),
                key1: secret(key1),
            },
            (Some(api_key), None, _) => ConnectorAuthType::HeaderKey {
                api_key: secret(api_key),
            },
            (None, _, _) => ConnectorAuthType::NoKey,
        }
    }

    fn payment_method(&self) -> Result<Option<PaymentMethodData>, GatewayError> {
        let holder_name = self.holder_name.clone().map(Secret::new);
        if let Some(token) = &self.token {
            return Ok(Some(PaymentMethodData::CardToken(CardToken {
                token: Secret::new(token.clone()),
                card_exp_month: self.exp_month.clone().map(Secret::new),
                card_exp_year: self.exp_year.clone().map(Secret::new),
                card_holder_name: holder_name,
            })));
        }
        let Some(number) = &self.card_number else {
            return Ok(None);
        };
        let card_number =
            CardNumber::from_str(number).map_err(|_| GatewayError::InvalidArgument {
                name: "card_number",
                value: "failed validation".to_string(),
            })?;
        Ok(Some(PaymentMethodData::Card(Card {
            card_number,
            card_exp_month: Secret::new(
                self.exp_month
                    .clone()
                    .ok_or(GatewayError::MissingArgument("exp_month"))?,
            ),
            card_exp_year: Secret::new(
                self.exp_year
                    .clone()
                    .ok_or(GatewayError::MissingArgument("exp_year"))?,
            ),
            card_cvc: Secret::new(self.cvc.clone().unwrap_or_default()),
            card_holder_name: holder_name,
            card_network: None,
        })))
    }

    fn billing(&self) -> Result<Option<AddressDetails>, GatewayError> {
        if self.billing_line1.is_none() && self.billing_zip.is_none() {
            return Ok(None);
        }
        let country = self
            .billing_country
            .as_deref()
            .map(|country| {
                CountryAlpha2::from_str(country).map_err(|_| GatewayError::InvalidArgument {
                    name: "billing_country",
                    value: country.to_string(),
                })
            })
            .transpose()?;
        let (first_name, last_name) = match self.holder_name.as_deref().map(|name| name.rsplit_once(' ')) {
            Some(Some((first, last))) => (Some(first.to_string()), Some(last.to_string())),
            Some(None) => (self.holder_name.clone(), None),
            None => (None, None),
        };
        Ok(Some(AddressDetails {
            city: self.billing_city.clone(),
            country,
            line1: self.billing_line1.clone().map(Secret::new),
            line2: None,
            line3: None,
            zip: self.billing_zip.clone().map(Secret::new),
            state: None,
            first_name: first_name.map(Secret::new),
            last_name: last_name.map(Secret::new),
        }))
    }

    fn payment_params(&self) -> Result<PaymentParams, GatewayError> {
        let currency =
            Currency::from_str(&self.currency).map_err(|_| GatewayError::InvalidArgument {
                name: "currency",
                value: self.currency.clone(),
            })?;
        let capture_method = self
            .capture_method
            .as_deref()
            .map(|method| {
                CaptureMethod::from_str(method).map_err(|_| GatewayError::InvalidArgument {
                    name: "capture_method",
                    value: method.to_string(),
                })
            })
            .transpose()?;
        let email = self
            .email
            .as_deref()
            .map(|email| {
                Email::from_str(email).map_err(|_| GatewayError::InvalidArgument {
                    name: "email",
                    value: email.to_string(),
                })
            })
            .transpose()?;

        let mut params = PaymentParams::new(self.auth(), MinorUnit::new(self.amount), currency);
        params.capture_method = capture_method;
        params.payment_method = self.payment_method()?;
        params.authorization = self.authorization.clone();
        params.connector_refund_id = self.connector_refund_id.clone();
        params.connector_metadata = parse_json("connector_metadata", &self.connector_metadata)?;
        params.metadata = parse_json("metadata", &self.metadata)?;
        params.order_id = self.order_id.clone();
        params.refund_id = self.refund_id.clone();
        params.description = self.description.clone();
        params.reason = self.reason.clone();
        params.email = email;
        params.customer_id = self.customer_id.clone();
        params.billing = self.billing()?;
        Ok(params)
    }
}

fn parse_json(
    name: &'static str,
    value: &Option<String>,
) -> Result<Option<serde_json::Value>, GatewayError> {
    value
        .as_deref()
        .map(|raw| {
            serde_json::from_str(raw).map_err(|_| GatewayError::InvalidArgument {
                name,
                value: raw.to_string(),
            })
        })
        .transpose()
}

#[tokio::main]
#[allow(clippy::print_stdout, clippy::print_stderr)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = configs::Config::new_with_config_path(cli.config.clone())?;

    let _guard = logger::setup(
        &config.log,
        external_services::service_name!(),
        [external_services::service_name!()],
    )?;

    let connector = ConnectorEnum::from_str(&cli.connector)
        .map_err(|_| GatewayError::UnknownConnector(cli.connector.clone()))?;
    let params = cli.payment_params()?;

    let outcome = flows::run_flow(&config, connector, cli.flow, &params)
        .await
        .map_err(|report| {
            tracing::error!(?report, "gateway call failed");
            report.current_context().to_string()
        })?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if cli.print_metrics {
        let metrics = shared_metrics::metrics_handler()
            .map_err(|report| report.current_context().to_string())?;
        eprintln!("{metrics}");
    }

    Ok(())
}
