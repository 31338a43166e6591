use domain_types::connector_types::ConnectorEnum;
use interfaces::connector_types::BoxedConnector;

use crate::connectors::{
    Checkout, Decidir, Elavon, Eurobank, Eway, Firstdata, Hps, Iveri, Litle, Priority,
    Safecharge, Simetrik,
};

/// A parsed processor response together with the call it answers.
#[derive(Debug, Clone)]
pub struct ResponseRouterData<Response, RouterData> {
    pub response: Response,
    pub router_data: RouterData,
    pub http_code: u16,
}

#[derive(Clone)]
pub struct ConnectorData {
    pub connector: BoxedConnector,
    pub connector_name: ConnectorEnum,
}

impl ConnectorData {
    pub fn get_connector_by_name(connector_name: &ConnectorEnum) -> Self {
        let connector = Self::convert_connector(*connector_name);
        Self {
            connector,
            connector_name: *connector_name,
        }
    }

    fn convert_connector(connector_name: ConnectorEnum) -> BoxedConnector {
        match connector_name {
            ConnectorEnum::Checkout => Box::new(Checkout::new()),
            ConnectorEnum::Decidir => Box::new(Decidir::new()),
            ConnectorEnum::Elavon => Box::new(Elavon::new()),
            ConnectorEnum::Eurobank => Box::new(Eurobank::new()),
            ConnectorEnum::Eway => Box::new(Eway::new()),
            ConnectorEnum::Firstdata => Box::new(Firstdata::new()),
            ConnectorEnum::Hps => Box::new(Hps::new()),
            ConnectorEnum::Iveri => Box::new(Iveri::new()),
            ConnectorEnum::Litle => Box::new(Litle::new()),
            ConnectorEnum::Priority => Box::new(Priority::new()),
            ConnectorEnum::Safecharge => Box::new(Safecharge::new()),
            ConnectorEnum::Simetrik => Box::new(Simetrik::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_connector_reports_its_own_id() {
        for name in ConnectorEnum::iter() {
            let data = ConnectorData::get_connector_by_name(&name);
            assert_eq!(data.connector.id(), name.to_string());
            assert!(data.connector.supports_scrubbing());
        }
    }
}
