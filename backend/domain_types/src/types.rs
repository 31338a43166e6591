use serde::Deserialize;

/// Endpoint configuration for every supported gateway.
#[derive(Clone, serde::Deserialize, Debug, Default)]
pub struct Connectors {
    pub checkout: ConnectorParams,
    pub decidir: ConnectorParams,
    pub elavon: ConnectorParams,
    pub eurobank: ConnectorParams,
    pub eway: ConnectorParams,
    pub firstdata: ConnectorParams,
    pub hps: ConnectorParams,
    pub iveri: ConnectorParams,
    pub litle: ConnectorParams,
    pub priority: ConnectorParams,
    pub safecharge: ConnectorParams,
    pub simetrik: ConnectorParams,
}

#[derive(Clone, Deserialize, Debug, Default)]
pub struct ConnectorParams {
    /// base url
    pub base_url: String,
    /// Second endpoint, e.g. an OAuth token service or a separate refund host.
    pub secondary_base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    pub bypass_proxy_urls: Vec<String>,
}

impl Proxy {
    pub fn is_proxy_configured(&self, request_url: &str) -> bool {
        (self.http_url.is_some() || self.https_url.is_some())
            && !self
                .bypass_proxy_urls
                .iter()
                .any(|url| request_url.starts_with(url.as_str()))
    }
}
