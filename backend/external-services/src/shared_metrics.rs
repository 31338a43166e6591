use error_stack::ResultExt;
use lazy_static::lazy_static;
use prometheus::{
    self, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

// Define latency buckets for histograms
const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

// Registration only fails on a duplicate metric name.
lazy_static! {
    pub static ref EXTERNAL_SERVICE_TOTAL_API_CALLS: IntCounterVec = register_int_counter_vec!(
        "EXTERNAL_SERVICE_TOTAL_API_CALLS",
        "Total number of calls made to payment processors",
        &["connector", "flow"]
    )
    .expect("failed to register EXTERNAL_SERVICE_TOTAL_API_CALLS");
    pub static ref EXTERNAL_SERVICE_API_CALLS_LATENCY: HistogramVec = register_histogram_vec!(
        "EXTERNAL_SERVICE_API_CALLS_LATENCY_SECONDS",
        "Latency of calls made to payment processors",
        &["connector", "flow"],
        LATENCY_BUCKETS.to_vec()
    )
    .expect("failed to register EXTERNAL_SERVICE_API_CALLS_LATENCY_SECONDS");
    pub static ref EXTERNAL_SERVICE_API_CALLS_ERRORS: IntCounterVec = register_int_counter_vec!(
        "EXTERNAL_SERVICE_API_CALLS_ERRORS",
        "Total number of failed calls to payment processors",
        &["connector", "flow", "error"]
    )
    .expect("failed to register EXTERNAL_SERVICE_API_CALLS_ERRORS");
}

/// Labels every processor call metric carries.
#[derive(Debug, Clone, Copy)]
pub struct ApiCallLabels<'a> {
    pub connector: &'a str,
    pub flow: &'a str,
}

impl ApiCallLabels<'_> {
    pub fn record_call(&self) {
        EXTERNAL_SERVICE_TOTAL_API_CALLS
            .with_label_values(&[self.connector, self.flow])
            .inc();
    }

    pub fn record_latency(&self, seconds: f64) {
        EXTERNAL_SERVICE_API_CALLS_LATENCY
            .with_label_values(&[self.connector, self.flow])
            .observe(seconds);
    }

    pub fn record_error(&self, error: &str) {
        EXTERNAL_SERVICE_API_CALLS_ERRORS
            .with_label_values(&[self.connector, self.flow, error])
            .inc();
    }
}

/// Renders every registered metric in the prometheus text format.
pub fn metrics_handler() -> error_stack::Result<String, MetricsError> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode(&metric_families, &mut buffer)
        .change_context(MetricsError::EncodingError)?;
    String::from_utf8(buffer).change_context(MetricsError::Utf8Error)
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Error encoding metrics")]
    EncodingError,
    #[error("Error converting metrics to utf8")]
    Utf8Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_calls_show_up_in_rendered_metrics() {
        let labels = ApiCallLabels {
            connector: "checkout",
            flow: "Authorize",
        };
        labels.record_call();
        labels.record_latency(0.2);
        labels.record_error("RequestNotSent");

        let rendered = metrics_handler().unwrap();
        assert!(rendered.contains("EXTERNAL_SERVICE_TOTAL_API_CALLS"));
        assert!(rendered.contains("connector=\"checkout\""));
        assert!(rendered.contains("error=\"RequestNotSent\""));
    }
}
