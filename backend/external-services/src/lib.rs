pub mod configs;
pub mod error;
pub mod flows;
pub mod logger;
pub mod service;
pub mod shared_metrics;

#[macro_export]
macro_rules! service_name {
    () => {
        env!("CARGO_BIN_NAME")
    };
}
