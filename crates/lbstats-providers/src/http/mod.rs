//! HTTP Client Support
//!
//! Client configuration and response handling shared by the BigQuery,
//! RabbitMQ management and InfluxDB clients.

pub mod provider;

pub use crate::utils::HttpResponseUtils;
pub use provider::HttpClientConfig;
