//! Backing Store Clients
//!
//! Concrete implementations of the raw capability ports.
//!
//! | Client | Port | Backend |
//! |--------|------|---------|
//! | [`PostgresUserStore`] | `UserCountStore` | PostgreSQL via r2d2 |
//! | [`BigQueryEngine`] | `AnalyticalEngine` | BigQuery REST |
//! | [`RabbitMqQueueProbe`] | `QueueDepthProbe` | RabbitMQ management API |
//! | [`RedisListProbe`] | `QueueDepthProbe` | Redis `LLEN` |
//! | [`InfluxListenStore`] | `ListenCountStore` | InfluxDB HTTP API |

pub mod bigquery;
pub mod influx;
pub mod postgres;
pub mod rabbitmq;
pub mod redis_list;

pub use bigquery::BigQueryEngine;
pub use influx::InfluxListenStore;
pub use postgres::{PostgresPoolSettings, PostgresUserStore};
pub use rabbitmq::{RabbitMqQueueProbe, RabbitMqSettings};
pub use redis_list::RedisListProbe;
