#![forbid(unsafe_code)]

pub mod config;
pub mod http;
pub mod memory;
pub mod repository;

pub use config::{ConfigError, GatewayConfig};
pub use http::HttpGateway;
pub use memory::{InMemoryGateway, StoredAssignment};
pub use repository::{AssignmentGateway, GatewayError};
