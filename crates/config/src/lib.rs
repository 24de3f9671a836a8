//! blpq-config: JSON configuration shared by the blpq tools

pub mod configuration;
pub mod error;

pub use configuration::{
    Configuration, PollConfig, ServiceConfig, SessionConfig, TransportConfig, TransportType,
};
pub use error::ConfigError;
