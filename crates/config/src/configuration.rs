use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    /// In-memory transport with scripted responses (tests, dry runs).
    Memory,
    /// The vendor's native session SDK, linked in separately.
    Native,
}

/// Connection defaults, overridable per tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// URIs of the named services the tools open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_reference_data")]
    pub reference_data: String,
    #[serde(default = "default_field_search")]
    pub field_search: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            reference_data: default_reference_data(),
            field_search: default_field_search(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(rename = "type", default = "default_transport_type")]
    pub transport_type: TransportType,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            transport_type: default_transport_type(),
        }
    }
}

/// Event-loop polling knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Timeout handed to each next-event poll. Short enough that the
    /// loop can notice interrupts between deliveries.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Contents of `Configuration.json`. Every section is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Configuration {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub services: ServiceConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub polling: PollConfig,
}

impl Configuration {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let configuration: Configuration = serde_json::from_str(&raw)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "session.host must not be empty".to_string(),
            ));
        }
        if self.session.port == 0 {
            return Err(ConfigError::Validation(
                "session.port must not be zero".to_string(),
            ));
        }
        if self.services.reference_data.is_empty() || self.services.field_search.is_empty() {
            return Err(ConfigError::Validation(
                "service URIs must not be empty".to_string(),
            ));
        }
        if self.polling.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "polling.timeout_ms must not be zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8194
}

fn default_reference_data() -> String {
    "//blp/refdata".to_string()
}

fn default_field_search() -> String {
    "//blp/apiflds".to_string()
}

fn default_transport_type() -> TransportType {
    TransportType::Native
}

fn default_timeout_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_configuration() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "session": {{"host": "10.8.8.1", "port": 8194}},
                "services": {{
                    "reference_data": "//blp/refdata",
                    "field_search": "//blp/apiflds"
                }},
                "transport": {{"type": "memory"}},
                "polling": {{"timeout_ms": 250}}
            }}"#
        )
        .unwrap();

        let config = Configuration::load(file.path()).unwrap();
        assert_eq!(config.session.host, "10.8.8.1");
        assert_eq!(config.transport.transport_type, TransportType::Memory);
        assert_eq!(config.polling.timeout_ms, 250);
    }

    #[test]
    fn test_partial_configuration_gets_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"session": {{"host": "terminal-a"}}}}"#).unwrap();

        let config = Configuration::load(file.path()).unwrap();
        assert_eq!(config.session.host, "terminal-a");
        assert_eq!(config.session.port, 8194);
        assert_eq!(config.services.reference_data, "//blp/refdata");
        assert_eq!(config.services.field_search, "//blp/apiflds");
        assert_eq!(config.transport.transport_type, TransportType::Native);
        assert_eq!(config.polling.timeout_ms, 500);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            Configuration::load(file.path()),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        assert!(matches!(
            Configuration::load("/nonexistent/Configuration.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_zero_port_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"session": {{"port": 0}}}}"#).unwrap();
        assert!(matches!(
            Configuration::load(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }
}
