//! Flags shared by every tool.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Args;

use blpq_config::Configuration;
use blpq_core::value::DATETIME_FORMAT;
use blpq_core::SessionOptions;

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Server name or IP (overrides the configuration file)
    #[arg(short = 'a', long = "ip", value_name = "ipAddress")]
    pub host: Option<String>,

    /// Server port (overrides the configuration file)
    #[arg(short = 'p', long = "port", value_name = "tcpPort")]
    pub port: Option<u16>,

    /// Path to the JSON configuration file
    #[arg(long, env = "BLPQ_CONFIG", default_value = "Configuration.json")]
    pub config: PathBuf,
}

impl ConnectionArgs {
    /// Effective connection parameters: explicit flags win over the
    /// configuration file.
    pub fn session_options(&self, config: &Configuration) -> SessionOptions {
        SessionOptions::new()
            .with_server_host(self.host.as_deref().unwrap_or(&config.session.host))
            .with_server_port(self.port.unwrap_or(config.session.port))
    }
}

/// Datetime flag parser (`YYYY-MM-DD HH:MM:SS`).
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map_err(|err| format!("invalid datetime value: {value} ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        conn: ConnectionArgs,
    }

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_datetime("2008-08-11 15:30:00").unwrap();
        assert_eq!(parsed.format(DATETIME_FORMAT).to_string(), "2008-08-11 15:30:00");

        let err = parse_datetime("11/08/2008").unwrap_err();
        assert!(err.contains("invalid datetime value: 11/08/2008"));
    }

    #[test]
    fn test_flags_override_configuration() {
        let cli = TestCli::parse_from(["test", "--ip", "terminal-b", "-p", "9000"]);
        let options = cli.conn.session_options(&Configuration::default());
        assert_eq!(options.server_host(), "terminal-b");
        assert_eq!(options.server_port(), 9000);
    }

    #[test]
    fn test_configuration_supplies_defaults() {
        let cli = TestCli::parse_from(["test"]);
        let options = cli.conn.session_options(&Configuration::default());
        assert_eq!(options.server_host(), "localhost");
        assert_eq!(options.server_port(), 8194);
        assert_eq!(cli.conn.config, PathBuf::from("Configuration.json"));
    }
}
