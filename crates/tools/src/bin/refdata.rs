//! Reference-data query tool: one request, print each security's
//! fields as the response events arrive.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, trace, warn};

use blpq_core::name;
use blpq_core::{Message, Session};
use blpq_tools::cli::ConnectionArgs;
use blpq_tools::output;
use blpq_tools::runner::{self, LoopOutcome};

#[derive(Parser, Debug)]
#[command(name = "blpq-refdata", about = "Fetch reference data fields for securities")]
struct Cli {
    #[command(flatten)]
    conn: ConnectionArgs,

    /// Security identifier (repeatable)
    #[arg(short = 's', long = "security", default_value = "IBM US Equity")]
    securities: Vec<String>,

    /// Field mnemonic to request (repeatable)
    #[arg(short = 'f', long = "field", default_value = "PX_LAST")]
    fields: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    blpq_tools::init_tracing();
    let cli = Cli::parse();

    let config = runner::load_configuration(&cli.conn.config)?;
    debug!(?config, "loaded configuration");

    let options = cli.conn.session_options(&config);
    info!(
        host = %options.server_host(),
        port = options.server_port(),
        "connecting"
    );

    let transport = runner::create_transport(&config.transport)?;
    let mut session = Session::new(options, transport);
    session.start().context("failed to start session")?;

    let uri = config.services.reference_data.clone();
    session
        .open_service(&uri)
        .with_context(|| format!("failed to open {uri}"))?;
    let service = session.service(&uri)?;

    let mut request = service.create_request("ReferenceDataRequest");
    for security in &cli.securities {
        request.append("securities", security.as_str())?;
    }
    for field in &cli.fields {
        request.append("fields", field.as_str())?;
    }
    debug!(%request, "sending request");
    session.send(request)?;

    let timeout = Duration::from_millis(config.polling.timeout_ms);
    let outcome = runner::drain_responses(&mut session, timeout, print_message)?;
    if outcome == LoopOutcome::Terminated {
        warn!("no final response received");
    }

    session.stop()?;
    Ok(())
}

fn print_message(message: &Message) {
    if let Some(info) = message.element(&name::RESPONSE_ERROR) {
        println!("{}", output::error_info("REQUEST FAILED: ", info));
        return;
    }
    let Some(security_data) = message.element(&name::SECURITY_DATA) else {
        trace!(message = %message.message_type(), "no security data");
        return;
    };

    for security in security_data.sequences() {
        let ticker = security.get_string(&name::SECURITY).unwrap_or_default();
        println!("{ticker}:");

        if let Some(error) = security.element(&name::SECURITY_ERROR) {
            println!("    {}", output::error_info("security error: ", error));
            continue;
        }
        if let Some(fields) = security.element(&name::FIELD_DATA) {
            for field in fields.elements() {
                println!("{}", output::field_value_row(field));
            }
        }
        if let Some(exceptions) = security.element(&name::FIELD_EXCEPTIONS) {
            for exception in exceptions.sequences() {
                let field_id = exception.get_string(&name::FIELD_ID).unwrap_or_default();
                if let Some(info) = exception.element(&name::ERROR_INFO) {
                    println!("    {}", output::error_info(&format!("{field_id}: "), info));
                }
            }
        }
    }
}
