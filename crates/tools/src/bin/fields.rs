//! Field-search tool: look up field ids by free text and print the
//! matching id/mnemonic/description table.

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
#[command(name = "blpq-fields", about = "Search the field dictionary")]
struct Cli {
    #[command(flatten)]
    conn: ConnectionArgs,

    /// Search text
    #[arg(short = 'q', long, default_value = "last price")]
    query: String,
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

    let uri = config.services.field_search.clone();
    session
        .open_service(&uri)
        .with_context(|| format!("failed to open {uri}"))?;
    let service = session.service(&uri)?;

    let mut request = service.create_request("FieldSearchRequest");
    request.set("searchSpec", cli.query.as_str())?;
    debug!(%request, "sending request");
    session.send(request)?;

    println!("{}", output::field_table_header());
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
    let Some(fields) = message.element(&name::FIELD_DATA) else {
        trace!(message = %message.message_type(), "no field data");
        return;
    };

    for field in fields.sequences() {
        println!("{}", output::field_row(field));
    }
}
