//! Intraday bar query tool.

use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::Parser;
use tracing::{debug, info, trace, warn};

use blpq_core::name;
use blpq_core::{Message, Session};
use blpq_tools::cli::{self, ConnectionArgs};
use blpq_tools::output;
use blpq_tools::runner::{self, LoopOutcome};

#[derive(Parser, Debug)]
#[command(name = "blpq-bars", about = "Fetch intraday bars for a single security")]
struct Cli {
    #[command(flatten)]
    conn: ConnectionArgs,

    /// Security identifier
    #[arg(short = 's', long, default_value = "IBM US Equity")]
    security: String,

    /// Event type to aggregate (TRADE, BID, ASK, ...)
    #[arg(short = 'e', long, default_value = "TRADE")]
    event: String,

    /// Bar interval in minutes
    #[arg(short = 'b', long = "bar-interval", default_value_t = 60)]
    bar_interval: i32,

    /// Start date/time (YYYY-MM-DD HH:MM:SS)
    #[arg(long = "sd", value_parser = cli::parse_datetime, default_value = "2008-08-11 15:30:00")]
    start: NaiveDateTime,

    /// End date/time (YYYY-MM-DD HH:MM:SS)
    #[arg(long = "ed", value_parser = cli::parse_datetime, default_value = "2008-08-11 15:35:00")]
    end: NaiveDateTime,

    /// Fill the initial bar from the previous trading session
    #[arg(short = 'g', long = "gap-fill-initial-bar")]
    gap_fill_initial_bar: bool,
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

    let mut request = service.create_request("IntradayBarRequest");
    request.set("security", cli.security.as_str())?;
    request.set("eventType", cli.event.as_str())?;
    request.set("interval", cli.bar_interval)?;
    request.set("startDateTime", cli.start)?;
    request.set("endDateTime", cli.end)?;
    if cli.gap_fill_initial_bar {
        request.set("gapFillInitialBar", true)?;
    }
    debug!(%request, "sending request");
    session.send(request)?;

    println!("{}", output::bar_header());
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
    let Some(bars) = message
        .element(&name::BAR_DATA)
        .and_then(|data| data.element(&name::BAR_TICK_DATA))
    else {
        trace!(message = %message.message_type(), "no bar data");
        return;
    };

    for bar in bars.sequences() {
        println!("{}", output::bar_row(bar));
    }
}
