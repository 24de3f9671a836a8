//! Session bootstrap and the response drain loop.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, trace, warn};

use blpq_config::{ConfigError, Configuration, TransportConfig, TransportType};
use blpq_core::name;
use blpq_core::{Event, EventType, MemoryTransport, Message, Session, SessionError, Transport};

#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error("unsupported transport type: {0:?}")]
    UnsupportedTransport(TransportType),
}

/// Create the transport named by the configuration.
pub fn create_transport(config: &TransportConfig) -> Result<Box<dyn Transport>, FactoryError> {
    match config.transport_type {
        TransportType::Memory => Ok(Box::new(MemoryTransport::new())),
        // The vendor's session SDK plugs in here; this tree does not link it.
        TransportType::Native => Err(FactoryError::UnsupportedTransport(TransportType::Native)),
    }
}

/// Load the configuration file; a missing file falls back to defaults.
pub fn load_configuration(path: &Path) -> Result<Configuration, ConfigError> {
    if path.exists() {
        Configuration::load(path)
    } else {
        warn!(path = %path.display(), "configuration file not found, using defaults");
        Ok(Configuration::default())
    }
}

/// How the drain loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The final response arrived.
    Completed,
    /// The session went away before the response completed.
    Terminated,
}

/// Poll the session until the final response or session termination,
/// handing every partial and final response message to `on_message`.
///
/// The poll timeout keeps the loop responsive to interrupts between
/// deliveries.
pub fn drain_responses<F>(
    session: &mut Session,
    timeout: Duration,
    mut on_message: F,
) -> Result<LoopOutcome, SessionError>
where
    F: FnMut(&Message),
{
    loop {
        let event = session.next_event(timeout)?;
        match event.event_type() {
            EventType::PartialResponse => {
                debug!("processing partial response");
                for message in &event {
                    on_message(message);
                }
            }
            EventType::Response => {
                debug!("processing final response");
                for message in &event {
                    on_message(message);
                }
                return Ok(LoopOutcome::Completed);
            }
            EventType::SessionStatus => {
                if session_over(&event) {
                    warn!("session ended before the response completed");
                    return Ok(LoopOutcome::Terminated);
                }
            }
            EventType::Timeout => continue,
            other => {
                for message in &event {
                    trace!(event = %other, message = %message.message_type(), "ignoring");
                }
            }
        }
    }
}

fn session_over(event: &Event) -> bool {
    event.messages().any(|message| {
        *message.message_type() == *name::SESSION_TERMINATED
            || *message.message_type() == *name::SESSION_STARTUP_FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blpq_core::SessionOptions;

    fn started_session(mut transport: MemoryTransport) -> Session {
        transport.respond("//blp/refdata", "ReferenceDataRequest", |_| {
            vec![
                Event::with_messages(
                    EventType::PartialResponse,
                    vec![Message::new("ReferenceDataResponse")],
                ),
                Event::with_messages(
                    EventType::Response,
                    vec![Message::new("ReferenceDataResponse")],
                ),
            ]
        });
        let mut session = Session::new(SessionOptions::default(), Box::new(transport));
        session.start().unwrap();
        session.open_service("//blp/refdata").unwrap();
        session
    }

    fn send_refdata(session: &mut Session) {
        let service = session.service("//blp/refdata").unwrap();
        let request = service.create_request("ReferenceDataRequest");
        session.send(request).unwrap();
    }

    #[test]
    fn test_drains_partials_until_final_response() {
        let mut session = started_session(MemoryTransport::new());
        send_refdata(&mut session);

        let mut seen = 0;
        let outcome =
            drain_responses(&mut session, Duration::from_millis(1), |_| seen += 1).unwrap();
        assert_eq!(outcome, LoopOutcome::Completed);
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_terminated_session_ends_loop() {
        let mut transport = MemoryTransport::new();
        transport.respond("//blp/refdata", "ReferenceDataRequest", |_| {
            vec![Event::session_status(&name::SESSION_TERMINATED)]
        });
        let mut session = Session::new(SessionOptions::default(), Box::new(transport));
        session.start().unwrap();
        session.open_service("//blp/refdata").unwrap();
        send_refdata(&mut session);

        let mut seen = 0;
        let outcome =
            drain_responses(&mut session, Duration::from_millis(1), |_| seen += 1).unwrap();
        assert_eq!(outcome, LoopOutcome::Terminated);
        assert_eq!(seen, 0);
    }

    #[test]
    fn test_status_events_are_ignored() {
        // connect and open-service statuses sit ahead of the response
        let mut session = started_session(MemoryTransport::new());
        send_refdata(&mut session);

        let outcome = drain_responses(&mut session, Duration::from_millis(1), |_| {}).unwrap();
        assert_eq!(outcome, LoopOutcome::Completed);
    }

    #[test]
    fn test_native_transport_is_unsupported() {
        let config = TransportConfig {
            transport_type: TransportType::Native,
        };
        assert!(matches!(
            create_transport(&config),
            Err(FactoryError::UnsupportedTransport(_))
        ));
    }

    #[test]
    fn test_memory_transport_is_supported() {
        let config = TransportConfig {
            transport_type: TransportType::Memory,
        };
        assert!(create_transport(&config).is_ok());
    }
}
