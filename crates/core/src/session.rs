//! Session lifecycle over a pluggable transport.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::error::SessionError;
use crate::event::Event;
use crate::request::{Request, Service};
use crate::transport::Transport;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8194;

/// Connection parameters for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    server_host: String,
    server_port: u16,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
        }
    }
}

impl SessionOptions {
    pub fn new() -> Self {
        SessionOptions::default()
    }

    pub fn with_server_host(mut self, host: &str) -> Self {
        self.server_host = host.to_string();
        self
    }

    pub fn with_server_port(mut self, port: u16) -> Self {
        self.server_port = port;
        self
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }
}

/// Identifies the request a delivered message answers.
///
/// Ids are allocated by the session and are unique and increasing
/// within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(u64);

impl CorrelationId {
    pub fn new_u64(value: u64) -> Self {
        CorrelationId(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live connection to a query endpoint.
///
/// Opened once with [`Session::start`], then services are opened on it,
/// requests sent, and events drained via [`Session::next_event`].
/// [`Session::stop`] closes it; `Drop` is the backstop for early exits.
pub struct Session {
    transport: Box<dyn Transport>,
    options: SessionOptions,
    started: bool,
    open_services: HashSet<String>,
    correlation_count: u64,
}

impl Session {
    pub fn new(options: SessionOptions, transport: Box<dyn Transport>) -> Self {
        Session {
            transport,
            options,
            started: false,
            open_services: HashSet::new(),
            correlation_count: 0,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.started {
            return Err(SessionError::AlreadyStarted);
        }
        self.transport.connect(&self.options)?;
        self.started = true;
        debug!(
            host = %self.options.server_host,
            port = self.options.server_port,
            "session started"
        );
        Ok(())
    }

    pub fn open_service(&mut self, uri: &str) -> Result<(), SessionError> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }
        self.transport.open_service(uri)?;
        self.open_services.insert(uri.to_string());
        debug!(service = uri, "service opened");
        Ok(())
    }

    /// Handle to an already opened service.
    pub fn service(&self, uri: &str) -> Result<Service, SessionError> {
        if !self.open_services.contains(uri) {
            return Err(SessionError::ServiceNotOpened(uri.to_string()));
        }
        Ok(Service::new(uri))
    }

    /// Send a request; delivered messages carry the returned id.
    pub fn send(&mut self, request: Request) -> Result<CorrelationId, SessionError> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }
        if !self.open_services.contains(request.service_uri()) {
            return Err(SessionError::ServiceNotOpened(
                request.service_uri().to_string(),
            ));
        }
        let correlation_id = self.new_correlation_id();
        self.transport.send(&request, correlation_id)?;
        debug!(%correlation_id, operation = %request.operation(), "request sent");
        Ok(correlation_id)
    }

    /// Blocking poll for the next event; yields a Timeout event when
    /// the timeout lapses with nothing delivered.
    pub fn next_event(&mut self, timeout: Duration) -> Result<Event, SessionError> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }
        self.transport.poll(timeout)
    }

    /// Stop the session. Safe to call more than once.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        if !self.started {
            return Ok(());
        }
        self.transport.disconnect()?;
        self.started = false;
        debug!("session stopped");
        Ok(())
    }

    fn new_correlation_id(&mut self) -> CorrelationId {
        let id = CorrelationId::new_u64(self.correlation_count);
        self.correlation_count += 1;
        id
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.started {
            if let Err(err) = self.transport.disconnect() {
                debug!(%err, "disconnect on drop failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use crate::transport::MemoryTransport;

    fn refdata_session(transport: MemoryTransport) -> Session {
        Session::new(SessionOptions::default(), Box::new(transport))
    }

    #[test]
    fn test_poll_before_start_fails() {
        let mut session = refdata_session(MemoryTransport::new());
        let err = session
            .next_event(Duration::from_millis(1))
            .unwrap_err();
        assert!(matches!(err, SessionError::NotStarted));
    }

    #[test]
    fn test_send_before_start_fails() {
        let mut session = refdata_session(MemoryTransport::new());
        let request = Service::new("//blp/refdata").create_request("ReferenceDataRequest");
        let err = session.send(request).unwrap_err();
        assert!(matches!(err, SessionError::NotStarted));
    }

    #[test]
    fn test_double_start_fails() {
        let mut session = refdata_session(MemoryTransport::new());
        session.start().unwrap();
        let err = session.start().unwrap_err();
        assert!(matches!(err, SessionError::AlreadyStarted));
    }

    #[test]
    fn test_send_requires_open_service() {
        let mut transport = MemoryTransport::new();
        transport.respond("//blp/refdata", "ReferenceDataRequest", |_| Vec::new());
        let mut session = refdata_session(transport);
        session.start().unwrap();

        let request = Service::new("//blp/refdata").create_request("ReferenceDataRequest");
        let err = session.send(request).unwrap_err();
        assert!(matches!(err, SessionError::ServiceNotOpened(_)));
    }

    #[test]
    fn test_correlation_ids_increase() {
        let mut transport = MemoryTransport::new();
        transport.respond("//blp/refdata", "ReferenceDataRequest", |_| Vec::new());
        let mut session = refdata_session(transport);
        session.start().unwrap();
        session.open_service("//blp/refdata").unwrap();

        let service = session.service("//blp/refdata").unwrap();
        let first = session.send(service.create_request("ReferenceDataRequest")).unwrap();
        let second = session.send(service.create_request("ReferenceDataRequest")).unwrap();
        assert!(second.value() > first.value());
    }

    #[test]
    fn test_start_surfaces_status_event() {
        let mut session = refdata_session(MemoryTransport::new());
        session.start().unwrap();
        let event = session.next_event(Duration::from_millis(1)).unwrap();
        assert_eq!(event.event_type(), EventType::SessionStatus);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut session = refdata_session(MemoryTransport::new());
        session.start().unwrap();
        session.stop().unwrap();
        session.stop().unwrap();
    }

    #[test]
    fn test_failed_connect_propagates() {
        let mut transport = MemoryTransport::new();
        transport.fail_connect("connection refused");
        let mut session = refdata_session(transport);
        let err = session.start().unwrap_err();
        assert!(matches!(err, SessionError::Transport(_)));
    }
}
