//! In-memory transport with scripted responses.

use std::collections::{HashMap, VecDeque};
use std::thread;
use std::time::Duration;

use crate::error::SessionError;
use crate::event::Event;
use crate::name;
use crate::request::Request;
use crate::session::{CorrelationId, SessionOptions};
use crate::transport::Transport;

type Responder = Box<dyn FnMut(&Request) -> Vec<Event> + Send>;

/// Transport that answers requests from registered responders.
///
/// Connect and open-service enqueue the status events the tools' drain
/// loops observe on a live session; failure knobs cover the error
/// paths.
#[derive(Default)]
pub struct MemoryTransport {
    queue: VecDeque<Event>,
    responders: HashMap<(String, String), Responder>,
    connected: bool,
    connect_error: Option<String>,
    open_errors: HashMap<String, String>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        MemoryTransport::default()
    }

    /// Script the events returned for an operation on a service.
    pub fn respond<F>(&mut self, service: &str, operation: &str, responder: F)
    where
        F: FnMut(&Request) -> Vec<Event> + Send + 'static,
    {
        self.responders.insert(
            (service.to_string(), operation.to_string()),
            Box::new(responder),
        );
    }

    /// Enqueue an event directly (e.g. an unsolicited session status).
    pub fn push_event(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Make the next connect fail with the given message.
    pub fn fail_connect(&mut self, message: &str) {
        self.connect_error = Some(message.to_string());
    }

    /// Make opening the given service fail with the given message.
    pub fn fail_open_service(&mut self, uri: &str, message: &str) {
        self.open_errors.insert(uri.to_string(), message.to_string());
    }
}

impl Transport for MemoryTransport {
    fn connect(&mut self, _options: &SessionOptions) -> Result<(), SessionError> {
        if let Some(message) = self.connect_error.take() {
            return Err(SessionError::Transport(message));
        }
        self.connected = true;
        self.queue
            .push_back(Event::session_status(&name::SESSION_STARTED));
        Ok(())
    }

    fn open_service(&mut self, uri: &str) -> Result<(), SessionError> {
        if !self.connected {
            return Err(SessionError::Terminated);
        }
        if self.open_errors.contains_key(uri) {
            return Err(SessionError::ServiceNotOpened(uri.to_string()));
        }
        self.queue
            .push_back(Event::service_status(&name::SERVICE_OPENED));
        Ok(())
    }

    fn send(
        &mut self,
        request: &Request,
        correlation_id: CorrelationId,
    ) -> Result<(), SessionError> {
        if !self.connected {
            return Err(SessionError::Terminated);
        }
        let key = (
            request.service_uri().to_string(),
            request.operation().to_string(),
        );
        let responder = self.responders.get_mut(&key).ok_or_else(|| {
            SessionError::Transport(format!(
                "no responder registered for {} {}",
                key.0, key.1
            ))
        })?;

        let mut events = responder(request);
        for event in &mut events {
            for message in event.messages_mut() {
                if message.correlation_id().is_none() {
                    message.set_correlation_id(correlation_id);
                }
            }
        }
        self.queue.extend(events);
        Ok(())
    }

    fn poll(&mut self, timeout: Duration) -> Result<Event, SessionError> {
        if !self.connected {
            return Err(SessionError::Terminated);
        }
        match self.queue.pop_front() {
            Some(event) => Ok(event),
            None => {
                // scripted responses are enqueued at send time, so an
                // empty queue stays empty for the whole timeout
                thread::sleep(timeout);
                Ok(Event::timeout())
            }
        }
    }

    fn disconnect(&mut self) -> Result<(), SessionError> {
        self.connected = false;
        Ok(())
    }
}
