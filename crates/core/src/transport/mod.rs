//! The seam between the session object model and the wire.
//!
//! The vendor's native SDK is the production backend for this trait and
//! is linked in separately; [`MemoryTransport`] is the in-tree
//! implementation used by tests.

use std::time::Duration;

use crate::error::SessionError;
use crate::event::Event;
use crate::request::Request;
use crate::session::{CorrelationId, SessionOptions};

mod memory;

pub use memory::MemoryTransport;

/// Blocking, single-threaded transport for a query session.
pub trait Transport: Send {
    /// Establish the connection described by the session options.
    fn connect(&mut self, options: &SessionOptions) -> Result<(), SessionError>;

    /// Open a named service on the connection.
    fn open_service(&mut self, uri: &str) -> Result<(), SessionError>;

    /// Submit a request; its answers arrive via [`Transport::poll`].
    fn send(&mut self, request: &Request, correlation_id: CorrelationId)
        -> Result<(), SessionError>;

    /// Block up to `timeout` for the next event; a lapsed timeout
    /// yields a Timeout event, not an error.
    fn poll(&mut self, timeout: Duration) -> Result<Event, SessionError>;

    /// Close the connection.
    fn disconnect(&mut self) -> Result<(), SessionError>;
}
