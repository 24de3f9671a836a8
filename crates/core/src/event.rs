//! Events pulled from a session.

use std::fmt;

use crate::message::Message;
use crate::name::Name;

/// Tag carried by every event delivered by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Admin,
    SessionStatus,
    ServiceStatus,
    PartialResponse,
    Response,
    RequestStatus,
    Timeout,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Admin => "ADMIN",
            EventType::SessionStatus => "SESSION_STATUS",
            EventType::ServiceStatus => "SERVICE_STATUS",
            EventType::PartialResponse => "PARTIAL_RESPONSE",
            EventType::Response => "RESPONSE",
            EventType::RequestStatus => "REQUEST_STATUS",
            EventType::Timeout => "TIMEOUT",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery unit from the session: an event-type tag and zero or
/// more messages.
#[derive(Debug, Clone)]
pub struct Event {
    event_type: EventType,
    messages: Vec<Message>,
}

impl Event {
    pub fn new(event_type: EventType) -> Self {
        Event {
            event_type,
            messages: Vec::new(),
        }
    }

    pub fn with_messages(event_type: EventType, messages: Vec<Message>) -> Self {
        Event {
            event_type,
            messages,
        }
    }

    /// The empty event a poll yields when its timeout lapses.
    pub fn timeout() -> Self {
        Event::new(EventType::Timeout)
    }

    /// A session-status event carrying a single typed message.
    pub fn session_status(message_type: &Name) -> Self {
        Event::with_messages(
            EventType::SessionStatus,
            vec![Message::new(message_type.clone())],
        )
    }

    /// A service-status event carrying a single typed message.
    pub fn service_status(message_type: &Name) -> Self {
        Event::with_messages(
            EventType::ServiceStatus,
            vec![Message::new(message_type.clone())],
        )
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn messages(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub(crate) fn messages_mut(&mut self) -> &mut Vec<Message> {
        &mut self.messages
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

impl<'a> IntoIterator for &'a Event {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
