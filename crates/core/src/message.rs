//! Messages delivered inside events.

use std::fmt;

use crate::element::Element;
use crate::name::Name;
use crate::session::CorrelationId;

/// One message from the event stream: a typed name, the correlation id
/// of the request it answers (if any), and a root element tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    message_type: Name,
    correlation_id: Option<CorrelationId>,
    root: Element,
}

impl Message {
    /// A message with an empty root sequence named after its type.
    pub fn new(message_type: impl Into<Name>) -> Self {
        let message_type = message_type.into();
        let root = Element::sequence(message_type.clone());
        Message {
            message_type,
            correlation_id: None,
            root,
        }
    }

    pub fn with_root(message_type: impl Into<Name>, root: Element) -> Self {
        Message {
            message_type: message_type.into(),
            correlation_id: None,
            root,
        }
    }

    pub fn message_type(&self) -> &Name {
        &self.message_type
    }

    pub fn correlation_id(&self) -> Option<CorrelationId> {
        self.correlation_id
    }

    pub(crate) fn set_correlation_id(&mut self, correlation_id: CorrelationId) {
        self.correlation_id = Some(correlation_id);
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn element(&self, name: &str) -> Option<&Element> {
        self.root.element(name)
    }

    pub fn has_element(&self, name: &str) -> bool {
        self.root.has_element(name)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}
