//! Services and the requests sent to them.

use std::fmt;

use crate::element::Element;
use crate::error::ElementError;
use crate::name::Name;
use crate::value::IntoValue;

/// Handle to an opened service, used to create requests.
#[derive(Debug, Clone)]
pub struct Service {
    uri: String,
}

impl Service {
    pub(crate) fn new(uri: &str) -> Self {
        Service {
            uri: uri.to_string(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn create_request(&self, operation: &str) -> Request {
        Request::new(&self.uri, operation)
    }
}

/// A single request against a service operation, populated through its
/// element tree and sent once.
#[derive(Debug, Clone)]
pub struct Request {
    service: String,
    operation: Name,
    root: Element,
}

impl Request {
    fn new(service: &str, operation: &str) -> Self {
        Request {
            service: service.to_string(),
            operation: Name::new(operation),
            root: Element::sequence(operation),
        }
    }

    pub fn service_uri(&self) -> &str {
        &self.service
    }

    pub fn operation(&self) -> &Name {
        &self.operation
    }

    pub fn element(&self) -> &Element {
        &self.root
    }

    /// Create or replace a named scalar field.
    pub fn set(&mut self, name: &str, value: impl IntoValue) -> Result<(), ElementError> {
        self.root.set(name, value)
    }

    /// Append a value to a named array field, creating it on first use.
    pub fn append(&mut self, name: &str, value: impl IntoValue) -> Result<(), ElementError> {
        self.root.append_to(name, value)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_builds_tree() {
        let service = Service::new("//blp/refdata");
        let mut request = service.create_request("ReferenceDataRequest");
        request.append("securities", "IBM US Equity").unwrap();
        request.append("securities", "MSFT US Equity").unwrap();
        request.append("fields", "PX_LAST").unwrap();

        assert_eq!(request.service_uri(), "//blp/refdata");
        assert_eq!(*request.operation(), "ReferenceDataRequest");
        assert_eq!(
            request.element().get_element("securities").unwrap().num_values(),
            2
        );
    }

    #[test]
    fn test_request_display() {
        let service = Service::new("//blp/refdata");
        let mut request = service.create_request("IntradayBarRequest");
        request.set("security", "IBM US Equity").unwrap();
        request.set("interval", 60i32).unwrap();

        let rendered = request.to_string();
        assert!(rendered.starts_with("IntradayBarRequest = {\n"));
        assert!(rendered.contains("    interval = 60\n"));
    }
}
