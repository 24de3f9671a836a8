//! The named, possibly nested field tree carried by messages.
//!
//! An element is one of three shapes: a scalar (exactly one value), an
//! array (ordered values, possibly nested rows), or a sequence (named
//! children looked up by string key). Response messages are read
//! through the lookup and typed getters; requests and test fixtures are
//! built through the mutators.

use chrono::NaiveDateTime;
use std::fmt;

use crate::error::ElementError;
use crate::name::Name;
use crate::value::{FromValue, IntoValue, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: Name,
    payload: Payload,
}

#[derive(Debug, Clone, PartialEq)]
enum Payload {
    Scalar(Value),
    Array(Vec<Value>),
    Sequence(Vec<Element>),
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Payload::Scalar(_) => "scalar",
            Payload::Array(_) => "array",
            Payload::Sequence(_) => "sequence",
        }
    }
}

impl Element {
    pub fn scalar(name: impl Into<Name>, value: impl IntoValue) -> Self {
        Element {
            name: name.into(),
            payload: Payload::Scalar(value.into_value()),
        }
    }

    pub fn array(name: impl Into<Name>) -> Self {
        Element {
            name: name.into(),
            payload: Payload::Array(Vec::new()),
        }
    }

    pub fn sequence(name: impl Into<Name>) -> Self {
        Element {
            name: name.into(),
            payload: Payload::Sequence(Vec::new()),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.payload, Payload::Sequence(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.payload, Payload::Array(_))
    }

    /// Number of values held directly (a sequence reports its child count).
    pub fn num_values(&self) -> usize {
        match &self.payload {
            Payload::Scalar(_) => 1,
            Payload::Array(values) => values.len(),
            Payload::Sequence(children) => children.len(),
        }
    }

    pub fn num_elements(&self) -> usize {
        match &self.payload {
            Payload::Sequence(children) => children.len(),
            _ => 0,
        }
    }

    /// Look up a named child. Only sequences have named children.
    pub fn element(&self, name: &str) -> Option<&Element> {
        match &self.payload {
            Payload::Sequence(children) => children.iter().find(|child| child.name == *name),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, name: &str) -> Option<&mut Element> {
        match &mut self.payload {
            Payload::Sequence(children) => children.iter_mut().find(|child| child.name == *name),
            _ => None,
        }
    }

    pub fn has_element(&self, name: &str) -> bool {
        self.element(name).is_some()
    }

    /// Error-propagating lookup.
    pub fn get_element(&self, name: &str) -> Result<&Element, ElementError> {
        self.element(name)
            .ok_or_else(|| ElementError::NotFound(name.to_string()))
    }

    /// Named children of a sequence; empty for scalars and arrays.
    pub fn elements(&self) -> std::slice::Iter<'_, Element> {
        match &self.payload {
            Payload::Sequence(children) => children.iter(),
            _ => [].iter(),
        }
    }

    /// Values held directly; a scalar yields its single value.
    pub fn values(&self) -> std::slice::Iter<'_, Value> {
        match &self.payload {
            Payload::Scalar(value) => std::slice::from_ref(value).iter(),
            Payload::Array(values) => values.iter(),
            Payload::Sequence(_) => [].iter(),
        }
    }

    /// Nested rows of an array element (e.g. each `barTickData` entry).
    pub fn sequences(&self) -> impl Iterator<Item = &Element> {
        self.values().filter_map(|value| match value {
            Value::Sequence(el) => Some(el.as_ref()),
            _ => None,
        })
    }

    pub fn value_at(&self, index: usize) -> Option<&Value> {
        match &self.payload {
            Payload::Scalar(value) if index == 0 => Some(value),
            Payload::Scalar(_) => None,
            Payload::Array(values) => values.get(index),
            Payload::Sequence(_) => None,
        }
    }

    pub fn get_at<T: FromValue>(&self, index: usize) -> Option<T> {
        self.value_at(index).and_then(T::from_value)
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::Scalar(Value::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_string(&self, name: &str) -> Result<String, ElementError> {
        self.get_value(name, "string")
    }

    pub fn get_i64(&self, name: &str) -> Result<i64, ElementError> {
        self.get_value(name, "int64")
    }

    pub fn get_f64(&self, name: &str) -> Result<f64, ElementError> {
        self.get_value(name, "float64")
    }

    pub fn get_datetime(&self, name: &str) -> Result<NaiveDateTime, ElementError> {
        self.get_value(name, "datetime")
    }

    fn get_value<T: FromValue>(
        &self,
        name: &str,
        expected: &'static str,
    ) -> Result<T, ElementError> {
        let child = self.get_element(name)?;
        child
            .value_at(0)
            .and_then(T::from_value)
            .ok_or_else(|| ElementError::TypeMismatch {
                name: name.to_string(),
                expected,
            })
    }

    /// Create or replace a named scalar child. Sequences only.
    pub fn set(&mut self, name: &str, value: impl IntoValue) -> Result<(), ElementError> {
        let children = self.sequence_children()?;
        let value = value.into_value();
        match children.iter_mut().find(|child| child.name == *name) {
            Some(child) => child.payload = Payload::Scalar(value),
            None => children.push(Element::scalar(name, value)),
        }
        Ok(())
    }

    /// Append a value to this array element.
    pub fn append(&mut self, value: impl IntoValue) -> Result<(), ElementError> {
        match &mut self.payload {
            Payload::Array(values) => {
                values.push(value.into_value());
                Ok(())
            }
            other => Err(ElementError::WrongKind {
                name: self.name.to_string(),
                expected: "array",
                actual: other.kind(),
            }),
        }
    }

    /// Append a value to the named array child of this sequence,
    /// creating the array on first use.
    pub fn append_to(&mut self, name: &str, value: impl IntoValue) -> Result<(), ElementError> {
        let children = self.sequence_children()?;
        if let Some(child) = children.iter_mut().find(|child| child.name == *name) {
            return child.append(value);
        }
        let mut child = Element::array(name);
        child.append(value)?;
        children.push(child);
        Ok(())
    }

    /// Add a named child to this sequence.
    pub fn push_element(&mut self, element: Element) -> Result<(), ElementError> {
        self.sequence_children()?.push(element);
        Ok(())
    }

    fn sequence_children(&mut self) -> Result<&mut Vec<Element>, ElementError> {
        match &mut self.payload {
            Payload::Sequence(children) => Ok(children),
            other => Err(ElementError::WrongKind {
                name: self.name.to_string(),
                expected: "sequence",
                actual: other.kind(),
            }),
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        match &self.payload {
            Payload::Scalar(value) => writeln!(f, "{pad}{} = {value}", self.name),
            Payload::Array(values) => {
                writeln!(f, "{pad}{}[] = {{", self.name)?;
                for value in values {
                    match value {
                        Value::Sequence(el) => el.fmt_indented(f, indent + 4)?,
                        other => writeln!(f, "{pad}    {other}")?,
                    }
                }
                writeln!(f, "{pad}}}")
            }
            Payload::Sequence(children) => {
                writeln!(f, "{pad}{} = {{", self.name)?;
                for child in children {
                    child.fmt_indented(f, indent + 4)?;
                }
                writeln!(f, "{pad}}}")
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_security() -> Element {
        let mut security = Element::sequence("securityData");
        security.set("security", "IBM US Equity").unwrap();
        let mut fields = Element::sequence("fieldData");
        fields.set("PX_LAST", 183.72).unwrap();
        fields.set("VOLUME", 1_020_304i64).unwrap();
        security.push_element(fields).unwrap();
        security
    }

    #[test]
    fn test_lookup_and_typed_getters() {
        let security = sample_security();
        assert_eq!(
            security.get_string("security").unwrap(),
            "IBM US Equity"
        );

        let fields = security.get_element("fieldData").unwrap();
        assert_eq!(fields.get_f64("PX_LAST").unwrap(), 183.72);
        assert_eq!(fields.get_i64("VOLUME").unwrap(), 1_020_304);
        assert!(security.element("securityError").is_none());
    }

    #[test]
    fn test_lookup_on_scalar_returns_none() {
        let scalar = Element::scalar("security", "IBM US Equity");
        assert!(scalar.element("anything").is_none());
        assert_eq!(scalar.num_elements(), 0);
        assert_eq!(scalar.as_str(), Some("IBM US Equity"));
    }

    #[test]
    fn test_type_mismatch_does_not_panic() {
        let security = sample_security();
        let err = security.get_f64("security").unwrap_err();
        assert!(matches!(err, ElementError::TypeMismatch { .. }));
        let err = security.get_string("missing").unwrap_err();
        assert!(matches!(err, ElementError::NotFound(_)));
    }

    #[test]
    fn test_array_of_rows() {
        let mut bars = Element::array("barTickData");
        for close in [100.5, 101.25] {
            let mut bar = Element::sequence("barTickData");
            bar.set("close", close).unwrap();
            bars.append(bar).unwrap();
        }

        assert_eq!(bars.num_values(), 2);
        let closes: Vec<f64> = bars
            .sequences()
            .map(|bar| bar.get_f64("close").unwrap())
            .collect();
        assert_eq!(closes, vec![100.5, 101.25]);
    }

    #[test]
    fn test_get_at_past_end() {
        let mut fields = Element::array("fields");
        fields.append("PX_LAST").unwrap();
        assert_eq!(fields.get_at::<String>(0).as_deref(), Some("PX_LAST"));
        assert_eq!(fields.get_at::<String>(1), None);
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut request = Element::sequence("IntradayBarRequest");
        request.set("interval", 60i32).unwrap();
        request.set("interval", 5i32).unwrap();
        assert_eq!(request.num_elements(), 1);
        assert_eq!(request.get_i64("interval").unwrap(), 5);
    }

    #[test]
    fn test_append_on_scalar_is_an_error() {
        let mut scalar = Element::scalar("security", "IBM US Equity");
        let err = scalar.append("x").unwrap_err();
        assert!(matches!(err, ElementError::WrongKind { .. }));
    }

    #[test]
    fn test_append_to_creates_array_child() {
        let mut request = Element::sequence("ReferenceDataRequest");
        request.append_to("securities", "IBM US Equity").unwrap();
        request.append_to("securities", "MSFT US Equity").unwrap();
        let securities = request.get_element("securities").unwrap();
        assert!(securities.is_array());
        assert_eq!(securities.num_values(), 2);
    }

    #[test]
    fn test_display_renders_tree() {
        let security = sample_security();
        let rendered = security.to_string();
        assert!(rendered.starts_with("securityData = {\n"));
        assert!(rendered.contains("    security = IBM US Equity\n"));
        assert!(rendered.contains("    fieldData = {\n"));
        assert!(rendered.contains("        PX_LAST = 183.72\n"));
    }
}
