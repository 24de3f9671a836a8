//! Element and message names.
//!
//! Names are cheap to clone and compare; the well-known names of the
//! query services are interned once as statics.

use once_cell::sync::Lazy;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A string key naming an element or a message type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    pub fn new(name: &str) -> Self {
        Name(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Name::new(name)
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Name(Arc::from(name))
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

// response payloads
pub static RESPONSE_ERROR: Lazy<Name> = Lazy::new(|| Name::new("responseError"));
pub static CATEGORY: Lazy<Name> = Lazy::new(|| Name::new("category"));
pub static MESSAGE: Lazy<Name> = Lazy::new(|| Name::new("message"));
pub static SECURITY_DATA: Lazy<Name> = Lazy::new(|| Name::new("securityData"));
pub static SECURITY: Lazy<Name> = Lazy::new(|| Name::new("security"));
pub static SECURITY_ERROR: Lazy<Name> = Lazy::new(|| Name::new("securityError"));
pub static FIELD_DATA: Lazy<Name> = Lazy::new(|| Name::new("fieldData"));
pub static FIELD_EXCEPTIONS: Lazy<Name> = Lazy::new(|| Name::new("fieldExceptions"));
pub static FIELD_ID: Lazy<Name> = Lazy::new(|| Name::new("fieldId"));
pub static ERROR_INFO: Lazy<Name> = Lazy::new(|| Name::new("errorInfo"));
pub static BAR_DATA: Lazy<Name> = Lazy::new(|| Name::new("barData"));
pub static BAR_TICK_DATA: Lazy<Name> = Lazy::new(|| Name::new("barTickData"));
pub static FIELD_INFO: Lazy<Name> = Lazy::new(|| Name::new("fieldInfo"));
pub static FIELD_ERROR: Lazy<Name> = Lazy::new(|| Name::new("fieldError"));

// session and service status message types
pub static SESSION_STARTED: Lazy<Name> = Lazy::new(|| Name::new("SessionStarted"));
pub static SESSION_TERMINATED: Lazy<Name> = Lazy::new(|| Name::new("SessionTerminated"));
pub static SESSION_STARTUP_FAILURE: Lazy<Name> = Lazy::new(|| Name::new("SessionStartupFailure"));
pub static SERVICE_OPENED: Lazy<Name> = Lazy::new(|| Name::new("ServiceOpened"));
