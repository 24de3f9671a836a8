use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElementError {
    #[error("element not found: {0}")]
    NotFound(String),
    #[error("element {name} is {actual}, expected {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("element {name} does not hold a {expected} value")]
    TypeMismatch { name: String, expected: &'static str },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session not started")]
    NotStarted,
    #[error("session already started")]
    AlreadyStarted,
    #[error("service not opened: {0}")]
    ServiceNotOpened(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("session terminated")]
    Terminated,
}
