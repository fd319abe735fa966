use std::fmt;

#[derive(Debug)]
pub enum Error {
    Controller(airtouch::Error),
    NotReady(airtouch::Error),
    GroupMismatch { expected: u8, actual: u8 },
    MissingVariable(&'static str),
    InvalidVariable(&'static str, String),
}

impl From<airtouch::Error> for Error {
    fn from(err: airtouch::Error) -> Self {
        Self::Controller(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Controller(err) => write!(f, "controller error: {err}"),
            Self::NotReady(err) => write!(f, "controller is not ready: {err}"),
            Self::GroupMismatch { expected, actual } => {
                write!(f, "expected group {expected}, controller returned {actual}")
            }
            Self::MissingVariable(name) => write!(f, "set ENV variable {name}"),
            Self::InvalidVariable(name, value) => {
                write!(f, "invalid value of ENV variable {name}: {value}")
            }
        }
    }
}

impl std::error::Error for Error {}
