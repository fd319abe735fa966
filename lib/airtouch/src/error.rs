use std::fmt;

#[derive(Debug, PartialEq)]
pub enum Error {
    UnknownGroup(u8),
    InvalidPercentage(u8),
    NotConnected,
    Connection(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGroup(number) => write!(f, "unknown group {number}"),
            Self::InvalidPercentage(percentage) => {
                write!(f, "invalid open percentage {percentage}")
            }
            Self::NotConnected => write!(f, "controller is not connected"),
            Self::Connection(reason) => write!(f, "connection error: {reason}"),
        }
    }
}

impl std::error::Error for Error {}
