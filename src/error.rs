use std::fmt;

use crate::{RelayDirection, RelayLeg};

#[derive(Debug)]
pub enum SshRvError {
    ResolutionError(String),
    InvalidEndpoint(String),
    ConnectError {
        leg: RelayLeg,
        endpoint: String,
        err: std::io::Error,
    },
    ConnectTimeout {
        leg: RelayLeg,
        endpoint: String,
    },
    RelayError {
        direction: RelayDirection,
        err: std::io::Error,
    },
    SessionAlreadyStarted,
    SettingsError(String),
}

impl SshRvError {
    pub fn is_connect_error(&self) -> bool {
        matches!(
            self,
            SshRvError::ConnectError { .. } | SshRvError::ConnectTimeout { .. }
        )
    }
}

impl fmt::Display for SshRvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SshRvError::ResolutionError(msg) => write!(f, "ResolutionError: {}", msg),
            SshRvError::InvalidEndpoint(msg) => write!(f, "InvalidEndpoint: {}", msg),
            SshRvError::ConnectError { leg, endpoint, err } => {
                write!(f, "ConnectError: {} leg {}. Err: {}", leg, endpoint, err)
            }
            SshRvError::ConnectTimeout { leg, endpoint } => {
                write!(f, "ConnectError: timeout on {} leg {}", leg, endpoint)
            }
            SshRvError::RelayError { direction, err } => {
                write!(f, "RelayError: {}. Err: {}", direction, err)
            }
            SshRvError::SessionAlreadyStarted => write!(f, "Tunnel session is already started"),
            SshRvError::SettingsError(msg) => write!(f, "SettingsError: {}", msg),
        }
    }
}

impl std::error::Error for SshRvError {}

impl From<serde_json::Error> for SshRvError {
    fn from(error: serde_json::Error) -> Self {
        SshRvError::SettingsError(error.to_string())
    }
}

impl From<local_ip_address::Error> for SshRvError {
    fn from(error: local_ip_address::Error) -> Self {
        SshRvError::ResolutionError(format!("{:?}", error))
    }
}
