use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayLeg {
    Local,
    Remote,
}

impl fmt::Display for RelayLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayLeg::Local => write!(f, "local"),
            RelayLeg::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayDirection {
    LocalToRemote,
    RemoteToLocal,
}

impl fmt::Display for RelayDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayDirection::LocalToRemote => write!(f, "local->remote"),
            RelayDirection::RemoteToLocal => write!(f, "remote->local"),
        }
    }
}
