use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelState {
    Init,
    Connecting,
    Relaying,
    Closed,
}

impl TunnelState {
    fn as_u8(&self) -> u8 {
        match self {
            TunnelState::Init => 0,
            TunnelState::Connecting => 1,
            TunnelState::Relaying => 2,
            TunnelState::Closed => 3,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => TunnelState::Init,
            1 => TunnelState::Connecting,
            2 => TunnelState::Relaying,
            _ => TunnelState::Closed,
        }
    }
}

pub struct TunnelStateHolder(AtomicU8);

impl TunnelStateHolder {
    pub fn new() -> Self {
        Self(AtomicU8::new(TunnelState::Init.as_u8()))
    }

    pub fn get(&self) -> TunnelState {
        TunnelState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Only one caller may move the session out of `Init`.
    pub fn try_start_connecting(&self) -> bool {
        self.0
            .compare_exchange(
                TunnelState::Init.as_u8(),
                TunnelState::Connecting.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    pub fn set_relaying(&self) {
        self.0
            .store(TunnelState::Relaying.as_u8(), Ordering::Release);
    }

    pub fn set_closed(&self) {
        self.0.store(TunnelState::Closed.as_u8(), Ordering::Release);
    }
}
