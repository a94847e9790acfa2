mod error;
pub use error::*;
mod relay_leg;
pub use relay_leg::*;
mod relay_logger;
pub use relay_logger::*;
mod relay_teardown;
pub use relay_teardown::*;
mod tunnel_state;
pub use tunnel_state::*;
mod ssh_rv_settings;
pub use ssh_rv_settings::*;
mod local_address_resolver;
pub use local_address_resolver::*;
mod socket_connector;
pub use socket_connector::*;
mod ssh_rv;
pub use ssh_rv::*;
