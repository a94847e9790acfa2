use std::sync::Arc;

use crate::{
    LocalAddressResolver, OsLocalAddressResolver, RelayLogger, SocketConnector, SshRvError,
    SshRvSettings, TracingRelayLogger, DEFAULT_LOCAL_SSH_PORT,
};

const PROCESS_NAME: &str = "SshRv";

/// Reverse tunnel between the local ssh daemon and a remote streaming endpoint.
pub struct SshRv {
    pub destination: String,
    pub streaming_port: u16,
    pub local_port: u16,
    settings: SshRvSettings,
    logger: Arc<dyn RelayLogger + Send + Sync + 'static>,
    resolver: Arc<dyn LocalAddressResolver + Send + Sync + 'static>,
}

impl SshRv {
    pub fn new(destination: impl Into<String>, port: u16, local_port: u16) -> Self {
        Self {
            destination: destination.into(),
            streaming_port: port,
            local_port,
            settings: SshRvSettings::default(),
            logger: Arc::new(TracingRelayLogger),
            resolver: Arc::new(OsLocalAddressResolver),
        }
    }

    pub fn set_settings(mut self, settings: SshRvSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn set_logger(mut self, logger: Arc<dyn RelayLogger + Send + Sync + 'static>) -> Self {
        self.logger = logger;
        self
    }

    pub fn set_resolver(
        mut self,
        resolver: Arc<dyn LocalAddressResolver + Send + Sync + 'static>,
    ) -> Self {
        self.resolver = resolver;
        self
    }

    // The local ssh port stays 22 unless the settings explicitly opt into local_port.
    pub fn get_local_ssh_port(&self) -> u16 {
        if self.settings.use_configured_local_port {
            self.local_port
        } else {
            DEFAULT_LOCAL_SSH_PORT
        }
    }

    pub async fn run(&self) -> bool {
        self.try_run().await.is_ok()
    }

    pub async fn try_run(&self) -> Result<(), SshRvError> {
        let host = match self.resolver.resolve_local_address().await {
            Ok(host) => host,
            Err(err) => {
                self.logger.write_error(
                    PROCESS_NAME,
                    "Can not resolve local address".to_string(),
                    Some(&err),
                );
                return Err(err);
            }
        };

        let socket_connector = SocketConnector::new(
            host,
            self.get_local_ssh_port(),
            self.destination.as_str(),
            self.streaming_port,
        )
        .set_settings(self.settings.clone())
        .set_logger(self.logger.clone());

        socket_connector.connect().await
    }
}
