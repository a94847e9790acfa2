use std::{sync::Arc, time::Duration};

use rust_extensions::date_time::DateTimeAsMicroseconds;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
};

use crate::{
    RelayDirection, RelayLeg, RelayLogger, RelayTeardown, SshRvError, SshRvSettings,
    TracingRelayLogger, TunnelState, TunnelStateHolder, MAX_BUFFER_SIZE,
};

const PROCESS_NAME: &str = "SocketConnector";

pub struct RelayCopyResult {
    pub direction: RelayDirection,
    pub transferred: u64,
    pub err: Option<std::io::Error>,
}

pub struct SocketConnector {
    pub id: i64,
    pub local_host: String,
    pub local_port: u16,
    pub remote_destination: String,
    pub remote_port: u16,
    settings: SshRvSettings,
    logger: Arc<dyn RelayLogger + Send + Sync + 'static>,
    state: TunnelStateHolder,
}

impl SocketConnector {
    pub fn new(
        local_host: impl Into<String>,
        local_port: u16,
        remote_destination: impl Into<String>,
        remote_port: u16,
    ) -> Self {
        Self {
            id: DateTimeAsMicroseconds::now().unix_microseconds,
            local_host: local_host.into(),
            local_port,
            remote_destination: remote_destination.into(),
            remote_port,
            settings: SshRvSettings::default(),
            logger: Arc::new(TracingRelayLogger),
            state: TunnelStateHolder::new(),
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

    pub fn get_state(&self) -> TunnelState {
        self.state.get()
    }

    pub fn to_string(&self) -> String {
        format!(
            "[{}] {}:{}<->{}:{}",
            self.id, self.local_host, self.local_port, self.remote_destination, self.remote_port
        )
    }

    pub async fn connect(&self) -> Result<(), SshRvError> {
        if !self.state.try_start_connecting() {
            return Err(SshRvError::SessionAlreadyStarted);
        }

        let result = self.connect_and_relay().await;
        self.state.set_closed();

        if let Err(err) = &result {
            self.logger.write_error(
                PROCESS_NAME,
                format!("Tunnel {} failed", self.to_string()),
                Some(err),
            );
        }

        result
    }

    async fn connect_and_relay(&self) -> Result<(), SshRvError> {
        self.validate()?;

        let local_stream = self
            .connect_leg(RelayLeg::Local, &self.local_host, self.local_port)
            .await?;

        let remote_stream = match self
            .connect_leg(RelayLeg::Remote, &self.remote_destination, self.remote_port)
            .await
        {
            Ok(stream) => stream,
            Err(err) => {
                let mut local_stream = local_stream;
                let _ = local_stream.shutdown().await;
                return Err(err);
            }
        };

        self.state.set_relaying();
        self.logger.write_info(
            PROCESS_NAME,
            format!("Tunnel {} is established", self.to_string()),
        );

        let started = DateTimeAsMicroseconds::now();
        let results = relay(local_stream, remote_stream, self.settings.get_buffer_size()).await;

        let mut transferred = Vec::with_capacity(2);
        for result in results {
            if let Some(err) = result.err {
                let err = SshRvError::RelayError {
                    direction: result.direction,
                    err,
                };
                self.logger.write_warning(
                    PROCESS_NAME,
                    format!("Tunnel {} relay interrupted", self.to_string()),
                    Some(&err),
                );
            }

            transferred.push(format!("{}: {}", result.direction, result.transferred));
        }

        let duration = Duration::from_micros(
            (DateTimeAsMicroseconds::now().unix_microseconds - started.unix_microseconds).max(0)
                as u64,
        );

        self.logger.write_info(
            PROCESS_NAME,
            format!(
                "Tunnel {} is closed after {:?}. Bytes {}",
                self.to_string(),
                duration,
                transferred.join(", ")
            ),
        );

        Ok(())
    }

    fn validate(&self) -> Result<(), SshRvError> {
        if self.local_host.is_empty() {
            return Err(SshRvError::InvalidEndpoint(
                "Local host is empty".to_string(),
            ));
        }

        if self.remote_destination.is_empty() {
            return Err(SshRvError::InvalidEndpoint(
                "Remote destination is empty".to_string(),
            ));
        }

        if self.local_port == 0 {
            return Err(SshRvError::InvalidEndpoint(format!(
                "Local port must be in range 1..65535. Host: {}",
                self.local_host
            )));
        }

        if self.remote_port == 0 {
            return Err(SshRvError::InvalidEndpoint(format!(
                "Remote port must be in range 1..65535. Destination: {}",
                self.remote_destination
            )));
        }

        Ok(())
    }

    async fn connect_leg(
        &self,
        leg: RelayLeg,
        host: &str,
        port: u16,
    ) -> Result<TcpStream, SshRvError> {
        let future = TcpStream::connect((host, port));

        let result = match self.settings.get_connect_timeout() {
            Some(timeout) => match tokio::time::timeout(timeout, future).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(SshRvError::ConnectTimeout {
                        leg,
                        endpoint: format!("{}:{}", host, port),
                    });
                }
            },
            None => future.await,
        };

        match result {
            Ok(stream) => {
                let _ = stream.set_nodelay(true);
                Ok(stream)
            }
            Err(err) => Err(SshRvError::ConnectError {
                leg,
                endpoint: format!("{}:{}", host, port),
                err,
            }),
        }
    }
}

/// Pipes both streams until either side finishes. Both copy tasks are joined before returning.
pub async fn relay(
    local_stream: TcpStream,
    remote_stream: TcpStream,
    buffer_size: usize,
) -> Vec<RelayCopyResult> {
    let teardown = Arc::new(RelayTeardown::new());

    let (local_reader, local_writer) = local_stream.into_split();
    let (remote_reader, remote_writer) = remote_stream.into_split();

    let local_to_remote = tokio::spawn(copy_stream(
        RelayDirection::LocalToRemote,
        local_reader,
        remote_writer,
        teardown.clone(),
        buffer_size,
    ));

    let remote_to_local = tokio::spawn(copy_stream(
        RelayDirection::RemoteToLocal,
        remote_reader,
        local_writer,
        teardown.clone(),
        buffer_size,
    ));

    let (local_to_remote, remote_to_local) =
        futures::future::join(local_to_remote, remote_to_local).await;

    let mut result = Vec::with_capacity(2);

    for (direction, joined) in [
        (RelayDirection::LocalToRemote, local_to_remote),
        (RelayDirection::RemoteToLocal, remote_to_local),
    ] {
        match joined {
            Ok(copy_result) => result.push(copy_result),
            Err(err) => {
                teardown.stop();
                result.push(RelayCopyResult {
                    direction,
                    transferred: 0,
                    err: Some(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Relay task failed: {}", err),
                    )),
                });
            }
        }
    }

    result
}

async fn copy_stream(
    direction: RelayDirection,
    mut reader: impl AsyncRead + Unpin,
    mut writer: impl AsyncWrite + Unpin,
    teardown: Arc<RelayTeardown>,
    buffer_size: usize,
) -> RelayCopyResult {
    let mut buf = vec![0u8; buffer_size.clamp(1, MAX_BUFFER_SIZE)];
    let mut transferred = 0u64;
    let mut err = None;

    loop {
        let result = tokio::select! {
            result = reader.read(&mut buf) => result,
            _ = teardown.wait_stopped() => break,
        };

        let size = match result {
            Ok(0) => break,
            Ok(size) => size,
            Err(read_err) => {
                err = Some(read_err);
                break;
            }
        };

        let result = tokio::select! {
            result = writer.write_all(&buf[..size]) => result,
            _ = teardown.wait_stopped() => break,
        };

        if let Err(write_err) = result {
            err = Some(write_err);
            break;
        }

        transferred += size as u64;
    }

    teardown.stop();
    let _ = writer.shutdown().await;

    RelayCopyResult {
        direction,
        transferred,
        err,
    }
}
