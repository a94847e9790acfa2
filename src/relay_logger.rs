use crate::SshRvError;

pub trait RelayLogger {
    fn write_info(&self, process: &str, message: String);
    fn write_warning(&self, process: &str, message: String, err: Option<&SshRvError>);
    fn write_error(&self, process: &str, message: String, err: Option<&SshRvError>);
}

pub struct TracingRelayLogger;

impl RelayLogger for TracingRelayLogger {
    fn write_info(&self, process: &str, message: String) {
        tracing::info!(process, "{}", message);
    }

    fn write_warning(&self, process: &str, message: String, err: Option<&SshRvError>) {
        match err {
            Some(err) => tracing::warn!(process, error = %err, "{}", message),
            None => tracing::warn!(process, "{}", message),
        }
    }

    fn write_error(&self, process: &str, message: String, err: Option<&SshRvError>) {
        match err {
            Some(err) => tracing::error!(process, error = %err, "{}", message),
            None => tracing::error!(process, "{}", message),
        }
    }
}
