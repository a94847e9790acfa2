use std::time::Duration;

use serde::*;

use crate::SshRvError;

pub const DEFAULT_LOCAL_SSH_PORT: u16 = 22;
pub const MAX_BUFFER_SIZE: usize = 4 * 1024 * 1024;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SshRvSettings {
    /// When false the local leg always targets port 22 and the constructor's `local_port` is ignored.
    #[serde(default)]
    pub use_configured_local_port: bool,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: Option<u64>,
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_connect_timeout_ms() -> Option<u64> {
    Some(5000)
}

fn default_buffer_size() -> usize {
    64 * 1024
}

impl Default for SshRvSettings {
    fn default() -> Self {
        Self {
            use_configured_local_port: false,
            connect_timeout_ms: default_connect_timeout_ms(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl SshRvSettings {
    pub fn get_connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    pub fn get_buffer_size(&self) -> usize {
        if self.buffer_size == 0 {
            return default_buffer_size();
        }

        self.buffer_size.min(MAX_BUFFER_SIZE)
    }

    pub fn parse(src: &str) -> Result<Self, SshRvError> {
        let result: Self = serde_json::from_str(src)?;

        if result.buffer_size > MAX_BUFFER_SIZE {
            return Err(SshRvError::SettingsError(format!(
                "buffer_size {} exceeds max {}",
                result.buffer_size, MAX_BUFFER_SIZE
            )));
        }

        Ok(result)
    }

    pub async fn load(path: &str) -> Result<Self, SshRvError> {
        let file = rust_extensions::file_utils::format_path(path);
        let content = tokio::fs::read_to_string(file.as_str()).await;

        let content = match content {
            Ok(content) => content,
            Err(err) => {
                return Err(SshRvError::SettingsError(format!(
                    "Error reading settings file: {}. Err: {:?}",
                    file.as_str(),
                    err
                )));
            }
        };

        Self::parse(content.as_str())
    }
}
