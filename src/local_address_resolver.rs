use crate::SshRvError;

#[async_trait::async_trait]
pub trait LocalAddressResolver {
    async fn resolve_local_address(&self) -> Result<String, SshRvError>;
}

pub struct OsLocalAddressResolver;

#[async_trait::async_trait]
impl LocalAddressResolver for OsLocalAddressResolver {
    async fn resolve_local_address(&self) -> Result<String, SshRvError> {
        let ip = local_ip_address::local_ip()?;
        Ok(ip.to_string())
    }
}

pub struct StaticLocalAddressResolver {
    address: String,
}

impl StaticLocalAddressResolver {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn loopback() -> Self {
        Self::new("127.0.0.1")
    }
}

#[async_trait::async_trait]
impl LocalAddressResolver for StaticLocalAddressResolver {
    async fn resolve_local_address(&self) -> Result<String, SshRvError> {
        if self.address.is_empty() {
            return Err(SshRvError::ResolutionError(
                "Static local address is empty".to_string(),
            ));
        }

        Ok(self.address.clone())
    }
}
