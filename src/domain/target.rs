use std::net::IpAddr;
use std::time::Duration;
use super::KubercertError;

pub const DEFAULT_PORT: u16 = 6443;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConnectionTarget {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HostConnectionTarget {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Result<Self, KubercertError> {
        let host = host.into().trim().to_string();
        if host.is_empty() {
            return Err(KubercertError::input("host must not be empty"));
        }
        if port == 0 {
            return Err(KubercertError::input("port must be in range 1-65535"));
        }
        let bare = host.strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .filter(|h| h.parse::<IpAddr>().is_ok())
            .map(str::to_string);
        let host = bare.unwrap_or(host);
        let timeout = if timeout.is_zero() { DEFAULT_TIMEOUT } else { timeout };
        Ok(Self { host, port, timeout })
    }

    pub fn host(&self) -> &str { &self.host }
    pub fn port(&self) -> u16 { self.port }
    pub fn timeout(&self) -> Duration { self.timeout }

    pub fn ip_literal(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }

    pub fn as_socket_str(&self) -> String {
        match self.ip_literal() {
            Some(IpAddr::V6(v6)) => format!("[{}]:{}", v6, self.port),
            _ => format!("{}:{}", self.host, self.port),
        }
    }
}
