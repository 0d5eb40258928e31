use std::net::IpAddr;
use crate::domain::KubercertError;

pub trait DnsResolver: Send + Sync {
    fn resolve(&self, host: &str) -> impl std::future::Future<Output = Result<Vec<IpAddr>, KubercertError>> + Send;
}
