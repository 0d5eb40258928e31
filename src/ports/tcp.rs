use std::net::IpAddr;
use crate::domain::KubercertError;
use super::io::BoxedIoStream;

pub struct TcpConnection {
    pub stream: BoxedIoStream,
}

pub trait TcpDialer: Send + Sync {
    fn connect(&self, ip: IpAddr, port: u16) -> impl std::future::Future<Output = Result<TcpConnection, KubercertError>> + Send;
}
