use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpStream;
use tracing::debug;
use crate::domain::KubercertError;
use crate::ports::{TcpDialer, TcpConnection};

pub struct TokioTcpDialer;

impl TokioTcpDialer {
    pub fn new() -> Self { Self }
}

impl Default for TokioTcpDialer {
    fn default() -> Self { Self::new() }
}

impl TcpDialer for TokioTcpDialer {
    async fn connect(&self, ip: IpAddr, port: u16) -> Result<TcpConnection, KubercertError> {
        let addr = SocketAddr::new(ip, port);
        debug!("dialing {}", addr);
        let stream = TcpStream::connect(addr).await.map_err(|e| {
            let msg = match e.kind() {
                std::io::ErrorKind::ConnectionRefused => format!("connection refused: {}", addr),
                std::io::ErrorKind::TimedOut => format!("connection timed out: {}", addr),
                _ => format!("TCP connect failed to {}: {}", addr, e),
            };
            KubercertError::connection(msg)
        })?;
        Ok(TcpConnection { stream: Box::new(stream) })
    }
}
