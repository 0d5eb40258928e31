use tracing::{debug, info};
use crate::domain::*;
use crate::ports::*;
use super::parse_certificate;

pub struct InspectCertificatesUseCase<D, T, L, C>
where
    D: DnsResolver,
    T: TcpDialer,
    L: TlsHandshaker,
    C: Clock,
{
    dns: D,
    tcp: T,
    tls: L,
    clock: C,
}

impl<D, T, L, C> InspectCertificatesUseCase<D, T, L, C>
where
    D: DnsResolver,
    T: TcpDialer,
    L: TlsHandshaker,
    C: Clock,
{
    pub fn new(dns: D, tcp: T, tls: L, clock: C) -> Self {
        Self { dns, tcp, tls, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub async fn execute(&self, target: &HostConnectionTarget) -> Result<CertificateSnapshot, KubercertError> {
        let timeout = target.timeout();
        info!("connecting to {}", target.as_socket_str());

        let ip = match target.ip_literal() {
            Some(ip) => ip,
            None => {
                let ips = self.clock.timeout(timeout, self.dns.resolve(target.host())).await??;
                ips.first().copied()
                    .ok_or_else(|| KubercertError::connection(format!("no IP addresses for {}", target.host())))?
            }
        };

        let tcp_conn = self.clock.timeout(timeout, self.tcp.connect(ip, target.port())).await??;
        let session = self.clock.timeout(timeout, self.tls.handshake(tcp_conn.stream, target.host())).await??;
        let captured_at = self.clock.now();

        let chain = session.peer_certs.iter()
            .map(|der| parse_certificate(der))
            .collect::<Result<Vec<_>, _>>()?;
        drop(session);

        for cert in &chain {
            debug!(
                subject = %cert.subject_cn,
                issuer = %cert.issuer_cn,
                ca = cert.is_ca,
                fingerprint = %cert.short_fingerprint(),
                "peer certificate"
            );
        }

        CertificateSnapshot::from_chain(chain, captured_at)
            .map_err(|e| KubercertError::new(e.class, format!("{}: {}", target.as_socket_str(), e.message)))
    }
}
