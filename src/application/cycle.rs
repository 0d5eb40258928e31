use tracing::{error, info};
use crate::domain::*;
use crate::ports::*;
use super::{Config, InspectCertificatesUseCase, RenewCertificateUseCase};

#[derive(Debug, Clone)]
pub struct Inspection {
    pub snapshot: CertificateSnapshot,
    pub assessment: ExpiryAssessment,
    pub report: HostReport,
}

pub struct CertificateCycle<D, T, L, C, R>
where
    D: DnsResolver,
    T: TcpDialer,
    L: TlsHandshaker,
    C: Clock,
    R: CommandRunner,
{
    inspect: InspectCertificatesUseCase<D, T, L, C>,
    renew: RenewCertificateUseCase<R>,
}

impl<D, T, L, C, R> CertificateCycle<D, T, L, C, R>
where
    D: DnsResolver,
    T: TcpDialer,
    L: TlsHandshaker,
    C: Clock,
    R: CommandRunner,
{
    pub fn new(inspect: InspectCertificatesUseCase<D, T, L, C>, renew: RenewCertificateUseCase<R>) -> Self {
        Self { inspect, renew }
    }

    pub fn renewer(&self) -> &RenewCertificateUseCase<R> {
        &self.renew
    }

    pub async fn inspect(&self, config: &Config) -> Result<Inspection, KubercertError> {
        let target = config.target()?;
        let snapshot = self.inspect.execute(&target).await?;
        let assessment = ExpiryAssessment::evaluate(
            Some(snapshot.leaf().not_after),
            config.expire_days,
            self.inspect.clock().now(),
        );
        let report = HostReport::new(&target, &snapshot, &assessment, config.dry_run);

        if assessment.is_expired {
            error!(
                "certificate {} on {} expires {} (within {} days)",
                snapshot.leaf().subject_cn,
                target.as_socket_str(),
                snapshot.leaf().not_after.format("%b %-d, %Y %H:%M"),
                config.expire_days,
            );
        } else {
            info!("certificate on {} valid for {} beyond the renewal window", target.as_socket_str(), report.expired);
        }

        Ok(Inspection { snapshot, assessment, report })
    }

    pub async fn renew_if_due(&self, inspection: &Inspection, command: Option<&str>, force: bool) -> Result<Option<RenewalReport>, KubercertError> {
        if !inspection.assessment.is_expired && !force {
            info!("nothing to renew");
            return Ok(None);
        }
        self.renew.execute(inspection.snapshot.leaf(), command).await.map(Some)
    }
}
