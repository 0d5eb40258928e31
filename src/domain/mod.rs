mod report;
mod cert;
mod snapshot;
mod expiry;
mod distro;
mod renewal;
mod target;
mod error;

pub use report::{HostReport, OutputFormat};
pub use cert::CertificateRecord;
pub use snapshot::CertificateSnapshot;
pub use expiry::{ExpiryAssessment, format_remaining, DEFAULT_EXPIRE_DAYS};
pub use distro::{detect_distro, GENERIC_DISTRO};
pub use renewal::{RenewalOutcome, RenewalReport, RenewalStep};
pub use target::{HostConnectionTarget, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use error::{ErrorClass, KubercertError};
