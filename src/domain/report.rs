use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::Serialize;
use super::{detect_distro, CertificateRecord, CertificateSnapshot, ExpiryAssessment, HostConnectionTarget, KubercertError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    None,
}

impl FromStr for OutputFormat {
    type Err = KubercertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "none" => Ok(OutputFormat::None),
            other => Err(KubercertError::input(format!("unknown output format '{}', expected text, json or none", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HostReport {
    pub host: String,
    pub port: u16,
    pub certs: Vec<CertificateRecord>,
    pub chain_len: usize,
    pub expired: String,
    pub expired_at: DateTime<Utc>,
    pub expire_days: u32,
    pub is_expired: bool,
    pub distro: String,
    pub dry_run: bool,
    pub captured_at: DateTime<Utc>,
}

impl HostReport {
    pub fn new(target: &HostConnectionTarget, snapshot: &CertificateSnapshot, assessment: &ExpiryAssessment, dry_run: bool) -> Self {
        Self {
            host: target.host().to_string(),
            port: target.port(),
            certs: snapshot.certificates().to_vec(),
            chain_len: snapshot.chain_len(),
            expired: assessment.remaining_display(),
            expired_at: assessment.expired_at,
            expire_days: assessment.expire_days,
            is_expired: assessment.is_expired,
            distro: detect_distro(snapshot.leaf()).to_string(),
            dry_run,
            captured_at: snapshot.captured_at(),
        }
    }
}
