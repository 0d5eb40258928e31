use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateRecord {
    pub issuer_cn: String,
    pub subject_cn: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub dns_names: Vec<String>,
    pub is_ca: bool,
    pub sha256_fingerprint: String,
}

impl CertificateRecord {
    pub fn short_fingerprint(&self) -> String {
        let parts: Vec<&str> = self.sha256_fingerprint.split(':').collect();
        if parts.len() <= 6 {
            return self.sha256_fingerprint.clone();
        }
        format!("{}:{}:...:{}", parts[0], parts[1], parts[parts.len() - 1])
    }

    pub fn dns_names_joined(&self) -> String {
        self.dns_names.join(" ")
    }
}
