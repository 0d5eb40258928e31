use chrono::{DateTime, Utc};
use super::{CertificateRecord, KubercertError};

#[derive(Debug, Clone)]
pub struct CertificateSnapshot {
    certificates: Vec<CertificateRecord>,
    chain_len: usize,
    captured_at: DateTime<Utc>,
}

impl CertificateSnapshot {
    pub fn from_chain(chain: Vec<CertificateRecord>, captured_at: DateTime<Utc>) -> Result<Self, KubercertError> {
        let chain_len = chain.len();
        let certificates: Vec<CertificateRecord> = chain.into_iter().filter(|c| !c.is_ca).collect();
        if certificates.is_empty() {
            return Err(KubercertError::empty_chain(format!(
                "peer presented {} certificate(s), none of them a leaf", chain_len
            )));
        }
        Ok(Self { certificates, chain_len, captured_at })
    }

    pub fn leaf(&self) -> &CertificateRecord {
        &self.certificates[0]
    }

    pub fn certificates(&self) -> &[CertificateRecord] { &self.certificates }
    pub fn chain_len(&self) -> usize { self.chain_len }
    pub fn captured_at(&self) -> DateTime<Utc> { self.captured_at }
}
