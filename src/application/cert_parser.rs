use std::fmt::Write;
use chrono::{DateTime, Utc};
use x509_parser::prelude::*;
use crate::domain::{CertificateRecord, KubercertError};

pub fn parse_certificate(der: &[u8]) -> Result<CertificateRecord, KubercertError> {
    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| KubercertError::certificate(format!("failed to parse certificate: {}", e)))?;

    let subject_cn = first_common_name(cert.subject());
    let issuer_cn = first_common_name(cert.issuer());

    let dns_names: Vec<String> = cert.subject_alternative_name().ok().flatten()
        .map(|san| san.value.general_names.iter()
            .filter_map(|gn| match gn { GeneralName::DNSName(dns) => Some(dns.to_string()), _ => None })
            .collect())
        .unwrap_or_default();

    let is_ca = cert.basic_constraints().ok().flatten()
        .map(|bc| bc.value.ca)
        .unwrap_or(false);

    let not_before = asn1_to_utc(cert.validity().not_before)?;
    let not_after = asn1_to_utc(cert.validity().not_after)?;

    Ok(CertificateRecord {
        issuer_cn,
        subject_cn,
        not_before,
        not_after,
        dns_names,
        is_ca,
        sha256_fingerprint: compute_sha256_fingerprint(der),
    })
}

fn first_common_name(name: &X509Name<'_>) -> String {
    name.iter_common_name().next()
        .and_then(|cn| cn.as_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn asn1_to_utc(time: ASN1Time) -> Result<DateTime<Utc>, KubercertError> {
    DateTime::from_timestamp(time.timestamp(), 0)
        .ok_or_else(|| KubercertError::certificate(format!("validity timestamp out of range: {}", time)))
}

fn compute_sha256_fingerprint(der: &[u8]) -> String {
    let digest = ring::digest::digest(&ring::digest::SHA256, der);
    let mut result = String::with_capacity(95);
    for (i, byte) in digest.as_ref().iter().enumerate() {
        if i > 0 { result.push(':'); }
        let _ = write!(&mut result, "{:02x}", byte);
    }
    result
}
