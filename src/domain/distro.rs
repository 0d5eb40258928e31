use super::CertificateRecord;

pub const GENERIC_DISTRO: &str = "kubernetes";

pub fn detect_distro(leaf: &CertificateRecord) -> &str {
    let cn = leaf.subject_cn.as_str();
    if cn.is_empty() { GENERIC_DISTRO } else { cn }
}
