use chrono::{DateTime, Utc};
use crate::domain::{HostReport, KubercertError, OutputFormat};
use crate::ports::Renderer;

const STAMP: &str = "%b %-d, %Y %H:%M";

fn stamp(t: &DateTime<Utc>) -> String {
    t.format(STAMP).to_string()
}

pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self { Self }
}

impl Default for TextRenderer {
    fn default() -> Self { Self::new() }
}

impl Renderer for TextRenderer {
    fn render(&self, report: &HostReport) -> Result<String, KubercertError> {
        let mut out = String::from("\n");
        out.push_str(&format!("Host: {}:{}\n", report.host, report.port));
        out.push_str(&format!("ExpiredAt: {}\n", stamp(&report.expired_at)));
        out.push_str(&format!("Expired: {}\n", report.expired));
        out.push_str(&format!("Start expire days: {}\n", report.expire_days));
        out.push_str("Certs:\n");
        for cert in &report.certs {
            out.push_str(&format!("\tIssuer: {}\n", cert.issuer_cn));
            out.push_str(&format!("\tSubject: {}\n", cert.subject_cn));
            out.push_str(&format!("\tNot Before: {}\n", stamp(&cert.not_before)));
            out.push_str(&format!("\tNot After: {}\n", stamp(&cert.not_after)));
            out.push_str(&format!("\tDNS names: {}\n", cert.dns_names_joined()));
            out.push('\n');
        }
        Ok(out)
    }
}

pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self { Self }
}

impl Default for JsonRenderer {
    fn default() -> Self { Self::new() }
}

impl Renderer for JsonRenderer {
    fn render(&self, report: &HostReport) -> Result<String, KubercertError> {
        let mut out = serde_json::to_string_pretty(report)
            .map_err(|e| KubercertError::other(format!("failed to encode report: {}", e)))?;
        out.push('\n');
        Ok(out)
    }
}

pub struct NoneRenderer;

impl Renderer for NoneRenderer {
    fn render(&self, _report: &HostReport) -> Result<String, KubercertError> {
        Ok(String::new())
    }
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new()),
        OutputFormat::Json => Box::new(JsonRenderer::new()),
        OutputFormat::None => Box::new(NoneRenderer),
    }
}
