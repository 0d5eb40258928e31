use crate::domain::{HostReport, KubercertError};

pub trait Renderer: Send + Sync {
    fn render(&self, report: &HostReport) -> Result<String, KubercertError>;
}
