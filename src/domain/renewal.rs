use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewalStep {
    pub description: String,
    pub command: String,
    pub sudo: bool,
}

impl RenewalStep {
    pub fn new(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self { description: description.into(), command: command.into(), sudo: false }
    }

    pub fn with_sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenewalOutcome {
    pub command_executed: String,
    pub stdout: String,
    pub succeeded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenewalReport {
    Renewed { distro: Option<String>, outcomes: Vec<RenewalOutcome> },
    Unsupported { distro: String },
}

impl RenewalReport {
    pub fn outcomes(&self) -> &[RenewalOutcome] {
        match self {
            RenewalReport::Renewed { outcomes, .. } => outcomes,
            RenewalReport::Unsupported { .. } => &[],
        }
    }
}
