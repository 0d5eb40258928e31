use tracing::{error, info};
use crate::domain::*;
use crate::ports::{CommandRequest, CommandRunner};
use super::{Config, StrategyRegistry};

pub const DRY_RUN_RESPONSE: &str = "ok...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenewalOptions {
    pub dry_run: bool,
    pub sudo: bool,
    pub stream: bool,
}

impl From<&Config> for RenewalOptions {
    fn from(config: &Config) -> Self {
        Self { dry_run: config.dry_run, sudo: config.sudo, stream: config.stream }
    }
}

pub struct RenewCertificateUseCase<R: CommandRunner> {
    runner: R,
    registry: StrategyRegistry,
    options: RenewalOptions,
}

impl<R: CommandRunner> RenewCertificateUseCase<R> {
    pub fn new(runner: R, registry: StrategyRegistry, options: RenewalOptions) -> Self {
        Self { runner, registry, options }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub async fn execute(&self, leaf: &CertificateRecord, command: Option<&str>) -> Result<RenewalReport, KubercertError> {
        match command.map(str::trim).filter(|c| !c.is_empty()) {
            Some(command) => self.run_explicit(command).await,
            None => self.run_builtin(leaf).await,
        }
    }

    async fn run_explicit(&self, command: &str) -> Result<RenewalReport, KubercertError> {
        info!("Start renewing the certificate...");
        let request = self.request(command, false);
        let stdout = self.runner.run(&request).await.map_err(command_failed)?;
        info!("command: {}", command);
        info!("response: {}", stdout);
        Ok(RenewalReport::Renewed {
            distro: None,
            outcomes: vec![RenewalOutcome { command_executed: command.to_string(), stdout, succeeded: true }],
        })
    }

    async fn run_builtin(&self, leaf: &CertificateRecord) -> Result<RenewalReport, KubercertError> {
        let distro = detect_distro(leaf);
        let Some(strategy) = self.registry.get(distro) else {
            let err = KubercertError::unsupported_distro(format!(
                "Unsupported distro: {} (built-in renewal exists for: {})",
                distro,
                self.registry.supported().join(", ")
            ));
            error!("{}", err.message);
            return Ok(RenewalReport::Unsupported { distro: distro.to_string() });
        };

        info!("Renewing certificate for {}", distro);
        let mut outcomes = Vec::new();
        for step in strategy.plan(self.options.sudo) {
            info!("{}", step.description);
            let request = self.request(&step.command, step.sudo);
            let stdout = self.runner.run(&request).await.map_err(command_failed)?;
            outcomes.push(RenewalOutcome { command_executed: step.command, stdout, succeeded: true });
        }
        info!("Successfully renewed certificate for {}", distro);
        Ok(RenewalReport::Renewed { distro: Some(distro.to_string()), outcomes })
    }

    fn request(&self, command: &str, sudo: bool) -> CommandRequest {
        let request = CommandRequest::new(command).with_stream(self.options.stream).with_sudo(sudo);
        if self.options.dry_run {
            request.with_dry_run(DRY_RUN_RESPONSE)
        } else {
            request
        }
    }
}

fn command_failed(e: KubercertError) -> KubercertError {
    KubercertError::new(e.class, format!("Command failed: {}", e.message))
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::collections::HashSet;
    use std::sync::Mutex;
    use crate::domain::KubercertError;
    use crate::ports::{CommandRequest, CommandRunner};

    #[derive(Default)]
    pub struct RecordingRunner {
        pub requests: Mutex<Vec<CommandRequest>>,
        pub failing: HashSet<String>,
    }

    impl RecordingRunner {
        pub fn failing(commands: &[&str]) -> Self {
            Self { failing: commands.iter().map(|c| c.to_string()).collect(), ..Default::default() }
        }

        pub fn commands(&self) -> Vec<String> {
            self.requests.lock().unwrap().iter().map(|r| r.command.clone()).collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, request: &CommandRequest) -> Result<String, KubercertError> {
            self.requests.lock().unwrap().push(request.clone());
            if request.is_dry_run() {
                return Ok(request.dry_run_response.clone());
            }
            if self.failing.contains(&request.command) {
                return Err(KubercertError::renewal(format!("{}: exit status 1", request.command)));
            }
            Ok(format!("ran {}", request.command))
        }
    }
}
