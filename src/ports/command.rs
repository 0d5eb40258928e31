use crate::domain::KubercertError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRequest {
    pub command: String,
    pub stream: bool,
    pub sudo: bool,
    pub dry_run_response: String,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(), ..Self::default() }
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }

    pub fn with_dry_run(mut self, response: impl Into<String>) -> Self {
        self.dry_run_response = response.into();
        self
    }

    pub fn is_dry_run(&self) -> bool {
        !self.dry_run_response.is_empty()
    }
}

pub trait CommandRunner: Send + Sync {
    fn run(&self, request: &CommandRequest) -> impl std::future::Future<Output = Result<String, KubercertError>> + Send;
}
