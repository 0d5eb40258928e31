use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};
use crate::domain::KubercertError;
use crate::ports::{CommandRequest, CommandRunner};

const SUDO_PREFIX: &str = "sudo ";

struct Captured {
    success: bool,
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

pub struct LocalCommandRunner {
    shell: String,
}

impl LocalCommandRunner {
    pub fn new() -> Self {
        Self { shell: "sh".to_string() }
    }

    pub async fn elevate(&self, command: &str) -> Result<String, KubercertError> {
        let uid = self.current_uid().await?;
        Ok(elevated_command(command, uid))
    }

    async fn current_uid(&self) -> Result<u32, KubercertError> {
        let out = self.capture("id -u", false).await
            .map_err(|e| KubercertError::privilege(format!("failed to run 'id -u': {}", e.message)))?;
        if !out.success {
            return Err(KubercertError::privilege(out.stderr.trim().to_string()));
        }
        out.stdout.trim_matches('\n').trim().parse::<u32>()
            .map_err(|e| KubercertError::privilege(format!("unexpected 'id -u' output {:?}: {}", out.stdout, e)))
    }

    async fn capture(&self, command: &str, stream: bool) -> Result<Captured, KubercertError> {
        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| KubercertError::renewal(format!("failed to start '{}': {}", command, e)))?;

        let stdout = child.stdout.take()
            .ok_or_else(|| KubercertError::other("child stdout not captured"))?;
        let stderr = child.stderr.take()
            .ok_or_else(|| KubercertError::other("child stderr not captured"))?;

        let echo_out = stream.then(tokio::io::stdout);
        let echo_err = stream.then(tokio::io::stderr);
        let (stdout, stderr) = tokio::try_join!(drain(stdout, echo_out), drain(stderr, echo_err))
            .map_err(|e| KubercertError::renewal(format!("failed to read output of '{}': {}", command, e)))?;

        let status = child.wait().await
            .map_err(|e| KubercertError::renewal(format!("failed to wait for '{}': {}", command, e)))?;

        Ok(Captured { success: status.success(), code: status.code(), stdout, stderr })
    }
}

impl Default for LocalCommandRunner {
    fn default() -> Self { Self::new() }
}

impl CommandRunner for LocalCommandRunner {
    async fn run(&self, request: &CommandRequest) -> Result<String, KubercertError> {
        let command = if request.sudo {
            self.elevate(&request.command).await?
        } else {
            request.command.clone()
        };

        if request.is_dry_run() {
            info!("DRY-RUN {}", command);
            return Ok(request.dry_run_response.clone());
        }

        debug!("Executing: {}", command);
        let out = self.capture(&command, request.stream).await?;
        if !out.success {
            let stderr = out.stderr.trim();
            let msg = match (stderr.is_empty(), out.code) {
                (false, _) => stderr.to_string(),
                (true, Some(code)) => format!("'{}' exited with status {}", command, code),
                (true, None) => format!("'{}' terminated by signal", command),
            };
            return Err(KubercertError::renewal(msg));
        }
        Ok(out.stdout.trim_matches('\n').to_string())
    }
}

pub fn elevated_command(command: &str, uid: u32) -> String {
    if uid > 0 {
        format!("{}{}", SUDO_PREFIX, command)
    } else {
        command.to_string()
    }
}

async fn drain<R, W>(pipe: R, mut echo: Option<W>) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(pipe);
    let mut collected = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if let Some(w) = echo.as_mut() {
            w.write_all(&line).await?;
            w.flush().await?;
        }
        collected.extend_from_slice(&line);
    }
    // Child output is not guaranteed to be UTF-8.
    Ok(String::from_utf8_lossy(&collected).into_owned())
}
