use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Args, Parser, Subcommand};
use kubercert::application::{
    CertificateCycle, Config, ConfigOverrides, InspectCertificatesUseCase, RenewCertificateUseCase,
    RenewalOptions, StrategyRegistry,
};
use kubercert::domain::{KubercertError, OutputFormat};
use kubercert::infrastructure::{
    init_logging, log_level, renderer_for, HickoryDnsResolver, LocalCommandRunner, RustlsTlsHandshaker, SystemClock,
    TokioTcpDialer,
};

#[derive(Parser)]
#[command(name = "kubercert", version, about = "Kubernetes API certificates management")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config file [default: $HOME/.kubercert.yaml]
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Kubernetes API host [default: localhost]
    #[arg(short = 'H', long, global = true)]
    host: Option<String>,

    /// Kubernetes API port [default: 6443]
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Output format: text, json, none [default: text]
    #[arg(short, long, global = true, value_parser = parse_output)]
    output: Option<OutputFormat>,

    /// Days before expiry at which the certificate is due for renewal [default: 7]
    #[arg(short, long = "expire", global = true, value_name = "DAYS")]
    expire_days: Option<u32>,

    /// Dial timeout in seconds [default: 5]
    #[arg(short, long, global = true, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Log renewal commands instead of running them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, global = true)]
    verbose: bool,

    /// Enable super verbose output (trace logging)
    #[arg(long, global = true)]
    trace: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the certificates presented by the API server
    Show,
    /// Renew the certificate when it is inside the renewal window
    Renew {
        /// Command to execute instead of the built-in distro restart
        #[arg(short, long)]
        command: Option<String>,
        /// Run built-in restart steps through sudo when not root
        #[arg(long)]
        sudo: bool,
        /// Echo command output while it runs
        #[arg(long)]
        stream: bool,
        /// Renew even when the certificate is outside the renewal window
        #[arg(long)]
        force: bool,
    },
}

fn parse_output(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.message)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match Config::load(cli.global.config.as_deref()) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.class.exit_code() as u8);
        }
    };
    if let Some(path) = &loaded.source {
        eprintln!("Using config file: {}", path.display());
    }

    let level = log_level(
        cli.global.trace || loaded.trace,
        cli.global.verbose || loaded.verbose,
        std::env::var("LOG_LEVEL").ok().as_deref(),
    );
    if let Err(e) = init_logging(level) {
        eprintln!("{}", e);
    }

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", KubercertError::other(format!("failed to create runtime: {}", e)));
            return ExitCode::from(1);
        }
    };

    match rt.block_on(run(cli, loaded.config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.class.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli, mut config: Config) -> Result<(), KubercertError> {
    config.apply_env(|key| std::env::var(key).ok());

    let (renewal_command, sudo, stream, force, renewing) = match cli.command {
        Commands::Show => (None, false, false, false, false),
        Commands::Renew { command, sudo, stream, force } => (command, sudo, stream, force, true),
    };
    let config = config.with_overrides(ConfigOverrides {
        host: cli.global.host,
        port: cli.global.port,
        timeout: cli.global.timeout,
        expire_days: cli.global.expire_days,
        output: cli.global.output,
        renewal_command,
        dry_run: cli.global.dry_run,
        sudo,
        stream,
    });
    tracing::debug!(?config, "resolved configuration");

    let inspect = InspectCertificatesUseCase::new(
        HickoryDnsResolver::new()?,
        TokioTcpDialer::new(),
        RustlsTlsHandshaker::new()?,
        SystemClock::new(),
    );
    let renew = RenewCertificateUseCase::new(
        LocalCommandRunner::new(),
        StrategyRegistry::with_defaults(),
        RenewalOptions::from(&config),
    );
    let cycle = CertificateCycle::new(inspect, renew);

    let inspection = cycle.inspect(&config).await?;
    let rendered = renderer_for(config.output).render(&inspection.report)?;
    print!("{}", rendered);

    if renewing {
        cycle.renew_if_due(&inspection, config.renewal_command.as_deref(), force).await?;
    }
    Ok(())
}
