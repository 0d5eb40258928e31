use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use crate::domain::KubercertError;

pub fn log_level(trace: bool, verbose: bool, env_level: Option<&str>) -> Level {
    if trace {
        return Level::TRACE;
    }
    if verbose {
        return Level::DEBUG;
    }
    match env_level.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
        Some("TRACE") => Level::TRACE,
        Some("DEBUG") => Level::DEBUG,
        Some("WARN") => Level::WARN,
        Some("ERROR") => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn init_logging(level: Level) -> Result<(), KubercertError> {
    let writer = std::io::stderr.with_max_level(Level::WARN).or_else(std::io::stdout);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| KubercertError::other(format!("failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment() {
        assert_eq!(log_level(true, true, Some("ERROR")), Level::TRACE);
        assert_eq!(log_level(false, true, Some("ERROR")), Level::DEBUG);
    }

    #[test]
    fn environment_level_parsed() {
        assert_eq!(log_level(false, false, Some("warn")), Level::WARN);
        assert_eq!(log_level(false, false, Some("ERROR")), Level::ERROR);
        assert_eq!(log_level(false, false, Some("bogus")), Level::INFO);
        assert_eq!(log_level(false, false, None), Level::INFO);
    }
}
