use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::Deserialize;
use tracing::warn;
use crate::domain::{HostConnectionTarget, KubercertError, OutputFormat, DEFAULT_EXPIRE_DAYS, DEFAULT_PORT, DEFAULT_TIMEOUT};

pub const DEFAULT_HOST: &str = "localhost";
pub const CONFIG_FILE_NAME: &str = ".kubercert.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
    pub expire_days: u32,
    pub output: OutputFormat,
    pub renewal_command: Option<String>,
    pub dry_run: bool,
    pub sudo: bool,
    pub stream: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout: Option<u64>,
    pub expire: Option<u32>,
    pub output: Option<String>,
    pub command: Option<String>,
    pub dry_run: Option<bool>,
    pub sudo: Option<bool>,
    pub verbose: Option<bool>,
    pub trace: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
    pub trace: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout: Option<u64>,
    pub expire_days: Option<u32>,
    pub output: Option<OutputFormat>,
    pub renewal_command: Option<String>,
    pub dry_run: bool,
    pub sudo: bool,
    pub stream: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            expire_days: DEFAULT_EXPIRE_DAYS,
            output: OutputFormat::Text,
            renewal_command: None,
            dry_run: false,
            sudo: false,
            stream: false,
        }
    }
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, KubercertError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.is_file()),
        };
        let mut config = Self::default();
        let Some(path) = path else {
            return Ok(LoadedConfig { config, source: None, trace: false, verbose: false });
        };
        let file = ConfigFile::read(&path)?;
        let (trace, verbose) = file.log_flags();
        config.apply_file(file)?;
        Ok(LoadedConfig { config, source: Some(path), trace, verbose })
    }

    pub fn apply_file(&mut self, file: ConfigFile) -> Result<(), KubercertError> {
        if let Some(host) = file.host { self.host = host; }
        if let Some(port) = file.port { self.port = port; }
        if let Some(secs) = file.timeout { self.timeout = Duration::from_secs(secs); }
        if let Some(days) = file.expire { self.expire_days = days; }
        if let Some(output) = file.output {
            self.output = output.parse().map_err(|e: KubercertError| KubercertError::config(e.message))?;
        }
        if let Some(command) = file.command { self.renewal_command = non_empty(command); }
        if let Some(dry_run) = file.dry_run { self.dry_run = dry_run; }
        if let Some(sudo) = file.sudo { self.sudo = sudo; }
        Ok(())
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("KUBERCERT_HOST").and_then(non_empty) { self.host = host; }
        if let Some(port) = parse_env(&lookup, "KUBERCERT_PORT", |v| v.parse::<u16>().ok()) { self.port = port; }
        if let Some(timeout) = parse_env(&lookup, "KUBERCERT_TIMEOUT", parse_duration) { self.timeout = timeout; }
        if let Some(days) = parse_env(&lookup, "KUBERCERT_EXPIRE", |v| v.parse::<u32>().ok()) { self.expire_days = days; }
        if let Some(output) = parse_env(&lookup, "KUBERCERT_OUTPUT", |v| v.parse::<OutputFormat>().ok()) { self.output = output; }
        if let Some(command) = lookup("KUBERCERT_COMMAND").and_then(non_empty) { self.renewal_command = Some(command); }
        if let Some(dry_run) = parse_env(&lookup, "KUBERCERT_DRY_RUN", parse_bool) { self.dry_run = dry_run; }
    }

    pub fn with_overrides(mut self, o: ConfigOverrides) -> Self {
        if let Some(host) = o.host { self.host = host; }
        if let Some(port) = o.port { self.port = port; }
        if let Some(secs) = o.timeout { self.timeout = Duration::from_secs(secs); }
        if let Some(days) = o.expire_days { self.expire_days = days; }
        if let Some(output) = o.output { self.output = output; }
        if let Some(command) = o.renewal_command.and_then(non_empty) { self.renewal_command = Some(command); }
        self.dry_run |= o.dry_run;
        self.sudo |= o.sudo;
        self.stream |= o.stream;
        self
    }

    pub fn target(&self) -> Result<HostConnectionTarget, KubercertError> {
        HostConnectionTarget::new(self.host.clone(), self.port, self.timeout)
    }
}

impl ConfigFile {
    pub fn read(path: &Path) -> Result<Self, KubercertError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| KubercertError::config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content)
            .map_err(|e| KubercertError::config(format!("{}: {}", path.display(), e.message)))
    }

    pub fn parse(content: &str) -> Result<Self, KubercertError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| KubercertError::config(e.to_string()))
    }

    pub fn log_flags(&self) -> (bool, bool) {
        (self.trace.unwrap_or(false), self.verbose.unwrap_or(false))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(|h| PathBuf::from(h).join(CONFIG_FILE_NAME))
}

fn non_empty(s: String) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

fn parse_env<F, T, P>(lookup: &F, key: &str, parse: P) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    let raw = lookup(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!("ignoring invalid {}={:?}", key, raw);
    }
    parsed
}

fn parse_duration(v: &str) -> Option<Duration> {
    if let Some(s) = v.strip_suffix("ms") {
        s.parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(s) = v.strip_suffix('s') {
        s.parse::<u64>().ok().map(Duration::from_secs)
    } else {
        v.parse::<u64>().ok().map(Duration::from_secs)
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_cli_defaults() {
        let c = Config::default();
        assert_eq!(c.host, "localhost");
        assert_eq!(c.port, 6443);
        assert_eq!(c.timeout, Duration::from_secs(5));
        assert_eq!(c.expire_days, 7);
        assert_eq!(c.output, OutputFormat::Text);
        assert!(c.renewal_command.is_none());
        assert!(!c.dry_run);
    }

    #[test]
    fn environment_overrides_defaults() {
        let mut c = Config::default();
        c.apply_env(env(&[
            ("KUBERCERT_HOST", "10.0.0.1"),
            ("KUBERCERT_PORT", "443"),
            ("KUBERCERT_TIMEOUT", "1500ms"),
            ("KUBERCERT_EXPIRE", "30"),
            ("KUBERCERT_OUTPUT", "json"),
            ("KUBERCERT_COMMAND", "k3s certificate rotate"),
            ("KUBERCERT_DRY_RUN", "true"),
        ]));
        assert_eq!(c.host, "10.0.0.1");
        assert_eq!(c.port, 443);
        assert_eq!(c.timeout, Duration::from_millis(1500));
        assert_eq!(c.expire_days, 30);
        assert_eq!(c.output, OutputFormat::Json);
        assert_eq!(c.renewal_command.as_deref(), Some("k3s certificate rotate"));
        assert!(c.dry_run);
    }

    #[test]
    fn invalid_environment_values_are_ignored() {
        let mut c = Config::default();
        c.apply_env(env(&[("KUBERCERT_PORT", "99999"), ("KUBERCERT_EXPIRE", "-1"), ("KUBERCERT_OUTPUT", "xml")]));
        assert_eq!(c, Config::default());
    }

    #[test]
    fn config_file_keys() {
        let file = ConfigFile::parse("host: api.k3s.lan\nport: 16443\nexpire: 14\noutput: none\ndry-run: true\nverbose: true\n").unwrap();
        assert_eq!(file.log_flags(), (false, true));
        let mut c = Config::default();
        c.apply_file(file).unwrap();
        assert_eq!(c.host, "api.k3s.lan");
        assert_eq!(c.port, 16443);
        assert_eq!(c.expire_days, 14);
        assert_eq!(c.output, OutputFormat::None);
        assert!(c.dry_run);
    }

    #[test]
    fn config_file_rejects_unknown_keys_and_formats() {
        assert_eq!(ConfigFile::parse("hots: typo\n").unwrap_err().class, crate::domain::ErrorClass::Config);
        let mut c = Config::default();
        let err = c.apply_file(ConfigFile::parse("output: xml\n").unwrap()).unwrap_err();
        assert_eq!(err.class, crate::domain::ErrorClass::Config);
    }

    #[test]
    fn empty_config_file_is_fine() {
        let file = ConfigFile::parse("\n").unwrap();
        let mut c = Config::default();
        c.apply_file(file).unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn explicit_config_file_is_read() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "host: 192.168.1.10\ntimeout: 9").unwrap();
        writeln!(tmp, "trace: true").unwrap();
        let loaded = Config::load(Some(tmp.path())).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(tmp.path()));
        assert_eq!(loaded.config.host, "192.168.1.10");
        assert_eq!(loaded.config.timeout, Duration::from_secs(9));
        assert!(loaded.trace && !loaded.verbose);
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert_eq!(err.class, crate::domain::ErrorClass::Config);
    }

    #[test]
    fn command_line_wins() {
        let c = Config::default().with_overrides(ConfigOverrides {
            host: Some("master-1".into()),
            port: Some(7443),
            timeout: Some(2),
            expire_days: Some(3),
            output: Some(OutputFormat::Json),
            renewal_command: Some("  ".into()),
            dry_run: true,
            sudo: true,
            stream: false,
        });
        assert_eq!(c.host, "master-1");
        assert_eq!(c.port, 7443);
        assert_eq!(c.timeout, Duration::from_secs(2));
        assert_eq!(c.expire_days, 3);
        assert_eq!(c.output, OutputFormat::Json);
        assert!(c.renewal_command.is_none());
        assert!(c.dry_run && c.sudo && !c.stream);
        assert_eq!(c.target().unwrap().as_socket_str(), "master-1:7443");
    }
}
