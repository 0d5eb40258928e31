mod inspect;
mod renew;
mod strategy;
mod cycle;
mod cert_parser;
mod config;

pub use inspect::InspectCertificatesUseCase;
pub use renew::{RenewCertificateUseCase, RenewalOptions, DRY_RUN_RESPONSE};
pub use strategy::{K3sRestart, RenewalStrategy, StrategyRegistry};
pub use cycle::{CertificateCycle, Inspection};
pub use cert_parser::parse_certificate;
pub use config::{default_config_path, Config, ConfigFile, ConfigOverrides, LoadedConfig, CONFIG_FILE_NAME, DEFAULT_HOST};
