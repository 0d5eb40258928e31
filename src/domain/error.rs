use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Input,
    Config,
    Connection,
    Timeout,
    Certificate,
    EmptyCertificateChain,
    Renewal,
    PrivilegeLookup,
    UnsupportedDistro,
    Other,
}

impl ErrorClass {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorClass::Input => 2,
            ErrorClass::Config => 3,
            ErrorClass::Connection => 4,
            ErrorClass::Timeout => 5,
            ErrorClass::Certificate => 6,
            ErrorClass::EmptyCertificateChain => 7,
            ErrorClass::Renewal => 8,
            ErrorClass::PrivilegeLookup => 9,
            ErrorClass::UnsupportedDistro => 10,
            ErrorClass::Other => 1,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ErrorClass::Input => "INPUT",
            ErrorClass::Config => "CONFIG",
            ErrorClass::Connection => "CONNECTION",
            ErrorClass::Timeout => "TIMEOUT",
            ErrorClass::Certificate => "CERT",
            ErrorClass::EmptyCertificateChain => "EMPTY_CHAIN",
            ErrorClass::Renewal => "RENEWAL",
            ErrorClass::PrivilegeLookup => "PRIVILEGE",
            ErrorClass::UnsupportedDistro => "DISTRO",
            ErrorClass::Other => "ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("error[{}]: {message}", .class.tag())]
pub struct KubercertError {
    pub class: ErrorClass,
    pub message: String,
}

impl KubercertError {
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self { class, message: message.into() }
    }

    pub fn input(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Input, msg) }
    pub fn config(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Config, msg) }
    pub fn connection(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Connection, msg) }
    pub fn timeout(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Timeout, msg) }
    pub fn certificate(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Certificate, msg) }
    pub fn empty_chain(msg: impl Into<String>) -> Self { Self::new(ErrorClass::EmptyCertificateChain, msg) }
    pub fn renewal(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Renewal, msg) }
    pub fn privilege(msg: impl Into<String>) -> Self { Self::new(ErrorClass::PrivilegeLookup, msg) }
    pub fn unsupported_distro(msg: impl Into<String>) -> Self { Self::new(ErrorClass::UnsupportedDistro, msg) }
    pub fn other(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Other, msg) }

    pub fn is_connection_failure(&self) -> bool {
        matches!(self.class, ErrorClass::Connection | ErrorClass::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_class_tag() {
        let err = KubercertError::empty_chain("no leaf certificate presented by localhost:6443");
        assert_eq!(err.to_string(), "error[EMPTY_CHAIN]: no leaf certificate presented by localhost:6443");
    }

    #[test]
    fn fatal_classes_exit_non_zero() {
        for class in [
            ErrorClass::Input,
            ErrorClass::Config,
            ErrorClass::Connection,
            ErrorClass::Timeout,
            ErrorClass::Certificate,
            ErrorClass::EmptyCertificateChain,
            ErrorClass::Renewal,
            ErrorClass::PrivilegeLookup,
            ErrorClass::Other,
        ] {
            assert_ne!(class.exit_code(), 0, "{:?}", class);
        }
    }

    #[test]
    fn timeout_counts_as_connection_failure() {
        assert!(KubercertError::timeout("dial").is_connection_failure());
        assert!(KubercertError::connection("refused").is_connection_failure());
        assert!(!KubercertError::renewal("exit 1").is_connection_failure());
    }
}
