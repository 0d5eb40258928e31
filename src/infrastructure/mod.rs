mod dns;
mod tcp;
mod tls;
mod clock;
mod renderer;
mod command;
mod logging;

pub use dns::HickoryDnsResolver;
pub use tcp::TokioTcpDialer;
pub use tls::RustlsTlsHandshaker;
pub use clock::SystemClock;
pub use renderer::{renderer_for, JsonRenderer, NoneRenderer, TextRenderer};
pub use command::{elevated_command, LocalCommandRunner};
pub use logging::{init_logging, log_level};
