mod dns;
mod tcp;
mod tls;
mod clock;
mod renderer;
mod command;
mod io;

pub use dns::DnsResolver;
pub use tcp::{TcpDialer, TcpConnection};
pub use tls::{TlsHandshaker, TlsSession};
pub use clock::Clock;
pub use renderer::Renderer;
pub use command::{CommandRequest, CommandRunner};
pub use io::{IoStream, BoxedIoStream};
