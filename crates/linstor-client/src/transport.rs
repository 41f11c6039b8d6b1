use std::{
    io::{self, Read, Write},
    net::TcpStream,
    time::Duration,
};

use native_tls::TlsConnector;

use crate::{error::LinstorError, uri::ControllerUri};

/// The two wire transports a controller URI can select (§2, §4.G step 2).
///
/// `native_tls::TlsStream` cannot be registered with an `mio`-style
/// readiness poll, so both variants are driven with blocking reads gated by
/// `set_read_timeout` instead — the receiver's accumulate-then-parse state
/// machine (`receiver.rs`) doesn't care which transport it's reading from.
pub enum Transport {
    Plain(TcpStream),
    Tls(Box<native_tls::TlsStream<TcpStream>>),
}

impl Transport {
    pub fn connect(target: &ControllerUri, connect_timeout: Duration) -> Result<Self, LinstorError> {
        let addr = (target.host.as_str(), target.port);
        let socket_addr = std::net::ToSocketAddrs::to_socket_addrs(&addr)?
            .next()
            .ok_or_else(|| LinstorError::Config(format!("could not resolve {}:{}", target.host, target.port)))?;
        let tcp = TcpStream::connect_timeout(&socket_addr, connect_timeout).map_err(|err| {
            if matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) {
                LinstorError::Timeout(connect_timeout)
            } else {
                LinstorError::Network(err)
            }
        })?;
        tcp.set_nodelay(true)?;

        if !target.tls {
            return Ok(Self::Plain(tcp));
        }

        let connector = TlsConnector::new()?;
        let tls = connector
            .connect(&target.host, tcp)
            .map_err(|err| LinstorError::Handshake(err.to_string()))?;
        Ok(Self::Tls(Box::new(tls)))
    }

    fn tcp_stream(&self) -> &TcpStream {
        match self {
            Self::Plain(stream) => stream,
            Self::Tls(stream) => stream.get_ref(),
        }
    }

    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        self.tcp_stream().set_read_timeout(timeout)
    }

    pub fn shutdown(&self) -> io::Result<()> {
        self.tcp_stream().shutdown(std::net::Shutdown::Both)
    }
}

impl Read for Transport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(stream) => stream.read(buf),
            Self::Tls(stream) => stream.read(buf),
        }
    }
}

impl Write for Transport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(stream) => stream.write(buf),
            Self::Tls(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(stream) => stream.flush(),
            Self::Tls(stream) => stream.flush(),
        }
    }
}
