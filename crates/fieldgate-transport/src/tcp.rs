use std::net::{TcpStream, ToSocketAddrs};

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::stream::NetStream;

/// Connect to the upstream gateway (blocking).
///
/// `host` and `port` are configuration inputs supplied at process start;
/// resolution may yield several addresses and the first one that accepts
/// the connection wins.
pub fn connect(host: &str, port: u16) -> Result<NetStream> {
    let addr = format!("{host}:{port}");

    let mut last_err = None;
    let candidates = addr
        .to_socket_addrs()
        .map_err(|e| TransportError::Resolve {
            addr: addr.clone(),
            source: e,
        })?;

    for candidate in candidates {
        match TcpStream::connect(candidate) {
            Ok(stream) => {
                stream.set_nodelay(true).map_err(|e| TransportError::Connect {
                    addr: addr.clone(),
                    source: e,
                })?;
                debug!(%candidate, "connected to gateway");
                return Ok(NetStream::from_tcp(stream));
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(TransportError::Connect {
        addr,
        source: last_err.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses resolved")
        }),
    })
}
