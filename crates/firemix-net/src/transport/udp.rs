//! UDP transport for Legacy and OPC controllers

use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs, UdpSocket};

use super::DatagramTransport;
use crate::{error::NetError, Result};

/// Broadcast-capable UDP socket shared by every datagram client.
///
/// Host names are resolved on first use and cached for the lifetime of the
/// transport.
pub struct UdpTransport {
    socket: UdpSocket,
    resolved: HashMap<String, IpAddr>,
}

impl UdpTransport {
    /// Bind an ephemeral port on all interfaces with broadcast enabled
    pub fn open() -> Result<Self> {
        Self::bind("0.0.0.0:0")
    }

    /// Bind a specific local address
    pub fn bind(local: &str) -> Result<Self> {
        let socket = UdpSocket::bind(local)?;
        socket.set_broadcast(true)?;

        tracing::info!("UDP output socket bound to {}", socket.local_addr()?);

        Ok(Self {
            socket,
            resolved: HashMap::new(),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    fn resolve(&mut self, host: &str, port: u16) -> io::Result<SocketAddr> {
        if let Some(&ip) = self.resolved.get(host) {
            return Ok(SocketAddr::new(ip, port));
        }

        // The socket is bound to an IPv4 address, so prefer IPv4 results
        let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
        let addr = addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no address for {}", host))
            })?;

        tracing::debug!("Resolved {} to {}", host, addr.ip());
        self.resolved.insert(host.to_string(), addr.ip());

        Ok(addr)
    }
}

impl DatagramTransport for UdpTransport {
    fn send_to(&mut self, payload: &[u8], host: &str, port: u16) -> Result<()> {
        self.resolve(host, port)
            .and_then(|addr| self.socket.send_to(payload, addr))
            .map_err(|source| NetError::SendError {
                target: format!("{}:{}", host, port),
                source,
            })?;
        Ok(())
    }
}
