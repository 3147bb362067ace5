//! Network transports
//!
//! ## UDP
//!
//! One socket bound to an ephemeral port with `SO_BROADCAST` set. Legacy and
//! OPC clients are addressed individually (unicast, or a broadcast address if
//! the settings say so).
//!
//! ## Pub/Sub
//!
//! A ZeroMQ PUB socket bound once at startup. Every subscriber receives the
//! same multipart message; fan-out is the socket's job, not ours.

pub mod udp;
#[cfg(feature = "zmq")]
pub mod publisher;

pub use udp::UdpTransport;
#[cfg(feature = "zmq")]
pub use publisher::ZmqPublisher;

use crate::Result;

/// Datagram sink for the Legacy and OPC encoders
pub trait DatagramTransport: Send {
    /// Send one datagram to `host:port`
    fn send_to(&mut self, payload: &[u8], host: &str, port: u16) -> Result<()>;
}

/// Multipart publisher for the pub/sub encoder
pub trait FramePublisher: Send {
    /// Endpoint the publisher is bound to
    fn endpoint(&self) -> &str;

    /// Publish `frames` as one multipart message
    fn publish(&mut self, frames: &mut dyn Iterator<Item = &[u8]>) -> Result<()>;
}
