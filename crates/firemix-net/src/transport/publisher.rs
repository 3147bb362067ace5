//! ZeroMQ PUB transport

use super::FramePublisher;
use crate::{error::NetError, Result};

/// PUB socket bound once at startup
pub struct ZmqPublisher {
    // Dropped after the socket
    socket: zmq::Socket,
    _context: zmq::Context,
    endpoint: String,
}

impl ZmqPublisher {
    /// Bind a PUB socket to `endpoint`, e.g. `tcp://*:3020`
    pub fn bind(endpoint: &str) -> Result<Self> {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::PUB)?;

        // Drop undelivered frames on close
        socket.set_linger(0)?;
        socket.set_sndhwm(2)?;

        socket.bind(endpoint).map_err(|e| NetError::BindError {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!("Pub/sub output bound to {}", endpoint);

        Ok(Self {
            socket,
            _context: context,
            endpoint: endpoint.to_string(),
        })
    }
}

impl FramePublisher for ZmqPublisher {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn publish(&mut self, frames: &mut dyn Iterator<Item = &[u8]>) -> Result<()> {
        self.socket.send_multipart(frames, 0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_publish_without_subscribers() {
        let mut publisher = ZmqPublisher::bind("inproc://firemix-test-publish").unwrap();
        assert_eq!(publisher.endpoint(), "inproc://firemix-test-publish");

        // PUB drops messages when nobody is subscribed
        let mut frames = [&b"B"[..], &b"E"[..]].into_iter();
        assert!(publisher.publish(&mut frames).is_ok());
    }

    #[test]
    fn test_invalid_endpoint() {
        let result = ZmqPublisher::bind("nonsense");
        assert!(matches!(result, Err(NetError::BindError { .. })));
    }
}
