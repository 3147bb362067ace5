//! Error types for the output stage
use thiserror::Error;

/// Output errors
#[derive(Error, Debug)]
pub enum NetError {
    /// I/O error while opening a transport
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A datagram could not be sent to a controller
    #[error("Failed to send to {target}: {source}")]
    SendError {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The pub/sub socket could not be bound
    #[error("Failed to bind pub/sub socket to {endpoint}: {reason}")]
    BindError { endpoint: String, reason: String },

    /// ZeroMQ error
    #[cfg(feature = "zmq")]
    #[error("ZMQ error: {0}")]
    ZmqError(#[from] zmq::Error),

    /// A packet's length does not fit its 16-bit length field
    #[error("Packet payload of {len} bytes exceeds the {max} byte limit")]
    PacketTooLarge { len: usize, max: usize },

    /// Strand ids travel as a single byte
    #[error("Strand {strand} cannot be addressed (ids are limited to 0-255)")]
    TooManyStrands { strand: usize },

    /// Strand extent does not fit the frame
    #[error("Strand {strand} extent {start}..{end} is outside the {len} pixel frame")]
    StrandOutOfRange {
        strand: usize,
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Result type for output operations
pub type Result<T> = std::result::Result<T, NetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NetError::PacketTooLarge {
            len: 70_000,
            max: 65_535,
        };
        assert_eq!(
            err.to_string(),
            "Packet payload of 70000 bytes exceeds the 65535 byte limit"
        );
    }

    #[test]
    fn test_send_error_keeps_source() {
        use std::error::Error as _;

        let err = NetError::SendError {
            target: "10.0.0.1:3020".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "unreachable"),
        };
        assert!(err.to_string().contains("10.0.0.1:3020"));
        assert!(err.source().is_some());
    }
}
