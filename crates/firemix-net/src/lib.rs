//! Firemix Net - LED output stage
//!
//! Takes the mixer's per-pixel HLS frame and pushes it to the LED
//! controllers:
//! - **Color**: HLS to 8-bit RGB with the global dimmer applied
//! - **Packets**: per-strand Legacy packets built in reusable buffers
//! - **Protocols**: Legacy framed UDP, Open Pixel Control, ZeroMQ pub/sub
//! - **Dispatch**: per-client protocol and dimming selection
//!
//! ## Feature Flags
//!
//! - `zmq` (default): pub/sub output through libzmq
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use firemix_core::{ClientConfig, HlsFrame, NetworkingSettings, Protocol, StrandLayout};
//! use firemix_net::Networking;
//!
//! let settings = NetworkingSettings::default();
//! let mut output = Networking::open(&settings)?;
//!
//! let strands = StrandLayout::from_pixel_counts([(160, true), (160, true)]);
//! let clients = vec![ClientConfig::new("10.0.0.20", Protocol::Legacy)];
//! let frame = HlsFrame::new(strands.pixel_count());
//!
//! output.write_buffer(&frame, 0.8, &strands, &clients)?;
//! output.close();
//! # Ok::<(), firemix_net::NetError>(())
//! ```

#![allow(missing_docs)]

/// HLS to RGB conversion and dimming
pub mod color;
/// Client grouping by protocol
pub mod dispatch;
/// Error types
pub mod error;
/// Output stage lifecycle
pub mod networking;
/// Strand packets and buffer reuse
pub mod packet;
/// Wire encoders
pub mod protocol;
/// UDP and pub/sub sockets
pub mod transport;

// Re-exports
pub use color::{hls_to_rgb8, ColorPipeline, DimmingPlan, Rgb8};
pub use dispatch::ClientGroups;
pub use error::{NetError, Result};
pub use networking::{Networking, OutputStats};
pub use packet::{PacketCache, PacketList, StrandPackets};
pub use protocol::OpcEncoder;
pub use transport::{DatagramTransport, FramePublisher, UdpTransport};

#[cfg(feature = "zmq")]
pub use transport::ZmqPublisher;
