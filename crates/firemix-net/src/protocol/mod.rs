//! Protocol encoders
//!
//! All three encoders start from the per-strand Legacy packets built by
//! [`crate::packet::StrandPackets`].
//!
//! ## Legacy
//!
//! `B` datagram, one datagram per strand packet, `E` datagram. The receiving
//! microcontrollers cannot parse back-to-back datagrams, so a short pause
//! follows every strand packet.
//!
//! ## OPC
//!
//! One Open Pixel Control packet per client: channel, command 0 (set pixel
//! colors), big-endian length, then every strand's colors concatenated with
//! the Legacy headers stripped.
//!
//! ## Pub/Sub
//!
//! One multipart message `[B, strand packets..., E]` per frame, published
//! once for all subscribers.

pub mod legacy;
pub mod opc;
pub mod pubsub;

pub use opc::OpcEncoder;

/// Begin-of-frame marker
pub const BEGIN_FRAME: &[u8] = b"B";
/// End-of-frame marker
pub const END_FRAME: &[u8] = b"E";
