//! Legacy framed UDP protocol

use std::time::Duration;

use firemix_core::settings::ClientConfig;

use super::{BEGIN_FRAME, END_FRAME};
use crate::packet::PacketList;
use crate::transport::DatagramTransport;
use crate::Result;

/// Send one frame to a Legacy client.
///
/// Returns the number of datagrams sent (strand packets plus the two
/// markers). `delay` is slept after each strand packet.
pub fn send_frame(
    transport: &mut dyn DatagramTransport,
    client: &ClientConfig,
    packets: &PacketList,
    delay: Duration,
) -> Result<usize> {
    transport.send_to(BEGIN_FRAME, &client.host, client.port)?;

    for packet in packets.iter() {
        transport.send_to(packet, &client.host, client.port)?;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    transport.send_to(END_FRAME, &client.host, client.port)?;

    Ok(packets.len() + 2)
}
