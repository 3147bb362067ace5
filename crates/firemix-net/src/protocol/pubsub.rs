//! Pub/Sub multipart encoder

use std::iter;

use super::{BEGIN_FRAME, END_FRAME};
use crate::packet::PacketList;
use crate::transport::FramePublisher;
use crate::Result;

/// Publish `[B, packets..., E]` as one multipart message.
///
/// Returns the number of parts published.
pub fn publish_frame(publisher: &mut dyn FramePublisher, packets: &PacketList) -> Result<usize> {
    let mut parts = iter::once(BEGIN_FRAME)
        .chain(packets.iter())
        .chain(iter::once(END_FRAME));

    publisher.publish(&mut parts)?;

    Ok(packets.len() + 2)
}
