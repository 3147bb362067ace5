//! The output stage
//!
//! [`Networking`] owns the sockets, the packet cache and every per-frame
//! buffer. One call to [`Networking::write_buffer`] converts a mixed HLS frame
//! and delivers it to every enabled client:
//!
//! 1. regroup the clients by protocol
//! 2. convert HLS to RGB (dimmed, and undimmed when some client is exempt)
//! 3. segment the RGB buffers into Legacy strand packets
//! 4. publish to pub/sub subscribers, then Legacy clients, then OPC clients
//!
//! The first send failure aborts the frame and is returned to the caller.

use firemix_core::frame::HlsFrame;
use firemix_core::settings::{ClientConfig, NetworkingSettings};
use firemix_core::strand::StrandLayout;

use crate::color::ColorPipeline;
use crate::dispatch::ClientGroups;
use crate::packet::{PacketCache, StrandPackets};
use crate::protocol::{legacy, opc, pubsub, OpcEncoder};
use crate::transport::{DatagramTransport, FramePublisher, UdpTransport};
use crate::Result;

/// Counters since [`Networking::open`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputStats {
    /// Calls to `write_buffer` that completed
    pub frames: u64,
    /// UDP datagrams sent (Legacy markers and strands, OPC packets)
    pub datagrams: u64,
    /// Multipart pub/sub messages published
    pub multipart_messages: u64,
}

/// Output stage state
pub struct Networking {
    settings: NetworkingSettings,
    udp: Box<dyn DatagramTransport>,
    publisher: Option<Box<dyn FramePublisher>>,
    cache: PacketCache,
    color: ColorPipeline,
    packets: StrandPackets,
    opc: OpcEncoder,
    groups: ClientGroups,
    stats: OutputStats,
}

impl Networking {
    /// Open the UDP socket and, if enabled, the pub/sub socket
    pub fn open(settings: &NetworkingSettings) -> Result<Self> {
        let udp = UdpTransport::open()?;
        let publisher = open_publisher(settings)?;

        Ok(Self::with_transports(
            settings.clone(),
            Box::new(udp),
            publisher,
        ))
    }

    /// Build on already opened transports
    pub fn with_transports(
        settings: NetworkingSettings,
        udp: Box<dyn DatagramTransport>,
        publisher: Option<Box<dyn FramePublisher>>,
    ) -> Self {
        Self {
            settings,
            udp,
            publisher,
            cache: PacketCache::new(),
            color: ColorPipeline::new(),
            packets: StrandPackets::new(),
            opc: OpcEncoder::new(),
            groups: ClientGroups::new(),
            stats: OutputStats::default(),
        }
    }

    /// Convert `frame` and send it to every enabled client in `clients`.
    ///
    /// `dimmer` scales lightness for every client not exempt from dimming.
    /// `strands` maps strand ids to pixel ranges of `frame`.
    pub fn write_buffer(
        &mut self,
        frame: &HlsFrame,
        dimmer: f32,
        strands: &StrandLayout,
        clients: &[ClientConfig],
    ) -> Result<()> {
        let has_publisher = self.settings.use_pubsub && self.publisher.is_some();
        if self
            .groups
            .regroup(clients, self.settings.use_opc, has_publisher)
        {
            let (legacy, opc, pubsub) = self.groups.sizes();
            tracing::debug!(
                "Output clients: {} legacy, {} opc, {} pub/sub",
                legacy,
                opc,
                pubsub
            );
            if self.groups.skipped() > 0 {
                tracing::warn!(
                    "{} enabled client(s) skipped because their protocol is switched off",
                    self.groups.skipped()
                );
            }
        }

        if self.groups.is_empty() {
            self.stats.frames += 1;
            return Ok(());
        }

        let plan = self.groups.dimming_plan(dimmer);
        self.color.render(frame, dimmer, plan);
        self.packets.build(
            strands,
            self.color.primary(),
            self.color.secondary(),
            &mut self.cache,
            self.settings.color_order,
        )?;

        if self.groups.has_pubsub() {
            if let Some(publisher) = self.publisher.as_deref_mut() {
                pubsub::publish_frame(publisher, self.packets.primary())?;
                self.stats.multipart_messages += 1;
            }
        }

        let delay = self.settings.legacy_packet_delay();
        for client in self.groups.legacy(clients) {
            let packets = self.packets.for_client(client.ignore_dimming);
            let sent = legacy::send_frame(self.udp.as_mut(), client, packets, delay)?;
            self.stats.datagrams += sent as u64;
        }

        let channel = opc::channel_for(self.packets.last_strand(), self.settings.opc_channel);
        for ignore_dimming in [false, true] {
            let mut targets = self
                .groups
                .opc(clients)
                .filter(|client| client.ignore_dimming == ignore_dimming)
                .peekable();
            if targets.peek().is_none() {
                continue;
            }

            let packet = self
                .opc
                .encode(channel, self.packets.for_client(ignore_dimming))?;
            for client in targets {
                self.udp.send_to(packet, &client.host, client.port)?;
                self.stats.datagrams += 1;
            }
        }

        self.stats.frames += 1;
        tracing::trace!(
            "Frame {} sent: {} strands, {:?}",
            self.stats.frames,
            self.packets.primary().len(),
            plan
        );

        Ok(())
    }

    /// Release the sockets and return the final counters
    pub fn close(self) -> OutputStats {
        tracing::info!(
            "Output closed after {} frames ({} datagrams, {} pub/sub messages)",
            self.stats.frames,
            self.stats.datagrams,
            self.stats.multipart_messages
        );
        self.stats
    }

    pub fn stats(&self) -> OutputStats {
        self.stats
    }

    pub fn settings(&self) -> &NetworkingSettings {
        &self.settings
    }

    /// Replace the settings. Transports stay open; a changed pub/sub endpoint
    /// only takes effect after reopening.
    pub fn set_settings(&mut self, settings: NetworkingSettings) {
        if settings.pubsub_endpoint != self.settings.pubsub_endpoint {
            tracing::warn!(
                "Pub/sub endpoint changed to {}; reopen the output to rebind",
                settings.pubsub_endpoint
            );
        }
        self.settings = settings;
    }

    pub fn packet_cache(&self) -> &PacketCache {
        &self.cache
    }

    /// Endpoint of the pub/sub socket, if one is open
    pub fn pubsub_endpoint(&self) -> Option<&str> {
        self.publisher.as_deref().map(|publisher| publisher.endpoint())
    }
}

#[cfg(feature = "zmq")]
fn open_publisher(settings: &NetworkingSettings) -> Result<Option<Box<dyn FramePublisher>>> {
    if !settings.use_pubsub {
        return Ok(None);
    }
    let publisher = crate::transport::ZmqPublisher::bind(&settings.pubsub_endpoint)?;
    Ok(Some(Box::new(publisher)))
}

#[cfg(not(feature = "zmq"))]
fn open_publisher(settings: &NetworkingSettings) -> Result<Option<Box<dyn FramePublisher>>> {
    if settings.use_pubsub {
        tracing::warn!("Pub/sub requested but firemix-net was built without the zmq feature");
    }
    Ok(None)
}
