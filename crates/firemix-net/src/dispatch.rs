//! Client dispatcher
//!
//! Splits the enabled clients by protocol. The client list is re-read every
//! frame, so enabling, disabling, adding or removing a client takes effect on
//! the next write without any extra synchronization.

use firemix_core::settings::{ClientConfig, Protocol};

use crate::color::DimmingPlan;

/// Enabled clients grouped by protocol, as indices into the client list
#[derive(Debug, Default)]
pub struct ClientGroups {
    legacy: Vec<usize>,
    opc: Vec<usize>,
    pubsub: Vec<usize>,
    skipped: usize,
    wants_dimmed: bool,
    wants_undimmed: bool,
}

impl ClientGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the groups from `clients`.
    ///
    /// OPC clients are dropped when `use_opc` is off, pub/sub clients when
    /// `use_pubsub` is off. Returns true if any group size changed.
    pub fn regroup(&mut self, clients: &[ClientConfig], use_opc: bool, use_pubsub: bool) -> bool {
        let previous = (self.sizes(), self.skipped);

        self.legacy.clear();
        self.opc.clear();
        self.pubsub.clear();
        self.skipped = 0;
        self.wants_dimmed = false;
        self.wants_undimmed = false;

        for (index, client) in clients.iter().enumerate() {
            if !client.enabled {
                continue;
            }
            match client.protocol {
                Protocol::Legacy => self.legacy.push(index),
                Protocol::Opc if use_opc => self.opc.push(index),
                Protocol::PubSub if use_pubsub => self.pubsub.push(index),
                _ => {
                    self.skipped += 1;
                    continue;
                }
            }

            // Pub/sub subscribers share one message and cannot opt out.
            if client.ignore_dimming && client.protocol != Protocol::PubSub {
                self.wants_undimmed = true;
            } else {
                self.wants_dimmed = true;
            }
        }

        (self.sizes(), self.skipped) != previous
    }

    /// `(legacy, opc, pubsub)` group sizes
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.legacy.len(), self.opc.len(), self.pubsub.len())
    }

    /// Enabled clients whose protocol is switched off
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn legacy<'a>(
        &'a self,
        clients: &'a [ClientConfig],
    ) -> impl Iterator<Item = &'a ClientConfig> + 'a {
        self.legacy.iter().filter_map(move |&index| clients.get(index))
    }

    pub fn opc<'a>(
        &'a self,
        clients: &'a [ClientConfig],
    ) -> impl Iterator<Item = &'a ClientConfig> + 'a {
        self.opc.iter().filter_map(move |&index| clients.get(index))
    }

    pub fn pubsub<'a>(
        &'a self,
        clients: &'a [ClientConfig],
    ) -> impl Iterator<Item = &'a ClientConfig> + 'a {
        self.pubsub.iter().filter_map(move |&index| clients.get(index))
    }

    pub fn has_pubsub(&self) -> bool {
        !self.pubsub.is_empty()
    }

    /// True if no enabled client will receive this frame
    pub fn is_empty(&self) -> bool {
        self.legacy.is_empty() && self.opc.is_empty() && self.pubsub.is_empty()
    }

    /// Buffers required for `dimmer` given the current groups
    pub fn dimming_plan(&self, dimmer: f32) -> DimmingPlan {
        DimmingPlan::new(self.wants_dimmed, self.wants_undimmed, dimmer)
    }
}
