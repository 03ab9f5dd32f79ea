//! Uplink admission
//!
//! At most one uplink is in flight. A new frame is only built and handed to
//! the MAC engine when the engine reports no pending transmit/receive cycle;
//! otherwise the data for this tick is dropped, never queued.

use heapless::Vec;

use crate::mac::{MacEngine, TxError};

/// Capacity of the uplink payload buffer
pub const UPLINK_PAYLOAD_CAPACITY: usize = 4;

/// Reason an uplink was not submitted
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rejected {
    /// A transmit/receive cycle is pending
    Busy,
    /// Payload exceeds the uplink buffer
    Oversized,
    /// MAC engine refused the frame
    MacError(TxError),
}

/// Uplink handed to the MAC engine
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accepted {
    /// Application port
    pub port: u8,
    /// Payload length in bytes
    pub length: usize,
    /// Confirmed uplink
    pub confirmed: bool,
}

/// Pending transmission request
#[derive(Debug, Clone, PartialEq)]
pub struct UplinkMessage {
    /// Application port
    pub port: u8,
    /// Payload
    pub payload: Vec<u8, UPLINK_PAYLOAD_CAPACITY>,
    /// Confirmed uplink
    pub confirmed: bool,
}

impl UplinkMessage {
    /// Build a message, failing if the payload does not fit
    pub fn new(port: u8, payload: &[u8], confirmed: bool) -> Result<Self, Rejected> {
        let payload = Vec::from_slice(payload).map_err(|_| Rejected::Oversized)?;
        Ok(Self {
            port,
            payload,
            confirmed,
        })
    }

    /// Hand the message to the MAC engine, consuming it
    pub fn submit<M: MacEngine>(self, mac: &mut M) -> Result<Accepted, Rejected> {
        mac.submit_uplink(self.port, &self.payload, self.confirmed)
            .map_err(Rejected::MacError)?;
        Ok(Accepted {
            port: self.port,
            length: self.payload.len(),
            confirmed: self.confirmed,
        })
    }
}

/// Submit an uplink if no transmit/receive cycle is pending
///
/// Returns without side effects when the engine is busy.
pub fn try_submit<M: MacEngine>(
    mac: &mut M,
    port: u8,
    payload: &[u8],
    confirmed: bool,
) -> Result<Accepted, Rejected> {
    if mac.is_tx_pending() {
        return Err(Rejected::Busy);
    }
    UplinkMessage::new(port, payload, confirmed)?.submit(mac)
}

/// Uplink payload for a counter value (big endian)
pub fn encode_counter(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}
