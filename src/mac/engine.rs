use crate::config::{AESKey, DevAddr, SessionState};

use super::event::MacEvent;

/// Uplink refused by the MAC engine
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxError {
    /// A transmit/receive cycle is still in progress
    Busy,
    /// Payload too large for the current data rate
    TooLarge,
    /// Not possible with the current channel plan or data rate
    NotFeasible,
    /// Engine failed to queue the frame
    Failed,
    /// Engine specific code
    Other(i8),
}

impl TxError {
    /// Map an engine return code, `None` for success
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => None,
            -1 => Some(TxError::Busy),
            -2 => Some(TxError::TooLarge),
            -3 => Some(TxError::NotFeasible),
            -4 => Some(TxError::Failed),
            other => Some(TxError::Other(other)),
        }
    }

    /// Engine return code
    pub fn code(&self) -> i8 {
        match self {
            TxError::Busy => -1,
            TxError::TooLarge => -2,
            TxError::NotFeasible => -3,
            TxError::Failed => -4,
            TxError::Other(code) => *code,
        }
    }

    /// Name used in status output
    pub fn name(&self) -> &'static str {
        match self {
            TxError::Busy => "TX_BUSY",
            TxError::TooLarge => "TX_TOO_LARGE",
            TxError::NotFeasible => "TX_NOT_FEASIBLE",
            TxError::Failed => "TX_FAILED",
            TxError::Other(_) => "UNKNOWN",
        }
    }
}

/// LoRaWAN MAC engine
///
/// All calls return immediately. Events are collected by the engine while it
/// runs and handed out one at a time through [`MacEngine::next_event`].
pub trait MacEngine {
    /// Queue a frame for transmission at the next opportunity
    fn submit_uplink(&mut self, port: u8, payload: &[u8], confirmed: bool) -> Result<(), TxError>;

    /// Check if a transmit/receive cycle is in progress
    fn is_tx_pending(&self) -> bool;

    /// Current session, used for diagnostics and join detection
    fn session(&self) -> SessionState;

    /// Take the next pending event
    fn next_event(&mut self) -> Option<MacEvent>;

    /// Start the OTAA join procedure
    fn start_joining(&mut self);

    /// Install a static ABP session
    fn set_session(&mut self, net_id: u32, dev_addr: DevAddr, nwk_skey: &AESKey, app_skey: &AESKey);

    /// Enable or disable link check validation
    fn set_link_check_mode(&mut self, enabled: bool);

    /// Enable or disable adaptive data rate
    fn set_adr_mode(&mut self, enabled: bool);

    /// Restrict the channel plan to one sub-band
    fn select_sub_band(&mut self, sub_band: u8);
}
