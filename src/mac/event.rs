use heapless::Vec;

/// Maximum downlink application payload size
pub const MAX_DOWNLINK_PAYLOAD: usize = 242;

/// Outcome of a completed transmit/receive cycle
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxCompleteInfo {
    /// Offset of the application data in the received frame
    pub data_offset: u8,
    /// Port, present when the frame carried one
    pub port: Option<u8>,
    /// Received application payload
    pub payload: Vec<u8, MAX_DOWNLINK_PAYLOAD>,
    /// Raw RSSI as reported by the radio
    pub rssi: i16,
    /// Raw SNR in quarter dB
    pub snr: i8,
    /// Confirmed uplink was acknowledged
    pub ack: bool,
}

impl TxCompleteInfo {
    /// Check whether a downlink arrived in the receive windows
    pub fn has_downlink(&self) -> bool {
        !self.payload.is_empty() || self.data_offset != 0
    }

    /// Downlink port, 0 when the frame had none
    pub fn port(&self) -> u8 {
        self.port.unwrap_or(0)
    }
}

/// Event reported by the MAC engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacEvent {
    /// Beacon scan timed out
    ScanTimeout,
    /// Beacon found by a scan
    BeaconFound,
    /// Expected beacon not received
    BeaconMissed,
    /// Beacon received at the expected time
    BeaconTracked,
    /// Join procedure started
    Joining,
    /// Join accepted, session established
    Joined,
    /// Reserved, never raised
    Rfu1,
    /// Join procedure gave up
    JoinFailed,
    /// Rejoin attempt failed
    RejoinFailed,
    /// Transmit completed, including both receive windows
    TxComplete(TxCompleteInfo),
    /// Beacon time sync lost
    LostTsync,
    /// Session reset
    Reset,
    /// Class B/C downlink received outside a Class A cycle
    RxComplete,
    /// No confirmation from the network for too long
    LinkDead,
    /// Link confirmed again
    LinkAlive,
    /// Reserved, never raised
    ScanFound,
    /// Radio started transmitting
    TxStart,
    /// Pending transmission was cancelled
    TxCanceled,
    /// Receive window opened
    RxStart,
    /// Join request sent without receiving an accept
    JoinTxComplete,
    /// Event code not known to this firmware
    Unknown(u8),
}

impl MacEvent {
    /// Name used in status output
    pub fn name(&self) -> &'static str {
        match self {
            MacEvent::ScanTimeout => "EV_SCAN_TIMEOUT",
            MacEvent::BeaconFound => "EV_BEACON_FOUND",
            MacEvent::BeaconMissed => "EV_BEACON_MISSED",
            MacEvent::BeaconTracked => "EV_BEACON_TRACKED",
            MacEvent::Joining => "EV_JOINING",
            MacEvent::Joined => "EV_JOINED",
            MacEvent::Rfu1 => "EV_RFU1",
            MacEvent::JoinFailed => "EV_JOIN_FAILED",
            MacEvent::RejoinFailed => "EV_REJOIN_FAILED",
            MacEvent::TxComplete(_) => "EV_TXCOMPLETE",
            MacEvent::LostTsync => "EV_LOST_TSYNC",
            MacEvent::Reset => "EV_RESET",
            MacEvent::RxComplete => "EV_RXCOMPLETE",
            MacEvent::LinkDead => "EV_LINK_DEAD",
            MacEvent::LinkAlive => "EV_LINK_ALIVE",
            MacEvent::ScanFound => "EV_SCAN_FOUND",
            MacEvent::TxStart => "EV_TXSTART",
            MacEvent::TxCanceled => "EV_TXCANCELED",
            MacEvent::RxStart => "EV_RXSTART",
            MacEvent::JoinTxComplete => "EV_JOIN_TXCOMPLETE",
            MacEvent::Unknown(_) => "Unknown Event",
        }
    }
}
