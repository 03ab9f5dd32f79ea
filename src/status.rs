//! Status reporting
//!
//! The node describes what it does through [`StatusReporter`]. Serial and
//! display rendering live behind this trait; [`LogReporter`] renders the
//! serial form through the logging back-end.

use core::fmt;
use core::time::Duration;

use crate::config::{NodeConfig, SessionState};
use crate::fmt::info;
use crate::mac::signal::SignalQuality;
use crate::mac::{MacEvent, TxCompleteInfo};
use crate::uplink::Rejected;

/// Number of digits of the zero padded timestamp
pub const TIMESTAMP_WIDTH: usize = 12;

/// Receiver of node status
///
/// Every method defaults to doing nothing so a reporter only implements what
/// its output can show.
pub trait StatusReporter {
    /// Start-up banner
    fn header(&mut self, _config: &NodeConfig) {}

    /// MAC engine event
    fn mac_event(&mut self, _now: Duration, _event: &MacEvent) {}

    /// Work job fired
    fn work_started(&mut self, _now: Duration) {}

    /// Sensor value collected
    fn counter_value(&mut self, _now: Duration, _value: u16, _interval_secs: u32) {}

    /// Uplink handed to the MAC engine
    fn uplink_queued(&mut self, _now: Duration) {}

    /// Uplink not submitted
    fn uplink_rejected(&mut self, _now: Duration, _reason: Rejected) {}

    /// Frame counters after a transmit cycle
    fn frame_counters(&mut self, _up: u32, _down: u32) {}

    /// Session established by a join
    fn session_keys(&mut self, _session: &SessionState) {}

    /// Downlink received
    fn downlink_info(&mut self, _info: &TxCompleteInfo, _signal: SignalQuality) {}

    /// Counter reset by a downlink command
    fn counter_reset(&mut self, _now: Duration) {}

    /// Show or hide the transmit symbol
    fn tx_symbol(&mut self, _visible: bool) {}
}

/// Reporter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl StatusReporter for NullReporter {}

/// Reporter writing serial style lines to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl LogReporter {
    /// Create a log reporter
    pub fn new() -> Self {
        Self
    }
}

impl StatusReporter for LogReporter {
    fn header(&mut self, config: &NodeConfig) {
        info!("LMIC-node");
        info!("Device-id:     {}", config.device_id.as_str());
        info!("Activation:    {}", config.activation_mode().name());
        info!("Interval:      {} seconds", config.work_interval_secs);
    }

    fn mac_event(&mut self, now: Duration, event: &MacEvent) {
        info!("{}:  Event: {}", Timestamp(now), event.name());
    }

    fn work_started(&mut self, now: Duration) {
        info!("{}:  doWork job started", Timestamp(now));
    }

    fn counter_value(&mut self, now: Duration, value: u16, _interval_secs: u32) {
        info!("{}:  Input data collected", Timestamp(now));
        info!("    COUNTER value: {}", value);
    }

    fn uplink_queued(&mut self, now: Duration) {
        info!("{}:  Packet queued", Timestamp(now));
    }

    fn uplink_rejected(&mut self, now: Duration, reason: Rejected) {
        match reason {
            Rejected::Busy => info!(
                "{}:  Uplink not scheduled because TxRx pending",
                Timestamp(now)
            ),
            Rejected::Oversized => info!("{}:  Uplink payload too large", Timestamp(now)),
            Rejected::MacError(error) => {
                info!("{}:  LMIC Error: {}", Timestamp(now), error.name())
            }
        }
    }

    fn frame_counters(&mut self, up: u32, down: u32) {
        info!("    Up: {},  Down: {}", up, down);
    }

    fn session_keys(&mut self, session: &SessionState) {
        info!("    Network Id: {}", session.net_id);
        info!("    Device Address: {}", Hex(&session.dev_addr.to_be_bytes(), None));
        info!(
            "    Application Session Key: {}",
            Hex(&session.app_skey, Some('-'))
        );
        info!(
            "    Network Session Key:     {}",
            Hex(&session.nwk_skey, Some('-'))
        );
    }

    fn downlink_info(&mut self, info: &TxCompleteInfo, signal: SignalQuality) {
        info!("    Downlink received");
        info!(
            "    RSSI: {} dBm,  SNR: {} dB",
            signal.rssi,
            signal.snr()
        );
        info!("    Port: {}", info.port());
        if !info.payload.is_empty() {
            info!("    Length: {}", info.payload.len());
            info!("    Data: {}", Hex(&info.payload, Some(' ')));
        }
    }

    fn counter_reset(&mut self, now: Duration) {
        info!("    Reset cmd received");
        info!("{}:  Counter reset", Timestamp(now));
    }
}

/// Zero padded millisecond timestamp
struct Timestamp(Duration);

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0.as_millis(), width = TIMESTAMP_WIDTH)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Timestamp {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{=u64}", self.0.as_millis() as u64)
    }
}

/// Upper case hex bytes with an optional separator
struct Hex<'a>(&'a [u8], Option<char>);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                if let Some(sep) = self.1 {
                    write!(f, "{}", sep)?;
                }
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Hex<'_> {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{=[u8]:02X}", self.0)
    }
}
