//! MAC event router
//!
//! Invoked synchronously for every event the MAC engine reports. A downlink
//! delivered with a transmit complete event is fully dispatched before the
//! router returns.

use core::time::Duration;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::context::NodeContext;
use crate::fmt::{debug, info};
use crate::mac::signal::SignalQuality;
use crate::mac::{MacEngine, MacEvent};
use crate::status::StatusReporter;

/// What the scheduler has to do after an event
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventOutcome {
    /// Nothing
    Handled,
    /// Cancel the pending work job and run it now
    RearmWork,
}

impl<M, D, P, S> NodeContext<M, D, P, S>
where
    M: MacEngine,
    D: DelayMs<u16>,
    P: OutputPin,
    S: StatusReporter,
{
    /// Handle one MAC engine event
    pub fn route_event(&mut self, now: Duration, event: &MacEvent) -> EventOutcome {
        match event {
            // Reporting here would disturb receive window timing
            MacEvent::RxStart => {}

            MacEvent::TxStart => {
                self.set_tx_indicator(true);
                self.reporter.mac_event(now, event);
            }

            MacEvent::TxCanceled | MacEvent::JoinTxComplete => {
                self.set_tx_indicator(false);
                self.reporter.mac_event(now, event);
            }

            MacEvent::Joined => {
                self.set_tx_indicator(false);
                self.reporter.mac_event(now, event);

                let session = self.mac.session();
                info!("joined, device address {}", session.dev_addr);
                self.reporter.session_keys(&session);

                // Link check is enabled by the join but not used by this node
                self.mac.set_link_check_mode(false);

                // The job has likely rescheduled itself while joining
                return EventOutcome::RearmWork;
            }

            MacEvent::TxComplete(info) => {
                self.set_tx_indicator(false);
                self.reporter.mac_event(now, event);

                let session = self.mac.session();
                self.reporter
                    .frame_counters(session.seqno_up, session.seqno_dn);

                if info.has_downlink() {
                    let signal = SignalQuality::from_raw(info.rssi, info.snr, self.config.rssi_model);
                    self.reporter.downlink_info(info, signal);
                    self.dispatch_downlink(now, info.port(), &info.payload);
                }
            }

            _ => {
                debug!("mac event {}", event.name());
                self.reporter.mac_event(now, event);
            }
        }
        EventOutcome::Handled
    }
}
