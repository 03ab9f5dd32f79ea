//! Node state shared by the work job and the MAC event router
//!
//! Both run on the same thread of control and never at the same time, so
//! they mutate the counter and the indicator without locking. Moving the node
//! to a multi-threaded environment needs one lock around a complete work tick
//! or a complete event callback.

use core::time::Duration;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::NodeConfig;
use crate::downlink::{CommandTable, DownlinkCommand};
use crate::fmt::{debug, info, warn};
use crate::indicator::TxIndicator;
use crate::mac::MacEngine;
use crate::scheduler::Work;
use crate::status::StatusReporter;
use crate::telemetry::TelemetrySource;
use crate::uplink::{self, Rejected};

/// Everything the node owns apart from the work job
pub struct NodeContext<M, D, P, S>
where
    M: MacEngine,
    D: DelayMs<u16>,
    P: OutputPin,
    S: StatusReporter,
{
    /// Configuration
    pub(crate) config: NodeConfig,
    /// MAC engine
    pub(crate) mac: M,
    /// Simulated sensor
    pub(crate) telemetry: TelemetrySource<D>,
    /// Transmit indicator
    pub(crate) indicator: TxIndicator<P>,
    /// Status output
    pub(crate) reporter: S,
    /// Downlink commands
    pub(crate) commands: CommandTable,
}

impl<M, D, P, S> NodeContext<M, D, P, S>
where
    M: MacEngine,
    D: DelayMs<u16>,
    P: OutputPin,
    S: StatusReporter,
{
    /// Create the context
    pub fn new(config: NodeConfig, mac: M, delay: D, led: Option<P>, reporter: S) -> Self {
        let telemetry = TelemetrySource::new(delay, config.sample_latency_ms);
        let commands = CommandTable::new(config.command_port, config.reset_opcode);
        Self {
            config,
            mac,
            telemetry,
            indicator: TxIndicator::new(led),
            reporter,
            commands,
        }
    }

    /// Interpret an application downlink
    ///
    /// Unrecognized downlinks are ignored.
    pub fn dispatch_downlink(&mut self, now: Duration, port: u8, payload: &[u8]) -> DownlinkCommand {
        let command = self.commands.parse(port, payload);
        match command {
            DownlinkCommand::ResetCounter => {
                self.telemetry.reset();
                info!("counter reset by downlink");
                self.reporter.counter_reset(now);
            }
            DownlinkCommand::Unrecognized => {
                debug!("ignoring downlink on port {}, {} bytes", port, payload.len());
            }
        }
        command
    }

    /// Switch the transmit indicator
    pub(crate) fn set_tx_indicator(&mut self, on: bool) {
        self.indicator.set(on, &mut self.reporter);
    }
}

impl<M, D, P, S> Work for NodeContext<M, D, P, S>
where
    M: MacEngine,
    D: DelayMs<u16>,
    P: OutputPin,
    S: StatusReporter,
{
    fn do_work(&mut self, now: Duration) {
        self.reporter.work_started(now);

        // Nothing to send while an OTAA join is still running
        if !self.mac.session().is_established() {
            debug!("work tick skipped, no session");
            return;
        }

        let value = self.telemetry.sample();
        self.reporter
            .counter_value(now, value, self.config.work_interval_secs);

        let payload = uplink::encode_counter(value);
        match uplink::try_submit(
            &mut self.mac,
            self.config.uplink_port,
            &payload,
            self.config.confirmed_uplinks,
        ) {
            Ok(accepted) => {
                info!(
                    "uplink queued on port {}, counter {}",
                    accepted.port, value
                );
                self.reporter.uplink_queued(now);
                self.set_tx_indicator(true);
            }
            Err(Rejected::Busy) => {
                debug!("uplink skipped, transmit pending");
                self.reporter.uplink_rejected(now, Rejected::Busy);
            }
            Err(reason) => {
                warn!("uplink rejected: {:?}", reason);
                self.reporter.uplink_rejected(now, reason);
            }
        }
    }
}
