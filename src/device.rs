//! High-level node interface
//!
//! This module ties the work scheduler and the MAC event router together.
//! The surrounding firmware calls [`LoRaWANNode::start`] once and then
//! [`LoRaWANNode::run_once`] from its main loop; each step handles pending MAC
//! events and the work job one after the other, never interleaved.

use core::time::Duration;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::{ActivationMode, ConfigError, NodeConfig, ABP_NET_ID};
use crate::context::NodeContext;
use crate::fmt::info;
use crate::indicator::TxIndicator;
use crate::mac::{MacEngine, MacEvent};
use crate::router::EventOutcome;
use crate::scheduler::WorkScheduler;
use crate::status::StatusReporter;

/// Node error type
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeError {
    /// Invalid configuration
    InvalidConfig(ConfigError),
}

impl From<ConfigError> for NodeError {
    fn from(error: ConfigError) -> Self {
        NodeError::InvalidConfig(error)
    }
}

/// LoRaWAN end node
pub struct LoRaWANNode<M, D, P, S>
where
    M: MacEngine,
    D: DelayMs<u16>,
    P: OutputPin,
    S: StatusReporter,
{
    /// State touched by work ticks and events
    context: NodeContext<M, D, P, S>,
    /// The periodic work job
    scheduler: WorkScheduler,
}

impl<M, D, P, S> LoRaWANNode<M, D, P, S>
where
    M: MacEngine,
    D: DelayMs<u16>,
    P: OutputPin,
    S: StatusReporter,
{
    /// Create a node
    ///
    /// No job is armed until [`LoRaWANNode::start`] or
    /// [`LoRaWANNode::initialize_work_scheduler`] is called.
    pub fn new(
        config: NodeConfig,
        mac: M,
        delay: D,
        led: Option<P>,
        reporter: S,
    ) -> Result<Self, NodeError> {
        config.validate()?;
        let scheduler = WorkScheduler::new(config.work_interval_secs);
        Ok(Self {
            context: NodeContext::new(config, mac, delay, led, reporter),
            scheduler,
        })
    }

    /// Configure the MAC engine and arm the first work job
    pub fn start(&mut self, now: Duration) {
        let ctx = &mut self.context;
        ctx.reporter.header(&ctx.config);
        ctx.telemetry.reset();

        ctx.mac.set_adr_mode(ctx.config.adr_enabled);
        if let Some(sub_band) = ctx.config.sub_band {
            ctx.mac.select_sub_band(sub_band);
        }

        match ctx.config.activation_mode() {
            ActivationMode::Abp => {
                if let Some((dev_addr, nwk_skey, app_skey)) = ctx.config.device.abp_session() {
                    ctx.mac.set_session(ABP_NET_ID, dev_addr, &nwk_skey, &app_skey);
                }
                ctx.mac.set_link_check_mode(false);
            }
            ActivationMode::Otaa => {
                info!("starting OTAA join");
                ctx.mac.start_joining();
            }
        }

        self.initialize_work_scheduler(now);
    }

    /// Arm the work job for immediate execution
    pub fn initialize_work_scheduler(&mut self, now: Duration) {
        self.scheduler.initialize(now);
    }

    /// Handle an event from the MAC engine
    pub fn on_mac_event(&mut self, now: Duration, event: &MacEvent) {
        if self.context.route_event(now, event) == EventOutcome::RearmWork {
            self.scheduler.rearm_now(now);
        }
    }

    /// One run-loop step
    ///
    /// Routes every pending MAC event, then runs the work job if it is due.
    /// Returns the fire time of the next work job.
    pub fn run_once(&mut self, now: Duration) -> Option<Duration> {
        while let Some(event) = self.context.mac.next_event() {
            self.on_mac_event(now, &event);
        }
        self.scheduler.run_due(now, &mut self.context);
        self.scheduler.next_fire_time()
    }

    /// Change the work interval, effective from the next work tick
    pub fn set_work_interval(&mut self, secs: u32) -> Result<(), NodeError> {
        if secs == 0 {
            return Err(ConfigError::ZeroInterval.into());
        }
        self.context.config.work_interval_secs = secs;
        self.scheduler.set_interval_secs(secs);
        Ok(())
    }

    /// Interpret an application downlink
    pub fn dispatch_downlink(&mut self, now: Duration, port: u8, payload: &[u8]) {
        self.context.dispatch_downlink(now, port, payload);
    }

    /// Configuration
    pub fn config(&self) -> &NodeConfig {
        &self.context.config
    }

    /// Activation mode
    pub fn activation_mode(&self) -> ActivationMode {
        self.context.config.activation_mode()
    }

    /// Current counter value
    pub fn counter(&self) -> u16 {
        self.context.telemetry.value()
    }

    /// Work scheduler
    pub fn scheduler(&self) -> &WorkScheduler {
        &self.scheduler
    }

    /// Transmit indicator
    pub fn indicator(&self) -> &TxIndicator<P> {
        &self.context.indicator
    }

    /// MAC engine
    pub fn mac(&self) -> &M {
        &self.context.mac
    }

    /// Mutable MAC engine
    pub fn mac_mut(&mut self) -> &mut M {
        &mut self.context.mac
    }

    /// Status reporter
    pub fn reporter(&self) -> &S {
        &self.context.reporter
    }

    /// Delay provider of the telemetry source
    pub fn delay(&self) -> &D {
        self.context.telemetry.delay()
    }
}
