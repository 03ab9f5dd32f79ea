//! LoRaWAN end node application core
//!
//! This crate contains the application side of a battery powered LoRaWAN end
//! node. It periodically samples a data source, submits the value as an uplink
//! through a LoRaWAN MAC engine and reacts to the engine's events (join,
//! transmit completion, downlinks) to drive a small remote command protocol.
//!
//! # Features
//! - Single self-rescheduling work job, re-armed immediately after a join
//! - At most one uplink in flight, busy ticks are dropped instead of queued
//! - Reset counter downlink command
//! - OTAA and ABP activation
//! - Status output through the `log` facade or `defmt`
//! - No unsafe code
//!
//! # Example
//! ```
//! use core::time::Duration;
//! use lorawan_node::{
//!     config::{AESKey, DevAddr, DeviceConfig, NodeConfig, SessionState},
//!     device::LoRaWANNode,
//!     indicator::NoPin,
//!     mac::{MacEngine, MacEvent, TxError},
//!     status::LogReporter,
//! };
//! # struct Engine { session: SessionState }
//! # impl MacEngine for Engine {
//! #     fn submit_uplink(&mut self, _: u8, _: &[u8], _: bool) -> Result<(), TxError> { Ok(()) }
//! #     fn is_tx_pending(&self) -> bool { false }
//! #     fn session(&self) -> SessionState { self.session }
//! #     fn next_event(&mut self) -> Option<MacEvent> { None }
//! #     fn start_joining(&mut self) {}
//! #     fn set_session(&mut self, net_id: u32, dev_addr: DevAddr, nwk: &AESKey, app: &AESKey) {
//! #         self.session = SessionState { net_id, dev_addr, nwk_skey: *nwk, app_skey: *app, ..self.session };
//! #     }
//! #     fn set_link_check_mode(&mut self, _: bool) {}
//! #     fn set_adr_mode(&mut self, _: bool) {}
//! #     fn select_sub_band(&mut self, _: u8) {}
//! # }
//! # struct Delay;
//! # impl embedded_hal::blocking::delay::DelayMs<u16> for Delay { fn delay_ms(&mut self, _: u16) {} }
//! # let engine = Engine { session: SessionState::default() };
//!
//! // ABP node sending every 60 seconds
//! let device = DeviceConfig::new_abp(0x2601_1234, [0x01; 16], [0x02; 16]);
//! let config = NodeConfig::new(device).with_work_interval(60);
//!
//! let mut node: LoRaWANNode<_, _, NoPin, _> =
//!     LoRaWANNode::new(config, engine, Delay, None, LogReporter::new()).unwrap();
//! node.start(Duration::from_secs(0));
//!
//! // First tick fires immediately and sends the counter
//! let next = node.run_once(Duration::from_secs(0));
//! assert_eq!(node.counter(), 1);
//! assert_eq!(next, Some(Duration::from_secs(60)));
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

mod fmt;

/// Node configuration and credentials
pub mod config;

/// Work job and event router state
pub mod context;

/// High-level node interface
pub mod device;

/// Downlink command protocol
pub mod downlink;

/// Transmit indicator
pub mod indicator;

/// MAC engine interface
pub mod mac;

/// MAC event router
pub mod router;

/// Work scheduler
pub mod scheduler;

/// Status reporting
pub mod status;

/// Simulated sensor
pub mod telemetry;

/// Uplink admission
pub mod uplink;
