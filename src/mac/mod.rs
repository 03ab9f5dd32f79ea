//! MAC engine interface
//!
//! The LoRaWAN MAC engine (join, channel plan, duty cycle, framing, radio)
//! is an external collaborator. This module contains:
//! - The engine trait the node calls into
//! - The events the engine reports back
//! - Signal quality helpers for downlink diagnostics

/// Engine trait and transmit errors
pub mod engine;

/// Engine events
pub mod event;

/// RSSI and SNR conversion
pub mod signal;

pub use engine::{MacEngine, TxError};
pub use event::{MacEvent, TxCompleteInfo, MAX_DOWNLINK_PAYLOAD};
