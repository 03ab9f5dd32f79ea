//! Node configuration
//!
//! This module contains the configuration the node resolves once at start-up:
//! - Device credentials (DevEUI, AppEUI, keys) and the activation mode they imply
//! - Work interval and application ports
//! - MAC engine set-up options (ADR, sub-band)

/// Device credentials and session state
pub mod device;

pub use device::{DeviceConfig, SessionState};
use heapless::String;

use crate::mac::signal::RssiModel;

/// EUI-64 (8 bytes)
pub type EUI64 = [u8; 8];
/// AES-128 key (16 bytes)
pub type AESKey = [u8; 16];
/// Device address
pub type DevAddr = u32;

/// Default work interval (5 minutes)
pub const DEFAULT_WORK_INTERVAL_SECS: u32 = 300;
/// Application port for counter uplinks
pub const DEFAULT_UPLINK_PORT: u8 = 10;
/// Application port for downlink commands
pub const DEFAULT_COMMAND_PORT: u8 = 100;
/// Opcode of the reset counter command
pub const DEFAULT_RESET_OPCODE: u8 = 0xC0;
/// Simulated sensor acquisition time in milliseconds
pub const DEFAULT_SAMPLE_LATENCY_MS: u16 = 50;
/// Network identifier used for a static ABP session
pub const ABP_NET_ID: u32 = 0x1;
/// Capacity of the device id string
pub const DEVICE_ID_CAPACITY: usize = 32;

/// Highest application port (224..=255 are reserved)
const MAX_APPLICATION_PORT: u8 = 223;

/// How the node obtains its session
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivationMode {
    /// Over-the-air activation, must join before uplinks carry meaning
    Otaa,
    /// Activation by personalization, the session is pre-provisioned
    Abp,
}

impl ActivationMode {
    /// Short name used in status output
    pub fn name(&self) -> &'static str {
        match self {
            ActivationMode::Otaa => "OTAA",
            ActivationMode::Abp => "ABP",
        }
    }
}

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Work interval must be at least one second
    ZeroInterval,
    /// Uplink port outside 1..=223
    InvalidUplinkPort(u8),
    /// Command port outside 1..=223
    InvalidCommandPort(u8),
    /// ABP selected but the device address is missing or zero, or a session
    /// key is missing
    MissingAbpSession,
}

/// Node configuration
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    /// Device credentials
    pub device: DeviceConfig,
    /// Identifier shown in the status header
    pub device_id: String<DEVICE_ID_CAPACITY>,
    /// Seconds between work ticks
    pub work_interval_secs: u32,
    /// Application port for uplinks
    pub uplink_port: u8,
    /// Application port for downlink commands
    pub command_port: u8,
    /// Opcode of the reset counter command
    pub reset_opcode: u8,
    /// Request confirmed uplinks
    pub confirmed_uplinks: bool,
    /// Enable adaptive data rate (disable for mobile nodes)
    pub adr_enabled: bool,
    /// Sub-band to select on US915/AU915
    pub sub_band: Option<u8>,
    /// Simulated sensor latency in milliseconds
    pub sample_latency_ms: u16,
    /// How raw downlink RSSI is converted to dBm
    pub rssi_model: RssiModel,
}

impl NodeConfig {
    /// Create a configuration with default settings for the given credentials
    pub fn new(device: DeviceConfig) -> Self {
        Self {
            device,
            device_id: String::new(),
            work_interval_secs: DEFAULT_WORK_INTERVAL_SECS,
            uplink_port: DEFAULT_UPLINK_PORT,
            command_port: DEFAULT_COMMAND_PORT,
            reset_opcode: DEFAULT_RESET_OPCODE,
            confirmed_uplinks: false,
            adr_enabled: true,
            sub_band: None,
            sample_latency_ms: DEFAULT_SAMPLE_LATENCY_MS,
            rssi_model: RssiModel::Offset,
        }
    }

    /// Set the device id, truncated to the buffer capacity
    pub fn with_device_id(mut self, id: &str) -> Self {
        self.device_id.clear();
        for c in id.chars() {
            if self.device_id.push(c).is_err() {
                break;
            }
        }
        self
    }

    /// Set the work interval
    pub fn with_work_interval(mut self, secs: u32) -> Self {
        self.work_interval_secs = secs;
        self
    }

    /// Set the uplink port
    pub fn with_uplink_port(mut self, port: u8) -> Self {
        self.uplink_port = port;
        self
    }

    /// Set command port and reset opcode
    pub fn with_reset_command(mut self, port: u8, opcode: u8) -> Self {
        self.command_port = port;
        self.reset_opcode = opcode;
        self
    }

    /// Request confirmed uplinks
    pub fn with_confirmed_uplinks(mut self, confirmed: bool) -> Self {
        self.confirmed_uplinks = confirmed;
        self
    }

    /// Enable or disable ADR
    pub fn with_adr(mut self, enabled: bool) -> Self {
        self.adr_enabled = enabled;
        self
    }

    /// Select a sub-band (US915/AU915)
    pub fn with_sub_band(mut self, sub_band: u8) -> Self {
        self.sub_band = Some(sub_band);
        self
    }

    /// Set the simulated sensor latency
    pub fn with_sample_latency(mut self, ms: u16) -> Self {
        self.sample_latency_ms = ms;
        self
    }

    /// Set the RSSI conversion
    pub fn with_rssi_model(mut self, model: RssiModel) -> Self {
        self.rssi_model = model;
        self
    }

    /// Activation mode, fixed for the life of the node
    pub fn activation_mode(&self) -> ActivationMode {
        self.device.activation_mode()
    }

    /// Check the configuration for values the node cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if !is_application_port(self.uplink_port) {
            return Err(ConfigError::InvalidUplinkPort(self.uplink_port));
        }
        if !is_application_port(self.command_port) {
            return Err(ConfigError::InvalidCommandPort(self.command_port));
        }
        if self.activation_mode() == ActivationMode::Abp {
            // Address zero means no session
            match self.device.abp_session() {
                Some((dev_addr, _, _)) if dev_addr != 0 => {}
                _ => return Err(ConfigError::MissingAbpSession),
            }
        }
        Ok(())
    }
}

fn is_application_port(port: u8) -> bool {
    (1..=MAX_APPLICATION_PORT).contains(&port)
}
