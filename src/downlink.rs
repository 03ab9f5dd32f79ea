//! Downlink command protocol
//!
//! Application downlinks are matched against a small command table. Only the
//! reset counter command exists; anything else is ignored so that newer
//! commands do not disturb older firmware.

/// Parsed application downlink
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DownlinkCommand {
    /// Set the telemetry counter to zero
    ResetCounter,
    /// Not a known command
    Unrecognized,
}

/// Command port and opcodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandTable {
    /// Port commands are accepted on
    pub command_port: u8,
    /// Single byte payload selecting the reset command
    pub reset_opcode: u8,
}

impl CommandTable {
    /// Create a command table
    pub fn new(command_port: u8, reset_opcode: u8) -> Self {
        Self {
            command_port,
            reset_opcode,
        }
    }

    /// Match a downlink against the table
    pub fn parse(&self, port: u8, payload: &[u8]) -> DownlinkCommand {
        match payload {
            [opcode] if port == self.command_port && *opcode == self.reset_opcode => {
                DownlinkCommand::ResetCounter
            }
            _ => DownlinkCommand::Unrecognized,
        }
    }
}
