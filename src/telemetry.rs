//! Simulated sensor
//!
//! A free-running counter stands in for real sensor acquisition. Each sample
//! increments it by one; a downlink command can reset it.

use embedded_hal::blocking::delay::DelayMs;

/// Counter based telemetry source
pub struct TelemetrySource<D: DelayMs<u16>> {
    /// Current counter value
    value: u16,
    /// Delay provider modelling acquisition time
    delay: D,
    /// Acquisition time in milliseconds
    latency_ms: u16,
}

impl<D: DelayMs<u16>> TelemetrySource<D> {
    /// Create a source starting at zero
    pub fn new(delay: D, latency_ms: u16) -> Self {
        Self {
            value: 0,
            delay,
            latency_ms,
        }
    }

    /// Increment the counter and return the new value
    ///
    /// Blocks for the configured acquisition time, never longer.
    pub fn sample(&mut self) -> u16 {
        if self.latency_ms > 0 {
            self.delay.delay_ms(self.latency_ms);
        }
        self.value = self.value.wrapping_add(1);
        self.value
    }

    /// Set the counter back to zero
    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Current value without sampling
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }
}
