//! Transmit indicator
//!
//! Shows whether a transmit cycle is running, on an optional LED and on the
//! display through the status reporter.

use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

use crate::status::StatusReporter;

/// Placeholder pin for boards without a transmit LED
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPin;

impl OutputPin for NoPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Transmit indicator state
pub struct TxIndicator<P: OutputPin> {
    /// LED, if the board has one
    led: Option<P>,
    /// Current state
    on: bool,
}

impl<P: OutputPin> TxIndicator<P> {
    /// Create an indicator driving the given LED
    pub fn new(led: Option<P>) -> Self {
        Self { led, on: false }
    }

    /// Switch the indicator
    pub fn set<S: StatusReporter>(&mut self, on: bool, reporter: &mut S) {
        self.on = on;
        if let Some(led) = &mut self.led {
            // Indicators are observational, a pin error changes nothing
            let _ = if on { led.set_high() } else { led.set_low() };
        }
        reporter.tx_symbol(on);
    }

    /// Check if the indicator is on
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// LED pin
    pub fn led(&self) -> Option<&P> {
        self.led.as_ref()
    }
}

impl TxIndicator<NoPin> {
    /// Indicator without an LED
    pub fn display_only() -> Self {
        Self::new(None)
    }
}
