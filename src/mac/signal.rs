use core::fmt;

/// Offset the engine applies to the radio's packet RSSI
const RSSI_OFFSET: i16 = 64;
/// Highest frequency of the SX1276 low frequency band (datasheet 6.3)
const SX1276_FREQ_LF_MAX: u32 = 525_000_000;
const SX1272_RSSI_ADJUST: i16 = -139;
const SX1276_RSSI_ADJUST_LF: i16 = -164;
const SX1276_RSSI_ADJUST_HF: i16 = -157;

/// How the engine reports raw RSSI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RssiModel {
    /// Engine already corrected the value, only the offset remains
    Offset,
    /// Raw packet RSSI from an SX1276 received at the given frequency
    Sx1276 {
        /// Receive frequency in Hz
        frequency: u32,
    },
    /// Raw packet RSSI from an SX1272
    Sx1272,
}

/// Signal quality of a received downlink
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalQuality {
    /// RSSI in dBm
    pub rssi: i16,
    /// SNR in tenths of a dB
    pub snr_tenfold: i16,
}

impl SignalQuality {
    /// Convert raw radio values
    pub fn from_raw(raw_rssi: i16, raw_snr: i8, model: RssiModel) -> Self {
        let snr_tenfold = snr_tenfold(raw_snr);
        Self {
            rssi: rssi_dbm(raw_rssi, (snr_tenfold / 10) as i8, model),
            snr_tenfold,
        }
    }

    /// Whole dB part of the SNR
    pub fn snr_db(&self) -> i16 {
        self.snr_tenfold / 10
    }

    /// First decimal of the SNR, signed like the whole part
    pub fn snr_decimal(&self) -> i16 {
        self.snr_tenfold % 10
    }

    /// SNR for display with one decimal
    pub fn snr(&self) -> Tenths {
        Tenths(self.snr_tenfold)
    }
}

/// Signed value in tenths, shown as `-0.5`, `7.5`, ...
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tenths(pub i16);

impl Tenths {
    fn parts(&self) -> (&'static str, u16, u16) {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        (sign, magnitude / 10, magnitude % 10)
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, whole, decimal) = self.parts();
        write!(f, "{}{}.{}", sign, whole, decimal)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Tenths {
    fn format(&self, f: defmt::Formatter<'_>) {
        let (sign, whole, decimal) = self.parts();
        defmt::write!(f, "{=str}{=u16}.{=u16}", sign, whole, decimal)
    }
}

/// SNR in tenths of a dB from the radio's quarter dB packet SNR
pub fn snr_tenfold(raw_snr: i8) -> i16 {
    (raw_snr as i16 * 10) / 4
}

/// RSSI in dBm (SX1276/SX1272 datasheets, 5.5.5)
pub fn rssi_dbm(raw_rssi: i16, snr_db: i8, model: RssiModel) -> i16 {
    let adjust = match model {
        RssiModel::Offset => return raw_rssi - RSSI_OFFSET,
        RssiModel::Sx1276 { frequency } if frequency > SX1276_FREQ_LF_MAX => SX1276_RSSI_ADJUST_HF,
        RssiModel::Sx1276 { .. } => SX1276_RSSI_ADJUST_LF,
        RssiModel::Sx1272 => SX1272_RSSI_ADJUST,
    };

    // Undo the engine's correction to get back the packet RSSI
    let packet_rssi = raw_rssi + 125 - RSSI_OFFSET;
    if snr_db < 0 {
        adjust + packet_rssi + snr_db as i16
    } else {
        adjust + (16 * packet_rssi) / 15
    }
}
