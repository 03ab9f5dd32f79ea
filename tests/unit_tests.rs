use lorawan_node::{
    config::{ActivationMode, ConfigError, DeviceConfig, NodeConfig, SessionState},
    downlink::{CommandTable, DownlinkCommand},
    indicator::TxIndicator,
    mac::signal::{rssi_dbm, snr_tenfold, RssiModel, SignalQuality},
    mac::{MacEngine, MacEvent, TxCompleteInfo, TxError},
    telemetry::TelemetrySource,
    uplink::{self, Rejected, UplinkMessage},
};

use mock::{MockDelay, MockMac, MockPin, RecordingReporter, Report};

fn otaa_device() -> DeviceConfig {
    DeviceConfig::new_otaa([0x01; 8], [0x02; 8], [0x03; 16])
}

#[test]
fn test_node_config_defaults() {
    let config = NodeConfig::new(otaa_device());

    assert_eq!(config.work_interval_secs, 300);
    assert_eq!(config.uplink_port, 10);
    assert_eq!(config.command_port, 100);
    assert_eq!(config.reset_opcode, 0xC0);
    assert!(!config.confirmed_uplinks);
    assert!(config.adr_enabled);
    assert_eq!(config.sub_band, None);
    assert_eq!(config.activation_mode(), ActivationMode::Otaa);
    assert!(config.validate().is_ok());
}

#[test]
fn test_node_config_validation() {
    let config = NodeConfig::new(otaa_device()).with_work_interval(0);
    assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));

    let config = NodeConfig::new(otaa_device()).with_uplink_port(0);
    assert_eq!(config.validate(), Err(ConfigError::InvalidUplinkPort(0)));

    let config = NodeConfig::new(otaa_device()).with_reset_command(224, 0xC0);
    assert_eq!(config.validate(), Err(ConfigError::InvalidCommandPort(224)));

    let mut device = DeviceConfig::new_abp(0x2601_0001, [0x01; 16], [0x02; 16]);
    device.app_skey = None;
    let config = NodeConfig::new(device);
    assert_eq!(config.activation_mode(), ActivationMode::Abp);
    assert_eq!(config.validate(), Err(ConfigError::MissingAbpSession));

    // Address zero is never a provisioned session
    let config = NodeConfig::new(DeviceConfig::new_abp(0, [0x01; 16], [0x02; 16]));
    assert_eq!(config.validate(), Err(ConfigError::MissingAbpSession));
}

#[test]
fn test_device_id_truncated() {
    let long_id = "a-very-long-device-identifier-that-does-not-fit";
    let config = NodeConfig::new(otaa_device()).with_device_id(long_id);

    assert_eq!(config.device_id.len(), 32);
    assert!(long_id.starts_with(config.device_id.as_str()));
}

#[test]
fn test_abp_device_config() {
    let device = DeviceConfig::new_abp(0x2601_0001, [0x01; 16], [0x02; 16]);

    assert_eq!(device.activation_mode(), ActivationMode::Abp);
    assert_eq!(
        device.abp_session(),
        Some((0x2601_0001, [0x01; 16], [0x02; 16]))
    );
    assert_eq!(otaa_device().abp_session(), None);
}

#[test]
fn test_session_established() {
    let mut session = SessionState::default();
    assert!(!session.is_established());

    session.dev_addr = 0x2601_0001;
    assert!(session.is_established());
}

#[test]
fn test_telemetry_sample_and_reset() {
    let mut source = TelemetrySource::new(MockDelay::default(), 50);

    assert_eq!(source.sample(), 1);
    assert_eq!(source.sample(), 2);
    assert_eq!(source.delay().total_ms, 100);

    source.reset();
    source.reset();
    source.reset();
    assert_eq!(source.value(), 0);
    assert_eq!(source.sample(), 1);
}

#[test]
fn test_telemetry_wraps() {
    let mut source = TelemetrySource::new(MockDelay::default(), 0);
    for _ in 0..u16::MAX {
        source.sample();
    }
    assert_eq!(source.value(), u16::MAX);
    assert_eq!(source.sample(), 0);
    assert_eq!(source.delay().calls, 0);
}

#[test]
fn test_reset_command_matching() {
    let table = CommandTable::new(100, 0xC0);

    assert_eq!(table.parse(100, &[0xC0]), DownlinkCommand::ResetCounter);
    assert_eq!(table.parse(100, &[0xC0, 0x00]), DownlinkCommand::Unrecognized);
    assert_eq!(table.parse(99, &[0xC0]), DownlinkCommand::Unrecognized);
    assert_eq!(table.parse(100, &[0x00]), DownlinkCommand::Unrecognized);
    assert_eq!(table.parse(100, &[]), DownlinkCommand::Unrecognized);
}

#[test]
fn test_tx_error_codes() {
    assert_eq!(TxError::from_code(0), None);
    assert_eq!(TxError::from_code(-1), Some(TxError::Busy));
    assert_eq!(TxError::from_code(-2), Some(TxError::TooLarge));
    assert_eq!(TxError::from_code(-3), Some(TxError::NotFeasible));
    assert_eq!(TxError::from_code(-4), Some(TxError::Failed));
    assert_eq!(TxError::from_code(-9), Some(TxError::Other(-9)));
    assert_eq!(TxError::TooLarge.code(), -2);
    assert_eq!(TxError::TooLarge.name(), "TX_TOO_LARGE");
}

#[test]
fn test_counter_payload_is_big_endian() {
    assert_eq!(uplink::encode_counter(1), [0x00, 0x01]);
    assert_eq!(uplink::encode_counter(0x1234), [0x12, 0x34]);
}

#[test]
fn test_try_submit_accepts_when_idle() {
    let mut mac = MockMac::joined(0x2601_0001);

    let accepted = uplink::try_submit(&mut mac, 10, &[0x00, 0x01], false).unwrap();

    assert_eq!(accepted.port, 10);
    assert_eq!(accepted.length, 2);
    assert!(!accepted.confirmed);
    assert_eq!(mac.submissions().len(), 1);
    assert_eq!(mac.submissions()[0].payload, vec![0x00, 0x01]);
}

#[test]
fn test_try_submit_rejects_when_busy() {
    let mut mac = MockMac::joined(0x2601_0001);
    mac.set_tx_pending(true);

    assert_eq!(
        uplink::try_submit(&mut mac, 10, &[0x00, 0x01], false),
        Err(Rejected::Busy)
    );
    assert!(mac.submissions().is_empty());
}

#[test]
fn test_try_submit_reports_mac_error() {
    let mut mac = MockMac::joined(0x2601_0001);
    mac.reject_with(Some(TxError::TooLarge));

    assert_eq!(
        uplink::try_submit(&mut mac, 10, &[0x00, 0x01], true),
        Err(Rejected::MacError(TxError::TooLarge))
    );
    assert!(!mac.is_tx_pending());
}

#[test]
fn test_oversized_uplink_not_built() {
    let mut mac = MockMac::joined(0x2601_0001);

    assert_eq!(
        UplinkMessage::new(10, &[0; 5], false),
        Err(Rejected::Oversized)
    );
    assert_eq!(
        uplink::try_submit(&mut mac, 10, &[0; 5], false),
        Err(Rejected::Oversized)
    );
    assert!(mac.submissions().is_empty());
}

#[test]
fn test_downlink_presence() {
    let mut info = TxCompleteInfo::default();
    assert!(!info.has_downlink());
    assert_eq!(info.port(), 0);

    // Empty frame with a port still counts as a downlink
    info.data_offset = 9;
    assert!(info.has_downlink());

    let info = mock::downlink(100, &[0xC0]);
    assert!(info.has_downlink());
    assert_eq!(info.port(), 100);
}

#[test]
fn test_event_names() {
    assert_eq!(MacEvent::Joined.name(), "EV_JOINED");
    assert_eq!(
        MacEvent::TxComplete(TxCompleteInfo::default()).name(),
        "EV_TXCOMPLETE"
    );
    assert_eq!(MacEvent::JoinTxComplete.name(), "EV_JOIN_TXCOMPLETE");
    assert_eq!(MacEvent::Unknown(42).name(), "Unknown Event");
}

#[test]
fn test_signal_conversion() {
    assert_eq!(snr_tenfold(30), 75);
    assert_eq!(snr_tenfold(-12), -30);

    assert_eq!(rssi_dbm(-40, 7, RssiModel::Offset), -104);
    assert_eq!(rssi_dbm(-40, 7, RssiModel::Sx1276 { frequency: 868_100_000 }), -135);
    assert_eq!(rssi_dbm(-40, 7, RssiModel::Sx1276 { frequency: 433_175_000 }), -142);
    assert_eq!(rssi_dbm(-40, -3, RssiModel::Sx1272), -121);

    let signal = SignalQuality::from_raw(-40, -12, RssiModel::Sx1272);
    assert_eq!(signal.rssi, -121);
    assert_eq!(signal.snr_db(), -3);
    assert_eq!(signal.snr_decimal(), 0);
}

#[test]
fn test_snr_display_keeps_sign() {
    let snr = |raw| SignalQuality::from_raw(-40, raw, RssiModel::Offset).snr().to_string();

    assert_eq!(snr(-2), "-0.5");
    assert_eq!(snr(-12), "-3.0");
    assert_eq!(snr(-13), "-3.2");
    assert_eq!(snr(0), "0.0");
    assert_eq!(snr(30), "7.5");
}

#[test]
fn test_indicator_drives_led_and_display() {
    let mut reporter = RecordingReporter::default();

    let mut indicator = TxIndicator::new(Some(MockPin::default()));
    indicator.set(true, &mut reporter);
    assert!(indicator.is_on());
    assert!(indicator.led().map(|pin| pin.high).unwrap_or(false));

    let mut display_only = TxIndicator::display_only();
    display_only.set(true, &mut reporter);
    display_only.set(false, &mut reporter);
    assert!(!display_only.is_on());
    assert!(display_only.led().is_none());

    assert_eq!(
        reporter.reports,
        vec![
            Report::TxSymbol(true),
            Report::TxSymbol(true),
            Report::TxSymbol(false)
        ]
    );
}
