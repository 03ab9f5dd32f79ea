//! Hosted node against a simulated MAC engine
//!
//! Joins over OTAA, sends the counter every 30 simulated seconds and receives
//! a reset command with the third transmit cycle. Run with
//! `RUST_LOG=debug` for the router's debug output.

use std::collections::VecDeque;
use std::time::Duration;

use embedded_hal::blocking::delay::DelayMs;
use lorawan_node::{
    config::{AESKey, DevAddr, DeviceConfig, NodeConfig, SessionState},
    device::LoRaWANNode,
    indicator::NoPin,
    mac::{MacEngine, MacEvent, TxCompleteInfo, TxError},
    status::LogReporter,
};

const JOIN_DURATION: Duration = Duration::from_secs(6);
const TX_RX_DURATION: Duration = Duration::from_secs(2);
const RESET_ON_CYCLE: u32 = 3;
const SIMULATION_END: Duration = Duration::from_secs(200);

/// MAC engine completing every request after a fixed time
struct SimulatedMac {
    now: Duration,
    session: SessionState,
    tx_pending: bool,
    scheduled: VecDeque<(Duration, MacEvent)>,
    ready: VecDeque<MacEvent>,
    cycles: u32,
}

impl SimulatedMac {
    fn new() -> Self {
        Self {
            now: Duration::ZERO,
            session: SessionState::default(),
            tx_pending: false,
            scheduled: VecDeque::new(),
            ready: VecDeque::new(),
            cycles: 0,
        }
    }

    /// Move simulated time forward and release due events
    fn advance(&mut self, now: Duration) {
        self.now = now;
        while let Some((at, _)) = self.scheduled.front() {
            if *at > now {
                break;
            }
            if let Some((_, event)) = self.scheduled.pop_front() {
                self.apply(&event);
                self.ready.push_back(event);
            }
        }
    }

    fn apply(&mut self, event: &MacEvent) {
        match event {
            MacEvent::Joined => {
                self.session = SessionState {
                    net_id: 0x13,
                    dev_addr: 0x260B_1A2F,
                    nwk_skey: [0x5A; 16],
                    app_skey: [0xA5; 16],
                    ..self.session
                };
            }
            MacEvent::TxComplete(info) => {
                self.tx_pending = false;
                self.session.seqno_up += 1;
                if info.has_downlink() {
                    self.session.seqno_dn += 1;
                }
            }
            _ => {}
        }
    }

    fn schedule(&mut self, after: Duration, event: MacEvent) {
        self.scheduled.push_back((self.now + after, event));
    }
}

impl MacEngine for SimulatedMac {
    fn submit_uplink(&mut self, _port: u8, _payload: &[u8], _confirmed: bool) -> Result<(), TxError> {
        if self.tx_pending {
            return Err(TxError::Busy);
        }
        self.tx_pending = true;
        self.cycles += 1;

        let mut info = TxCompleteInfo {
            rssi: -45,
            snr: 28,
            ..TxCompleteInfo::default()
        };
        if self.cycles == RESET_ON_CYCLE {
            info.data_offset = 9;
            info.port = Some(100);
            let _ = info.payload.push(0xC0);
        }

        self.schedule(Duration::ZERO, MacEvent::TxStart);
        self.schedule(TX_RX_DURATION, MacEvent::TxComplete(info));
        Ok(())
    }

    fn is_tx_pending(&self) -> bool {
        self.tx_pending
    }

    fn session(&self) -> SessionState {
        self.session
    }

    fn next_event(&mut self) -> Option<MacEvent> {
        self.ready.pop_front()
    }

    fn start_joining(&mut self) {
        self.schedule(Duration::ZERO, MacEvent::Joining);
        self.schedule(Duration::ZERO, MacEvent::TxStart);
        self.schedule(JOIN_DURATION, MacEvent::Joined);
    }

    fn set_session(&mut self, net_id: u32, dev_addr: DevAddr, nwk_skey: &AESKey, app_skey: &AESKey) {
        self.session.net_id = net_id;
        self.session.dev_addr = dev_addr;
        self.session.nwk_skey = *nwk_skey;
        self.session.app_skey = *app_skey;
    }

    fn set_link_check_mode(&mut self, _enabled: bool) {}

    fn set_adr_mode(&mut self, _enabled: bool) {}

    fn select_sub_band(&mut self, _sub_band: u8) {}
}

/// Sensor latency as a real sleep
struct StdDelay;

impl DelayMs<u16> for StdDelay {
    fn delay_ms(&mut self, ms: u16) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let device = DeviceConfig::new_otaa(
        [0x70, 0xB3, 0xD5, 0x7E, 0xD0, 0x00, 0x00, 0x01],
        [0x00; 8],
        [0x2B; 16],
    );
    let config = NodeConfig::new(device)
        .with_device_id("simulated-node")
        .with_work_interval(30);

    let mut node: LoRaWANNode<_, _, NoPin, _> =
        match LoRaWANNode::new(config, SimulatedMac::new(), StdDelay, None, LogReporter::new()) {
            Ok(node) => node,
            Err(error) => {
                log::error!("invalid configuration: {:?}", error);
                return;
            }
        };

    node.start(Duration::ZERO);

    let mut now = Duration::ZERO;
    while now <= SIMULATION_END {
        node.mac_mut().advance(now);
        node.run_once(now);
        now += Duration::from_secs(1);
    }

    let session = node.mac().session();
    log::info!(
        "simulation finished: counter {}, {} uplinks, {} downlinks",
        node.counter(),
        session.seqno_up,
        session.seqno_dn
    );
}
