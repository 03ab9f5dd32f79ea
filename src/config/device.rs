use super::{AESKey, ActivationMode, DevAddr, EUI64};

/// Device credentials for either OTAA or ABP activation
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    /// Device EUI (unique device identifier)
    pub dev_eui: EUI64,
    /// Application EUI
    pub app_eui: EUI64,
    /// Application key (used for OTAA)
    pub app_key: AESKey,
    /// Device address (ABP only, assigned by the join for OTAA)
    pub dev_addr: Option<DevAddr>,
    /// Network session key (ABP only, derived by the join for OTAA)
    pub nwk_skey: Option<AESKey>,
    /// Application session key (ABP only, derived by the join for OTAA)
    pub app_skey: Option<AESKey>,
}

/// Session as reported by the MAC engine, used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionState {
    /// Network identifier
    pub net_id: u32,
    /// Device address, zero while no session is established
    pub dev_addr: DevAddr,
    /// Network session key
    pub nwk_skey: AESKey,
    /// Application session key
    pub app_skey: AESKey,
    /// Uplink frame counter
    pub seqno_up: u32,
    /// Downlink frame counter
    pub seqno_dn: u32,
}

impl DeviceConfig {
    /// Create a new OTAA device configuration
    pub fn new_otaa(dev_eui: EUI64, app_eui: EUI64, app_key: AESKey) -> Self {
        Self {
            dev_eui,
            app_eui,
            app_key,
            dev_addr: None,
            nwk_skey: None,
            app_skey: None,
        }
    }

    /// Create a new ABP device configuration
    pub fn new_abp(dev_addr: DevAddr, nwk_skey: AESKey, app_skey: AESKey) -> Self {
        Self {
            dev_eui: [0; 8],
            app_eui: [0; 8],
            app_key: [0; 16], // Not used in ABP
            dev_addr: Some(dev_addr),
            nwk_skey: Some(nwk_skey),
            app_skey: Some(app_skey),
        }
    }

    /// Activation mode implied by the credentials
    ///
    /// Any pre-provisioned session field selects ABP; `NodeConfig::validate`
    /// rejects a partial one.
    pub fn activation_mode(&self) -> ActivationMode {
        if self.dev_addr.is_some() || self.nwk_skey.is_some() || self.app_skey.is_some() {
            ActivationMode::Abp
        } else {
            ActivationMode::Otaa
        }
    }

    /// Static ABP session parameters, `None` unless all three are present
    pub fn abp_session(&self) -> Option<(DevAddr, AESKey, AESKey)> {
        match (self.dev_addr, self.nwk_skey, self.app_skey) {
            (Some(addr), Some(nwk), Some(app)) => Some((addr, nwk, app)),
            _ => None,
        }
    }
}

impl SessionState {
    /// Whether a session exists (joined, or provisioned through ABP)
    pub fn is_established(&self) -> bool {
        self.dev_addr != 0
    }
}
