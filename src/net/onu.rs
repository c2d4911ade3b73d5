//! ONU（光网络单元）

use super::id::SplitterId;
use crate::error::{Result, ensure_non_negative};

pub const DEFAULT_ONU_TX_POWER_DBM: f64 = 1.5;
pub const DEFAULT_ONU_RX_SENSITIVITY_DBM: f64 = -24.0;
/// 协议开销系数：请求带宽 = 业务速率 × 1.2
pub const PROTOCOL_OVERHEAD: f64 = 1.2;

/// 用户侧光网络单元
#[derive(Debug, Clone, PartialEq)]
pub struct Onu {
    pub id: String,
    pub name: String,
    pub tx_power_dbm: f64,
    pub rx_sensitivity_dbm: f64,
    traffic_rate_mbps: f64,
    requested_bandwidth_mbps: f64,
    pub(crate) splitter: Option<SplitterId>,
}

impl Onu {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tx_power_dbm: DEFAULT_ONU_TX_POWER_DBM,
            rx_sensitivity_dbm: DEFAULT_ONU_RX_SENSITIVITY_DBM,
            traffic_rate_mbps: 0.0,
            requested_bandwidth_mbps: 0.0,
            splitter: None,
        }
    }

    pub fn traffic_rate(&self) -> f64 {
        self.traffic_rate_mbps
    }

    pub fn requested_bandwidth(&self) -> f64 {
        self.requested_bandwidth_mbps
    }

    /// 设置业务速率，同时按 20% 开销更新请求带宽
    pub fn set_traffic_rate(&mut self, rate_mbps: f64) -> Result<()> {
        let rate = ensure_non_negative("traffic_rate", rate_mbps)?;
        self.traffic_rate_mbps = rate;
        self.requested_bandwidth_mbps = rate * PROTOCOL_OVERHEAD;
        Ok(())
    }

    /// 所属分光器（未连接时为 None）
    pub fn splitter(&self) -> Option<SplitterId> {
        self.splitter
    }
}
