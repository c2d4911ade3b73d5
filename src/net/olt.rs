//! OLT（光线路终端）

use super::id::SplitterId;

/// OLT 默认发射功率（dBm）
pub const DEFAULT_OLT_TX_POWER_DBM: f64 = 2.5;
/// OLT 默认接收灵敏度（dBm）
pub const DEFAULT_OLT_RX_SENSITIVITY_DBM: f64 = -27.0;
/// GPON 标准上/下行总容量（Mbps）
pub const GPON_CAPACITY_MBPS: f64 = 2500.0;

/// 局端光线路终端
#[derive(Debug, Clone, PartialEq)]
pub struct Olt {
    pub id: String,
    pub name: String,
    pub tx_power_dbm: f64,
    pub rx_sensitivity_dbm: f64,
    pub total_capacity_mbps: f64,
    pub(crate) splitters: Vec<SplitterId>,
}

impl Olt {
    /// 使用默认光学参数创建 OLT
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_power(id, name, DEFAULT_OLT_TX_POWER_DBM, DEFAULT_OLT_RX_SENSITIVITY_DBM)
    }

    pub fn with_power(
        id: impl Into<String>,
        name: impl Into<String>,
        tx_power_dbm: f64,
        rx_sensitivity_dbm: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tx_power_dbm,
            rx_sensitivity_dbm,
            total_capacity_mbps: GPON_CAPACITY_MBPS,
            splitters: Vec::new(),
        }
    }

    /// 功率预算 = 发射功率 - 接收灵敏度
    pub fn power_budget(&self) -> f64 {
        self.tx_power_dbm - self.rx_sensitivity_dbm
    }

    /// 已连接的分光器（按连接顺序）
    pub fn splitters(&self) -> &[SplitterId] {
        &self.splitters
    }
}
