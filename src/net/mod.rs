//! 网络元素模型
//!
//! OLT、ONU、分光器、光纤段，以及以 arena 方式持有它们的 `Network`。

// 子模块声明
mod fiber;
mod id;
mod network;
mod olt;
mod onu;
mod record;
mod splitter;

// 重新导出公共接口
pub use fiber::{
    DEFAULT_ATTENUATION_DB_PER_KM, DEFAULT_DISPERSION, Fiber, SPLICE_INTERVAL_KM, SPLICE_LOSS_DB,
    splice_loss_for,
};
pub use id::{ElementKind, ElementRef, FiberId, OltId, OnuId, SplitterId};
pub use network::{DEFAULT_NETWORK_NAME, Network};
pub use olt::{DEFAULT_OLT_RX_SENSITIVITY_DBM, DEFAULT_OLT_TX_POWER_DBM, GPON_CAPACITY_MBPS, Olt};
pub use onu::{DEFAULT_ONU_RX_SENSITIVITY_DBM, DEFAULT_ONU_TX_POWER_DBM, Onu, PROTOCOL_OVERHEAD};
pub use record::{EndpointRecord, FiberRecord, NetworkRecord, OltRecord, OnuRecord, SplitterRecord};
pub use splitter::{FALLBACK_SPLIT_LOSS_DB, Splitter, parse_fan_out, split_loss_for};
