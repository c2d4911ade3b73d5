//! 带宽分配策略：按标识顺序授予与均分

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_non_negative};
use crate::net::{GPON_CAPACITY_MBPS, Network};
use tracing::{debug, trace};

/// ONU 标识 -> 请求带宽（Mbps）。BTreeMap 的迭代顺序即升序轮询顺序。
pub type Requests = BTreeMap<String, f64>;

/// 单个 ONU 的分配结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub requested: f64,
    pub granted: f64,
    /// granted / requested × 100；请求为 0 时为 0
    pub utilization: f64,
}

impl Allocation {
    fn new(requested: f64, granted: f64) -> Self {
        let utilization = if requested > 0.0 {
            granted / requested * 100.0
        } else {
            0.0
        };
        Self {
            requested,
            granted,
            utilization,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub allocations: BTreeMap<String, Allocation>,
    pub total_requested: f64,
    pub total_granted: f64,
    pub total_capacity: f64,
    pub remaining_capacity: f64,
    pub global_utilization: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairAllocationResult {
    pub allocations: BTreeMap<String, Allocation>,
    pub total_capacity: f64,
    pub fair_share: f64,
}

impl FairAllocationResult {
    /// 没有任何请求者
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}

fn validate(requests: &Requests, capacity: f64) -> Result<f64> {
    for &requested in requests.values() {
        ensure_non_negative("requested", requested)?;
    }
    ensure_non_negative("total_capacity", capacity)
}

/// 按标识升序依次授予 `min(请求, 剩余容量)`，容量耗尽后其余授予 0
pub fn allocate(requests: &Requests, total_capacity: f64) -> Result<AllocationResult> {
    let capacity = validate(requests, total_capacity)?;

    let mut remaining = capacity;
    let mut allocations = BTreeMap::new();
    for (onu, &requested) in requests {
        let granted = requested.min(remaining);
        remaining -= granted;
        trace!(onu = %onu, requested, granted, remaining, "授予带宽");
        allocations.insert(onu.clone(), Allocation::new(requested, granted));
    }

    let total_requested: f64 = requests.values().sum();
    let total_granted: f64 = allocations.values().map(|a| a.granted).sum();
    let global_utilization = if capacity > 0.0 {
        total_granted / capacity * 100.0
    } else {
        0.0
    };

    debug!(
        onus = requests.len(),
        total_requested,
        total_granted,
        remaining,
        "📶 DBA 顺序分配完成"
    );

    Ok(AllocationResult {
        allocations,
        total_requested,
        total_granted,
        total_capacity: capacity,
        remaining_capacity: remaining,
        global_utilization,
    })
}

/// 均分容量：每个请求者授予 `min(请求, 容量 / 请求者数)`
pub fn fair_allocate(requests: &Requests, total_capacity: f64) -> Result<FairAllocationResult> {
    let capacity = validate(requests, total_capacity)?;

    if requests.is_empty() {
        return Ok(FairAllocationResult {
            allocations: BTreeMap::new(),
            total_capacity: capacity,
            fair_share: 0.0,
        });
    }

    let fair_share = capacity / requests.len() as f64;
    let allocations = requests
        .iter()
        .map(|(onu, &requested)| (onu.clone(), Allocation::new(requested, requested.min(fair_share))))
        .collect();

    debug!(onus = requests.len(), fair_share, "📶 DBA 均分完成");

    Ok(FairAllocationResult {
        allocations,
        total_capacity: capacity,
        fair_share,
    })
}

/// 以网络中各 ONU 当前的请求带宽构造请求表
pub fn requests_from_network(net: &Network) -> Requests {
    net.onus()
        .iter()
        .map(|o| (o.id.clone(), o.requested_bandwidth()))
        .collect()
}

/// 带默认总容量的分配器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicBandwidthAllocation {
    pub total_capacity: f64,
}

impl Default for DynamicBandwidthAllocation {
    fn default() -> Self {
        Self {
            total_capacity: GPON_CAPACITY_MBPS,
        }
    }
}

impl DynamicBandwidthAllocation {
    pub fn new(total_capacity: f64) -> Self {
        Self { total_capacity }
    }

    /// `capacity` 为 None 时使用分配器自身的总容量
    pub fn allocate(&self, requests: &Requests, capacity: Option<f64>) -> Result<AllocationResult> {
        allocate(requests, capacity.unwrap_or(self.total_capacity))
    }

    pub fn fair_allocate(
        &self,
        requests: &Requests,
        capacity: Option<f64>,
    ) -> Result<FairAllocationResult> {
        fair_allocate(requests, capacity.unwrap_or(self.total_capacity))
    }
}
