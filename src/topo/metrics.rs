//! 拓扑指标：光纤总长、各 ONU 路径长度、传播时延与带宽均分

use serde::{Deserialize, Serialize};

use super::TopologyShape;
use crate::budget::find_path;
use crate::net::{GPON_CAPACITY_MBPS, Network};

/// 光在光纤中的传播速度（km/s）
pub const FIBER_LIGHT_SPEED_KM_PER_S: f64 = 200_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLength {
    pub onu_id: String,
    pub length_km: f64,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyMetrics {
    pub shape: TopologyShape,
    pub total_fiber_km: f64,
    pub avg_path_km: f64,
    pub max_path_km: f64,
    pub avg_latency_ms: f64,
    /// OLT 容量均分到每个 ONU（Mbps）
    pub fair_capacity_per_onu: f64,
    pub paths: Vec<PathLength>,
}

/// 单程传播时延（ms）
pub fn propagation_latency_ms(length_km: f64) -> f64 {
    length_km / FIBER_LIGHT_SPEED_KM_PER_S * 1000.0
}

/// 计算拓扑指标。不可达的 ONU 不计入路径统计。
pub fn topology_metrics(net: &Network) -> TopologyMetrics {
    let total_fiber_km = net.fibers().iter().map(|f| f.length_km).sum();

    let paths: Vec<PathLength> = net
        .onu_ids()
        .filter_map(|onu| {
            let length_km = find_path(net, onu)?.length_km(net);
            Some(PathLength {
                onu_id: net.onu(onu).id.clone(),
                length_km,
                latency_ms: propagation_latency_ms(length_km),
            })
        })
        .collect();

    let (avg_path_km, max_path_km) = if paths.is_empty() {
        (0.0, 0.0)
    } else {
        let sum: f64 = paths.iter().map(|p| p.length_km).sum();
        let max = paths.iter().map(|p| p.length_km).fold(0.0, f64::max);
        (sum / paths.len() as f64, max)
    };

    let capacity = net
        .olt()
        .map(|o| o.total_capacity_mbps)
        .unwrap_or(GPON_CAPACITY_MBPS);
    let fair_capacity_per_onu = if net.onus().is_empty() {
        0.0
    } else {
        capacity / net.onus().len() as f64
    };

    TopologyMetrics {
        shape: net.shape,
        total_fiber_km,
        avg_path_km,
        max_path_km,
        avg_latency_ms: propagation_latency_ms(avg_path_km),
        fair_capacity_per_onu,
        paths,
    }
}
