//! 树型拓扑构建
//!
//! 两级分光：OLT --2km--> SPLIT-ROOT --> SPLIT-INTER-k --> ONU。
//! 用户数不超过分光比扇出时退化为星型。

use super::star::build_star;
use crate::error::Result;
use crate::net::{Network, Onu, Splitter, parse_fan_out};
use tracing::debug;

/// 分光比无法解析时假定的扇出
pub const FALLBACK_FAN_OUT: usize = 32;
pub const FEEDER_KM: f64 = 2.0;
pub const BRANCH_BASE_KM: f64 = 2.0;
pub const BRANCH_STEP_KM: f64 = 0.3;
pub const DROP_BASE_KM: f64 = 1.5;
pub const DROP_STEP_KM: f64 = 0.2;

pub fn build_tree(net: &mut Network, subscribers: usize, split_ratio: &str) -> Result<()> {
    let fan_out = parse_fan_out(split_ratio)
        .map(|n| n as usize)
        .unwrap_or(FALLBACK_FAN_OUT);
    if subscribers <= fan_out {
        debug!(subscribers, fan_out, "用户数未超过扇出，退化为星型");
        return build_star(net, subscribers, split_ratio);
    }

    let olt = net.olt_id().ok_or_else(|| crate::Error::UnknownElement("OLT".into()))?;
    let root = net.add_splitter(Splitter::new("SPLIT-ROOT", "Root Splitter", split_ratio));
    net.connect_olt_splitter(root)?;
    net.connect("FIBER-ROOT", "OLT to Root Splitter", FEEDER_KM, olt, root)?;

    let branches = subscribers.div_ceil(fan_out);
    let mut intermediates = Vec::with_capacity(branches);
    for i in 0..branches {
        let n = i + 1;
        let s = net.add_splitter(Splitter::new(
            format!("SPLIT-INTER-{n}"),
            format!("Intermediate Splitter {n}"),
            split_ratio,
        ));
        net.connect(
            format!("FIBER-INTER-{n}"),
            format!("Root to Intermediate {n}"),
            BRANCH_BASE_KM + BRANCH_STEP_KM * i as f64,
            root,
            s,
        )?;
        intermediates.push(s);
    }

    let mut placed = 0usize;
    for (k, &inter) in intermediates.iter().enumerate() {
        for j in 0..fan_out {
            if placed >= subscribers {
                break;
            }
            placed += 1;
            let onu = net.add_onu(Onu::new(format!("ONU-{placed}"), format!("ONU {placed}")));
            net.connect_onu_splitter(onu, inter)?;
            net.connect(
                format!("FIBER-TREE-{placed}"),
                format!("Intermediate {} to ONU {placed}", k + 1),
                DROP_BASE_KM + DROP_STEP_KM * j as f64,
                inter,
                onu,
            )?;
        }
    }
    Ok(())
}
