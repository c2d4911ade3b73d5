//! 星型拓扑构建
//!
//! 结构：OLT --2km--> SPLIT-1 --(3.0 + 0.1·i) km--> ONU-(i+1)

use crate::error::Result;
use crate::net::{Network, Onu, Splitter};

pub const TRUNK_KM: f64 = 2.0;
pub const DROP_BASE_KM: f64 = 3.0;
pub const DROP_STEP_KM: f64 = 0.1;

/// 构建星型拓扑。网络中必须已设置 OLT。
pub fn build_star(net: &mut Network, subscribers: usize, split_ratio: &str) -> Result<()> {
    let olt = net.olt_id().ok_or_else(|| crate::Error::UnknownElement("OLT".into()))?;

    let splitter = net.add_splitter(Splitter::new(
        "SPLIT-1",
        format!("Splitter {split_ratio}"),
        split_ratio,
    ));
    net.connect_olt_splitter(splitter)?;
    net.connect("FIBER-OLT-SPLIT", "OLT to Splitter", TRUNK_KM, olt, splitter)?;

    for i in 0..subscribers {
        let n = i + 1;
        let onu = net.add_onu(Onu::new(format!("ONU-{n}"), format!("ONU {n}")));
        net.connect_onu_splitter(onu, splitter)?;
        net.connect(
            format!("FIBER-{n}"),
            format!("Splitter to ONU {n}"),
            DROP_BASE_KM + DROP_STEP_KM * i as f64,
            splitter,
            onu,
        )?;
    }
    Ok(())
}
