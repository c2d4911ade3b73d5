//! 总线拓扑构建
//!
//! 每个用户一个 1:2 分接分光器，分接器之间串成一条总线：
//! OLT --1km--> TAP-1 --0.5km--> TAP-2 ... ，每个分接器 0.2 km 下行到各自的 ONU。

use crate::error::Result;
use crate::net::{Network, Onu, Splitter, SplitterId};

pub const TAP_RATIO: &str = "1:2";
pub const FEEDER_KM: f64 = 1.0;
pub const SEGMENT_KM: f64 = 0.5;
pub const DROP_KM: f64 = 0.2;

/// 构建总线拓扑（分光比参数不使用，分接器固定 1:2）
pub fn build_bus(net: &mut Network, subscribers: usize, _split_ratio: &str) -> Result<()> {
    let olt = net.olt_id().ok_or_else(|| crate::Error::UnknownElement("OLT".into()))?;

    let mut prev: Option<SplitterId> = None;
    for i in 0..subscribers {
        let n = i + 1;
        let onu = net.add_onu(Onu::new(format!("ONU-{n}"), format!("ONU {n}")));
        let tap = net.add_splitter(Splitter::new(
            format!("SPLIT-TAP-{n}"),
            format!("Tap Splitter {n}"),
            TAP_RATIO,
        ));

        match prev {
            None => {
                net.connect_olt_splitter(tap)?;
                net.connect("FIBER-BUS-OLT", "OLT to Bus", FEEDER_KM, olt, tap)?;
            }
            Some(p) => {
                net.connect(
                    format!("FIBER-BUS-{i}"),
                    format!("Bus Segment {i}"),
                    SEGMENT_KM,
                    p,
                    tap,
                )?;
            }
        }

        net.connect_onu_splitter(onu, tap)?;
        net.connect(
            format!("FIBER-{n}"),
            format!("Tap to ONU {n}"),
            DROP_KM,
            tap,
            onu,
        )?;
        prev = Some(tap);
    }
    Ok(())
}
