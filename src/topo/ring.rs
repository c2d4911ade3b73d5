//! 环型拓扑构建
//!
//! OLT --2km--> SPLIT-RING-0（主分光器），之后每个用户一个 1:2 分光器，
//! 依次相连成环，最后一个分光器再连回主分光器闭合。

use crate::error::Result;
use crate::net::{Network, Onu, Splitter};

pub const RING_RATIO: &str = "1:2";
pub const FEEDER_KM: f64 = 2.0;
/// 环半径（km），平均分到每段环上
pub const RING_RADIUS_KM: f64 = 5.0;
pub const DROP_KM: f64 = 0.5;

pub fn build_ring(net: &mut Network, subscribers: usize, _split_ratio: &str) -> Result<()> {
    let olt = net.olt_id().ok_or_else(|| crate::Error::UnknownElement("OLT".into()))?;

    let main = net.add_splitter(Splitter::new("SPLIT-RING-0", "Ring Main Splitter", RING_RATIO));
    net.connect_olt_splitter(main)?;
    net.connect("FIBER-OLT-RING", "OLT to Ring", FEEDER_KM, olt, main)?;

    if subscribers == 0 {
        return Ok(());
    }
    let segment_km = RING_RADIUS_KM / subscribers as f64;

    let mut prev = main;
    for i in 0..subscribers {
        let n = i + 1;
        let onu = net.add_onu(Onu::new(format!("ONU-{n}"), format!("ONU {n}")));
        let splitter = net.add_splitter(Splitter::new(
            format!("SPLIT-RING-{n}"),
            format!("Ring Splitter {n}"),
            RING_RATIO,
        ));

        net.connect(
            format!("FIBER-RING-{i}"),
            format!("Ring Segment {i}"),
            segment_km,
            prev,
            splitter,
        )?;
        if n == subscribers {
            net.connect("FIBER-RING-CLOSE", "Ring Closure", segment_km, splitter, main)?;
        }

        net.connect_onu_splitter(onu, splitter)?;
        net.connect(
            format!("FIBER-RING-ONU-{n}"),
            format!("Ring Splitter to ONU {n}"),
            DROP_KM,
            splitter,
            onu,
        )?;
        prev = splitter;
    }
    Ok(())
}
