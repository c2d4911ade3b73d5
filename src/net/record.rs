//! 网络的记录形式（可序列化）
//!
//! 每条记录只包含元素自身的属性、派生损耗以及一个 `type` 标签；
//! 元素之间的引用一律以对外标识（label）表示。

use serde::{Deserialize, Serialize};

use super::fiber::Fiber;
use super::id::{ElementKind, ElementRef};
use super::network::Network;
use super::olt::Olt;
use super::onu::Onu;
use super::splitter::Splitter;
use crate::error::{Error, Result};
use crate::topo::TopologyShape;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OltRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub tx_power: f64,
    pub rx_sensitivity: f64,
    pub total_capacity: f64,
    #[serde(default)]
    pub connected_splitters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnuRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub tx_power: f64,
    pub rx_sensitivity: f64,
    pub traffic_rate: f64,
    pub requested_bandwidth: f64,
    #[serde(default)]
    pub splitter_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitterRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub ratio: String,
    pub split_loss: f64,
    #[serde(default)]
    pub olt_id: Option<String>,
    #[serde(default)]
    pub connected_onus: Vec<String>,
}

/// 光纤端点（label 只在同类元素内唯一，所以带上类型）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub length: f64,
    pub attenuation: f64,
    pub dispersion: f64,
    pub loss: f64,
    pub total_loss: f64,
    pub from_element: EndpointRecord,
    pub to_element: EndpointRecord,
}

/// 整个网络的记录形式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub name: String,
    #[serde(alias = "topology_type")]
    pub shape: TopologyShape,
    #[serde(default)]
    pub olt: Option<OltRecord>,
    #[serde(default)]
    pub splitters: Vec<SplitterRecord>,
    #[serde(default)]
    pub onus: Vec<OnuRecord>,
    #[serde(default)]
    pub fibers: Vec<FiberRecord>,
}

impl Network {
    fn endpoint_record(&self, elem: ElementRef) -> EndpointRecord {
        EndpointRecord {
            kind: elem.kind(),
            id: self.label_of(elem).to_string(),
        }
    }

    fn olt_record(&self, olt: &Olt) -> OltRecord {
        OltRecord {
            id: olt.id.clone(),
            name: olt.name.clone(),
            kind: ElementKind::Olt,
            tx_power: olt.tx_power_dbm,
            rx_sensitivity: olt.rx_sensitivity_dbm,
            total_capacity: olt.total_capacity_mbps,
            connected_splitters: olt
                .splitters()
                .iter()
                .map(|&s| self.splitter(s).id.clone())
                .collect(),
        }
    }

    fn splitter_record(&self, s: &Splitter) -> SplitterRecord {
        SplitterRecord {
            id: s.id.clone(),
            name: s.name.clone(),
            kind: ElementKind::Splitter,
            ratio: s.ratio().to_string(),
            split_loss: s.split_loss(),
            olt_id: s.olt().and_then(|_| self.olt()).map(|o| o.id.clone()),
            connected_onus: s.onus().iter().map(|&o| self.onu(o).id.clone()).collect(),
        }
    }

    fn onu_record(&self, onu: &Onu) -> OnuRecord {
        OnuRecord {
            id: onu.id.clone(),
            name: onu.name.clone(),
            kind: ElementKind::Onu,
            tx_power: onu.tx_power_dbm,
            rx_sensitivity: onu.rx_sensitivity_dbm,
            traffic_rate: onu.traffic_rate(),
            requested_bandwidth: onu.requested_bandwidth(),
            splitter_id: onu.splitter().map(|s| self.splitter(s).id.clone()),
        }
    }

    fn fiber_record(&self, f: &Fiber) -> FiberRecord {
        FiberRecord {
            id: f.id.clone(),
            name: f.name.clone(),
            kind: ElementKind::Fiber,
            length: f.length_km,
            attenuation: f.attenuation_db_per_km,
            dispersion: f.dispersion,
            loss: f.loss(),
            total_loss: f.total_loss(),
            from_element: self.endpoint_record(f.from),
            to_element: self.endpoint_record(f.to),
        }
    }

    /// 转换为记录形式
    pub fn to_record(&self) -> NetworkRecord {
        NetworkRecord {
            name: self.name.clone(),
            shape: self.shape,
            olt: self.olt().map(|o| self.olt_record(o)),
            splitters: self.splitters().iter().map(|s| self.splitter_record(s)).collect(),
            onus: self.onus().iter().map(|o| self.onu_record(o)).collect(),
            fibers: self.fibers().iter().map(|f| self.fiber_record(f)).collect(),
        }
    }

    fn resolve(&self, kind: ElementKind, label: &str) -> Result<ElementRef> {
        let found = match kind {
            ElementKind::Olt => self
                .olt_id()
                .filter(|_| self.olt().is_some_and(|o| o.id == label))
                .map(ElementRef::Olt),
            ElementKind::Splitter => self.splitter_by_label(label).map(ElementRef::Splitter),
            ElementKind::Onu => self.onu_by_label(label).map(ElementRef::Onu),
            ElementKind::Fiber => self.fiber_by_label(label).map(ElementRef::Fiber),
        };
        found.ok_or_else(|| Error::UnknownElement(format!("{kind:?} {label}")))
    }

    /// 从记录形式重建网络。派生值（分光损耗、请求带宽）会重新计算。
    pub fn from_record(record: &NetworkRecord) -> Result<Network> {
        let mut net = Network::new(record.name.clone());
        net.shape = record.shape;

        if let Some(o) = &record.olt {
            let mut olt = Olt::with_power(o.id.clone(), o.name.clone(), o.tx_power, o.rx_sensitivity);
            olt.total_capacity_mbps = o.total_capacity;
            net.set_olt(olt);
        }
        for s in &record.splitters {
            net.add_splitter(Splitter::new(s.id.clone(), s.name.clone(), s.ratio.clone()));
        }
        for o in &record.onus {
            let mut onu = Onu::new(o.id.clone(), o.name.clone());
            onu.tx_power_dbm = o.tx_power;
            onu.rx_sensitivity_dbm = o.rx_sensitivity;
            onu.set_traffic_rate(o.traffic_rate)?;
            net.add_onu(onu);
        }

        // 先按 OLT 记录的顺序挂接；关系只在一侧声明时补全，两侧矛盾时拒绝
        if let Some(o) = &record.olt {
            for label in &o.connected_splitters {
                let s = net
                    .splitter_by_label(label)
                    .ok_or_else(|| Error::UnknownElement(label.clone()))?;
                net.connect_olt_splitter(s)?;
            }
        }
        for s in &record.splitters {
            let sid = net
                .splitter_by_label(&s.id)
                .ok_or_else(|| Error::UnknownElement(s.id.clone()))?;
            if s.olt_id.is_some() {
                net.connect_olt_splitter(sid)?;
            }
            for label in &s.connected_onus {
                let onu = net
                    .onu_by_label(label)
                    .ok_or_else(|| Error::UnknownElement(label.clone()))?;
                net.connect_onu_splitter(onu, sid)?;
            }
        }
        for o in &record.onus {
            let Some(label) = &o.splitter_id else { continue };
            let onu = net
                .onu_by_label(&o.id)
                .ok_or_else(|| Error::UnknownElement(o.id.clone()))?;
            let sid = net
                .splitter_by_label(label)
                .ok_or_else(|| Error::UnknownElement(label.clone()))?;
            // 与分光器一侧声明的所属关系冲突时报错
            net.connect_onu_splitter(onu, sid)?;
        }

        for f in &record.fibers {
            let from = net.resolve(f.from_element.kind, &f.from_element.id)?;
            let to = net.resolve(f.to_element.kind, &f.to_element.id)?;
            let mut fiber =
                Fiber::with_attenuation(f.id.clone(), f.name.clone(), f.length, f.attenuation, from, to)?;
            fiber.dispersion = f.dispersion;
            net.add_fiber(fiber)?;
        }

        debug!(
            name = %net.name,
            splitters = net.splitters().len(),
            onus = net.onus().len(),
            fibers = net.fibers().len(),
            "从记录重建网络"
        );
        Ok(net)
    }
}
