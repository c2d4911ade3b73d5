//! 网络拓扑管理
//!
//! `Network` 是聚合根：以 arena 的方式持有 OLT、分光器、ONU 与光纤段，
//! 元素间的关系只通过下标（`SplitterId` 等）表达。

use std::collections::HashMap;

use super::fiber::Fiber;
use super::id::{ElementRef, FiberId, OltId, OnuId, SplitterId};
use super::olt::Olt;
use super::onu::Onu;
use super::splitter::Splitter;
use crate::error::{Error, Result};
use crate::topo::TopologyShape;
use tracing::{debug, trace};

pub const DEFAULT_NETWORK_NAME: &str = "GPON Network";

/// GPON 网络
#[derive(Debug, Clone)]
pub struct Network {
    pub name: String,
    pub shape: TopologyShape,
    olt: Option<Olt>,
    splitters: Vec<Splitter>,
    onus: Vec<Onu>,
    fibers: Vec<Fiber>,
    /// 出边邻接：端点 -> 从该端点出发的光纤段（按添加顺序）
    out_edges: HashMap<ElementRef, Vec<FiberId>>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new(DEFAULT_NETWORK_NAME)
    }
}

impl Network {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: TopologyShape::default(),
            olt: None,
            splitters: Vec::new(),
            onus: Vec::new(),
            fibers: Vec::new(),
            out_edges: HashMap::new(),
        }
    }

    /// 设置（或替换）网络中唯一的 OLT。
    ///
    /// 替换时已挂接的分光器转到新 OLT 下，分光器一侧的上游引用保持不变。
    pub fn set_olt(&mut self, mut olt: Olt) -> OltId {
        if let Some(old) = self.olt.take() {
            for s in old.splitters {
                if !olt.splitters.contains(&s) {
                    olt.splitters.push(s);
                }
            }
            debug!(old = %old.id, new = %olt.id, splitters = olt.splitters.len(), "替换 OLT");
        } else {
            debug!(olt = %olt.id, "设置 OLT");
        }
        self.olt = Some(olt);
        OltId(0)
    }

    pub fn olt(&self) -> Option<&Olt> {
        self.olt.as_ref()
    }

    pub fn olt_id(&self) -> Option<OltId> {
        self.olt.as_ref().map(|_| OltId(0))
    }

    /// 添加分光器
    pub fn add_splitter(&mut self, splitter: Splitter) -> SplitterId {
        let id = SplitterId(self.splitters.len());
        trace!(splitter = %splitter.id, ratio = splitter.ratio(), "添加分光器");
        self.splitters.push(splitter);
        id
    }

    /// 添加 ONU
    pub fn add_onu(&mut self, onu: Onu) -> OnuId {
        let id = OnuId(self.onus.len());
        trace!(onu = %onu.id, "添加 ONU");
        self.onus.push(onu);
        id
    }

    /// 添加光纤段；两端必须是本网络中已存在的元素
    pub fn add_fiber(&mut self, fiber: Fiber) -> Result<FiberId> {
        for end in [fiber.from, fiber.to] {
            if !self.contains(end) {
                return Err(Error::UnknownElement(format!("{end:?}")));
            }
        }
        let id = FiberId(self.fibers.len());
        trace!(
            fiber = %fiber.id,
            from = self.label_of(fiber.from),
            to = self.label_of(fiber.to),
            length_km = fiber.length_km,
            "添加光纤段"
        );
        self.out_edges.entry(fiber.from).or_default().push(id);
        self.fibers.push(fiber);
        Ok(id)
    }

    /// 用默认衰减参数连接两个元素（创建单向光纤段）
    pub fn connect(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        length_km: f64,
        from: impl Into<ElementRef>,
        to: impl Into<ElementRef>,
    ) -> Result<FiberId> {
        let fiber = Fiber::new(id, name, length_km, from.into(), to.into())?;
        self.add_fiber(fiber)
    }

    /// 把分光器挂到 OLT 下（双向关系只在此处建立）
    pub fn connect_olt_splitter(&mut self, splitter: SplitterId) -> Result<()> {
        let olt = self
            .olt
            .as_mut()
            .ok_or_else(|| Error::UnknownElement("OLT".to_string()))?;
        let s = self
            .splitters
            .get_mut(splitter.0)
            .ok_or_else(|| Error::UnknownElement(format!("{splitter:?}")))?;
        if !olt.splitters.contains(&splitter) {
            olt.splitters.push(splitter);
        }
        s.olt = Some(OltId(0));
        Ok(())
    }

    /// 把 ONU 挂到分光器下。
    ///
    /// 每个 ONU 只有一个所属分光器：已挂在其他分光器下时返回错误，重复挂接同一分光器不做任何事。
    pub fn connect_onu_splitter(&mut self, onu: OnuId, splitter: SplitterId) -> Result<()> {
        if splitter.0 >= self.splitters.len() {
            return Err(Error::UnknownElement(format!("{splitter:?}")));
        }
        let o = self
            .onus
            .get_mut(onu.0)
            .ok_or_else(|| Error::UnknownElement(format!("{onu:?}")))?;
        if let Some(owner) = o.splitter.filter(|&owner| owner != splitter) {
            return Err(Error::invalid(
                "splitter",
                format!("{} already belongs to {}", o.id, self.splitters[owner.0].id),
            ));
        }
        o.splitter = Some(splitter);
        self.splitters[splitter.0].attach_onu(onu);
        Ok(())
    }

    pub fn splitter(&self, id: SplitterId) -> &Splitter {
        &self.splitters[id.0]
    }

    pub fn onu(&self, id: OnuId) -> &Onu {
        &self.onus[id.0]
    }

    pub fn onu_mut(&mut self, id: OnuId) -> &mut Onu {
        &mut self.onus[id.0]
    }

    pub fn fiber(&self, id: FiberId) -> &Fiber {
        &self.fibers[id.0]
    }

    pub fn splitters(&self) -> &[Splitter] {
        &self.splitters
    }

    pub fn onus(&self) -> &[Onu] {
        &self.onus
    }

    pub fn fibers(&self) -> &[Fiber] {
        &self.fibers
    }

    pub fn splitter_ids(&self) -> impl Iterator<Item = SplitterId> + '_ {
        (0..self.splitters.len()).map(SplitterId)
    }

    pub fn onu_ids(&self) -> impl Iterator<Item = OnuId> + '_ {
        (0..self.onus.len()).map(OnuId)
    }

    pub fn splitter_by_label(&self, label: &str) -> Option<SplitterId> {
        self.splitters.iter().position(|s| s.id == label).map(SplitterId)
    }

    pub fn onu_by_label(&self, label: &str) -> Option<OnuId> {
        self.onus.iter().position(|o| o.id == label).map(OnuId)
    }

    pub fn fiber_by_label(&self, label: &str) -> Option<FiberId> {
        self.fibers.iter().position(|f| f.id == label).map(FiberId)
    }

    /// 从某个元素出发的光纤段
    pub fn outgoing(&self, from: ElementRef) -> &[FiberId] {
        self.out_edges.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 元素是否属于本网络
    pub fn contains(&self, elem: ElementRef) -> bool {
        match elem {
            ElementRef::Olt(id) => id.0 == 0 && self.olt.is_some(),
            ElementRef::Splitter(id) => id.0 < self.splitters.len(),
            ElementRef::Onu(id) => id.0 < self.onus.len(),
            ElementRef::Fiber(id) => id.0 < self.fibers.len(),
        }
    }

    /// 元素的对外标识（如 `"SPLIT-1"`）
    pub fn label_of(&self, elem: ElementRef) -> &str {
        match elem {
            ElementRef::Olt(_) => self.olt.as_ref().map(|o| o.id.as_str()).unwrap_or("N/A"),
            ElementRef::Splitter(id) => &self.splitters[id.0].id,
            ElementRef::Onu(id) => &self.onus[id.0].id,
            ElementRef::Fiber(id) => &self.fibers[id.0].id,
        }
    }

    /// 设置某个 ONU 的业务速率
    pub fn set_traffic_rate(&mut self, onu: OnuId, rate_mbps: f64) -> Result<()> {
        self.onu_mut(onu).set_traffic_rate(rate_mbps)
    }
}
