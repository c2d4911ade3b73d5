//! OLT -> ONU 路径查找
//!
//! 沿光纤方向在图上做 BFS，得到跳数最少的一条简单路径。

use std::collections::{HashMap, VecDeque};

use crate::net::{ElementRef, FiberId, Network, OnuId, SplitterId};
use tracing::trace;

/// 一条 OLT -> ONU 的光路
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpticalPath {
    /// 按顺序经过的光纤段
    pub fibers: Vec<FiberId>,
    /// 按顺序经过的分光器
    pub splitters: Vec<SplitterId>,
}

impl OpticalPath {
    /// 路径总长度（km）
    pub fn length_km(&self, net: &Network) -> f64 {
        self.fibers.iter().map(|&f| net.fiber(f).length_km).sum()
    }
}

/// 查找从 OLT 到 `onu` 的路径；网络没有 OLT 或 ONU 不可达时返回 None
pub fn find_path(net: &Network, onu: OnuId) -> Option<OpticalPath> {
    let start = ElementRef::Olt(net.olt_id()?);
    let target = ElementRef::Onu(onu);

    // 到达每个元素时使用的光纤段
    let mut via: HashMap<ElementRef, FiberId> = HashMap::new();
    let mut q: VecDeque<ElementRef> = VecDeque::new();
    q.push_back(start);

    'bfs: while let Some(v) = q.pop_front() {
        for &fid in net.outgoing(v) {
            let next = net.fiber(fid).to;
            if next == start || via.contains_key(&next) {
                continue;
            }
            via.insert(next, fid);
            if next == target {
                break 'bfs;
            }
            q.push_back(next);
        }
    }

    let mut fibers = Vec::new();
    let mut cur = target;
    while cur != start {
        let fid = *via.get(&cur)?;
        fibers.push(fid);
        cur = net.fiber(fid).from;
    }
    fibers.reverse();

    let splitters = fibers
        .iter()
        .filter_map(|&f| match net.fiber(f).to {
            ElementRef::Splitter(s) => Some(s),
            _ => None,
        })
        .collect::<Vec<_>>();

    trace!(onu = net.label_of(target), hops = fibers.len(), "找到光路");
    Some(OpticalPath { fibers, splitters })
}
