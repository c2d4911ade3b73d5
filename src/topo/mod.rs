//! 拓扑构建
//!
//! 四种 FTTH 拓扑形状，每种形状一个构建函数；所有元素标识按形状确定性命名，
//! 相同参数重复构建得到相同的网络。

pub mod bus;
pub mod metrics;
pub mod ring;
pub mod star;
pub mod tree;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::net::{Network, Olt};

pub use metrics::{PathLength, TopologyMetrics, topology_metrics};

/// OLT 的固定标识
pub const OLT_ID: &str = "OLT-1";
pub const OLT_NAME: &str = "Main OLT";

/// 拓扑形状。
///
/// 无法识别的形状字符串一律回退为 `Star`（不是错误）；
/// 回退后的形状会写入 `Network::shape`，调用方据此发现回退。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum TopologyShape {
    #[default]
    Star,
    Bus,
    Ring,
    Tree,
}

type BuildFn = fn(&mut Network, usize, &str) -> Result<()>;

impl TopologyShape {
    pub const ALL: [TopologyShape; 4] = [
        TopologyShape::Star,
        TopologyShape::Bus,
        TopologyShape::Ring,
        TopologyShape::Tree,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TopologyShape::Star => "star",
            TopologyShape::Bus => "bus",
            TopologyShape::Ring => "ring",
            TopologyShape::Tree => "tree",
        }
    }

    /// 解析形状名（大小写不敏感），未知名称回退为 `Star`
    pub fn parse(s: &str) -> Self {
        let wanted = s.trim().to_ascii_lowercase();
        match Self::ALL.into_iter().find(|shape| shape.as_str() == wanted) {
            Some(shape) => shape,
            None => {
                warn!(shape = s, "⚠️  未知拓扑形状，回退为 star");
                TopologyShape::Star
            }
        }
    }

    fn builder(self) -> BuildFn {
        match self {
            TopologyShape::Star => star::build_star,
            TopologyShape::Bus => bus::build_bus,
            TopologyShape::Ring => ring::build_ring,
            TopologyShape::Tree => tree::build_tree,
        }
    }
}

impl fmt::Display for TopologyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopologyShape {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for TopologyShape {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TopologyShape> for &'static str {
    fn from(shape: TopologyShape) -> Self {
        shape.as_str()
    }
}

/// 拓扑构建参数
#[derive(Debug, Clone)]
pub struct TopologyOpts {
    pub name: String,
    pub shape: TopologyShape,
    pub subscribers: usize,
    pub split_ratio: String,
}

impl Default for TopologyOpts {
    fn default() -> Self {
        Self {
            name: crate::net::DEFAULT_NETWORK_NAME.to_string(),
            shape: TopologyShape::Star,
            subscribers: 32,
            split_ratio: "1:32".to_string(),
        }
    }
}

/// 按参数构建网络
#[tracing::instrument(skip(opts), fields(shape = %opts.shape, subscribers = opts.subscribers, split_ratio = %opts.split_ratio))]
pub fn build(opts: &TopologyOpts) -> Result<Network> {
    let mut net = Network::new(opts.name.clone());
    net.shape = opts.shape;
    net.set_olt(Olt::new(OLT_ID, OLT_NAME));

    (opts.shape.builder())(&mut net, opts.subscribers, &opts.split_ratio)?;

    info!(
        splitters = net.splitters().len(),
        onus = net.onus().len(),
        fibers = net.fibers().len(),
        "🏗️  拓扑构建完成"
    );
    Ok(net)
}

/// `build` 的便捷形式：形状名字符串 + 用户数 + 分光比
pub fn build_topology(shape: &str, subscribers: usize, split_ratio: &str) -> Result<Network> {
    build(&TopologyOpts {
        shape: TopologyShape::parse(shape),
        subscribers,
        split_ratio: split_ratio.to_string(),
        ..TopologyOpts::default()
    })
}
