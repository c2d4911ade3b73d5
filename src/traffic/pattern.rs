//! 流量模式：包长与包间隔的生成规则

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, Exp1};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 标准 MTU（字节）
pub const MTU_BYTES: u32 = 1500;
/// poisson 模式下包长的指数分布均值（字节）
pub const POISSON_MEAN_PACKET_BYTES: f64 = 1000.0;
/// bursty 模式下出现大包的概率
pub const BURST_LARGE_PROBABILITY: f64 = 0.3;
/// bursty 模式下出现短间隔（突发）的概率
pub const BURST_GAP_PROBABILITY: f64 = 0.2;
pub const BURST_GAP_SECS: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficPattern {
    /// 固定 1500 字节、固定间隔
    Constant,
    /// 指数分布包长与指数分布间隔
    Poisson,
    /// 大小包混合，偶发 1 ms 突发间隔
    Bursty,
}

/// 以 `rate_mbps` 发送 `packet_bytes` 字节所需的时间（秒）
pub fn mean_interval_secs(packet_bytes: u32, rate_mbps: f64) -> f64 {
    8.0 * f64::from(packet_bytes) / (rate_mbps * 1e6)
}

fn exponential<R: Rng>(mean: f64, rng: &mut R) -> f64 {
    let e: f64 = Exp1.sample(rng);
    mean * e
}

impl TrafficPattern {
    pub const ALL: [TrafficPattern; 3] = [
        TrafficPattern::Constant,
        TrafficPattern::Poisson,
        TrafficPattern::Bursty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrafficPattern::Constant => "constant",
            TrafficPattern::Poisson => "poisson",
            TrafficPattern::Bursty => "bursty",
        }
    }

    /// 生成一个包长（字节）
    pub fn packet_size<R: Rng>(self, rng: &mut R) -> u32 {
        match self {
            TrafficPattern::Constant => MTU_BYTES,
            // 截断取整，可能得到 0
            TrafficPattern::Poisson => exponential(POISSON_MEAN_PACKET_BYTES, rng) as u32,
            TrafficPattern::Bursty => {
                if rng.random_bool(BURST_LARGE_PROBABILITY) {
                    rng.random_range(1400..=1500)
                } else {
                    rng.random_range(64..=512)
                }
            }
        }
    }

    /// 生成距下一个包的间隔（秒）。间隔的均值取自一次独立抽取的包长。
    pub fn interval_secs<R: Rng>(self, rate_mbps: f64, rng: &mut R) -> f64 {
        match self {
            TrafficPattern::Constant => mean_interval_secs(self.packet_size(rng), rate_mbps),
            TrafficPattern::Poisson => {
                let mean = mean_interval_secs(self.packet_size(rng), rate_mbps);
                exponential(mean, rng)
            }
            TrafficPattern::Bursty => {
                if rng.random_bool(BURST_GAP_PROBABILITY) {
                    BURST_GAP_SECS
                } else {
                    let mean = mean_interval_secs(self.packet_size(rng), rate_mbps);
                    exponential(mean, rng)
                }
            }
        }
    }
}

impl fmt::Display for TrafficPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrafficPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| Error::UnknownPattern(s.to_string()))
    }
}
