//! 流量配置：显式配置或默认的三网融合（video / internet / voice）混合

use std::ops::Range;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pattern::TrafficPattern;
use crate::error::{Error, Result, ensure_non_negative};

/// 单个 ONU 的流量配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficProfile {
    pub subscriber_id: String,
    /// Mbps
    pub rate: f64,
    pub pattern: TrafficPattern,
}

impl TrafficProfile {
    pub fn new(subscriber_id: impl Into<String>, rate: f64, pattern: TrafficPattern) -> Self {
        Self {
            subscriber_id: subscriber_id.into(),
            rate,
            pattern,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_non_negative("rate", self.rate).map(|_| ())
    }
}

/// 业务类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceClass {
    Video,
    Internet,
    Voice,
}

impl ServiceClass {
    pub const ALL: [ServiceClass; 3] = [ServiceClass::Video, ServiceClass::Internet, ServiceClass::Voice];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceClass::Video => "video",
            ServiceClass::Internet => "internet",
            ServiceClass::Voice => "voice",
        }
    }

    /// 速率区间（Mbps）
    pub fn rate_range(self) -> Range<f64> {
        match self {
            ServiceClass::Video => 10.0..25.0,
            ServiceClass::Internet => 5.0..15.0,
            ServiceClass::Voice => 0.064..0.1,
        }
    }

    pub fn pattern(self) -> TrafficPattern {
        match self {
            ServiceClass::Video | ServiceClass::Voice => TrafficPattern::Constant,
            ServiceClass::Internet => TrafficPattern::Poisson,
        }
    }

    /// 按类别随机生成一个配置
    pub fn profile<R: Rng>(self, subscriber_id: impl Into<String>, rng: &mut R) -> TrafficProfile {
        TrafficProfile::new(subscriber_id, rng.random_range(self.rate_range()), self.pattern())
    }
}

impl FromStr for ServiceClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| Error::UnknownServiceClass(s.to_string()))
    }
}

/// 默认负载：每个 ONU 随机分到一个业务类别
pub fn triple_play_profiles<R: Rng>(subscribers: usize, rng: &mut R) -> Vec<TrafficProfile> {
    (0..subscribers)
        .map(|i| {
            let class = ServiceClass::ALL[rng.random_range(0..ServiceClass::ALL.len())];
            class.profile(format!("ONU-{}", i + 1), rng)
        })
        .collect()
}
