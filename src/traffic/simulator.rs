//! 流量仿真运行器与结果

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::generator::{TrafficGenerator, TrafficWorld};
use super::profile::{TrafficProfile, triple_play_profiles};
use crate::dba::Requests;
use crate::error::{Error, Result};
use crate::net::PROTOCOL_OVERHEAD;
use crate::sim::{SimTime, Simulator};
use tracing::{debug, info};

/// 流量仿真参数
#[derive(Debug, Clone)]
pub struct SimOpts {
    pub subscribers: usize,
    /// 仿真时长（秒）
    pub horizon_secs: f64,
    /// 给定时结果可复现
    pub seed: Option<u64>,
}

impl Default for SimOpts {
    fn default() -> Self {
        Self {
            subscribers: 32,
            horizon_secs: 100.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Throughput,
    PacketsSent,
}

/// 一条指标记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub subscriber_id: String,
    pub metric_type: MetricType,
    pub value: f64,
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub horizon: f64,
    pub total_throughput: f64,
    pub average_throughput: f64,
    pub total_packets: u64,
    pub metrics: Vec<MetricRecord>,
}

impl SimulationResult {
    fn metric(&self, subscriber_id: &str, kind: MetricType) -> Option<f64> {
        self.metrics
            .iter()
            .find(|m| m.metric_type == kind && m.subscriber_id == subscriber_id)
            .map(|m| m.value)
    }

    pub fn throughput_of(&self, subscriber_id: &str) -> Option<f64> {
        self.metric(subscriber_id, MetricType::Throughput)
    }

    pub fn packets_of(&self, subscriber_id: &str) -> Option<u64> {
        self.metric(subscriber_id, MetricType::PacketsSent)
            .map(|v| v as u64)
    }

    /// 把测得吞吐加上协议开销，作为 DBA 的请求表
    pub fn bandwidth_requests(&self) -> Requests {
        self.metrics
            .iter()
            .filter(|m| m.metric_type == MetricType::Throughput)
            .map(|m| (m.subscriber_id.clone(), m.value * PROTOCOL_OVERHEAD))
            .collect()
    }
}

/// 流量仿真器：持有自己的随机数源，每次运行拥有独立的时钟与进程集合
#[derive(Debug)]
pub struct TrafficSimulator {
    subscribers: usize,
    horizon_secs: f64,
    rng: StdRng,
}

impl TrafficSimulator {
    /// 使用操作系统熵源
    pub fn new(subscribers: usize, horizon_secs: f64) -> Result<Self> {
        Self::with_rng(subscribers, horizon_secs, StdRng::from_os_rng())
    }

    /// 固定种子，结果可复现
    pub fn with_seed(subscribers: usize, horizon_secs: f64, seed: u64) -> Result<Self> {
        Self::with_rng(subscribers, horizon_secs, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(subscribers: usize, horizon_secs: f64, rng: StdRng) -> Result<Self> {
        if !(horizon_secs.is_finite() && horizon_secs > 0.0) {
            return Err(Error::invalid(
                "horizon",
                format!("expected a finite value > 0, got {horizon_secs}"),
            ));
        }
        Ok(Self {
            subscribers,
            horizon_secs,
            rng,
        })
    }

    pub fn from_opts(opts: &SimOpts) -> Result<Self> {
        match opts.seed {
            Some(seed) => Self::with_seed(opts.subscribers, opts.horizon_secs, seed),
            None => Self::new(opts.subscribers, opts.horizon_secs),
        }
    }

    /// 运行仿真。`profiles` 为 None 时使用随机的三网融合负载。
    #[tracing::instrument(skip(self, profiles), fields(subscribers = self.subscribers, horizon = self.horizon_secs))]
    pub fn run(mut self, profiles: Option<Vec<TrafficProfile>>) -> Result<SimulationResult> {
        let profiles = match profiles {
            Some(p) => p,
            None => triple_play_profiles(self.subscribers, &mut self.rng),
        };
        for p in &profiles {
            p.validate()?;
            debug!(onu = %p.subscriber_id, rate = p.rate, pattern = %p.pattern, "配置流量进程");
        }

        let generators = profiles
            .into_iter()
            .map(|p| TrafficGenerator::new(p.subscriber_id, p.pattern, p.rate))
            .collect::<Vec<_>>();
        let horizon = SimTime::from_secs_f64(self.horizon_secs);
        let mut world = TrafficWorld::new(generators, self.rng, horizon);
        let mut sim = Simulator::default();

        // 每个进程先等待第一个间隔
        for idx in 0..world.generators.len() {
            world.schedule_next(idx, &mut sim);
        }
        sim.run_until(horizon, &mut world);

        let result = collect_metrics(&world.generators, self.horizon_secs);
        info!(
            generators = world.generators.len(),
            events = sim.executed(),
            total_packets = result.total_packets,
            total_throughput = result.total_throughput,
            "📊 流量仿真完成"
        );
        Ok(result)
    }
}

fn collect_metrics(generators: &[TrafficGenerator], horizon_secs: f64) -> SimulationResult {
    let mut metrics = Vec::with_capacity(generators.len() * 2);
    let mut total_throughput = 0.0;
    let mut total_packets = 0u64;

    for g in generators {
        let throughput = g.throughput_mbps(horizon_secs);
        total_throughput += throughput;
        total_packets += g.packets_sent;

        metrics.push(MetricRecord {
            subscriber_id: g.subscriber_id.clone(),
            metric_type: MetricType::Throughput,
            value: throughput,
            timestamp: horizon_secs,
        });
        metrics.push(MetricRecord {
            subscriber_id: g.subscriber_id.clone(),
            metric_type: MetricType::PacketsSent,
            value: g.packets_sent as f64,
            timestamp: horizon_secs,
        });
    }

    let average_throughput = if generators.is_empty() {
        0.0
    } else {
        total_throughput / generators.len() as f64
    };

    SimulationResult {
        horizon: horizon_secs,
        total_throughput,
        average_throughput,
        total_packets,
        metrics,
    }
}

/// 便捷入口：`seed` 为 None 时结果不可复现
pub fn run_traffic_simulation(
    subscribers: usize,
    horizon_secs: f64,
    profiles: Option<Vec<TrafficProfile>>,
    seed: Option<u64>,
) -> Result<SimulationResult> {
    TrafficSimulator::from_opts(&SimOpts {
        subscribers,
        horizon_secs,
        seed,
    })?
    .run(profiles)
}
