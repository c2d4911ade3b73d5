//! 流量发生进程
//!
//! 每个进程的可恢复状态保存在 `TrafficGenerator` 中；一次唤醒对应一个
//! `EmitPacket` 事件，执行后再把下一次唤醒放回仿真器的事件队列。

use std::any::Any;

use rand::rngs::StdRng;

use super::pattern::TrafficPattern;
use crate::sim::{Event, SimTime, Simulator, World};
use tracing::trace;

/// 单个 ONU 的流量发生器
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficGenerator {
    pub subscriber_id: String,
    pub pattern: TrafficPattern,
    pub rate_mbps: f64,
    pub packets_sent: u64,
    pub bytes_sent: u64,
}

impl TrafficGenerator {
    pub fn new(subscriber_id: impl Into<String>, pattern: TrafficPattern, rate_mbps: f64) -> Self {
        Self {
            subscriber_id: subscriber_id.into(),
            pattern,
            rate_mbps,
            packets_sent: 0,
            bytes_sent: 0,
        }
    }

    /// 距下一次发包的等待时间（至少一个时钟刻度）；速率为 0 时不再发包
    pub fn next_wait(&self, rng: &mut StdRng) -> Option<SimTime> {
        if self.rate_mbps <= 0.0 {
            return None;
        }
        let secs = self.pattern.interval_secs(self.rate_mbps, rng);
        Some(SimTime::from_secs_f64(secs).max(SimTime(1)))
    }

    /// 记录发出一个包
    pub fn record_packet(&mut self, rng: &mut StdRng) -> u32 {
        let size = self.pattern.packet_size(rng);
        self.packets_sent += 1;
        self.bytes_sent += u64::from(size);
        size
    }

    /// 仿真时长内的平均吞吐（Mbps）
    pub fn throughput_mbps(&self, horizon_secs: f64) -> f64 {
        (self.bytes_sent as f64 * 8.0) / (horizon_secs * 1e6)
    }
}

/// 流量仿真的世界：所有发生器、共享随机数源与截止时间
pub struct TrafficWorld {
    pub generators: Vec<TrafficGenerator>,
    pub rng: StdRng,
    pub horizon: SimTime,
}

impl TrafficWorld {
    pub fn new(generators: Vec<TrafficGenerator>, rng: StdRng, horizon: SimTime) -> Self {
        Self {
            generators,
            rng,
            horizon,
        }
    }

    /// 为第 `idx` 个发生器调度下一次唤醒；超出截止时间则进程结束
    pub fn schedule_next(&mut self, idx: usize, sim: &mut Simulator) {
        let Some(wait) = self.generators[idx].next_wait(&mut self.rng) else {
            return;
        };
        let at = sim.now().saturating_add(wait);
        if at < self.horizon {
            sim.schedule(at, EmitPacket { generator: idx });
        }
    }
}

impl World for TrafficWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// 发包事件：记录一个包并调度同一进程的下一次唤醒
#[derive(Debug)]
pub struct EmitPacket {
    pub generator: usize,
}

impl Event for EmitPacket {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = world
            .as_any_mut()
            .downcast_mut::<TrafficWorld>()
            .expect("world must be TrafficWorld");

        let idx = self.generator;
        let size = w.generators[idx].record_packet(&mut w.rng);
        trace!(
            now = ?sim.now(),
            onu = %w.generators[idx].subscriber_id,
            size,
            packets_sent = w.generators[idx].packets_sent,
            "📦 发出数据包"
        );

        w.schedule_next(idx, sim);
    }
}
